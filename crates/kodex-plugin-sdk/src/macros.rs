//! Macros for exporting plugins.

/// Exports a plugin factory from a `cdylib` so the host's directory scan
/// can find it.
///
/// Emits the `get_plugin` factory symbol and the ABI version symbol. The
/// factory must have the signature `fn() -> anyhow::Result<Box<dyn Plugin>>`.
/// Panics in the factory, `activate` or `handle_hook` are caught inside the
/// library and returned as errors. Use at most once per library.
///
/// # Example
/// ```rust,ignore
/// declare_plugin!(create);
/// ```
#[macro_export]
macro_rules! declare_plugin {
    ($factory:path) => {
        /// Plugin ABI version this library was built against.
        #[unsafe(no_mangle)]
        pub extern "C" fn kodex_plugin_abi_version() -> u32 {
            $crate::kodex_plugin::abi::KODEX_PLUGIN_ABI_VERSION
        }

        /// Creates the plugin instance.
        #[unsafe(no_mangle)]
        pub fn get_plugin()
        -> $crate::anyhow::Result<::std::boxed::Box<dyn $crate::kodex_plugin::Plugin>> {
            $crate::boundary::contain($factory)
        }
    };
}

/// Registers a factory in the link-time extension catalog.
///
/// The two-argument form uses the default group (`kodex.plugins`).
///
/// # Example
/// ```rust,ignore
/// register_entry_point!("my-plugin", create);
/// register_entry_point!("acme.plugins", "my-plugin", create);
/// ```
#[macro_export]
macro_rules! register_entry_point {
    ($group:expr, $name:expr, $factory:path) => {
        $crate::inventory::submit! {
            $crate::kodex_plugin::EntryPointRegistration::new($group, $name, $factory)
        }
    };
    ($name:expr, $factory:path) => {
        $crate::register_entry_point!(
            $crate::kodex_plugin::DEFAULT_ENTRY_POINT_GROUP,
            $name,
            $factory
        );
    };
}

/// Builds a [`HookOutput`](crate::HookOutput) from key/value pairs.
///
/// Values go through `serde_json::json!`.
///
/// # Example
/// ```rust,ignore
/// let out = hook_output!({
///     "plugin" => "context-enricher",
///     "text" => format!("[{org}] {text}"),
/// });
/// ```
#[macro_export]
macro_rules! hook_output {
    ({ $($key:expr => $value:expr),* $(,)? }) => {{
        #[allow(unused_mut)]
        let mut output = $crate::HookOutput::new();
        $(
            output.insert(::std::string::ToString::to_string(&$key), $crate::serde_json::json!($value));
        )*
        output
    }};
}
