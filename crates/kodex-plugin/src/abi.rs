//! Symbols a plugin shared library exports.
//!
//! Plugins are Rust `cdylib`s built against the same `kodex-plugin`
//! version and toolchain as the host. `declare_plugin!` in the SDK emits
//! both symbols.

/// Version of the host/plugin binary contract.
///
/// Bump whenever [`crate::Plugin`] or [`crate::PluginFactory`] change shape.
pub const KODEX_PLUGIN_ABI_VERSION: u32 = 1;

/// Name of the factory symbol, `fn() -> anyhow::Result<Box<dyn Plugin>>`.
pub const FACTORY_SYMBOL: &str = "get_plugin";

/// Name of the ABI version symbol, `extern "C" fn() -> u32`.
pub const ABI_VERSION_SYMBOL: &str = "kodex_plugin_abi_version";

/// Signature of the exported ABI version function.
pub type AbiVersionFn = unsafe extern "C" fn() -> u32;
