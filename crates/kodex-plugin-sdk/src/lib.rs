//! # kodex-plugin-sdk
//!
//! SDK for developing Kodex plugins.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use kodex_plugin_sdk::prelude::*;
//!
//! #[derive(Debug)]
//! struct MyPlugin {
//!     manifest: PluginManifest,
//! }
//!
//! impl Plugin for MyPlugin {
//!     fn manifest(&self) -> &PluginManifest {
//!         &self.manifest
//!     }
//!
//!     fn activate(&self, _context: &PluginContext) -> anyhow::Result<()> {
//!         Ok(())
//!     }
//!
//!     fn handle_hook(&self, hook: &str, payload: &HookPayload) -> anyhow::Result<Option<HookOutput>> {
//!         if hook != "hook.name" {
//!             return Ok(None);
//!         }
//!         Ok(Some(hook_output!({ "plugin" => self.manifest.name, "payload" => payload })))
//!     }
//! }
//!
//! fn create() -> anyhow::Result<Box<dyn Plugin>> {
//!     Ok(Box::new(MyPlugin {
//!         manifest: PluginManifest::new("my-plugin", "0.1.0", "Describe what your plugin does.")
//!             .with_capabilities(["hook.name"]),
//!     }))
//! }
//!
//! // As a shared library dropped into the plugin directory:
//! declare_plugin!(create);
//! // Or compiled into the host and found through the extension catalog:
//! register_entry_point!("my-plugin", create);
//! ```

pub mod boundary;
pub mod macros;
pub mod values;

pub use kodex_plugin;
pub use kodex_plugin::{
    HookOutput, HookPayload, Plugin, PluginContext, PluginFactory, PluginManifest,
};

#[doc(hidden)]
pub use anyhow;
#[doc(hidden)]
pub use inventory;
#[doc(hidden)]
pub use serde_json;
pub use tracing;

/// Prelude for convenient imports.
pub mod prelude {
    pub use kodex_plugin::{HookOutput, HookPayload, Plugin, PluginContext, PluginManifest};

    pub use crate::values::ValueMapExt;
    pub use crate::{declare_plugin, hook_output, register_entry_point};
}
