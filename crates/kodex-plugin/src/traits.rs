//! The plugin contract.

use serde_json::{Map, Value};

use crate::manifest::PluginManifest;

/// Mapping handed to [`Plugin::activate`].
pub type PluginContext = Map<String, Value>;

/// Free-form event data passed to [`Plugin::handle_hook`].
pub type HookPayload = Map<String, Value>;

/// Structured data a plugin returns from a hook.
pub type HookOutput = Map<String, Value>;

/// Zero-argument factory producing a plugin instance.
///
/// Shared libraries export one of these as `get_plugin`; extension
/// catalog entries resolve to one.
pub type PluginFactory = fn() -> anyhow::Result<Box<dyn Plugin>>;

/// Trait that all plugins must implement.
///
/// Methods take `&self`; plugins that keep activation state use interior
/// mutability. The host calls plugins from one thread at a time.
pub trait Plugin: Send + Sync + std::fmt::Debug {
    /// Returns the plugin's declared manifest.
    ///
    /// The manager validates and normalizes this once at registration and
    /// keeps its own copy; it is not consulted again afterwards.
    fn manifest(&self) -> &PluginManifest;

    /// Called once, before any hook, with the merged activation context.
    fn activate(&self, context: &PluginContext) -> anyhow::Result<()>;

    /// Handles a named hook. `Ok(None)` means the plugin has nothing to add.
    fn handle_hook(&self, hook: &str, payload: &HookPayload) -> anyhow::Result<Option<HookOutput>>;
}
