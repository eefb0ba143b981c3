//! Context enricher plugin for Kodex.
//!
//! Handles `prompt.preprocess` by prefixing the prompt text with the
//! organisation taken from the activation context (`org`, defaulting to
//! `default-org`). Build as a `cdylib` and drop the library into the
//! plugin directory, or link it and use [`create`] directly.

pub mod plugin;

pub use plugin::ContextEnricherPlugin;

use kodex_plugin_sdk::prelude::*;

/// Creates a fresh, unactivated plugin instance.
pub fn create() -> anyhow::Result<Box<dyn Plugin>> {
    Ok(Box::new(ContextEnricherPlugin::new()))
}

declare_plugin!(create);
