//! Plugin library that panics from inside its handlers.
//!
//! `activate` panics when the context sets `panic_on_activate`; the `err`
//! hook returns an ordinary error, `quiet` returns nothing, and every other
//! hook panics.

use kodex_plugin_sdk::prelude::*;

#[derive(Debug)]
struct BoomPlugin {
    manifest: PluginManifest,
}

impl Plugin for BoomPlugin {
    fn manifest(&self) -> &PluginManifest {
        &self.manifest
    }

    fn activate(&self, context: &PluginContext) -> anyhow::Result<()> {
        if context.get_bool("panic_on_activate") == Some(true) {
            panic!("activation refused");
        }
        Ok(())
    }

    fn handle_hook(&self, hook: &str, _payload: &HookPayload) -> anyhow::Result<Option<HookOutput>> {
        match hook {
            "err" => anyhow::bail!("plain error"),
            "quiet" => Ok(None),
            _ => panic!("boom on {hook}"),
        }
    }
}

/// Creates the plugin.
pub fn create() -> anyhow::Result<Box<dyn Plugin>> {
    Ok(Box::new(BoomPlugin {
        manifest: PluginManifest::new("boom", "0.1.0", "Panics in its handlers")
            .with_capabilities(["test.panic"]),
    }))
}

declare_plugin!(create);
