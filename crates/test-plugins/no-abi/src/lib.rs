//! Plugin library exporting a factory but no ABI version symbol.

use kodex_plugin::{HookOutput, HookPayload, Plugin, PluginContext, PluginManifest};

#[derive(Debug)]
struct Unversioned {
    manifest: PluginManifest,
}

impl Plugin for Unversioned {
    fn manifest(&self) -> &PluginManifest {
        &self.manifest
    }

    fn activate(&self, _context: &PluginContext) -> anyhow::Result<()> {
        Ok(())
    }

    fn handle_hook(&self, _hook: &str, _payload: &HookPayload) -> anyhow::Result<Option<HookOutput>> {
        Ok(None)
    }
}

/// Creates the plugin.
#[unsafe(no_mangle)]
pub fn get_plugin() -> anyhow::Result<Box<dyn Plugin>> {
    Ok(Box::new(Unversioned {
        manifest: PluginManifest::new("unversioned", "0.1.0", "Exports no ABI version"),
    }))
}
