//! Plugin library built against a different plugin ABI version.

use kodex_plugin::{HookOutput, HookPayload, Plugin, PluginContext, PluginManifest};

/// ABI version this library claims.
pub const CLAIMED_ABI_VERSION: u32 = 999;

#[derive(Debug)]
struct FromTheFuture {
    manifest: PluginManifest,
}

impl Plugin for FromTheFuture {
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

/// Reports the claimed ABI version.
#[unsafe(no_mangle)]
pub extern "C" fn kodex_plugin_abi_version() -> u32 {
    CLAIMED_ABI_VERSION
}

/// Creates the plugin.
#[unsafe(no_mangle)]
pub fn get_plugin() -> anyhow::Result<Box<dyn Plugin>> {
    Ok(Box::new(FromTheFuture {
        manifest: PluginManifest::new("from-the-future", "9.9.9", "Targets ABI version 999"),
    }))
}
