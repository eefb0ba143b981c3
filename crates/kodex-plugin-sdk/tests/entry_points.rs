//! Link-time catalog registration through `register_entry_point!`.

use kodex_plugin::{DEFAULT_ENTRY_POINT_GROUP, InventoryCatalog, LoadStatus, PluginManager};
use kodex_plugin::ExtensionCatalog;
use kodex_plugin_sdk::prelude::*;

const TEST_GROUP: &str = "kodex.sdk-tests";

#[derive(Debug)]
struct Greeter {
    manifest: PluginManifest,
}

impl Plugin for Greeter {
    fn manifest(&self) -> &PluginManifest {
        &self.manifest
    }

    fn activate(&self, _context: &PluginContext) -> anyhow::Result<()> {
        Ok(())
    }

    fn handle_hook(&self, hook: &str, payload: &HookPayload) -> anyhow::Result<Option<HookOutput>> {
        if hook != "greet" {
            return Ok(None);
        }
        let who = payload.str_or("who", "world");
        kodex_plugin_sdk::tracing::debug!(who, "Greeting");
        Ok(Some(hook_output!({
            "plugin" => self.manifest.name,
            "greeting" => format!("hello, {who}"),
        })))
    }
}

fn greeter() -> anyhow::Result<Box<dyn Plugin>> {
    Ok(Box::new(Greeter {
        manifest: PluginManifest::new("greeter", "0.1.0", "Says hello").with_capabilities(["greet"]),
    }))
}

fn broken() -> anyhow::Result<Box<dyn Plugin>> {
    anyhow::bail!("greeter backend unavailable")
}

register_entry_point!(TEST_GROUP, "greeter", greeter);
register_entry_point!(TEST_GROUP, "another-broken", broken);
register_entry_point!("sdk-default-group", greeter);

#[test]
fn test_registered_entries_are_discovered() {
    let mut manager = PluginManager::new();

    let loaded = manager.load_entry_point_plugins(TEST_GROUP).unwrap();

    assert_eq!(loaded, 1);
    assert_eq!(manager.plugin_names(), vec!["greeter"]);

    // catalog order is by entry name
    let diags = manager.diagnostics();
    assert_eq!(diags[0].source, "entrypoint:another-broken");
    assert_eq!(diags[0].status, LoadStatus::Error);
    assert_eq!(diags[0].message, "greeter backend unavailable");
    assert_eq!(diags[1].source, "entrypoint:greeter");
    assert_eq!(diags[1].status, LoadStatus::Loaded);

    let mut payload = HookPayload::new();
    payload.insert("who".to_string(), serde_json::json!("kodex"));
    let outputs = manager.emit("greet", &payload, true).unwrap();
    assert_eq!(
        serde_json::to_value(&outputs).unwrap(),
        serde_json::json!([{"plugin": "greeter", "greeting": "hello, kodex"}])
    );
}

#[test]
fn test_two_argument_form_uses_default_group() {
    let names: Vec<String> = InventoryCatalog
        .entries(DEFAULT_ENTRY_POINT_GROUP)
        .iter()
        .map(|e| e.name().to_string())
        .collect();
    assert!(names.contains(&"sdk-default-group".to_string()));
    assert!(InventoryCatalog.entries(TEST_GROUP).len() == 2);
}
