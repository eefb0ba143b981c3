//! Drives the context enricher through the host's directory discovery.

use std::fs;

use serde_json::{Value, json};

use kodex_plugin::prelude::*;

fn manager_with(context: PluginContext) -> (tempfile::TempDir, PluginManager) {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("context_enricher.so"), b"").unwrap();

    let mut manager = PluginManager::builder()
        .module_loader(
            StaticModuleLoader::new().with_module("context_enricher", context_enricher::get_plugin),
        )
        .default_context(context)
        .build();

    let loaded = manager
        .load_file_plugins_matching(dir.path(), "*.so")
        .unwrap();
    assert_eq!(loaded, 1);

    (dir, manager)
}

fn payload(text: &str) -> HookPayload {
    let mut payload = HookPayload::new();
    payload.insert("text".to_string(), json!(text));
    payload
}

#[test]
fn test_preprocess_prefixes_default_org() {
    let (_dir, manager) = manager_with(PluginContext::new());

    assert_eq!(manager.plugin_names(), vec!["context-enricher"]);
    assert_eq!(manager.diagnostics()[0].status, LoadStatus::Loaded);

    let outputs = manager.emit("prompt.preprocess", &payload("hello"), false).unwrap();
    assert_eq!(
        serde_json::to_value(&outputs).unwrap(),
        json!([{"plugin": "context-enricher", "text": "[default-org] hello"}])
    );
}

#[test]
fn test_default_context_sets_org() {
    let mut context = PluginContext::new();
    context.insert("org".to_string(), Value::String("acme".to_string()));
    let (_dir, manager) = manager_with(context);

    let outputs = manager.emit("prompt.preprocess", &payload("hi"), true).unwrap();
    assert_eq!(outputs.len(), 1);
    assert_eq!(outputs[0].output().unwrap()["text"], json!("[acme] hi"));
}

#[test]
fn test_other_hooks_produce_nothing() {
    let (_dir, manager) = manager_with(PluginContext::new());

    let outputs = manager.emit("prompt.postprocess", &payload("hello"), true).unwrap();
    assert!(outputs.is_empty());
}

#[test]
fn test_capabilities_are_indexed() {
    let (_dir, manager) = manager_with(PluginContext::new());
    let registry = CapabilityRegistry::from_manager(&manager);

    assert_eq!(
        registry.all_capabilities(),
        vec!["context.enrich", "prompt.preprocess"]
    );
    assert_eq!(
        registry.describe()["context.enrich"],
        vec!["context-enricher".to_string()]
    );
    assert_eq!(registry.get("prompt.preprocess")[0].name(), "context-enricher");
}
