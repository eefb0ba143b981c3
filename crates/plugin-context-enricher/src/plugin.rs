//! Context enricher plugin implementation.

use std::sync::RwLock;

use anyhow::anyhow;
use kodex_plugin_sdk::prelude::*;

/// Hook this plugin responds to.
pub const PREPROCESS_HOOK: &str = "prompt.preprocess";

/// Organisation used when the activation context names none.
pub const DEFAULT_ORG: &str = "default-org";

/// Adds extra prompt context before execution.
#[derive(Debug)]
pub struct ContextEnricherPlugin {
    manifest: PluginManifest,
    org: RwLock<String>,
}

impl ContextEnricherPlugin {
    /// Create a new context enricher.
    pub fn new() -> Self {
        Self {
            manifest: PluginManifest::new(
                "context-enricher",
                "0.1.0",
                "Adds extra prompt context before execution.",
            )
            .with_capabilities([PREPROCESS_HOOK, "context.enrich"]),
            org: RwLock::new(DEFAULT_ORG.to_string()),
        }
    }

    /// The organisation prefix currently in effect.
    pub fn org(&self) -> String {
        self.org
            .read()
            .map(|org| org.clone())
            .unwrap_or_else(|_| DEFAULT_ORG.to_string())
    }
}

impl Default for ContextEnricherPlugin {
    fn default() -> Self {
        Self::new()
    }
}

impl Plugin for ContextEnricherPlugin {
    fn manifest(&self) -> &PluginManifest {
        &self.manifest
    }

    fn activate(&self, context: &PluginContext) -> anyhow::Result<()> {
        let org = if context.contains_key("org") {
            context.text("org")
        } else {
            DEFAULT_ORG.to_string()
        };

        tracing::debug!(org = %org, "Context enricher activated");

        *self
            .org
            .write()
            .map_err(|_| anyhow!("organisation lock poisoned"))? = org;
        Ok(())
    }

    fn handle_hook(&self, hook: &str, payload: &HookPayload) -> anyhow::Result<Option<HookOutput>> {
        if hook != PREPROCESS_HOOK {
            return Ok(None);
        }

        let text = payload.text("text");
        let enriched = format!("[{}] {text}", self.org());

        Ok(Some(hook_output!({
            "plugin" => self.manifest.name,
            "text" => enriched.trim(),
        })))
    }
}
