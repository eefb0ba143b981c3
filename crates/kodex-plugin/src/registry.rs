//! Capability registry, an inverted index from capability to plugins.
//!
//! Built from a snapshot of the manager's active plugins and never
//! consulted by the manager itself; rebuild it when the plugin set changes.

use std::collections::BTreeMap;

use crate::manager::{PluginHandle, PluginManager};

/// Capability string → plugins that declared it, in indexing order.
///
/// Indexing is additive: indexing the same plugin twice lists it twice.
#[derive(Debug, Clone, Default)]
pub struct CapabilityRegistry {
    by_capability: BTreeMap<String, Vec<PluginHandle>>,
}

impl CapabilityRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a registry over every active plugin of `manager`.
    pub fn from_manager(manager: &PluginManager) -> Self {
        let mut registry = Self::new();
        registry.index_many(manager.plugins());
        registry
    }

    /// Appends `plugin` to the bucket of each capability it declares.
    pub fn index(&mut self, plugin: &PluginHandle) {
        for capability in &plugin.manifest().capabilities {
            self.by_capability
                .entry(capability.clone())
                .or_default()
                .push(plugin.clone());
        }
    }

    /// Indexes each plugin in order.
    pub fn index_many<'a, I>(&mut self, plugins: I)
    where
        I: IntoIterator<Item = &'a PluginHandle>,
    {
        for plugin in plugins {
            self.index(plugin);
        }
    }

    /// Plugins declaring `capability`; empty if unknown.
    pub fn get(&self, capability: &str) -> &[PluginHandle] {
        self.by_capability
            .get(capability)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Every known capability, sorted.
    pub fn all_capabilities(&self) -> Vec<String> {
        self.by_capability.keys().cloned().collect()
    }

    /// Capability (sorted) → plugin names, in indexing order.
    pub fn describe(&self) -> BTreeMap<String, Vec<String>> {
        self.by_capability
            .iter()
            .map(|(capability, plugins)| {
                let names = plugins.iter().map(|p| p.name().to_string()).collect();
                (capability.clone(), names)
            })
            .collect()
    }

    /// Returns `true` if nothing has been indexed.
    pub fn is_empty(&self) -> bool {
        self.by_capability.is_empty()
    }
}
