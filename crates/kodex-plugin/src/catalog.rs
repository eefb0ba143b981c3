//! Extension catalog: plugins discovered by group name instead of path.
//!
//! Crates linked into the host submit [`EntryPointRegistration`]s through
//! `inventory` (see `register_entry_point!` in the SDK); the manager reads
//! them through the [`ExtensionCatalog`] trait so tests and embedders can
//! supply their own catalog.

use std::fmt;
use std::sync::Arc;

use crate::traits::PluginFactory;

/// Link-time catalog record. Construct with [`EntryPointRegistration::new`]
/// inside `inventory::submit!`.
#[derive(Debug)]
pub struct EntryPointRegistration {
    /// Group the entry belongs to, e.g. `"kodex.plugins"`.
    pub group: &'static str,
    /// Entry name, used in diagnostics as `entrypoint:<name>`.
    pub name: &'static str,
    /// Factory building the plugin.
    pub factory: PluginFactory,
}

impl EntryPointRegistration {
    /// Creates a registration.
    pub const fn new(group: &'static str, name: &'static str, factory: PluginFactory) -> Self {
        Self {
            group,
            name,
            factory,
        }
    }
}

inventory::collect!(EntryPointRegistration);

type Resolver = Arc<dyn Fn() -> anyhow::Result<PluginFactory> + Send + Sync>;

/// A named reference to a plugin factory.
///
/// Resolving the reference is a separate step from calling the factory;
/// both can fail.
#[derive(Clone)]
pub struct EntryPoint {
    name: String,
    resolver: Resolver,
}

impl EntryPoint {
    /// An entry that always resolves to `factory`.
    pub fn new(name: impl Into<String>, factory: PluginFactory) -> Self {
        Self {
            name: name.into(),
            resolver: Arc::new(move || Ok(factory)),
        }
    }

    /// An entry whose factory is looked up on [`EntryPoint::load`].
    pub fn lazy<F>(name: impl Into<String>, resolver: F) -> Self
    where
        F: Fn() -> anyhow::Result<PluginFactory> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            resolver: Arc::new(resolver),
        }
    }

    /// Entry name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Resolves the referenced factory.
    pub fn load(&self) -> anyhow::Result<PluginFactory> {
        (self.resolver)()
    }
}

impl fmt::Debug for EntryPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntryPoint")
            .field("name", &self.name)
            .field("resolver", &"<fn>")
            .finish()
    }
}

/// Source of entry points keyed by group.
pub trait ExtensionCatalog: Send + Sync + fmt::Debug {
    /// Entries registered under `group`, in a stable order.
    fn entries(&self, group: &str) -> Vec<EntryPoint>;
}

/// Catalog backed by link-time `inventory` registrations.
///
/// Entries are returned sorted by name since link order is unspecified.
#[derive(Debug, Default, Clone, Copy)]
pub struct InventoryCatalog;

impl ExtensionCatalog for InventoryCatalog {
    fn entries(&self, group: &str) -> Vec<EntryPoint> {
        let mut entries: Vec<EntryPoint> = inventory::iter::<EntryPointRegistration>
            .into_iter()
            .filter(|reg| reg.group == group)
            .map(|reg| EntryPoint::new(reg.name, reg.factory))
            .collect();
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        entries
    }
}

/// Explicit in-memory catalog; entries keep insertion order.
#[derive(Debug, Default, Clone)]
pub struct StaticCatalog {
    entries: Vec<(String, EntryPoint)>,
}

impl StaticCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an entry under `group`.
    pub fn with_entry(mut self, group: impl Into<String>, entry: EntryPoint) -> Self {
        self.entries.push((group.into(), entry));
        self
    }
}

impl ExtensionCatalog for StaticCatalog {
    fn entries(&self, group: &str) -> Vec<EntryPoint> {
        self.entries
            .iter()
            .filter(|(g, _)| g == group)
            .map(|(_, entry)| entry.clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::Plugin;

    fn unused() -> anyhow::Result<Box<dyn Plugin>> {
        anyhow::bail!("unused")
    }

    #[test]
    fn test_static_catalog_filters_by_group() {
        let catalog = StaticCatalog::new()
            .with_entry("kodex.plugins", EntryPoint::new("b", unused))
            .with_entry("other", EntryPoint::new("x", unused))
            .with_entry("kodex.plugins", EntryPoint::new("a", unused));

        let names: Vec<String> = catalog
            .entries("kodex.plugins")
            .iter()
            .map(|e| e.name().to_string())
            .collect();
        assert_eq!(names, vec!["b", "a"]);
        assert!(catalog.entries("missing").is_empty());
    }

    #[test]
    fn test_lazy_entry_can_fail_to_resolve() {
        let entry = EntryPoint::lazy("broken", || anyhow::bail!("no module named 'broken'"));
        let err = entry.load().unwrap_err();
        assert_eq!(err.to_string(), "no module named 'broken'");
    }

    #[test]
    fn test_inventory_catalog_empty_group() {
        assert!(InventoryCatalog.entries("kodex.tests.nothing-here").is_empty());
    }
}
