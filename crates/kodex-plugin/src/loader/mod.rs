//! Turning a plugin file into a callable factory.
//!
//! The manager only sees [`ModuleLoader`]; how a path becomes code is up to
//! the implementation. [`DynamicLoader`] opens shared libraries,
//! [`StaticModuleLoader`] serves compiled-in factories.

mod dynamic;
mod static_loader;

use std::any::Any;
use std::path::Path;
use std::sync::Arc;

use kodex_core::result::AppResult;

use crate::traits::PluginFactory;

pub use dynamic::DynamicLoader;
pub use static_loader::StaticModuleLoader;

/// Opaque keep-alive for whatever backs a loaded module (e.g. a shared
/// library). Plugin instances created from the module hold a clone.
pub type ModuleHandle = Arc<dyn Any + Send + Sync>;

/// A plugin file after loading.
#[derive(Default)]
pub struct LoadedModule {
    /// The module's `get_plugin` factory, if it exports one.
    pub factory: Option<PluginFactory>,
    /// Keeps the module's code mapped while plugins from it are alive.
    pub handle: Option<ModuleHandle>,
}

impl LoadedModule {
    /// A module exporting `factory` with nothing to keep alive.
    pub fn with_factory(factory: PluginFactory) -> Self {
        Self {
            factory: Some(factory),
            handle: None,
        }
    }

    /// A module that loaded fine but exports no factory.
    pub fn without_factory() -> Self {
        Self::default()
    }
}

impl std::fmt::Debug for LoadedModule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoadedModule")
            .field("has_factory", &self.factory.is_some())
            .field("has_handle", &self.handle.is_some())
            .finish()
    }
}

/// Loads a plugin file into a [`LoadedModule`].
pub trait ModuleLoader: Send + std::fmt::Debug {
    /// Loads the module at `path`.
    ///
    /// A module without a factory is `Ok` with `factory: None`; errors are
    /// reserved for files that cannot be loaded at all.
    fn load(&mut self, path: &Path) -> AppResult<LoadedModule>;
}
