//! Loader for plugins compiled into the host binary.

use std::collections::HashMap;
use std::path::Path;

use kodex_core::error::AppError;
use kodex_core::result::AppResult;

use crate::loader::{LoadedModule, ModuleLoader};
use crate::traits::PluginFactory;

#[derive(Debug, Clone)]
enum StaticModule {
    Factory(PluginFactory),
    Broken(String),
}

/// Resolves plugin files to in-process factories by file stem.
///
/// A file named `context_enricher.so` resolves to the module registered as
/// `"context_enricher"`. Stems with no registration load as modules
/// without a factory.
#[derive(Debug, Clone, Default)]
pub struct StaticModuleLoader {
    modules: HashMap<String, StaticModule>,
}

impl StaticModuleLoader {
    /// Creates an empty loader.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a factory for files with the given stem.
    pub fn with_module(mut self, stem: impl Into<String>, factory: PluginFactory) -> Self {
        self.modules.insert(stem.into(), StaticModule::Factory(factory));
        self
    }

    /// Makes files with the given stem fail to load with `message`.
    pub fn with_broken_module(mut self, stem: impl Into<String>, message: impl Into<String>) -> Self {
        self.modules
            .insert(stem.into(), StaticModule::Broken(message.into()));
        self
    }
}

impl ModuleLoader for StaticModuleLoader {
    fn load(&mut self, path: &Path) -> AppResult<LoadedModule> {
        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .ok_or_else(|| {
                AppError::load(format!("Unable to load plugin module from {}", path.display()))
            })?;

        match self.modules.get(stem) {
            Some(StaticModule::Factory(factory)) => Ok(LoadedModule::with_factory(*factory)),
            Some(StaticModule::Broken(message)) => Err(AppError::load(message.clone())),
            None => Ok(LoadedModule::without_factory()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::Plugin;

    fn no_plugin() -> anyhow::Result<Box<dyn Plugin>> {
        anyhow::bail!("never called")
    }

    #[test]
    fn test_resolves_by_stem() {
        let mut loader = StaticModuleLoader::new()
            .with_module("alpha", no_plugin)
            .with_broken_module("beta", "syntax error");

        assert!(loader.load(Path::new("/p/alpha.so")).unwrap().factory.is_some());
        assert!(loader.load(Path::new("/p/gamma.so")).unwrap().factory.is_none());

        let err = loader.load(Path::new("/p/beta.so")).unwrap_err();
        assert_eq!(err.message, "syntax error");
    }
}
