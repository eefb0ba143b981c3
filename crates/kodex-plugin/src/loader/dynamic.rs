//! Shared-library loader using `libloading` (feature-gated).

#[cfg(feature = "dynamic")]
mod imp {
    use std::path::Path;
    use std::sync::Arc;

    use tracing::debug;

    use kodex_core::error::{AppError, ErrorKind};
    use kodex_core::result::AppResult;

    use crate::abi::{ABI_VERSION_SYMBOL, AbiVersionFn, FACTORY_SYMBOL, KODEX_PLUGIN_ABI_VERSION};
    use crate::loader::{LoadedModule, ModuleLoader};
    use crate::traits::PluginFactory;

    /// Loads plugins from shared libraries (.so / .dll / .dylib).
    ///
    /// Only load trusted plugins: opening a library runs its initializers
    /// and the factory runs in-process with no isolation.
    #[derive(Debug, Default)]
    pub struct DynamicLoader;

    impl DynamicLoader {
        /// Creates a new dynamic loader.
        pub fn new() -> Self {
            Self
        }
    }

    impl ModuleLoader for DynamicLoader {
        fn load(&mut self, path: &Path) -> AppResult<LoadedModule> {
            // SAFETY: plugin directories are trusted; see type docs.
            let library = unsafe { libloading::Library::new(path) }.map_err(|e| {
                AppError::with_source(
                    ErrorKind::Load,
                    format!("Unable to load plugin module from {}: {e}", path.display()),
                    e,
                )
            })?;

            // SAFETY: the symbol type is fixed by the plugin ABI.
            let factory: Option<PluginFactory> =
                match unsafe { library.get::<PluginFactory>(FACTORY_SYMBOL.as_bytes()) } {
                    Ok(symbol) => Some(*symbol),
                    Err(_) => None,
                };

            if factory.is_some() {
                // SAFETY: as above.
                let version = unsafe {
                    let abi = library
                        .get::<AbiVersionFn>(ABI_VERSION_SYMBOL.as_bytes())
                        .map_err(|e| {
                            AppError::with_source(
                                ErrorKind::Load,
                                format!(
                                    "Plugin module {} exports {FACTORY_SYMBOL} but not {ABI_VERSION_SYMBOL}",
                                    path.display()
                                ),
                                e,
                            )
                        })?;
                    abi()
                };

                if version != KODEX_PLUGIN_ABI_VERSION {
                    return Err(AppError::load(format!(
                        "Plugin module {} targets ABI version {version}, host expects {KODEX_PLUGIN_ABI_VERSION}",
                        path.display()
                    )));
                }
            }

            debug!(
                path = %path.display(),
                has_factory = factory.is_some(),
                "Shared library opened"
            );

            Ok(LoadedModule {
                factory,
                handle: Some(Arc::new(library)),
            })
        }
    }
}

/// Stub loader when the `dynamic` feature is not enabled.
#[cfg(not(feature = "dynamic"))]
mod imp {
    use std::path::Path;

    use kodex_core::error::AppError;
    use kodex_core::result::AppResult;

    use crate::loader::{LoadedModule, ModuleLoader};

    /// Stub dynamic loader; every load fails.
    #[derive(Debug, Default)]
    pub struct DynamicLoader;

    impl DynamicLoader {
        /// Creates a stub loader.
        pub fn new() -> Self {
            Self
        }
    }

    impl ModuleLoader for DynamicLoader {
        fn load(&mut self, path: &Path) -> AppResult<LoadedModule> {
            Err(AppError::load(format!(
                "Cannot load {}: kodex-plugin was built without the `dynamic` feature",
                path.display()
            )))
        }
    }
}

pub use imp::DynamicLoader;

#[cfg(all(test, feature = "dynamic"))]
mod tests {
    use super::*;
    use crate::loader::ModuleLoader;

    #[test]
    fn test_non_library_file_fails_to_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("not_a_library.so");
        std::fs::write(&path, b"definitely not ELF").unwrap();

        let mut loader = DynamicLoader::new();
        let err = loader.load(&path).unwrap_err();

        assert_eq!(err.kind, kodex_core::ErrorKind::Load);
        assert!(err.message.contains("Unable to load plugin module"));
    }
}
