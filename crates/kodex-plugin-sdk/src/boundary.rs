//! Panic boundary for plugins exported from a shared library.
//!
//! A `cdylib` links its own copy of the Rust runtime, so a panic that
//! unwinds out of it cannot be caught by the host and aborts the process.
//! `declare_plugin!` routes the factory through [`contain`], which catches
//! panics inside the library and wraps the plugin in [`PanicBoundary`].

use kodex_plugin::guard::guarded;

use crate::{HookOutput, HookPayload, Plugin, PluginContext, PluginFactory, PluginManifest};

/// Runs `factory` and wraps its plugin so no panic leaves this library.
pub fn contain(factory: PluginFactory) -> anyhow::Result<Box<dyn Plugin>> {
    let plugin = guarded(factory).inspect_err(|e| {
        tracing::error!(error = %e, "Plugin factory failed");
    })?;
    Ok(Box::new(PanicBoundary::new(plugin)))
}

/// Forwards to the wrapped plugin, turning panics into errors.
#[derive(Debug)]
pub struct PanicBoundary {
    inner: Box<dyn Plugin>,
}

impl PanicBoundary {
    /// Wraps `inner`.
    pub fn new(inner: Box<dyn Plugin>) -> Self {
        Self { inner }
    }
}

impl Plugin for PanicBoundary {
    fn manifest(&self) -> &PluginManifest {
        self.inner.manifest()
    }

    fn activate(&self, context: &PluginContext) -> anyhow::Result<()> {
        guarded(|| self.inner.activate(context))
    }

    fn handle_hook(&self, hook: &str, payload: &HookPayload) -> anyhow::Result<Option<HookOutput>> {
        guarded(|| self.inner.handle_hook(hook, payload)).inspect_err(|e| {
            tracing::debug!(hook, error = %e, "Plugin hook failed");
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Volatile {
        manifest: PluginManifest,
    }

    impl Plugin for Volatile {
        fn manifest(&self) -> &PluginManifest {
            &self.manifest
        }

        fn activate(&self, context: &PluginContext) -> anyhow::Result<()> {
            if context.contains_key("explode") {
                panic!("activation exploded");
            }
            Ok(())
        }

        fn handle_hook(&self, hook: &str, _payload: &HookPayload) -> anyhow::Result<Option<HookOutput>> {
            match hook {
                "err" => anyhow::bail!("plain error"),
                "quiet" => Ok(None),
                _ => panic!("boom on {hook}"),
            }
        }
    }

    fn volatile() -> anyhow::Result<Box<dyn Plugin>> {
        Ok(Box::new(Volatile {
            manifest: PluginManifest::new("volatile", "0.1.0", "Panics on demand"),
        }))
    }

    fn panicking_factory() -> anyhow::Result<Box<dyn Plugin>> {
        panic!("factory blew up")
    }

    #[test]
    fn test_hook_panic_becomes_error() {
        let plugin = contain(volatile).unwrap();
        let err = plugin.handle_hook("anything", &HookPayload::new()).unwrap_err();
        assert_eq!(err.to_string(), "plugin panicked: boom on anything");
    }

    #[test]
    fn test_errors_and_results_pass_through() {
        let plugin = contain(volatile).unwrap();
        assert_eq!(plugin.manifest().name, "volatile");
        assert!(plugin.handle_hook("quiet", &HookPayload::new()).unwrap().is_none());
        let err = plugin.handle_hook("err", &HookPayload::new()).unwrap_err();
        assert_eq!(err.to_string(), "plain error");
    }

    #[test]
    fn test_activation_panic_becomes_error() {
        let plugin = contain(volatile).unwrap();
        let mut context = PluginContext::new();
        context.insert("explode".to_string(), serde_json::Value::Bool(true));
        let err = plugin.activate(&context).unwrap_err();
        assert_eq!(err.to_string(), "plugin panicked: activation exploded");
        assert!(plugin.activate(&PluginContext::new()).is_ok());
    }

    #[test]
    fn test_factory_panic_becomes_error() {
        let err = contain(panicking_factory).unwrap_err();
        assert_eq!(err.to_string(), "plugin panicked: factory blew up");
    }
}
