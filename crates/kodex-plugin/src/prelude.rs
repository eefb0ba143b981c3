//! Convenience re-exports for hosts embedding the plugin manager.

pub use kodex_core::error::{AppError, ErrorKind};
pub use kodex_core::result::AppResult;

pub use crate::catalog::{EntryPoint, ExtensionCatalog, StaticCatalog};
pub use crate::diagnostics::{DoctorReport, LoadDiagnostic, LoadStatus};
pub use crate::hooks::HookResponse;
pub use crate::loader::{ModuleLoader, StaticModuleLoader};
pub use crate::manager::{PluginHandle, PluginManager, RUNTIME_SOURCE};
pub use crate::manifest::PluginManifest;
pub use crate::registry::CapabilityRegistry;
pub use crate::traits::{HookOutput, HookPayload, Plugin, PluginContext, PluginFactory};
