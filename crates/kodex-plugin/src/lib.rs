//! # kodex-plugin
//!
//! Plugin host for Kodex. Provides:
//!
//! - Manifest normalization and validation
//! - Discovery from a plugin directory (shared libraries via `libloading`,
//!   or compiled-in modules) and from a link-time extension catalog
//! - Activation with a shared default context
//! - Hook dispatch with error-collecting or fail-fast semantics
//! - A capability index over the active plugins
//! - Load diagnostics and a doctor report

pub mod abi;
pub mod catalog;
pub mod diagnostics;
#[doc(hidden)]
pub mod guard;
pub mod hooks;
pub mod loader;
pub mod manager;
pub mod manifest;
pub mod prelude;
pub mod registry;
pub mod traits;

pub use catalog::{
    EntryPoint, EntryPointRegistration, ExtensionCatalog, InventoryCatalog, StaticCatalog,
};
pub use diagnostics::{DoctorReport, LoadDiagnostic, LoadStatus};
pub use hooks::HookResponse;
pub use kodex_core::config::DEFAULT_ENTRY_POINT_GROUP;
pub use loader::{DynamicLoader, LoadedModule, ModuleLoader, StaticModuleLoader};
pub use manager::{PluginHandle, PluginManager, PluginManagerBuilder};
pub use manifest::PluginManifest;
pub use registry::CapabilityRegistry;
pub use traits::{HookOutput, HookPayload, Plugin, PluginContext, PluginFactory};

#[doc(hidden)]
pub use inventory;
