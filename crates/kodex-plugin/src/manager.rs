//! Plugin manager: discovery, activation and hook dispatch.
//!
//! The manager is the single owner of "which plugins are active". Every
//! plugin enters through [`PluginManager::register`] (directly or from one
//! of the discovery loops), which is also the only place the active list
//! and the name set change.
//!
//! Failure policy:
//! - `register` called directly always returns its error.
//! - Discovery loops record a diagnostic per failed candidate and keep
//!   going, unless the manager was built with `continue_on_error(false)`.
//! - `emit` captures handler failures as [`HookResponse::Failed`] entries,
//!   unless `fail_fast` is set.
//!
//! Errors and panics that originate in plugin code are flattened to text
//! before they leave the manager, so nothing allocated by a plugin library
//! outlives the library.

use std::backtrace::{Backtrace, BacktraceStatus};
use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use glob::Pattern;
use tracing::{debug, error, info, warn};

use kodex_core::config::PluginConfig;
use kodex_core::config::plugin::default_pattern;
use kodex_core::error::{AppError, ErrorKind};
use kodex_core::result::AppResult;

use crate::catalog::{EntryPoint, ExtensionCatalog, InventoryCatalog};
use crate::diagnostics::{DoctorReport, LoadDiagnostic};
use crate::guard::guarded;
use crate::hooks::HookResponse;
use crate::loader::{DynamicLoader, LoadedModule, ModuleHandle, ModuleLoader};
use crate::manifest::PluginManifest;
use crate::traits::{HookPayload, Plugin, PluginContext, PluginFactory};

/// Source recorded for plugins registered directly by the host.
pub const RUNTIME_SOURCE: &str = "runtime";

/// Diagnostic message for modules that export no factory.
pub const MISSING_FACTORY_MESSAGE: &str = "missing get_plugin()";

/// Diagnostic message for a plugin directory that does not exist.
pub const MISSING_DIRECTORY_MESSAGE: &str = "plugin directory missing";

/// Diagnostic message for a directory entry whose name is not UTF-8.
pub const NON_UTF8_NAME_MESSAGE: &str = "file name is not valid UTF-8";

#[derive(Clone)]
struct Instance {
    // Must drop before `module`, which may own the plugin's code.
    plugin: Arc<dyn Plugin>,
    module: Option<ModuleHandle>,
}

/// An active plugin as seen by the manager.
///
/// Carries the normalized manifest; the plugin's own `manifest()` is not
/// consulted after registration.
#[derive(Clone)]
pub struct PluginHandle {
    manifest: PluginManifest,
    source: String,
    instance: Instance,
}

impl PluginHandle {
    /// The normalized manifest.
    pub fn manifest(&self) -> &PluginManifest {
        &self.manifest
    }

    /// The plugin's normalized name.
    pub fn name(&self) -> &str {
        &self.manifest.name
    }

    /// Where the plugin came from: a file path, `entrypoint:<name>`, or
    /// `runtime`.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The plugin instance.
    pub fn plugin(&self) -> &dyn Plugin {
        self.instance.plugin.as_ref()
    }
}

impl fmt::Debug for PluginHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PluginHandle")
            .field("manifest", &self.manifest)
            .field("source", &self.source)
            .field("dynamic", &self.instance.module.is_some())
            .finish()
    }
}

/// Loads plugins and invokes hooks across all active plugins.
///
/// Not internally synchronized; hosts sharing a manager across threads
/// must serialize calls themselves.
#[derive(Debug)]
pub struct PluginManager {
    plugins: Vec<PluginHandle>,
    plugin_names: HashSet<String>,
    diagnostics: Vec<LoadDiagnostic>,
    continue_on_error: bool,
    default_context: PluginContext,
    module_loader: Box<dyn ModuleLoader>,
    catalog: Arc<dyn ExtensionCatalog>,
}

impl PluginManager {
    /// Creates a lenient manager with an empty default context, the
    /// shared-library loader and the link-time extension catalog.
    pub fn new() -> Self {
        PluginManagerBuilder::new().build()
    }

    /// Starts building a manager.
    pub fn builder() -> PluginManagerBuilder {
        PluginManagerBuilder::new()
    }

    /// Validates, activates and registers `plugin`.
    ///
    /// `context` is merged over the manager's default context; its keys win.
    /// Fails with a validation error for an invalid manifest or a name that
    /// is already registered, and with an activation error if the plugin
    /// refuses to activate. Nothing is recorded on failure.
    pub fn register(
        &mut self,
        plugin: Arc<dyn Plugin>,
        context: Option<&PluginContext>,
        source: &str,
    ) -> AppResult<()> {
        self.admit(
            Instance {
                plugin,
                module: None,
            },
            context,
            source,
        )
        .map(|_| ())
    }

    /// Loads plugins from `directory` using the platform's shared-library
    /// pattern (e.g. `*.so`).
    pub fn load_file_plugins(&mut self, directory: impl AsRef<Path>) -> AppResult<usize> {
        self.load_file_plugins_matching(directory, &default_pattern())
    }

    /// Loads plugins from files in `directory` whose names match `pattern`.
    ///
    /// Files are tried in sorted name order; names starting with `_` are
    /// ignored. A missing directory is recorded as skipped and yields `0`.
    /// Returns the number of plugins registered.
    pub fn load_file_plugins_matching(
        &mut self,
        directory: impl AsRef<Path>,
        pattern: &str,
    ) -> AppResult<usize> {
        let directory = directory.as_ref();
        let dir_source = directory.display().to_string();

        if !directory.exists() {
            warn!(directory = %dir_source, "Plugin directory missing, skipping");
            self.diagnostics.push(LoadDiagnostic::skipped(
                dir_source,
                MISSING_DIRECTORY_MESSAGE,
            ));
            return Ok(0);
        }

        let matcher = Pattern::new(pattern).map_err(|e| {
            AppError::with_source(
                ErrorKind::Configuration,
                format!("Invalid plugin file pattern '{pattern}': {e}"),
                e,
            )
        })?;

        let DirectoryScan {
            candidates,
            undecodable,
        } = match scan_directory(directory, &matcher) {
            Ok(scan) => scan,
            Err(e) => {
                self.record_load_error(&dir_source, e)?;
                return Ok(0);
            }
        };

        for path in undecodable {
            let source = path.display().to_string();
            warn!(source = %source, "Plugin file name is not valid UTF-8, skipping");
            self.diagnostics
                .push(LoadDiagnostic::skipped(source, NON_UTF8_NAME_MESSAGE));
        }

        debug!(
            directory = %dir_source,
            candidates = candidates.len(),
            "Scanning plugin directory"
        );

        let mut loaded = 0;
        for path in candidates {
            let source = path.display().to_string();
            match self.load_file_candidate(&path, &source) {
                Ok(true) => loaded += 1,
                Ok(false) => {}
                Err(e) => self.record_load_error(&source, e)?,
            }
        }

        info!(directory = %dir_source, loaded, "File plugin discovery finished");
        Ok(loaded)
    }

    /// Loads every entry registered under `group` in the extension catalog.
    ///
    /// Diagnostics use `entrypoint:<name>` as the source. Returns the number
    /// of plugins registered.
    pub fn load_entry_point_plugins(&mut self, group: &str) -> AppResult<usize> {
        let catalog = Arc::clone(&self.catalog);
        let mut loaded = 0;

        for entry in catalog.entries(group) {
            let source = format!("entrypoint:{}", entry.name());
            match self.load_entry_point(&entry, &source) {
                Ok(()) => loaded += 1,
                Err(e) => self.record_load_error(&source, e)?,
            }
        }

        info!(group, loaded, "Entry-point plugin discovery finished");
        Ok(loaded)
    }

    /// Runs the discovery described by `config`: the plugin directory, then
    /// the extension catalog when enabled. Returns the total registered.
    pub fn load_from_config(&mut self, config: &PluginConfig) -> AppResult<usize> {
        let mut loaded = self.load_file_plugins_matching(&config.directory, &config.pattern)?;
        if config.load_entry_points {
            loaded += self.load_entry_point_plugins(&config.entry_point_group)?;
        }
        Ok(loaded)
    }

    /// Sends `hook` to every active plugin in registration order.
    ///
    /// Plugins returning `None` contribute nothing. A failing handler either
    /// aborts the call (`fail_fast`), leaving later plugins uncalled, or is
    /// recorded as a [`HookResponse::Failed`] entry in its position.
    ///
    /// The fail-fast error carries the handler's cause as text in its
    /// message and has no `source`.
    pub fn emit(
        &self,
        hook: &str,
        payload: &HookPayload,
        fail_fast: bool,
    ) -> AppResult<Vec<HookResponse>> {
        debug!(hook, plugin_count = self.plugins.len(), "Dispatching hook");

        let mut outputs = Vec::new();
        for handle in &self.plugins {
            let plugin = &handle.instance.plugin;
            match guarded(|| plugin.handle_hook(hook, payload)) {
                Ok(Some(output)) => outputs.push(HookResponse::Output(output)),
                Ok(None) => {}
                Err(e) => {
                    let message = format!("{e:#}");
                    if fail_fast {
                        error!(plugin = %handle.name(), hook, error = %message, "Hook failed, aborting dispatch");
                        return Err(AppError::hook_execution(format!(
                            "Plugin '{}' failed on hook '{hook}': {message}",
                            handle.name()
                        )));
                    }
                    warn!(plugin = %handle.name(), hook, error = %message, "Hook failed");
                    outputs.push(HookResponse::Failed {
                        plugin: handle.name().to_string(),
                        error: message,
                        hook: hook.to_string(),
                    });
                }
            }
        }

        Ok(outputs)
    }

    /// Active plugins in registration order.
    pub fn plugins(&self) -> &[PluginHandle] {
        &self.plugins
    }

    /// Normalized manifests of active plugins, in registration order.
    pub fn list_manifests(&self) -> Vec<PluginManifest> {
        self.plugins.iter().map(|p| p.manifest.clone()).collect()
    }

    /// The diagnostics log, oldest first.
    pub fn diagnostics(&self) -> &[LoadDiagnostic] {
        &self.diagnostics
    }

    /// Active plugin names, sorted.
    pub fn plugin_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.plugin_names.iter().cloned().collect();
        names.sort();
        names
    }

    /// Returns `true` if a plugin with this normalized name is active.
    pub fn contains(&self, name: &str) -> bool {
        self.plugin_names.contains(name)
    }

    /// Number of active plugins.
    pub fn plugin_count(&self) -> usize {
        self.plugins.len()
    }

    /// Whether discovery loops keep going after a failed candidate.
    pub fn continue_on_error(&self) -> bool {
        self.continue_on_error
    }

    /// The context merged into every activation.
    pub fn default_context(&self) -> &PluginContext {
        &self.default_context
    }

    /// Summary for troubleshooting.
    pub fn doctor_report(&self) -> DoctorReport {
        DoctorReport {
            plugin_count: self.plugins.len(),
            plugin_names: self.plugin_names(),
            diagnostics: self.diagnostics.clone(),
        }
    }

    fn admit(
        &mut self,
        instance: Instance,
        context: Option<&PluginContext>,
        source: &str,
    ) -> AppResult<String> {
        let manifest = instance.plugin.manifest().normalized();
        manifest.validate()?;

        if self.plugin_names.contains(&manifest.name) {
            return Err(AppError::validation(format!(
                "Duplicate plugin name '{}' is not allowed",
                manifest.name
            )));
        }

        let runtime_context = self.activation_context(context);
        guarded(|| instance.plugin.activate(&runtime_context)).map_err(|e| {
            AppError::activation(format!(
                "Plugin '{}' failed to activate: {e:#}",
                manifest.name
            ))
        })?;

        let name = manifest.name.clone();
        info!(
            plugin = %name,
            version = %manifest.version,
            capabilities = manifest.capabilities.len(),
            source,
            "Plugin registered"
        );

        self.plugins.push(PluginHandle {
            manifest,
            source: source.to_string(),
            instance,
        });
        self.plugin_names.insert(name.clone());
        self.diagnostics.push(LoadDiagnostic::loaded(source, &name));

        Ok(name)
    }

    fn activation_context(&self, context: Option<&PluginContext>) -> PluginContext {
        let mut merged = self.default_context.clone();
        if let Some(context) = context {
            for (key, value) in context {
                merged.insert(key.clone(), value.clone());
            }
        }
        merged
    }

    /// `Ok(false)` when the module has no factory.
    fn load_file_candidate(&mut self, path: &Path, source: &str) -> AppResult<bool> {
        let LoadedModule { factory, handle } = self.module_loader.load(path)?;

        let Some(factory) = factory else {
            warn!(source, "Plugin module has no factory, skipping");
            self.diagnostics
                .push(LoadDiagnostic::skipped(source, MISSING_FACTORY_MESSAGE));
            return Ok(false);
        };

        let plugin = instantiate(factory)?;
        self.admit(
            Instance {
                plugin,
                module: handle,
            },
            None,
            source,
        )?;
        Ok(true)
    }

    fn load_entry_point(&mut self, entry: &EntryPoint, source: &str) -> AppResult<()> {
        let factory = entry
            .load()
            .map_err(|e| AppError::load(format!("{e:#}")))?;
        let plugin = instantiate(factory)?;
        self.admit(
            Instance {
                plugin,
                module: None,
            },
            None,
            source,
        )?;
        Ok(())
    }

    /// Records a failed candidate; in strict mode turns it into a load error.
    fn record_load_error(&mut self, source: &str, err: AppError) -> AppResult<()> {
        error!(source, error = %err.message, "Plugin load failed");
        self.diagnostics
            .push(LoadDiagnostic::error(source, err.message.clone()));

        if self.continue_on_error {
            return Ok(());
        }

        let message = format!(
            "Failed to load plugin from {source}: {}{}",
            err.message,
            trace_of(&err)
        );
        Err(AppError::with_source(ErrorKind::Load, message, err))
    }
}

impl Default for PluginManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for [`PluginManager`].
#[derive(Debug)]
pub struct PluginManagerBuilder {
    continue_on_error: bool,
    default_context: PluginContext,
    module_loader: Option<Box<dyn ModuleLoader>>,
    catalog: Option<Arc<dyn ExtensionCatalog>>,
}

impl PluginManagerBuilder {
    /// Lenient defaults: failures are recorded, discovery continues.
    pub fn new() -> Self {
        Self {
            continue_on_error: true,
            default_context: PluginContext::new(),
            module_loader: None,
            catalog: None,
        }
    }

    /// Takes `continue_on_error` and the default context from `config`.
    pub fn from_config(config: &PluginConfig) -> Self {
        Self::new()
            .continue_on_error(config.continue_on_error)
            .default_context(config.default_context.clone())
    }

    /// `false` makes the first failed discovery candidate abort the call.
    pub fn continue_on_error(mut self, continue_on_error: bool) -> Self {
        self.continue_on_error = continue_on_error;
        self
    }

    /// Context merged into every activation.
    pub fn default_context(mut self, context: PluginContext) -> Self {
        self.default_context = context;
        self
    }

    /// Replaces the shared-library loader.
    pub fn module_loader(mut self, loader: impl ModuleLoader + 'static) -> Self {
        self.module_loader = Some(Box::new(loader));
        self
    }

    /// Replaces the link-time extension catalog.
    pub fn catalog(mut self, catalog: impl ExtensionCatalog + 'static) -> Self {
        self.catalog = Some(Arc::new(catalog));
        self
    }

    /// Builds the manager.
    pub fn build(self) -> PluginManager {
        PluginManager {
            plugins: Vec::new(),
            plugin_names: HashSet::new(),
            diagnostics: Vec::new(),
            continue_on_error: self.continue_on_error,
            default_context: self.default_context,
            module_loader: self
                .module_loader
                .unwrap_or_else(|| Box::new(DynamicLoader::new())),
            catalog: self.catalog.unwrap_or_else(|| Arc::new(InventoryCatalog)),
        }
    }
}

impl Default for PluginManagerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn instantiate(factory: PluginFactory) -> AppResult<Arc<dyn Plugin>> {
    guarded(factory)
        .map(Arc::from)
        .map_err(|e| AppError::load(format!("{e:#}")))
}

struct DirectoryScan {
    /// Matching files, sorted by name.
    candidates: Vec<PathBuf>,
    /// Files whose names cannot be matched.
    undecodable: Vec<PathBuf>,
}

/// Matching files in `directory`, `_`-prefixed names and subdirectories
/// excluded.
fn scan_directory(directory: &Path, matcher: &Pattern) -> AppResult<DirectoryScan> {
    let mut candidates = Vec::new();
    let mut undecodable = Vec::new();

    for entry in fs::read_dir(directory)? {
        let entry = entry?;
        if entry.file_type()?.is_dir() {
            continue;
        }
        let file_name = entry.file_name();
        let Some(name) = file_name.to_str() else {
            undecodable.push(entry.path());
            continue;
        };
        if name.starts_with('_') || !matcher.matches(name) {
            continue;
        }
        candidates.push(entry.path());
    }

    candidates.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    undecodable.sort();
    Ok(DirectoryScan {
        candidates,
        undecodable,
    })
}

fn trace_of(err: &AppError) -> String {
    let mut trace = String::new();
    if let Some((_, causes)) = err.chain().split_once('\n') {
        trace.push('\n');
        trace.push_str(causes);
    }
    let backtrace = Backtrace::capture();
    if backtrace.status() == BacktraceStatus::Captured {
        trace.push('\n');
        trace.push_str(&backtrace.to_string());
    }
    trace
}
