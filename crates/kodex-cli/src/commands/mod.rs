//! CLI command definitions and dispatch.

pub mod capabilities;
pub mod doctor;
pub mod emit;
pub mod list;
pub mod scaffold;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::output::OutputFormat;
use kodex_core::config::{AppConfig, PluginConfig};
use kodex_core::error::AppError;
use kodex_plugin::PluginManager;

/// Kodex plugin runtime
#[derive(Debug, Parser)]
#[command(name = "kodex", version, about, long_about = None)]
pub struct Cli {
    /// Path to a configuration file (merged over `config/default.toml`)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Directory with local plugins
    #[arg(long)]
    pub plugin_dir: Option<String>,

    /// Glob selecting plugin files inside the plugin directory
    #[arg(long)]
    pub pattern: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Shorthand for `--format json`
    #[arg(long)]
    pub json: bool,

    /// Abort on the first plugin that fails to load
    #[arg(long)]
    pub strict: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List discovered plugins
    List,
    /// Emit a hook event
    Emit(emit::EmitArgs),
    /// Print plugin loader diagnostics
    Doctor,
    /// List discovered capabilities
    Capabilities,
    /// Create a starter plugin crate
    Scaffold(scaffold::ScaffoldArgs),
}

impl Cli {
    /// Load configuration and apply command-line overrides.
    pub fn load_config(&self) -> Result<AppConfig, AppError> {
        let mut config = AppConfig::load(self.config.as_deref())?;
        self.apply_overrides(&mut config);
        Ok(config)
    }

    /// Effective output format.
    pub fn output_format(&self) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else {
            self.format
        }
    }

    /// Execute the CLI command
    pub async fn execute(&self, config: AppConfig) -> Result<(), AppError> {
        let manager = load_plugins(&config.plugins)?;
        let format = self.output_format();

        match &self.command {
            Commands::List => list::execute(&manager, format),
            Commands::Emit(args) => emit::execute(args, &manager),
            Commands::Doctor => doctor::execute(&manager),
            Commands::Capabilities => capabilities::execute(&manager, format),
            Commands::Scaffold(args) => scaffold::execute(args).await,
        }
    }

    fn apply_overrides(&self, config: &mut AppConfig) {
        if let Some(dir) = &self.plugin_dir {
            config.plugins.directory = dir.clone();
        }
        if let Some(pattern) = &self.pattern {
            config.plugins.pattern = pattern.clone();
        }
        if self.strict {
            config.plugins.continue_on_error = false;
        }
    }
}

/// Helper: build a manager and run discovery as configured
pub fn load_plugins(config: &PluginConfig) -> Result<PluginManager, AppError> {
    let mut manager = kodex_plugin::PluginManagerBuilder::from_config(config).build();
    let loaded = manager.load_from_config(config)?;
    tracing::debug!(loaded, directory = %config.directory, "Plugins loaded");
    Ok(manager)
}
