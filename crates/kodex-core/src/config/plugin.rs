//! Plugin discovery configuration.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Entry-point group scanned when no other group is configured.
pub const DEFAULT_ENTRY_POINT_GROUP: &str = "kodex.plugins";

/// Plugin discovery and activation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PluginConfig {
    /// Directory containing plugin shared libraries.
    #[serde(default = "default_plugin_directory")]
    pub directory: String,
    /// Glob matched against file names inside `directory`.
    #[serde(default = "default_pattern")]
    pub pattern: String,
    /// Record per-candidate load failures and keep going instead of aborting.
    #[serde(default = "default_true")]
    pub continue_on_error: bool,
    /// Whether to scan the extension catalog after the plugin directory.
    #[serde(default = "default_true")]
    pub load_entry_points: bool,
    /// Extension catalog group to scan.
    #[serde(default = "default_entry_point_group")]
    pub entry_point_group: String,
    /// Values merged into every activation context.
    #[serde(default)]
    pub default_context: Map<String, Value>,
}

impl Default for PluginConfig {
    fn default() -> Self {
        Self {
            directory: default_plugin_directory(),
            pattern: default_pattern(),
            continue_on_error: true,
            load_entry_points: true,
            entry_point_group: default_entry_point_group(),
            default_context: Map::new(),
        }
    }
}

/// Glob matching shared libraries for the current platform, e.g. `*.so`.
pub fn default_pattern() -> String {
    format!("*.{}", std::env::consts::DLL_EXTENSION)
}

fn default_plugin_directory() -> String {
    "./plugins".to_string()
}

fn default_entry_point_group() -> String {
    DEFAULT_ENTRY_POINT_GROUP.to_string()
}

fn default_true() -> bool {
    true
}
