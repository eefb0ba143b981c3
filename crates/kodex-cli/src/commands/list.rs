//! `kodex list`: manifests of the active plugins.

use serde::Serialize;
use tabled::Tabled;

use crate::output::{self, OutputFormat};
use kodex_core::error::AppError;
use kodex_plugin::{PluginManager, PluginManifest};

/// Table row for a plugin manifest
#[derive(Debug, Serialize, Tabled)]
pub struct ManifestRow {
    /// Plugin name
    #[tabled(rename = "Name")]
    pub name: String,
    /// Plugin version
    #[tabled(rename = "Version")]
    pub version: String,
    /// Comma-joined capabilities, `-` when none
    #[tabled(rename = "Capabilities")]
    pub capabilities: String,
    /// Description
    #[tabled(rename = "Description")]
    pub description: String,
}

impl From<&PluginManifest> for ManifestRow {
    fn from(manifest: &PluginManifest) -> Self {
        let capabilities = if manifest.capabilities.is_empty() {
            "-".to_string()
        } else {
            manifest.capabilities.join(",")
        };

        Self {
            name: manifest.name.clone(),
            version: manifest.version.clone(),
            capabilities,
            description: manifest.description.clone(),
        }
    }
}

/// Execute the list command
pub fn execute(manager: &PluginManager, format: OutputFormat) -> Result<(), AppError> {
    let manifests = manager.list_manifests();

    match format {
        OutputFormat::Json => output::print_json(&manifests),
        OutputFormat::Table => {
            let rows: Vec<ManifestRow> = manifests.iter().map(ManifestRow::from).collect();
            output::print_list(&rows, format);
        }
    }

    Ok(())
}
