//! `kodex capabilities`: distinct capabilities across active plugins.

use crate::output::{self, OutputFormat};
use kodex_core::error::AppError;
use kodex_plugin::{CapabilityRegistry, PluginManager};

/// Execute the capabilities command
pub fn execute(manager: &PluginManager, format: OutputFormat) -> Result<(), AppError> {
    let registry = CapabilityRegistry::from_manager(manager);
    let capabilities = registry.all_capabilities();

    match format {
        OutputFormat::Json => output::print_json(&capabilities),
        OutputFormat::Table => {
            for capability in &capabilities {
                println!("{}", capability);
            }
        }
    }

    Ok(())
}
