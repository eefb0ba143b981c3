//! `kodex doctor`: loader diagnostics for troubleshooting.

use crate::output;
use kodex_core::error::AppError;
use kodex_plugin::{LoadStatus, PluginManager};

/// Execute the doctor command
pub fn execute(manager: &PluginManager) -> Result<(), AppError> {
    let report = manager.doctor_report();

    for diagnostic in report.with_status(LoadStatus::Error) {
        tracing::warn!(
            source = %diagnostic.source,
            message = %diagnostic.message,
            "Plugin failed to load"
        );
    }

    output::print_json(&report);
    Ok(())
}
