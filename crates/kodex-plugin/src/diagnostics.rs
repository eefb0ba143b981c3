//! Load diagnostics and the doctor report.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Placeholder plugin name used when a candidate never produced a manifest.
pub const UNKNOWN_PLUGIN: &str = "-";

/// Outcome of one discovery attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadStatus {
    /// The plugin was validated, activated and registered.
    Loaded,
    /// The candidate was not a plugin; not a failure.
    Skipped,
    /// Loading the candidate failed.
    Error,
}

impl LoadStatus {
    /// Returns the lowercase status name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Loaded => "loaded",
            Self::Skipped => "skipped",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for LoadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Immutable record of a single loading attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadDiagnostic {
    /// File path, directory, or `entrypoint:<name>`.
    pub source: String,
    /// Plugin name, or `"-"` if unknown.
    pub plugin_name: String,
    /// Attempt outcome.
    pub status: LoadStatus,
    /// Human-readable detail.
    pub message: String,
}

impl LoadDiagnostic {
    /// A successful registration.
    pub fn loaded(source: impl Into<String>, plugin_name: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            plugin_name: plugin_name.into(),
            status: LoadStatus::Loaded,
            message: "ok".to_string(),
        }
    }

    /// A candidate that was passed over.
    pub fn skipped(source: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            plugin_name: UNKNOWN_PLUGIN.to_string(),
            status: LoadStatus::Skipped,
            message: message.into(),
        }
    }

    /// A failed candidate.
    pub fn error(source: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            plugin_name: UNKNOWN_PLUGIN.to_string(),
            status: LoadStatus::Error,
            message: message.into(),
        }
    }
}

/// Troubleshooting summary produced by `PluginManager::doctor_report`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DoctorReport {
    /// Number of active plugins.
    pub plugin_count: usize,
    /// Active plugin names, sorted.
    pub plugin_names: Vec<String>,
    /// Full diagnostics log, oldest first.
    pub diagnostics: Vec<LoadDiagnostic>,
}

impl DoctorReport {
    /// Diagnostics with the given status.
    pub fn with_status(&self, status: LoadStatus) -> impl Iterator<Item = &LoadDiagnostic> {
        self.diagnostics.iter().filter(move |d| d.status == status)
    }

    /// Returns `true` if any attempt failed.
    pub fn has_errors(&self) -> bool {
        self.with_status(LoadStatus::Error).next().is_some()
    }
}
