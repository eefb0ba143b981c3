//! Plugin manifest, the metadata a plugin declares about itself.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use kodex_core::error::AppError;

/// Metadata that describes a plugin and the capabilities it provides.
///
/// Manifests are values: [`PluginManifest::normalized`] returns a new
/// manifest and never touches the receiver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginManifest {
    /// Unique plugin name.
    pub name: String,
    /// Plugin version string.
    pub version: String,
    /// Human-readable description.
    pub description: String,
    /// Capability strings, e.g. `"prompt.preprocess"`.
    #[serde(default)]
    pub capabilities: Vec<String>,
}

impl PluginManifest {
    /// Creates a manifest with no capabilities.
    pub fn new(
        name: impl Into<String>,
        version: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            description: description.into(),
            capabilities: Vec::new(),
        }
    }

    /// Replaces the declared capabilities.
    pub fn with_capabilities<I, S>(mut self, capabilities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.capabilities = capabilities.into_iter().map(Into::into).collect();
        self
    }

    /// Returns a copy with trimmed fields and a sorted, de-duplicated
    /// capability list without blank entries.
    pub fn normalized(&self) -> Self {
        let capabilities: BTreeSet<String> = self
            .capabilities
            .iter()
            .map(|c| c.trim())
            .filter(|c| !c.is_empty())
            .map(str::to_string)
            .collect();

        Self {
            name: self.name.trim().to_string(),
            version: self.version.trim().to_string(),
            description: self.description.trim().to_string(),
            capabilities: capabilities.into_iter().collect(),
        }
    }

    /// Checks that name, version and description are present, in that order.
    ///
    /// Only the first violation is reported.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.name.trim().is_empty() {
            return Err(AppError::validation("Plugin manifest name must be non-empty"));
        }
        if self.version.trim().is_empty() {
            return Err(AppError::validation(format!(
                "Plugin '{}' must define a version",
                self.name
            )));
        }
        if self.description.trim().is_empty() {
            return Err(AppError::validation(format!(
                "Plugin '{}' must define a description",
                self.name
            )));
        }
        Ok(())
    }

    /// Returns whether the manifest declares `capability` (exact match).
    pub fn has_capability(&self, capability: &str) -> bool {
        self.capabilities.iter().any(|c| c == capability)
    }
}
