//! Application configuration schemas.
//!
//! Configuration is deserialized from TOML files via the `config` crate
//! and overlaid with `KODEX__`-prefixed environment variables. Each
//! sub-module represents a logical configuration section.

pub mod logging;
pub mod plugin;

use std::path::Path;

use serde::{Deserialize, Serialize};

pub use self::logging::LoggingConfig;
pub use self::plugin::{DEFAULT_ENTRY_POINT_GROUP, PluginConfig};

use crate::error::AppError;

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Plugin discovery settings.
    #[serde(default)]
    pub plugins: PluginConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration.
    ///
    /// Sources, later ones winning: `config/default.toml` if present, the
    /// explicit `path` if given (must exist), then environment variables
    /// such as `KODEX__PLUGINS__DIRECTORY`.
    pub fn load(path: Option<&Path>) -> Result<Self, AppError> {
        let mut builder = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false));

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path).required(true));
        }

        let config = builder
            .add_source(
                config::Environment::with_prefix("KODEX")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.plugins.directory, "./plugins");
        assert!(config.plugins.continue_on_error);
        assert_eq!(config.plugins.entry_point_group, DEFAULT_ENTRY_POINT_GROUP);
        assert!(config.plugins.pattern.starts_with("*."));
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
[plugins]
directory = "/opt/kodex/plugins"
continue_on_error = false

[plugins.default_context]
org = "acme"

[logging]
format = "json"
"#
        )
        .unwrap();

        let config = AppConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.plugins.directory, "/opt/kodex/plugins");
        assert!(!config.plugins.continue_on_error);
        assert_eq!(
            config.plugins.default_context.get("org"),
            Some(&serde_json::json!("acme"))
        );
        assert_eq!(config.logging.format, "json");
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let err = AppConfig::load(Some(Path::new("/nonexistent/kodex.toml"))).unwrap_err();
        assert!(err.is(crate::ErrorKind::Configuration));
    }
}
