//! `kodex scaffold`: write a starter plugin crate.

use std::path::{Path, PathBuf};

use clap::Args;

use crate::output;
use kodex_core::error::AppError;

const CARGO_TEMPLATE: &str = r#"[package]
name = "{{name}}"
version = "0.1.0"
edition = "2024"

[lib]
crate-type = ["cdylib", "rlib"]

[dependencies]
kodex-plugin-sdk = "0.1"
anyhow = "1"
"#;

const LIB_TEMPLATE: &str = r#"//! Scaffolded Kodex plugin.

use kodex_plugin_sdk::prelude::*;

#[derive(Debug)]
pub struct MyPlugin {
    manifest: PluginManifest,
}

impl Plugin for MyPlugin {
    fn manifest(&self) -> &PluginManifest {
        &self.manifest
    }

    fn activate(&self, _context: &PluginContext) -> anyhow::Result<()> {
        Ok(())
    }

    fn handle_hook(&self, hook: &str, payload: &HookPayload) -> anyhow::Result<Option<HookOutput>> {
        if hook != "hook.name" {
            return Ok(None);
        }
        Ok(Some(hook_output!({
            "plugin" => self.manifest.name,
            "payload" => payload,
        })))
    }
}

pub fn create() -> anyhow::Result<Box<dyn Plugin>> {
    Ok(Box::new(MyPlugin {
        manifest: PluginManifest::new("{{name}}", "0.1.0", "Describe what your plugin does.")
            .with_capabilities(["hook.name"]),
    }))
}

declare_plugin!(create);
"#;

/// Arguments for the scaffold command
#[derive(Debug, Args)]
pub struct ScaffoldArgs {
    /// Plugin crate name
    pub name: String,

    /// Directory the crate is created in
    #[arg(short, long, default_value = ".")]
    pub output: PathBuf,
}

/// Execute the scaffold command
pub async fn execute(args: &ScaffoldArgs) -> Result<(), AppError> {
    let crate_dir = scaffold(&args.name, &args.output).await?;
    output::print_success(&format!("Plugin crate written to '{}'", crate_dir.display()));
    Ok(())
}

/// Write `Cargo.toml` and `src/lib.rs` under `<output>/<name>` and return
/// the crate directory. Refuses to overwrite an existing crate.
pub async fn scaffold(name: &str, output: &Path) -> Result<PathBuf, AppError> {
    validate_name(name)?;

    let crate_dir = output.join(name);
    let manifest_path = crate_dir.join("Cargo.toml");
    let lib_path = crate_dir.join("src").join("lib.rs");

    for path in [&manifest_path, &lib_path] {
        if tokio::fs::try_exists(path).await? {
            return Err(AppError::validation(format!(
                "Refusing to overwrite existing plugin: {}",
                path.display()
            )));
        }
    }

    tokio::fs::create_dir_all(crate_dir.join("src")).await?;
    tokio::fs::write(&manifest_path, render(CARGO_TEMPLATE, name)).await?;
    tokio::fs::write(&lib_path, render(LIB_TEMPLATE, name)).await?;

    tracing::info!(name, path = %crate_dir.display(), "Scaffolded plugin crate");
    Ok(crate_dir)
}

fn render(template: &str, name: &str) -> String {
    template.replace("{{name}}", name)
}

fn validate_name(name: &str) -> Result<(), AppError> {
    let valid = name
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic())
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');

    if valid {
        Ok(())
    } else {
        Err(AppError::validation(format!(
            "Invalid plugin name '{name}': use ASCII letters, digits, '-' or '_', starting with a letter"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kodex_core::ErrorKind;

    #[tokio::test]
    async fn test_scaffold_writes_crate() {
        let dir = tempfile::tempdir().unwrap();

        let crate_dir = scaffold("word-counter", dir.path()).await.unwrap();

        assert_eq!(crate_dir, dir.path().join("word-counter"));
        let manifest = std::fs::read_to_string(crate_dir.join("Cargo.toml")).unwrap();
        assert!(manifest.contains(r#"name = "word-counter""#));
        assert!(manifest.contains("cdylib"));

        let lib = std::fs::read_to_string(crate_dir.join("src/lib.rs")).unwrap();
        assert!(lib.contains(r#"PluginManifest::new("word-counter""#));
        assert!(lib.contains("declare_plugin!(create);"));
        assert!(!lib.contains("{{name}}"));
    }

    #[tokio::test]
    async fn test_scaffold_refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        scaffold("enricher", dir.path()).await.unwrap();

        let lib_path = dir.path().join("enricher/src/lib.rs");
        std::fs::write(&lib_path, "// edited").unwrap();

        let err = scaffold("enricher", dir.path()).await.unwrap_err();
        assert!(err.is(ErrorKind::Validation));
        assert!(err.message.contains("Refusing to overwrite"));
        assert_eq!(std::fs::read_to_string(&lib_path).unwrap(), "// edited");
    }

    #[tokio::test]
    async fn test_scaffold_rejects_bad_names() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["", "9lives", "../escape", "has space"] {
            let err = scaffold(name, dir.path()).await.unwrap_err();
            assert!(err.is(ErrorKind::Validation), "accepted {name:?}");
        }
    }
}
