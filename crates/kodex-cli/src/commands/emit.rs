//! `kodex emit`: dispatch a hook and print the collected results.

use clap::Args;
use serde_json::Value;

use crate::output;
use kodex_core::error::AppError;
use kodex_plugin::{HookPayload, PluginManager};

/// Arguments for the emit command
#[derive(Debug, Args)]
pub struct EmitArgs {
    /// Hook name
    pub hook: String,

    /// JSON object passed to every handler
    #[arg(long, default_value = "{}")]
    pub payload: String,

    /// Stop at the first failing handler
    #[arg(long)]
    pub fail_fast: bool,
}

/// Execute the emit command
pub fn execute(args: &EmitArgs, manager: &PluginManager) -> Result<(), AppError> {
    let payload = parse_payload(&args.payload)?;
    let results = manager.emit(&args.hook, &payload, args.fail_fast)?;
    output::print_json(&results);
    Ok(())
}

fn parse_payload(raw: &str) -> Result<HookPayload, AppError> {
    match serde_json::from_str::<Value>(raw)? {
        Value::Object(map) => Ok(map),
        other => Err(AppError::validation(format!(
            "Hook payload must be a JSON object, got: {other}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kodex_core::ErrorKind;

    #[test]
    fn test_parse_object_payload() {
        let payload = parse_payload(r#"{"text": "hello"}"#).unwrap();
        assert_eq!(payload["text"], "hello");
    }

    #[test]
    fn test_non_object_payload_rejected() {
        let err = parse_payload("[1, 2]").unwrap_err();
        assert!(err.is(ErrorKind::Validation));
    }

    #[test]
    fn test_malformed_payload_is_serialization_error() {
        let err = parse_payload("{not json").unwrap_err();
        assert!(err.is(ErrorKind::Serialization));
    }
}
