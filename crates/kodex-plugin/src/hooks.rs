//! Hook dispatch results.

use serde::Serialize;

use crate::traits::HookOutput;

/// One entry of the sequence returned by `PluginManager::emit`.
///
/// Serializes untagged: an output is the plugin's own mapping, a failure is
/// `{"plugin": ..., "error": ..., "hook": ...}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum HookResponse {
    /// Data a plugin returned.
    Output(HookOutput),
    /// A handler that failed while errors were being collected.
    Failed {
        /// Name of the failing plugin.
        plugin: String,
        /// Failure text.
        error: String,
        /// Hook being dispatched.
        hook: String,
    },
}

impl HookResponse {
    /// Returns `true` for captured failures.
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }

    /// The returned mapping, if this is an output.
    pub fn output(&self) -> Option<&HookOutput> {
        match self {
            Self::Output(output) => Some(output),
            Self::Failed { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_failure_shape() {
        let failed = HookResponse::Failed {
            plugin: "x".to_string(),
            error: "hook failed".to_string(),
            hook: "anything".to_string(),
        };
        assert!(failed.is_failure());
        assert!(failed.output().is_none());
        assert_eq!(
            serde_json::to_value(&failed).unwrap(),
            json!({"plugin": "x", "error": "hook failed", "hook": "anything"})
        );
    }

    #[test]
    fn test_output_is_transparent() {
        let mut map = HookOutput::new();
        map.insert("plugin".to_string(), json!("context-enricher"));
        let output = HookResponse::Output(map);
        assert_eq!(
            serde_json::to_value(&output).unwrap(),
            json!({"plugin": "context-enricher"})
        );
    }
}
