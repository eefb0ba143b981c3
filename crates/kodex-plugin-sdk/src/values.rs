//! Typed accessors for activation contexts and hook payloads.

use serde_json::{Map, Value};

/// Typed getters over `PluginContext` / `HookPayload` / `HookOutput`.
pub trait ValueMapExt {
    /// Gets a string value.
    fn get_str(&self, key: &str) -> Option<&str>;

    /// Gets a string value, falling back to `default` when absent or not a string.
    fn str_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.get_str(key).unwrap_or(default)
    }

    /// Gets an i64 value.
    fn get_i64(&self, key: &str) -> Option<i64>;

    /// Gets a bool value.
    fn get_bool(&self, key: &str) -> Option<bool>;

    /// Renders a value as text: strings verbatim, other values as JSON,
    /// missing keys as the empty string.
    fn text(&self, key: &str) -> String;
}

impl ValueMapExt for Map<String, Value> {
    fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(|v| v.as_str())
    }

    fn get_i64(&self, key: &str) -> Option<i64> {
        self.get(key).and_then(|v| v.as_i64())
    }

    fn get_bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(|v| v.as_bool())
    }

    fn text(&self, key: &str) -> String {
        match self.get(key) {
            None => String::new(),
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn map(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_typed_getters() {
        let m = map(json!({"org": "acme", "retries": 3, "dry_run": true}));
        assert_eq!(m.get_str("org"), Some("acme"));
        assert_eq!(m.get_str("retries"), None);
        assert_eq!(m.get_i64("retries"), Some(3));
        assert_eq!(m.get_bool("dry_run"), Some(true));
        assert_eq!(m.str_or("missing", "default-org"), "default-org");
    }

    #[test]
    fn test_text_rendering() {
        let m = map(json!({"text": "hello", "n": 5, "none": null}));
        assert_eq!(m.text("text"), "hello");
        assert_eq!(m.text("n"), "5");
        assert_eq!(m.text("none"), "null");
        assert_eq!(m.text("absent"), "");
    }
}
