//! Panic containment for calls into plugin code.
//!
//! `catch_unwind` only catches panics raised by the same copy of the Rust
//! runtime. The host wraps every call into a plugin; plugins exported with
//! `declare_plugin!` also wrap their own entry points, because a shared
//! library carries its own runtime and the host cannot catch its panics.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use anyhow::anyhow;

/// Runs `f`, turning a panic into an ordinary error.
pub fn guarded<T>(f: impl FnOnce() -> anyhow::Result<T>) -> anyhow::Result<T> {
    match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(result) => result,
        Err(payload) => Err(anyhow!("plugin panicked: {}", panic_message(payload.as_ref()))),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_passes_results_through() {
        assert_eq!(guarded(|| Ok(7)).unwrap(), 7);
        let err = guarded::<()>(|| Err(anyhow!("boom"))).unwrap_err();
        assert_eq!(err.to_string(), "boom");
    }

    #[test]
    fn test_catches_panics() {
        let err = guarded::<()>(|| panic!("exploded {}", 42)).unwrap_err();
        assert_eq!(err.to_string(), "plugin panicked: exploded 42");
    }
}
