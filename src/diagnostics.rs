// ABOUTME: Best-effort conversion of operation results for API callers.
// ABOUTME: Failures are logged via tracing and replaced by empty or false results.

use std::fmt::Display;

/// Collapse an operation result into the value a best-effort caller returns.
///
/// The error is never dropped silently: it is logged at `warn` with the
/// operation name before being replaced.
pub trait BestEffort<T> {
    /// The success value, or `T::default()` on failure.
    fn or_empty(self, operation: &str) -> T
    where
        T: Default;

    /// The success value, or `fallback` on failure.
    fn or_fallback(self, operation: &str, fallback: T) -> T;

    /// Whether the operation succeeded.
    fn succeeded(self, operation: &str) -> bool;
}

impl<T, E: Display> BestEffort<T> for Result<T, E> {
    fn or_empty(self, operation: &str) -> T
    where
        T: Default,
    {
        self.or_fallback(operation, T::default())
    }

    fn or_fallback(self, operation: &str, fallback: T) -> T {
        self.unwrap_or_else(|e| {
            tracing::warn!(operation, "{e}");
            fallback
        })
    }

    fn succeeded(self, operation: &str) -> bool {
        match self {
            Ok(_) => true,
            Err(e) => {
                tracing::warn!(operation, "{e}");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ok_values_pass_through() {
        let ok: Result<Vec<u32>, String> = Ok(vec![1, 2]);
        assert_eq!(ok.or_empty("list"), vec![1, 2]);

        let ok: Result<(), String> = Ok(());
        assert!(ok.succeeded("start"));
    }

    #[test]
    fn errors_become_empty_or_false() {
        let err: Result<Vec<u32>, String> = Err("runtime gone".to_string());
        assert!(err.or_empty("list").is_empty());

        let err: Result<Option<u32>, String> = Err("runtime gone".to_string());
        assert_eq!(err.or_empty("inspect"), None);

        let err: Result<(), String> = Err("runtime gone".to_string());
        assert!(!err.succeeded("stop"));
    }

    #[test]
    fn errors_take_the_given_fallback() {
        let err: Result<serde_json::Value, String> = Err("no such container".to_string());
        assert_eq!(
            err.or_fallback("inspect", serde_json::json!({})),
            serde_json::json!({})
        );

        let ok: Result<serde_json::Value, String> = Ok(serde_json::json!({ "Id": "abc" }));
        assert_eq!(ok.or_fallback("inspect", serde_json::json!({}))["Id"], "abc");
    }
}
