//! Log sanitization utilities
//!
//! Every request body carries the account password, and record payloads can
//! hold long TXT/TLSA/SSHFP data. Nothing is logged without passing through
//! these helpers first.

use serde_json::Value;

/// Maximum number of bytes to include in truncated log output.
const TRUNCATE_LIMIT: usize = 256;

/// Request keys whose values are never written to logs.
const SECRET_KEYS: &[&str] = &["auth-password"];

/// MSRV-compatible replacement for `str::floor_char_boundary` (stable since 1.91.0).
fn floor_char_boundary(s: &str, index: usize) -> usize {
    if index >= s.len() {
        s.len()
    } else {
        let mut i = index;
        while i > 0 && !s.is_char_boundary(i) {
            i -= 1;
        }
        i
    }
}

/// Truncate a string for safe logging.
///
/// Returns the original string if it's within the limit,
/// otherwise returns the first `TRUNCATE_LIMIT` bytes with a suffix
/// indicating the total length.
pub fn truncate_for_log(s: &str) -> String {
    if s.len() <= TRUNCATE_LIMIT {
        s.to_string()
    } else {
        format!(
            "{}... [truncated, total {} bytes]",
            &s[..floor_char_boundary(s, TRUNCATE_LIMIT)],
            s.len()
        )
    }
}

/// Render a request body for logging with secret values masked.
pub fn redact_credentials(body: &Value) -> String {
    let rendered = match body {
        Value::Object(map) => {
            let mut masked = map.clone();
            for key in SECRET_KEYS {
                if let Some(value) = masked.get_mut(*key) {
                    *value = Value::String("***".to_string());
                }
            }
            Value::Object(masked).to_string()
        }
        other => other.to_string(),
    };
    truncate_for_log(&rendered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn short_string_unchanged() {
        let s = "hello world";
        assert_eq!(truncate_for_log(s), s);
    }

    #[test]
    fn exactly_at_limit() {
        let s = "a".repeat(TRUNCATE_LIMIT);
        assert_eq!(truncate_for_log(&s), s);
    }

    #[test]
    fn over_limit_truncated() {
        let s = "a".repeat(TRUNCATE_LIMIT + 100);
        let result = truncate_for_log(&s);
        assert!(result.contains("... [truncated, total"));
        assert!(result.contains(&format!("{} bytes]", TRUNCATE_LIMIT + 100)));
        assert!(result.len() < s.len());
    }

    #[test]
    fn multibyte_chars_safe() {
        let s = "ж".repeat(200);
        let result = truncate_for_log(&s);
        assert!(result.contains("... [truncated, total"));
    }

    #[test]
    fn password_is_masked() {
        let body = json!({
            "auth-id": 1234,
            "auth-password": "hunter2",
            "domain-name": "example.com",
        });
        let logged = redact_credentials(&body);
        assert!(!logged.contains("hunter2"));
        assert!(logged.contains("\"auth-password\":\"***\""));
        assert!(logged.contains("example.com"));
    }

    #[test]
    fn non_object_body_passes_through() {
        assert_eq!(redact_credentials(&json!([1, 2])), "[1,2]");
    }
}
