//! Lenient decoding
//!
//! The API sends most numbers as strings, some as integers, and leaves fields
//! out when they do not apply. These helpers turn any of those shapes into a
//! canonical value and fall back to the zero value instead of failing, so one
//! odd field never discards a whole listing.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Decode an unsigned integer from a JSON number or a numeric string.
///
/// Absent, `null`, negative, fractional or unparsable values decode to `0`.
pub fn uint(value: Option<&Value>) -> u32 {
    match value {
        Some(Value::Number(n)) => n.as_u64().and_then(|v| u32::try_from(v).ok()).unwrap_or(0),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0),
        _ => 0,
    }
}

/// Decode a float from a JSON number or a numeric string; anything else is `0.0`.
pub fn float(value: Option<&Value>) -> f64 {
    match value {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    }
}

/// Decode a string field. Numbers and booleans are rendered as text,
/// absent or `null` becomes the empty string.
pub fn text(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    }
}

/// Serde adapter for [`text`], for use with `#[serde(default, deserialize_with = ...)]`.
pub fn deserialize_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(text(value.as_ref()))
}

/// Serde adapter for [`uint`].
pub fn deserialize_uint<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(uint(value.as_ref()))
}
