//! Field deserializers that treat wrongly typed JSON values as absent.
//!
//! A disabled request may carry anything in its other fields; those values are
//! discarded during normalization, so they must not fail deserialization first.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Keeps JSON strings, drops everything else.
pub fn string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(value) => Some(value),
        _ => None,
    })
}

/// Keeps JSON strings and numbers (rendered as text), drops everything else.
pub fn identifier<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(value) => Some(value),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    })
}

/// Keeps JSON booleans, drops everything else.
pub fn flag<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Bool(value) => Some(value),
        _ => None,
    })
}
