//! Raw configuration values
//!
//! A raw value is whatever the reader produced for a key: either a string
//! that still needs parsing, or an already structured JSON value.

use serde_json::{Map, Value};

/// Flat mapping of configuration keys to raw values
pub type RawConfig = Map<String, Value>;

/// A JSON object, the native shape of `dict` values
pub type Dict = Map<String, Value>;

/// Render a raw value as plain text.
///
/// Strings are rendered without quotes; everything else uses its JSON form.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Whether a decoded value counts as empty.
///
/// `null`, `false`, zero, the empty string, the empty list and the empty
/// mapping are all empty.
pub fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
    }
}
