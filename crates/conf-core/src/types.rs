//! Target types for typed lookups
//!
//! Every typed getter is described by a [`ConfigType`]: which already-parsed
//! JSON shapes it accepts as-is, and how to convert a raw string into it.

use serde::Serialize;
use serde_json::Value;

use crate::uri::{UriSpec, parse_uri_spec};
use crate::value::{Dict, display_value};
use crate::Error;

/// Why a raw string was rejected by a converter
#[derive(Debug)]
pub enum Rejection {
    /// The string does not parse as the target type
    Unparseable,
    /// The converter produced its own, more specific error
    Error(Error),
}

impl From<Error> for Rejection {
    fn from(err: Error) -> Self {
        Self::Error(err)
    }
}

impl Rejection {
    /// Turn the rejection of a top-level value into a configuration error
    pub(crate) fn for_value(self, key: &str, value: &str, target: &'static str) -> Error {
        match self {
            Self::Unparseable => Error::Conversion {
                key: key.to_string(),
                value: value.to_string(),
                target,
            },
            Self::Error(err) => err,
        }
    }

    /// Turn the rejection of a list element into a configuration error
    pub(crate) fn for_element(self, key: &str, element: &str, target: &'static str) -> Error {
        match self {
            Self::Unparseable => Error::ListElement {
                key: key.to_string(),
                element: element.to_string(),
                target,
            },
            Self::Error(err) => err,
        }
    }
}

/// A type that configuration values can be resolved into.
pub trait ConfigType: Sized + PartialEq + Serialize {
    /// Name used in error messages
    const NAME: &'static str;

    /// Accept a value that already has the target shape.
    ///
    /// Returns `None` when the value has any other shape. Never called with
    /// a JSON string; strings always go through [`ConfigType::convert`].
    fn from_native(value: &Value) -> Option<Self>;

    /// Parse a raw string into the target type
    fn convert(raw: &str) -> Result<Self, Rejection>;
}

impl ConfigType for i64 {
    const NAME: &'static str = "int";

    fn from_native(value: &Value) -> Option<Self> {
        value.as_i64()
    }

    fn convert(raw: &str) -> Result<Self, Rejection> {
        raw.trim().parse().map_err(|_| Rejection::Unparseable)
    }
}

impl ConfigType for f64 {
    const NAME: &'static str = "float";

    fn from_native(value: &Value) -> Option<Self> {
        value.as_f64()
    }

    fn convert(raw: &str) -> Result<Self, Rejection> {
        raw.trim().parse().map_err(|_| Rejection::Unparseable)
    }
}

impl ConfigType for bool {
    const NAME: &'static str = "bool";

    fn from_native(value: &Value) -> Option<Self> {
        value.as_bool()
    }

    fn convert(raw: &str) -> Result<Self, Rejection> {
        parse_bool(raw).ok_or(Rejection::Unparseable)
    }
}

impl ConfigType for String {
    const NAME: &'static str = "str";

    fn from_native(value: &Value) -> Option<Self> {
        value.as_str().map(str::to_owned)
    }

    fn convert(raw: &str) -> Result<Self, Rejection> {
        Ok(raw.to_string())
    }
}

impl ConfigType for Dict {
    const NAME: &'static str = "dict";

    fn from_native(value: &Value) -> Option<Self> {
        value.as_object().cloned()
    }

    fn convert(raw: &str) -> Result<Self, Rejection> {
        match serde_json::from_str(raw) {
            Ok(Value::Object(map)) => Ok(map),
            _ => Err(Rejection::Unparseable),
        }
    }
}

impl ConfigType for UriSpec {
    const NAME: &'static str = "UriSpec";

    fn from_native(value: &Value) -> Option<Self> {
        if !value.is_object() {
            return None;
        }
        serde_json::from_value(value.clone()).ok()
    }

    fn convert(raw: &str) -> Result<Self, Rejection> {
        Ok(parse_uri_spec(raw)?)
    }
}

/// Comma separated lists, as read by `get_list`.
///
/// A string is split on commas; a native list must hold only strings.
impl ConfigType for Vec<String> {
    const NAME: &'static str = "list";

    /// Any array is accepted; non-string elements are rendered as JSON text.
    fn from_native(value: &Value) -> Option<Self> {
        Some(value.as_array()?.iter().map(display_value).collect())
    }

    fn convert(raw: &str) -> Result<Self, Rejection> {
        Ok(split_comma_list(raw))
    }
}

/// Parse the canonical boolean spellings, case-insensitively.
///
/// `y`, `yes`, `t`, `true`, `on`, `1` are true; `n`, `no`, `f`, `false`,
/// `off`, `0` are false.
pub fn parse_bool(raw: &str) -> Option<bool> {
    match raw.to_lowercase().as_str() {
        "y" | "yes" | "t" | "true" | "on" | "1" => Some(true),
        "n" | "no" | "f" | "false" | "off" | "0" => Some(false),
        _ => None,
    }
}

/// Split a comma separated string, trimming parts and dropping empty ones
pub fn split_comma_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(str::to_owned)
        .collect()
}
