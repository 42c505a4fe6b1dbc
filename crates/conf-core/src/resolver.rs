//! Typed access to a raw configuration mapping
//!
//! The `ConfigResolver` owns the raw key/value mapping produced by a reader
//! and answers typed queries against it. Every key whose value converts is
//! recorded, even when it then fails an options check, so that the consulted configuration can later be exported, with secret
//! and process-local keys redacted by default.
//!
//! Getters take `&mut self` because they update that bookkeeping. Sharing a
//! resolver between threads therefore needs external synchronization.

use std::borrow::Cow;
use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;
use serde_json::Value;

use crate::codec;
use crate::lookup::{ExportOptions, ListLookup, Lookup};
use crate::types::ConfigType;
use crate::uri::UriSpec;
use crate::value::{Dict, RawConfig, display_value, is_falsy};
use crate::{Error, Result};

/// Reserved key holding the default number of base64 decode passes
pub const DECODE_ITERATION_KEY: &str = "_POLYAXON_DECODE_ITERATION";

const DEFAULT_DECODE_ITERATIONS: i64 = 1;

/// Produces a raw configuration mapping from a set of sources.
///
/// Implementations are expected to merge sources in precedence order; the
/// resolver has no opinion on source priority.
pub trait ConfigReader {
    /// A single configuration source (file, environment, mapping, ...)
    type Source;

    /// Error raised when a source cannot be loaded or validated
    type Error: std::error::Error + Send + Sync + 'static;

    /// Read and merge `sources`. `None` means no configuration is present.
    fn read(&self, sources: &[Self::Source]) -> std::result::Result<Option<RawConfig>, Self::Error>;
}

/// Resolves typed values out of a raw configuration mapping
#[derive(Debug, Clone, Default)]
pub struct ConfigResolver {
    params: RawConfig,
    requested_keys: BTreeSet<String>,
    secret_keys: BTreeSet<String>,
    local_keys: BTreeSet<String>,
    decode_iterations: Option<u32>,
}

impl ConfigResolver {
    /// Create a resolver over an already merged mapping
    pub fn new(params: RawConfig) -> Self {
        Self {
            params,
            ..Self::default()
        }
    }

    /// Read `sources` through `reader` and build a resolver from the result.
    ///
    /// Returns `Ok(None)` when the reader finds no configuration at all.
    /// Reader failures are wrapped in [`Error::Reader`].
    pub fn from_sources<R: ConfigReader>(reader: &R, sources: &[R::Source]) -> Result<Option<Self>> {
        let params = reader.read(sources).map_err(Error::reader)?;
        match params {
            Some(params) if !params.is_empty() => {
                tracing::debug!(keys = params.len(), "Loaded configuration");
                Ok(Some(Self::new(params)))
            }
            _ => {
                tracing::debug!("No configuration found");
                Ok(None)
            }
        }
    }

    /// The raw mapping this resolver was built from
    pub fn raw(&self) -> &RawConfig {
        &self.params
    }

    /// Raw keys starting with `term`
    pub fn keys_starting_with(&self, term: &str) -> Vec<&str> {
        self.params
            .keys()
            .filter(|key| key.starts_with(term))
            .map(String::as_str)
            .collect()
    }

    /// Raw keys ending with `term`
    pub fn keys_ending_with(&self, term: &str) -> Vec<&str> {
        self.params
            .keys()
            .filter(|key| key.ends_with(term))
            .map(String::as_str)
            .collect()
    }

    /// Every key resolved so far
    pub fn requested_keys(&self) -> &BTreeSet<String> {
        &self.requested_keys
    }

    /// Resolved keys flagged secret
    pub fn secret_keys(&self) -> &BTreeSet<String> {
        &self.secret_keys
    }

    /// Resolved keys flagged local
    pub fn local_keys(&self) -> &BTreeSet<String> {
        &self.local_keys
    }

    /// Snapshot of the raw values of every requested key.
    ///
    /// Secret and local keys are left out unless `export` asks for them.
    pub fn get_requested_params(&self, export: ExportOptions) -> BTreeMap<String, Value> {
        self.requested_keys
            .iter()
            .filter(|key| export.include_secrets || !self.secret_keys.contains(*key))
            .filter(|key| export.include_locals || !self.local_keys.contains(*key))
            .filter_map(|key| {
                let value = self.params.get(key)?;
                let value = if export.as_strings {
                    Value::String(display_value(value))
                } else {
                    value.clone()
                };
                Some((key.clone(), value))
            })
            .collect()
    }

    /// Resolve `key` as a `T`.
    ///
    /// A string value is converted with [`ConfigType::convert`]; a value that
    /// already has the target shape is returned as-is. Returns `Ok(None)` only
    /// for an absent optional key without a default.
    pub fn get<T: ConfigType>(&mut self, key: &str, lookup: Lookup<T>) -> Result<Option<T>> {
        let Some(raw) = self.params.get(key) else {
            return absent(key, lookup.optional, lookup.default);
        };

        let value = coerce::<T>(key, raw)?;
        self.add_key(key, lookup.secret, lookup.local);
        check_options(key, &value, lookup.options.as_deref())?;
        Ok(Some(value))
    }

    /// Resolve `key` as a list of `T`.
    ///
    /// A string value is decoded as JSON first. When the decoded value is
    /// empty (`[]`, `null`, `""`, `0`, ...) the lookup's default is returned
    /// instead, even for a required key. Options are checked per element.
    pub fn get_list_of<T: ConfigType>(&mut self, key: &str, lookup: ListLookup<T>) -> Result<Option<Vec<T>>> {
        let Some(raw) = self.params.get(key) else {
            return absent(key, lookup.optional, lookup.default);
        };

        let Some(items) = decode_list::<T>(key, raw)? else {
            self.add_key(key, lookup.secret, lookup.local);
            return Ok(lookup.default);
        };

        self.add_key(key, lookup.secret, lookup.local);
        for item in &items {
            check_options(key, item, lookup.options.as_deref())?;
        }
        Ok(Some(items))
    }

    pub fn get_int(&mut self, key: &str, lookup: Lookup<i64>) -> Result<Option<i64>> {
        self.get(key, lookup)
    }

    pub fn get_float(&mut self, key: &str, lookup: Lookup<f64>) -> Result<Option<f64>> {
        self.get(key, lookup)
    }

    pub fn get_boolean(&mut self, key: &str, lookup: Lookup<bool>) -> Result<Option<bool>> {
        self.get(key, lookup)
    }

    pub fn get_string(&mut self, key: &str, lookup: Lookup<String>) -> Result<Option<String>> {
        self.get(key, lookup)
    }

    /// Resolve a JSON object.
    ///
    /// An empty object resolves to the lookup's default.
    pub fn get_dict(&mut self, key: &str, lookup: Lookup<Dict>) -> Result<Option<Dict>> {
        let default = lookup.default.clone();
        match self.get(key, lookup)? {
            Some(map) if map.is_empty() => Ok(default),
            other => Ok(other),
        }
    }

    pub fn get_uri(&mut self, key: &str, lookup: Lookup<UriSpec>) -> Result<Option<UriSpec>> {
        self.get(key, lookup)
    }

    /// Resolve a comma separated list of strings.
    ///
    /// Parts are trimmed and empty parts dropped. Unlike [`get_list_of`],
    /// the value is never JSON-decoded.
    ///
    /// [`get_list_of`]: ConfigResolver::get_list_of
    pub fn get_list(&mut self, key: &str, lookup: ListLookup<String>) -> Result<Option<Vec<String>>> {
        let Some(raw) = self.params.get(key) else {
            return absent(key, lookup.optional, lookup.default);
        };

        let parts = coerce::<Vec<String>>(key, raw)?;
        self.add_key(key, lookup.secret, lookup.local);
        for part in &parts {
            check_options(key, part, lookup.options.as_deref())?;
        }
        Ok(Some(parts))
    }

    pub fn get_int_list(&mut self, key: &str, lookup: ListLookup<i64>) -> Result<Option<Vec<i64>>> {
        self.get_list_of(key, lookup)
    }

    pub fn get_float_list(&mut self, key: &str, lookup: ListLookup<f64>) -> Result<Option<Vec<f64>>> {
        self.get_list_of(key, lookup)
    }

    pub fn get_boolean_list(&mut self, key: &str, lookup: ListLookup<bool>) -> Result<Option<Vec<bool>>> {
        self.get_list_of(key, lookup)
    }

    pub fn get_string_list(&mut self, key: &str, lookup: ListLookup<String>) -> Result<Option<Vec<String>>> {
        self.get_list_of(key, lookup)
    }

    pub fn get_dict_list(&mut self, key: &str, lookup: ListLookup<Dict>) -> Result<Option<Vec<Dict>>> {
        self.get_list_of(key, lookup)
    }

    pub fn get_uri_list(&mut self, key: &str, lookup: ListLookup<UriSpec>) -> Result<Option<Vec<UriSpec>>> {
        self.get_list_of(key, lookup)
    }

    /// Number of decode passes used when `decode` is called without one.
    ///
    /// Read once from [`DECODE_ITERATION_KEY`] (default 1) and cached.
    pub fn decode_iterations(&mut self) -> Result<u32> {
        if let Some(iterations) = self.decode_iterations {
            return Ok(iterations);
        }

        let lookup = Lookup::new().optional().with_default(DEFAULT_DECODE_ITERATIONS);
        let value = self.get_int(DECODE_ITERATION_KEY, lookup)?.unwrap_or(DEFAULT_DECODE_ITERATIONS);
        let iterations = u32::try_from(value).map_err(|_| Error::Conversion {
            key: DECODE_ITERATION_KEY.to_string(),
            value: value.to_string(),
            target: "u32",
        })?;

        tracing::debug!(iterations, "Cached decode iterations");
        self.decode_iterations = Some(iterations);
        Ok(iterations)
    }

    /// Base64-decode `value`, `iterations` times or the configured default.
    ///
    /// An explicit count of 0 falls back to the configured default.
    pub fn decode(&mut self, value: &str, iterations: Option<u32>) -> Result<String> {
        let iterations = match iterations.filter(|&n| n > 0) {
            Some(iterations) => iterations,
            None => self.decode_iterations()?,
        };
        codec::decode(value, iterations)
    }

    /// Base64-encode `value`
    pub fn encode(value: &str) -> String {
        codec::encode(value)
    }

    fn add_key(&mut self, key: &str, secret: bool, local: bool) {
        self.requested_keys.insert(key.to_string());
        if secret {
            self.secret_keys.insert(key.to_string());
        }
        if local {
            self.local_keys.insert(key.to_string());
        }
    }
}

fn absent<T>(key: &str, optional: bool, default: Option<T>) -> Result<Option<T>> {
    if !optional {
        return Err(Error::MissingKey {
            key: key.to_string(),
        });
    }
    Ok(default)
}

/// Convert a raw value into `T`, accepting either a parseable string or a
/// value that already has the target shape.
fn coerce<T: ConfigType>(key: &str, raw: &Value) -> Result<T> {
    match raw {
        Value::String(s) => T::convert(s).map_err(|rejection| rejection.for_value(key, s, T::NAME)),
        other => T::from_native(other).ok_or_else(|| Error::TypeMismatch {
            key: key.to_string(),
            value: display_value(other),
            target: T::NAME,
        }),
    }
}

/// Decode a list value and convert each element.
///
/// `None` means the decoded value is empty.
fn decode_list<T: ConfigType>(key: &str, raw: &Value) -> Result<Option<Vec<T>>> {
    let decoded: Cow<'_, Value> = match raw {
        Value::String(s) => {
            let parsed = serde_json::from_str(s).map_err(|_| Error::Conversion {
                key: key.to_string(),
                value: s.clone(),
                target: "list",
            })?;
            Cow::Owned(parsed)
        }
        Value::Array(_) => Cow::Borrowed(raw),
        other => {
            return Err(Error::TypeMismatch {
                key: key.to_string(),
                value: display_value(other),
                target: "list",
            });
        }
    };

    if is_falsy(&decoded) {
        return Ok(None);
    }

    let Value::Array(elements) = decoded.as_ref() else {
        return Err(Error::Conversion {
            key: key.to_string(),
            value: display_value(raw),
            target: T::NAME,
        });
    };

    elements
        .iter()
        .map(|element| match element {
            Value::String(s) => T::convert(s).map_err(|rejection| rejection.for_element(key, s, T::NAME)),
            other => T::from_native(other).ok_or_else(|| Error::ListElement {
                key: key.to_string(),
                element: display_value(other),
                target: T::NAME,
            }),
        })
        .collect::<Result<Vec<T>>>()
        .map(Some)
}

fn check_options<O: PartialEq + Serialize>(key: &str, value: &O, options: Option<&[O]>) -> Result<()> {
    match options {
        Some(options) if !options.is_empty() && !options.contains(value) => Err(Error::NotAnOption {
            key: key.to_string(),
            value: serde_json::to_value(value)
                .map(|v| display_value(&v))
                .unwrap_or_default(),
        }),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use conf_test_utils::raw_config;
    use serde_json::json;

    fn resolver(value: Value) -> ConfigResolver {
        ConfigResolver::new(raw_config(value))
    }

    #[test]
    fn failed_conversion_does_not_record_the_key() {
        let mut config = resolver(json!({"A": "nope"}));
        assert!(config.get_int("A", Lookup::new()).is_err());
        assert!(config.requested_keys().is_empty());
    }

    #[test]
    fn options_violation_still_records_the_key() {
        let mut config = resolver(json!({"A": "c", "B": "[1, 5]"}));
        let lookup = Lookup::new().with_options(["a".to_string(), "b".to_string()]).secret();
        assert!(matches!(
            config.get_string("A", lookup),
            Err(Error::NotAnOption { .. })
        ));
        assert!(matches!(
            config.get_int_list("B", Lookup::new().with_options([1, 2])),
            Err(Error::NotAnOption { .. })
        ));
        assert!(config.requested_keys().contains("A"));
        assert!(config.requested_keys().contains("B"));
        assert!(config.secret_keys().contains("A"));
    }

    #[test]
    fn zero_iterations_fall_back_to_configured_count() {
        let mut config = resolver(json!({DECODE_ITERATION_KEY: 2}));
        let encoded = codec::encode(&codec::encode("token"));
        assert_eq!(config.decode(&encoded, Some(0)).unwrap(), "token");
    }

    #[test]
    fn empty_options_accept_anything() {
        let mut config = resolver(json!({"A": 3}));
        let lookup = Lookup::new().with_options(Vec::new());
        assert_eq!(config.get_int("A", lookup).unwrap(), Some(3));
    }

    #[test]
    fn empty_decoded_list_returns_default_and_records_key() {
        let mut config = resolver(json!({"A": "[]", "B": "null"}));
        let lookup = Lookup::new().with_default(vec![9]);
        assert_eq!(config.get_int_list("A", lookup).unwrap(), Some(vec![9]));
        assert_eq!(config.get_int_list("B", Lookup::new()).unwrap(), None);
        assert!(config.requested_keys().contains("A"));
        assert!(config.requested_keys().contains("B"));
    }

    #[test]
    fn decoded_non_list_is_rejected() {
        let mut config = resolver(json!({"A": r#"{"a": 1}"#}));
        let err = config.get_int_list("A", Lookup::new()).unwrap_err();
        assert!(matches!(err, Error::Conversion { target: "int", .. }));
    }

    #[test]
    fn decode_iterations_are_cached() {
        let mut config = resolver(json!({DECODE_ITERATION_KEY: "2"}));
        assert_eq!(config.decode_iterations().unwrap(), 2);

        config.params.insert(DECODE_ITERATION_KEY.to_string(), json!(5));
        assert_eq!(config.decode_iterations().unwrap(), 2);
    }

    #[test]
    fn negative_decode_iterations_are_rejected() {
        let mut config = resolver(json!({DECODE_ITERATION_KEY: -1}));
        assert!(config.decode_iterations().is_err());
    }
}
