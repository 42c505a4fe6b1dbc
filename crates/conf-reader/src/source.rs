//! Configuration sources and document formats

use std::fmt;
use std::path::{Path, PathBuf};

use conf_core::RawConfig;
use serde_json::Value;

use crate::{Error, Result};

/// Serialization format of a config document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    Json,
    Toml,
    Yaml,
}

impl Format {
    /// Detect the format from a file extension.
    ///
    /// - `.json` -> JSON
    /// - `.toml` -> TOML
    /// - `.yaml`, `.yml` -> YAML
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path.extension().and_then(|ext| ext.to_str()).unwrap_or("");

        match extension.to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "toml" => Ok(Self::Toml),
            "yaml" | "yml" => Ok(Self::Yaml),
            _ => Err(Error::UnsupportedFormat {
                extension: extension.to_string(),
            }),
        }
    }

    /// Parse `content` into a top-level mapping.
    ///
    /// `origin` only feeds error messages.
    pub fn parse(self, content: &str, origin: &str) -> Result<RawConfig> {
        let parse_error = |message: String| Error::Parse {
            origin: origin.to_string(),
            format: self,
            message,
        };

        if self == Self::Yaml && content.trim().is_empty() {
            return Ok(RawConfig::new());
        }

        let document: Value = match self {
            Self::Json => serde_json::from_str(content).map_err(|e| parse_error(e.to_string()))?,
            Self::Toml => toml::from_str(content).map_err(|e| parse_error(e.to_string()))?,
            Self::Yaml => serde_yaml::from_str(content).map_err(|e| parse_error(e.to_string()))?,
        };

        match document {
            Value::Object(map) => Ok(map),
            // A YAML document holding only comments
            Value::Null => Ok(RawConfig::new()),
            other => Err(Error::InvalidDocument {
                origin: origin.to_string(),
                found: kind_of(&other),
            }),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json => write!(f, "JSON"),
            Self::Toml => write!(f, "TOML"),
            Self::Yaml => write!(f, "YAML"),
        }
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "a mapping",
    }
}

/// A single source of raw configuration
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigSource {
    /// An in-memory mapping
    Map(RawConfig),
    /// A JSON, TOML or YAML file, format taken from the extension
    File(PathBuf),
    /// Process environment variables, optionally only those with a prefix
    Env { prefix: Option<String> },
    /// An in-memory document in a known format
    Text { format: Format, content: String },
}

impl ConfigSource {
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self::File(path.into())
    }

    /// Every environment variable
    pub fn env() -> Self {
        Self::Env { prefix: None }
    }

    /// Environment variables whose name starts with `prefix`
    pub fn env_prefixed(prefix: impl Into<String>) -> Self {
        Self::Env {
            prefix: Some(prefix.into()),
        }
    }

    pub fn text(format: Format, content: impl Into<String>) -> Self {
        Self::Text {
            format,
            content: content.into(),
        }
    }
}

impl From<RawConfig> for ConfigSource {
    fn from(map: RawConfig) -> Self {
        Self::Map(map)
    }
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Map(_) => write!(f, "mapping"),
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Env { prefix: None } => write!(f, "environment"),
            Self::Env { prefix: Some(prefix) } => write!(f, "environment ({prefix}*)"),
            Self::Text { format, .. } => write!(f, "inline {format}"),
        }
    }
}
