//! Reading and merging configuration sources
//!
//! Sources are applied in order, later sources overriding earlier ones.
//! Nested mappings are merged key by key; every other value is replaced.

use std::fs;

use conf_core::{ConfigReader, ConfigResolver, RawConfig};
use serde_json::Value;

use crate::source::{ConfigSource, Format};
use crate::{Error, Result};

/// Reads [`ConfigSource`]s into a single raw mapping
#[derive(Debug, Clone, Default)]
pub struct SourceReader {
    skip_missing_files: bool,
}

impl SourceReader {
    /// A reader that fails on missing files
    pub fn new() -> Self {
        Self::default()
    }

    /// Silently skip file sources that do not exist
    pub fn skip_missing_files(mut self) -> Self {
        self.skip_missing_files = true;
        self
    }

    /// Load and merge `sources`.
    ///
    /// Returns `Ok(None)` when the merged mapping is empty.
    pub fn read(&self, sources: &[ConfigSource]) -> Result<Option<RawConfig>> {
        let mut merged = RawConfig::new();

        for source in sources {
            let Some(layer) = self.load(source)? else {
                continue;
            };
            tracing::debug!(%source, keys = layer.len(), "Merging configuration source");
            deep_merge(&mut merged, layer);
        }

        if merged.is_empty() {
            return Ok(None);
        }
        Ok(Some(merged))
    }

    /// Load a single source. `None` means the source was skipped.
    fn load(&self, source: &ConfigSource) -> Result<Option<RawConfig>> {
        match source {
            ConfigSource::Map(map) => Ok(Some(map.clone())),
            ConfigSource::File(path) => {
                if self.skip_missing_files && !path.is_file() {
                    tracing::debug!(?path, "No config file found, skipping");
                    return Ok(None);
                }
                let format = Format::from_path(path)?;
                let content = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
                format.parse(&content, &path.display().to_string()).map(Some)
            }
            ConfigSource::Env { prefix } => Ok(Some(read_env(prefix.as_deref()))),
            ConfigSource::Text { format, content } => format.parse(content, &source.to_string()).map(Some),
        }
    }
}

impl ConfigReader for SourceReader {
    type Source = ConfigSource;
    type Error = Error;

    fn read(&self, sources: &[ConfigSource]) -> Result<Option<RawConfig>> {
        SourceReader::read(self, sources)
    }
}

/// Read `sources` with a default [`SourceReader`] and build a resolver.
///
/// Returns `Ok(None)` when no configuration is present.
pub fn read_configs(sources: &[ConfigSource]) -> conf_core::Result<Option<ConfigResolver>> {
    ConfigResolver::from_sources(&SourceReader::new(), sources)
}

fn read_env(prefix: Option<&str>) -> RawConfig {
    std::env::vars()
        .filter(|(name, _)| prefix.is_none_or(|prefix| name.starts_with(prefix)))
        .map(|(name, value)| (name, Value::String(value)))
        .collect()
}

/// Merge `other` into `base`, with `other` taking precedence.
///
/// When both sides hold a mapping for the same key the mappings are merged
/// recursively; otherwise the value from `other` replaces the base value.
pub fn deep_merge(base: &mut RawConfig, other: RawConfig) {
    for (key, value) in other {
        match value {
            Value::Object(overlay) if matches!(base.get(&key), Some(Value::Object(_))) => {
                if let Some(Value::Object(existing)) = base.get_mut(&key) {
                    deep_merge(existing, overlay);
                }
            }
            value => {
                base.insert(key, value);
            }
        }
    }
}
