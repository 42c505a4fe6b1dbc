//! Configuration fixtures: in-memory mappings and on-disk config files.

use std::fs;
use std::path::{Path, PathBuf};

use conf_core::{ConfigResolver, RawConfig};
use serde_json::Value;
use tempfile::TempDir;

/// Build a raw mapping from a `json!` object literal.
///
/// # Panics
/// Panics if `value` is not a JSON object.
pub fn raw_config(value: Value) -> RawConfig {
    match value {
        Value::Object(map) => map,
        other => panic!("raw_config: fixture must be a JSON object, got {other}"),
    }
}

/// Build a resolver over a `json!` object literal.
///
/// # Panics
/// Panics if `value` is not a JSON object.
pub fn resolver(value: Value) -> ConfigResolver {
    ConfigResolver::new(raw_config(value))
}

/// A temporary directory holding config files, removed on drop.
pub struct ConfigDir {
    dir: TempDir,
}

impl ConfigDir {
    /// # Panics
    /// Panics if the temporary directory cannot be created.
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap_or_else(|e| panic!("ConfigDir: failed to create temp dir: {e}"));
        Self { dir }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write `content` to `name` inside the directory and return its path.
    ///
    /// # Panics
    /// Panics if the file cannot be written.
    pub fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .unwrap_or_else(|e| panic!("ConfigDir: failed to create {}: {e}", parent.display()));
        }
        fs::write(&path, content).unwrap_or_else(|e| panic!("ConfigDir: failed to write {}: {e}", path.display()));
        path
    }
}

impl Default for ConfigDir {
    fn default() -> Self {
        Self::new()
    }
}
