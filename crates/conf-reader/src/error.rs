//! Error types for conf-reader

use std::path::PathBuf;

use crate::source::Format;

/// Result type for conf-reader operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while reading configuration sources
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {format} config from {origin}: {message}")]
    Parse {
        origin: String,
        format: Format,
        message: String,
    },

    #[error("Unsupported config format: {extension}")]
    UnsupportedFormat { extension: String },

    #[error("Config from {origin} must be a mapping at the top level, found {found}")]
    InvalidDocument { origin: String, found: &'static str },
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
