//! Error types for conf-build

/// Result type for conf-build operations
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Configuration could not be resolved
    #[error(transparent)]
    Config(#[from] conf_core::Error),

    /// The configured check interval is not a positive number
    #[error("Invalid build check interval: {value} (must be positive)")]
    InvalidCheckInterval { value: i64 },
}
