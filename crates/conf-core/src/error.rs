//! Error types for conf-core

/// Result type for conf-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// The configuration error raised by every typed getter.
///
/// Each variant names the offending key and, where there is one, the raw
/// value and the type the caller asked for.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A non-optional key is absent from the raw mapping
    #[error("No value was provided for the non optional key `{key}`.")]
    MissingKey { key: String },

    /// The stored value is neither a string nor of the requested shape
    #[error("Value `{value}` (key: `{key}`) has an unexpected shape, expected `{target}`")]
    TypeMismatch {
        key: String,
        value: String,
        target: &'static str,
    },

    /// A string value could not be parsed into the requested type
    #[error("Cannot convert value `{value}` (key: `{key}`) to `{target}`")]
    Conversion {
        key: String,
        value: String,
        target: &'static str,
    },

    /// A single element of a list value could not be converted
    #[error("Cannot convert value `{element}` (found in list key: `{key}`) to `{target}`")]
    ListElement {
        key: String,
        element: String,
        target: &'static str,
    },

    /// The parsed value is not one of the allowed options
    #[error("The value `{value}` provided for key `{key}` is not one of the possible values.")]
    NotAnOption { key: String, value: String },

    /// A uri does not follow `user:pass@host`
    #[error("Received invalid uri_spec `{value}`. {reason}The uri must be in the format `user:pass@host`")]
    InvalidUri { value: String, reason: &'static str },

    /// The reader failed to load or validate its sources
    #[error("Failed to read configuration: {source}")]
    Reader {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Base64 decoding failed
    #[error(transparent)]
    Base64(#[from] base64::DecodeError),

    /// A decoded payload is not valid UTF-8
    #[error(transparent)]
    Utf8(#[from] std::string::FromUtf8Error),
}

impl Error {
    /// Wrap a reader failure
    pub fn reader(source: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self::Reader {
            source: source.into(),
        }
    }

    /// The configuration key this error is about, if any
    pub fn key(&self) -> Option<&str> {
        match self {
            Self::MissingKey { key }
            | Self::TypeMismatch { key, .. }
            | Self::Conversion { key, .. }
            | Self::ListElement { key, .. }
            | Self::NotAnOption { key, .. } => Some(key),
            _ => None,
        }
    }
}
