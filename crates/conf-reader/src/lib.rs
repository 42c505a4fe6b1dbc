//! Raw configuration reader
//!
//! Loads configuration from in-memory mappings, JSON/TOML/YAML files and
//! environment variables, merges them in order and hands the result to
//! [`conf_core::ConfigResolver`].
//!
//! # Example
//!
//! ```ignore
//! use conf_reader::{ConfigSource, read_configs};
//! use conf_core::Lookup;
//!
//! let sources = [
//!     ConfigSource::file("/etc/polyaxon/config.yaml"),
//!     ConfigSource::env_prefixed("POLYAXON_"),
//! ];
//! if let Some(mut config) = read_configs(&sources)? {
//!     let workers = config.get_int("POLYAXON_WORKERS", Lookup::new().optional().with_default(4))?;
//! }
//! ```

pub mod error;
pub mod reader;
pub mod source;

pub use error::{Error, Result};
pub use reader::{SourceReader, deep_merge, read_configs};
pub use source::{ConfigSource, Format};
