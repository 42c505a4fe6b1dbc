//! Typed configuration resolution
//!
//! This crate turns an untyped mapping of configuration keys to raw values
//! into strongly typed settings:
//!
//! - **Dual representation**: a value is either a string that still needs
//!   parsing or an already structured JSON value; both are accepted
//! - **Typed getters**: `int`, `float`, `bool`, `str`, `dict`, `UriSpec`,
//!   comma separated lists and JSON lists of each
//! - **Usage bookkeeping**: every resolved key is recorded, with secret and
//!   local keys tracked so exports can redact them
//! - **One error type**: every getter fails with [`Error`], naming the key,
//!   the raw value and the expected type
//!
//! # Example
//!
//! ```
//! use conf_core::{ConfigResolver, ExportOptions, Lookup};
//! use serde_json::json;
//!
//! let raw = json!({"WORKERS": "4", "DB_PASSWORD": "hunter2"});
//! let mut config = ConfigResolver::new(raw.as_object().unwrap().clone());
//!
//! let workers = config.get_int("WORKERS", Lookup::new()).unwrap();
//! assert_eq!(workers, Some(4));
//!
//! let password = config.get_string("DB_PASSWORD", Lookup::new().secret()).unwrap();
//! assert_eq!(password.as_deref(), Some("hunter2"));
//!
//! let exported = config.get_requested_params(ExportOptions::new());
//! assert!(exported.contains_key("WORKERS"));
//! assert!(!exported.contains_key("DB_PASSWORD"));
//! ```

pub mod codec;
pub mod error;
pub mod lookup;
pub mod resolver;
pub mod types;
pub mod uri;
pub mod value;

pub use error::{Error, Result};
pub use lookup::{ExportOptions, ListLookup, Lookup};
pub use resolver::{ConfigReader, ConfigResolver, DECODE_ITERATION_KEY};
pub use types::{ConfigType, Rejection, parse_bool, split_comma_list};
pub use uri::{UriSpec, parse_uri_spec};
pub use value::{Dict, RawConfig, display_value, is_falsy};
