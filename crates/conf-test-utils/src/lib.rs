//! Shared test fixtures for the conf-resolver workspace.
//!
//! Import the helpers you need directly:
//!
//! ```rust,ignore
//! use conf_test_utils::{raw_config, ConfigDir};
//! ```

pub mod fixtures;

pub use fixtures::{ConfigDir, raw_config, resolver};
