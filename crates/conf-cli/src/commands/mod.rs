//! Command implementations for conf-cli

pub mod codec;
pub mod export;
pub mod get;
pub mod keys;

pub use codec::{run_decode, run_encode};
pub use export::run_export;
pub use get::run_get;
pub use keys::run_keys;
