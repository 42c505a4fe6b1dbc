//! `confctl encode` / `confctl decode`

use conf_core::ConfigResolver;

use crate::error::Result;

pub fn run_encode(value: &str) -> String {
    ConfigResolver::encode(value)
}

/// Decode `value`, using the configured number of passes unless given
pub fn run_decode(config: &mut ConfigResolver, value: &str, iterations: Option<u32>) -> Result<String> {
    Ok(config.decode(value, iterations)?)
}
