//! Base64 helpers for encoded configuration values

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::Result;

/// Base64-encode the UTF-8 bytes of `value`
pub fn encode(value: &str) -> String {
    STANDARD.encode(value.as_bytes())
}

/// Base64-decode `value` `iterations` times.
///
/// Every intermediate payload must be valid base64 and valid UTF-8.
pub fn decode(value: &str, iterations: u32) -> Result<String> {
    let mut current = value.to_string();
    for _ in 0..iterations {
        let bytes = STANDARD.decode(current.as_bytes())?;
        current = String::from_utf8(bytes)?;
    }
    Ok(current)
}
