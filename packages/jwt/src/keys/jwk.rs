//! JWK detection

use crate::error::{JwtError, JwtResult};
use crate::types::KeyInput;
use serde_json::{Map, Value};

/// The key as a JSON object with a `kty` member, if it is one
pub(super) fn parse(key: &KeyInput) -> Option<Map<String, Value>> {
    let value = match key {
        KeyInput::Text(text) => serde_json::from_str::<Value>(text).ok()?,
        KeyInput::Json(value) => value.clone(),
    };

    match value {
        Value::Object(map) if map.contains_key("kty") => Some(map),
        _ => None,
    }
}

/// Signing needs the private exponent
pub(super) fn require_private(jwk: &Map<String, Value>) -> JwtResult<()> {
    match jwk.get("d") {
        Some(Value::String(d)) if !d.is_empty() => Ok(()),
        _ => Err(JwtError::key_format(
            "private key required, got public key (missing 'd')",
        )),
    }
}
