//! Three-segment token parsing and serialization

use super::base64url::{base64_url_decode, base64_url_encode_text};
use crate::error::{JwtError, JwtResult, Operation};
use crate::types::Token;
use serde::Serialize;
use serde_json::{Map, Value};

/// Decode a token string into its header, payload and opaque signature
///
/// Surrounding whitespace is ignored. No cryptography happens here; the
/// signature segment is carried through untouched.
///
/// # Errors
/// Returns `JwtError::Failed` (operation `Decode`) wrapping a
/// `JwtError::Format` when the token is empty, does not have three segments,
/// or a header/payload segment is not base64url-encoded JSON object text.
pub fn decode_token(token: &str) -> JwtResult<Token> {
    parse_token(token).map_err(|e| e.during(Operation::Decode))
}

/// Decode without the operation prefix, for reuse inside other operations
pub(crate) fn parse_token(token: &str) -> JwtResult<Token> {
    let token = token.trim();
    if token.is_empty() {
        return Err(JwtError::format("JWT token cannot be empty"));
    }

    let parts: Vec<&str> = token.split('.').collect();
    let &[header_b64, payload_b64, signature] = parts.as_slice() else {
        tracing::debug!(segments = parts.len(), "rejecting token with wrong segment count");
        return Err(JwtError::Format(format!(
            "expected 3 parts, got {}",
            parts.len()
        )));
    };

    let header = decode_segment(header_b64, "header")?;
    let payload = decode_segment(payload_b64, "payload")?;

    Ok(Token {
        header,
        payload,
        signature: signature.to_string(),
        raw: token.to_string(),
    })
}

fn decode_segment(segment: &str, part: &str) -> JwtResult<Map<String, Value>> {
    let text = base64_url_decode(segment).map_err(|e| match e {
        JwtError::Format(msg) => JwtError::Format(format!("JWT {part}: {msg}")),
        other => other,
    })?;

    let value: Value = serde_json::from_str(&text)
        .map_err(|e| JwtError::Format(format!("invalid JSON in JWT {part}: {e}")))?;

    match value {
        Value::Object(map) => Ok(map),
        _ => Err(JwtError::Format(format!(
            "JWT {part} must be a JSON object"
        ))),
    }
}

/// Build the unsigned `header.payload` string
///
/// Both values are serialized to compact JSON and base64url-encoded.
///
/// # Errors
/// Returns `JwtError::Serialization` if either value cannot be serialized.
pub fn encode_parts<H, P>(header: &H, payload: &P) -> JwtResult<String>
where
    H: Serialize + ?Sized,
    P: Serialize + ?Sized,
{
    let header_json =
        serde_json::to_string(header).map_err(|e| JwtError::serialization(&e.to_string()))?;
    let payload_json =
        serde_json::to_string(payload).map_err(|e| JwtError::serialization(&e.to_string()))?;

    let header_b64 = base64_url_encode_text(&header_json);
    let payload_b64 = base64_url_encode_text(&payload_json);

    let mut signing_input = String::with_capacity(header_b64.len() + 1 + payload_b64.len());
    signing_input.push_str(&header_b64);
    signing_input.push('.');
    signing_input.push_str(&payload_b64);
    Ok(signing_input)
}
