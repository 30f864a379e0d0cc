//! JWT type definitions

use crate::claims::annotate_timestamps;
use devkit_common::LoggingTransformer;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use std::fmt;

/// A decoded token
///
/// `raw` is the verbatim input, kept so verification signs exactly the bytes
/// the issuer signed rather than a re-serialization.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// Decoded header object
    pub header: Map<String, Value>,
    /// Decoded payload object
    pub payload: Map<String, Value>,
    /// Third segment, still base64url-encoded
    pub signature: String,
    /// Original three-segment string
    pub raw: String,
}

impl Token {
    /// Header `alg`, when present and a string
    #[must_use]
    pub fn algorithm(&self) -> Option<&str> {
        self.header.get("alg").and_then(Value::as_str)
    }

    /// Header `typ`, when present and a string
    #[must_use]
    pub fn token_type(&self) -> Option<&str> {
        self.header.get("typ").and_then(Value::as_str)
    }

    /// Header `kid`, when present and a string
    #[must_use]
    pub fn key_id(&self) -> Option<&str> {
        self.header.get("kid").and_then(Value::as_str)
    }

    /// The first two raw segments joined by `.`
    #[must_use]
    pub fn signing_input(&self) -> &str {
        self.raw
            .rsplit_once('.')
            .map_or(self.raw.as_str(), |(input, _)| input)
    }

    /// Payload with `*_human` renderings of the time claims added
    #[must_use]
    pub fn annotated_payload(&self) -> Map<String, Value> {
        annotate_timestamps(&self.payload)
    }

    /// `{header, payload, signature}` document shown after decoding
    #[must_use]
    pub fn summary(&self) -> Value {
        json!({
            "header": self.header,
            "payload": self.payload,
            "signature": self.signature,
        })
    }
}

/// Header written on the encode path
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JwtHeader {
    /// Algorithm used for signing
    pub alg: String,
    /// Token type, `"JWT"` for generated tokens
    pub typ: String,
    /// Key ID hint
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kid: Option<String>,
    /// Any further header parameters
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl JwtHeader {
    /// Header with the given algorithm and `typ: "JWT"`
    #[must_use]
    pub fn new(alg: &str) -> Self {
        Self {
            alg: alg.to_string(),
            typ: "JWT".to_string(),
            kid: None,
            extra: Map::new(),
        }
    }

    /// Set the key ID hint
    #[must_use]
    pub fn with_key_id(mut self, kid: String) -> Self {
        self.kid = Some(kid);
        self
    }
}

/// Caller-supplied key: PEM or JSON text, or an already-parsed JWK object
#[derive(Clone, PartialEq)]
pub enum KeyInput {
    /// PEM text or serialized JWK
    Text(String),
    /// Parsed JSON value, expected to be a JWK object
    Json(Value),
}

impl KeyInput {
    /// Empty text or JSON `null`, treated the same as no key at all
    #[must_use]
    pub fn is_blank(&self) -> bool {
        match self {
            KeyInput::Text(text) => text.trim().is_empty(),
            KeyInput::Json(value) => value.is_null(),
        }
    }

    /// Short digest for log correlation
    pub(crate) fn fingerprint(&self) -> String {
        match self {
            KeyInput::Text(text) => LoggingTransformer::fingerprint(text.as_bytes()),
            KeyInput::Json(value) => LoggingTransformer::fingerprint(value.to_string().as_bytes()),
        }
    }
}

// Key material stays out of Debug output
impl fmt::Debug for KeyInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let variant = match self {
            KeyInput::Text(_) => "Text",
            KeyInput::Json(_) => "Json",
        };
        write!(f, "KeyInput::{variant}({})", self.fingerprint())
    }
}

impl From<String> for KeyInput {
    fn from(text: String) -> Self {
        KeyInput::Text(text)
    }
}

impl From<&str> for KeyInput {
    fn from(text: &str) -> Self {
        KeyInput::Text(text.to_string())
    }
}

impl From<Value> for KeyInput {
    fn from(value: Value) -> Self {
        KeyInput::Json(value)
    }
}

impl From<Map<String, Value>> for KeyInput {
    fn from(map: Map<String, Value>) -> Self {
        KeyInput::Json(Value::Object(map))
    }
}
