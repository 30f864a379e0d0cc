//! Per-call signing and verification options

use crate::types::KeyInput;
use devkit_common::LoggingTransformer;
use std::fmt;

/// Algorithm and key material for producing a signature
#[derive(Clone, Default)]
pub struct SignOptions {
    /// Algorithm name, e.g. `"HS256"`
    pub algorithm: String,
    /// Shared secret for HS* algorithms
    pub secret: Option<String>,
    /// PEM or JWK private key for RS*/ES* algorithms
    pub private_key: Option<KeyInput>,
    /// Written to the header as `kid` on generated tokens
    pub key_id: Option<String>,
}

impl SignOptions {
    /// Options for `algorithm` with no key material yet
    #[must_use]
    pub fn new(algorithm: &str) -> Self {
        Self {
            algorithm: algorithm.to_string(),
            ..Self::default()
        }
    }

    /// Shared secret for HS* algorithms
    #[must_use]
    pub fn with_secret(mut self, secret: &str) -> Self {
        self.secret = Some(secret.to_string());
        self
    }

    /// Private key for RS*/ES* algorithms
    #[must_use]
    pub fn with_private_key(mut self, key: impl Into<KeyInput>) -> Self {
        self.private_key = Some(key.into());
        self
    }

    /// Header `kid`
    #[must_use]
    pub fn with_key_id(mut self, key_id: &str) -> Self {
        self.key_id = Some(key_id.to_string());
        self
    }
}

/// Expected algorithm and key material for checking a signature
#[derive(Clone, Default)]
pub struct VerifyOptions {
    /// Algorithm the token must declare
    pub algorithm: String,
    /// Shared secret for HS* algorithms
    pub secret: Option<String>,
    /// PEM or JWK public key for RS*/ES* algorithms
    pub public_key: Option<KeyInput>,
}

impl VerifyOptions {
    /// Options expecting `algorithm` with no key material yet
    #[must_use]
    pub fn new(algorithm: &str) -> Self {
        Self {
            algorithm: algorithm.to_string(),
            ..Self::default()
        }
    }

    /// Shared secret for HS* algorithms
    #[must_use]
    pub fn with_secret(mut self, secret: &str) -> Self {
        self.secret = Some(secret.to_string());
        self
    }

    /// Public key for RS*/ES* algorithms
    #[must_use]
    pub fn with_public_key(mut self, key: impl Into<KeyInput>) -> Self {
        self.public_key = Some(key.into());
        self
    }
}

fn redacted(secret: Option<&String>) -> Option<String> {
    secret.map(|s| LoggingTransformer::fingerprint(s.as_bytes()))
}

impl fmt::Debug for SignOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignOptions")
            .field("algorithm", &self.algorithm)
            .field("secret", &redacted(self.secret.as_ref()))
            .field("private_key", &self.private_key)
            .field("key_id", &self.key_id)
            .finish()
    }
}

impl fmt::Debug for VerifyOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VerifyOptions")
            .field("algorithm", &self.algorithm)
            .field("secret", &redacted(self.secret.as_ref()))
            .field("public_key", &self.public_key)
            .finish()
    }
}
