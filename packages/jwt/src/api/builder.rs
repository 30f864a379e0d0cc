//! Fluent entry point over [`JwtEngine`]

use super::engine::JwtEngine;
use super::options::{SignOptions, VerifyOptions};
use super::result::AsyncJwtResult;
use crate::codec::decode_token;
use crate::crypto::{CryptoProvider, RustCryptoProvider};
use crate::error::{JwtError, JwtResult, Operation};
use crate::types::{KeyInput, Token};
use serde::Serialize;
use serde_json::Value;

/// Algorithm used when none is set
pub const DEFAULT_ALGORITHM: &str = "HS256";

/// Direct builder entry point
pub struct Jwt;

impl Jwt {
    /// Builder on the default engine
    #[must_use]
    pub fn builder() -> JwtBuilder {
        JwtBuilder::new()
    }
}

/// Collects algorithm and key material, then signs, verifies or decodes
///
/// ```no_run
/// # async fn demo() -> devkit_jwt::JwtResult<()> {
/// use devkit_jwt::Jwt;
/// use serde_json::json;
///
/// let token = Jwt::builder()
///     .with_secret("k1")
///     .sign(&json!({"sub": "1"}))
///     .await?;
/// let valid = Jwt::builder().with_secret("k1").verify(token).await?;
/// assert!(valid);
/// # Ok(())
/// # }
/// ```
pub struct JwtBuilder<P: CryptoProvider = RustCryptoProvider> {
    engine: JwtEngine<P>,
    algorithm: Option<String>,
    secret: Option<String>,
    private_key: Option<KeyInput>,
    public_key: Option<KeyInput>,
    key_id: Option<String>,
}

impl JwtBuilder {
    /// Builder on the default engine, algorithm `HS256`
    #[must_use]
    pub fn new() -> Self {
        Self::with_engine(JwtEngine::new())
    }
}

impl Default for JwtBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: CryptoProvider> JwtBuilder<P> {
    /// Builder over a specific engine
    #[must_use]
    pub fn with_engine(engine: JwtEngine<P>) -> Self {
        Self {
            engine,
            algorithm: None,
            secret: None,
            private_key: None,
            public_key: None,
            key_id: None,
        }
    }

    /// Set the algorithm
    #[inline]
    #[must_use]
    pub fn with_algorithm(mut self, algorithm: &str) -> Self {
        self.algorithm = Some(algorithm.to_string());
        self
    }

    /// Set the shared secret for HS* algorithms
    #[inline]
    #[must_use]
    pub fn with_secret(mut self, secret: &str) -> Self {
        self.secret = Some(secret.to_string());
        self
    }

    /// Set the PEM or JWK private key used by `sign`
    #[inline]
    #[must_use]
    pub fn with_private_key(mut self, key: impl Into<KeyInput>) -> Self {
        self.private_key = Some(key.into());
        self
    }

    /// Set the PEM or JWK public key used by `verify`
    #[inline]
    #[must_use]
    pub fn with_public_key(mut self, key: impl Into<KeyInput>) -> Self {
        self.public_key = Some(key.into());
        self
    }

    /// Set the header `kid` written by `sign`
    #[inline]
    #[must_use]
    pub fn with_key_id(mut self, key_id: &str) -> Self {
        self.key_id = Some(key_id.to_string());
        self
    }

    fn algorithm(&self) -> &str {
        self.algorithm.as_deref().unwrap_or(DEFAULT_ALGORITHM)
    }

    /// Options `sign` will use
    #[must_use]
    pub fn sign_options(&self) -> SignOptions {
        SignOptions {
            algorithm: self.algorithm().to_string(),
            secret: self.secret.clone(),
            private_key: self.private_key.clone(),
            key_id: self.key_id.clone(),
        }
    }

    /// Options `verify` will use
    #[must_use]
    pub fn verify_options(&self) -> VerifyOptions {
        VerifyOptions {
            algorithm: self.algorithm().to_string(),
            secret: self.secret.clone(),
            public_key: self.public_key.clone(),
        }
    }

    /// Sign `claims`, which must serialize to a JSON object
    pub fn sign<C: Serialize + ?Sized>(&self, claims: &C) -> AsyncJwtResult<String> {
        let payload = match serde_json::to_value(claims) {
            Ok(Value::Object(map)) => map,
            Ok(_) => {
                return AsyncJwtResult::ready(Err(JwtError::serialization(
                    "claims must serialize to a JSON object",
                )
                .during(Operation::Generate)));
            }
            Err(e) => {
                return AsyncJwtResult::ready(Err(
                    JwtError::serialization(&e.to_string()).during(Operation::Generate)
                ));
            }
        };
        self.engine.generate_token(payload, self.sign_options())
    }

    /// Verify `token` against the configured algorithm and key
    pub fn verify(&self, token: impl Into<String>) -> AsyncJwtResult<bool> {
        self.engine.verify_token(token, self.verify_options())
    }

    /// Decode without verifying
    ///
    /// # Errors
    /// Same as [`decode_token`].
    pub fn decode(&self, token: &str) -> JwtResult<Token> {
        decode_token(token)
    }
}
