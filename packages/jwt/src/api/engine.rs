//! Algorithm dispatch and the top-level token operations
//!
//! [`JwtEngine::sign`] and [`JwtEngine::verify`] route a signing input to the
//! HMAC, RSA or ECDSA path of a [`CryptoProvider`]. [`JwtEngine::generate_token`]
//! and [`JwtEngine::verify_token`] build on them, run on a spawned tokio task
//! when a runtime is active and hand their result back through a oneshot
//! channel.

use super::builder::JwtBuilder;
use super::options::{SignOptions, VerifyOptions};
use super::result::AsyncJwtResult;
use crate::algorithms::{Algorithm, AlgorithmFamily};
use crate::codec::{base64_url_decode_binary, base64_url_encode, encode_parts, parse_token};
use crate::crypto::{CryptoProvider, ImportFormat, KeyData, KeyUsage, RustCryptoProvider};
use crate::error::{JwtError, JwtResult, Operation};
use crate::keys;
use crate::types::{JwtHeader, KeyInput};
use devkit_common::LoggingTransformer;
use serde_json::{Map, Value};
use std::sync::Arc;
use tokio::sync::oneshot;

/// Signs and verifies tokens through a shared crypto provider
///
/// Cloning is cheap; clones share the provider. The engine holds no key
/// material between calls.
pub struct JwtEngine<P: CryptoProvider = RustCryptoProvider> {
    provider: Arc<P>,
}

impl JwtEngine {
    /// Engine on the default RustCrypto provider
    #[must_use]
    pub fn new() -> Self {
        Self::with_provider(RustCryptoProvider)
    }
}

impl Default for JwtEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: CryptoProvider> Clone for JwtEngine<P> {
    fn clone(&self) -> Self {
        Self {
            provider: Arc::clone(&self.provider),
        }
    }
}

impl<P: CryptoProvider> std::fmt::Debug for JwtEngine<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtEngine")
            .field("provider", &std::any::type_name::<P>())
            .finish()
    }
}

impl<P: CryptoProvider> JwtEngine<P> {
    /// Engine on a caller-supplied provider
    #[must_use]
    pub fn with_provider(provider: P) -> Self {
        Self {
            provider: Arc::new(provider),
        }
    }

    /// The provider in use
    #[must_use]
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Builder that signs and verifies through this engine
    #[must_use]
    pub fn builder(&self) -> JwtBuilder<P> {
        JwtBuilder::with_engine(self.clone())
    }

    /// Sign `signing_input` and return the base64url signature segment
    ///
    /// # Errors
    /// - `JwtError::Algorithm` for an unsupported algorithm name
    /// - `JwtError::KeyRequired` when the secret or private key is missing
    /// - `JwtError::KeyFormat` when the key cannot be classified or imported
    pub fn sign(&self, signing_input: &str, options: &SignOptions) -> JwtResult<String> {
        let algorithm: Algorithm = options.algorithm.parse()?;
        let key = self.import(
            algorithm,
            options.secret.as_deref(),
            options.private_key.as_ref(),
            KeyUsage::Sign,
        )?;

        let signature = self
            .provider
            .sign(algorithm, &key, signing_input.as_bytes())
            .inspect_err(|e| LoggingTransformer::log_crypto_error("sign", e))?;
        Ok(base64_url_encode(&signature))
    }

    /// Check a base64url signature segment over `signing_input`
    ///
    /// `Ok(false)` means the signature is well-formed but does not match.
    ///
    /// # Errors
    /// - `JwtError::Algorithm` for an unsupported algorithm name
    /// - `JwtError::KeyRequired` when the secret or public key is missing
    /// - `JwtError::KeyFormat` when the key cannot be classified or imported
    /// - `JwtError::Format` when the signature segment is not base64url
    pub fn verify(
        &self,
        signing_input: &str,
        signature: &str,
        options: &VerifyOptions,
    ) -> JwtResult<bool> {
        let algorithm: Algorithm = options.algorithm.parse()?;
        let key = self.import(
            algorithm,
            options.secret.as_deref(),
            options.public_key.as_ref(),
            KeyUsage::Verify,
        )?;

        let signature = base64_url_decode_binary(signature).map_err(|e| match e {
            JwtError::Format(msg) => JwtError::Format(format!("JWT signature: {msg}")),
            other => other,
        })?;

        let valid = self
            .provider
            .verify(algorithm, &key, &signature, signing_input.as_bytes())
            .inspect_err(|e| LoggingTransformer::log_crypto_error("verify", e))?;
        tracing::debug!(%algorithm, valid, "signature checked");
        Ok(valid)
    }

    /// Serialize, sign and assemble a token on a background task
    ///
    /// The header is `{"alg": <algorithm>, "typ": "JWT"}` plus `kid` when set.
    /// Errors carry the `Failed to generate JWT:` prefix. Outside a tokio
    /// runtime the work runs inline and the result is already settled.
    pub fn generate_token(
        &self,
        payload: Map<String, Value>,
        options: SignOptions,
    ) -> AsyncJwtResult<String> {
        let engine = self.clone();

        dispatch(move || {
            let result = engine
                .generate_now(&payload, &options)
                .map_err(|e| e.during(Operation::Generate));
            LoggingTransformer::log_token_operation("generate", &options.algorithm, result.is_ok());
            result
        })
    }

    /// Decode a token, enforce its declared algorithm and check the signature
    /// on a background task
    ///
    /// Resolves to `Ok(false)` for a wrong signature. Errors carry the
    /// `Failed to verify JWT:` prefix; an algorithm mismatch is
    /// `JwtError::AlgorithmMismatch` underneath it. Outside a tokio runtime
    /// the work runs inline.
    pub fn verify_token(
        &self,
        token: impl Into<String>,
        options: VerifyOptions,
    ) -> AsyncJwtResult<bool> {
        let engine = self.clone();
        let token = token.into();

        dispatch(move || {
            let result = engine
                .verify_now(&token, &options)
                .map_err(|e| e.during(Operation::Verify));
            LoggingTransformer::log_token_operation(
                "verify",
                &options.algorithm,
                matches!(result, Ok(true)),
            );
            result
        })
    }

    pub(crate) fn generate_now(
        &self,
        payload: &Map<String, Value>,
        options: &SignOptions,
    ) -> JwtResult<String> {
        let mut header = JwtHeader::new(&options.algorithm);
        if let Some(kid) = &options.key_id {
            header = header.with_key_id(kid.clone());
        }

        let signing_input = encode_parts(&header, payload)?;
        let signature = self.sign(&signing_input, options)?;
        Ok(format!("{signing_input}.{signature}"))
    }

    pub(crate) fn verify_now(&self, token: &str, options: &VerifyOptions) -> JwtResult<bool> {
        let decoded = parse_token(token)?;

        let declared = decoded.algorithm().unwrap_or("(missing)");
        if declared != options.algorithm {
            tracing::warn!(
                expected = %options.algorithm,
                actual = declared,
                "rejecting token with mismatched algorithm"
            );
            return Err(JwtError::AlgorithmMismatch {
                expected: options.algorithm.clone(),
                actual: declared.to_string(),
            });
        }

        self.verify(decoded.signing_input(), &decoded.signature, options)
    }

    /// Classify and import key material for one call
    fn import(
        &self,
        algorithm: Algorithm,
        secret: Option<&str>,
        key: Option<&KeyInput>,
        usage: KeyUsage,
    ) -> JwtResult<P::KeyHandle> {
        match algorithm.family() {
            AlgorithmFamily::Hmac => {
                let secret = secret.filter(|s| !s.is_empty()).ok_or_else(|| {
                    JwtError::KeyRequired(format!("{algorithm} requires a secret"))
                })?;
                self.provider.import_key(
                    ImportFormat::Raw,
                    KeyData::Bytes(secret.as_bytes()),
                    algorithm,
                    usage,
                )
            }
            AlgorithmFamily::Rsa | AlgorithmFamily::Ecdsa => {
                let kind = match usage {
                    KeyUsage::Sign => "private",
                    KeyUsage::Verify => "public",
                };
                let key = key.filter(|k| !k.is_blank()).ok_or_else(|| {
                    JwtError::KeyRequired(format!("{algorithm} requires a {kind} key"))
                })?;

                let material = keys::classify(key)?;
                let (format, data) = material.prepare(algorithm, usage)?;
                self.provider
                    .import_key(format, data, algorithm, usage)
                    .map_err(|e| match e {
                        JwtError::KeyFormat(_) => e,
                        other => JwtError::KeyFormat(other.to_string()),
                    })
            }
        }
    }
}

/// Run `job` on a spawned task, or inline when no tokio runtime is active
fn dispatch<T, F>(job: F) -> AsyncJwtResult<T>
where
    T: Send + 'static,
    F: FnOnce() -> JwtResult<T> + Send + 'static,
{
    let Ok(runtime) = tokio::runtime::Handle::try_current() else {
        return AsyncJwtResult::ready(job());
    };

    let (tx, rx) = oneshot::channel();
    runtime.spawn(async move {
        tokio::task::yield_now().await;
        let _ = tx.send(job());
    });

    AsyncJwtResult::new(rx)
}
