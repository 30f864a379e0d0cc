//! Provider seam

use crate::algorithms::Algorithm;
use crate::error::JwtResult;
use serde_json::{Map, Value};
use std::sync::Arc;

/// Encoding of the key bytes handed to [`CryptoProvider::import_key`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImportFormat {
    /// Raw secret bytes (HMAC)
    Raw,
    /// PKCS#8 `PrivateKeyInfo` DER
    Pkcs8,
    /// X.509 `SubjectPublicKeyInfo` DER
    Spki,
    /// PKCS#1 `RSAPrivateKey` or `RSAPublicKey` DER
    Pkcs1,
    /// JSON Web Key object
    Jwk,
}

/// What an imported key will be used for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyUsage {
    /// Produce signatures
    Sign,
    /// Check signatures
    Verify,
}

/// Borrowed key material in one of the two shapes providers accept
#[derive(Clone, Copy)]
pub enum KeyData<'a> {
    /// Raw secret or DER bytes
    Bytes(&'a [u8]),
    /// Parsed JWK object
    Jwk(&'a Map<String, Value>),
}

// Key bytes and private JWK members stay out of Debug output
impl std::fmt::Debug for KeyData<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KeyData::Bytes(bytes) => f
                .debug_struct("Bytes")
                .field("len", &bytes.len())
                .finish(),
            KeyData::Jwk(jwk) => f
                .debug_struct("Jwk")
                .field("kty", &jwk.get("kty"))
                .finish_non_exhaustive(),
        }
    }
}

/// Source of key import, signing and verification
///
/// Implementations must be safe to share across tasks; the engine holds one
/// behind an `Arc` and may call it from spawned tokio tasks.
pub trait CryptoProvider: Send + Sync + 'static {
    /// Opaque imported key
    type KeyHandle: Send + Sync;

    /// Turn key material into a handle usable for `usage` under `algorithm`
    ///
    /// # Errors
    /// Returns `JwtError::KeyFormat` when the material cannot be imported.
    fn import_key(
        &self,
        format: ImportFormat,
        key_data: KeyData<'_>,
        algorithm: Algorithm,
        usage: KeyUsage,
    ) -> JwtResult<Self::KeyHandle>;

    /// Sign `data`, returning the raw signature bytes
    ///
    /// # Errors
    /// Returns an error if the handle cannot sign under `algorithm`.
    fn sign(&self, algorithm: Algorithm, key: &Self::KeyHandle, data: &[u8]) -> JwtResult<Vec<u8>>;

    /// Check `signature` over `data`
    ///
    /// A signature that is well-formed but wrong, or one of the wrong length,
    /// is `Ok(false)`, not an error.
    ///
    /// # Errors
    /// Returns an error if the handle cannot verify under `algorithm`.
    fn verify(
        &self,
        algorithm: Algorithm,
        key: &Self::KeyHandle,
        signature: &[u8],
        data: &[u8],
    ) -> JwtResult<bool>;
}

impl<T: CryptoProvider> CryptoProvider for Arc<T> {
    type KeyHandle = T::KeyHandle;

    fn import_key(
        &self,
        format: ImportFormat,
        key_data: KeyData<'_>,
        algorithm: Algorithm,
        usage: KeyUsage,
    ) -> JwtResult<Self::KeyHandle> {
        (**self).import_key(format, key_data, algorithm, usage)
    }

    fn sign(&self, algorithm: Algorithm, key: &Self::KeyHandle, data: &[u8]) -> JwtResult<Vec<u8>> {
        (**self).sign(algorithm, key, data)
    }

    fn verify(
        &self,
        algorithm: Algorithm,
        key: &Self::KeyHandle,
        signature: &[u8],
        data: &[u8],
    ) -> JwtResult<bool> {
        (**self).verify(algorithm, key, signature, data)
    }
}
