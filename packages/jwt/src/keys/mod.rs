//! Key material classification
//!
//! A key arrives as text or a JSON value. It is classified fresh on every
//! sign/verify call as either PEM (normalized to DER) or JWK (kept as the
//! parsed object), then mapped to the import format the crypto provider
//! expects.

mod jwk;
mod pem;

use crate::algorithms::{Algorithm, AlgorithmFamily};
use crate::crypto::{ImportFormat, KeyData, KeyUsage};
use crate::error::{JwtError, JwtResult};
use crate::types::KeyInput;
use serde_json::{Map, Value};

pub use pem::PemKey;

/// Encoding a key was supplied in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyFormat {
    /// `-----BEGIN ...-----` framed Base64 DER
    Pem,
    /// JSON Web Key object
    Jwk,
}

/// Classified, normalized key material
#[derive(Clone, PartialEq)]
pub enum KeyMaterial {
    /// PEM label and decoded DER body
    Pem(PemKey),
    /// Parsed JWK object
    Jwk(Map<String, Value>),
}

impl KeyMaterial {
    /// Which encoding the key was supplied in
    #[must_use]
    pub fn format(&self) -> KeyFormat {
        match self {
            KeyMaterial::Pem(_) => KeyFormat::Pem,
            KeyMaterial::Jwk(_) => KeyFormat::Jwk,
        }
    }

    /// Import format and data for the provider, after checking that the
    /// material can serve `usage` under `algorithm`
    ///
    /// # Errors
    /// Returns `JwtError::KeyFormat` when the PEM label is unsupported or
    /// does not fit the algorithm/usage, or when a public RSA JWK is supplied
    /// for signing.
    pub fn prepare(
        &self,
        algorithm: Algorithm,
        usage: KeyUsage,
    ) -> JwtResult<(ImportFormat, KeyData<'_>)> {
        match self {
            KeyMaterial::Pem(pem) => {
                let format = pem.import_format(algorithm, usage)?;
                Ok((format, KeyData::Bytes(&pem.der)))
            }
            KeyMaterial::Jwk(jwk) => {
                if usage == KeyUsage::Sign && algorithm.family() == AlgorithmFamily::Rsa {
                    jwk::require_private(jwk)?;
                }
                Ok((ImportFormat::Jwk, KeyData::Jwk(jwk)))
            }
        }
    }
}

impl std::fmt::Debug for KeyMaterial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KeyMaterial::Pem(pem) => f
                .debug_struct("Pem")
                .field("label", &pem.label)
                .field("der_len", &pem.der.len())
                .finish(),
            KeyMaterial::Jwk(jwk) => f
                .debug_struct("Jwk")
                .field("kty", &jwk.get("kty"))
                .finish_non_exhaustive(),
        }
    }
}

/// Detect whether `key` is PEM or JWK and normalize it
///
/// PEM wins when the text carries both a `-----BEGIN` and a `-----END`
/// marker. Otherwise the key must be (or parse to) a JSON object with a
/// `kty` member.
///
/// # Errors
/// Returns `JwtError::KeyFormat` if the key is neither, or if a PEM body is
/// not valid Base64.
pub fn classify(key: &KeyInput) -> JwtResult<KeyMaterial> {
    let material = match key {
        KeyInput::Text(text) if pem::is_pem(text) => KeyMaterial::Pem(pem::parse(text)?),
        _ => jwk::parse(key)
            .map(KeyMaterial::Jwk)
            .ok_or_else(|| JwtError::key_format("key must be PEM or JWK format"))?,
    };

    tracing::debug!(
        format = ?material.format(),
        key = %key.fingerprint(),
        "classified key material"
    );
    Ok(material)
}
