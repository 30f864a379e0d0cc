//! Default provider on the RustCrypto crates

use super::ecdsa::{self as ec, EcSigningKey, EcVerifyingKey};
use super::hmac as hs;
use super::provider::{CryptoProvider, ImportFormat, KeyData, KeyUsage};
use super::rsa as rs;
use crate::algorithms::{Algorithm, AlgorithmFamily};
use crate::error::{JwtError, JwtResult};

/// Pure-Rust provider covering every supported algorithm
#[derive(Debug, Clone, Copy, Default)]
pub struct RustCryptoProvider;

/// Imported key, bound to the algorithm it was imported for
pub struct RustCryptoKey {
    algorithm: Algorithm,
    inner: KeyInner,
}

enum KeyInner {
    Hmac(Vec<u8>),
    RsaPrivate(::rsa::RsaPrivateKey),
    RsaPublic(::rsa::RsaPublicKey),
    EcSigning(EcSigningKey),
    EcVerifying(EcVerifyingKey),
}

impl RustCryptoKey {
    /// Algorithm this key was imported for
    #[must_use]
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Whether the handle can produce signatures
    #[must_use]
    pub fn can_sign(&self) -> bool {
        matches!(
            self.inner,
            KeyInner::Hmac(_) | KeyInner::RsaPrivate(_) | KeyInner::EcSigning(_)
        )
    }

    fn check_algorithm(&self, algorithm: Algorithm) -> JwtResult<()> {
        if self.algorithm == algorithm {
            Ok(())
        } else {
            Err(JwtError::Crypto(format!(
                "key imported for {} cannot be used with {algorithm}",
                self.algorithm
            )))
        }
    }
}

impl std::fmt::Debug for RustCryptoKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RustCryptoKey")
            .field("algorithm", &self.algorithm)
            .field("can_sign", &self.can_sign())
            .finish_non_exhaustive()
    }
}

impl CryptoProvider for RustCryptoProvider {
    type KeyHandle = RustCryptoKey;

    fn import_key(
        &self,
        format: ImportFormat,
        key_data: KeyData<'_>,
        algorithm: Algorithm,
        usage: KeyUsage,
    ) -> JwtResult<RustCryptoKey> {
        let inner = match (algorithm.family(), key_data) {
            (AlgorithmFamily::Hmac, KeyData::Bytes(secret)) if format == ImportFormat::Raw => {
                KeyInner::Hmac(secret.to_vec())
            }
            (AlgorithmFamily::Hmac, _) => {
                return Err(JwtError::key_format("HMAC secrets are imported as raw bytes"));
            }
            (AlgorithmFamily::Rsa, KeyData::Bytes(der)) => match usage {
                KeyUsage::Sign => KeyInner::RsaPrivate(rs::private_key_from_der(format, der)?),
                KeyUsage::Verify => KeyInner::RsaPublic(rs::public_key_from_der(format, der)?),
            },
            (AlgorithmFamily::Rsa, KeyData::Jwk(jwk)) => match usage {
                KeyUsage::Sign => KeyInner::RsaPrivate(rs::private_key_from_jwk(jwk)?),
                KeyUsage::Verify => KeyInner::RsaPublic(rs::public_key_from_jwk(jwk)?),
            },
            (AlgorithmFamily::Ecdsa, KeyData::Bytes(der)) => match usage {
                KeyUsage::Sign => {
                    KeyInner::EcSigning(ec::signing_key_from_der(algorithm, format, der)?)
                }
                KeyUsage::Verify => {
                    KeyInner::EcVerifying(ec::verifying_key_from_der(algorithm, format, der)?)
                }
            },
            (AlgorithmFamily::Ecdsa, KeyData::Jwk(jwk)) => match usage {
                KeyUsage::Sign => KeyInner::EcSigning(ec::signing_key_from_jwk(algorithm, jwk)?),
                KeyUsage::Verify => {
                    KeyInner::EcVerifying(ec::verifying_key_from_jwk(algorithm, jwk)?)
                }
            },
        };

        Ok(RustCryptoKey { algorithm, inner })
    }

    fn sign(&self, algorithm: Algorithm, key: &RustCryptoKey, data: &[u8]) -> JwtResult<Vec<u8>> {
        key.check_algorithm(algorithm)?;
        match &key.inner {
            KeyInner::Hmac(secret) => hs::sign(algorithm.hash_bits(), secret, data),
            KeyInner::RsaPrivate(private) => rs::sign(algorithm.hash_bits(), private, data),
            KeyInner::EcSigning(signing) if signing.algorithm() == algorithm => {
                ec::sign(signing, data)
            }
            _ => Err(JwtError::crypto("key handle cannot sign")),
        }
    }

    fn verify(
        &self,
        algorithm: Algorithm,
        key: &RustCryptoKey,
        signature: &[u8],
        data: &[u8],
    ) -> JwtResult<bool> {
        key.check_algorithm(algorithm)?;
        match &key.inner {
            KeyInner::Hmac(secret) => hs::verify(algorithm.hash_bits(), secret, signature, data),
            KeyInner::RsaPublic(public) => Ok(rs::verify(algorithm.hash_bits(), public, signature, data)),
            KeyInner::EcVerifying(verifying) if verifying.algorithm() == algorithm => {
                Ok(ec::verify(verifying, signature, data))
            }
            _ => Err(JwtError::crypto("key handle cannot verify")),
        }
    }
}
