//! ECDSA over the NIST curves (ES256 on P-256, ES384 on P-384, ES512 on P-521)
//!
//! Signatures are the fixed-width `r || s` concatenation JWS requires, not DER.

use super::provider::ImportFormat;
use crate::algorithms::Algorithm;
use crate::codec::base64_url_decode_binary;
use crate::error::{JwtError, JwtResult};
use p256::ecdsa::signature::{Signer, Verifier};
use p256::elliptic_curve::sec1::ToEncodedPoint;
use p256::pkcs8::{DecodePrivateKey, DecodePublicKey};
use serde_json::{Map, Value};

pub(crate) enum EcSigningKey {
    P256(p256::ecdsa::SigningKey),
    P384(p384::ecdsa::SigningKey),
    P521(p521::ecdsa::SigningKey),
}

pub(crate) enum EcVerifyingKey {
    P256(p256::ecdsa::VerifyingKey),
    P384(p384::ecdsa::VerifyingKey),
    P521(p521::ecdsa::VerifyingKey),
}

impl EcSigningKey {
    pub(crate) fn algorithm(&self) -> Algorithm {
        match self {
            EcSigningKey::P256(_) => Algorithm::ES256,
            EcSigningKey::P384(_) => Algorithm::ES384,
            EcSigningKey::P521(_) => Algorithm::ES512,
        }
    }
}

impl EcVerifyingKey {
    pub(crate) fn algorithm(&self) -> Algorithm {
        match self {
            EcVerifyingKey::P256(_) => Algorithm::ES256,
            EcVerifyingKey::P384(_) => Algorithm::ES384,
            EcVerifyingKey::P521(_) => Algorithm::ES512,
        }
    }
}

macro_rules! signing_key_from_scalar {
    ($curve:ident, $variant:ident, $scalar:expr) => {
        $curve::ecdsa::SigningKey::from_slice($scalar)
            .map(EcSigningKey::$variant)
            .map_err(|e| {
                JwtError::KeyFormat(format!("invalid {} private scalar: {e}", stringify!($variant)))
            })
    };
}

macro_rules! verifying_key_from_sec1 {
    ($curve:ident, $variant:ident, $point:expr) => {
        $curve::ecdsa::VerifyingKey::from_sec1_bytes($point)
            .map(EcVerifyingKey::$variant)
            .map_err(|e| {
                JwtError::KeyFormat(format!("invalid {} public point: {e}", stringify!($variant)))
            })
    };
}

macro_rules! secret_from_pkcs8 {
    ($curve:ident, $der:expr) => {
        $curve::SecretKey::from_pkcs8_der($der)
            .map_err(|e| JwtError::KeyFormat(format!("invalid PKCS#8 EC private key: {e}")))?
    };
}

macro_rules! public_from_spki {
    ($curve:ident, $der:expr) => {
        $curve::PublicKey::from_public_key_der($der)
            .map_err(|e| JwtError::KeyFormat(format!("invalid EC public key: {e}")))?
    };
}

pub(crate) fn signing_key_from_der(
    algorithm: Algorithm,
    format: ImportFormat,
    der: &[u8],
) -> JwtResult<EcSigningKey> {
    if format != ImportFormat::Pkcs8 {
        return Err(JwtError::KeyFormat(format!(
            "EC private key cannot be imported from {format:?}"
        )));
    }

    match algorithm {
        Algorithm::ES256 => {
            let secret = secret_from_pkcs8!(p256, der);
            signing_key_from_scalar!(p256, P256, &secret.to_bytes())
        }
        Algorithm::ES384 => {
            let secret = secret_from_pkcs8!(p384, der);
            signing_key_from_scalar!(p384, P384, &secret.to_bytes())
        }
        Algorithm::ES512 => {
            let secret = secret_from_pkcs8!(p521, der);
            signing_key_from_scalar!(p521, P521, &secret.to_bytes())
        }
        other => Err(not_ecdsa(other)),
    }
}

pub(crate) fn verifying_key_from_der(
    algorithm: Algorithm,
    format: ImportFormat,
    der: &[u8],
) -> JwtResult<EcVerifyingKey> {
    if format != ImportFormat::Spki {
        return Err(JwtError::KeyFormat(format!(
            "EC public key cannot be imported from {format:?}"
        )));
    }

    match algorithm {
        Algorithm::ES256 => {
            let public = public_from_spki!(p256, der);
            verifying_key_from_sec1!(p256, P256, public.to_encoded_point(false).as_bytes())
        }
        Algorithm::ES384 => {
            let public = public_from_spki!(p384, der);
            verifying_key_from_sec1!(p384, P384, public.to_encoded_point(false).as_bytes())
        }
        Algorithm::ES512 => {
            let public = public_from_spki!(p521, der);
            verifying_key_from_sec1!(p521, P521, public.to_encoded_point(false).as_bytes())
        }
        other => Err(not_ecdsa(other)),
    }
}

/// Signing key from the JWK private scalar `d`
pub(crate) fn signing_key_from_jwk(
    algorithm: Algorithm,
    jwk: &Map<String, Value>,
) -> JwtResult<EcSigningKey> {
    let size = check_curve(algorithm, jwk)?;
    let d = jwk_coordinate(jwk, "d", size)?;

    match algorithm {
        Algorithm::ES256 => signing_key_from_scalar!(p256, P256, &d),
        Algorithm::ES384 => signing_key_from_scalar!(p384, P384, &d),
        Algorithm::ES512 => signing_key_from_scalar!(p521, P521, &d),
        other => Err(not_ecdsa(other)),
    }
}

/// Verifying key from the JWK affine coordinates `x` and `y`
pub(crate) fn verifying_key_from_jwk(
    algorithm: Algorithm,
    jwk: &Map<String, Value>,
) -> JwtResult<EcVerifyingKey> {
    let size = check_curve(algorithm, jwk)?;
    let x = jwk_coordinate(jwk, "x", size)?;
    let y = jwk_coordinate(jwk, "y", size)?;

    let mut point = Vec::with_capacity(1 + 2 * size);
    point.push(0x04);
    point.extend_from_slice(&x);
    point.extend_from_slice(&y);

    match algorithm {
        Algorithm::ES256 => verifying_key_from_sec1!(p256, P256, &point),
        Algorithm::ES384 => verifying_key_from_sec1!(p384, P384, &point),
        Algorithm::ES512 => verifying_key_from_sec1!(p521, P521, &point),
        other => Err(not_ecdsa(other)),
    }
}

pub(crate) fn sign(key: &EcSigningKey, data: &[u8]) -> JwtResult<Vec<u8>> {
    let signature = match key {
        EcSigningKey::P256(key) => Signer::<p256::ecdsa::Signature>::try_sign(key, data)
            .map(|sig| sig.to_bytes().to_vec()),
        EcSigningKey::P384(key) => Signer::<p384::ecdsa::Signature>::try_sign(key, data)
            .map(|sig| sig.to_bytes().to_vec()),
        EcSigningKey::P521(key) => Signer::<p521::ecdsa::Signature>::try_sign(key, data)
            .map(|sig| sig.to_bytes().to_vec()),
    };
    signature.map_err(|e| JwtError::Crypto(format!("ECDSA signing failed: {e}")))
}

/// Wrong-length or out-of-range `r || s` is simply invalid
pub(crate) fn verify(key: &EcVerifyingKey, signature: &[u8], data: &[u8]) -> bool {
    match key {
        EcVerifyingKey::P256(key) => p256::ecdsa::Signature::from_slice(signature)
            .is_ok_and(|sig| key.verify(data, &sig).is_ok()),
        EcVerifyingKey::P384(key) => p384::ecdsa::Signature::from_slice(signature)
            .is_ok_and(|sig| key.verify(data, &sig).is_ok()),
        EcVerifyingKey::P521(key) => p521::ecdsa::Signature::from_slice(signature)
            .is_ok_and(|sig| key.verify(data, &sig).is_ok()),
    }
}

/// Checks `kty`/`crv` and returns the coordinate width in bytes
fn check_curve(algorithm: Algorithm, jwk: &Map<String, Value>) -> JwtResult<usize> {
    let (expected, size) = match algorithm {
        Algorithm::ES256 => ("P-256", 32),
        Algorithm::ES384 => ("P-384", 48),
        Algorithm::ES512 => ("P-521", 66),
        other => return Err(not_ecdsa(other)),
    };

    if jwk.get("kty").and_then(Value::as_str) != Some("EC") {
        return Err(JwtError::key_format("expected JWK kty 'EC'"));
    }
    match jwk.get("crv").and_then(Value::as_str) {
        Some(crv) if crv == expected => Ok(size),
        Some(crv) => Err(JwtError::KeyFormat(format!(
            "{algorithm} requires curve {expected}, got {crv}"
        ))),
        None => Err(JwtError::key_format("EC JWK is missing 'crv'")),
    }
}

/// Left-pads a big-endian coordinate to the curve width
fn jwk_coordinate(jwk: &Map<String, Value>, member: &str, size: usize) -> JwtResult<Vec<u8>> {
    let encoded = jwk
        .get(member)
        .and_then(Value::as_str)
        .ok_or_else(|| JwtError::KeyFormat(format!("EC JWK is missing '{member}'")))?;
    let bytes = base64_url_decode_binary(encoded)
        .map_err(|_| JwtError::KeyFormat(format!("EC JWK '{member}' is not base64url")))?;
    if bytes.len() > size {
        return Err(JwtError::KeyFormat(format!(
            "EC JWK '{member}' is longer than {size} bytes"
        )));
    }

    let mut padded = vec![0u8; size - bytes.len()];
    padded.extend_from_slice(&bytes);
    Ok(padded)
}

fn not_ecdsa(algorithm: Algorithm) -> JwtError {
    JwtError::Crypto(format!("{algorithm} is not an ECDSA algorithm"))
}
