//! RSASSA-PKCS1-v1_5 (RS256, RS384, RS512)

use super::provider::ImportFormat;
use crate::algorithms::HashBits;
use crate::codec::base64_url_decode_binary;
use crate::error::{JwtError, JwtResult};
use rsa::pkcs1::{DecodeRsaPrivateKey, DecodeRsaPublicKey};
use rsa::pkcs1v15::{Signature, SigningKey, VerifyingKey};
use rsa::pkcs8::{DecodePrivateKey, DecodePublicKey};
use rsa::sha2::{Sha256, Sha384, Sha512};
use rsa::signature::{SignatureEncoding, Signer, Verifier};
use rsa::{BigUint, RsaPrivateKey, RsaPublicKey};
use serde_json::{Map, Value};

pub(crate) fn private_key_from_der(format: ImportFormat, der: &[u8]) -> JwtResult<RsaPrivateKey> {
    match format {
        ImportFormat::Pkcs8 => RsaPrivateKey::from_pkcs8_der(der)
            .map_err(|e| JwtError::KeyFormat(format!("invalid PKCS#8 RSA private key: {e}"))),
        ImportFormat::Pkcs1 => RsaPrivateKey::from_pkcs1_der(der)
            .map_err(|e| JwtError::KeyFormat(format!("invalid PKCS#1 RSA private key: {e}"))),
        other => Err(JwtError::KeyFormat(format!(
            "RSA private key cannot be imported from {other:?}"
        ))),
    }
}

pub(crate) fn public_key_from_der(format: ImportFormat, der: &[u8]) -> JwtResult<RsaPublicKey> {
    match format {
        ImportFormat::Spki => RsaPublicKey::from_public_key_der(der)
            .map_err(|e| JwtError::KeyFormat(format!("invalid RSA public key: {e}"))),
        ImportFormat::Pkcs1 => RsaPublicKey::from_pkcs1_der(der)
            .map_err(|e| JwtError::KeyFormat(format!("invalid PKCS#1 RSA public key: {e}"))),
        other => Err(JwtError::KeyFormat(format!(
            "RSA public key cannot be imported from {other:?}"
        ))),
    }
}

/// Private key from `n`, `e`, `d` and, when present, the primes `p` and `q`
pub(crate) fn private_key_from_jwk(jwk: &Map<String, Value>) -> JwtResult<RsaPrivateKey> {
    require_rsa_kty(jwk)?;
    let n = jwk_integer(jwk, "n")?;
    let e = jwk_integer(jwk, "e")?;
    let d = jwk_integer(jwk, "d")?;

    let primes = match (jwk.contains_key("p"), jwk.contains_key("q")) {
        (true, true) => vec![jwk_integer(jwk, "p")?, jwk_integer(jwk, "q")?],
        _ => Vec::new(),
    };

    RsaPrivateKey::from_components(n, e, d, primes)
        .map_err(|e| JwtError::KeyFormat(format!("invalid RSA JWK: {e}")))
}

pub(crate) fn public_key_from_jwk(jwk: &Map<String, Value>) -> JwtResult<RsaPublicKey> {
    require_rsa_kty(jwk)?;
    let n = jwk_integer(jwk, "n")?;
    let e = jwk_integer(jwk, "e")?;

    RsaPublicKey::new(n, e).map_err(|e| JwtError::KeyFormat(format!("invalid RSA JWK: {e}")))
}

pub(crate) fn sign(hash: HashBits, key: &RsaPrivateKey, data: &[u8]) -> JwtResult<Vec<u8>> {
    let signature = match hash {
        HashBits::Sha256 => SigningKey::<Sha256>::new(key.clone()).try_sign(data),
        HashBits::Sha384 => SigningKey::<Sha384>::new(key.clone()).try_sign(data),
        HashBits::Sha512 => SigningKey::<Sha512>::new(key.clone()).try_sign(data),
    }
    .map_err(|e| JwtError::Crypto(format!("RSA signing failed: {e}")))?;

    Ok(signature.to_vec())
}

/// A signature of the wrong length for the modulus is simply invalid
pub(crate) fn verify(hash: HashBits, key: &RsaPublicKey, signature: &[u8], data: &[u8]) -> bool {
    let Ok(signature) = Signature::try_from(signature) else {
        return false;
    };

    match hash {
        HashBits::Sha256 => VerifyingKey::<Sha256>::new(key.clone()).verify(data, &signature),
        HashBits::Sha384 => VerifyingKey::<Sha384>::new(key.clone()).verify(data, &signature),
        HashBits::Sha512 => VerifyingKey::<Sha512>::new(key.clone()).verify(data, &signature),
    }
    .is_ok()
}

fn require_rsa_kty(jwk: &Map<String, Value>) -> JwtResult<()> {
    match jwk.get("kty").and_then(Value::as_str) {
        Some("RSA") => Ok(()),
        other => Err(JwtError::KeyFormat(format!(
            "expected JWK kty 'RSA', got {}",
            other.unwrap_or("nothing")
        ))),
    }
}

fn jwk_integer(jwk: &Map<String, Value>, member: &str) -> JwtResult<BigUint> {
    let encoded = jwk
        .get(member)
        .and_then(Value::as_str)
        .ok_or_else(|| JwtError::KeyFormat(format!("RSA JWK is missing '{member}'")))?;
    let bytes = base64_url_decode_binary(encoded)
        .map_err(|_| JwtError::KeyFormat(format!("RSA JWK '{member}' is not base64url")))?;
    Ok(BigUint::from_bytes_be(&bytes))
}
