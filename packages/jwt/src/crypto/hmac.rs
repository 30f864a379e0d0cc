//! HMAC-SHA2 (HS256, HS384, HS512)

use crate::algorithms::HashBits;
use crate::error::{JwtError, JwtResult};
use hmac::{Hmac, Mac};
use sha2::{Sha256, Sha384, Sha512};
use subtle::ConstantTimeEq;

type HmacSha256 = Hmac<Sha256>;
type HmacSha384 = Hmac<Sha384>;
type HmacSha512 = Hmac<Sha512>;

macro_rules! hmac_tag {
    ($mac:ty, $secret:expr, $data:expr) => {{
        let mut mac = <$mac>::new_from_slice($secret)
            .map_err(|_| JwtError::key_format("invalid HMAC key"))?;
        mac.update($data);
        mac.finalize().into_bytes().to_vec()
    }};
}

pub(crate) fn sign(hash: HashBits, secret: &[u8], data: &[u8]) -> JwtResult<Vec<u8>> {
    let tag = match hash {
        HashBits::Sha256 => hmac_tag!(HmacSha256, secret, data),
        HashBits::Sha384 => hmac_tag!(HmacSha384, secret, data),
        HashBits::Sha512 => hmac_tag!(HmacSha512, secret, data),
    };
    Ok(tag)
}

/// Recompute and compare in constant time
pub(crate) fn verify(
    hash: HashBits,
    secret: &[u8],
    signature: &[u8],
    data: &[u8],
) -> JwtResult<bool> {
    let expected = sign(hash, secret, data)?;
    Ok(expected.as_slice().ct_eq(signature).into())
}
