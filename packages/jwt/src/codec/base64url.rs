//! Base64 URL-safe encoding and decoding (RFC 7515)
//!
//! Encoding never pads. Decoding accepts padded or unpadded input and
//! tolerates non-zero trailing bits, which is how browser `atob` behaves once
//! the URL-safe characters are mapped back.

use crate::error::{JwtError, JwtResult};
use base64::{
    Engine as _, alphabet,
    engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig},
};

const LENIENT: GeneralPurposeConfig = GeneralPurposeConfig::new()
    .with_encode_padding(false)
    .with_decode_padding_mode(DecodePaddingMode::Indifferent)
    .with_decode_allow_trailing_bits(true);

const URL_SAFE_LENIENT: GeneralPurpose = GeneralPurpose::new(&alphabet::URL_SAFE, LENIENT);
const STANDARD_LENIENT: GeneralPurpose = GeneralPurpose::new(&alphabet::STANDARD, LENIENT);

/// Base64 URL-safe encoding without padding
#[inline]
#[must_use]
pub fn base64_url_encode(input: &[u8]) -> String {
    URL_SAFE_LENIENT.encode(input)
}

/// Encode text through its UTF-8 byte sequence
#[inline]
pub(crate) fn base64_url_encode_text(text: &str) -> String {
    base64_url_encode(text.as_bytes())
}

/// Decode a base64url segment to raw bytes (signatures, key coordinates)
///
/// # Errors
/// Returns `JwtError::Format` if the input is not valid base64url.
pub fn base64_url_decode_binary(input: &str) -> JwtResult<Vec<u8>> {
    URL_SAFE_LENIENT
        .decode(input)
        .map_err(|e| JwtError::Format(format!("invalid base64url: {e}")))
}

/// Decode a base64url segment to UTF-8 text
///
/// # Errors
/// Returns `JwtError::Format` if the input is not valid base64url or the
/// decoded bytes are not valid UTF-8.
pub fn base64_url_decode(input: &str) -> JwtResult<String> {
    let bytes = base64_url_decode_binary(input)?;
    String::from_utf8(bytes).map_err(|e| JwtError::Format(format!("invalid UTF-8: {e}")))
}

/// Decode standard-alphabet Base64, as found in PEM bodies
pub(crate) fn base64_decode_standard(input: &str) -> Result<Vec<u8>, base64::DecodeError> {
    STANDARD_LENIENT.decode(input)
}
