//! PEM framing

use crate::algorithms::{Algorithm, AlgorithmFamily};
use crate::codec::base64_decode_standard;
use crate::crypto::{ImportFormat, KeyUsage};
use crate::error::{JwtError, JwtResult};

const BEGIN_MARKER: &str = "-----BEGIN";
const END_MARKER: &str = "-----END";
const DASHES: &str = "-----";

/// Decoded PEM block
#[derive(Clone, PartialEq, Eq)]
pub struct PemKey {
    /// Text between `-----BEGIN ` and the closing dashes, e.g. `PRIVATE KEY`
    pub label: String,
    /// Base64-decoded body
    pub der: Vec<u8>,
}

impl PemKey {
    /// Provider import format selected by the label
    pub(crate) fn import_format(
        &self,
        algorithm: Algorithm,
        usage: KeyUsage,
    ) -> JwtResult<ImportFormat> {
        let (format, private) = match self.label.as_str() {
            "PRIVATE KEY" => (ImportFormat::Pkcs8, true),
            "PUBLIC KEY" => (ImportFormat::Spki, false),
            "RSA PRIVATE KEY" => (ImportFormat::Pkcs1, true),
            "RSA PUBLIC KEY" => (ImportFormat::Pkcs1, false),
            other => {
                return Err(JwtError::KeyFormat(format!(
                    "unsupported PEM label '{other}'"
                )));
            }
        };

        if format == ImportFormat::Pkcs1 && algorithm.family() != AlgorithmFamily::Rsa {
            return Err(JwtError::KeyFormat(format!(
                "PKCS#1 key cannot be used with {algorithm}"
            )));
        }

        match (usage, private) {
            (KeyUsage::Sign, false) => Err(JwtError::key_format(
                "private key required, got public key",
            )),
            (KeyUsage::Verify, true) => Err(JwtError::key_format(
                "public key required, got private key",
            )),
            _ => Ok(format),
        }
    }
}

/// Both markers present
pub(super) fn is_pem(text: &str) -> bool {
    text.contains(BEGIN_MARKER) && text.contains(END_MARKER)
}

/// Strip the marker lines and whitespace, then Base64-decode the body
pub(super) fn parse(text: &str) -> JwtResult<PemKey> {
    let label = label(text).ok_or_else(|| JwtError::key_format("PEM label is missing"))?;

    let body: String = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.starts_with(BEGIN_MARKER) && !line.starts_with(END_MARKER))
        .flat_map(|line| line.chars().filter(|c| !c.is_whitespace()))
        .collect();

    let der = base64_decode_standard(&body)
        .map_err(|e| JwtError::KeyFormat(format!("invalid PEM body: {e}")))?;
    if der.is_empty() {
        return Err(JwtError::key_format("PEM body is empty"));
    }

    Ok(PemKey { label, der })
}

fn label(text: &str) -> Option<String> {
    let start = text.find(BEGIN_MARKER)? + BEGIN_MARKER.len();
    let rest = &text[start..];
    let end = rest.find(DASHES)?;
    let label = rest[..end].trim();
    (!label.is_empty()).then(|| label.to_string())
}
