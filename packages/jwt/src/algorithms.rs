//! Algorithm descriptors for the nine supported JWS algorithms

use crate::error::{JwtError, JwtResult};
use std::{fmt, str::FromStr};

/// Algorithm names in the order a selector presents them
pub const SUPPORTED_ALGORITHMS: [&str; 9] = [
    "HS256", "HS384", "HS512", "RS256", "RS384", "RS512", "ES256", "ES384", "ES512",
];

/// Signing scheme family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlgorithmFamily {
    /// Shared-secret HMAC
    Hmac,
    /// RSASSA-PKCS1-v1_5
    Rsa,
    /// ECDSA over the NIST curve matching the hash width
    Ecdsa,
}

impl fmt::Display for AlgorithmFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AlgorithmFamily::Hmac => "HMAC",
            AlgorithmFamily::Rsa => "RSA",
            AlgorithmFamily::Ecdsa => "ECDSA",
        };
        f.write_str(name)
    }
}

/// SHA-2 output width used by the algorithm
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HashBits {
    /// SHA-256
    Sha256,
    /// SHA-384
    Sha384,
    /// SHA-512
    Sha512,
}

impl HashBits {
    /// Width in bits
    #[must_use]
    pub fn bits(self) -> u16 {
        match self {
            HashBits::Sha256 => 256,
            HashBits::Sha384 => 384,
            HashBits::Sha512 => 512,
        }
    }
}

/// Family and hash width of one algorithm
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AlgorithmDescriptor {
    /// Signing scheme
    pub family: AlgorithmFamily,
    /// Hash width
    pub hash_bits: HashBits,
}

/// Supported JWS algorithm
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum Algorithm {
    HS256,
    HS384,
    HS512,
    RS256,
    RS384,
    RS512,
    ES256,
    ES384,
    ES512,
}

impl Algorithm {
    /// All algorithms, in `SUPPORTED_ALGORITHMS` order
    pub const ALL: [Algorithm; 9] = [
        Algorithm::HS256,
        Algorithm::HS384,
        Algorithm::HS512,
        Algorithm::RS256,
        Algorithm::RS384,
        Algorithm::RS512,
        Algorithm::ES256,
        Algorithm::ES384,
        Algorithm::ES512,
    ];

    /// Header `alg` value
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Algorithm::HS256 => "HS256",
            Algorithm::HS384 => "HS384",
            Algorithm::HS512 => "HS512",
            Algorithm::RS256 => "RS256",
            Algorithm::RS384 => "RS384",
            Algorithm::RS512 => "RS512",
            Algorithm::ES256 => "ES256",
            Algorithm::ES384 => "ES384",
            Algorithm::ES512 => "ES512",
        }
    }

    /// Family and hash width lookup
    #[must_use]
    pub fn descriptor(self) -> AlgorithmDescriptor {
        let (family, hash_bits) = match self {
            Algorithm::HS256 => (AlgorithmFamily::Hmac, HashBits::Sha256),
            Algorithm::HS384 => (AlgorithmFamily::Hmac, HashBits::Sha384),
            Algorithm::HS512 => (AlgorithmFamily::Hmac, HashBits::Sha512),
            Algorithm::RS256 => (AlgorithmFamily::Rsa, HashBits::Sha256),
            Algorithm::RS384 => (AlgorithmFamily::Rsa, HashBits::Sha384),
            Algorithm::RS512 => (AlgorithmFamily::Rsa, HashBits::Sha512),
            Algorithm::ES256 => (AlgorithmFamily::Ecdsa, HashBits::Sha256),
            Algorithm::ES384 => (AlgorithmFamily::Ecdsa, HashBits::Sha384),
            Algorithm::ES512 => (AlgorithmFamily::Ecdsa, HashBits::Sha512),
        };
        AlgorithmDescriptor { family, hash_bits }
    }

    /// Signing scheme family
    #[must_use]
    pub fn family(self) -> AlgorithmFamily {
        self.descriptor().family
    }

    /// Hash width
    #[must_use]
    pub fn hash_bits(self) -> HashBits {
        self.descriptor().hash_bits
    }

    /// JWK `crv` name an ECDSA key must carry for this algorithm
    #[must_use]
    pub fn curve(self) -> Option<&'static str> {
        match self {
            Algorithm::ES256 => Some("P-256"),
            Algorithm::ES384 => Some("P-384"),
            Algorithm::ES512 => Some("P-521"),
            _ => None,
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Algorithm {
    type Err = JwtError;

    /// Exact, case-sensitive match against the header `alg` values
    ///
    /// # Errors
    /// Returns `JwtError::Algorithm` for any name outside `SUPPORTED_ALGORITHMS`.
    fn from_str(name: &str) -> JwtResult<Self> {
        Algorithm::ALL
            .into_iter()
            .find(|alg| alg.as_str() == name)
            .ok_or_else(|| JwtError::unsupported_algorithm(name))
    }
}
