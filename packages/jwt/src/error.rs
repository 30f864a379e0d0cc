//! JWT error types

use std::fmt;
use thiserror::Error;

/// JWT operation result type
pub type JwtResult<T> = Result<T, JwtError>;

/// Top-level operation an error escaped from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// `decode_token`
    Decode,
    /// `generate_token`
    Generate,
    /// `verify_token`
    Verify,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::Decode => "decode",
            Operation::Generate => "generate",
            Operation::Verify => "verify",
        };
        f.write_str(name)
    }
}

/// JWT error types
#[derive(Debug, Clone, PartialEq, Error)]
pub enum JwtError {
    /// Malformed token structure or an undecodable segment
    #[error("Malformed token: {0}")]
    Format(String),

    /// Key is neither PEM nor JWK, or lacks fields the operation needs
    #[error("Invalid key: {0}")]
    KeyFormat(String),

    /// The algorithm family needs a secret or key that was not supplied
    #[error("Missing key: {0}")]
    KeyRequired(String),

    /// Algorithm name outside the supported set
    #[error("Unsupported algorithm: {0}")]
    Algorithm(String),

    /// Token declares a different algorithm than the verifier expects
    #[error("Algorithm mismatch: expected {expected}, got {actual}")]
    AlgorithmMismatch {
        /// Algorithm the caller asked to verify with
        expected: String,
        /// Algorithm declared in the token header
        actual: String,
    },

    /// Header or payload could not be serialized
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// The crypto provider failed to produce a result
    #[error("Cryptographic operation failed: {0}")]
    Crypto(String),

    /// Background task or channel failure
    #[error("Internal error: {0}")]
    Internal(String),

    /// Error raised inside a top-level operation, with its stable prefix
    #[error("Failed to {operation} JWT: {source}")]
    Failed {
        /// Operation that failed
        operation: Operation,
        /// Underlying cause
        source: Box<JwtError>,
    },
}

impl JwtError {
    /// Create a format error
    #[inline]
    #[must_use]
    pub fn format(msg: &str) -> Self {
        JwtError::Format(msg.to_string())
    }

    /// Create a key format error
    #[inline]
    #[must_use]
    pub fn key_format(msg: &str) -> Self {
        JwtError::KeyFormat(msg.to_string())
    }

    /// Create a key required error
    #[inline]
    #[must_use]
    pub fn key_required(msg: &str) -> Self {
        JwtError::KeyRequired(msg.to_string())
    }

    /// Create an unsupported algorithm error
    #[inline]
    #[must_use]
    pub fn unsupported_algorithm(alg: &str) -> Self {
        JwtError::Algorithm(alg.to_string())
    }

    /// Create a serialization error
    #[inline]
    #[must_use]
    pub fn serialization(msg: &str) -> Self {
        JwtError::Serialization(msg.to_string())
    }

    /// Create a crypto provider error
    #[inline]
    #[must_use]
    pub fn crypto(msg: &str) -> Self {
        JwtError::Crypto(msg.to_string())
    }

    /// Create an internal error
    #[inline]
    #[must_use]
    pub fn internal(msg: &str) -> Self {
        JwtError::Internal(msg.to_string())
    }

    /// Wrap this error with the prefix of the failing top-level operation
    #[must_use]
    pub fn during(self, operation: Operation) -> Self {
        JwtError::Failed {
            operation,
            source: Box::new(self),
        }
    }

    /// Innermost error kind, looking through operation prefixes
    #[must_use]
    pub fn root(&self) -> &JwtError {
        let mut current = self;
        while let JwtError::Failed { source, .. } = current {
            current = source;
        }
        current
    }

    /// Outermost operation prefix, if any
    #[must_use]
    pub fn operation(&self) -> Option<Operation> {
        match self {
            JwtError::Failed { operation, .. } => Some(*operation),
            _ => None,
        }
    }
}
