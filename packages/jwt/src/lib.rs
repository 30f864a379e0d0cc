//! JSON Web Token (JWT) encode, decode and verify engine
//!
//! This crate provides:
//! - Token codec: three-segment parsing and base64url helpers
//! - Key material classification for PEM and JWK keys
//! - HS256/384/512, RS256/384/512 and ES256/384/512 through a pluggable
//!   [`CryptoProvider`]
//! - Human-readable renderings of the `iat`/`exp`/`nbf` claims
//! - True async with channels for token generation and verification

pub mod algorithms;
pub mod api;
pub mod claims;
pub mod codec;
pub mod crypto;
mod error;
pub mod keys;
mod types;

pub use algorithms::{
    Algorithm, AlgorithmDescriptor, AlgorithmFamily, HashBits, SUPPORTED_ALGORITHMS,
};
pub use api::{
    AsyncJwtResult, DEFAULT_ALGORITHM, Jwt, JwtBuilder, JwtEngine, SignOptions, VerifyOptions,
    generate_token, verify_token,
};
pub use claims::{annotate_timestamps, format_timestamp};
pub use codec::{base64_url_decode, base64_url_decode_binary, base64_url_encode, decode_token};
pub use crypto::{CryptoProvider, ImportFormat, KeyData, KeyUsage, RustCryptoProvider};
pub use error::*;
pub use keys::{KeyFormat, KeyMaterial, classify};
pub use types::*;
