//! Cryptographic primitives behind the algorithm dispatcher
//!
//! The dispatcher only talks to a [`CryptoProvider`]. [`RustCryptoProvider`]
//! is the default implementation, built on the RustCrypto crates.

mod ecdsa;
mod hmac;
mod provider;
mod rsa;
mod rust_crypto;

pub use provider::{CryptoProvider, ImportFormat, KeyData, KeyUsage};
pub use rust_crypto::{RustCryptoKey, RustCryptoProvider};
