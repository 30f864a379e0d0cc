//! Structured logging infrastructure
//!
//! Provides env_logger-based logging with secure handling of sensitive data
//! and proper integration with the standard log crate. Library crates emit
//! `tracing` events built with the `log` feature, so everything funnels into
//! the logger configured here.

use log::{debug, error, info, warn};
use sha2::{Digest, Sha256};
use std::sync::Once;

static INIT_LOGGER: Once = Once::new();

/// Logging setup and secret-safe logging helpers
pub struct LoggingTransformer;

impl LoggingTransformer {
    /// Initialize logging system (should be called once at application startup)
    ///
    /// Configure logging levels via the `RUST_LOG` environment variable:
    /// - `RUST_LOG=debug` - Enable all debug logs
    /// - `RUST_LOG=info` - Enable info and above
    /// - `RUST_LOG=devkit_jwt=debug,devkit=info` - Module-specific levels
    pub fn init() {
        INIT_LOGGER.call_once(|| {
            env_logger::Builder::from_default_env()
                .format_timestamp_micros()
                .init();

            debug!("Structured logging initialized");
        });
    }

    /// Initialize logging for test environments
    ///
    /// Safe to call from every test; repeated initialization is ignored.
    pub fn init_test() {
        let _ = env_logger::Builder::from_default_env()
            .is_test(true)
            .try_init();
    }

    /// Log the outcome of a top-level token operation
    pub fn log_token_operation(operation: &str, algorithm: &str, success: bool) {
        if success {
            info!("Token operation succeeded: {operation} (alg: {algorithm})");
        } else {
            warn!("Token operation failed: {operation} (alg: {algorithm})");
        }
    }

    /// Secure logging of cryptographic errors
    ///
    /// Logs the operation and error type without exposing the message, which
    /// may quote key material.
    pub fn log_crypto_error<E: std::error::Error>(operation: &str, _error: &E) {
        error!(
            "Cryptographic operation failed: {} (error_type: {})",
            operation,
            std::any::type_name::<E>()
        );
    }

    /// Short SHA-256 fingerprint of sensitive bytes for log correlation
    ///
    /// Returns `#` followed by the first 12 hex characters of the digest.
    #[must_use]
    pub fn fingerprint(data: &[u8]) -> String {
        let hash = Sha256::digest(data);
        let hex_hash = format!("{hash:x}");
        format!("#{}", &hex_hash[..12])
    }
}
