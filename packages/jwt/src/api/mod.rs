//! Engine, builder and free-function entry points

pub mod builder;
pub mod engine;
pub mod options;
pub mod result;

pub use builder::{DEFAULT_ALGORITHM, Jwt, JwtBuilder};
pub use engine::JwtEngine;
pub use options::{SignOptions, VerifyOptions};
pub use result::AsyncJwtResult;

use once_cell::sync::Lazy;
use serde_json::{Map, Value};

static DEFAULT_ENGINE: Lazy<JwtEngine> = Lazy::new(JwtEngine::new);

/// Sign `payload` with the default engine
///
/// Spawns onto the current tokio runtime, or runs inline without one.
pub fn generate_token(payload: Map<String, Value>, options: SignOptions) -> AsyncJwtResult<String> {
    DEFAULT_ENGINE.generate_token(payload, options)
}

/// Verify `token` with the default engine
///
/// Spawns onto the current tokio runtime, or runs inline without one.
pub fn verify_token(token: impl Into<String>, options: VerifyOptions) -> AsyncJwtResult<bool> {
    DEFAULT_ENGINE.verify_token(token, options)
}
