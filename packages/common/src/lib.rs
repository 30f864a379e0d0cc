//! Shared infrastructure for the devkit crates
//!
//! Currently this is the logging layer: one-time `env_logger` setup plus
//! helpers that keep secrets and key material out of log output.

pub mod logging;

pub use logging::LoggingTransformer;
