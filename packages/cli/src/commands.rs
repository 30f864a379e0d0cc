//! CLI command definitions

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Reads the value from standard input instead of the argument
pub const STDIN_MARKER: &str = "-";

/// Top-level arguments
#[derive(Debug, Parser)]
#[command(name = "devkit")]
#[command(about = "Decode, sign and verify JSON Web Tokens")]
#[command(version)]
pub struct Cli {
    /// Path to a JSON config file (default: $XDG_CONFIG_HOME/devkit/config.json)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Print single-line JSON instead of pretty-printed output
    #[arg(long, global = true)]
    pub compact: bool,

    /// Operation to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Token operations
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Split a token into header, payload and signature without verifying it
    ///
    /// Example usage:
    ///   devkit decode eyJhbGciOi...
    ///   echo "$TOKEN" | devkit decode - --human-times
    Decode {
        /// Token, or `-` to read it from stdin
        token: String,

        /// Add `iat_human`, `exp_human` and `nbf_human` renderings to the payload
        #[arg(long)]
        human_times: bool,
    },

    /// Sign a JSON object payload into a token
    ///
    /// HS* algorithms take `--secret`; RS* and ES* take `--private-key-file`
    /// pointing at a PEM or JWK file.
    ///
    /// Example usage:
    ///   devkit encode --alg HS256 --secret k1 '{"sub":"1"}'
    ///   devkit encode --alg ES256 --private-key-file key.pem -
    Encode {
        /// JSON object payload, or `-` to read it from stdin
        payload: String,

        /// Signing algorithm (default from config, else HS256)
        #[arg(long = "alg")]
        algorithm: Option<String>,

        /// Shared secret for HS256/HS384/HS512
        #[arg(long)]
        secret: Option<String>,

        /// PEM or JWK private key file for RS*/ES* algorithms
        #[arg(long)]
        private_key_file: Option<PathBuf>,

        /// Key ID written to the header as `kid`
        #[arg(long)]
        kid: Option<String>,
    },

    /// Check a token's signature against an expected algorithm
    ///
    /// Exits 0 when the signature is valid, 1 when it is not, 2 on error.
    ///
    /// Example usage:
    ///   devkit verify "$TOKEN" --alg HS256 --secret k1
    ///   devkit verify "$TOKEN" --alg RS256 --public-key-file pub.pem
    Verify {
        /// Token, or `-` to read it from stdin
        token: String,

        /// Algorithm the token must declare (default from config, else HS256)
        #[arg(long = "alg")]
        algorithm: Option<String>,

        /// Shared secret for HS256/HS384/HS512
        #[arg(long)]
        secret: Option<String>,

        /// PEM or JWK public key file for RS*/ES* algorithms
        #[arg(long)]
        public_key_file: Option<PathBuf>,
    },

    /// List the supported algorithms
    Algorithms,
}
