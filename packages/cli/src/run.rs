//! Command execution

use crate::commands::{Cli, Commands, STDIN_MARKER};
use crate::config::DevkitConfig;
use crate::error::{CliError, CliResult};
use devkit_jwt::{
    KeyInput, SUPPORTED_ALGORITHMS, SignOptions, VerifyOptions, decode_token, generate_token,
    verify_token,
};
use log::{debug, error};
use serde_json::{Value, json};
use std::path::Path;
use std::process::ExitCode;

/// Signature checked out, or any command other than `verify` succeeded
pub const EXIT_OK: u8 = 0;
/// `verify` ran but the signature did not match
pub const EXIT_INVALID: u8 = 1;
/// The command failed
pub const EXIT_ERROR: u8 = 2;

/// JSON document to print and the process exit code that goes with it
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    /// Printed to stdout
    pub document: Value,
    /// `EXIT_OK` or `EXIT_INVALID`
    pub exit_code: u8,
}

impl Outcome {
    fn ok(document: Value) -> Self {
        Self {
            document,
            exit_code: EXIT_OK,
        }
    }
}

/// Load config, run the command, print the result
pub async fn run(cli: Cli) -> ExitCode {
    let result = match DevkitConfig::load(cli.config.as_deref()) {
        Ok(config) => execute(&cli.command, &config)
            .await
            .map(|outcome| (outcome, config.pretty && !cli.compact)),
        Err(e) => Err(e),
    };

    match result {
        Ok((outcome, pretty)) => {
            println!("{}", render(&outcome.document, pretty));
            ExitCode::from(outcome.exit_code)
        }
        Err(e) => {
            error!("Command failed: {e}");
            eprintln!("Error: {e}");
            ExitCode::from(EXIT_ERROR)
        }
    }
}

/// Run one command against a loaded config
///
/// # Errors
/// Returns `CliError` for unreadable inputs, invalid payloads and any engine
/// error. An invalid signature is not an error; it yields `EXIT_INVALID`.
pub async fn execute(command: &Commands, config: &DevkitConfig) -> CliResult<Outcome> {
    match command {
        Commands::Decode { token, human_times } => {
            let token = resolve_input(token, "token")?;
            let decoded = decode_token(token.trim())?;

            let mut document = decoded.summary();
            if *human_times || config.annotate_timestamps {
                document["payload"] = Value::Object(decoded.annotated_payload());
            }
            Ok(Outcome::ok(document))
        }

        Commands::Encode {
            payload,
            algorithm,
            secret,
            private_key_file,
            kid,
        } => {
            let payload = resolve_input(payload, "payload")?;
            let Value::Object(claims) = serde_json::from_str::<Value>(&payload)
                .map_err(|e| CliError::Input(format!("payload is not valid JSON: {e}")))?
            else {
                return Err(CliError::input("payload must be a JSON object"));
            };

            let algorithm = algorithm.as_deref().unwrap_or(&config.default_algorithm);
            let mut options = SignOptions::new(algorithm);
            options.secret = secret.clone();
            options.private_key = private_key_file.as_deref().map(read_key_file).transpose()?;
            options.key_id = kid.clone();

            debug!("Encoding payload with {algorithm}");
            let token = generate_token(claims, options).await?;
            Ok(Outcome::ok(json!({"token": token, "algorithm": algorithm})))
        }

        Commands::Verify {
            token,
            algorithm,
            secret,
            public_key_file,
        } => {
            let token = resolve_input(token, "token")?;
            let algorithm = algorithm.as_deref().unwrap_or(&config.default_algorithm);

            let mut options = VerifyOptions::new(algorithm);
            options.secret = secret.clone();
            options.public_key = public_key_file.as_deref().map(read_key_file).transpose()?;

            let valid = verify_token(token.trim(), options).await?;
            Ok(Outcome {
                document: json!({"valid": valid, "algorithm": algorithm}),
                exit_code: if valid { EXIT_OK } else { EXIT_INVALID },
            })
        }

        Commands::Algorithms => Ok(Outcome::ok(json!({"algorithms": SUPPORTED_ALGORITHMS}))),
    }
}

/// JSON text, pretty or compact
#[must_use]
pub fn render(document: &Value, pretty: bool) -> String {
    let rendered = if pretty {
        serde_json::to_string_pretty(document)
    } else {
        serde_json::to_string(document)
    };
    // Serializing a `Value` cannot fail
    rendered.unwrap_or_default()
}

/// The argument itself, or all of stdin when it is `-`
fn resolve_input(value: &str, what: &str) -> CliResult<String> {
    if value != STDIN_MARKER {
        return Ok(value.to_string());
    }

    std::io::read_to_string(std::io::stdin()).map_err(|source| CliError::Io {
        what: format!("{what} from stdin"),
        source,
    })
}

fn read_key_file(path: &Path) -> CliResult<KeyInput> {
    std::fs::read_to_string(path)
        .map(KeyInput::Text)
        .map_err(|source| CliError::Io {
            what: format!("key file {}", path.display()),
            source,
        })
}
