//! Main entry point for the devkit CLI

use clap::Parser;
use devkit::Cli;
use devkit_common::LoggingTransformer;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize structured logging
    LoggingTransformer::init();

    devkit::run(Cli::parse()).await
}
