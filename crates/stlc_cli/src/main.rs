//! STLC Forge CLI - Main entry point.
//!
//! Exit codes:
//! - 0: Success
//! - 1: General error
//! - 2: Invalid arguments
//! - 3: Configuration error

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use stlc_integrations::IntegrationError;

mod commands;

use commands::{Cli, Commands};

/// CI-friendly exit codes
pub struct ExitCodes;

impl ExitCodes {
    pub const SUCCESS: u8 = 0;
    pub const GENERAL_ERROR: u8 = 1;
    pub const INVALID_ARGS: u8 = 2;
    pub const CONFIG_ERROR: u8 = 3;
}

#[tokio::main]
async fn main() -> ExitCode {
    // A missing .env file is fine
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    init_logging(&cli);

    let result = match cli.command {
        Commands::Analyze(args) => commands::analyze::execute(args).await,
        Commands::Generate(args) => commands::generate::execute(args).await,
        Commands::Orchestrate(args) => commands::orchestrate::execute(args).await,
        Commands::Serve(args) => commands::serve::execute(args).await,
    };

    match result {
        Ok(()) => ExitCode::from(ExitCodes::SUCCESS),
        Err(e) => {
            let exit_code = categorize_error(&e);
            eprintln!("❌ Error: {:#}", e);
            ExitCode::from(exit_code)
        }
    }
}

fn log_directives(cli: &Cli) -> &'static str {
    if cli.verbose {
        "stlc=debug,stlc_core=debug,stlc_integrations=debug,info"
    } else if cli.quiet {
        "warn"
    } else {
        "stlc=info,stlc_core=info,stlc_integrations=info,warn"
    }
}

fn init_logging(cli: &Cli) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_directives(cli)));
    let registry = tracing_subscriber::registry().with(filter);

    // Logs go to stderr so structured output on stdout stays parseable.
    let log_result = if cli.log_json {
        registry
            .with(fmt::layer().json().with_target(false).with_writer(std::io::stderr))
            .try_init()
    } else {
        registry
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .try_init()
    };

    if log_result.is_err() {
        // Logging already initialized, continue
    }
}

/// Categorize error to determine exit code
fn categorize_error(e: &anyhow::Error) -> u8 {
    if let Some(err) = e.chain().find_map(|cause| cause.downcast_ref::<IntegrationError>()) {
        match err {
            IntegrationError::Config { .. } | IntegrationError::InvalidSetting { .. } => {
                return ExitCodes::CONFIG_ERROR;
            }
            IntegrationError::MissingRequirement => return ExitCodes::INVALID_ARGS,
            _ => {}
        }
    }

    let msg = format!("{:#}", e).to_lowercase();
    if msg.contains("configuration") {
        ExitCodes::CONFIG_ERROR
    } else if msg.contains("argument") || msg.contains("not found") {
        ExitCodes::INVALID_ARGS
    } else {
        ExitCodes::GENERAL_ERROR
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn test_categorize_integration_errors() {
        let err = anyhow::Error::new(IntegrationError::invalid_setting("PORT", "not a port"));
        assert_eq!(categorize_error(&err), ExitCodes::CONFIG_ERROR);

        let err = anyhow::Error::new(IntegrationError::MissingRequirement);
        assert_eq!(categorize_error(&err), ExitCodes::INVALID_ARGS);
    }

    #[test]
    fn test_categorize_wrapped_errors() {
        let inner: Result<(), IntegrationError> = Err(IntegrationError::Config {
            path: "stlc.toml".into(),
            message: "expected a table".to_string(),
        });
        let err = inner.context("Failed to start").unwrap_err();
        assert_eq!(categorize_error(&err), ExitCodes::CONFIG_ERROR);

        let err = anyhow::anyhow!("Requirement file not found or unreadable: x.txt");
        assert_eq!(categorize_error(&err), ExitCodes::INVALID_ARGS);

        let err = anyhow::anyhow!("HTTP server stopped with an error");
        assert_eq!(categorize_error(&err), ExitCodes::GENERAL_ERROR);
    }

    #[test]
    fn test_log_directives() {
        let cli = Cli::try_parse_from(["stlc", "--quiet", "analyze", "login"]).unwrap();
        assert_eq!(log_directives(&cli), "warn");

        let cli = Cli::try_parse_from(["stlc", "analyze", "login"]).unwrap();
        assert!(log_directives(&cli).starts_with("stlc=info"));
    }
}
