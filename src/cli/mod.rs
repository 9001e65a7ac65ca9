//! Command-line interface for probely-postman-env
//!
//! Provides `apply` and `preview` subcommands.

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::error::ImportError;

mod apply;
mod credentials;
mod preview;
mod utils;

/// Import Postman environment variables into a Probely target
#[derive(Parser)]
#[command(name = "probely-postman-env")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging (sets log level to DEBUG)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Merge environment variables into a target's custom API parameters
    Apply(Box<apply::ApplyArgs>),

    /// Show which environment variables would be applied, without contacting the API
    Preview(preview::PreviewArgs),
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG in the environment always takes precedence; --verbose falls back to DEBUG.
    let filter = if cli.verbose {
        EnvFilter::from_default_env().add_directive(Level::DEBUG.into())
    } else {
        EnvFilter::from_default_env().add_directive(Level::WARN.into())
    };
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();

    let outcome = match cli.command {
        Commands::Apply(args) => apply::run(*args),
        Commands::Preview(args) => preview::run(args),
    };
    stop_on_precondition(outcome)
}

/// Precondition failures are reported on stdout and end the run without an error status.
fn stop_on_precondition(outcome: Result<()>) -> Result<()> {
    match outcome {
        Err(err) => match err.downcast_ref::<ImportError>() {
            Some(import_err) if import_err.is_precondition() => {
                println!("{}", import_err);
                Ok(())
            }
            _ => Err(err),
        },
        ok => ok,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preconditions_end_cleanly() {
        assert!(stop_on_precondition(Err(ImportError::NoValues.into())).is_ok());
        assert!(stop_on_precondition(Err(ImportError::MissingToken.into())).is_ok());
    }

    #[test]
    fn test_remote_failures_propagate() {
        let err = ImportError::FetchFailed {
            target_id: "t1".into(),
            status: 500,
            body: "boom".into(),
        };
        let outcome = stop_on_precondition(Err(err.into()));
        assert!(outcome.unwrap_err().to_string().contains("boom"));
    }

    #[test]
    fn test_cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
