//! Apply command implementation

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;
use std::time::Duration;

use super::credentials::acquire_token;
use super::utils::{print_json, FilterArgs};
use crate::config::{load_config, merge_cli_with_config, CliOverrides};
use crate::environment::{compute_accepted_parameters, load_environment_file};
use crate::target::{apply_parameters, HttpTargetApi};

#[derive(Args)]
pub struct ApplyArgs {
    /// Target ID
    #[arg(short, long, value_name = "ID")]
    pub target: String,

    /// Postman environment variables file
    #[arg(short, long, value_name = "FILE")]
    pub env_file: PathBuf,

    #[command(flatten)]
    pub filter: FilterArgs,

    /// API token (prompted for when missing and stdin is a terminal)
    #[arg(long, value_name = "JWT", env = "PROBELY_API_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Base URL of the Probely API
    #[arg(long, value_name = "URL", env = "PROBELY_API_URL")]
    pub api_url: Option<String>,

    /// Path to config file (probely.toml or probely.yml)
    #[arg(short = 'c', long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// HTTP request timeout in seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Fetch and merge, print the result, but do not update the target
    #[arg(long)]
    pub dry_run: bool,
}

impl ApplyArgs {
    fn overrides(&self) -> CliOverrides {
        CliOverrides {
            api_base_url: self.api_url.clone(),
            token: self.token.clone(),
            timeout_secs: self.timeout,
            ..self.filter.overrides()
        }
    }
}

pub fn run(args: ApplyArgs) -> Result<()> {
    let cwd = std::env::current_dir()?;
    let config = load_config(&cwd, args.config.as_deref())?;
    let config = merge_cli_with_config(config, args.overrides());

    let token = acquire_token(config.token.clone())?;

    let entries = load_environment_file(&args.env_file)?;
    let accepted = compute_accepted_parameters(&entries, &config.filter_options());
    tracing::info!(
        "Accepted {} of {} environment entries from {}",
        accepted.len(),
        entries.len(),
        args.env_file.display()
    );

    let api = HttpTargetApi::new(
        &config.api_base_url,
        token,
        Duration::from_secs(config.timeout_secs),
    )?;
    tracing::debug!("Using API at {}", api.base_url());

    let report = apply_parameters(&api, &args.target, &accepted, args.dry_run)?;
    if args.dry_run {
        print_json(&report.merged)?;
    }

    println!("Done.");
    Ok(())
}
