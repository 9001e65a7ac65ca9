//! Preview command implementation

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use super::utils::{print_json, FilterArgs};
use crate::config::{load_config, merge_cli_with_config};
use crate::environment::{compute_accepted_parameters, load_environment_file};

#[derive(Args)]
pub struct PreviewArgs {
    /// Postman environment variables file
    #[arg(short, long, value_name = "FILE")]
    pub env_file: PathBuf,

    #[command(flatten)]
    pub filter: FilterArgs,

    /// Path to config file (probely.toml or probely.yml)
    #[arg(short = 'c', long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

pub fn run(args: PreviewArgs) -> Result<()> {
    let cwd = std::env::current_dir()?;
    let config = load_config(&cwd, args.config.as_deref())?;
    let config = merge_cli_with_config(config, args.filter.overrides());

    let entries = load_environment_file(&args.env_file)?;
    let accepted = compute_accepted_parameters(&entries, &config.filter_options());

    print_json(&accepted)?;
    eprintln!("Accepted {} of {} entries", accepted.len(), entries.len());
    Ok(())
}
