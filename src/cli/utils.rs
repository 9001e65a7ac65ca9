//! Shared CLI utilities.

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use crate::config::CliOverrides;

/// Filter flags shared by `apply` and `preview`.
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Ignore the `enabled` property and accept disabled variables too
    #[arg(long)]
    pub ignore_enabled: bool,

    /// Converts null values to this value (default: empty string)
    #[arg(long, value_name = "VALUE")]
    pub null_to: Option<String>,

    /// Include variables whose value is empty
    #[arg(long)]
    pub include_empty: bool,
}

impl FilterArgs {
    pub fn overrides(&self) -> CliOverrides {
        CliOverrides {
            ignore_enabled: self.ignore_enabled,
            null_to: self.null_to.clone(),
            include_empty: self.include_empty,
            ..CliOverrides::default()
        }
    }
}

/// Write `value` to stdout as pretty-printed JSON.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
