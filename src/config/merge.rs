//! Layering of command-line overrides on top of file configuration

use crate::domain::Config;

/// Values supplied on the command line (or through their env fallbacks).
///
/// Boolean flags can only switch a filter on; `false` leaves the file value.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub api_base_url: Option<String>,
    pub token: Option<String>,
    pub timeout_secs: Option<u64>,
    pub ignore_enabled: bool,
    pub null_to: Option<String>,
    pub include_empty: bool,
}

pub fn merge_cli_with_config(mut config: Config, cli: CliOverrides) -> Config {
    if let Some(url) = cli.api_base_url {
        config.api_base_url = url;
    }
    if let Some(token) = cli.token {
        config.token = Some(token);
    }
    if let Some(timeout) = cli.timeout_secs {
        config.timeout_secs = timeout;
    }
    if let Some(null_to) = cli.null_to {
        config.null_to = null_to;
    }
    config.ignore_enabled |= cli.ignore_enabled;
    config.include_empty |= cli.include_empty;
    config
}
