//! API token acquisition

use anyhow::Result;
use dialoguer::Password;
use std::io::IsTerminal;

use crate::error::ImportError;

/// Use the configured token, or prompt for one when stdin is a terminal.
pub fn acquire_token(configured: Option<String>) -> Result<String> {
    token_from_sources(configured, std::io::stdin().is_terminal(), prompt_token)
}

fn prompt_token() -> Result<String> {
    let token = Password::new().with_prompt("API Token").allow_empty_password(true).interact()?;
    Ok(token)
}

fn token_from_sources(
    configured: Option<String>,
    interactive: bool,
    prompt: impl FnOnce() -> Result<String>,
) -> Result<String> {
    let token = match configured {
        Some(token) => token,
        None if interactive => prompt()?,
        None => {
            tracing::debug!("No API token configured and stdin is not a terminal");
            String::new()
        }
    };

    let token = token.trim();
    if token.is_empty() {
        return Err(ImportError::MissingToken.into());
    }
    Ok(token.to_string())
}
