//! Error type for environment import runs

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("Error: JWT is required")]
    MissingToken,

    #[error("No values on Environment Variables file")]
    NoValues,

    #[error("Failed reading environment file {path}: {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid environment file {path}: {source}")]
    InvalidExport {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid target id '{0}'")]
    InvalidTargetId(String),

    #[error("Invalid API base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Fetching target {target_id} failed with HTTP {status}: {body}")]
    FetchFailed { target_id: String, status: u16, body: String },

    #[error("Updating target {target_id} failed with HTTP {status}: {body}")]
    WriteFailed { target_id: String, status: u16, body: String },

    #[error("Unexpected response for target {target_id}: {source}")]
    InvalidResponse {
        target_id: String,
        #[source]
        source: serde_json::Error,
    },
}

impl ImportError {
    /// Preconditions stop the run cleanly before any network call.
    pub fn is_precondition(&self) -> bool {
        matches!(self, Self::MissingToken | Self::NoValues)
    }
}

pub type Result<T> = std::result::Result<T, ImportError>;
