//! Core records shared by the parser, merger, patcher and CLI.

use serde::{Deserialize, Serialize};

pub const DEFAULT_API_BASE_URL: &str = "https://api.probely.com";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Top-level shape of a Postman environment export.
///
/// Entries are kept as raw JSON so a single odd element cannot fail the
/// whole file; they are validated one by one into [`ParsedEntry`].
#[derive(Debug, Clone, Deserialize)]
pub struct EnvironmentExport {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub values: Option<Vec<serde_json::Value>>,
}

/// A well-formed environment entry.
///
/// `value: None` means the file carried an explicit `null`; an absent
/// `value` never reaches this type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvironmentEntry {
    pub key: String,
    pub value: Option<String>,
    pub enabled: Option<bool>,
}

/// Result of validating one element of `values`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedEntry {
    Valid(EnvironmentEntry),
    Malformed { index: usize, reason: String },
}

/// Filter policy applied by the environment merger.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterOptions {
    /// Accept entries regardless of their `enabled` flag
    pub ignore_enabled: bool,
    /// Replacement for `null` values
    pub null_to: String,
    /// Keep entries whose value is the empty string
    pub include_empty: bool,
}

/// A parameter accepted from the environment file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AcceptedParameter {
    pub name: String,
    pub value: String,
}

/// A custom API parameter as stored on the remote target.
///
/// Only `name` is typed; every other field, `value` included, is carried
/// through exactly as the API returned it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteParameter {
    pub name: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl RemoteParameter {
    pub fn value(&self) -> Option<&serde_json::Value> {
        self.extra.get("value")
    }
}

impl From<AcceptedParameter> for RemoteParameter {
    fn from(param: AcceptedParameter) -> Self {
        let mut extra = serde_json::Map::new();
        extra.insert("value".to_string(), serde_json::Value::String(param.value));
        Self { name: param.name, extra }
    }
}

/// Resolved run configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_base_url: String,
    pub token: Option<String>,
    pub timeout_secs: u64,
    pub ignore_enabled: bool,
    pub null_to: String,
    pub include_empty: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            token: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            ignore_enabled: false,
            null_to: String::new(),
            include_empty: false,
        }
    }
}

impl Config {
    pub fn filter_options(&self) -> FilterOptions {
        FilterOptions {
            ignore_enabled: self.ignore_enabled,
            null_to: self.null_to.clone(),
            include_empty: self.include_empty,
        }
    }
}
