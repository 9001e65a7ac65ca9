//! Postman environment file parsing

use crate::domain::{EnvironmentEntry, EnvironmentExport, ParsedEntry};
use crate::error::{ImportError, Result};
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Read an environment export from disk and validate its entries.
///
/// A missing or empty `values` array is [`ImportError::NoValues`].
pub fn load_environment_file(path: &Path) -> Result<Vec<ParsedEntry>> {
    let content = fs::read_to_string(path)
        .map_err(|source| ImportError::ReadFile { path: path.to_path_buf(), source })?;
    let export: EnvironmentExport = serde_json::from_str(&content)
        .map_err(|source| ImportError::InvalidExport { path: path.to_path_buf(), source })?;

    if let Some(name) = export.name.as_deref() {
        tracing::info!("Loaded environment '{}' from {}", name, path.display());
    }

    parse_export(export)
}

pub fn parse_export(export: EnvironmentExport) -> Result<Vec<ParsedEntry>> {
    let values = match export.values {
        Some(values) if !values.is_empty() => values,
        _ => return Err(ImportError::NoValues),
    };

    Ok(values.into_iter().enumerate().map(|(index, raw)| parse_entry(index, raw)).collect())
}

/// Validate one element of `values`.
pub fn parse_entry(index: usize, raw: Value) -> ParsedEntry {
    let malformed = |reason: &str| ParsedEntry::Malformed { index, reason: reason.to_string() };

    let Value::Object(mut fields) = raw else {
        return malformed("entry is not an object");
    };

    let key = match fields.remove("key") {
        Some(Value::String(key)) => key,
        Some(_) => return malformed("key is not a string"),
        None => return malformed("missing key"),
    };

    let value = match fields.remove("value") {
        None => return malformed("missing value"),
        Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s),
        Some(v @ (Value::Number(_) | Value::Bool(_))) => Some(v.to_string()),
        Some(_) => return malformed("value is not a scalar"),
    };

    // Anything but a JSON boolean counts as no flag at all.
    let enabled = fields.get("enabled").and_then(Value::as_bool);

    ParsedEntry::Valid(EnvironmentEntry { key, value, enabled })
}
