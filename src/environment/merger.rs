//! Filtering of environment entries into custom API parameters

use crate::domain::{AcceptedParameter, FilterOptions, ParsedEntry};

/// Apply the filter policy to parsed entries, preserving input order.
///
/// Per entry:
/// 1. malformed entries are skipped
/// 2. unless `ignore_enabled`, entries not explicitly enabled are skipped
/// 3. a `null` value becomes `options.null_to`
/// 4. an empty value is skipped unless `include_empty`
///
/// Duplicate keys are passed through as-is.
pub fn compute_accepted_parameters(
    entries: &[ParsedEntry],
    options: &FilterOptions,
) -> Vec<AcceptedParameter> {
    entries.iter().filter_map(|entry| accept_entry(entry, options)).collect()
}

fn accept_entry(entry: &ParsedEntry, options: &FilterOptions) -> Option<AcceptedParameter> {
    let entry = match entry {
        ParsedEntry::Valid(entry) => entry,
        ParsedEntry::Malformed { index, reason } => {
            tracing::debug!("Skipping entry #{}: {}", index, reason);
            return None;
        }
    };

    if !options.ignore_enabled && entry.enabled != Some(true) {
        tracing::debug!("Skipping '{}': not enabled", entry.key);
        return None;
    }

    let value = entry.value.clone().unwrap_or_else(|| options.null_to.clone());
    if value.is_empty() && !options.include_empty {
        tracing::debug!("Skipping '{}': empty value", entry.key);
        return None;
    }

    Some(AcceptedParameter { name: entry.key.clone(), value })
}
