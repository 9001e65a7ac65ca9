//! Merge accepted parameters into a target's remote parameter list

use crate::domain::{AcceptedParameter, RemoteParameter};
use crate::error::Result;
use crate::target::client::TargetApi;
use std::collections::HashSet;

/// Outcome of one apply run.
#[derive(Debug, Clone, PartialEq)]
pub struct ApplyReport {
    /// Remote entries before the merge
    pub remote_count: usize,
    /// Remote entries dropped because an accepted parameter shares their name
    pub replaced_count: usize,
    /// The list written back (or that would be written, for a dry run)
    pub merged: Vec<RemoteParameter>,
    pub written: bool,
}

/// Remote entries not overridden by name, followed by every accepted parameter.
pub fn merge_parameters(
    remote: Vec<RemoteParameter>,
    accepted: &[AcceptedParameter],
) -> Vec<RemoteParameter> {
    let updated_names: HashSet<&str> = accepted.iter().map(|p| p.name.as_str()).collect();

    remote
        .into_iter()
        .filter(|param| !updated_names.contains(param.name.as_str()))
        .chain(accepted.iter().cloned().map(RemoteParameter::from))
        .collect()
}

/// Fetch, merge and write back the target's custom API parameters.
///
/// The fetch and the write are separate requests; a concurrent change to the
/// target between them is overwritten.
pub fn apply_parameters(
    api: &dyn TargetApi,
    target_id: &str,
    accepted: &[AcceptedParameter],
    dry_run: bool,
) -> Result<ApplyReport> {
    let remote = api.fetch_parameters(target_id)?;
    let remote_count = remote.len();
    tracing::info!("Target {} has {} custom API parameters", target_id, remote_count);

    let merged = merge_parameters(remote, accepted);
    let replaced_count = remote_count + accepted.len() - merged.len();

    if dry_run {
        tracing::info!("Dry run: skipping update of target {}", target_id);
    } else {
        api.write_parameters(target_id, &merged)?;
        tracing::info!(
            "Updated target {}: {} parameters ({} replaced)",
            target_id,
            merged.len(),
            replaced_count
        );
    }

    Ok(ApplyReport { remote_count, replaced_count, merged, written: !dry_run })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ImportError;
    use serde_json::json;
    use std::cell::{Cell, RefCell};

    /// In-memory target store.
    #[derive(Default)]
    struct FakeTargets {
        parameters: RefCell<Vec<RemoteParameter>>,
        fetch_status: Option<u16>,
        writes: Cell<usize>,
    }

    impl TargetApi for FakeTargets {
        fn fetch_parameters(&self, target_id: &str) -> Result<Vec<RemoteParameter>> {
            if let Some(status) = self.fetch_status {
                return Err(ImportError::FetchFailed {
                    target_id: target_id.to_string(),
                    status,
                    body: "{\"detail\":\"Not found.\"}".into(),
                });
            }
            Ok(self.parameters.borrow().clone())
        }

        fn write_parameters(&self, _target_id: &str, parameters: &[RemoteParameter]) -> Result<()> {
            self.writes.set(self.writes.get() + 1);
            *self.parameters.borrow_mut() = parameters.to_vec();
            Ok(())
        }
    }

    fn remote(name: &str, value: &str) -> RemoteParameter {
        serde_json::from_value(json!({"name": name, "value": value})).expect("remote")
    }

    fn accepted(name: &str, value: &str) -> AcceptedParameter {
        AcceptedParameter { name: name.into(), value: value.into() }
    }

    fn names(params: &[RemoteParameter]) -> Vec<&str> {
        params.iter().map(|p| p.name.as_str()).collect()
    }

    #[test]
    fn test_accepted_values_win_and_are_appended() {
        let merged = merge_parameters(
            vec![remote("HOST", "old"), remote("KEEP", "k"), remote("TOKEN", "t")],
            &[accepted("TOKEN", "new-t"), accepted("HOST", "api.x.com")],
        );

        assert_eq!(names(&merged), vec!["KEEP", "TOKEN", "HOST"]);
        assert_eq!(merged[1].value(), Some(&json!("new-t")));
        assert_eq!(merged[2].value(), Some(&json!("api.x.com")));
    }

    #[test]
    fn test_merge_with_no_accepted_keeps_remote() {
        let merged = merge_parameters(vec![remote("A", "1"), remote("B", "2")], &[]);
        assert_eq!(names(&merged), vec!["A", "B"]);
    }

    #[test]
    fn test_untouched_remote_entries_serialise_as_fetched() {
        let bare: RemoteParameter = serde_json::from_value(json!({"name": "X"})).expect("remote");
        let merged = merge_parameters(vec![bare], &[accepted("HOST", "h")]);
        assert_eq!(
            serde_json::to_value(&merged).expect("serialize"),
            json!([{"name": "X"}, {"name": "HOST", "value": "h"}])
        );
    }

    #[test]
    fn test_source_duplicates_are_not_collapsed() {
        let merged =
            merge_parameters(vec![remote("A", "r")], &[accepted("A", "1"), accepted("A", "2")]);
        assert_eq!(names(&merged), vec!["A", "A"]);
    }

    #[test]
    fn test_apply_twice_is_idempotent() {
        let store = FakeTargets {
            parameters: RefCell::new(vec![remote("HOST", "old"), remote("KEEP", "k")]),
            ..FakeTargets::default()
        };
        let params = [accepted("HOST", "api.x.com"), accepted("NEW", "n")];

        apply_parameters(&store, "t1", &params, false).expect("first apply");
        let after_first = store.parameters.borrow().clone();
        let report = apply_parameters(&store, "t1", &params, false).expect("second apply");

        assert_eq!(*store.parameters.borrow(), after_first);
        assert_eq!(names(&after_first), vec!["KEEP", "HOST", "NEW"]);
        assert_eq!(report.replaced_count, 2);
        assert_eq!(store.writes.get(), 2);
    }

    #[test]
    fn test_fetch_failure_skips_write() {
        let store = FakeTargets { fetch_status: Some(404), ..FakeTargets::default() };

        let err = apply_parameters(&store, "t1", &[accepted("A", "1")], false).unwrap_err();
        assert!(err.to_string().contains("Not found."));
        assert_eq!(store.writes.get(), 0);
    }

    #[test]
    fn test_dry_run_does_not_write() {
        let store = FakeTargets {
            parameters: RefCell::new(vec![remote("A", "old")]),
            ..FakeTargets::default()
        };

        let report = apply_parameters(&store, "t1", &[accepted("A", "new")], true).expect("dry");
        assert!(!report.written);
        assert_eq!(report.merged[0].value(), Some(&json!("new")));
        assert_eq!(store.writes.get(), 0);
        assert_eq!(store.parameters.borrow()[0].value(), Some(&json!("old")));
    }
}
