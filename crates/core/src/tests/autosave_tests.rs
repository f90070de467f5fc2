// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::collections::BTreeMap;

use serde_json::{Value, json};

use crate::autosave::{AutosaveState, PendingChanges};
use crate::error::CoreError;

fn accept_all(_path: &str, _value: &Value) -> Result<(), String> {
    Ok(())
}

#[test]
fn test_rapid_edits_coalesce_into_one_batch() {
    // Five rapid edits inside one window produce one batch holding the
    // union of changed paths with their final values.
    let mut state: AutosaveState = AutosaveState::new();

    state
        .record_change("rfq.width", json!(100), accept_all)
        .unwrap();
    state
        .record_change("rfq.width", json!(120), accept_all)
        .unwrap();
    state
        .record_change("rfq.thickness", json!(2.5), accept_all)
        .unwrap();
    state
        .record_change("material.grade", json!("A36"), accept_all)
        .unwrap();
    state
        .record_change("rfq.width", json!(140), accept_all)
        .unwrap();

    let batch: BTreeMap<String, Value> = state.begin_flush();
    assert_eq!(batch.len(), 3);
    assert_eq!(batch.get("rfq.width"), Some(&json!(140)));
    assert_eq!(batch.get("rfq.thickness"), Some(&json!(2.5)));
    assert_eq!(batch.get("material.grade"), Some(&json!("A36")));

    // Nothing remains pending after the drain.
    assert!(state.pending.is_empty());
}

#[test]
fn test_validation_failure_blocks_only_that_field() {
    let mut state: AutosaveState = AutosaveState::new();
    let validate = |path: &str, value: &Value| -> Result<(), String> {
        if path == "rfq.width" && value.as_i64().is_some_and(|v| v < 0) {
            Err(String::from("width must be non-negative"))
        } else {
            Ok(())
        }
    };

    state.record_change("rfq.width", json!(-5), validate).unwrap();
    state
        .record_change("rfq.thickness", json!(2.5), validate)
        .unwrap();

    assert_eq!(
        state.field_errors.get("rfq.width"),
        Some("width must be non-negative")
    );
    let batch: BTreeMap<String, Value> = state.begin_flush();
    assert_eq!(batch.len(), 1);
    assert!(batch.contains_key("rfq.thickness"));
}

#[test]
fn test_successful_edit_clears_field_error() {
    let mut state: AutosaveState = AutosaveState::new();
    state.field_errors.set("rfq.width", "bad");

    state
        .record_change("rfq.width", json!(10), accept_all)
        .unwrap();
    assert_eq!(state.field_errors.get("rfq.width"), None);
}

#[test]
fn test_failed_flush_requeues_under_newer_edits() {
    let mut state: AutosaveState = AutosaveState::new();
    state
        .record_change("rfq.width", json!(100), accept_all)
        .unwrap();

    let batch: BTreeMap<String, Value> = state.begin_flush();

    // The user keeps editing while the PATCH is in flight and fails.
    state
        .record_change("rfq.width", json!(999), accept_all)
        .unwrap();
    state.flush_failed(batch, "network error");

    assert_eq!(state.general_error.as_deref(), Some("network error"));
    // The newer pending value wins over the re-queued one.
    assert_eq!(state.pending.get("rfq.width"), Some(&json!(999)));
}

#[test]
fn test_calculated_fields_are_read_only() {
    let mut state: AutosaveState = AutosaveState::new();
    let mut calculated: BTreeMap<String, Value> = BTreeMap::new();
    calculated.insert(String::from("summary.total_weight"), json!(1234.5));
    state.flush_succeeded(calculated);

    assert_eq!(state.calculated("summary.total_weight"), Some(&json!(1234.5)));
    let result = state.record_change("summary.total_weight", json!(0), accept_all);
    assert_eq!(
        result,
        Err(CoreError::CalculatedFieldReadOnly(String::from(
            "summary.total_weight"
        )))
    );
}

#[test]
fn test_flush_success_clears_general_error() {
    let mut state: AutosaveState = AutosaveState::new();
    state.flush_failed(BTreeMap::new(), "boom");
    assert!(state.general_error.is_some());

    state.flush_succeeded(BTreeMap::new());
    assert_eq!(state.general_error, None);
}

#[test]
fn test_pending_changes_requeue_does_not_overwrite() {
    let mut pending: PendingChanges = PendingChanges::new();
    pending.record("a", json!(2));

    let mut old_batch: BTreeMap<String, Value> = BTreeMap::new();
    old_batch.insert(String::from("a"), json!(1));
    old_batch.insert(String::from("b"), json!(9));
    pending.requeue(old_batch);

    assert_eq!(pending.get("a"), Some(&json!(2)));
    assert_eq!(pending.get("b"), Some(&json!(9)));
    assert_eq!(pending.len(), 2);
}
