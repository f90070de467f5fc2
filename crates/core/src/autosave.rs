// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Autosave change tracking for form tabs.
//!
//! Edits apply locally and immediately; the pending set accumulates
//! dotted-path changes until a debounce window closes, then drains as one
//! batched PATCH. A failed flush re-queues the batch under any newer
//! edits (no automatic retry beyond the next window). Calculated fields
//! returned by the backend are authoritative and locally read-only.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::error::CoreError;

/// The pending changed paths since the last successful flush.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PendingChanges {
    changes: BTreeMap<String, Value>,
}

impl PendingChanges {
    /// Creates an empty pending set.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            changes: BTreeMap::new(),
        }
    }

    /// Records a change at a dotted path, replacing any earlier pending
    /// value for the same path.
    pub fn record(&mut self, path: impl Into<String>, value: Value) {
        self.changes.insert(path.into(), value);
    }

    /// Returns whether nothing is pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    /// Number of pending paths.
    #[must_use]
    pub fn len(&self) -> usize {
        self.changes.len()
    }

    /// Drains the pending set into a flush batch: the union of all
    /// changed paths with their final values.
    #[must_use]
    pub fn take_batch(&mut self) -> BTreeMap<String, Value> {
        std::mem::take(&mut self.changes)
    }

    /// Re-queues a failed batch. Paths edited again since the flush keep
    /// their newer pending values.
    pub fn requeue(&mut self, batch: BTreeMap<String, Value>) {
        for (path, value) in batch {
            self.changes.entry(path).or_insert(value);
        }
    }

    /// Returns the pending value at a path.
    #[must_use]
    pub fn get(&self, path: &str) -> Option<&Value> {
        self.changes.get(path)
    }
}

/// Per-field validation errors, keyed by dotted path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    errors: BTreeMap<String, String>,
}

impl FieldErrors {
    /// Creates an empty error map.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            errors: BTreeMap::new(),
        }
    }

    /// Records an error for a field, replacing any previous one.
    pub fn set(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.errors.insert(path.into(), message.into());
    }

    /// Clears the error for a field.
    pub fn clear(&mut self, path: &str) {
        self.errors.remove(path);
    }

    /// Returns the error for a field.
    #[must_use]
    pub fn get(&self, path: &str) -> Option<&str> {
        self.errors.get(path).map(String::as_str)
    }

    /// Returns whether any field error is recorded.
    #[must_use]
    pub fn any(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// The autosave engine state for one form tab.
#[derive(Debug, Clone, Default)]
pub struct AutosaveState {
    /// Pending changed paths.
    pub pending: PendingChanges,
    /// Per-field validation errors.
    pub field_errors: FieldErrors,
    /// The general save-failure banner message, if any.
    pub general_error: Option<String>,
    /// Backend-authoritative calculated values, keyed by dotted path.
    calculated: BTreeMap<String, Value>,
}

impl AutosaveState {
    /// Creates a fresh autosave state.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            pending: PendingChanges::new(),
            field_errors: FieldErrors::new(),
            general_error: None,
            calculated: BTreeMap::new(),
        }
    }

    /// Records a field edit: validates, clears any prior error for the
    /// path, and queues the change for the next flush window.
    ///
    /// Validation failures are recorded in the per-field error map and
    /// block only that field's save; other pending paths are unaffected.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::CalculatedFieldReadOnly` if the path is a
    /// backend-calculated field.
    pub fn record_change(
        &mut self,
        path: &str,
        value: Value,
        validate: impl Fn(&str, &Value) -> Result<(), String>,
    ) -> Result<(), CoreError> {
        if self.calculated.contains_key(path) {
            return Err(CoreError::CalculatedFieldReadOnly(path.to_owned()));
        }

        match validate(path, &value) {
            Ok(()) => {
                self.field_errors.clear(path);
                self.pending.record(path, value);
            }
            Err(message) => {
                self.field_errors.set(path, message);
            }
        }
        Ok(())
    }

    /// Drains the pending set for a flush. Also clears the general error:
    /// a new flush attempt supersedes the stale banner.
    #[must_use]
    pub fn begin_flush(&mut self) -> BTreeMap<String, Value> {
        self.general_error = None;
        self.pending.take_batch()
    }

    /// Applies a successful flush response: calculated fields merge in
    /// as backend-authoritative values.
    pub fn flush_succeeded(&mut self, calculated: BTreeMap<String, Value>) {
        self.general_error = None;
        for (path, value) in calculated {
            self.calculated.insert(path, value);
        }
    }

    /// Applies a failed flush: the batch re-queues for the next window
    /// and the general banner message is set.
    pub fn flush_failed(&mut self, batch: BTreeMap<String, Value>, message: impl Into<String>) {
        self.pending.requeue(batch);
        self.general_error = Some(message.into());
    }

    /// Returns the backend-authoritative value for a calculated path.
    #[must_use]
    pub fn calculated(&self, path: &str) -> Option<&Value> {
        self.calculated.get(path)
    }
}
