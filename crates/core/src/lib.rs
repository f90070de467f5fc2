// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod autosave;
mod buckets;
mod collision;
mod drag;
mod error;
mod sources;

#[cfg(test)]
mod tests;

// Re-export public types and functions
pub use autosave::{AutosaveState, FieldErrors, PendingChanges};
pub use buckets::{StageBuckets, derive_buckets};
pub use collision::{DropZone, Point, Rect, resolve_drop_target};
pub use drag::{DragEngine, DragOutcome, DropTarget, GestureState, StageCommit};
pub use error::CoreError;
pub use sources::{
    BASELINE_FETCH_LIMIT, BaselineSource, KanbanSource, ListPagination, ListSource, RequestSeq,
    RequestToken, SourceState,
};
