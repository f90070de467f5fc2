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

mod adapter;
mod dates;
mod error;
mod filter;
mod search;
mod stage;
mod types;

#[cfg(test)]
mod tests;

// Re-export public types
pub use adapter::{LegacyJourneyRecord, adapt};
pub use dates::{format_iso, iso_option, normalize_legacy_datetime};
pub use error::DomainError;
pub use filter::{
    DateField, FilterState, MonthlyProjection, ViewPreferences, apply_filters,
    monthly_projections, total_pipeline_value, validate_filter_state, weighted_pipeline_value,
};
pub use search::{SearchQuery, TagQuery, fuzzy_match, parse_search};
pub use stage::{Stage, StageClassification, StageId, classify_stage};
pub use types::{
    Confidence, Customer, Journey, JourneyId, KanbanBatchSize, Note, NoteKind, Priority,
    SortDirection, SortField, Tag, TagIndex, ViewMode,
};
