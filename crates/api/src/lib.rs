// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Legacy backend boundary layer for the Journey Board.
//!
//! This crate owns everything that talks to, or mirrors the semantics
//! of, the legacy CRM backend: the HTTP client, the server-side filter
//! condition grammar, the board application service that reconciles the
//! three view-mode data sources against the drag engine, debounced
//! autosave flushing, and CSV export.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

mod autosave;
mod board;
mod client;
mod commit;
mod conditions;
mod debounce;
mod error;
mod export;
mod request_response;

#[cfg(test)]
mod tests;

pub use autosave::flush_autosave;
pub use board::Board;
pub use client::{
    ClientError, JourneyContact, JourneyPage, JourneyQuery, LegacyClient, QuoteValue,
    QuoteValueItem, RsmRecord,
};
pub use commit::commit_stage_change;
pub use conditions::{Condition, ConditionOperator, ConditionTree, build_conditions};
pub use debounce::{AUTOSAVE_DEBOUNCE, Debouncer, SEARCH_DEBOUNCE};
pub use error::{ApiError, ApiResult, translate_core_error, translate_domain_error};
pub use export::{EXPORT_HEADERS, ExportRow, build_export_rows, format_currency, write_csv};
pub use request_response::{
    BoardColumn, KanbanBoardResponse, ListBoardResponse, MoveJourneyRequest, PaginationInfo,
    PresetInfo, ProjectionsResponse, TargetRef,
};
