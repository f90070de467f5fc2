// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! View-mode data source states.
//!
//! The three views fetch under different regimes and stay independent:
//! the baseline bulk set (projections and client-side-only filtering),
//! the server-paginated list, and the client-capped Kanban
//! batch. Each carries its own loading flag and its own monotonic
//! request-sequence guard; a slow response from a superseded fetch is
//! discarded instead of clobbering newer data.
//!
//! Fetch failures keep the previously-held journeys: the board degrades
//! to stale data with an error note, never to an empty view.

use journey_board_domain::{Journey, KanbanBatchSize};

/// Upper bound for the baseline bulk fetch.
pub const BASELINE_FETCH_LIMIT: u32 = 1600;

/// A token identifying one fetch against its source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestToken(u64);

/// A monotonic request-sequence guard.
///
/// `begin` issues a strictly increasing token; only the most recently
/// issued token is accepted when its response lands.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestSeq {
    latest: u64,
}

impl RequestSeq {
    /// Creates a guard with no outstanding requests.
    #[must_use]
    pub const fn new() -> Self {
        Self { latest: 0 }
    }

    /// Issues the token for a new fetch, superseding all earlier ones.
    pub const fn begin(&mut self) -> RequestToken {
        self.latest += 1;
        RequestToken(self.latest)
    }

    /// Returns whether a token is still the newest.
    #[must_use]
    pub const fn is_current(&self, token: RequestToken) -> bool {
        token.0 == self.latest
    }
}

/// The shared per-source state: journeys, loading flag, error note, and
/// the sequence guard.
#[derive(Debug, Clone, Default)]
pub struct SourceState {
    journeys: Vec<Journey>,
    loading: bool,
    error: Option<String>,
    seq: RequestSeq,
}

impl SourceState {
    /// Creates an empty source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The currently-held journeys. Stale until the first fetch
    /// completes; failed fetches leave it in place.
    #[must_use]
    pub fn journeys(&self) -> &[Journey] {
        &self.journeys
    }

    /// Mutable access to the held journeys, for reconciling local
    /// optimistic updates (stage commits, disabled toggles) without a
    /// refetch.
    #[must_use]
    pub fn journeys_mut(&mut self) -> &mut Vec<Journey> {
        &mut self.journeys
    }

    /// Whether a fetch is in flight.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    /// The most recent fetch error, cleared by the next success.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Marks a fetch as started and returns its token.
    pub const fn begin_fetch(&mut self) -> RequestToken {
        self.loading = true;
        self.seq.begin()
    }

    /// Applies a successful fetch, unless the token is stale.
    ///
    /// Returns whether the result was applied.
    pub fn complete(&mut self, token: RequestToken, journeys: Vec<Journey>) -> bool {
        if !self.seq.is_current(token) {
            return false;
        }
        self.journeys = journeys;
        self.error = None;
        self.loading = false;
        true
    }

    /// Applies a failed fetch, unless the token is stale: the previous
    /// journeys stay, the error note is recorded.
    ///
    /// Returns whether the failure was applied.
    pub fn fail(&mut self, token: RequestToken, error: String) -> bool {
        if !self.seq.is_current(token) {
            return false;
        }
        self.error = Some(error);
        self.loading = false;
        true
    }
}

/// The baseline source: one bounded bulk fetch, unfiltered, used by the
/// projections view and as the seed for client-side-only filtering paths
/// such as tag search.
#[derive(Debug, Clone, Default)]
pub struct BaselineSource {
    /// The shared source state.
    pub state: SourceState,
}

/// Pagination facts reported by the server for the list view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListPagination {
    /// Current page, 1-based.
    pub page: u32,
    /// Server-reported total row count.
    pub total: u64,
    /// Server-reported page count.
    pub total_pages: u32,
    /// Page size.
    pub limit: u32,
}

impl Default for ListPagination {
    fn default() -> Self {
        Self {
            page: 1,
            total: 0,
            total_pages: 0,
            limit: 50,
        }
    }
}

/// The list source: server-paginated and server-sorted; refetches on
/// page, sort, or filter changes.
#[derive(Debug, Clone, Default)]
pub struct ListSource {
    /// The shared source state.
    pub state: SourceState,
    /// Server-reported pagination for the current page.
    pub pagination: ListPagination,
}

impl ListSource {
    /// Applies a successful page fetch with its pagination facts, unless
    /// the token is stale.
    pub fn complete_page(
        &mut self,
        token: RequestToken,
        journeys: Vec<Journey>,
        pagination: ListPagination,
    ) -> bool {
        if self.state.complete(token, journeys) {
            self.pagination = pagination;
            true
        } else {
            false
        }
    }
}

/// The Kanban source: server-filtered, client-capped batch.
#[derive(Debug, Clone, Default)]
pub struct KanbanSource {
    /// The shared source state.
    pub state: SourceState,
    /// The client-side batch cap.
    pub batch_size: KanbanBatchSize,
}

impl KanbanSource {
    /// Applies a successful batch fetch, truncating to the batch cap,
    /// unless the token is stale.
    pub fn complete_batch(&mut self, token: RequestToken, mut journeys: Vec<Journey>) -> bool {
        journeys.truncate(self.batch_size.value() as usize);
        self.state.complete(token, journeys)
    }
}
