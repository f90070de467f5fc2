// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Request and response types for the board API surface.

use journey_board_domain::{Journey, JourneyId, MonthlyProjection, StageId, Tag};
use serde::{Deserialize, Serialize};

/// A drop target reference on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetRef {
    /// A stage column, by numeric stage id.
    Column(u8),
    /// A card, by journey id.
    Card(String),
}

/// Request to move a journey (keyboard path or drag end).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoveJourneyRequest {
    /// The journey to move.
    pub journey_id: String,
    /// Where it drops.
    pub target: TargetRef,
}

/// One rendered Kanban column.
#[derive(Debug, Clone, Serialize)]
pub struct BoardColumn {
    /// The stage id.
    pub stage: StageId,
    /// The stage display label.
    pub label: &'static str,
    /// The stage weight.
    pub weight: f64,
    /// The column's journeys in display order.
    pub journeys: Vec<Journey>,
    /// Sum of raw values in the column.
    pub total_value: f64,
    /// Sum of weighted values in the column.
    pub weighted_value: f64,
}

/// The Kanban board snapshot.
#[derive(Debug, Clone, Serialize)]
pub struct KanbanBoardResponse {
    /// Visible columns in pipeline order.
    pub columns: Vec<BoardColumn>,
    /// Total pipeline value over the filtered set.
    pub total_pipeline_value: f64,
    /// Weighted pipeline value over the filtered set.
    pub weighted_pipeline_value: f64,
    /// Whether the Kanban source is mid-fetch; the previous snapshot
    /// remains usable behind a non-blocking overlay.
    pub loading: bool,
    /// The most recent fetch error, when the snapshot is stale.
    pub error: Option<String>,
    /// Tags per journey, present when tag display is enabled.
    pub tags: Vec<(JourneyId, Vec<Tag>)>,
}

/// Server-reported pagination facts.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PaginationInfo {
    /// Current page, 1-based.
    pub page: u32,
    /// Total row count.
    pub total: u64,
    /// Total page count.
    pub total_pages: u32,
    /// Page size.
    pub limit: u32,
}

/// The list view snapshot.
#[derive(Debug, Clone, Serialize)]
pub struct ListBoardResponse {
    /// The page's journeys in server sort order.
    pub journeys: Vec<Journey>,
    /// Pagination facts.
    pub pagination: PaginationInfo,
    /// Whether the list source is mid-fetch.
    pub loading: bool,
    /// The most recent fetch error, when the snapshot is stale.
    pub error: Option<String>,
}

/// The projections view snapshot.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectionsResponse {
    /// Per-month rollups.
    pub months: Vec<MonthlyProjection>,
    /// Total weighted projection over all months.
    pub total_weighted_projection: f64,
    /// Number of journeys in the filtered set.
    pub total_deals: usize,
    /// Average raw value per journey.
    pub avg_value_per_deal: f64,
    /// Average journey age in whole days.
    pub avg_deal_age_days: i64,
}

/// A preset summary on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PresetInfo {
    /// The preset id.
    pub id: i64,
    /// The preset display name.
    pub name: String,
    /// Creation timestamp (ISO 8601).
    pub created_at: String,
}
