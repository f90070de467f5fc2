// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The client-side filter engine and pipeline value calculations.
//!
//! All filter dimensions are optional and conjunctive: an absent filter is
//! no constraint, and a journey must satisfy every present dimension. The
//! server-side condition builder in the API crate mirrors these predicates
//! over legacy column names; the two must select the same id set for any
//! non-tag filter state.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use time::{Date, PrimitiveDateTime};

use crate::error::DomainError;
use crate::search::{SearchQuery, TagQuery, fuzzy_match, parse_search};
use crate::stage::StageId;
use crate::types::{
    Confidence, Journey, JourneyId, KanbanBatchSize, Priority, SortDirection, SortField, TagIndex,
    ViewMode,
};

/// The journey date field a date-range filter applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateField {
    /// Expected decision date.
    #[default]
    ExpectedDecisionDate,
    /// Creation timestamp.
    CreatedAt,
    /// Last-activity timestamp.
    UpdatedAt,
}

impl DateField {
    /// Returns the filtered date from a journey.
    #[must_use]
    pub const fn of(self, journey: &Journey) -> Option<PrimitiveDateTime> {
        match self {
            Self::ExpectedDecisionDate => journey.expected_decision_date,
            Self::CreatedAt => journey.created_at,
            Self::UpdatedAt => journey.updated_at,
        }
    }
}

/// The full compound filter state.
///
/// Initialized from persisted storage, mutated by the UI, persisted on
/// every change, and snapshotted into named presets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterState {
    /// Free-text search, including the `tag:` grammar.
    pub search: String,
    /// Exact confidence levels to include; empty means no constraint.
    pub confidence_levels: Vec<u8>,
    /// Inclusive date range over [`Self::date_field`].
    pub date_range: (Option<Date>, Option<Date>),
    /// Which journey date the range applies to.
    pub date_field: DateField,
    /// Priority equality filter.
    pub priority: Option<Priority>,
    /// Minimum journey value.
    pub min_value: Option<f64>,
    /// Maximum journey value.
    pub max_value: Option<f64>,
    /// The stages shown on the board.
    pub visible_stages: Vec<StageId>,
    /// Substring filter over the RSM initials.
    pub rsm_filter: String,
    /// Journey status set membership; empty means no constraint.
    pub journey_status_filter: Vec<String>,
    /// Whether soft-deleted (disabled) journeys are shown.
    pub show_disabled: bool,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            search: String::new(),
            confidence_levels: Vec::new(),
            date_range: (None, None),
            date_field: DateField::default(),
            priority: None,
            min_value: None,
            max_value: None,
            visible_stages: StageId::ALL.to_vec(),
            rsm_filter: String::new(),
            journey_status_filter: Vec::new(),
            show_disabled: false,
        }
    }
}

/// The persisted view configuration: filters plus sort and view choices.
///
/// This is the unit a named preset snapshots; loading a preset replaces
/// the whole structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewPreferences {
    /// The compound filter state.
    pub filter: FilterState,
    /// The active sort field.
    pub sort_field: SortField,
    /// The active sort direction.
    pub sort_direction: SortDirection,
    /// The active view.
    pub view_mode: ViewMode,
    /// Whether tags are rendered on Kanban cards.
    pub show_tags: bool,
    /// The Kanban batch cap.
    pub kanban_batch_size: KanbanBatchSize,
}

/// Validates a filter state's internal consistency.
///
/// # Errors
///
/// Returns an error if the value range is inverted, the date range is
/// inverted, a confidence level exceeds 100, or no stage is visible.
pub fn validate_filter_state(state: &FilterState) -> Result<(), DomainError> {
    if let (Some(min), Some(max)) = (state.min_value, state.max_value)
        && min > max
    {
        return Err(DomainError::InvalidValueRange { min, max });
    }
    if let (Some(start), Some(end)) = state.date_range
        && start > end
    {
        return Err(DomainError::InvalidDateRange {
            start: start.to_string(),
            end: end.to_string(),
        });
    }
    if let Some(level) = state.confidence_levels.iter().find(|&&l| l > 100) {
        return Err(DomainError::InvalidConfidenceLevel(*level));
    }
    if state.visible_stages.is_empty() {
        return Err(DomainError::EmptyVisibleStages);
    }
    Ok(())
}

/// Returns whether a single journey passes every present filter dimension.
fn matches(journey: &Journey, state: &FilterState, query: &SearchQuery, tags: &TagIndex) -> bool {
    if journey.disabled && !state.show_disabled {
        return false;
    }

    match &query.tag {
        Some(TagQuery::AnyTag) if !tags.has_any(&journey.id) => return false,
        Some(TagQuery::Term(term)) if !tags.matches_term(&journey.id, term) => return false,
        _ => {}
    }
    if !query.text.is_empty() && !fuzzy_match(&journey.searchable_text(), &query.text) {
        return false;
    }

    if !state.confidence_levels.is_empty() {
        // An absent confidence counts as zero for level matching.
        let level: u8 = journey.confidence.map_or(0, Confidence::value);
        if !state.confidence_levels.contains(&level) {
            return false;
        }
    }

    if state.date_range.0.is_some() || state.date_range.1.is_some() {
        // A journey without the filtered date is excluded once a range is set.
        let Some(date) = state.date_field.of(journey) else {
            return false;
        };
        if let Some(start) = state.date_range.0
            && date.date() < start
        {
            return false;
        }
        if let Some(end) = state.date_range.1
            && date.date() > end
        {
            return false;
        }
    }

    if let Some(priority) = state.priority
        && journey.priority != priority
    {
        return false;
    }

    if let Some(min) = state.min_value
        && journey.value < min
    {
        return false;
    }
    if let Some(max) = state.max_value
        && journey.value > max
    {
        return false;
    }

    if !state.visible_stages.contains(&journey.stage.stage) {
        return false;
    }

    if !state.rsm_filter.is_empty() {
        let needle: String = state.rsm_filter.to_lowercase();
        let rsm: String = journey.rsm.as_deref().unwrap_or_default().to_lowercase();
        if !rsm.contains(&needle) {
            return false;
        }
    }

    if !state.journey_status_filter.is_empty() {
        let status: &str = journey.journey_status.as_deref().unwrap_or_default();
        if !state
            .journey_status_filter
            .iter()
            .any(|wanted| wanted.eq_ignore_ascii_case(status))
        {
            return false;
        }
    }

    true
}

/// Applies the compound filter over an in-memory journey collection,
/// returning the ids of the journeys that pass, in input order.
#[must_use]
pub fn apply_filters(journeys: &[Journey], state: &FilterState, tags: &TagIndex) -> Vec<JourneyId> {
    let query: SearchQuery = parse_search(&state.search);
    journeys
        .iter()
        .filter(|journey| matches(journey, state, &query, tags))
        .map(|journey| journey.id.clone())
        .collect()
}

/// Sums raw journey values over a set.
#[must_use]
pub fn total_pipeline_value(journeys: &[Journey]) -> f64 {
    journeys.iter().map(|j| j.value).sum()
}

/// Sums stage-weighted journey values over a set: the expected-revenue
/// estimate `Σ value × stage weight`.
#[must_use]
pub fn weighted_pipeline_value(journeys: &[Journey]) -> f64 {
    journeys.iter().map(Journey::weighted_value).sum()
}

/// One month of the projections rollup.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyProjection {
    /// The month key, `YYYY-MM`.
    pub month: String,
    /// Journeys whose expected decision falls in this month.
    pub journey_count: usize,
    /// Sum of raw values.
    pub total_value: f64,
    /// Sum of stage-weighted values.
    pub weighted_value: f64,
    /// Average raw value per journey.
    pub avg_value_per_deal: f64,
    /// Average journey age in whole days, over journeys with a known
    /// creation date.
    pub avg_deal_age_days: i64,
}

/// Rolls the set up into per-month projections keyed by expected decision
/// date, sorted by month. Journeys without an expected decision date are
/// omitted.
#[must_use]
pub fn monthly_projections(journeys: &[Journey], now: PrimitiveDateTime) -> Vec<MonthlyProjection> {
    let mut months: BTreeMap<String, Vec<&Journey>> = BTreeMap::new();
    for journey in journeys {
        if let Some(decision) = journey.expected_decision_date {
            let key: String = format!("{:04}-{:02}", decision.year(), u8::from(decision.month()));
            months.entry(key).or_default().push(journey);
        }
    }

    months
        .into_iter()
        .map(|(month, group)| {
            let total_value: f64 = group.iter().map(|j| j.value).sum();
            let weighted_value: f64 = group.iter().map(|j| j.weighted_value()).sum();
            #[allow(clippy::cast_precision_loss)]
            let count: f64 = group.len() as f64;

            let ages: Vec<i64> = group
                .iter()
                .filter_map(|j| j.created_at)
                .map(|created| (now - created).whole_days())
                .collect();
            #[allow(clippy::cast_possible_wrap)]
            let avg_deal_age_days: i64 = if ages.is_empty() {
                0
            } else {
                ages.iter().sum::<i64>() / ages.len() as i64
            };

            MonthlyProjection {
                month,
                journey_count: group.len(),
                total_value,
                weighted_value,
                avg_value_per_deal: if group.is_empty() {
                    0.0
                } else {
                    total_value / count
                },
                avg_deal_age_days,
            }
        })
        .collect()
}
