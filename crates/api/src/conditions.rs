// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The server-side filter-condition grammar.
//!
//! Paginated fetches push filtering to the legacy service as a JSON
//! `{"filters": [...]}` query parameter. Each condition names a legacy
//! column, an operator, and its values; conditions AND together, and
//! same-dimension alternatives ride in one condition's value list (OR).
//!
//! [`ConditionTree::matches`] evaluates a tree over a raw legacy row with
//! the service's documented coercions (numeric value, legacy dates with
//! the `0000-00-00` sentinel, classified stages, parsed confidence). It
//! exists so the equivalence contract is testable: for any non-tag filter
//! state, [`build_conditions`] over raw rows must select exactly the ids
//! the client-side filter engine selects over the adapted rows.

use journey_board_domain::{
    Confidence, FilterState, LegacyJourneyRecord, Priority, SearchQuery, StageId, classify_stage,
    fuzzy_match, normalize_legacy_datetime, parse_search,
};
use serde::{Deserialize, Serialize};
use time::Date;
use time::macros::format_description;

/// Wire format for date bounds (`YYYY-MM-DD`).
const DATE_BOUND_FORMAT: &[time::format_description::BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]");

/// Legacy column names for the client's filterable fields.
///
/// This mapping is the single source of truth for pushing client filter
/// dimensions down to the legacy service.
pub mod columns {
    /// Currency value.
    pub const VALUE: &str = "Journey_Value";
    /// Free-text confidence.
    pub const CONFIDENCE: &str = "Chance_To_Secure_order";
    /// Expected decision date.
    pub const EXPECTED_DECISION_DATE: &str = "Expected_Decision_Date";
    /// Creation timestamp.
    pub const CREATED_AT: &str = "CreateDT";
    /// Last action timestamp.
    pub const UPDATED_AT: &str = "Action_Date";
    /// Free-text priority.
    pub const PRIORITY: &str = "Priority";
    /// Regional sales manager initials.
    pub const RSM: &str = "RSM";
    /// Free-text journey status.
    pub const STATUS: &str = "Journey_Status";
    /// Free-text stage.
    pub const STAGE: &str = "Journey_Stage";
    /// Soft-delete flag.
    pub const DELETED: &str = "deletedAt";
    /// The service's virtual search column: display name (project name,
    /// else target account, else `Journey {id}`) plus target account.
    pub const SEARCH: &str = "journey_search";
}

/// A filter operator understood by the legacy service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConditionOperator {
    /// Case-insensitive equality against any of the values.
    In,
    /// Case-insensitive substring match.
    Contains,
    /// The service's three-tier fuzzy match (substring, cleaned
    /// substring, subsequence) over the virtual search column.
    Fuzzy,
    /// Numeric coercion, at least.
    NumberAtLeast,
    /// Numeric coercion, at most.
    NumberAtMost,
    /// Legacy date coercion, on or after (rows without a parseable date
    /// never match).
    DateOnOrAfter,
    /// Legacy date coercion, on or before (rows without a parseable date
    /// never match).
    DateOnOrBefore,
    /// Parsed confidence equals any of the numeric values; rows without
    /// a parseable confidence count as zero.
    ConfidenceIn,
    /// Normalized priority equality.
    PriorityEquals,
    /// Classified stage id equals any of the numeric values.
    StageIn,
    /// Soft-delete flag equality (`0` enabled, `1` disabled).
    FlagEquals,
}

/// One filter condition: a legacy column, an operator, and its values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Condition {
    /// The legacy column (or virtual column) name.
    pub field: String,
    /// The operator.
    pub operator: ConditionOperator,
    /// The operator's values. `In`-family operators OR over these.
    pub values: Vec<String>,
}

impl Condition {
    /// Creates a condition with a single value.
    #[must_use]
    pub fn new(field: &str, operator: ConditionOperator, value: impl Into<String>) -> Self {
        Self {
            field: field.to_owned(),
            operator,
            values: vec![value.into()],
        }
    }

    /// Creates a condition with multiple OR'd values.
    #[must_use]
    pub fn with_values(field: &str, operator: ConditionOperator, values: Vec<String>) -> Self {
        Self {
            field: field.to_owned(),
            operator,
            values,
        }
    }
}

/// A conjunctive tree of filter conditions, serialized as the legacy
/// service's `{"filters": [...]}` query parameter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConditionTree {
    /// The AND'd conditions.
    pub filters: Vec<Condition>,
}

impl ConditionTree {
    /// Creates an empty (match-everything) tree.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            filters: Vec::new(),
        }
    }

    /// Returns whether the tree constrains nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Adds a condition.
    pub fn push(&mut self, condition: Condition) {
        self.filters.push(condition);
    }

    /// Serializes the tree for the `filter` query parameter.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_query_value(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Evaluates the tree over a raw legacy row with the service's
    /// coercion rules.
    #[must_use]
    pub fn matches(&self, record: &LegacyJourneyRecord) -> bool {
        self.filters
            .iter()
            .all(|condition| condition_matches(condition, record))
    }
}

/// Returns the raw text of a legacy column, `None` for absent values and
/// unknown columns.
fn column_value<'a>(record: &'a LegacyJourneyRecord, field: &str) -> Option<&'a str> {
    match field {
        columns::VALUE => record.journey_value.as_deref(),
        columns::CONFIDENCE => record.chance_to_secure_order.as_deref(),
        columns::EXPECTED_DECISION_DATE => record.expected_decision_date.as_deref(),
        columns::CREATED_AT => record.create_dt.as_deref(),
        // The last-activity column falls back to the creation timestamp,
        // the same coercion the adapter applies to `updated_at`.
        columns::UPDATED_AT => record.action_date.as_deref().or(record.create_dt.as_deref()),
        columns::PRIORITY => record.priority.as_deref(),
        columns::RSM => record.rsm.as_deref(),
        columns::STATUS => record.journey_status.as_deref(),
        columns::STAGE => record.journey_stage.as_deref(),
        columns::DELETED => record.deleted_at.as_deref(),
        _ => None,
    }
}

/// The virtual search column: the row's display name plus its target
/// account, exactly as the client's searchable text is assembled after
/// adaptation.
fn search_text(record: &LegacyJourneyRecord) -> String {
    let name: String = record
        .project_name
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map_or_else(
            || {
                record
                    .target_account
                    .as_deref()
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map_or_else(
                        || format!("Journey {}", record.id.as_deref().unwrap_or_default()),
                        str::to_owned,
                    )
            },
            str::to_owned,
        );

    match record
        .target_account
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
    {
        Some(company) => format!("{name} {company}"),
        None => name,
    }
}

/// Evaluates one condition over a raw row.
#[allow(clippy::too_many_lines)]
fn condition_matches(condition: &Condition, record: &LegacyJourneyRecord) -> bool {
    match condition.operator {
        ConditionOperator::In => {
            let value: &str = column_value(record, &condition.field).unwrap_or_default();
            condition
                .values
                .iter()
                .any(|wanted| wanted.eq_ignore_ascii_case(value))
        }
        ConditionOperator::Contains => {
            let value: String = column_value(record, &condition.field)
                .unwrap_or_default()
                .to_lowercase();
            condition
                .values
                .iter()
                .any(|wanted| value.contains(&wanted.to_lowercase()))
        }
        ConditionOperator::Fuzzy => {
            let haystack: String = search_text(record);
            condition
                .values
                .iter()
                .all(|query| fuzzy_match(&haystack, query))
        }
        ConditionOperator::NumberAtLeast | ConditionOperator::NumberAtMost => {
            let value: f64 = parse_number(column_value(record, &condition.field));
            condition.values.iter().all(|bound| {
                bound.parse::<f64>().is_ok_and(|b| {
                    if condition.operator == ConditionOperator::NumberAtLeast {
                        value >= b
                    } else {
                        value <= b
                    }
                })
            })
        }
        ConditionOperator::DateOnOrAfter | ConditionOperator::DateOnOrBefore => {
            let Some(date) = column_value(record, &condition.field)
                .and_then(normalize_legacy_datetime)
                .map(|dt| dt.date())
            else {
                return false;
            };
            condition.values.iter().all(|bound| {
                Date::parse(bound, DATE_BOUND_FORMAT).is_ok_and(|b| {
                    if condition.operator == ConditionOperator::DateOnOrAfter {
                        date >= b
                    } else {
                        date <= b
                    }
                })
            })
        }
        ConditionOperator::ConfidenceIn => {
            let level: u8 = column_value(record, &condition.field)
                .and_then(Confidence::parse_legacy)
                .map_or(0, Confidence::value);
            condition
                .values
                .iter()
                .any(|wanted| wanted.parse::<u8>().is_ok_and(|w| w == level))
        }
        ConditionOperator::PriorityEquals => {
            let priority: Priority =
                Priority::normalize(column_value(record, &condition.field).unwrap_or_default());
            condition
                .values
                .iter()
                .any(|wanted| Priority::parse(wanted).is_ok_and(|w| w == priority))
        }
        ConditionOperator::StageIn => {
            let stage: StageId =
                classify_stage(column_value(record, &condition.field).unwrap_or_default());
            condition
                .values
                .iter()
                .any(|wanted| wanted.parse::<u8>().is_ok_and(|w| w == stage.number()))
        }
        ConditionOperator::FlagEquals => {
            let raw: &str = column_value(record, &condition.field).unwrap_or("0");
            let flag: &str = if raw.trim() == "1" || raw.trim() == "true" {
                "1"
            } else {
                "0"
            };
            condition.values.iter().any(|wanted| wanted == flag)
        }
    }
}

/// Coerces a legacy numeric column the way the service does: commas
/// stripped, unparseable and negative values to zero.
fn parse_number(raw: Option<&str>) -> f64 {
    let parsed: f64 = raw
        .map(|s| s.trim().replace(',', ""))
        .and_then(|s| s.parse::<f64>().ok())
        .unwrap_or(0.0);
    if parsed.is_finite() && parsed > 0.0 {
        parsed
    } else {
        0.0
    }
}

/// Builds the server-side condition tree equivalent to a client filter
/// state.
///
/// The `tag:` constraint never appears here: tags live outside the legacy
/// backend, so tag searches are served from the baseline set instead of a
/// server round-trip. Every other dimension maps through the
/// [`columns`] table, with same-dimension alternatives OR'd inside one
/// condition and dimensions AND'd across conditions.
#[must_use]
pub fn build_conditions(state: &FilterState) -> ConditionTree {
    let mut tree: ConditionTree = ConditionTree::new();
    let query: SearchQuery = parse_search(&state.search);

    if !query.text.is_empty() {
        tree.push(Condition::new(
            columns::SEARCH,
            ConditionOperator::Fuzzy,
            query.text,
        ));
    }

    if !state.confidence_levels.is_empty() {
        tree.push(Condition::with_values(
            columns::CONFIDENCE,
            ConditionOperator::ConfidenceIn,
            state
                .confidence_levels
                .iter()
                .map(ToString::to_string)
                .collect(),
        ));
    }

    let date_column: &str = match state.date_field {
        journey_board_domain::DateField::ExpectedDecisionDate => columns::EXPECTED_DECISION_DATE,
        journey_board_domain::DateField::CreatedAt => columns::CREATED_AT,
        journey_board_domain::DateField::UpdatedAt => columns::UPDATED_AT,
    };
    if let Some(start) = state.date_range.0 {
        tree.push(Condition::new(
            date_column,
            ConditionOperator::DateOnOrAfter,
            format_date(start),
        ));
    }
    if let Some(end) = state.date_range.1 {
        tree.push(Condition::new(
            date_column,
            ConditionOperator::DateOnOrBefore,
            format_date(end),
        ));
    }

    if let Some(priority) = state.priority {
        tree.push(Condition::new(
            columns::PRIORITY,
            ConditionOperator::PriorityEquals,
            priority.as_str(),
        ));
    }

    if let Some(min) = state.min_value {
        tree.push(Condition::new(
            columns::VALUE,
            ConditionOperator::NumberAtLeast,
            min.to_string(),
        ));
    }
    if let Some(max) = state.max_value {
        tree.push(Condition::new(
            columns::VALUE,
            ConditionOperator::NumberAtMost,
            max.to_string(),
        ));
    }

    // All six stages visible is no constraint.
    if state.visible_stages.len() < StageId::ALL.len() {
        tree.push(Condition::with_values(
            columns::STAGE,
            ConditionOperator::StageIn,
            state
                .visible_stages
                .iter()
                .map(|stage| stage.number().to_string())
                .collect(),
        ));
    }

    if !state.rsm_filter.is_empty() {
        tree.push(Condition::new(
            columns::RSM,
            ConditionOperator::Contains,
            state.rsm_filter.clone(),
        ));
    }

    if !state.journey_status_filter.is_empty() {
        tree.push(Condition::with_values(
            columns::STATUS,
            ConditionOperator::In,
            state.journey_status_filter.clone(),
        ));
    }

    if !state.show_disabled {
        tree.push(Condition::new(
            columns::DELETED,
            ConditionOperator::FlagEquals,
            "0",
        ));
    }

    tree
}

/// Formats a filter date bound for the wire (`YYYY-MM-DD`).
fn format_date(date: Date) -> String {
    format!(
        "{:04}-{:02}-{:02}",
        date.year(),
        u8::from(date.month()),
        date.day()
    )
}
