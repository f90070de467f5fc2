// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use journey_board_domain::{
    DateField, FilterState, Journey, JourneyId, LegacyJourneyRecord, Priority, StageId, TagIndex,
    adapt, apply_filters,
};
use time::macros::date;

use crate::conditions::{ConditionOperator, ConditionTree, build_conditions, columns};

/// A varied set of raw rows exercising every filter dimension.
fn create_test_rows() -> Vec<LegacyJourneyRecord> {
    vec![
        LegacyJourneyRecord {
            id: Some(String::from("1")),
            project_name: Some(String::from("Press Line Upgrade")),
            target_account: Some(String::from("Metalsa Inc")),
            journey_stage: Some(String::from("Negotiation")),
            journey_value: Some(String::from("125000")),
            priority: Some(String::from("High")),
            chance_to_secure_order: Some(String::from("90%")),
            expected_decision_date: Some(String::from("2026-03-15")),
            create_dt: Some(String::from("2025-11-01 08:00:00")),
            action_date: Some(String::from("2026-01-10 09:30:00")),
            rsm: Some(String::from("JD")),
            journey_status: Some(String::from("Active")),
            ..LegacyJourneyRecord::default()
        },
        LegacyJourneyRecord {
            id: Some(String::from("2")),
            project_name: None,
            target_account: Some(String::from("Acme Stamping")),
            journey_stage: Some(String::from("Quote Presented")),
            journey_value: Some(String::from("40,000")),
            priority: Some(String::from("Low")),
            chance_to_secure_order: Some(String::from("Closed Lost")),
            expected_decision_date: Some(String::from("0000-00-00")),
            create_dt: Some(String::from("2026-01-05")),
            rsm: Some(String::from("MK")),
            journey_status: Some(String::from("Dormant")),
            ..LegacyJourneyRecord::default()
        },
        LegacyJourneyRecord {
            id: Some(String::from("3")),
            project_name: Some(String::from("Roll Former Retrofit")),
            journey_stage: Some(String::from("Closed Won Order")),
            journey_value: Some(String::from("garbage")),
            chance_to_secure_order: Some(String::from("Closed Won")),
            expected_decision_date: Some(String::from("2026-06-01 00:00:00")),
            create_dt: Some(String::from("2025-06-15 12:00:00")),
            ..LegacyJourneyRecord::default()
        },
        LegacyJourneyRecord {
            id: Some(String::from("4")),
            target_account: Some(String::from("Borealis Metal Works")),
            journey_stage: None,
            journey_value: Some(String::from("75000")),
            priority: Some(String::from("B")),
            expected_decision_date: Some(String::from("2026-03-01")),
            deleted_at: Some(String::from("1")),
            rsm: Some(String::from("JD")),
            journey_status: Some(String::from("Active")),
            ..LegacyJourneyRecord::default()
        },
    ]
}

/// Asserts the equivalence contract: the server tree over raw rows
/// selects exactly the ids the client filter selects over adapted rows.
fn assert_equivalent(state: &FilterState) {
    let rows: Vec<LegacyJourneyRecord> = create_test_rows();
    let adapted: Vec<Journey> = rows.iter().map(adapt).collect();

    let client_ids: Vec<JourneyId> = apply_filters(&adapted, state, &TagIndex::new());

    let tree: ConditionTree = build_conditions(state);
    let server_ids: Vec<JourneyId> = rows
        .iter()
        .filter(|row| tree.matches(row))
        .map(|row| JourneyId::new(row.id.clone().unwrap_or_default()))
        .collect();

    assert_eq!(client_ids, server_ids, "filter state: {state:?}");
}

#[test]
fn test_equivalence_with_no_filters() {
    assert_equivalent(&FilterState::default());
}

#[test]
fn test_equivalence_with_fuzzy_search() {
    for query in ["metalsa", "mtlsa", "acme", "xyz", "roll former"] {
        let mut state: FilterState = FilterState::default();
        state.search = String::from(query);
        assert_equivalent(&state);
    }
}

#[test]
fn test_equivalence_with_confidence_levels() {
    let mut state: FilterState = FilterState::default();
    state.confidence_levels = vec![90, 100];
    assert_equivalent(&state);

    state.confidence_levels = vec![0];
    assert_equivalent(&state);
}

#[test]
fn test_equivalence_with_date_ranges() {
    for field in [
        DateField::ExpectedDecisionDate,
        DateField::CreatedAt,
        DateField::UpdatedAt,
    ] {
        let mut state: FilterState = FilterState::default();
        state.date_field = field;
        state.date_range = (Some(date!(2026 - 01 - 01)), Some(date!(2026 - 04 - 01)));
        assert_equivalent(&state);

        state.date_range = (Some(date!(2026 - 01 - 01)), None);
        assert_equivalent(&state);

        state.date_range = (None, Some(date!(2025 - 12 - 31)));
        assert_equivalent(&state);
    }
}

#[test]
fn test_equivalence_with_priority() {
    for priority in [Priority::A, Priority::B, Priority::C, Priority::D] {
        let mut state: FilterState = FilterState::default();
        state.priority = Some(priority);
        assert_equivalent(&state);
    }
}

#[test]
fn test_equivalence_with_value_range() {
    let mut state: FilterState = FilterState::default();
    state.min_value = Some(50_000.0);
    assert_equivalent(&state);

    state.max_value = Some(100_000.0);
    assert_equivalent(&state);

    state.min_value = None;
    assert_equivalent(&state);
}

#[test]
fn test_equivalence_with_visible_stages() {
    let mut state: FilterState = FilterState::default();
    state.visible_stages = vec![StageId::Presentations, StageId::ClosedWon];
    assert_equivalent(&state);

    state.visible_stages = vec![StageId::Lead];
    assert_equivalent(&state);
}

#[test]
fn test_equivalence_with_rsm_and_status() {
    let mut state: FilterState = FilterState::default();
    state.rsm_filter = String::from("jd");
    assert_equivalent(&state);

    state.journey_status_filter = vec![String::from("active")];
    assert_equivalent(&state);
}

#[test]
fn test_equivalence_with_disabled_journeys() {
    let mut state: FilterState = FilterState::default();
    assert_equivalent(&state);

    state.show_disabled = true;
    assert_equivalent(&state);
}

#[test]
fn test_equivalence_with_compound_filters() {
    let mut state: FilterState = FilterState::default();
    state.search = String::from("metal");
    state.priority = Some(Priority::A);
    state.min_value = Some(100_000.0);
    state.visible_stages = vec![StageId::Negotiation, StageId::ClosedWon];
    state.rsm_filter = String::from("jd");
    state.date_field = DateField::CreatedAt;
    state.date_range = (Some(date!(2025 - 01 - 01)), Some(date!(2026 - 12 - 31)));
    assert_equivalent(&state);
}

#[test]
fn test_tag_search_is_never_pushed_to_the_server() {
    let mut state: FilterState = FilterState::default();
    state.search = String::from("tag:expansion metalsa");

    let tree: ConditionTree = build_conditions(&state);
    // The fuzzy condition carries only the residual text.
    let fuzzy = tree
        .filters
        .iter()
        .find(|c| c.operator == ConditionOperator::Fuzzy)
        .unwrap();
    assert_eq!(fuzzy.values, vec![String::from("metalsa")]);
}

#[test]
fn test_all_stages_visible_is_no_constraint() {
    let state: FilterState = FilterState::default();
    let tree: ConditionTree = build_conditions(&state);
    assert!(
        !tree
            .filters
            .iter()
            .any(|c| c.operator == ConditionOperator::StageIn)
    );
}

#[test]
fn test_tree_serializes_as_filters_array() {
    let mut state: FilterState = FilterState::default();
    state.priority = Some(Priority::A);
    state.min_value = Some(1000.0);

    let tree: ConditionTree = build_conditions(&state);
    let json: serde_json::Value =
        serde_json::from_str(&tree.to_query_value().unwrap()).unwrap();

    let filters = json.get("filters").and_then(|f| f.as_array()).unwrap();
    assert!(filters.iter().any(|f| {
        f.get("field").and_then(|v| v.as_str()) == Some(columns::PRIORITY)
            && f.get("operator").and_then(|v| v.as_str()) == Some("priority_equals")
    }));
    assert!(filters.iter().any(|f| {
        f.get("field").and_then(|v| v.as_str()) == Some(columns::VALUE)
            && f.get("operator").and_then(|v| v.as_str()) == Some("number_at_least")
    }));
}

#[test]
fn test_same_dimension_alternatives_ride_one_condition() {
    let mut state: FilterState = FilterState::default();
    state.confidence_levels = vec![50, 90];
    state.journey_status_filter = vec![String::from("Active"), String::from("Dormant")];

    let tree: ConditionTree = build_conditions(&state);
    let confidence = tree
        .filters
        .iter()
        .find(|c| c.operator == ConditionOperator::ConfidenceIn)
        .unwrap();
    assert_eq!(confidence.values.len(), 2);

    let status = tree
        .filters
        .iter()
        .find(|c| c.field == columns::STATUS)
        .unwrap();
    assert_eq!(status.operator, ConditionOperator::In);
    assert_eq!(status.values.len(), 2);
}
