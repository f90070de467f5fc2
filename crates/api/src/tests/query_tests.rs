// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use journey_board_domain::{FilterState, Priority, SortDirection, SortField};

use crate::client::{JourneyQuery, sort_column};
use crate::conditions::{ConditionTree, build_conditions};

#[test]
fn test_sort_fields_map_to_legacy_columns() {
    assert_eq!(sort_column(SortField::Name), "Project_Name");
    assert_eq!(sort_column(SortField::Value), "Journey_Value");
    assert_eq!(sort_column(SortField::Stage), "Journey_Stage");
    assert_eq!(sort_column(SortField::Confidence), "Chance_To_Secure_order");
    assert_eq!(sort_column(SortField::Priority), "Priority");
    assert_eq!(sort_column(SortField::CreatedAt), "CreateDT");
    assert_eq!(sort_column(SortField::UpdatedAt), "Action_Date");
    assert_eq!(
        sort_column(SortField::ExpectedDecisionDate),
        "Expected_Decision_Date"
    );
}

#[test]
fn test_query_pairs_without_filters() {
    let query: JourneyQuery = JourneyQuery {
        page: 2,
        limit: 50,
        sort: SortField::CreatedAt,
        order: SortDirection::Desc,
        conditions: ConditionTree::new(),
    };

    let pairs: Vec<(String, String)> = query.to_query_pairs().unwrap();
    assert_eq!(
        pairs,
        vec![
            (String::from("page"), String::from("2")),
            (String::from("limit"), String::from("50")),
            (String::from("sort"), String::from("CreateDT")),
            (String::from("order"), String::from("desc")),
        ]
    );
}

#[test]
fn test_query_pairs_carry_the_filter_json() {
    let mut state: FilterState = FilterState::default();
    state.priority = Some(Priority::A);

    let query: JourneyQuery = JourneyQuery {
        page: 1,
        limit: 25,
        sort: SortField::Value,
        order: SortDirection::Asc,
        conditions: build_conditions(&state),
    };

    let pairs: Vec<(String, String)> = query.to_query_pairs().unwrap();
    let filter: &String = &pairs
        .iter()
        .find(|(key, _)| key == "filter")
        .map(|(_, value)| value.clone())
        .unwrap();

    let json: serde_json::Value = serde_json::from_str(filter).unwrap();
    assert!(json.get("filters").unwrap().is_array());
}
