// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use journey_board_domain::{Journey, JourneyId, StageId};

use super::helpers::create_test_journey;
use crate::buckets::{StageBuckets, derive_buckets};
use crate::error::CoreError;

fn id(value: &str) -> JourneyId {
    JourneyId::new(value)
}

#[test]
fn test_new_index_has_all_six_empty_buckets() {
    let buckets: StageBuckets = StageBuckets::new();
    for stage in StageId::ALL {
        assert!(buckets.ids(stage).is_empty());
    }
    assert!(buckets.is_empty());
}

#[test]
fn test_derive_buckets_groups_by_stage_in_input_order() {
    let journeys: Vec<Journey> = vec![
        create_test_journey("1", StageId::Lead),
        create_test_journey("2", StageId::Negotiation),
        create_test_journey("3", StageId::Lead),
    ];

    let buckets: StageBuckets = derive_buckets(&journeys);

    assert_eq!(buckets.ids(StageId::Lead), &[id("1"), id("3")]);
    assert_eq!(buckets.ids(StageId::Negotiation), &[id("2")]);
    assert_eq!(buckets.len(), 3);
}

#[test]
fn test_stage_of_walks_the_index() {
    let journeys: Vec<Journey> = vec![
        create_test_journey("1", StageId::Qualified),
        create_test_journey("2", StageId::ClosedWon),
    ];
    let buckets: StageBuckets = derive_buckets(&journeys);

    assert_eq!(buckets.stage_of(&id("1")), Some(StageId::Qualified));
    assert_eq!(buckets.stage_of(&id("2")), Some(StageId::ClosedWon));
    assert_eq!(buckets.stage_of(&id("99")), None);
}

#[test]
fn test_remove_and_insert_at() {
    let journeys: Vec<Journey> = vec![
        create_test_journey("1", StageId::Lead),
        create_test_journey("2", StageId::Lead),
    ];
    let mut buckets: StageBuckets = derive_buckets(&journeys);

    let removed: Option<(StageId, usize)> = buckets.remove(&id("1"));
    assert_eq!(removed, Some((StageId::Lead, 0)));
    assert_eq!(buckets.ids(StageId::Lead), &[id("2")]);

    buckets.insert_at(StageId::Qualified, 5, id("1"));
    assert_eq!(buckets.ids(StageId::Qualified), &[id("1")]);
}

#[test]
fn test_move_within_clamps_destination() {
    let journeys: Vec<Journey> = vec![
        create_test_journey("1", StageId::Lead),
        create_test_journey("2", StageId::Lead),
        create_test_journey("3", StageId::Lead),
    ];
    let mut buckets: StageBuckets = derive_buckets(&journeys);

    buckets.move_within(StageId::Lead, 0, 99);
    assert_eq!(buckets.ids(StageId::Lead), &[id("2"), id("3"), id("1")]);

    buckets.move_within(StageId::Lead, 2, 0);
    assert_eq!(buckets.ids(StageId::Lead), &[id("1"), id("2"), id("3")]);
}

#[test]
fn test_validate_accepts_exactly_one_bucket_each() {
    let journeys: Vec<Journey> = vec![
        create_test_journey("1", StageId::Lead),
        create_test_journey("2", StageId::Negotiation),
    ];
    let buckets: StageBuckets = derive_buckets(&journeys);
    let expected: Vec<JourneyId> = vec![id("1"), id("2")];

    assert!(buckets.validate(&expected).is_ok());
}

#[test]
fn test_validate_rejects_missing_journey() {
    let buckets: StageBuckets = StageBuckets::new();
    let result: Result<(), CoreError> = buckets.validate(&[id("1")]);

    assert_eq!(
        result,
        Err(CoreError::BucketInvariantViolation {
            journey: id("1"),
            occurrences: 0,
        })
    );
}

#[test]
fn test_validate_rejects_duplicated_journey() {
    let mut buckets: StageBuckets = StageBuckets::new();
    buckets.push(StageId::Lead, id("1"));
    buckets.push(StageId::Qualified, id("1"));

    let result: Result<(), CoreError> = buckets.validate(&[id("1")]);
    assert_eq!(
        result,
        Err(CoreError::BucketInvariantViolation {
            journey: id("1"),
            occurrences: 2,
        })
    );
}
