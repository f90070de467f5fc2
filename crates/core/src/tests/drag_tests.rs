// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use journey_board_domain::{Journey, JourneyId, StageId};

use super::helpers::{create_test_actor, create_test_cause, create_test_journey};
use crate::buckets::{StageBuckets, derive_buckets};
use crate::drag::{DragEngine, DragOutcome, DropTarget, GestureState};
use crate::error::CoreError;

fn id(value: &str) -> JourneyId {
    JourneyId::new(value)
}

fn create_test_engine() -> DragEngine {
    let journeys: Vec<Journey> = vec![
        create_test_journey("1", StageId::Qualified),
        create_test_journey("2", StageId::Qualified),
        create_test_journey("3", StageId::Negotiation),
    ];
    DragEngine::new(derive_buckets(&journeys))
}

#[test]
fn test_cross_stage_drag_produces_commit_and_audit_event() {
    let mut engine: DragEngine = create_test_engine();

    engine.drag_start(id("1")).unwrap();
    engine
        .drag_over(&DropTarget::Column(StageId::Negotiation))
        .unwrap();
    let outcome: DragOutcome = engine
        .drag_end(
            Some(&DropTarget::Column(StageId::Negotiation)),
            &create_test_actor(),
            &create_test_cause(),
        )
        .unwrap();

    let commit = outcome.commit.unwrap();
    assert_eq!(commit.journey, id("1"));
    assert_eq!(commit.from, StageId::Qualified);
    assert_eq!(commit.to, StageId::Negotiation);

    let event = outcome.audit_event.unwrap();
    assert_eq!(event.action.name, "MoveStage");
    assert_eq!(
        event.action.details.as_deref(),
        Some("Journey_Stage: FROM Qualified TO Negotiation")
    );

    // The id moved buckets: in Negotiation, not in Qualified.
    assert_eq!(engine.buckets().stage_of(&id("1")), Some(StageId::Negotiation));
    assert_eq!(engine.buckets().ids(StageId::Qualified), &[id("2")]);
}

#[test]
fn test_bucket_assignment_survives_backend_failure() {
    // The commit intent is handed to the caller; whether its PATCH
    // succeeds or fails, the local index already reflects the drop and is
    // not rolled back. Every id still sits in exactly one bucket.
    let mut engine: DragEngine = create_test_engine();

    engine.drag_start(id("1")).unwrap();
    engine
        .drag_over(&DropTarget::Column(StageId::Negotiation))
        .unwrap();
    let outcome: DragOutcome = engine
        .drag_end(
            Some(&DropTarget::Column(StageId::Negotiation)),
            &create_test_actor(),
            &create_test_cause(),
        )
        .unwrap();
    assert!(outcome.commit.is_some());

    // No rollback API exists; the assertion below is the whole contract.
    let expected: Vec<JourneyId> = vec![id("1"), id("2"), id("3")];
    assert!(engine.buckets().validate(&expected).is_ok());
    assert_eq!(engine.buckets().stage_of(&id("1")), Some(StageId::Negotiation));
}

#[test]
fn test_drag_over_splices_before_hovered_card() {
    let mut engine: DragEngine = create_test_engine();

    engine.drag_start(id("1")).unwrap();
    engine.drag_over(&DropTarget::Card(id("3"))).unwrap();

    // Spliced into Negotiation ahead of the hovered card.
    assert_eq!(engine.buckets().ids(StageId::Negotiation), &[id("1"), id("3")]);
    assert_eq!(engine.buckets().ids(StageId::Qualified), &[id("2")]);
}

#[test]
fn test_drag_over_column_splices_to_top() {
    let mut engine: DragEngine = create_test_engine();

    engine.drag_start(id("2")).unwrap();
    engine
        .drag_over(&DropTarget::Column(StageId::Negotiation))
        .unwrap();

    assert_eq!(engine.buckets().ids(StageId::Negotiation), &[id("2"), id("3")]);
}

#[test]
fn test_same_stage_drop_reorders_without_commit() {
    let mut engine: DragEngine = create_test_engine();

    engine.drag_start(id("1")).unwrap();
    let outcome: DragOutcome = engine
        .drag_end(
            Some(&DropTarget::Card(id("2"))),
            &create_test_actor(),
            &create_test_cause(),
        )
        .unwrap();

    assert_eq!(outcome.commit, None);
    assert_eq!(outcome.audit_event, None);
    assert_eq!(engine.buckets().ids(StageId::Qualified), &[id("2"), id("1")]);
}

#[test]
fn test_drop_on_own_column_is_a_reorder_to_bottom() {
    let mut engine: DragEngine = create_test_engine();

    engine.drag_start(id("1")).unwrap();
    let outcome: DragOutcome = engine
        .drag_end(
            Some(&DropTarget::Column(StageId::Qualified)),
            &create_test_actor(),
            &create_test_cause(),
        )
        .unwrap();

    assert_eq!(outcome.commit, None);
    assert_eq!(engine.buckets().ids(StageId::Qualified), &[id("2"), id("1")]);
}

#[test]
fn test_drop_without_target_commits_nothing() {
    let mut engine: DragEngine = create_test_engine();

    engine.drag_start(id("1")).unwrap();
    engine.drag_over(&DropTarget::Card(id("3"))).unwrap();
    let outcome: DragOutcome = engine
        .drag_end(None, &create_test_actor(), &create_test_cause())
        .unwrap();

    // The optimistic splice stays; nothing commits.
    assert_eq!(outcome.commit, None);
    assert_eq!(engine.buckets().stage_of(&id("1")), Some(StageId::Negotiation));
    assert_eq!(*engine.gesture(), GestureState::Idle);
}

#[test]
fn test_round_trip_back_to_original_stage_commits_nothing() {
    let mut engine: DragEngine = create_test_engine();

    engine.drag_start(id("1")).unwrap();
    engine
        .drag_over(&DropTarget::Column(StageId::Negotiation))
        .unwrap();
    engine
        .drag_over(&DropTarget::Column(StageId::Qualified))
        .unwrap();
    let outcome: DragOutcome = engine
        .drag_end(
            Some(&DropTarget::Column(StageId::Qualified)),
            &create_test_actor(),
            &create_test_cause(),
        )
        .unwrap();

    assert_eq!(outcome.commit, None);
    assert_eq!(engine.buckets().stage_of(&id("1")), Some(StageId::Qualified));
}

#[test]
fn test_keyboard_move_has_identical_resolution() {
    let mut engine: DragEngine = create_test_engine();

    let outcome: DragOutcome = engine
        .move_journey(
            id("1"),
            &DropTarget::Card(id("3")),
            &create_test_actor(),
            &create_test_cause(),
        )
        .unwrap();

    let commit = outcome.commit.unwrap();
    assert_eq!(commit.from, StageId::Qualified);
    assert_eq!(commit.to, StageId::Negotiation);
    assert_eq!(engine.buckets().stage_of(&id("1")), Some(StageId::Negotiation));
}

#[test]
fn test_keyboard_move_rejects_unresolvable_target() {
    let mut engine: DragEngine = create_test_engine();

    let result = engine.move_journey(
        id("1"),
        &DropTarget::Card(id("404")),
        &create_test_actor(),
        &create_test_cause(),
    );

    assert_eq!(result, Err(CoreError::DropTargetUnresolved));
    // Nothing moved and no gesture leaked.
    assert_eq!(engine.buckets().stage_of(&id("1")), Some(StageId::Qualified));
    assert_eq!(*engine.gesture(), GestureState::Idle);
}

#[test]
fn test_drag_start_requires_known_journey() {
    let mut engine: DragEngine = create_test_engine();
    assert_eq!(
        engine.drag_start(id("404")),
        Err(CoreError::JourneyNotFound(id("404")))
    );
}

#[test]
fn test_drag_events_require_active_gesture() {
    let mut engine: DragEngine = create_test_engine();
    assert_eq!(
        engine.drag_over(&DropTarget::Column(StageId::Lead)),
        Err(CoreError::NoActiveGesture)
    );
    assert!(matches!(
        engine.drag_end(None, &create_test_actor(), &create_test_cause()),
        Err(CoreError::NoActiveGesture)
    ));
    assert_eq!(engine.drag_cancel(), Err(CoreError::NoActiveGesture));
}

#[test]
fn test_second_drag_start_is_rejected() {
    let mut engine: DragEngine = create_test_engine();
    engine.drag_start(id("1")).unwrap();
    assert_eq!(
        engine.drag_start(id("2")),
        Err(CoreError::GestureAlreadyActive(id("1")))
    );
}

#[test]
fn test_mid_gesture_rebuild_is_deferred_until_drop() {
    let mut engine: DragEngine = create_test_engine();

    engine.drag_start(id("1")).unwrap();
    engine
        .drag_over(&DropTarget::Column(StageId::Negotiation))
        .unwrap();

    // A refresh lands mid-gesture with the journey still in Qualified
    // (the server has not seen the move yet) and a new journey "4".
    let refreshed: StageBuckets = derive_buckets(&[
        create_test_journey("1", StageId::Qualified),
        create_test_journey("2", StageId::Qualified),
        create_test_journey("3", StageId::Negotiation),
        create_test_journey("4", StageId::Lead),
    ]);
    engine.rebuild(refreshed);

    // The gesture still sees its optimistic placement.
    assert_eq!(engine.buckets().stage_of(&id("1")), Some(StageId::Negotiation));

    let outcome: DragOutcome = engine
        .drag_end(
            Some(&DropTarget::Column(StageId::Negotiation)),
            &create_test_actor(),
            &create_test_cause(),
        )
        .unwrap();
    assert!(outcome.commit.is_some());

    // The deferred rebuild applied, with the drop re-applied on top.
    assert_eq!(engine.buckets().stage_of(&id("1")), Some(StageId::Negotiation));
    assert_eq!(engine.buckets().stage_of(&id("4")), Some(StageId::Lead));
    let expected: Vec<JourneyId> = vec![id("1"), id("2"), id("3"), id("4")];
    assert!(engine.buckets().validate(&expected).is_ok());
}

#[test]
fn test_idle_rebuild_applies_immediately() {
    let mut engine: DragEngine = create_test_engine();
    let refreshed: StageBuckets = derive_buckets(&[create_test_journey("9", StageId::Lead)]);

    engine.rebuild(refreshed);
    assert_eq!(engine.buckets().stage_of(&id("9")), Some(StageId::Lead));
    assert_eq!(engine.buckets().len(), 1);
}

#[test]
fn test_cancel_keeps_optimistic_placement() {
    let mut engine: DragEngine = create_test_engine();

    engine.drag_start(id("1")).unwrap();
    engine.drag_over(&DropTarget::Card(id("3"))).unwrap();
    engine.drag_cancel().unwrap();

    assert_eq!(*engine.gesture(), GestureState::Idle);
    assert_eq!(engine.buckets().stage_of(&id("1")), Some(StageId::Negotiation));
}
