// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use journey_board_domain::{Journey, KanbanBatchSize, StageId};

use super::helpers::create_test_journey;
use crate::sources::{
    KanbanSource, ListPagination, ListSource, RequestSeq, RequestToken, SourceState,
};

#[test]
fn test_request_seq_accepts_only_newest_token() {
    let mut seq: RequestSeq = RequestSeq::new();
    let first: RequestToken = seq.begin();
    let second: RequestToken = seq.begin();

    assert!(!seq.is_current(first));
    assert!(seq.is_current(second));
}

#[test]
fn test_stale_response_cannot_clobber_newer_data() {
    let mut source: SourceState = SourceState::new();

    // A slow fetch starts, then a faster one supersedes it.
    let slow: RequestToken = source.begin_fetch();
    let fast: RequestToken = source.begin_fetch();

    assert!(source.complete(fast, vec![create_test_journey("new", StageId::Lead)]));
    // The slow response resolves afterwards and is discarded.
    assert!(!source.complete(slow, vec![create_test_journey("old", StageId::Lead)]));

    assert_eq!(source.journeys().len(), 1);
    assert_eq!(source.journeys()[0].id.value(), "new");
}

#[test]
fn test_loading_flag_lifecycle() {
    let mut source: SourceState = SourceState::new();
    assert!(!source.is_loading());

    let token: RequestToken = source.begin_fetch();
    assert!(source.is_loading());

    source.complete(token, Vec::new());
    assert!(!source.is_loading());
}

#[test]
fn test_failure_keeps_stale_journeys() {
    let mut source: SourceState = SourceState::new();
    let token: RequestToken = source.begin_fetch();
    source.complete(token, vec![create_test_journey("1", StageId::Lead)]);

    let token: RequestToken = source.begin_fetch();
    assert!(source.fail(token, String::from("connection refused")));

    // Degrades to the previous data instead of clearing the view.
    assert_eq!(source.journeys().len(), 1);
    assert_eq!(source.error(), Some("connection refused"));
    assert!(!source.is_loading());
}

#[test]
fn test_success_clears_previous_error() {
    let mut source: SourceState = SourceState::new();
    let token: RequestToken = source.begin_fetch();
    source.fail(token, String::from("boom"));

    let token: RequestToken = source.begin_fetch();
    source.complete(token, Vec::new());
    assert_eq!(source.error(), None);
}

#[test]
fn test_stale_failure_is_ignored() {
    let mut source: SourceState = SourceState::new();
    let slow: RequestToken = source.begin_fetch();
    let fast: RequestToken = source.begin_fetch();

    source.complete(fast, vec![create_test_journey("1", StageId::Lead)]);
    assert!(!source.fail(slow, String::from("timeout")));
    assert_eq!(source.error(), None);
}

#[test]
fn test_list_source_records_pagination() {
    let mut list: ListSource = ListSource::default();
    let token: RequestToken = list.state.begin_fetch();

    let applied: bool = list.complete_page(
        token,
        vec![create_test_journey("1", StageId::Lead)],
        ListPagination {
            page: 2,
            total: 131,
            total_pages: 3,
            limit: 50,
        },
    );

    assert!(applied);
    assert_eq!(list.pagination.page, 2);
    assert_eq!(list.pagination.total, 131);
    assert_eq!(list.pagination.total_pages, 3);
}

#[test]
fn test_kanban_source_truncates_to_batch_cap() {
    let mut kanban: KanbanSource = KanbanSource {
        batch_size: KanbanBatchSize::TwentyFive,
        ..KanbanSource::default()
    };

    let journeys: Vec<Journey> = (0..40)
        .map(|i| create_test_journey(&i.to_string(), StageId::Lead))
        .collect();
    let token = kanban.state.begin_fetch();
    assert!(kanban.complete_batch(token, journeys));

    assert_eq!(kanban.state.journeys().len(), 25);
}
