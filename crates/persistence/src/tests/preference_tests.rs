// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use journey_board_domain::{FilterState, StageId, ViewMode};

use crate::{PreferenceStore, keys};

#[test]
fn test_load_missing_key_returns_default() {
    let mut store: PreferenceStore = PreferenceStore::new_in_memory().unwrap();

    let term: String = store.load(keys::SEARCH_TERM, String::from("fallback"));
    assert_eq!(term, "fallback");
}

#[test]
fn test_save_then_load_round_trips() {
    let mut store: PreferenceStore = PreferenceStore::new_in_memory().unwrap();

    store.save(keys::SEARCH_TERM, &String::from("metalsa"));
    let term: String = store.load(keys::SEARCH_TERM, String::new());
    assert_eq!(term, "metalsa");
}

#[test]
fn test_save_overwrites_previous_value() {
    let mut store: PreferenceStore = PreferenceStore::new_in_memory().unwrap();

    store.save(keys::VIEW_MODE, &ViewMode::Kanban);
    store.save(keys::VIEW_MODE, &ViewMode::List);

    let mode: ViewMode = store.load(keys::VIEW_MODE, ViewMode::Kanban);
    assert_eq!(mode, ViewMode::List);
}

#[test]
fn test_filter_state_round_trips() {
    let mut store: PreferenceStore = PreferenceStore::new_in_memory().unwrap();

    let mut filters: FilterState = FilterState::default();
    filters.search = String::from("tag:expansion");
    filters.visible_stages = vec![StageId::Negotiation, StageId::ClosedWon];
    filters.show_disabled = true;

    store.save(keys::FILTERS, &filters);
    let loaded: FilterState = store.load(keys::FILTERS, FilterState::default());
    assert_eq!(loaded, filters);
}

#[test]
fn test_corrupt_value_falls_back_to_default() {
    let mut store: PreferenceStore = PreferenceStore::new_in_memory().unwrap();

    // A string is stored where a number is expected.
    store.save(keys::KANBAN_BATCH_SIZE, &String::from("not a number"));
    let size: u16 = store.load(keys::KANBAN_BATCH_SIZE, 50);
    assert_eq!(size, 50);
}

#[test]
fn test_try_load_surfaces_corrupt_values() {
    let mut store: PreferenceStore = PreferenceStore::new_in_memory().unwrap();

    store.save(keys::KANBAN_BATCH_SIZE, &String::from("garbage"));
    let result = store.try_load::<u16>(keys::KANBAN_BATCH_SIZE);
    assert!(result.is_err());
}

#[test]
fn test_stores_are_isolated() {
    let mut first: PreferenceStore = PreferenceStore::new_in_memory().unwrap();
    let mut second: PreferenceStore = PreferenceStore::new_in_memory().unwrap();

    first.save(keys::SEARCH_TERM, &String::from("only in first"));
    let term: String = second.load(keys::SEARCH_TERM, String::new());
    assert_eq!(term, "");
}
