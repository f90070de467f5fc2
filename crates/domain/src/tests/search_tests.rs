// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::search::{SearchQuery, TagQuery, fuzzy_match, parse_search};

#[test]
fn test_fuzzy_empty_query_matches_everything() {
    assert!(fuzzy_match("Metalsa Inc", ""));
    assert!(fuzzy_match("", ""));
}

#[test]
fn test_fuzzy_direct_substring() {
    assert!(fuzzy_match("Metalsa Inc", "metalsa"));
    assert!(fuzzy_match("Metalsa Inc", "INC"));
}

#[test]
fn test_fuzzy_cleaned_substring() {
    // Punctuation and spacing differences are ignored.
    assert!(fuzzy_match("Metalsa, Inc.", "metalsainc"));
    assert!(fuzzy_match("A-B-C Stamping", "abc"));
}

#[test]
fn test_fuzzy_subsequence() {
    assert!(fuzzy_match("Metalsa Inc", "mtlsa"));
    assert!(fuzzy_match("Journey Board", "jrnbrd"));
}

#[test]
fn test_fuzzy_rejects_non_matches() {
    assert!(!fuzzy_match("Metalsa Inc", "xyz"));
    // Subsequence requires order.
    assert!(!fuzzy_match("Metalsa Inc", "aslatem"));
}

#[test]
fn test_parse_search_plain_text() {
    let query: SearchQuery = parse_search("metalsa press");
    assert_eq!(query.tag, None);
    assert_eq!(query.text, "metalsa press");
}

#[test]
fn test_parse_search_bare_tag_token() {
    let query: SearchQuery = parse_search("tag:");
    assert_eq!(query.tag, Some(TagQuery::AnyTag));
    assert_eq!(query.text, "");
}

#[test]
fn test_parse_search_tag_with_term() {
    let query: SearchQuery = parse_search("tag:priority");
    assert_eq!(query.tag, Some(TagQuery::Term(String::from("priority"))));
    assert_eq!(query.text, "");
}

#[test]
fn test_parse_search_tag_and_residual_text() {
    let query: SearchQuery = parse_search("metalsa tag:expansion press");
    assert_eq!(query.tag, Some(TagQuery::Term(String::from("expansion"))));
    assert_eq!(query.text, "metalsa press");
}

#[test]
fn test_parse_search_only_first_tag_token_counts() {
    let query: SearchQuery = parse_search("tag:a tag:b");
    assert_eq!(query.tag, Some(TagQuery::Term(String::from("a"))));
    assert_eq!(query.text, "tag:b");
}

#[test]
fn test_parse_search_empty() {
    let query: SearchQuery = parse_search("   ");
    assert!(query.is_empty());
}
