// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Free-text search: the `tag:` query grammar and the fuzzy matcher.

/// The tag portion of a search query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagQuery {
    /// `tag:` with no suffix: journeys that have at least one tag.
    AnyTag,
    /// `tag:<term>`: journeys with a tag whose description contains the
    /// term, case-insensitively.
    Term(String),
}

/// A parsed search query: an optional tag constraint plus residual
/// free text applied as a fuzzy match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    /// The tag constraint, when the query contains a `tag:` token.
    pub tag: Option<TagQuery>,
    /// The residual free text after stripping the `tag:` token.
    pub text: String,
}

impl SearchQuery {
    /// Returns whether the query constrains nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tag.is_none() && self.text.is_empty()
    }
}

/// Parses a raw search string.
///
/// The first whitespace-delimited token starting with `tag:` becomes the
/// tag constraint; everything else is joined back into the fuzzy text.
#[must_use]
pub fn parse_search(raw: &str) -> SearchQuery {
    let mut tag: Option<TagQuery> = None;
    let mut text_parts: Vec<&str> = Vec::new();

    for token in raw.split_whitespace() {
        if tag.is_none()
            && let Some(term) = token.strip_prefix("tag:")
        {
            tag = Some(if term.is_empty() {
                TagQuery::AnyTag
            } else {
                TagQuery::Term(term.to_owned())
            });
        } else {
            text_parts.push(token);
        }
    }

    SearchQuery {
        tag,
        text: text_parts.join(" "),
    }
}

/// Strips a string to lowercase alphanumerics.
fn clean(s: &str) -> String {
    s.chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Fuzzy-matches a query against a text.
///
/// Three tiers, cheapest first:
/// 1. direct case-insensitive substring match;
/// 2. substring match after stripping all non-alphanumerics from both;
/// 3. subsequence match: every query character found in order (not
///    necessarily contiguous) in the cleaned text.
///
/// An empty query matches everything.
#[must_use]
pub fn fuzzy_match(text: &str, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }

    let text_lower: String = text.to_lowercase();
    let query_lower: String = query.to_lowercase();
    if text_lower.contains(&query_lower) {
        return true;
    }

    let clean_text: String = clean(text);
    let clean_query: String = clean(query);
    if clean_text.contains(&clean_query) {
        return true;
    }

    let mut query_chars = clean_query.chars().peekable();
    for c in clean_text.chars() {
        if query_chars.peek() == Some(&c) {
            query_chars.next();
        }
    }
    query_chars.peek().is_none()
}
