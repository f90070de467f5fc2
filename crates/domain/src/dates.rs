// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Legacy datetime normalization.
//!
//! The legacy backend stores timestamps as free text in two shapes:
//! `YYYY-MM-DD` and `YYYY-MM-DD HH:MM:SS`. It also uses the sentinel
//! `0000-00-00` (optionally with a time suffix) for "no date". Both shapes
//! normalize to a single [`PrimitiveDateTime`] representation; the sentinel
//! and anything unparseable normalize to absent, never to an epoch or an
//! invalid date.

use time::macros::format_description;
use time::{Date, PrimitiveDateTime, Time};

/// The legacy "no date" sentinel prefix.
const LEGACY_NULL_DATE: &str = "0000-00-00";

/// Format for the date-only legacy shape.
const DATE_FORMAT: &[time::format_description::BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]");

/// Format for the datetime legacy shape.
const DATETIME_FORMAT: &[time::format_description::BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");

/// Format for the normalized ISO-8601 representation.
const ISO_FORMAT: &[time::format_description::BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]");

/// Normalizes a legacy timestamp string.
///
/// Returns `None` for empty input, the `0000-00-00` sentinel (including
/// datetime-prefixed variants such as `0000-00-00 00:00:00`), and any value
/// the parser rejects. Date-only values normalize to midnight.
#[must_use]
pub fn normalize_legacy_datetime(raw: &str) -> Option<PrimitiveDateTime> {
    let s: &str = raw.trim();
    if s.is_empty() || s.starts_with(LEGACY_NULL_DATE) {
        return None;
    }

    // Datetime shape first; fractional seconds are truncated.
    let without_fraction: &str = s.split('.').next().unwrap_or(s);
    if let Ok(datetime) = PrimitiveDateTime::parse(without_fraction, DATETIME_FORMAT) {
        return Some(datetime);
    }

    // ISO "T" separator variant, produced by earlier normalization passes.
    let with_space: String = without_fraction.replacen('T', " ", 1);
    if let Ok(datetime) = PrimitiveDateTime::parse(&with_space, DATETIME_FORMAT) {
        return Some(datetime);
    }

    // Date-only shape.
    Date::parse(s, DATE_FORMAT)
        .ok()
        .map(|date| PrimitiveDateTime::new(date, Time::MIDNIGHT))
}

/// Formats a datetime in the normalized ISO-8601 representation
/// (`YYYY-MM-DDTHH:MM:SS`).
#[must_use]
pub fn format_iso(datetime: PrimitiveDateTime) -> String {
    datetime
        .format(ISO_FORMAT)
        .unwrap_or_else(|_| datetime.to_string())
}

/// Serde helpers for `Option<PrimitiveDateTime>` in the normalized
/// ISO-8601 representation.
pub mod iso_option {
    use serde::{Deserialize, Deserializer, Serializer};
    use time::PrimitiveDateTime;

    use super::{format_iso, normalize_legacy_datetime};

    /// Serializes an optional datetime as an ISO-8601 string or null.
    ///
    /// # Errors
    ///
    /// Returns any error produced by the underlying serializer.
    pub fn serialize<S>(
        value: &Option<PrimitiveDateTime>,
        serializer: S,
    ) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(datetime) => serializer.serialize_str(&format_iso(*datetime)),
            None => serializer.serialize_none(),
        }
    }

    /// Deserializes an optional datetime from either legacy shape.
    ///
    /// Unparseable values deserialize to `None` rather than failing: the
    /// adapter contract is total over malformed legacy data.
    ///
    /// # Errors
    ///
    /// Returns any error produced by the underlying deserializer.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<PrimitiveDateTime>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        Ok(raw.as_deref().and_then(normalize_legacy_datetime))
    }
}
