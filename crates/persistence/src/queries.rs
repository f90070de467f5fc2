// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-only queries over the preference store.

use diesel::prelude::*;

use crate::data_models::{Preset, PresetRow};
use crate::diesel_schema;
use crate::error::PersistenceError;

/// Fetches the raw JSON value for a preference key, if present.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn get_preference_json(
    conn: &mut SqliteConnection,
    key: &str,
) -> Result<Option<String>, PersistenceError> {
    let value: Option<String> = diesel_schema::preferences::table
        .filter(diesel_schema::preferences::pref_key.eq(key))
        .select(diesel_schema::preferences::value_json)
        .first::<String>(conn)
        .optional()?;
    Ok(value)
}

/// Lists all stored presets, newest first.
///
/// # Errors
///
/// Returns an error if the query fails or a stored snapshot fails to
/// deserialize.
pub fn list_presets(conn: &mut SqliteConnection) -> Result<Vec<Preset>, PersistenceError> {
    let rows: Vec<PresetRow> = diesel_schema::presets::table
        .order(diesel_schema::presets::preset_id.desc())
        .load::<PresetRow>(conn)?;

    rows.into_iter().map(preset_from_row).collect()
}

/// Fetches a single preset by id.
///
/// # Errors
///
/// Returns `PersistenceError::PresetNotFound` if no row exists, or a
/// serialization error if the snapshot fails to deserialize.
pub fn get_preset(conn: &mut SqliteConnection, id: i64) -> Result<Preset, PersistenceError> {
    let row: PresetRow = diesel_schema::presets::table
        .filter(diesel_schema::presets::preset_id.eq(id))
        .first::<PresetRow>(conn)
        .optional()?
        .ok_or(PersistenceError::PresetNotFound(id))?;

    preset_from_row(row)
}

/// Deserializes a preset row into its domain shape.
fn preset_from_row(row: PresetRow) -> Result<Preset, PersistenceError> {
    let preferences: journey_board_domain::ViewPreferences = serde_json::from_str(&row.state_json)?;
    Ok(Preset {
        id: row.preset_id,
        name: row.name,
        created_at: row.created_at,
        preferences,
    })
}
