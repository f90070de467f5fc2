// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! State-changing operations on the preference store.

use diesel::prelude::*;

use crate::backend::sqlite::get_last_insert_rowid;
use crate::data_models::{NewPresetRow, PreferenceRow};
use crate::diesel_schema;
use crate::error::PersistenceError;

/// Upserts the JSON value for a preference key.
///
/// # Errors
///
/// Returns an error if the write fails.
pub fn set_preference_json(
    conn: &mut SqliteConnection,
    key: &str,
    value_json: &str,
) -> Result<(), PersistenceError> {
    let row: PreferenceRow = PreferenceRow {
        pref_key: key.to_owned(),
        value_json: value_json.to_owned(),
    };

    diesel::insert_into(diesel_schema::preferences::table)
        .values(&row)
        .on_conflict(diesel_schema::preferences::pref_key)
        .do_update()
        .set(diesel_schema::preferences::value_json.eq(value_json))
        .execute(conn)?;
    Ok(())
}

/// Inserts a preset snapshot, returning its assigned id.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn insert_preset(
    conn: &mut SqliteConnection,
    name: &str,
    created_at: &str,
    state_json: &str,
) -> Result<i64, PersistenceError> {
    let row: NewPresetRow = NewPresetRow {
        name: name.to_owned(),
        created_at: created_at.to_owned(),
        state_json: state_json.to_owned(),
    };

    diesel::insert_into(diesel_schema::presets::table)
        .values(&row)
        .execute(conn)?;

    get_last_insert_rowid(conn)
}

/// Deletes a preset by id.
///
/// # Errors
///
/// Returns `PersistenceError::PresetNotFound` if no row was deleted.
pub fn delete_preset(conn: &mut SqliteConnection, id: i64) -> Result<(), PersistenceError> {
    let deleted: usize = diesel::delete(
        diesel_schema::presets::table.filter(diesel_schema::presets::preset_id.eq(id)),
    )
    .execute(conn)?;

    if deleted == 0 {
        return Err(PersistenceError::PresetNotFound(id));
    }
    Ok(())
}
