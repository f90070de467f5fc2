// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use crate::diesel_schema::{preferences, presets};

/// A preference row: one JSON-serialized value per key.
#[derive(Debug, Clone, Queryable, Insertable, AsChangeset)]
#[diesel(table_name = preferences)]
pub struct PreferenceRow {
    /// The preference key.
    pub pref_key: String,
    /// The JSON-serialized value.
    pub value_json: String,
}

/// A stored preset row.
#[derive(Debug, Clone, Queryable)]
#[diesel(table_name = presets)]
pub struct PresetRow {
    /// The preset identifier.
    pub preset_id: i64,
    /// The preset display name.
    pub name: String,
    /// Creation timestamp (ISO 8601).
    pub created_at: String,
    /// The JSON-serialized view preference snapshot.
    pub state_json: String,
}

/// Insertable preset data (the id is assigned by the database).
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = presets)]
pub struct NewPresetRow {
    /// The preset display name.
    pub name: String,
    /// Creation timestamp (ISO 8601).
    pub created_at: String,
    /// The JSON-serialized view preference snapshot.
    pub state_json: String,
}

/// A named, timestamped snapshot of the full filter/sort/view state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preset {
    /// The preset identifier.
    pub id: i64,
    /// The preset display name.
    pub name: String,
    /// Creation timestamp (ISO 8601).
    pub created_at: String,
    /// The snapshotted view preferences.
    pub preferences: journey_board_domain::ViewPreferences,
}
