// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the Journey Board.
//!
//! This crate stores view preferences and named filter presets in a
//! local `SQLite` database via Diesel, with embedded migrations.
//!
//! ## Best-effort contract
//!
//! Preference reads and writes are best-effort: a board whose
//! preference store is broken still has to render. [`PreferenceStore::load`]
//! falls back to the supplied default on any failure and
//! [`PreferenceStore::save`] logs and swallows errors. The fallible
//! `try_*` variants exist for callers (and tests) that need to observe
//! failures; presets use fallible operations throughout because preset
//! management is an explicit user action, not ambient state.
//!
//! ## Testing
//!
//! Tests run against unique shared in-memory databases; an atomic
//! counter (not a timestamp) names each one, eliminating collisions.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

use diesel::SqliteConnection;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::warn;

mod backend;
mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;

#[cfg(test)]
mod tests;

pub use data_models::Preset;
pub use error::PersistenceError;

/// Atomic counter for generating unique in-memory database names.
///
/// This ensures deterministic test isolation by eliminating time-based
/// collisions. Each call to `new_in_memory()` receives a unique
/// sequential ID.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Well-known preference keys.
///
/// One key per persisted view preference, mirroring what the board
/// persists on every change.
pub mod keys {
    /// The raw search term.
    pub const SEARCH_TERM: &str = "search_term";
    /// The compound filter state.
    pub const FILTERS: &str = "filters";
    /// The RSM filter.
    pub const RSM_FILTER: &str = "rsm_filter";
    /// The active view mode.
    pub const VIEW_MODE: &str = "view_mode";
    /// The active sort field.
    pub const SORT_FIELD: &str = "sort_field";
    /// The active sort direction.
    pub const SORT_DIRECTION: &str = "sort_direction";
    /// Whether tags are shown on Kanban cards.
    pub const SHOW_TAGS: &str = "show_tags";
    /// The Kanban batch cap.
    pub const KANBAN_BATCH_SIZE: &str = "kanban_batch_size";
    /// Whether disabled journeys are shown.
    pub const SHOW_DISABLED_JOURNEYS: &str = "show_disabled_journeys";
}

/// The preference and preset store.
pub struct PreferenceStore {
    conn: SqliteConnection,
}

impl PreferenceStore {
    /// Creates a store backed by a unique shared in-memory `SQLite`
    /// database.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id: u64 = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let db_name: String = format!("memdb_prefs_{db_id}");
        let shared_memory_url: String = format!("file:{db_name}?mode=memory&cache=shared");

        let conn: SqliteConnection = backend::sqlite::initialize_database(&shared_memory_url)?;
        Ok(Self { conn })
    }

    /// Creates a store backed by a file-based `SQLite` database.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the `SQLite` database file
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str: &str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(path_str)?;
        backend::sqlite::enable_wal_mode(&mut conn)?;
        Ok(Self { conn })
    }

    /// Loads a preference, falling back to the default when the key is
    /// absent, the value fails to deserialize, or the store errors.
    pub fn load<T: DeserializeOwned>(&mut self, key: &str, default: T) -> T {
        match self.try_load::<T>(key) {
            Ok(Some(value)) => value,
            Ok(None) => default,
            Err(e) => {
                warn!(key, error = %e, "Preference load failed, using default");
                default
            }
        }
    }

    /// Saves a preference. Failures are logged and swallowed.
    pub fn save<T: Serialize>(&mut self, key: &str, value: &T) {
        if let Err(e) = self.try_save(key, value) {
            warn!(key, error = %e, "Preference save failed");
        }
    }

    /// Loads a preference, surfacing failures.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or the stored JSON does not
    /// deserialize.
    pub fn try_load<T: DeserializeOwned>(&mut self, key: &str) -> Result<Option<T>, PersistenceError> {
        let Some(json) = queries::get_preference_json(&mut self.conn, key)? else {
            return Ok(None);
        };
        Ok(Some(serde_json::from_str(&json)?))
    }

    /// Saves a preference, surfacing failures.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    pub fn try_save<T: Serialize>(&mut self, key: &str, value: &T) -> Result<(), PersistenceError> {
        let json: String = serde_json::to_string(value)?;
        mutations::set_preference_json(&mut self.conn, key, &json)
    }

    /// Lists all stored presets, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_presets(&mut self) -> Result<Vec<Preset>, PersistenceError> {
        queries::list_presets(&mut self.conn)
    }

    /// Saves a named preset snapshot, returning the stored preset.
    ///
    /// # Arguments
    ///
    /// * `name` - The preset display name
    /// * `created_at` - Creation timestamp (ISO 8601)
    /// * `preferences` - The view preferences to snapshot
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the insert fails.
    pub fn save_preset(
        &mut self,
        name: &str,
        created_at: &str,
        preferences: &journey_board_domain::ViewPreferences,
    ) -> Result<Preset, PersistenceError> {
        let state_json: String = serde_json::to_string(preferences)?;
        let id: i64 = mutations::insert_preset(&mut self.conn, name, created_at, &state_json)?;
        Ok(Preset {
            id,
            name: name.to_owned(),
            created_at: created_at.to_owned(),
            preferences: preferences.clone(),
        })
    }

    /// Loads a preset by id.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::PresetNotFound` if no such preset
    /// exists.
    pub fn load_preset(&mut self, id: i64) -> Result<Preset, PersistenceError> {
        queries::get_preset(&mut self.conn, id)
    }

    /// Deletes a preset by id.
    ///
    /// Confirmation is a UI concern; the data layer deletes
    /// unconditionally.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::PresetNotFound` if no such preset
    /// exists.
    pub fn delete_preset(&mut self, id: i64) -> Result<(), PersistenceError> {
        mutations::delete_preset(&mut self.conn, id)
    }
}
