// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The board application service.
//!
//! `Board` owns the three view-mode data sources, the drag engine, the
//! tag index, the preference store, and the legacy client, and exposes
//! the operations the HTTP layer serves. Preferences persist on every
//! change; fetches run under per-source sequence guards; stage commits
//! fire the backend PATCH plus best-effort audit writes and never roll
//! back the local bucket assignment.

use journey_board::{
    AutosaveState, BASELINE_FETCH_LIMIT, BaselineSource, DragEngine, DragOutcome, DropTarget,
    KanbanSource, ListPagination, ListSource, RequestToken, derive_buckets,
};
use journey_board_audit::{Actor, Cause};
use journey_board_domain::{
    Customer, FilterState, Journey, JourneyId, KanbanBatchSize, Note, NoteKind, SortDirection,
    SortField, StageId, TagIndex, ViewMode, ViewPreferences, adapt, apply_filters,
    monthly_projections, parse_search, total_pipeline_value, validate_filter_state,
    weighted_pipeline_value,
};
use journey_board_persistence::{Preset, PreferenceStore, keys};
use time::OffsetDateTime;
use tracing::{debug, warn};

use crate::autosave::flush_autosave;
use crate::client::{JourneyPage, JourneyQuery, LegacyClient};
use crate::commit::commit_stage_change;
use crate::conditions::build_conditions;
use crate::error::{ApiError, ApiResult, translate_core_error, translate_domain_error};
use crate::export::{ExportRow, build_export_rows, write_csv};
use crate::request_response::{
    BoardColumn, KanbanBoardResponse, ListBoardResponse, MoveJourneyRequest, PaginationInfo,
    PresetInfo, ProjectionsResponse, TargetRef,
};

/// The board application service.
pub struct Board {
    client: LegacyClient,
    store: PreferenceStore,
    prefs: ViewPreferences,
    baseline: BaselineSource,
    list: ListSource,
    kanban: KanbanSource,
    engine: DragEngine,
    tags: TagIndex,
    operator_initials: String,
    gesture_counter: u64,
}

impl Board {
    /// Creates a board, rehydrating preferences from the store.
    #[must_use]
    pub fn new(client: LegacyClient, mut store: PreferenceStore, operator_initials: String) -> Self {
        let mut filter: FilterState = store.load(keys::FILTERS, FilterState::default());
        filter.search = store.load(keys::SEARCH_TERM, filter.search.clone());
        filter.rsm_filter = store.load(keys::RSM_FILTER, filter.rsm_filter.clone());
        filter.show_disabled = store.load(keys::SHOW_DISABLED_JOURNEYS, filter.show_disabled);

        let prefs: ViewPreferences = ViewPreferences {
            filter,
            sort_field: store.load(keys::SORT_FIELD, SortField::default()),
            sort_direction: store.load(keys::SORT_DIRECTION, SortDirection::default()),
            view_mode: store.load(keys::VIEW_MODE, ViewMode::default()),
            show_tags: store.load(keys::SHOW_TAGS, false),
            kanban_batch_size: store.load(keys::KANBAN_BATCH_SIZE, KanbanBatchSize::default()),
        };

        let kanban: KanbanSource = KanbanSource {
            batch_size: prefs.kanban_batch_size,
            ..KanbanSource::default()
        };

        Self {
            client,
            store,
            prefs,
            baseline: BaselineSource::default(),
            list: ListSource::default(),
            kanban,
            engine: DragEngine::default(),
            tags: TagIndex::new(),
            operator_initials,
            gesture_counter: 0,
        }
    }

    /// Returns the current view preferences.
    #[must_use]
    pub const fn preferences(&self) -> &ViewPreferences {
        &self.prefs
    }

    fn persist_filter(&mut self) {
        self.store.save(keys::FILTERS, &self.prefs.filter);
        self.store.save(keys::SEARCH_TERM, &self.prefs.filter.search);
        self.store.save(keys::RSM_FILTER, &self.prefs.filter.rsm_filter);
        self.store
            .save(keys::SHOW_DISABLED_JOURNEYS, &self.prefs.filter.show_disabled);
    }

    /// Replaces the search term.
    pub fn set_search(&mut self, term: String) {
        self.prefs.filter.search = term;
        self.persist_filter();
    }

    /// Replaces the compound filter state.
    ///
    /// # Errors
    ///
    /// Returns an error if the filter state is internally inconsistent.
    pub fn set_filters(&mut self, filter: FilterState) -> ApiResult<()> {
        validate_filter_state(&filter).map_err(translate_domain_error)?;
        self.prefs.filter = filter;
        self.persist_filter();
        Ok(())
    }

    /// Replaces the RSM filter.
    pub fn set_rsm_filter(&mut self, rsm: String) {
        self.prefs.filter.rsm_filter = rsm;
        self.persist_filter();
    }

    /// Switches the active view.
    pub fn set_view_mode(&mut self, mode: ViewMode) {
        self.prefs.view_mode = mode;
        self.store.save(keys::VIEW_MODE, &mode);
    }

    /// Replaces the sort configuration.
    pub fn set_sort(&mut self, field: SortField, direction: SortDirection) {
        self.prefs.sort_field = field;
        self.prefs.sort_direction = direction;
        self.store.save(keys::SORT_FIELD, &field);
        self.store.save(keys::SORT_DIRECTION, &direction);
    }

    /// Toggles tag display on Kanban cards.
    pub fn set_show_tags(&mut self, show: bool) {
        self.prefs.show_tags = show;
        self.store.save(keys::SHOW_TAGS, &show);
    }

    /// Replaces the Kanban batch cap.
    pub fn set_kanban_batch_size(&mut self, size: KanbanBatchSize) {
        self.prefs.kanban_batch_size = size;
        self.kanban.batch_size = size;
        self.store.save(keys::KANBAN_BATCH_SIZE, &size);
    }

    /// Toggles visibility of disabled journeys.
    pub fn set_show_disabled(&mut self, show: bool) {
        self.prefs.filter.show_disabled = show;
        self.persist_filter();
    }

    /// Refetches the unfiltered baseline set.
    pub async fn refresh_baseline(&mut self) {
        let token: RequestToken = self.baseline.state.begin_fetch();
        let query: JourneyQuery = JourneyQuery {
            page: 1,
            limit: BASELINE_FETCH_LIMIT,
            sort: SortField::CreatedAt,
            order: SortDirection::Desc,
            conditions: crate::conditions::ConditionTree::new(),
        };

        match self.client.fetch_journeys(&query).await {
            Ok(page) => {
                let journeys: Vec<Journey> = page.records.iter().map(adapt).collect();
                self.baseline.state.complete(token, journeys);
            }
            Err(e) => {
                warn!(error = %e, "Baseline fetch failed");
                self.baseline.state.fail(token, e.to_string());
            }
        }
    }

    /// Refetches the Kanban batch.
    ///
    /// A search carrying a `tag:` constraint bypasses the server (the
    /// backend cannot filter on client-side tag associations) and slices
    /// the already-fetched baseline set instead.
    pub async fn refresh_kanban(&mut self) {
        let token: RequestToken = self.kanban.state.begin_fetch();

        if parse_search(&self.prefs.filter.search).tag.is_some() {
            let mut journeys: Vec<Journey> = self.filtered_baseline();
            journeys.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
            self.kanban.complete_batch(token, journeys);
        } else {
            let query: JourneyQuery = JourneyQuery {
                page: 1,
                limit: u32::from(self.kanban.batch_size.value()),
                sort: self.prefs.sort_field,
                order: self.prefs.sort_direction,
                conditions: build_conditions(&self.prefs.filter),
            };
            match self.client.fetch_journeys(&query).await {
                Ok(page) => {
                    let journeys: Vec<Journey> = page.records.iter().map(adapt).collect();
                    self.kanban.complete_batch(token, journeys);
                }
                Err(e) => {
                    warn!(error = %e, "Kanban fetch failed");
                    self.kanban.state.fail(token, e.to_string());
                }
            }
        }

        self.engine
            .rebuild(derive_buckets(self.kanban.state.journeys()));
    }

    /// Refetches one page of the list view.
    pub async fn refresh_list(&mut self, page: u32) {
        let token: RequestToken = self.list.state.begin_fetch();
        let limit: u32 = self.list.pagination.limit;
        let query: JourneyQuery = JourneyQuery {
            page,
            limit,
            sort: self.prefs.sort_field,
            order: self.prefs.sort_direction,
            conditions: build_conditions(&self.prefs.filter),
        };

        match self.client.fetch_journeys(&query).await {
            Ok(JourneyPage {
                records,
                total,
                total_pages,
            }) => {
                let journeys: Vec<Journey> = records.iter().map(adapt).collect();
                self.list.complete_page(
                    token,
                    journeys,
                    ListPagination {
                        page,
                        total,
                        total_pages,
                        limit,
                    },
                );
            }
            Err(e) => {
                warn!(error = %e, "List fetch failed");
                self.list.state.fail(token, e.to_string());
            }
        }
    }

    /// Refetches the tag index for the Kanban set.
    pub async fn refresh_tags(&mut self) {
        let ids: Vec<JourneyId> = self
            .kanban
            .state
            .journeys()
            .iter()
            .map(|j| j.id.clone())
            .collect();
        for id in ids {
            match self.client.list_tags(&id).await {
                Ok(tags) => self.tags.set(id, tags),
                Err(e) => debug!(journey = %id, error = %e, "Tag fetch failed"),
            }
        }
    }

    /// The baseline set filtered client-side with the current filters
    /// and tag index.
    fn filtered_baseline(&self) -> Vec<Journey> {
        let journeys: &[Journey] = self.baseline.state.journeys();
        let ids: Vec<JourneyId> = apply_filters(journeys, &self.prefs.filter, &self.tags);
        journeys
            .iter()
            .filter(|j| ids.contains(&j.id))
            .cloned()
            .collect()
    }

    /// Finds a journey in the active sources, Kanban set first.
    fn find_journey(&self, id: &JourneyId) -> Option<&Journey> {
        self.kanban
            .state
            .journeys()
            .iter()
            .chain(self.baseline.state.journeys())
            .chain(self.list.state.journeys())
            .find(|j| &j.id == id)
    }

    fn resolve_target(target: &TargetRef) -> ApiResult<DropTarget> {
        match target {
            TargetRef::Column(stage) => StageId::from_number(*stage)
                .map(DropTarget::Column)
                .map_err(translate_domain_error),
            TargetRef::Card(journey) => Ok(DropTarget::Card(JourneyId::new(journey.clone()))),
        }
    }

    fn next_cause(&mut self, description: &str) -> Cause {
        self.gesture_counter += 1;
        Cause::new(
            format!("gesture-{}", self.gesture_counter),
            String::from(description),
        )
    }

    fn actor(&self) -> Actor {
        Actor::new(self.operator_initials.clone(), String::from("user"))
    }

    /// Starts a drag gesture.
    ///
    /// # Errors
    ///
    /// Returns an error if a gesture is already active or the journey is
    /// not on the board.
    pub fn drag_start(&mut self, journey: &str) -> ApiResult<()> {
        self.engine
            .drag_start(JourneyId::new(journey))
            .map_err(translate_core_error)
    }

    /// Applies a drag-over event.
    ///
    /// # Errors
    ///
    /// Returns an error if no gesture is active or the target is
    /// malformed.
    pub fn drag_over(&mut self, target: &TargetRef) -> ApiResult<()> {
        let target: DropTarget = Self::resolve_target(target)?;
        self.engine
            .drag_over(&target)
            .map_err(translate_core_error)
    }

    /// Completes a drag gesture and commits any stage change.
    ///
    /// The PATCH and its audit side effects run after the local index is
    /// final; their failures are logged, never surfaced, and never undo
    /// the local move.
    ///
    /// # Errors
    ///
    /// Returns an error if no gesture is active.
    pub async fn drag_end(&mut self, target: Option<&TargetRef>) -> ApiResult<DragOutcome> {
        let target: Option<DropTarget> = match target {
            Some(t) => Some(Self::resolve_target(t)?),
            None => None,
        };
        let actor: Actor = self.actor();
        let cause: Cause = self.next_cause("Kanban drag");
        let outcome: DragOutcome = self
            .engine
            .drag_end(target.as_ref(), &actor, &cause)
            .map_err(translate_core_error)?;

        if let Some(commit) = &outcome.commit {
            let initials: String = self.operator_initials.clone();
            if let Err(e) =
                commit_stage_change(&self.client, commit, &initials, OffsetDateTime::now_utc())
                    .await
            {
                warn!(journey = %commit.journey, error = %e, "Stage PATCH failed; local state retained");
            }
            self.apply_stage_locally(commit.journey.clone(), commit.to);
        }
        Ok(outcome)
    }

    /// Abandons the active gesture.
    ///
    /// # Errors
    ///
    /// Returns an error if no gesture is active.
    pub fn drag_cancel(&mut self) -> ApiResult<()> {
        self.engine.drag_cancel().map_err(translate_core_error)
    }

    /// Moves a journey without a pointer gesture (the keyboard path).
    ///
    /// # Errors
    ///
    /// Returns an error if the journey or target cannot be resolved.
    pub async fn move_journey(&mut self, request: &MoveJourneyRequest) -> ApiResult<DragOutcome> {
        let target: DropTarget = Self::resolve_target(&request.target)?;
        let actor: Actor = self.actor();
        let cause: Cause = self.next_cause("Keyboard move");
        let outcome: DragOutcome = self
            .engine
            .move_journey(
                JourneyId::new(request.journey_id.clone()),
                &target,
                &actor,
                &cause,
            )
            .map_err(translate_core_error)?;

        if let Some(commit) = &outcome.commit {
            let initials: String = self.operator_initials.clone();
            if let Err(e) =
                commit_stage_change(&self.client, commit, &initials, OffsetDateTime::now_utc())
                    .await
            {
                warn!(journey = %commit.journey, error = %e, "Stage PATCH failed; local state retained");
            }
            self.apply_stage_locally(commit.journey.clone(), commit.to);
        }
        Ok(outcome)
    }

    /// Mirrors a committed stage change into every held source copy, so
    /// snapshots agree with the bucket index without a refetch.
    fn apply_stage_locally(&mut self, journey: JourneyId, stage: StageId) {
        let update = |journeys: &mut Vec<Journey>| {
            for j in journeys.iter_mut().filter(|j| j.id == journey) {
                j.stage = journey_board_domain::StageClassification::from_stage(stage);
            }
        };
        update(self.kanban.state.journeys_mut());
        update(self.baseline.state.journeys_mut());
        update(self.list.state.journeys_mut());
    }

    /// Toggles a journey's soft-delete flag, returning the new state.
    ///
    /// # Errors
    ///
    /// Returns an error if the journey is unknown or the PATCH fails.
    pub async fn toggle_disabled(&mut self, journey: &str) -> ApiResult<bool> {
        let id: JourneyId = JourneyId::new(journey);
        let currently_disabled: bool = self
            .find_journey(&id)
            .ok_or_else(|| ApiError::ResourceNotFound {
                resource_type: String::from("Journey"),
                message: format!("Journey {id} is not loaded"),
            })?
            .disabled;
        let next: bool = !currently_disabled;

        self.client.set_disabled(&id, next).await?;

        let update = |journeys: &mut Vec<Journey>| {
            for j in journeys.iter_mut().filter(|j| j.id == id) {
                j.disabled = next;
            }
        };
        update(self.kanban.state.journeys_mut());
        update(self.baseline.state.journeys_mut());
        update(self.list.state.journeys_mut());
        Ok(next)
    }

    /// Renders the Kanban board snapshot.
    #[must_use]
    pub fn kanban_snapshot(&self) -> KanbanBoardResponse {
        let journeys: &[Journey] = self.kanban.state.journeys();
        let columns: Vec<BoardColumn> = StageId::ALL
            .iter()
            .filter(|stage| self.prefs.filter.visible_stages.contains(stage))
            .map(|stage| {
                let column_journeys: Vec<Journey> = self
                    .engine
                    .buckets()
                    .ids(*stage)
                    .iter()
                    .filter_map(|id| journeys.iter().find(|j| &j.id == id))
                    .cloned()
                    .collect();
                let total_value: f64 = column_journeys.iter().map(|j| j.value).sum();
                BoardColumn {
                    stage: *stage,
                    label: stage.label(),
                    weight: stage.weight(),
                    journeys: column_journeys,
                    total_value,
                    weighted_value: total_value * stage.weight(),
                }
            })
            .collect();

        let filtered: Vec<Journey> = self.filtered_baseline();
        let tags: Vec<(JourneyId, Vec<journey_board_domain::Tag>)> = if self.prefs.show_tags {
            journeys
                .iter()
                .map(|j| (j.id.clone(), self.tags.get(&j.id).to_vec()))
                .collect()
        } else {
            Vec::new()
        };

        KanbanBoardResponse {
            columns,
            total_pipeline_value: total_pipeline_value(&filtered),
            weighted_pipeline_value: weighted_pipeline_value(&filtered),
            loading: self.kanban.state.is_loading(),
            error: self.kanban.state.error().map(str::to_owned),
            tags,
        }
    }

    /// Renders the list view snapshot.
    #[must_use]
    pub fn list_snapshot(&self) -> ListBoardResponse {
        ListBoardResponse {
            journeys: self.list.state.journeys().to_vec(),
            pagination: PaginationInfo {
                page: self.list.pagination.page,
                total: self.list.pagination.total,
                total_pages: self.list.pagination.total_pages,
                limit: self.list.pagination.limit,
            },
            loading: self.list.state.is_loading(),
            error: self.list.state.error().map(str::to_owned),
        }
    }

    /// Renders the projections snapshot from the filtered baseline.
    #[must_use]
    pub fn projections_snapshot(&self, now: time::PrimitiveDateTime) -> ProjectionsResponse {
        let filtered: Vec<Journey> = self.filtered_baseline();
        let months = monthly_projections(&filtered, now);
        let total_weighted_projection: f64 = months.iter().map(|m| m.weighted_value).sum();
        let total_deals: usize = filtered.len();
        let avg_value_per_deal: f64 = if filtered.is_empty() {
            0.0
        } else {
            #[allow(clippy::cast_precision_loss)]
            let count: f64 = filtered.len() as f64;
            total_pipeline_value(&filtered) / count
        };
        let ages: Vec<i64> = filtered
            .iter()
            .filter_map(|j| j.created_at)
            .map(|created| (now - created).whole_days())
            .collect();
        #[allow(clippy::cast_possible_wrap)]
        let avg_deal_age_days: i64 = if ages.is_empty() {
            0
        } else {
            ages.iter().sum::<i64>() / ages.len() as i64
        };

        ProjectionsResponse {
            months,
            total_weighted_projection,
            total_deals,
            avg_value_per_deal,
            avg_deal_age_days,
        }
    }

    /// Lists saved presets.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails.
    pub fn list_presets(&mut self) -> ApiResult<Vec<PresetInfo>> {
        let presets: Vec<Preset> = self.store.list_presets()?;
        Ok(presets
            .into_iter()
            .map(|p| PresetInfo {
                id: p.id,
                name: p.name,
                created_at: p.created_at,
            })
            .collect())
    }

    /// Snapshots the current preferences as a named preset.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails.
    pub fn save_preset(&mut self, name: &str, created_at: &str) -> ApiResult<PresetInfo> {
        let preset: Preset = self.store.save_preset(name, created_at, &self.prefs)?;
        Ok(PresetInfo {
            id: preset.id,
            name: preset.name,
            created_at: preset.created_at,
        })
    }

    /// Loads a preset, fully replacing the current filter/sort/view
    /// state.
    ///
    /// # Errors
    ///
    /// Returns an error if the preset does not exist.
    pub fn apply_preset(&mut self, id: i64) -> ApiResult<()> {
        let preset: Preset = self.store.load_preset(id)?;
        self.prefs = preset.preferences;
        self.kanban.batch_size = self.prefs.kanban_batch_size;
        self.persist_filter();
        self.store.save(keys::VIEW_MODE, &self.prefs.view_mode);
        self.store.save(keys::SORT_FIELD, &self.prefs.sort_field);
        self.store
            .save(keys::SORT_DIRECTION, &self.prefs.sort_direction);
        self.store.save(keys::SHOW_TAGS, &self.prefs.show_tags);
        self.store
            .save(keys::KANBAN_BATCH_SIZE, &self.prefs.kanban_batch_size);
        Ok(())
    }

    /// Deletes a preset. Confirmation is the UI's responsibility.
    ///
    /// # Errors
    ///
    /// Returns an error if the preset does not exist.
    pub fn delete_preset(&mut self, id: i64) -> ApiResult<()> {
        self.store.delete_preset(id)?;
        Ok(())
    }

    /// Exports the filtered set as CSV, joining next steps and contacts
    /// per journey.
    ///
    /// # Errors
    ///
    /// Returns an error if the CSV cannot be produced; per-journey join
    /// fetch failures degrade to empty cells.
    pub async fn export_csv(&mut self) -> ApiResult<Vec<u8>> {
        let filtered: Vec<Journey> = self.filtered_baseline();

        let customers: Vec<Customer> = filtered
            .iter()
            .filter_map(Customer::from_journey)
            .collect();

        let mut next_steps: Vec<Note> = Vec::new();
        let mut contacts: Vec<(JourneyId, crate::client::JourneyContact)> = Vec::new();
        for journey in &filtered {
            match self.client.list_notes(&journey.id, NoteKind::NextStep).await {
                Ok(notes) => next_steps.extend(notes),
                Err(e) => debug!(journey = %journey.id, error = %e, "Next-step fetch failed"),
            }
            match self.client.list_contacts(&journey.id).await {
                Ok(rows) => contacts.extend(rows.into_iter().map(|c| (journey.id.clone(), c))),
                Err(e) => debug!(journey = %journey.id, error = %e, "Contact fetch failed"),
            }
        }

        let rows: Vec<ExportRow> = build_export_rows(&filtered, &customers, &next_steps, &contacts);
        let mut out: Vec<u8> = Vec::new();
        write_csv(&mut out, &rows).map_err(|e| ApiError::Internal {
            message: format!("CSV export failed: {e}"),
        })?;
        Ok(out)
    }

    /// Flushes a form tab's pending autosave batch.
    pub async fn flush_form(&self, journey: &str, state: &mut AutosaveState) {
        flush_autosave(&self.client, &JourneyId::new(journey), state).await;
    }

    /// Lists a journey's notes of one kind.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend call fails.
    pub async fn notes(&mut self, journey: &str, kind: NoteKind) -> ApiResult<Vec<Note>> {
        Ok(self
            .client
            .list_notes(&JourneyId::new(journey), kind)
            .await?)
    }

    /// Creates a note or next step on a journey.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend call fails.
    pub async fn add_note(&mut self, journey: &str, kind: NoteKind, body: String) -> ApiResult<()> {
        let note: Note = Note {
            id: None,
            entity_id: JourneyId::new(journey),
            kind,
            body,
            created_by: Some(self.operator_initials.clone()),
        };
        Ok(self.client.create_note(&note).await?)
    }

    /// Deletes a note by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend call fails.
    pub async fn remove_note(&mut self, note_id: &str) -> ApiResult<()> {
        Ok(self.client.delete_note(note_id).await?)
    }

    /// Lists a journey's tags from the live backend (not the cached
    /// index).
    ///
    /// # Errors
    ///
    /// Returns an error if the backend call fails.
    pub async fn journey_tags(&mut self, journey: &str) -> ApiResult<Vec<journey_board_domain::Tag>> {
        Ok(self.client.list_tags(&JourneyId::new(journey)).await?)
    }

    /// Attaches a tag and refreshes the cached index entry.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend call fails.
    pub async fn add_tag(&mut self, journey: &str, description: &str) -> ApiResult<()> {
        let id: JourneyId = JourneyId::new(journey);
        self.client.create_tag(&id, description).await?;
        let tags: Vec<journey_board_domain::Tag> = self.client.list_tags(&id).await?;
        self.tags.set(id, tags);
        Ok(())
    }

    /// Removes a tag by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend call fails.
    pub async fn remove_tag(&mut self, tag_id: &str) -> ApiResult<()> {
        Ok(self.client.delete_tag(tag_id).await?)
    }

    /// Fetches the available RSMs for the filter dropdown.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend call fails.
    pub async fn available_rsms(&mut self) -> ApiResult<Vec<crate::client::RsmRecord>> {
        Ok(self.client.fetch_rsms().await?)
    }

    /// Fetches the derived quote total for a journey.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend call fails.
    pub async fn quote_value(&mut self, journey: &str) -> ApiResult<crate::client::QuoteValue> {
        Ok(self.client.quote_value(&JourneyId::new(journey)).await?)
    }
}
