// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

mod live;

use axum::{
    Json, Router,
    extract::{Path, Query, State as AxumState},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{delete, get, post},
};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use time::{OffsetDateTime, PrimitiveDateTime};
use tokio::sync::Mutex;
use tracing::{error, info, warn};

use journey_board::DragOutcome;
use journey_board_api::{
    ApiError, Board, KanbanBoardResponse, LegacyClient, ListBoardResponse, MoveJourneyRequest,
    PresetInfo, ProjectionsResponse, TargetRef,
};
use journey_board_domain::{
    FilterState, KanbanBatchSize, SortDirection, SortField, ViewMode,
};
use journey_board_persistence::PreferenceStore;

use crate::live::{LiveEvent, LiveEventBroadcaster, live_events_handler};

/// Journey Board Server - HTTP server for the Journey Board
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` preference database. If not provided, uses an
    /// in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// Base URL of the legacy CRM backend
    #[arg(long, default_value = "http://localhost:8080/api")]
    legacy_base_url: String,

    /// Operator initials recorded on audit writes
    #[arg(long, default_value = "SYS")]
    operator: String,
}

/// Application state shared across handlers.
///
/// The board is wrapped in a Mutex to allow safe concurrent access; the
/// broadcaster fans board changes out to live WebSocket clients.
#[derive(Clone)]
struct AppState {
    /// The board application service.
    board: Arc<Mutex<Board>>,
    /// The live event broadcaster.
    broadcaster: Arc<LiveEventBroadcaster>,
}

/// Query parameters for the board snapshot route.
///
/// `view`, `sort`, and `order` are one-shot seeds: when present they
/// override and persist the stored preferences before the snapshot is
/// served, mirroring URL parameters consumed once on page load.
#[derive(Debug, Deserialize)]
struct BoardQuery {
    /// One-shot view override.
    view: Option<String>,
    /// One-shot sort field override.
    sort: Option<String>,
    /// One-shot sort direction override.
    order: Option<String>,
    /// List page to serve (list view only).
    page: Option<u32>,
}

/// The board snapshot, shaped by the active view.
#[derive(Debug, Serialize)]
#[serde(tag = "view", rename_all = "lowercase")]
enum BoardResponse {
    /// Kanban columns.
    Kanban(KanbanBoardResponse),
    /// Paginated list.
    List(ListBoardResponse),
    /// Monthly projections.
    Projections(ProjectionsResponse),
}

/// Request body carrying a search term.
#[derive(Debug, Deserialize)]
struct SearchRequest {
    /// The raw search term (may carry the `tag:` grammar).
    term: String,
}

/// Request body carrying an RSM filter.
#[derive(Debug, Deserialize)]
struct RsmFilterRequest {
    /// The RSM initials substring.
    rsm: String,
}

/// Request body carrying a view mode.
#[derive(Debug, Deserialize)]
struct ViewModeRequest {
    /// The view mode (`kanban`, `list`, `projections`).
    view: String,
}

/// Request body carrying a sort configuration.
#[derive(Debug, Deserialize)]
struct SortRequest {
    /// The sort field.
    sort: String,
    /// The sort direction (`asc`, `desc`).
    order: String,
}

/// Request body carrying the Kanban batch cap.
#[derive(Debug, Deserialize)]
struct BatchSizeRequest {
    /// The batch size (25, 50, 75, or 100).
    size: u16,
}

/// Request body carrying a boolean toggle.
#[derive(Debug, Deserialize)]
struct ToggleRequest {
    /// The new state.
    enabled: bool,
}

/// Request body for a drag start.
#[derive(Debug, Deserialize)]
struct DragStartRequest {
    /// The journey to drag.
    journey_id: String,
}

/// Request body for a drag-over event.
#[derive(Debug, Deserialize)]
struct DragOverRequest {
    /// What the drag is currently over.
    target: TargetRef,
}

/// Request body for a drag end.
#[derive(Debug, Deserialize)]
struct DragEndRequest {
    /// The drop target; absent when the drop resolved nowhere.
    target: Option<TargetRef>,
}

/// Request body for creating a preset.
#[derive(Debug, Deserialize)]
struct CreatePresetRequest {
    /// The preset display name.
    name: String,
}

/// Response for a completed move.
#[derive(Debug, Serialize)]
struct MoveResponse {
    /// Whether the move crossed stages and was committed.
    committed: bool,
}

/// API error wrapper implementing the HTTP mapping.
struct HttpError(ApiError);

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        Self(err)
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let status: StatusCode = match &self.0 {
            ApiError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
            ApiError::ResourceNotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::EngineRuleViolation { .. } => StatusCode::CONFLICT,
            ApiError::BackendUnavailable { .. } => StatusCode::BAD_GATEWAY,
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, self.0.to_string()).into_response()
    }
}

/// Returns the current wall-clock time as a naive datetime for the
/// projections rollup.
fn now_naive() -> PrimitiveDateTime {
    let now: OffsetDateTime = OffsetDateTime::now_utc();
    PrimitiveDateTime::new(now.date(), now.time())
}

/// Serves the board snapshot for the active (or seeded) view.
async fn get_board(
    AxumState(state): AxumState<AppState>,
    Query(query): Query<BoardQuery>,
) -> Result<Json<BoardResponse>, HttpError> {
    let mut board = state.board.lock().await;

    // One-shot preference seeding from query parameters.
    if let Some(view) = &query.view {
        let mode: ViewMode = ViewMode::parse(view)
            .map_err(journey_board_api::translate_domain_error)?;
        board.set_view_mode(mode);
    }
    if query.sort.is_some() || query.order.is_some() {
        let field: SortField = match &query.sort {
            Some(sort) => {
                SortField::parse(sort).map_err(journey_board_api::translate_domain_error)?
            }
            None => board.preferences().sort_field,
        };
        let direction: SortDirection = match &query.order {
            Some(order) => SortDirection::parse(order)
                .map_err(journey_board_api::translate_domain_error)?,
            None => board.preferences().sort_direction,
        };
        board.set_sort(field, direction);
    }

    let response: BoardResponse = match board.preferences().view_mode {
        ViewMode::Kanban => {
            board.refresh_baseline().await;
            board.refresh_kanban().await;
            if board.preferences().show_tags {
                board.refresh_tags().await;
            }
            BoardResponse::Kanban(board.kanban_snapshot())
        }
        ViewMode::List => {
            board.refresh_baseline().await;
            board.refresh_list(query.page.unwrap_or(1)).await;
            BoardResponse::List(board.list_snapshot())
        }
        ViewMode::Projections => {
            board.refresh_baseline().await;
            BoardResponse::Projections(board.projections_snapshot(now_naive()))
        }
    };

    state.broadcaster.broadcast(&LiveEvent::BoardRefreshed {
        view: String::from(board.preferences().view_mode.as_str()),
    });
    Ok(Json(response))
}

/// Updates the search term.
async fn set_search(
    AxumState(state): AxumState<AppState>,
    Json(request): Json<SearchRequest>,
) -> StatusCode {
    state.board.lock().await.set_search(request.term);
    StatusCode::NO_CONTENT
}

/// Replaces the compound filter state.
async fn set_filters(
    AxumState(state): AxumState<AppState>,
    Json(filter): Json<FilterState>,
) -> Result<StatusCode, HttpError> {
    state.board.lock().await.set_filters(filter)?;
    Ok(StatusCode::NO_CONTENT)
}

/// Updates the RSM filter.
async fn set_rsm_filter(
    AxumState(state): AxumState<AppState>,
    Json(request): Json<RsmFilterRequest>,
) -> StatusCode {
    state.board.lock().await.set_rsm_filter(request.rsm);
    StatusCode::NO_CONTENT
}

/// Switches the active view.
async fn set_view_mode(
    AxumState(state): AxumState<AppState>,
    Json(request): Json<ViewModeRequest>,
) -> Result<StatusCode, HttpError> {
    let mode: ViewMode = ViewMode::parse(&request.view)
        .map_err(journey_board_api::translate_domain_error)?;
    state.board.lock().await.set_view_mode(mode);
    Ok(StatusCode::NO_CONTENT)
}

/// Replaces the sort configuration.
async fn set_sort(
    AxumState(state): AxumState<AppState>,
    Json(request): Json<SortRequest>,
) -> Result<StatusCode, HttpError> {
    let field: SortField =
        SortField::parse(&request.sort).map_err(journey_board_api::translate_domain_error)?;
    let direction: SortDirection = SortDirection::parse(&request.order)
        .map_err(journey_board_api::translate_domain_error)?;
    state.board.lock().await.set_sort(field, direction);
    Ok(StatusCode::NO_CONTENT)
}

/// Replaces the Kanban batch cap.
async fn set_batch_size(
    AxumState(state): AxumState<AppState>,
    Json(request): Json<BatchSizeRequest>,
) -> Result<StatusCode, HttpError> {
    let size: KanbanBatchSize = KanbanBatchSize::from_number(request.size)
        .map_err(journey_board_api::translate_domain_error)?;
    state.board.lock().await.set_kanban_batch_size(size);
    Ok(StatusCode::NO_CONTENT)
}

/// Toggles tag display.
async fn set_show_tags(
    AxumState(state): AxumState<AppState>,
    Json(request): Json<ToggleRequest>,
) -> StatusCode {
    state.board.lock().await.set_show_tags(request.enabled);
    StatusCode::NO_CONTENT
}

/// Toggles visibility of disabled journeys.
async fn set_show_disabled(
    AxumState(state): AxumState<AppState>,
    Json(request): Json<ToggleRequest>,
) -> StatusCode {
    state.board.lock().await.set_show_disabled(request.enabled);
    StatusCode::NO_CONTENT
}

/// Starts a drag gesture.
async fn drag_start(
    AxumState(state): AxumState<AppState>,
    Json(request): Json<DragStartRequest>,
) -> Result<StatusCode, HttpError> {
    state.board.lock().await.drag_start(&request.journey_id)?;
    Ok(StatusCode::NO_CONTENT)
}

/// Applies a drag-over event.
async fn drag_over(
    AxumState(state): AxumState<AppState>,
    Json(request): Json<DragOverRequest>,
) -> Result<StatusCode, HttpError> {
    state.board.lock().await.drag_over(&request.target)?;
    Ok(StatusCode::NO_CONTENT)
}

/// Completes a drag gesture.
async fn drag_end(
    AxumState(state): AxumState<AppState>,
    Json(request): Json<DragEndRequest>,
) -> Result<Json<MoveResponse>, HttpError> {
    let outcome: DragOutcome = state
        .board
        .lock()
        .await
        .drag_end(request.target.as_ref())
        .await?;
    broadcast_commit(&state, &outcome);
    Ok(Json(MoveResponse {
        committed: outcome.commit.is_some(),
    }))
}

/// Abandons the active drag gesture.
async fn drag_cancel(
    AxumState(state): AxumState<AppState>,
) -> Result<StatusCode, HttpError> {
    state.board.lock().await.drag_cancel()?;
    Ok(StatusCode::NO_CONTENT)
}

/// Moves a journey via the keyboard-operable path.
async fn move_journey(
    AxumState(state): AxumState<AppState>,
    Json(request): Json<MoveJourneyRequest>,
) -> Result<Json<MoveResponse>, HttpError> {
    let outcome: DragOutcome = state.board.lock().await.move_journey(&request).await?;
    broadcast_commit(&state, &outcome);
    Ok(Json(MoveResponse {
        committed: outcome.commit.is_some(),
    }))
}

/// Broadcasts a committed stage move to live clients.
fn broadcast_commit(state: &AppState, outcome: &DragOutcome) {
    if let Some(commit) = &outcome.commit {
        state.broadcaster.broadcast(&LiveEvent::StageMoved {
            journey: commit.journey.value().to_owned(),
            from: commit.from.number(),
            to: commit.to.number(),
        });
    }
}

/// Toggles a journey's soft-delete flag.
async fn toggle_journey(
    AxumState(state): AxumState<AppState>,
    Path(journey_id): Path<String>,
) -> Result<StatusCode, HttpError> {
    let disabled: bool = state.board.lock().await.toggle_disabled(&journey_id).await?;
    state.broadcaster.broadcast(&LiveEvent::JourneyToggled {
        journey: journey_id,
        disabled,
    });
    Ok(StatusCode::NO_CONTENT)
}

/// Exports the filtered set as a CSV download.
async fn export_csv(AxumState(state): AxumState<AppState>) -> Result<Response, HttpError> {
    let bytes: Vec<u8> = state.board.lock().await.export_csv().await?;
    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/csv"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"journeys.csv\"",
            ),
        ],
        bytes,
    )
        .into_response())
}

/// Lists saved presets.
async fn list_presets(
    AxumState(state): AxumState<AppState>,
) -> Result<Json<Vec<PresetInfo>>, HttpError> {
    let presets: Vec<PresetInfo> = state.board.lock().await.list_presets()?;
    Ok(Json(presets))
}

/// Snapshots the current preferences as a named preset.
async fn create_preset(
    AxumState(state): AxumState<AppState>,
    Json(request): Json<CreatePresetRequest>,
) -> Result<Json<PresetInfo>, HttpError> {
    let created_at: String = time::OffsetDateTime::now_utc()
        .format(&time::format_description::well_known::Iso8601::DEFAULT)
        .unwrap_or_else(|_| String::from("unknown"));
    let preset: PresetInfo = state
        .board
        .lock()
        .await
        .save_preset(&request.name, &created_at)?;
    Ok(Json(preset))
}

/// Applies a preset, replacing the whole filter/sort/view state.
async fn apply_preset(
    AxumState(state): AxumState<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, HttpError> {
    state.board.lock().await.apply_preset(id)?;
    Ok(StatusCode::NO_CONTENT)
}

/// Deletes a preset. The confirmation dialog is the UI's concern.
async fn delete_preset(
    AxumState(state): AxumState<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, HttpError> {
    state.board.lock().await.delete_preset(id)?;
    Ok(StatusCode::NO_CONTENT)
}

/// Query parameters for listing notes.
#[derive(Debug, Deserialize)]
struct NotesQuery {
    /// The note kind (`note`, `next_step`, `last_activity`).
    kind: Option<String>,
}

/// Request body for creating a note.
#[derive(Debug, Deserialize)]
struct CreateNoteRequest {
    /// The note kind (`note`, `next_step`).
    kind: Option<String>,
    /// The note body.
    body: String,
}

/// Request body for attaching a tag.
#[derive(Debug, Deserialize)]
struct CreateTagRequest {
    /// The tag description.
    description: String,
}

fn parse_note_kind(raw: Option<&str>) -> Result<journey_board_domain::NoteKind, HttpError> {
    use journey_board_domain::NoteKind;
    match raw.map(str::to_lowercase).as_deref() {
        None | Some("note") => Ok(NoteKind::Note),
        Some("next_step" | "nextstep") => Ok(NoteKind::NextStep),
        Some("last_activity" | "lastactivity") => Ok(NoteKind::LastActivity),
        Some(other) => Err(HttpError(ApiError::InvalidInput {
            field: String::from("kind"),
            message: format!("Unknown note kind '{other}'"),
        })),
    }
}

/// Lists a journey's notes of one kind.
async fn list_notes(
    AxumState(state): AxumState<AppState>,
    Path(journey_id): Path<String>,
    Query(query): Query<NotesQuery>,
) -> Result<Json<Vec<journey_board_domain::Note>>, HttpError> {
    let kind = parse_note_kind(query.kind.as_deref())?;
    let notes = state.board.lock().await.notes(&journey_id, kind).await?;
    Ok(Json(notes))
}

/// Creates a note or next step on a journey.
async fn create_note(
    AxumState(state): AxumState<AppState>,
    Path(journey_id): Path<String>,
    Json(request): Json<CreateNoteRequest>,
) -> Result<StatusCode, HttpError> {
    let kind = parse_note_kind(request.kind.as_deref())?;
    state
        .board
        .lock()
        .await
        .add_note(&journey_id, kind, request.body)
        .await?;
    Ok(StatusCode::CREATED)
}

/// Deletes a note by id.
async fn delete_note(
    AxumState(state): AxumState<AppState>,
    Path(note_id): Path<String>,
) -> Result<StatusCode, HttpError> {
    state.board.lock().await.remove_note(&note_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Lists a journey's tags.
async fn list_tags(
    AxumState(state): AxumState<AppState>,
    Path(journey_id): Path<String>,
) -> Result<Json<Vec<journey_board_domain::Tag>>, HttpError> {
    let tags = state.board.lock().await.journey_tags(&journey_id).await?;
    Ok(Json(tags))
}

/// Attaches a tag to a journey.
async fn create_tag(
    AxumState(state): AxumState<AppState>,
    Path(journey_id): Path<String>,
    Json(request): Json<CreateTagRequest>,
) -> Result<StatusCode, HttpError> {
    state
        .board
        .lock()
        .await
        .add_tag(&journey_id, &request.description)
        .await?;
    Ok(StatusCode::CREATED)
}

/// Removes a tag by id.
async fn delete_tag(
    AxumState(state): AxumState<AppState>,
    Path(tag_id): Path<String>,
) -> Result<StatusCode, HttpError> {
    state.board.lock().await.remove_tag(&tag_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Lists the available RSMs for the filter dropdown.
async fn list_rsms(
    AxumState(state): AxumState<AppState>,
) -> Result<Json<Vec<journey_board_api::RsmRecord>>, HttpError> {
    let rsms = state.board.lock().await.available_rsms().await?;
    Ok(Json(rsms))
}

/// Fetches the derived quote total for a journey.
async fn quote_value(
    AxumState(state): AxumState<AppState>,
    Path(journey_id): Path<String>,
) -> Result<Json<journey_board_api::QuoteValue>, HttpError> {
    let value = state.board.lock().await.quote_value(&journey_id).await?;
    Ok(Json(value))
}

/// Liveness probe.
async fn health() -> &'static str {
    "ok"
}

/// Builds the application router.
fn build_router(state: AppState, broadcaster: Arc<LiveEventBroadcaster>) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/board", get(get_board))
        .route("/api/board/search", post(set_search))
        .route("/api/board/filters", post(set_filters))
        .route("/api/board/rsm", post(set_rsm_filter))
        .route("/api/board/view", post(set_view_mode))
        .route("/api/board/sort", post(set_sort))
        .route("/api/board/batch-size", post(set_batch_size))
        .route("/api/board/show-tags", post(set_show_tags))
        .route("/api/board/show-disabled", post(set_show_disabled))
        .route("/api/board/drag/start", post(drag_start))
        .route("/api/board/drag/over", post(drag_over))
        .route("/api/board/drag/end", post(drag_end))
        .route("/api/board/drag/cancel", post(drag_cancel))
        .route("/api/board/move", post(move_journey))
        .route("/api/journeys/{id}/toggle", post(toggle_journey))
        .route(
            "/api/journeys/{id}/notes",
            get(list_notes).post(create_note),
        )
        .route("/api/notes/{id}", delete(delete_note))
        .route("/api/journeys/{id}/tags", get(list_tags).post(create_tag))
        .route("/api/tags/{id}", delete(delete_tag))
        .route("/api/journeys/{id}/quote-value", get(quote_value))
        .route("/api/rsms", get(list_rsms))
        .route("/api/export", get(export_csv))
        .route(
            "/api/presets",
            get(list_presets).post(create_preset),
        )
        .route("/api/presets/{id}/apply", post(apply_preset))
        .route("/api/presets/{id}", delete(delete_preset))
        .with_state(state)
        .route("/api/live", get(live_events_handler).with_state(broadcaster))
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args: Args = Args::parse();

    let store: PreferenceStore = match &args.database {
        Some(path) => match PreferenceStore::new_with_file(path) {
            Ok(store) => {
                info!(path, "Opened preference database");
                store
            }
            Err(e) => {
                error!(error = %e, "Failed to open preference database");
                std::process::exit(1);
            }
        },
        None => match PreferenceStore::new_in_memory() {
            Ok(store) => {
                info!("Using in-memory preference database");
                store
            }
            Err(e) => {
                error!(error = %e, "Failed to initialize in-memory database");
                std::process::exit(1);
            }
        },
    };

    let client: LegacyClient = match LegacyClient::new(&args.legacy_base_url) {
        Ok(client) => client,
        Err(e) => {
            error!(error = %e, "Failed to build legacy backend client");
            std::process::exit(1);
        }
    };

    let mut board: Board = Board::new(client, store, args.operator.clone());

    // Warm the baseline and active view before serving.
    board.refresh_baseline().await;
    board.refresh_kanban().await;
    if board.preferences().view_mode == ViewMode::List {
        board.refresh_list(1).await;
    }

    let broadcaster: Arc<LiveEventBroadcaster> = Arc::new(LiveEventBroadcaster::new());
    let state: AppState = AppState {
        board: Arc::new(Mutex::new(board)),
        broadcaster: Arc::clone(&broadcaster),
    };

    let app: Router = build_router(state, broadcaster);

    let addr: String = format!("0.0.0.0:{}", args.port);
    info!(addr, legacy = args.legacy_base_url, "Journey Board server listening");

    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!(error = %e, addr, "Failed to bind");
            std::process::exit(1);
        }
    };

    if let Err(e) = axum::serve(listener, app).await {
        warn!(error = %e, "Server terminated");
    }
}
