//! services/api/src/web/rest.rs
//!
//! Contains the Axum handlers for the REST API endpoints and the master
//! definition for the OpenAPI specification.

use crate::web::state::{AppState, PoolSummary};
use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Json},
};
use hiring_core::diversity::{analyze_bias, BiasAnalysis};
use hiring_core::ledger::CandidateAction;
use hiring_core::normalize::{extract_filter_options, FilterOptions};
use hiring_core::report::{export_csv, hiring_report, HiringReport};
use hiring_core::score_analysis::{self, ScoreAnalysis, ScoreComparison};
use hiring_core::team::{analyze_team, TeamComposition};
use hiring_core::{
    Candidate, CoreError, DiversityFactor, DiversityMetrics, FilterUpdate, HiringState,
    LoadError, Priority, Score, SortConfig, SortDirection, SortKey,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, warn};
use utoipa::{OpenApi, ToSchema};

//=========================================================================================
// OpenAPI Master Definition
//=========================================================================================

#[derive(OpenApi)]
#[openapi(
    paths(
        list_candidates_handler,
        get_candidate_handler,
        update_filters_handler,
        set_sort_handler,
        filter_options_handler,
        shortlist_handler,
        unshortlist_handler,
        select_handler,
        unselect_handler,
        clear_selection_handler,
        diversity_handler,
        bias_handler,
        team_handler,
        report_handler,
        export_csv_handler,
        reload_pool_handler,
    ),
    components(
        schemas(
            CandidateView,
            CandidateListResponse,
            CandidateDetail,
            FilterPatch,
            SortRequest,
            ShortlistRequest,
            SelectRequest,
            LedgerResponse,
            PoolSummary,
            DiversityResponse,
            BiasResponse,
            TeamResponse,
            ReportResponse,
            FilterOptionsResponse,
        )
    ),
    tags(
        (name = "Candidate Review API", description = "Scoring, filtering and team selection over an applicant pool.")
    )
)]
pub struct ApiDoc;

//=========================================================================================
// API Response and Payload Structs
//=========================================================================================

/// One candidate as the reviewer sees it in a list.
#[derive(Serialize, ToSchema)]
pub struct CandidateView {
    #[schema(value_type = Object)]
    pub candidate: Candidate,
    #[schema(value_type = Option<Object>)]
    pub score: Option<Score>,
    pub shortlisted: bool,
    pub selected: bool,
}

impl CandidateView {
    fn from_state(state: &HiringState, candidate: &Candidate) -> Self {
        Self {
            candidate: candidate.clone(),
            score: state.score(&candidate.id).cloned(),
            shortlisted: state.shortlist().contains(&candidate.id),
            selected: state.selection().contains(&candidate.id),
        }
    }
}

/// The filtered, sorted list plus the size of the whole pool.
#[derive(Serialize, ToSchema)]
pub struct CandidateListResponse {
    pub pool_size: usize,
    pub visible: usize,
    pub candidates: Vec<CandidateView>,
}

impl CandidateListResponse {
    fn from_state(state: &HiringState) -> Self {
        let candidates: Vec<CandidateView> = state
            .visible()
            .iter()
            .map(|c| CandidateView::from_state(state, c))
            .collect();
        Self {
            pool_size: state.pool().len(),
            visible: candidates.len(),
            candidates,
        }
    }
}

/// A single candidate with the reading of their score and their history.
#[derive(Serialize, ToSchema)]
pub struct CandidateDetail {
    #[serde(flatten)]
    pub view: CandidateView,
    #[schema(value_type = Option<Object>)]
    pub analysis: Option<ScoreAnalysis>,
    #[schema(value_type = Option<Object>)]
    pub comparison: Option<ScoreComparison>,
    #[schema(value_type = Vec<Object>)]
    pub history: Vec<CandidateAction>,
}

/// A partial filter update. Absent fields are kept; an explicit `null`
/// clears `max_salary`, `is_shortlisted` or `is_selected`.
#[derive(Deserialize, ToSchema)]
#[serde(transparent)]
#[schema(value_type = Object)]
pub struct FilterPatch(pub FilterUpdate);

#[derive(Deserialize, ToSchema)]
pub struct SortRequest {
    #[schema(value_type = String, example = "total_score")]
    pub key: SortKey,
    #[schema(value_type = String, example = "desc")]
    pub direction: SortDirection,
}

#[derive(Deserialize, ToSchema, Default)]
#[serde(default)]
pub struct ShortlistRequest {
    pub reason: String,
    #[schema(value_type = Option<String>, example = "high")]
    pub priority: Option<Priority>,
}

#[derive(Deserialize, ToSchema, Default)]
#[serde(default)]
pub struct SelectRequest {
    pub position: Option<String>,
    pub reason: String,
    #[schema(value_type = Option<String>, example = "location")]
    pub diversity_factor: Option<DiversityFactor>,
}

/// Ledger sizes after a shortlist or selection change.
#[derive(Serialize, ToSchema)]
pub struct LedgerResponse {
    pub shortlisted: usize,
    pub selected: usize,
    pub team_limit: usize,
}

impl LedgerResponse {
    fn from_state(state: &HiringState) -> Self {
        Self {
            shortlisted: state.shortlist().len(),
            selected: state.selection().len(),
            team_limit: state.selection().limit(),
        }
    }
}

#[derive(Serialize, ToSchema)]
#[serde(transparent)]
#[schema(value_type = Object)]
pub struct DiversityResponse(pub DiversityMetrics);

#[derive(Serialize, ToSchema)]
#[serde(transparent)]
#[schema(value_type = Object)]
pub struct BiasResponse(pub BiasAnalysis);

#[derive(Serialize, ToSchema)]
#[serde(transparent)]
#[schema(value_type = Object)]
pub struct TeamResponse(pub TeamComposition);

#[derive(Serialize, ToSchema)]
#[serde(transparent)]
#[schema(value_type = Object)]
pub struct ReportResponse(pub HiringReport);

#[derive(Serialize, ToSchema)]
#[serde(transparent)]
#[schema(value_type = Object)]
pub struct FilterOptionsResponse(pub FilterOptions);

//=========================================================================================
// Error Mapping
//=========================================================================================

type HandlerError = (StatusCode, String);

fn core_error(e: CoreError) -> HandlerError {
    let status = match e {
        CoreError::CapacityExceeded { .. } => StatusCode::CONFLICT,
        CoreError::NotFound(_) => StatusCode::NOT_FOUND,
    };
    warn!(status = %status, error = %e, "Review action refused");
    (status, e.to_string())
}

fn load_error(e: LoadError) -> HandlerError {
    error!("Failed to load applicant pool: {:?}", e);
    let status = match e {
        LoadError::NotJson(_) | LoadError::NotAnArray(_) => StatusCode::UNPROCESSABLE_ENTITY,
        LoadError::Source(_) | LoadError::Rejected(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, e.to_string())
}

//=========================================================================================
// Candidate Handlers
//=========================================================================================

/// List the visible candidates under the current filters and sort.
#[utoipa::path(
    get,
    path = "/candidates",
    responses(
        (status = 200, description = "Filtered and sorted candidates", body = CandidateListResponse)
    )
)]
pub async fn list_candidates_handler(
    State(app_state): State<Arc<AppState>>,
) -> Json<CandidateListResponse> {
    let store = app_state.store.read().await;
    Json(CandidateListResponse::from_state(store.state()))
}

/// Fetch one candidate with score analysis, pool comparison and action history.
#[utoipa::path(
    get,
    path = "/candidates/{id}",
    responses(
        (status = 200, description = "The candidate", body = CandidateDetail),
        (status = 404, description = "No candidate with this id")
    ),
    params(
        ("id" = String, Path, description = "The candidate id.")
    )
)]
pub async fn get_candidate_handler(
    State(app_state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<CandidateDetail>, HandlerError> {
    let store = app_state.store.read().await;
    let state = store.state();
    let candidate = state
        .candidate(&id)
        .ok_or_else(|| core_error(CoreError::NotFound(id.clone())))?;

    let score = state.score(&id);
    Ok(Json(CandidateDetail {
        view: CandidateView::from_state(state, candidate),
        analysis: score.map(score_analysis::analyze),
        comparison: score.map(|s| score_analysis::compare(s, state.scores())),
        history: state.actions().for_candidate(&id).cloned().collect(),
    }))
}

/// Merge a partial filter update and return the new visible list.
#[utoipa::path(
    patch,
    path = "/filters",
    request_body = FilterPatch,
    responses(
        (status = 200, description = "Visible list under the merged filters", body = CandidateListResponse),
        (status = 400, description = "Malformed filter body")
    )
)]
pub async fn update_filters_handler(
    State(app_state): State<Arc<AppState>>,
    Json(FilterPatch(update)): Json<FilterPatch>,
) -> Result<Json<CandidateListResponse>, HandlerError> {
    let mut store = app_state.store.write().await;
    let state = store.set_filters(update).map_err(core_error)?;
    Ok(Json(CandidateListResponse::from_state(state)))
}

/// Change the sort key and direction.
#[utoipa::path(
    put,
    path = "/sort",
    request_body = SortRequest,
    responses(
        (status = 200, description = "Visible list in the new order", body = CandidateListResponse)
    )
)]
pub async fn set_sort_handler(
    State(app_state): State<Arc<AppState>>,
    Json(request): Json<SortRequest>,
) -> Result<Json<CandidateListResponse>, HandlerError> {
    let mut store = app_state.store.write().await;
    let state = store
        .set_sort(SortConfig {
            key: request.key,
            direction: request.direction,
        })
        .map_err(core_error)?;
    Ok(Json(CandidateListResponse::from_state(state)))
}

/// Distinct values available to each filter, taken from the whole pool.
#[utoipa::path(
    get,
    path = "/filter-options",
    responses(
        (status = 200, description = "Filter facets", body = FilterOptionsResponse)
    )
)]
pub async fn filter_options_handler(
    State(app_state): State<Arc<AppState>>,
) -> Json<FilterOptionsResponse> {
    let store = app_state.store.read().await;
    Json(FilterOptionsResponse(extract_filter_options(
        store.state().pool(),
    )))
}

//=========================================================================================
// Ledger Handlers
//=========================================================================================

/// Add a candidate to the shortlist, or update their entry.
#[utoipa::path(
    post,
    path = "/shortlist/{id}",
    request_body = ShortlistRequest,
    responses(
        (status = 200, description = "Shortlisted", body = LedgerResponse),
        (status = 404, description = "No candidate with this id")
    ),
    params(
        ("id" = String, Path, description = "The candidate id.")
    )
)]
pub async fn shortlist_handler(
    State(app_state): State<Arc<AppState>>,
    Path(id): Path<String>,
    body: Option<Json<ShortlistRequest>>,
) -> Result<Json<LedgerResponse>, HandlerError> {
    let request = body.map(|Json(r)| r).unwrap_or_default();
    let mut store = app_state.store.write().await;
    let state = store
        .shortlist(
            &id,
            &request.reason,
            request.priority.unwrap_or(Priority::Medium),
        )
        .map_err(core_error)?;
    Ok(Json(LedgerResponse::from_state(state)))
}

/// Remove a candidate from the shortlist. Not being on it is not an error.
#[utoipa::path(
    delete,
    path = "/shortlist/{id}",
    responses(
        (status = 200, description = "Removed", body = LedgerResponse),
        (status = 404, description = "No candidate with this id")
    ),
    params(
        ("id" = String, Path, description = "The candidate id.")
    )
)]
pub async fn unshortlist_handler(
    State(app_state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<LedgerResponse>, HandlerError> {
    let mut store = app_state.store.write().await;
    let state = store.unshortlist(&id).map_err(core_error)?;
    Ok(Json(LedgerResponse::from_state(state)))
}

/// Put a candidate on the team.
#[utoipa::path(
    post,
    path = "/selection/{id}",
    request_body = SelectRequest,
    responses(
        (status = 200, description = "Selected", body = LedgerResponse),
        (status = 404, description = "No candidate with this id"),
        (status = 409, description = "The team is already full")
    ),
    params(
        ("id" = String, Path, description = "The candidate id.")
    )
)]
pub async fn select_handler(
    State(app_state): State<Arc<AppState>>,
    Path(id): Path<String>,
    body: Option<Json<SelectRequest>>,
) -> Result<Json<LedgerResponse>, HandlerError> {
    let request = body.map(|Json(r)| r).unwrap_or_default();
    let position = request.position.as_deref().unwrap_or("Team Member");
    let mut store = app_state.store.write().await;
    let state = store
        .select(&id, position, &request.reason, request.diversity_factor)
        .map_err(core_error)?;
    Ok(Json(LedgerResponse::from_state(state)))
}

/// Take a candidate off the team.
#[utoipa::path(
    delete,
    path = "/selection/{id}",
    responses(
        (status = 200, description = "Unselected", body = LedgerResponse),
        (status = 404, description = "No candidate with this id")
    ),
    params(
        ("id" = String, Path, description = "The candidate id.")
    )
)]
pub async fn unselect_handler(
    State(app_state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<LedgerResponse>, HandlerError> {
    let mut store = app_state.store.write().await;
    let state = store.unselect(&id).map_err(core_error)?;
    Ok(Json(LedgerResponse::from_state(state)))
}

/// Empty the team.
#[utoipa::path(
    delete,
    path = "/selection",
    responses(
        (status = 200, description = "Team cleared", body = LedgerResponse)
    )
)]
pub async fn clear_selection_handler(
    State(app_state): State<Arc<AppState>>,
) -> Result<Json<LedgerResponse>, HandlerError> {
    let mut store = app_state.store.write().await;
    let state = store.clear_selection().map_err(core_error)?;
    Ok(Json(LedgerResponse::from_state(state)))
}

//=========================================================================================
// Analysis Handlers
//=========================================================================================

/// Distribution metrics over the visible list.
#[utoipa::path(
    get,
    path = "/diversity",
    responses(
        (status = 200, description = "Diversity metrics", body = DiversityResponse)
    )
)]
pub async fn diversity_handler(State(app_state): State<Arc<AppState>>) -> Json<DiversityResponse> {
    let store = app_state.store.read().await;
    Json(DiversityResponse(store.state().metrics().clone()))
}

/// Advisory bias analysis over the visible list.
#[utoipa::path(
    get,
    path = "/bias",
    responses(
        (status = 200, description = "Bias analysis", body = BiasResponse)
    )
)]
pub async fn bias_handler(State(app_state): State<Arc<AppState>>) -> Json<BiasResponse> {
    let store = app_state.store.read().await;
    let state = store.state();
    Json(BiasResponse(analyze_bias(state.visible(), state.scores())))
}

/// Composition of the selected team.
#[utoipa::path(
    get,
    path = "/team",
    responses(
        (status = 200, description = "Team composition", body = TeamResponse)
    )
)]
pub async fn team_handler(State(app_state): State<Arc<AppState>>) -> Json<TeamResponse> {
    let store = app_state.store.read().await;
    let state = store.state();
    Json(TeamResponse(analyze_team(
        &state.selected_candidates(),
        state.selection().limit(),
    )))
}

/// The hiring report over the whole pool.
#[utoipa::path(
    get,
    path = "/report",
    responses(
        (status = 200, description = "Hiring report", body = ReportResponse)
    )
)]
pub async fn report_handler(State(app_state): State<Arc<AppState>>) -> Json<ReportResponse> {
    let store = app_state.store.read().await;
    let state = store.state();
    Json(ReportResponse(hiring_report(
        state.pool(),
        state.scores(),
        state.shortlist(),
        state.selection(),
    )))
}

/// The visible list as CSV.
#[utoipa::path(
    get,
    path = "/export.csv",
    responses(
        (status = 200, description = "CSV export", content_type = "text/csv", body = String),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn export_csv_handler(
    State(app_state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, HandlerError> {
    let store = app_state.store.read().await;
    let state = store.state();
    let csv = export_csv(
        state.visible(),
        state.scores(),
        state.shortlist(),
        state.selection(),
    )
    .map_err(|e| {
        error!("Failed to export candidates: {:?}", e);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Failed to export candidates".to_string(),
        )
    })?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"candidates.csv\"",
            ),
        ],
        csv,
    ))
}

/// Re-read the applicant source and replace the pool.
#[utoipa::path(
    post,
    path = "/pool/reload",
    responses(
        (status = 200, description = "Pool reloaded", body = PoolSummary),
        (status = 422, description = "The source is not JSON, or not a JSON array"),
        (status = 500, description = "The source could not be read")
    )
)]
pub async fn reload_pool_handler(
    State(app_state): State<Arc<AppState>>,
) -> Result<Json<PoolSummary>, HandlerError> {
    app_state.reload().await.map(Json).map_err(load_error)
}
