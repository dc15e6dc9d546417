pub mod rest;
pub mod state;

use axum::{
    routing::{delete, get, patch, post, put},
    Router,
};
use rest::*;
use state::AppState;
use std::sync::Arc;

/// All review routes, bound to one shared state.
pub fn router(app_state: Arc<AppState>) -> Router {
    Router::new()
        .route("/candidates", get(list_candidates_handler))
        .route("/candidates/{id}", get(get_candidate_handler))
        .route("/filters", patch(update_filters_handler))
        .route("/sort", put(set_sort_handler))
        .route("/filter-options", get(filter_options_handler))
        .route(
            "/shortlist/{id}",
            post(shortlist_handler).delete(unshortlist_handler),
        )
        .route(
            "/selection/{id}",
            post(select_handler).delete(unselect_handler),
        )
        .route("/selection", delete(clear_selection_handler))
        .route("/diversity", get(diversity_handler))
        .route("/bias", get(bias_handler))
        .route("/team", get(team_handler))
        .route("/report", get(report_handler))
        .route("/export.csv", get(export_csv_handler))
        .route("/pool/reload", post(reload_pool_handler))
        .with_state(app_state)
}
