//! services/api/src/web/state.rs
//!
//! Defines the application's shared state: the one review session the
//! service hosts, and where its applicants come from.

use hiring_core::pipeline::load_from_source;
use hiring_core::ports::{CandidateSource, LoadError};
use hiring_core::validation::ValidationError;
use hiring_core::HiringStore;
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;
use utoipa::ToSchema;

//=========================================================================================
// AppState (Shared Across All Requests)
//=========================================================================================

/// The shared application state, created once at startup and passed to all handlers.
pub struct AppState {
    pub source: Arc<dyn CandidateSource>,
    /// Every mutation holds the write lock for the whole transition, so a
    /// reader never sees a pool without its scores.
    pub store: RwLock<HiringStore>,
}

/// The outcome of a pool (re)load.
#[derive(Debug, Serialize, ToSchema)]
pub struct PoolSummary {
    pub accepted: usize,
    pub rejected: usize,
    #[schema(value_type = Vec<Object>)]
    pub errors: Vec<ValidationError>,
}

impl AppState {
    pub fn new(source: Arc<dyn CandidateSource>) -> Self {
        Self {
            source,
            store: RwLock::new(HiringStore::new()),
        }
    }

    /// Fetches the raw batch and swaps it in as the new pool. The store is
    /// left as it was when the load fails.
    pub async fn reload(&self) -> Result<PoolSummary, LoadError> {
        let report = load_from_source(self.source.as_ref()).await?;
        let summary = PoolSummary {
            accepted: report.candidates.len(),
            rejected: report.errors.len(),
            errors: report.errors,
        };

        let mut store = self.store.write().await;
        store.load_pool(report.candidates)?;
        info!(
            accepted = summary.accepted,
            rejected = summary.rejected,
            "Applicant pool loaded"
        );
        Ok(summary)
    }
}
