//! crates/hiring_core/src/ports.rs
//!
//! Defines the error types of the engine and the one service contract it
//! depends on: the source of the raw applicant records.
//! The engine itself is synchronous; fetching the raw batch is the only
//! asynchronous boundary, so it sits behind this port.

use async_trait::async_trait;

//=========================================================================================
// Error and Result Types
//=========================================================================================

/// A generic error type for all port operations.
/// This abstracts away the specific errors from external sources (e.g., filesystem, network).
#[derive(Debug, thiserror::Error)]
pub enum PortError {
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

/// Errors raised by store transitions. All of them are recoverable: a failed
/// transition leaves the state untouched.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoreError {
    /// The selection ledger is full and the candidate is not already on it.
    #[error("Team is at capacity ({limit} members); unselect someone first")]
    CapacityExceeded { limit: usize },

    /// The action names a candidate that is not in the pool.
    #[error("Candidate not found: {0}")]
    NotFound(String),
}

pub type CoreResult<T> = Result<T, CoreError>;

/// Failure of the initial bulk load, as opposed to per-record validation failures.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("Applicant data is not valid JSON: {0}")]
    NotJson(#[from] serde_json::Error),

    #[error("Applicant data must be a JSON array, found {0}")]
    NotAnArray(&'static str),

    #[error("Applicant source failed: {0}")]
    Source(#[from] PortError),

    #[error("Applicant pool was refused: {0}")]
    Rejected(#[from] CoreError),
}

/// Failure while rendering a candidate list as CSV.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("CSV write failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("CSV buffer flush failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV output is not UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

#[async_trait]
pub trait CandidateSource: Send + Sync {
    /// Fetches the whole raw record batch in one shot, as unparsed JSON text.
    async fn fetch_raw(&self) -> PortResult<String>;
}
