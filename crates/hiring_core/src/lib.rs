pub mod diversity;
pub mod domain;
pub mod filter;
pub mod ledger;
pub mod normalize;
pub mod pipeline;
pub mod ports;
pub mod raw;
pub mod report;
pub mod score_analysis;
pub mod scoring;
pub mod store;
pub mod team;
pub mod validation;

#[cfg(test)]
mod test_support;

pub use domain::{
    Candidate, CandidateId, DiversityFactor, DiversityMetrics, FilterState, FilterUpdate,
    Priority, RiskLevel, Score, ScoreMap, SortConfig, SortDirection, SortKey, WorkAvailability,
    TEAM_SIZE_LIMIT,
};
pub use ports::{
    CandidateSource, CoreError, CoreResult, ExportError, LoadError, PortError, PortResult,
};
pub use store::{Action, HiringState, HiringStore};
pub use validation::{ValidationError, ValidationReport, Validator};
