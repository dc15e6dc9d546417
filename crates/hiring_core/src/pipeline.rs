//! crates/hiring_core/src/pipeline.rs
//!
//! The load path: fetch the raw batch once, validate it, then normalize
//! skills and salaries. Scoring happens when the pool enters the store.

use crate::domain::Candidate;
use crate::normalize::{normalize_salaries, normalize_skills};
use crate::ports::{CandidateSource, LoadError};
use crate::validation::{ingest_str, ValidationReport};

/// Runs both normalizers over a validated batch.
pub fn prepare(candidates: &[Candidate]) -> Vec<Candidate> {
    normalize_salaries(&normalize_skills(candidates))
}

/// Fetches from `source` and returns the prepared pool with the per-record
/// errors. Fails only when the source fails or the payload is not a JSON array.
pub async fn load_from_source(
    source: &dyn CandidateSource,
) -> Result<ValidationReport, LoadError> {
    let raw = source.fetch_raw().await?;
    let report = ingest_str(&raw)?;
    Ok(ValidationReport {
        candidates: prepare(&report.candidates),
        errors: report.errors,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::{PortError, PortResult};
    use async_trait::async_trait;
    use serde_json::{json, Value};

    struct StaticSource(Value);

    #[async_trait]
    impl CandidateSource for StaticSource {
        async fn fetch_raw(&self) -> PortResult<String> {
            Ok(self.0.to_string())
        }
    }

    struct TextSource(&'static str);

    #[async_trait]
    impl CandidateSource for TextSource {
        async fn fetch_raw(&self) -> PortResult<String> {
            Ok(self.0.to_string())
        }
    }

    struct FailingSource;

    #[async_trait]
    impl CandidateSource for FailingSource {
        async fn fetch_raw(&self) -> PortResult<String> {
            Err(PortError::NotFound("applicants.json".into()))
        }
    }

    #[tokio::test]
    async fn loads_and_normalizes() {
        let source = StaticSource(json!([
            {
                "id": "a",
                "name": "Ada",
                "email": "ada@example.com",
                "skills": ["JS", "javascript"],
                "annual_salary_expectation": {"full-time": "90000 USD"}
            },
            {"name": "x"}
        ]));

        let report = load_from_source(&source).await.unwrap();

        assert_eq!(report.candidates.len(), 1);
        assert_eq!(report.errors.len(), 1);
        let ada = &report.candidates[0];
        assert_eq!(ada.skills, vec!["javascript", "javascript"]);
        assert_eq!(ada.salary_expectation.full_time.as_deref(), Some("$90,000"));
    }

    #[tokio::test]
    async fn load_level_failures_are_distinct() {
        let err = load_from_source(&StaticSource(json!({"not": "an array"})))
            .await
            .unwrap_err();
        assert!(matches!(err, LoadError::NotAnArray(_)));

        let err = load_from_source(&TextSource("{not json")).await.unwrap_err();
        assert!(matches!(err, LoadError::NotJson(_)));

        let err = load_from_source(&FailingSource).await.unwrap_err();
        assert!(matches!(err, LoadError::Source(PortError::NotFound(_))));
    }
}
