//! services/api/src/adapters/json_file.rs
//!
//! This module contains the adapter that reads the raw applicant batch from a
//! JSON file on disk. It implements the `CandidateSource` port from the `core` crate.

use async_trait::async_trait;
use hiring_core::ports::{CandidateSource, PortError, PortResult};
use std::io::ErrorKind;
use std::path::PathBuf;
use tracing::debug;

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// An adapter that implements `CandidateSource` by reading one JSON file.
#[derive(Clone, Debug)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    /// Creates a new `JsonFileSource`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

//=========================================================================================
// `CandidateSource` Trait Implementation
//=========================================================================================

#[async_trait]
impl CandidateSource for JsonFileSource {
    /// Reads the whole file. Parsing and shape checks are left to the core.
    async fn fetch_raw(&self) -> PortResult<String> {
        let text = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => PortError::NotFound(self.path.display().to_string()),
                _ => PortError::Unexpected(format!("{}: {}", self.path.display(), e)),
            })?;
        debug!(path = %self.path.display(), bytes = text.len(), "Read applicant file");
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_file_is_not_found() {
        let source = JsonFileSource::new("/definitely/not/here/applicants.json");
        let err = source.fetch_raw().await.unwrap_err();
        assert!(matches!(err, PortError::NotFound(_)));
    }

    #[tokio::test]
    async fn returns_the_file_contents_unparsed() {
        let path = std::env::temp_dir().join(format!("applicants-{}.json", std::process::id()));
        tokio::fs::write(&path, "{not json").await.unwrap();

        let text = JsonFileSource::new(&path).fetch_raw().await.unwrap();
        assert_eq!(text, "{not json");

        tokio::fs::remove_file(&path).await.unwrap();
    }
}
