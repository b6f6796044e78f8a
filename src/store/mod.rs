//! Single-blob JSON persistence for survey responses.
//!
//! The entire response list is stored as one JSON array in one file and
//! rewritten in full on every append. Last-writer-wins, no locking; an
//! interleaving second writer can lose data, which is an accepted
//! limitation of the single-blob layout.

use crate::models::SurveyResponse;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

/// Storage failure surfaced to the caller on write.
///
/// Read-side failures are never surfaced: an unreadable or unparsable
/// blob is treated as an empty dataset.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to serialize survey data")]
    Serialize(#[from] serde_json::Error),

    #[error("failed to write survey data to {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Append-only store over a single JSON data file.
#[derive(Debug, Clone)]
pub struct ResponseStore {
    path: PathBuf,
}

impl ResponseStore {
    /// Creates a store backed by the given data file.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing data file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads all persisted responses.
    ///
    /// A missing file, a read error, or a structurally incompatible blob
    /// all yield an empty list; an empty dataset is a valid state and
    /// read failures are logged rather than raised.
    pub fn load(&self) -> Vec<SurveyResponse> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No data file at {}, starting empty", self.path.display());
                return Vec::new();
            }
            Err(e) => {
                warn!("Failed to read {}: {}", self.path.display(), e);
                return Vec::new();
            }
        };

        match serde_json::from_str(&content) {
            Ok(responses) => responses,
            Err(e) => {
                warn!(
                    "Failed to parse {}, treating as empty: {}",
                    self.path.display(),
                    e
                );
                Vec::new()
            }
        }
    }

    /// Appends one response, rewriting the full blob.
    ///
    /// Write failures (quota, permissions) are surfaced so the caller can
    /// tell the user the submission was not recorded.
    pub fn append(&self, response: &SurveyResponse) -> Result<(), StoreError> {
        let mut responses = self.load();
        responses.push(response.clone());

        let content = serde_json::to_string(&responses)?;
        std::fs::write(&self.path, content).map_err(|source| StoreError::Write {
            path: self.path.clone(),
            source,
        })?;

        debug!(
            "Appended response {} ({} total)",
            response.id,
            responses.len()
        );
        Ok(())
    }

    /// Removes all persisted responses. Idempotent.
    pub fn clear(&self) {
        match std::fs::remove_file(&self.path) {
            Ok(()) => debug!("Cleared survey data at {}", self.path.display()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => warn!("Failed to clear {}: {}", self.path.display(), e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Answer;
    use std::collections::BTreeMap;

    fn make_response(rating: i64) -> SurveyResponse {
        let mut answers = BTreeMap::new();
        answers.insert(1, Answer::Number(rating));
        answers.insert(6, Answer::Text("fine".to_string()));
        SurveyResponse::new(answers)
    }

    fn temp_store() -> (tempfile::TempDir, ResponseStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = ResponseStore::new(dir.path().join("survey_responses.json"));
        (dir, store)
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let (_dir, store) = temp_store();
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_append_then_load_round_trip() {
        let (_dir, store) = temp_store();

        let first = make_response(4);
        store.append(&first).unwrap();
        assert_eq!(store.load().len(), 1);

        let second = make_response(2);
        store.append(&second).unwrap();

        let loaded = store.load();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded.last(), Some(&second));
        assert_eq!(loaded[0], first);
    }

    #[test]
    fn test_clear_is_idempotent() {
        let (_dir, store) = temp_store();

        store.append(&make_response(5)).unwrap();
        store.clear();
        assert!(store.load().is_empty());

        // Clearing an already-empty store must not fail.
        store.clear();
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_clear_then_compute_reports_no_data() {
        let (_dir, store) = temp_store();
        let questions = crate::catalog::survey_questions();

        store.append(&make_response(4)).unwrap();
        assert!(crate::analysis::compute_statistics(&store.load(), &questions).is_some());

        store.clear();
        assert!(crate::analysis::compute_statistics(&store.load(), &questions).is_none());
    }

    #[test]
    fn test_corrupt_blob_fails_closed() {
        let (_dir, store) = temp_store();
        std::fs::write(store.path(), "{not json!").unwrap();
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_incompatible_blob_fails_closed() {
        let (_dir, store) = temp_store();
        // Valid JSON, wrong shape.
        std::fs::write(store.path(), r#"{"responses": 3}"#).unwrap();
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_append_to_unwritable_path_errors() {
        let store = ResponseStore::new("/nonexistent-dir/deeper/survey.json");
        let err = store.append(&make_response(3)).unwrap_err();
        assert!(matches!(err, StoreError::Write { .. }));
    }
}
