//! The document ingestion workflow.
//!
//! Drives a single staged upload candidate through the upload lifecycle
//! and mirrors the backend's document listing. The upload path enforces
//! the same single-in-flight discipline as the chat engine: a second
//! `upload()` while one is outstanding is a rejected no-op rather than a
//! caller responsibility. State transitions are atomic under an internal
//! mutex that is never held across an await.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::record::{normalize, DocumentRecord};
use crate::store::DocumentStore;
use crate::types::{UploadCandidate, UploadStatus};

/// Status message shown for an accepted upload.
pub const UPLOAD_SUCCESS_MESSAGE: &str = "Document uploaded successfully";

/// Result of an [`IngestionWorkflow::upload`] call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UploadOutcome {
    /// No candidate staged: no call issued, status unchanged.
    NoCandidate,
    /// An upload is already in flight: rejected no-op.
    Busy,
    /// The backend accepted the upload.
    Succeeded,
    /// The attempt failed; the reason is shown inline and the candidate is
    /// preserved for a user-initiated retry.
    Failed(String),
}

#[derive(Debug, Default)]
struct IngestState {
    candidate: Option<UploadCandidate>,
    status: UploadStatus,
    documents: Vec<DocumentRecord>,
}

/// Admin-side ingestion workflow over an opaque document store.
pub struct IngestionWorkflow {
    store: Arc<dyn DocumentStore>,
    state: Mutex<IngestState>,
}

impl IngestionWorkflow {
    /// Create a workflow with no candidate and an empty listing cache.
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            store,
            state: Mutex::new(IngestState::default()),
        }
    }

    /// Lock the state, recovering the guard if a panicking holder poisoned
    /// the mutex. Critical sections here only assign fields, so the state
    /// is still coherent after recovery.
    fn lock_state(&self) -> MutexGuard<'_, IngestState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Stage a file for upload, replacing any prior candidate wholesale
    /// and clearing the previous attempt's result display.
    ///
    /// Rejected as a no-op while an upload is in flight; re-selection must
    /// not reopen the guard or swap the candidate under a running call.
    /// No size or type validation happens here; acceptance is delegated
    /// entirely to the backend.
    pub fn select_file(&self, candidate: UploadCandidate) {
        let mut state = self.lock_state();
        if state.status.is_in_flight() {
            tracing::debug!("File selection rejected: an upload is in flight");
            return;
        }
        state.candidate = Some(candidate);
        state.status = UploadStatus::Idle;
    }

    /// Remove the staged candidate without uploading it. Rejected as a
    /// no-op while an upload is in flight.
    pub fn clear_file(&self) {
        let mut state = self.lock_state();
        if state.status.is_in_flight() {
            tracing::debug!("File removal rejected: an upload is in flight");
            return;
        }
        state.candidate = None;
        state.status = UploadStatus::Idle;
    }

    /// Upload the staged candidate.
    ///
    /// One authenticated call per attempt; no retry, no resume, no
    /// cancellation. On success the candidate is cleared and a best-effort
    /// listing refresh follows; its failure never reverts the succeeded
    /// status. On failure the candidate is preserved unchanged.
    pub async fn upload(&self) -> UploadOutcome {
        let candidate = {
            let mut state = self.lock_state();
            if state.status.is_in_flight() {
                tracing::debug!("Upload rejected: an attempt is already in flight");
                return UploadOutcome::Busy;
            }
            let Some(candidate) = state.candidate.clone() else {
                return UploadOutcome::NoCandidate;
            };
            state.status = UploadStatus::InFlight;
            candidate
        };

        let result = self.store.upload(&candidate.name, candidate.bytes).await;

        match result {
            Ok(()) => {
                {
                    let mut state = self.lock_state();
                    state.status = UploadStatus::Succeeded(UPLOAD_SUCCESS_MESSAGE.to_string());
                    state.candidate = None;
                }
                tracing::info!(filename = %candidate.name, "Document uploaded");
                self.refresh().await;
                UploadOutcome::Succeeded
            }
            Err(e) => {
                let reason = e.upload_reason();
                let mut state = self.lock_state();
                state.status = UploadStatus::Failed(reason.clone());
                UploadOutcome::Failed(reason)
            }
        }
    }

    /// Refresh the mirrored document listing.
    ///
    /// Best-effort: on success the cache is replaced wholesale (stale
    /// entries disappear); on failure the previous cache is left untouched
    /// and the failure is logged, never surfaced to the user.
    pub async fn refresh(&self) {
        match self.store.list().await {
            Ok(raw_records) => {
                let mut records = Vec::with_capacity(raw_records.len());
                for raw in raw_records {
                    match normalize(raw) {
                        Some(record) => records.push(record),
                        None => {
                            tracing::warn!("Dropping listing row without usable filename or date")
                        }
                    }
                }
                let mut state = self.lock_state();
                state.documents = records;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Listing refresh failed; keeping cached records");
            }
        }
    }

    /// The staged candidate, if any.
    pub fn candidate(&self) -> Option<UploadCandidate> {
        self.lock_state().candidate.clone()
    }

    /// Outcome of the last submitted upload.
    pub fn status(&self) -> UploadStatus {
        self.lock_state().status.clone()
    }

    /// Snapshot of the cached document listing.
    pub fn documents(&self) -> Vec<DocumentRecord> {
        self.lock_state().documents.clone()
    }
}

// =============================================================================
// Tests
// =============================================================================
