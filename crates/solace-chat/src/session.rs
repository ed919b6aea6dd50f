//! The conversational session engine.
//!
//! Holds the ordered transcript of a single chat session, accepts new user
//! input, serializes submissions with one in-flight request at a time, and
//! reconciles the transcript with the backend's reply or a synthesized
//! error turn. State transitions are atomic under an internal mutex; the
//! backend call is the only suspension point and the mutex is never held
//! across it.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::backend::ChatBackend;
use crate::types::{Turn, APOLOGY_REPLY};

/// Why a submission was rejected without any state change.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RejectReason {
    /// The trimmed message text was empty.
    Empty,
    /// A previous submission has not settled yet.
    Busy,
}

/// Result of a [`SessionEngine::submit`] call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Silent no-op: no turn appended, no network call issued.
    Rejected(RejectReason),
    /// The backend replied; an assistant turn carries its content.
    Answered,
    /// The call failed; an apology turn was appended and the reason should
    /// be surfaced to the user as a blocking notification.
    Failed(String),
}

/// Mutable session state guarded by the engine's mutex.
#[derive(Debug, Default)]
struct SessionState {
    transcript: Vec<Turn>,
    pending_input: String,
    awaiting_reply: bool,
}

/// Single-session engine over an opaque chat backend.
pub struct SessionEngine {
    backend: Arc<dyn ChatBackend>,
    state: Mutex<SessionState>,
    user_id: String,
}

impl SessionEngine {
    /// Create an engine with an empty transcript.
    pub fn new(backend: Arc<dyn ChatBackend>, user_id: String) -> Self {
        Self {
            backend,
            state: Mutex::new(SessionState::default()),
            user_id,
        }
    }

    /// Lock the state, recovering the guard if a panicking holder poisoned
    /// the mutex. Critical sections here only push turns and flip flags, so
    /// the state is still coherent after recovery.
    fn lock_state(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Submit a message to the backend.
    ///
    /// Rejected as a no-op when the trimmed text is empty or a previous
    /// submission is still in flight. On acceptance the user turn is
    /// appended immediately, exactly one backend call is issued, and the
    /// pending window is closed exactly once when the call settles,
    /// either with the reply content or with the fixed apology turn.
    pub async fn submit(&self, text: &str) -> SubmitOutcome {
        let query = text.trim().to_string();
        if query.is_empty() {
            return SubmitOutcome::Rejected(RejectReason::Empty);
        }

        {
            let mut state = self.lock_state();
            if state.awaiting_reply {
                tracing::debug!("Submission rejected: a request is already in flight");
                return SubmitOutcome::Rejected(RejectReason::Busy);
            }
            state.awaiting_reply = true;
            state.pending_input.clear();
            state.transcript.push(Turn::user(query.clone()));
        }

        let result = self.backend.send_query(&query, &self.user_id).await;

        let mut state = self.lock_state();
        state.awaiting_reply = false;
        match result {
            Ok(reply) => {
                state.transcript.push(Turn::assistant(reply.content()));
                SubmitOutcome::Answered
            }
            Err(e) => {
                tracing::warn!(error = %e, "Chat submission failed; appending apology turn");
                state.transcript.push(Turn::assistant(APOLOGY_REPLY.to_string()));
                SubmitOutcome::Failed(e.to_string())
            }
        }
    }

    /// Replace the composed-but-unsubmitted input text. Pure state update:
    /// no validation, no side effects.
    pub fn compose_input(&self, text: &str) {
        self.lock_state().pending_input = text.to_string();
    }

    /// Drain the composed input for submission.
    pub fn take_input(&self) -> String {
        std::mem::take(&mut self.lock_state().pending_input)
    }

    /// The composed-but-unsubmitted input text.
    pub fn pending_input(&self) -> String {
        self.lock_state().pending_input.clone()
    }

    /// Snapshot of the full transcript in creation order.
    pub fn transcript(&self) -> Vec<Turn> {
        self.lock_state().transcript.clone()
    }

    /// Number of turns in the transcript.
    pub fn transcript_len(&self) -> usize {
        self.lock_state().transcript.len()
    }

    /// Whether a submission is currently awaiting its reply.
    pub fn awaiting_reply(&self) -> bool {
        self.lock_state().awaiting_reply
    }
}

// =============================================================================
// Tests
// =============================================================================
