//! Conversational session engine for the Solace client.
//!
//! Owns the transcript of a single chat session, serializes submissions so
//! at most one request is in flight, and reconciles the transcript with the
//! backend's reply or a synthesized error turn.

pub mod backend;
pub mod error;
pub mod session;
pub mod types;

pub use backend::{ChatBackend, HttpChatBackend};
pub use error::ChatError;
pub use session::{RejectReason, SessionEngine, SubmitOutcome};
pub use types::{ChatQuery, ChatReply, Role, Turn, APOLOGY_REPLY, NO_REPLY_FALLBACK};
