use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Fixed assistant content synthesized when an accepted submission fails.
pub const APOLOGY_REPLY: &str = "Sorry, I encountered an error. Please try again.";

/// Assistant content used when a well-formed reply carries neither a
/// `message` nor a `response` field.
pub const NO_REPLY_FALLBACK: &str = "(no response)";

/// Author of a transcript turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Assistant,
}

/// One message in a conversation.
///
/// Turns are append-only: once inserted into the transcript they are never
/// mutated or removed, and ids are never reused.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub id: Uuid,
    pub role: Role,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl Turn {
    /// Create a user-authored turn with a fresh id and timestamp.
    pub fn user(content: String) -> Self {
        Self::new(Role::User, content)
    }

    /// Create an assistant-authored turn with a fresh id and timestamp.
    pub fn assistant(content: String) -> Self {
        Self::new(Role::Assistant, content)
    }

    fn new(role: Role, content: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            role,
            content,
            created_at: Utc::now(),
        }
    }
}

/// Request body for the chat endpoint.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ChatQuery {
    pub query: String,
    pub user_id: String,
}

/// Reply body from the chat endpoint, parsed leniently.
///
/// The backend has answered under two field names over time; both are
/// optional here and coalesced first-present-wins by [`ChatReply::content`].
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ChatReply {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub response: Option<String>,
}

impl ChatReply {
    /// Assistant content for this reply: `message`, else `response`, else
    /// the literal no-response fallback.
    pub fn content(self) -> String {
        self.message
            .or(self.response)
            .unwrap_or_else(|| NO_REPLY_FALLBACK.to_string())
    }
}

// =============================================================================
// Tests
// =============================================================================
