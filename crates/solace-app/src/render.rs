//! Terminal presentation of the transcript and the document table.
//!
//! Pure string projections; every decision about what the strings say
//! already happened in the chat and ingestion engines.

use solace_chat::{Role, Turn};
use solace_ingest::DocumentRecord;

/// Empty-transcript greeting shown before the first exchange.
pub const WELCOME_BANNER: &str =
    "Welcome. Ask me anything about ketamine-assisted therapy.\nType 'exit' to leave.";

/// Accepted upload extensions, surfaced as help text only. The backend
/// alone decides what it accepts.
pub const ACCEPTED_EXTENSIONS: &str = ".pdf .docx .txt .md";

/// Render one transcript turn with a speaker prefix.
pub fn render_turn(turn: &Turn) -> String {
    let speaker = match turn.role {
        Role::User => "You",
        Role::Assistant => "Solace",
    };
    format!("{}: {}", speaker, turn.content)
}

/// Render the document table: filename, classification marker, upload date.
pub fn render_documents(documents: &[DocumentRecord]) -> String {
    if documents.is_empty() {
        return "No documents uploaded yet.".to_string();
    }
    let mut lines = Vec::with_capacity(documents.len() + 1);
    lines.push(format!(
        "{:<40} {:<16} {}",
        "Filename", "Classification", "Uploaded"
    ));
    for doc in documents {
        let marker = if doc.relevant {
            "Active Training"
        } else {
            "Rejected"
        };
        lines.push(format!(
            "{:<40} {:<16} {}",
            doc.filename,
            marker,
            doc.uploaded_at.format("%Y-%m-%d")
        ));
    }
    lines.join("\n")
}

// =============================================================================
// Tests
// =============================================================================
