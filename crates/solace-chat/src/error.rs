//! Error types for the conversational session engine.

use solace_core::SolaceError;

/// Errors from the chat backend call path.
///
/// `EmptyMessage` and `Busy` never reach the user as errors; the engine
/// turns them into silent submission rejections.
#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("message cannot be empty")]
    EmptyMessage,
    #[error("a submission is already in flight")]
    Busy,
    #[error("transport failure: {0}")]
    Transport(String),
    #[error("malformed reply body: {0}")]
    MalformedReply(String),
    #[error("backend rejected the request ({status}): {detail}")]
    Backend { status: u16, detail: String },
}

impl From<ChatError> for SolaceError {
    fn from(err: ChatError) -> Self {
        SolaceError::Chat(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_error_display() {
        let err = ChatError::EmptyMessage;
        assert_eq!(err.to_string(), "message cannot be empty");

        let err = ChatError::Busy;
        assert_eq!(err.to_string(), "a submission is already in flight");

        let err = ChatError::Transport("connection refused".to_string());
        assert_eq!(err.to_string(), "transport failure: connection refused");

        let err = ChatError::MalformedReply("expected object".to_string());
        assert_eq!(err.to_string(), "malformed reply body: expected object");

        let err = ChatError::Backend {
            status: 500,
            detail: "internal error".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "backend rejected the request (500): internal error"
        );
    }

    #[test]
    fn test_chat_error_into_solace_error() {
        let err: SolaceError = ChatError::Transport("timed out".to_string()).into();
        assert!(matches!(err, SolaceError::Chat(_)));
        assert!(err.to_string().contains("timed out"));
    }
}
