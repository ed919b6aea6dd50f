//! Error types for the ingestion workflow.

use solace_core::SolaceError;

/// Errors from the document store call path.
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("transport failure: {0}")]
    Transport(String),
    #[error("backend rejected the upload ({status}): {detail}")]
    Rejected { status: u16, detail: String },
    #[error("malformed listing body: {0}")]
    MalformedListing(String),
}

impl IngestError {
    /// User-facing reason for a failed upload: the backend `detail` text
    /// when present, else the generic framing.
    pub fn upload_reason(&self) -> String {
        match self {
            IngestError::Rejected { detail, .. } if !detail.is_empty() => detail.clone(),
            _ => "Upload failed".to_string(),
        }
    }
}

impl From<IngestError> for SolaceError {
    fn from(err: IngestError) -> Self {
        SolaceError::Ingest(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = IngestError::Transport("connection reset".to_string());
        assert_eq!(err.to_string(), "transport failure: connection reset");

        let err = IngestError::Rejected {
            status: 400,
            detail: "Unsupported type".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "backend rejected the upload (400): Unsupported type"
        );
    }

    #[test]
    fn test_upload_reason_prefers_backend_detail() {
        let err = IngestError::Rejected {
            status: 400,
            detail: "Unsupported type".to_string(),
        };
        assert_eq!(err.upload_reason(), "Unsupported type");
    }

    #[test]
    fn test_upload_reason_generic_without_detail() {
        let err = IngestError::Rejected {
            status: 500,
            detail: String::new(),
        };
        assert_eq!(err.upload_reason(), "Upload failed");

        let err = IngestError::Transport("reset".to_string());
        assert_eq!(err.upload_reason(), "Upload failed");
    }

    #[test]
    fn test_into_solace_error() {
        let err: SolaceError = IngestError::Transport("reset".to_string()).into();
        assert!(matches!(err, SolaceError::Ingest(_)));
    }
}
