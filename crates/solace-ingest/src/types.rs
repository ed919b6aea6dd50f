use std::fmt;

/// The file staged for ingestion.
///
/// Created on selection, cleared on successful upload or explicit removal,
/// and replaced wholesale on re-selection, never merged.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UploadCandidate {
    pub name: String,
    pub size_bytes: u64,
    pub bytes: Vec<u8>,
}

impl UploadCandidate {
    /// Stage raw file content under the given name.
    pub fn new(name: String, bytes: Vec<u8>) -> Self {
        let size_bytes = bytes.len() as u64;
        Self {
            name,
            size_bytes,
            bytes,
        }
    }
}

/// Outcome of the last submitted upload. Exactly one value at a time; each
/// attempt moves to `InFlight` and resolves to `Succeeded` or `Failed`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum UploadStatus {
    /// No attempt outstanding or displayed.
    #[default]
    Idle,
    /// An upload call has been issued and has not settled.
    InFlight,
    /// The last attempt was accepted by the backend.
    Succeeded(String),
    /// The last attempt was rejected or failed in transit.
    Failed(String),
}

impl UploadStatus {
    /// Whether an upload call is currently outstanding.
    pub fn is_in_flight(&self) -> bool {
        matches!(self, UploadStatus::InFlight)
    }
}

impl fmt::Display for UploadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UploadStatus::Idle => write!(f, "idle"),
            UploadStatus::InFlight => write!(f, "uploading"),
            UploadStatus::Succeeded(msg) => write!(f, "Success: {}", msg),
            UploadStatus::Failed(reason) => write!(f, "Error: {}", reason),
        }
    }
}
