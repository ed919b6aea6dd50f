//! Document ingestion workflow for the Solace admin surface.
//!
//! Stages a single upload candidate, drives the upload lifecycle against
//! the knowledge store, and mirrors the backend's document listing as a
//! read-only, wholesale-refreshed cache.

pub mod error;
pub mod record;
pub mod store;
pub mod types;
pub mod workflow;

pub use error::IngestError;
pub use record::{normalize, DocumentRecord, RawDocumentRecord};
pub use store::{DocumentStore, HttpDocumentStore};
pub use types::{UploadCandidate, UploadStatus};
pub use workflow::{IngestionWorkflow, UploadOutcome};
