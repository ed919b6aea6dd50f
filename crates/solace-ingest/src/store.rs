//! Document store seam and its HTTP implementation.

use std::time::Duration;

use async_trait::async_trait;
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;

use crate::error::IngestError;
use crate::record::RawDocumentRecord;

/// The knowledge store as seen by the ingestion workflow: one upload call,
/// one listing call, both opaque.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Upload one file for classification and storage.
    async fn upload(&self, filename: &str, bytes: Vec<u8>) -> Result<(), IngestError>;

    /// Fetch the full document listing.
    async fn list(&self) -> Result<Vec<RawDocumentRecord>, IngestError>;
}

/// HTTP document store over the admin endpoints, authenticated with the
/// configured bearer token.
pub struct HttpDocumentStore {
    client: reqwest::Client,
    base_url: String,
    admin_token: Secret<String>,
}

impl HttpDocumentStore {
    /// Build a store against the given origin with a per-request timeout.
    pub fn new(
        base_url: &str,
        admin_token: Secret<String>,
        request_timeout: Duration,
    ) -> Result<Self, IngestError> {
        let client = reqwest::Client::builder()
            .timeout(request_timeout)
            .build()
            .map_err(|e| IngestError::Transport(e.to_string()))?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            admin_token,
        })
    }
}

/// Older backend revisions wrapped the listing in a `documents` object;
/// current ones return the bare array. Accept both.
#[derive(Deserialize)]
#[serde(untagged)]
enum ListingBody {
    Records(Vec<RawDocumentRecord>),
    Wrapped { documents: Vec<RawDocumentRecord> },
}

#[async_trait]
impl DocumentStore for HttpDocumentStore {
    async fn upload(&self, filename: &str, bytes: Vec<u8>) -> Result<(), IngestError> {
        let url = format!("{}/api/admin/upload", self.base_url);
        let part = reqwest::multipart::Part::bytes(bytes).file_name(filename.to_string());
        let form = reqwest::multipart::Form::new().part("file", part);

        let response = self
            .client
            .post(&url)
            .bearer_auth(self.admin_token.expose_secret())
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, url = %url, "Upload request failed to send");
                IngestError::Transport(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let detail = extract_detail(response).await;
            tracing::warn!(status = status.as_u16(), detail = %detail, "Upload rejected");
            return Err(IngestError::Rejected {
                status: status.as_u16(),
                detail,
            });
        }

        Ok(())
    }

    async fn list(&self) -> Result<Vec<RawDocumentRecord>, IngestError> {
        let url = format!("{}/api/admin/documents", self.base_url);

        let response = self
            .client
            .get(&url)
            .bearer_auth(self.admin_token.expose_secret())
            .send()
            .await
            .map_err(|e| IngestError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let detail = extract_detail(response).await;
            return Err(IngestError::Rejected {
                status: status.as_u16(),
                detail,
            });
        }

        let body = response
            .json::<ListingBody>()
            .await
            .map_err(|e| IngestError::MalformedListing(e.to_string()))?;
        Ok(match body {
            ListingBody::Records(records) => records,
            ListingBody::Wrapped { documents } => documents,
        })
    }
}

/// Pull the `detail` field out of an error body, falling back to the raw
/// body text and then the canonical status phrase.
async fn extract_detail(response: reqwest::Response) -> String {
    let status = response.status();
    let text = response.text().await.unwrap_or_default();
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(&text) {
        if let Some(detail) = value.get("detail").and_then(|d| d.as_str()) {
            return detail.to_string();
        }
    }
    if !text.is_empty() {
        return text;
    }
    status
        .canonical_reason()
        .unwrap_or("request failed")
        .to_string()
}
