//! Chat backend seam and its HTTP implementation.

use std::time::Duration;

use async_trait::async_trait;

use crate::error::ChatError;
use crate::types::{ChatQuery, ChatReply};

/// The inference backend as seen by the session engine: one request, one
/// reply, no streaming.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Send one chat query carrying the message text and the caller
    /// identity tag, and return the parsed reply body.
    async fn send_query(&self, query: &str, user_id: &str) -> Result<ChatReply, ChatError>;
}

/// HTTP chat backend: `POST {base_url}/api/chat` with `{query, user_id}`.
///
/// This call path carries no authentication. The request timeout lives on
/// the underlying client, so a never-settling connection fails at the
/// transport layer rather than leaving the session pending forever.
pub struct HttpChatBackend {
    client: reqwest::Client,
    base_url: String,
}

impl HttpChatBackend {
    /// Build a backend against the given origin with a per-request timeout.
    pub fn new(base_url: &str, request_timeout: Duration) -> Result<Self, ChatError> {
        let client = reqwest::Client::builder()
            .timeout(request_timeout)
            .build()
            .map_err(|e| ChatError::Transport(e.to_string()))?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl ChatBackend for HttpChatBackend {
    async fn send_query(&self, query: &str, user_id: &str) -> Result<ChatReply, ChatError> {
        let url = format!("{}/api/chat", self.base_url);
        let body = ChatQuery {
            query: query.to_string(),
            user_id: user_id.to_string(),
        };

        let response = self.client.post(&url).json(&body).send().await.map_err(|e| {
            tracing::warn!(error = %e, url = %url, "Chat request failed to send");
            ChatError::Transport(e.to_string())
        })?;

        let status = response.status();
        if !status.is_success() {
            let detail = extract_detail(response).await;
            tracing::warn!(status = status.as_u16(), detail = %detail, "Chat request rejected");
            return Err(ChatError::Backend {
                status: status.as_u16(),
                detail,
            });
        }

        response
            .json::<ChatReply>()
            .await
            .map_err(|e| ChatError::MalformedReply(e.to_string()))
    }
}

/// Pull the `detail` field out of an error body, falling back to the raw
/// body text and then the canonical status phrase.
pub(crate) async fn extract_detail(response: reqwest::Response) -> String {
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
