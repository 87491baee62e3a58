use crate::types::{ChatReply, ChatRequest};
use async_trait::async_trait;
use once_cell::sync::Lazy;
use reqwest::{Client, StatusCode, Url};
use thiserror::Error;

// ============================================
// Error Types
// ============================================

/// Every way a reply can fail to arrive. The panel shows the same apology for all of them.
#[derive(Debug, Error)]
pub enum ChatError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("chat endpoint error {status}: {body}")]
    Status { status: StatusCode, body: String },
    #[error("malformed reply: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("backend reported: {0}")]
    Backend(String),
}

pub type ChatResult<T> = Result<T, ChatError>;

// ============================================
// Backend seam
// ============================================

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait ChatBackend {
    /// Issues exactly one request and resolves with the decoded reply.
    async fn complete(&self, endpoint: &Url, request: &ChatRequest<'_>) -> ChatResult<ChatReply>;
}

static SHARED_CLIENT: Lazy<Client> = Lazy::new(Client::new);

/// JSON-over-HTTP backend: `POST { messages }`, expects `{ response, ... }`.
#[derive(Clone)]
pub struct HttpBackend {
    client: Client,
}

impl Default for HttpBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpBackend {
    pub fn new() -> Self {
        Self {
            client: SHARED_CLIENT.clone(),
        }
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl ChatBackend for HttpBackend {
    async fn complete(&self, endpoint: &Url, request: &ChatRequest<'_>) -> ChatResult<ChatReply> {
        let response = self
            .client
            .post(endpoint.clone())
            .json(request)
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(ChatError::Status { status, body });
        }
        parse_reply(&body)
    }
}

/// Decodes a 2xx body. A non-empty `error` field counts as a failed reply.
pub fn parse_reply(body: &str) -> ChatResult<ChatReply> {
    let reply: ChatReply = serde_json::from_str(body)?;
    match reply.error.as_deref().map(str::trim) {
        Some(err) if !err.is_empty() => Err(ChatError::Backend(err.to_string())),
        _ => Ok(reply),
    }
}
