use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info, warn};
use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue};

use super::error::RemoteError;
use super::types::{
    ChatReply, ChatRequest, ChatResponse, GenerationParams, HealthResponse, HealthStatus,
    extract_detail,
};

/// Every request settles (success or failure) within this window.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

pub const HEALTH_PATH: &str = "/api/health";
pub const CHAT_PATH: &str = "/api/v1/chat/chat";

/// The two calls the session controller makes against the chatbot backend.
///
/// One attempt per call; retries are the caller's business (and the caller
/// doesn't retry).
#[async_trait]
pub trait ChatService: Send + Sync {
    /// Probe the backend and report the model status.
    async fn check_health(&self) -> Result<HealthStatus, RemoteError>;

    /// Send one user message and wait for the full reply.
    async fn chat(&self, message: &str) -> Result<ChatReply, RemoteError>;
}

/// `ChatService` over HTTP/JSON with reqwest.
pub struct HttpChatClient {
    base_url: String,
    params: GenerationParams,
    client: reqwest::Client,
}

impl HttpChatClient {
    /// Builds a client with the standard 30 second timeout.
    pub fn new(base_url: &str, params: GenerationParams) -> Result<Self, RemoteError> {
        Self::with_timeout(base_url, params, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(
        base_url: &str,
        params: GenerationParams,
        timeout: Duration,
    ) -> Result<Self, RemoteError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()
            .map_err(|e| RemoteError::Config(e.to_string()))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            params,
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// Turn a non-2xx response into `RemoteError::Status`, keeping the server's detail.
async fn status_error(response: reqwest::Response) -> RemoteError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    let detail = extract_detail(&body);
    warn!("Chatbot API error: {} - {}", status, body);
    RemoteError::Status { status, detail }
}

#[async_trait]
impl ChatService for HttpChatClient {
    async fn check_health(&self) -> Result<HealthStatus, RemoteError> {
        let url = self.url(HEALTH_PATH);
        debug!("GET {}", url);

        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(status_error(response).await);
        }

        let health: HealthResponse = response.json().await?;
        info!(
            "Health check: status={:?}, api_version={:?}, timestamp={:?}",
            health.status, health.api_version, health.timestamp
        );
        Ok(health.into())
    }

    async fn chat(&self, message: &str) -> Result<ChatReply, RemoteError> {
        let url = self.url(CHAT_PATH);
        let request = ChatRequest::new(message, self.params);
        info!(
            "POST {} (message_len={}, params={:?})",
            url,
            message.len(),
            self.params
        );

        let response = self.client.post(&url).json(&request).send().await?;
        debug!("Chat response status: {}", response.status());
        if !response.status().is_success() {
            return Err(status_error(response).await);
        }

        let body: ChatResponse = response.json().await?;
        info!(
            "Chat reply: {} tokens at {:.1} tok/s",
            body.tokens_used, body.tokens_per_sec
        );
        Ok(body.into())
    }
}
