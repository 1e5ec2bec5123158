//! Wire types for the chatbot HTTP API plus the domain values built from them.
//!
//! Wire structs mirror the JSON exactly and stay private to the `api` module's
//! callers via conversion: the rest of the crate only sees [`ChatReply`] and
//! [`HealthStatus`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

// ============================================================================
// Requests
// ============================================================================

/// Optional sampling parameters accepted by the chat endpoint.
/// `None` fields are omitted from the request body so the server defaults apply.
#[derive(Serialize, Debug, Clone, Copy, Default, PartialEq)]
pub struct GenerationParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f32>,
}

/// Body of `POST /api/v1/chat/chat`.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ChatRequest {
    pub message: String,
    #[serde(flatten)]
    pub params: GenerationParams,
}

impl ChatRequest {
    pub fn new(message: &str, params: GenerationParams) -> Self {
        Self {
            message: message.to_string(),
            params,
        }
    }
}

// ============================================================================
// Responses
// ============================================================================

/// `model_status` as sent by the server: either a plain string or a flat
/// object such as `{"status": "loaded", "backend": "cpu", "context_size": "4096"}`.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum ModelStatus {
    Text(String),
    Fields(BTreeMap<String, serde_json::Value>),
}

impl ModelStatus {
    /// One-line rendering for the status header.
    /// Objects become `key=value` pairs in key order.
    pub fn summary(&self) -> String {
        match self {
            ModelStatus::Text(text) => text.clone(),
            ModelStatus::Fields(fields) => fields
                .iter()
                .map(|(key, value)| match value {
                    serde_json::Value::String(s) => format!("{key}={s}"),
                    other => format!("{key}={other}"),
                })
                .collect::<Vec<_>>()
                .join(" "),
        }
    }
}

/// Body of a successful `POST /api/v1/chat/chat`.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct ChatResponse {
    pub response: String,
    pub tokens_used: u32,
    pub tokens_per_sec: f64,
    #[serde(default)]
    pub model_status: Option<ModelStatus>,
    #[serde(default)]
    pub processing_time: Option<f64>,
}

/// Body of `GET /api/health`.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct HealthResponse {
    #[serde(default)]
    pub model_status: Option<ModelStatus>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub timestamp: Option<f64>,
    #[serde(default)]
    pub api_version: Option<String>,
}

/// Body of a non-2xx response. FastAPI sends either `{"detail": "..."}` or,
/// for validation failures, `{"detail": [{"msg": "...", ...}, ...]}`.
#[derive(Deserialize, Debug)]
struct ErrorBody {
    #[serde(default)]
    detail: Option<serde_json::Value>,
}

/// Pull a human-readable detail string out of an error response body.
///
/// Returns `None` when the body is not JSON, has no `detail`, or the detail
/// has an unrecognised shape.
pub fn extract_detail(body: &str) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_str(body).ok()?;
    match parsed.detail? {
        serde_json::Value::String(text) if !text.trim().is_empty() => Some(text),
        serde_json::Value::Array(entries) => {
            let messages: Vec<&str> = entries
                .iter()
                .filter_map(|entry| entry.get("msg").and_then(|m| m.as_str()))
                .collect();
            if messages.is_empty() {
                None
            } else {
                Some(messages.join("; "))
            }
        }
        _ => None,
    }
}

// ============================================================================
// Domain values
// ============================================================================

/// A completed chat exchange as the session controller consumes it.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatReply {
    pub text: String,
    pub tokens_used: u32,
    pub tokens_per_second: f64,
    pub model_status: Option<String>,
    pub processing_time: Option<f64>,
}

impl From<ChatResponse> for ChatReply {
    fn from(wire: ChatResponse) -> Self {
        Self {
            text: wire.response,
            tokens_used: wire.tokens_used,
            tokens_per_second: wire.tokens_per_sec,
            model_status: wire.model_status.as_ref().map(ModelStatus::summary),
            processing_time: wire.processing_time,
        }
    }
}

/// Result of a health probe.
#[derive(Debug, Clone, PartialEq)]
pub struct HealthStatus {
    pub model_status: Option<String>,
    pub status: Option<String>,
    pub api_version: Option<String>,
}

impl From<HealthResponse> for HealthStatus {
    fn from(wire: HealthResponse) -> Self {
        Self {
            model_status: wire.model_status.as_ref().map(ModelStatus::summary),
            status: wire.status,
            api_version: wire.api_version,
        }
    }
}
