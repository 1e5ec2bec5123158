//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::api::{ChatReply, ChatService, HealthStatus, RemoteError};

/// A scripted `ChatService`. Queue results with `push_chat` / `push_health`;
/// each call pops the next one. An empty queue answers with a network error.
#[derive(Default)]
pub struct StubService {
    chat_results: Mutex<VecDeque<Result<ChatReply, RemoteError>>>,
    health_results: Mutex<VecDeque<Result<HealthStatus, RemoteError>>>,
    chat_calls: Mutex<Vec<String>>,
    health_calls: Mutex<usize>,
}

impl StubService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_chat(&self, result: Result<ChatReply, RemoteError>) {
        self.chat_results.lock().unwrap().push_back(result);
    }

    pub fn push_health(&self, result: Result<HealthStatus, RemoteError>) {
        self.health_results.lock().unwrap().push_back(result);
    }

    /// Messages passed to `chat`, in call order.
    pub fn chat_calls(&self) -> Vec<String> {
        self.chat_calls.lock().unwrap().clone()
    }

    pub fn health_calls(&self) -> usize {
        *self.health_calls.lock().unwrap()
    }
}

#[async_trait]
impl ChatService for StubService {
    async fn check_health(&self) -> Result<HealthStatus, RemoteError> {
        *self.health_calls.lock().unwrap() += 1;
        self.health_results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(RemoteError::Network("no scripted health result".into())))
    }

    async fn chat(&self, message: &str) -> Result<ChatReply, RemoteError> {
        self.chat_calls.lock().unwrap().push(message.to_string());
        self.chat_results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(RemoteError::Network("no scripted chat result".into())))
    }
}

/// A bot reply with the given stats.
pub fn reply(text: &str, tokens_used: u32, tokens_per_second: f64, status: &str) -> ChatReply {
    ChatReply {
        text: text.to_string(),
        tokens_used,
        tokens_per_second,
        model_status: Some(status.to_string()),
        processing_time: None,
    }
}

/// A health result reporting `status` as the model status.
pub fn health(status: &str) -> HealthStatus {
    HealthStatus {
        model_status: Some(status.to_string()),
        status: Some("ok".to_string()),
        api_version: None,
    }
}
