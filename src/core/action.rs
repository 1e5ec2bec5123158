//! # Actions
//!
//! Everything that can happen to a session becomes an `Action`.
//! User presses Enter? That's `Action::Submit(text)`.
//! The API answers? That's `Action::ChatSucceeded(reply)` or `Action::ChatFailed(err)`.
//!
//! `update()` applies an action to the state and returns the `Effect` the
//! driver must run next. No I/O happens here.
//!
//! ```text
//! State + Action  →  update()  →  State' + Effect
//! ```
//!
//! ## State machine
//!
//! ```text
//!            Submit(non-blank)
//!    Idle ─────────────────────▶ Sending
//!     ▲                             │
//!     └──── ChatSucceeded ──────────┤
//!     └──── ChatFailed ─────────────┘
//! ```
//!
//! Blank submissions and submissions while `Sending` are dropped silently.

use log::{debug, info, warn};

use crate::api::{ChatReply, HealthStatus, RemoteError};
use crate::core::state::{ConversationState, MessageMeta, Phase, Role};

/// Shown when a failed chat call carries no server detail.
pub const FALLBACK_ERROR: &str = "Failed to communicate with the chatbot service";

#[derive(Debug)]
pub enum Action {
    /// The input box emitted text (raw, untrimmed).
    Submit(String),
    ChatSucceeded(ChatReply),
    ChatFailed(RemoteError),
    HealthChecked(HealthStatus),
    Quit,
}

/// Side effect requested by `update()`, executed by the driver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    /// Call the chat endpoint with this text.
    SendChat(String),
    /// Call the health endpoint.
    ProbeHealth,
    Quit,
}

/// Session start: a seeded conversation plus the one-time health probe.
pub fn init() -> (ConversationState, Effect) {
    (ConversationState::new(), Effect::ProbeHealth)
}

pub fn update(state: &mut ConversationState, action: Action) -> Effect {
    match action {
        Action::Submit(text) => {
            if text.trim().is_empty() {
                debug!("Ignoring blank submission");
                return Effect::None;
            }
            if state.phase() == Phase::Sending {
                debug!("Ignoring submission while a chat call is in flight");
                return Effect::None;
            }
            state.push(Role::User, text.clone(), None);
            state.last_error = None;
            state.is_loading = true;
            Effect::SendChat(text)
        }
        Action::ChatSucceeded(reply) => {
            if state.phase() != Phase::Sending {
                warn!("Dropping chat reply that arrived while idle");
                return Effect::None;
            }
            let meta = MessageMeta {
                token_count: reply.tokens_used,
                tokens_per_second: reply.tokens_per_second,
                processing_time: reply.processing_time,
            };
            state.push(Role::Bot, reply.text, Some(meta));
            if let Some(status) = reply.model_status {
                state.model_status = Some(status);
            }
            state.is_loading = false;
            Effect::None
        }
        Action::ChatFailed(err) => {
            if state.phase() != Phase::Sending {
                warn!("Dropping chat failure that arrived while idle: {}", err);
                return Effect::None;
            }
            let detail = err.detail().unwrap_or(FALLBACK_ERROR).to_string();
            info!("Chat call failed: {}", err);
            state.push(Role::Error, format!("Error: {detail}"), None);
            state.last_error = Some(detail);
            state.is_loading = false;
            Effect::None
        }
        Action::HealthChecked(health) => {
            if let Some(status) = health.model_status {
                state.model_status = Some(status);
            }
            Effect::None
        }
        Action::Quit => Effect::Quit,
    }
}
