//! # Effects
//!
//! The async half of the reducer. `update()` decides *what* should happen;
//! `perform()` does the I/O and turns the outcome back into an `Action`.
//!
//! ```text
//! update() ──Effect──▶ perform(service, effect) ──Option<Action>──▶ update()
//! ```
//!
//! The TUI driver runs `perform` on a tokio task and sends the action back
//! over its channel.

use log::{debug, info, warn};

use crate::api::ChatService;
use crate::core::action::{Action, Effect};

/// Run one effect against the backend.
///
/// `SendChat` always settles with an action so the session leaves `Sending`.
/// A failed health probe is logged and swallowed.
pub async fn perform(service: &dyn ChatService, effect: Effect) -> Option<Action> {
    match effect {
        Effect::SendChat(message) => match service.chat(&message).await {
            Ok(reply) => {
                info!(
                    "Chat reply: {} tokens at {:.1} tok/s, processing time {:?}s",
                    reply.tokens_used, reply.tokens_per_second, reply.processing_time
                );
                Some(Action::ChatSucceeded(reply))
            }
            Err(e) => Some(Action::ChatFailed(e)),
        },
        Effect::ProbeHealth => match service.check_health().await {
            Ok(health) => {
                debug!("Model status: {:?}", health.model_status);
                Some(Action::HealthChecked(health))
            }
            Err(e) => {
                warn!("Health check failed: {}", e);
                None
            }
        },
        Effect::None | Effect::Quit => None,
    }
}
