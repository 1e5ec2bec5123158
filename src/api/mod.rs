//! # API Client
//!
//! Outbound HTTP to the chatbot backend: a health probe and a chat call.
//! The rest of the crate talks to the backend only through [`ChatService`].

pub mod client;
pub mod error;
pub mod types;

pub use client::{ChatService, HttpChatClient};
pub use error::RemoteError;
pub use types::{ChatReply, GenerationParams, HealthStatus};
