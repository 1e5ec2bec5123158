//! # Conversation State
//!
//! Everything the session controller owns, in one struct. No TUI types here;
//! presentation state lives in the `tui` module.
//!
//! ```text
//! ConversationState
//! ├── messages: Vec<Message>        // append-only, ids strictly increasing
//! ├── is_loading: bool              // a chat call is in flight
//! ├── last_error: Option<String>    // banner text from the last failure
//! ├── model_status: Option<String>  // from health probe or last reply
//! └── next_id: MessageId            // next id to hand out
//! ```
//!
//! Mutation only happens through `update(state, action)` in action.rs.
//! Renderers get `&ConversationState` and nothing else.

use chrono::{DateTime, Local};

/// Seeded as the first bot message of every session.
pub const GREETING: &str = "Hello! How can I help you today?";

pub type MessageId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Bot,
    Error,
}

impl Role {
    /// Short label shown in the message bubble title.
    pub fn label(self) -> &'static str {
        match self {
            Role::User => "you",
            Role::Bot => "bot",
            Role::Error => "error",
        }
    }
}

/// Generation stats attached to bot replies.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MessageMeta {
    pub token_count: u32,
    pub tokens_per_second: f64,
    /// Server-side generation time in seconds, when reported
    pub processing_time: Option<f64>,
}

/// One entry in the conversation. Fields are private: a message never
/// changes after it is appended.
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    id: MessageId,
    role: Role,
    text: String,
    meta: Option<MessageMeta>,
    created_at: DateTime<Local>,
}

impl Message {
    pub fn id(&self) -> MessageId {
        self.id
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn meta(&self) -> Option<&MessageMeta> {
        self.meta.as_ref()
    }

    pub fn created_at(&self) -> DateTime<Local> {
        self.created_at
    }
}

/// The two states of the chat state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Sending,
}

#[derive(Debug)]
pub struct ConversationState {
    messages: Vec<Message>,
    pub(crate) is_loading: bool,
    pub(crate) last_error: Option<String>,
    pub(crate) model_status: Option<String>,
    next_id: MessageId,
}

impl Default for ConversationState {
    fn default() -> Self {
        Self::new()
    }
}

impl ConversationState {
    /// A fresh session: the greeting, nothing loading, status unknown.
    pub fn new() -> Self {
        let mut state = Self {
            messages: Vec::new(),
            is_loading: false,
            last_error: None,
            model_status: None,
            next_id: 1,
        };
        state.push(Role::Bot, GREETING.to_string(), None);
        state
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn phase(&self) -> Phase {
        if self.is_loading {
            Phase::Sending
        } else {
            Phase::Idle
        }
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn model_status(&self) -> Option<&str> {
        self.model_status.as_deref()
    }

    /// Append a message and return its id.
    pub(crate) fn push(&mut self, role: Role, text: String, meta: Option<MessageMeta>) -> MessageId {
        let id = self.next_id;
        self.next_id += 1;
        self.messages.push(Message {
            id,
            role,
            text,
            meta,
            created_at: Local::now(),
        });
        id
    }
}
