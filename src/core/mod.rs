//! # Session Controller
//!
//! The chat session's business logic. It knows nothing about the terminal.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • state   (data)       │
//!                    │  • action  (reducer)    │
//!                    │  • effects (async I/O)  │
//!                    └───────────┬─────────────┘
//!                                │
//!                ┌───────────────┴───────────────┐
//!                ▼                               ▼
//!         ┌────────────┐                  ┌────────────┐
//!         │    TUI     │                  │    API     │
//!         │  (ratatui) │                  │  (reqwest) │
//!         └────────────┘                  └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: `ConversationState`, the message log and status flags
//! - [`action`]: `Action`/`Effect` and the `update()` reducer
//! - [`effects`]: runs an `Effect` against a `ChatService`
//! - [`config`]: layered settings

pub mod action;
pub mod config;
pub mod effects;
pub mod state;
