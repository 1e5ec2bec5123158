//! # TUI Components
//!
//! All UI components for the terminal chat widget.
//!
//! ## Component Architecture
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! Display components that receive all data as parameters:
//! - `Header`: title, model status, menu glyph
//! - `MessageBubble`: one conversation message
//! - `LoadingIndicator`: "Thinking..." spinner
//!
//! ### Stateful Components (Event-Driven)
//!
//! Components that manage local state and emit events:
//! - `InputBox`: single-line text entry, emits `InputEvent::Submit`
//! - `MessageList`: scrollable conversation view with layout caching
//!
//! Components receive external data as props, never by reaching into the
//! session state themselves:
//!
//! ```rust,ignore
//! Header::new(state.model_status()).render(frame, area);
//! ```
//!
//! ## Module Structure
//!
//! ```text
//! components/
//! ├── mod.rs           (this file)
//! ├── header.rs        (Top status bar)
//! ├── loading.rs       (Spinner row)
//! ├── message.rs       (Single message bubble)
//! ├── message_list.rs  (Scrollable message container)
//! └── input_box/       (Text input, cursor, edit helpers)
//! ```

pub mod header;
pub mod input_box;
pub mod loading;
pub mod message;
pub mod message_list;

pub use header::Header;
pub use input_box::{InputBox, InputEvent};
pub use loading::LoadingIndicator;
pub use message::MessageBubble;
pub use message_list::{MessageList, MessageListState};
