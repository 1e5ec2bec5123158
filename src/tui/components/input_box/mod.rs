//! # InputBox Component
//!
//! Single-line message entry with a send hint and a character counter.
//!
//! ## Responsibilities
//!
//! - Capture text input (typing and bracketed paste), capped at `MAX_CHARS`
//! - Handle editing (backspace, delete, cursor movement)
//! - Handle submission (Enter)
//! - Lock itself while a message is being sent
//!
//! ## State Management
//!
//! The buffer is internal state. `disabled` is a prop synced from the
//! session's loading flag every frame via [`InputBox::set_disabled`].
//! Cursor position and horizontal scroll are encapsulated in `CursorState`.

mod cursor;
mod edit;

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Padding, Paragraph};

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

use cursor::CursorState;
use edit::{fit_to_limit, inner_width};

pub use edit::MAX_CHARS;

pub const PLACEHOLDER: &str = "Type your message here...";
const SEND_HINT: &str = " Send ⏎ ";
const SENDING_HINT: &str = " Sending... ";

/// Fixed height: one text row plus top and bottom borders.
pub const HEIGHT: u16 = 3;

/// High-level events emitted by the InputBox
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// User submitted the text (Enter pressed). Carries the raw, untrimmed buffer.
    Submit(String),
    ContentChanged,
}

/// Text input component.
///
/// # Props
///
/// - `disabled`: true while a chat call is in flight
///
/// # State
///
/// - `buffer`: Current text being typed
/// - `focused`: whether the box owns the terminal cursor
/// - `cursor`: Cursor position and scroll offset (see `CursorState`)
pub struct InputBox {
    buffer: String,
    disabled: bool,
    focused: bool,
    cursor: CursorState,
}

impl Default for InputBox {
    fn default() -> Self {
        Self::new()
    }
}

impl InputBox {
    pub fn new() -> Self {
        Self {
            buffer: String::new(),
            disabled: false,
            focused: true,
            cursor: CursorState::new(),
        }
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// Sync the `disabled` prop. Re-enabling hands focus back to the box.
    pub fn set_disabled(&mut self, disabled: bool) {
        if self.disabled && !disabled {
            self.focused = true;
        } else if disabled {
            self.focused = false;
        }
        self.disabled = disabled;
    }

    fn char_count(&self) -> usize {
        self.buffer.chars().count()
    }

    fn insert(&mut self, incoming: &str) -> Option<InputEvent> {
        let text = fit_to_limit(incoming, self.char_count());
        if text.is_empty() {
            return None;
        }
        self.buffer.insert_str(self.cursor.pos, &text);
        self.cursor.pos += text.len();
        Some(InputEvent::ContentChanged)
    }
}

impl Component for InputBox {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let width = inner_width(area.width);
        self.cursor.update_scroll(&self.buffer, width);

        let (hint, border_style) = if self.disabled {
            (SENDING_HINT, Style::default().fg(Color::DarkGray))
        } else {
            (SEND_HINT, Style::default().fg(Color::Green))
        };
        let counter = format!(" {}/{} ", self.char_count(), MAX_CHARS);

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .title(Line::from(hint).right_aligned())
            .title_bottom(Line::from(counter).right_aligned())
            .padding(Padding::horizontal(1));

        let paragraph = if self.buffer.is_empty() {
            Paragraph::new(PLACEHOLDER).style(
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
            )
        } else {
            let (visible, _) = self.cursor.visible(&self.buffer, width);
            let style = if self.disabled {
                Style::default().fg(Color::DarkGray)
            } else {
                Style::default()
            };
            Paragraph::new(visible.to_string()).style(style)
        };

        frame.render_widget(paragraph.block(block), area);

        if self.focused {
            frame.set_cursor_position(self.cursor.screen_pos(&self.buffer, area));
        }
    }
}

impl EventHandler for InputBox {
    type Event = InputEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        if self.disabled {
            return None;
        }
        match event {
            TuiEvent::InputChar(c) => self.insert(c.encode_utf8(&mut [0; 4])),
            TuiEvent::Paste(text) => self.insert(text),
            TuiEvent::Backspace => {
                let end = self.cursor.pos;
                self.cursor.move_left(&self.buffer).then(|| {
                    self.buffer.drain(self.cursor.pos..end);
                    InputEvent::ContentChanged
                })
            }
            TuiEvent::Delete => {
                let start = self.cursor.pos;
                let mut probe = CursorState { pos: start, scroll: 0 };
                probe.move_right(&self.buffer).then(|| {
                    self.buffer.drain(start..probe.pos);
                    InputEvent::ContentChanged
                })
            }
            TuiEvent::CursorLeft => self
                .cursor
                .move_left(&self.buffer)
                .then_some(InputEvent::ContentChanged),
            TuiEvent::CursorRight => self
                .cursor
                .move_right(&self.buffer)
                .then_some(InputEvent::ContentChanged),
            TuiEvent::CursorHome => self.cursor.move_home().then_some(InputEvent::ContentChanged),
            TuiEvent::CursorEnd => self
                .cursor
                .move_end(&self.buffer)
                .then_some(InputEvent::ContentChanged),
            TuiEvent::Submit => {
                if self.buffer.trim().is_empty() {
                    return None;
                }
                let text = std::mem::take(&mut self.buffer);
                self.cursor.reset();
                self.focused = true;
                Some(InputEvent::Submit(text))
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn type_text(input: &mut InputBox, text: &str) {
        for c in text.chars() {
            input.handle_event(&TuiEvent::InputChar(c));
        }
    }

    fn render_text(input: &mut InputBox, width: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, HEIGHT)).unwrap();
        terminal.draw(|f| input.render(f, f.area())).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_handle_input() {
        let mut input = InputBox::new();

        let res = input.handle_event(&TuiEvent::InputChar('a'));
        assert_eq!(res, Some(InputEvent::ContentChanged));
        type_text(&mut input, "bc");
        assert_eq!(input.buffer(), "abc");

        assert_eq!(
            input.handle_event(&TuiEvent::Backspace),
            Some(InputEvent::ContentChanged)
        );
        assert_eq!(input.buffer(), "ab");
    }

    #[test]
    fn test_editing_in_the_middle() {
        let mut input = InputBox::new();
        type_text(&mut input, "hllo");
        input.handle_event(&TuiEvent::CursorHome);
        input.handle_event(&TuiEvent::CursorRight);
        input.handle_event(&TuiEvent::InputChar('e'));
        assert_eq!(input.buffer(), "hello");

        input.handle_event(&TuiEvent::Delete);
        assert_eq!(input.buffer(), "helo");
        input.handle_event(&TuiEvent::CursorEnd);
        assert_eq!(input.handle_event(&TuiEvent::Delete), None);
    }

    #[test]
    fn test_submit_emits_raw_text_and_clears() {
        let mut input = InputBox::new();
        type_text(&mut input, "  hello ");

        let res = input.handle_event(&TuiEvent::Submit);
        assert_eq!(res, Some(InputEvent::Submit("  hello ".to_string())));
        assert!(input.buffer().is_empty());
        assert!(input.is_focused());
    }

    #[test]
    fn test_blank_submit_is_ignored() {
        let mut input = InputBox::new();
        type_text(&mut input, "   ");
        assert_eq!(input.handle_event(&TuiEvent::Submit), None);
        assert_eq!(input.buffer(), "   ");
    }

    #[test]
    fn test_typing_stops_at_max_chars() {
        let mut input = InputBox::new();
        type_text(&mut input, &"x".repeat(MAX_CHARS));
        assert_eq!(input.handle_event(&TuiEvent::InputChar('y')), None);
        assert_eq!(input.buffer().chars().count(), MAX_CHARS);
    }

    #[test]
    fn test_paste_truncated_and_flattened() {
        let mut input = InputBox::new();
        type_text(&mut input, &"a".repeat(MAX_CHARS - 5));
        input.handle_event(&TuiEvent::Paste("line1\nline2".to_string()));
        assert_eq!(input.buffer().chars().count(), MAX_CHARS);
        assert!(input.buffer().ends_with("line1"));

        let mut input = InputBox::new();
        input.handle_event(&TuiEvent::Paste("one\ntwo".to_string()));
        assert_eq!(input.buffer(), "one two");
    }

    #[test]
    fn test_disabled_ignores_edits_and_submit() {
        let mut input = InputBox::new();
        type_text(&mut input, "draft");
        input.set_disabled(true);
        assert!(!input.is_focused());

        assert_eq!(input.handle_event(&TuiEvent::InputChar('x')), None);
        assert_eq!(input.handle_event(&TuiEvent::Backspace), None);
        assert_eq!(input.handle_event(&TuiEvent::Submit), None);
        assert_eq!(input.buffer(), "draft");
    }

    #[test]
    fn test_focus_returns_when_reenabled() {
        let mut input = InputBox::new();
        input.set_disabled(true);
        input.set_disabled(true);
        assert!(!input.is_focused());
        input.set_disabled(false);
        assert!(input.is_focused());
        assert!(!input.is_disabled());
    }

    #[test]
    fn test_render_placeholder_and_counter() {
        let mut input = InputBox::new();
        let text = render_text(&mut input, 60);
        assert!(text.contains(PLACEHOLDER));
        assert!(text.contains("Send ⏎"));
        assert!(text.contains("0/500"));
    }

    #[test]
    fn test_render_while_sending() {
        let mut input = InputBox::new();
        type_text(&mut input, "hi");
        input.set_disabled(true);
        let text = render_text(&mut input, 60);
        assert!(text.contains("Sending..."));
        assert!(text.contains("2/500"));
        assert!(!text.contains("Send ⏎"));
    }

    #[test]
    fn test_render_scrolls_long_input() {
        let mut input = InputBox::new();
        type_text(&mut input, "abcdefghijklmnopqrstuvwxyz");
        // 20 wide → 16 content columns; cursor at end keeps the tail visible
        let text = render_text(&mut input, 20);
        assert!(text.contains("lmnopqrstuvwxyz"));
        assert!(!text.contains("abc"));
    }
}
