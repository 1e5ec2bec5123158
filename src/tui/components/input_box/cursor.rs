//! Cursor position tracking and horizontal scrolling for the InputBox.
//!
//! `CursorState` owns the cursor byte offset and the scroll column. All
//! methods accept `buffer: &str` explicitly; the text itself is owned by
//! `InputBox`.

use ratatui::layout::Rect;
use unicode_width::UnicodeWidthChar;

use super::edit::{CONTENT_OFFSET, inner_width, next_char_boundary, prev_char_boundary};

/// Cursor and scroll state, separated from the text buffer.
pub(super) struct CursorState {
    /// Cursor position as byte offset in buffer (0..=buffer.len()), always on a char boundary
    pub pos: usize,
    /// Display columns hidden off the left edge
    pub scroll: u16,
}

fn char_width(c: char) -> u16 {
    c.width().unwrap_or(0) as u16
}

fn display_width(text: &str) -> u16 {
    text.chars().map(char_width).fold(0u16, u16::saturating_add)
}

impl CursorState {
    pub fn new() -> Self {
        Self { pos: 0, scroll: 0 }
    }

    /// Reset cursor to start (used after Submit clears the buffer).
    pub fn reset(&mut self) {
        self.pos = 0;
        self.scroll = 0;
    }

    /// Returns `true` if the cursor moved.
    pub fn move_left(&mut self, buffer: &str) -> bool {
        if self.pos == 0 {
            return false;
        }
        self.pos = prev_char_boundary(buffer, self.pos);
        true
    }

    pub fn move_right(&mut self, buffer: &str) -> bool {
        if self.pos >= buffer.len() {
            return false;
        }
        self.pos = next_char_boundary(buffer, self.pos);
        true
    }

    pub fn move_home(&mut self) -> bool {
        std::mem::replace(&mut self.pos, 0) != 0
    }

    pub fn move_end(&mut self, buffer: &str) -> bool {
        std::mem::replace(&mut self.pos, buffer.len()) != buffer.len()
    }

    /// Display column of the cursor within the whole buffer.
    pub fn column(&self, buffer: &str) -> u16 {
        display_width(&buffer[..self.pos])
    }

    /// Adjust `scroll` so the cursor column lies inside a viewport `width` columns wide.
    pub fn update_scroll(&mut self, buffer: &str, width: u16) {
        if width == 0 {
            self.scroll = 0;
            return;
        }
        let col = self.column(buffer);
        if col < self.scroll {
            self.scroll = col;
        } else if col >= self.scroll + width {
            self.scroll = col + 1 - width;
        }
    }

    /// The slice of `buffer` visible in a viewport `width` columns wide,
    /// plus the column (relative to the viewport) where the cursor sits.
    pub fn visible<'b>(&self, buffer: &'b str, width: u16) -> (&'b str, u16) {
        let mut col = 0u16;
        let mut start = buffer.len();
        let mut start_col = 0u16;
        for (i, c) in buffer.char_indices() {
            if col >= self.scroll {
                start = i;
                start_col = col;
                break;
            }
            col = col.saturating_add(char_width(c));
        }
        if start == buffer.len() {
            start_col = col;
        }

        let mut end = start;
        let mut used = 0u16;
        for (i, c) in buffer[start..].char_indices() {
            let w = char_width(c);
            if used + w > width {
                break;
            }
            used += w;
            end = start + i + c.len_utf8();
        }

        let cursor_col = self.column(buffer).saturating_sub(start_col);
        (&buffer[start..end], cursor_col)
    }

    /// Screen position for the terminal cursor inside the bordered `area`.
    pub fn screen_pos(&self, buffer: &str, area: Rect) -> (u16, u16) {
        let width = inner_width(area.width);
        let (_, cursor_col) = self.visible(buffer, width);
        let max_col = width.saturating_sub(1);
        (
            area.x + CONTENT_OFFSET + cursor_col.min(max_col),
            area.y + 1,
        )
    }
}
