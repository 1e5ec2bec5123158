//! # Header Component
//!
//! Top status bar: app title, model status, and the menu glyph.
//!
//! ```text
//! Low-Cost Chatbot                                   status: ready  ☰
//! ```
//!
//! Stateless and props-based. `model_status` comes straight from
//! `ConversationState::model_status()`; `None` renders as `unknown`.
//! The `☰` glyph is decoration only and reacts to nothing.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::component::Component;

pub const TITLE: &str = "Low-Cost Chatbot";
pub const MENU_GLYPH: &str = "☰";

pub struct Header<'a> {
    pub model_status: Option<&'a str>,
}

impl<'a> Header<'a> {
    pub fn new(model_status: Option<&'a str>) -> Self {
        Self { model_status }
    }

    pub fn status_text(&self) -> String {
        format!("status: {}", self.model_status.unwrap_or("unknown"))
    }
}

impl<'a> Component for Header<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let status = self.status_text();
        let [title_area, status_area] = Layout::horizontal([
            Constraint::Length(TITLE.len() as u16),
            Constraint::Fill(1),
        ])
        .spacing(1)
        .areas(area);

        frame.render_widget(
            Span::styled(TITLE, Style::default().add_modifier(Modifier::BOLD)),
            title_area,
        );

        let status_style = match self.model_status {
            Some(_) => Style::default().fg(Color::Green),
            None => Style::default().fg(Color::DarkGray),
        };
        let right = Line::from(vec![
            Span::styled(status, status_style),
            Span::raw("  "),
            Span::raw(MENU_GLYPH),
        ])
        .right_aligned();
        frame.render_widget(Paragraph::new(right), status_area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn render(model_status: Option<&str>) -> String {
        let mut terminal = Terminal::new(TestBackend::new(60, 1)).unwrap();
        terminal
            .draw(|f| Header::new(model_status).render(f, f.area()))
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_header_unknown_status() {
        let text = render(None);
        assert!(text.contains(TITLE));
        assert!(text.contains("status: unknown"));
        assert!(text.contains(MENU_GLYPH));
    }

    #[test]
    fn test_header_shows_model_status() {
        let text = render(Some("ready"));
        assert!(text.contains("status: ready"));
        assert!(!text.contains("unknown"));
    }

    #[test]
    fn test_status_text() {
        assert_eq!(Header::new(Some("loaded")).status_text(), "status: loaded");
        assert_eq!(Header::new(None).status_text(), "status: unknown");
    }
}
