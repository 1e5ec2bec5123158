use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

use crate::tui::component::Component;

const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
pub const LABEL: &str = "Thinking...";

/// One-line spinner shown while a chat call is in flight.
/// `frame` is advanced by the event loop's animation clock.
pub struct LoadingIndicator {
    pub frame: usize,
}

impl LoadingIndicator {
    pub fn new(frame: usize) -> Self {
        Self { frame }
    }

    fn glyph(&self) -> &'static str {
        SPINNER_FRAMES[self.frame % SPINNER_FRAMES.len()]
    }
}

impl Component for LoadingIndicator {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let style = Style::default().fg(Color::Blue);
        let line = Line::from(vec![
            Span::styled(self.glyph(), style),
            Span::raw(" "),
            Span::styled(LABEL, style),
        ]);
        frame.render_widget(line, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    #[test]
    fn test_spinner_cycles() {
        assert_eq!(LoadingIndicator::new(0).glyph(), "⠋");
        assert_eq!(LoadingIndicator::new(SPINNER_FRAMES.len()).glyph(), "⠋");
        assert_ne!(LoadingIndicator::new(1).glyph(), LoadingIndicator::new(0).glyph());
    }

    #[test]
    fn test_renders_label() {
        let mut terminal = Terminal::new(TestBackend::new(20, 1)).unwrap();
        terminal
            .draw(|f| LoadingIndicator::new(3).render(f, f.area()))
            .unwrap();
        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains(LABEL));
    }
}
