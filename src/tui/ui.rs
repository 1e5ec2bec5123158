use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::core::state::ConversationState;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::input_box;
use crate::tui::components::{Header, LoadingIndicator, MessageList};

/// Draw one frame.
///
/// ```text
/// ┌ header ─────────────────────────────┐  1 row
/// │ message list (scrollable)           │  fills
/// │ ⠋ Thinking...                       │  1 row while loading
/// │ ⚠ error banner                      │  1 row while an error is set
/// └ input box ──────────────────────────┘  3 rows
/// ```
pub fn draw_ui(
    frame: &mut Frame,
    state: &ConversationState,
    tui: &mut TuiState,
    spinner_frame: usize,
) {
    use Constraint::{Length, Min};

    let loading_rows = u16::from(state.is_loading());
    let banner_rows = u16::from(state.last_error().is_some());

    let [header_area, list_area, loading_area, banner_area, input_area] = Layout::vertical([
        Length(1),
        Min(0),
        Length(loading_rows),
        Length(banner_rows),
        Length(input_box::HEIGHT),
    ])
    .areas(frame.area());

    Header::new(state.model_status()).render(frame, header_area);
    MessageList::new(&mut tui.message_list, state.messages()).render(frame, list_area);

    if state.is_loading() {
        LoadingIndicator::new(spinner_frame).render(frame, loading_area);
    }

    if let Some(error) = state.last_error() {
        let style = Style::default().fg(Color::Red).add_modifier(Modifier::BOLD);
        let banner = Line::from(vec![Span::styled("⚠ ", style), Span::styled(error, style)]);
        frame.render_widget(banner, banner_area);
    }

    tui.input_box.render(frame, input_area);
}
