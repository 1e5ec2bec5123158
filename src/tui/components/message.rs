use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Padding, Paragraph, Widget, Wrap};

use crate::core::state::{Message, MessageMeta, Role};

/// Horizontal padding (per side) between the border and text content.
const CONTENT_PAD_H: u16 = 1;
/// Total horizontal space consumed by borders (1 left + 1 right) and padding.
const HORIZONTAL_OVERHEAD: u16 = 2 + CONTENT_PAD_H * 2;
/// Total vertical space consumed by borders (1 top + 1 bottom).
const VERTICAL_OVERHEAD: u16 = 2;

/// A stateless component that renders a single chat message as a bordered bubble.
///
/// # Design
///
/// `MessageBubble` is a **transient widget**: it's created fresh each frame
/// from a borrowed `Message` and rendered straight into the `MessageList`'s
/// scroll view.
///
/// # Styling
///
/// - **User** (green): the human's messages
/// - **Bot** (blue): replies, with a `"{tokens} tokens · {tps} tok/s"` footer
/// - **Error** (red): failed calls, text already carries its `Error: ` prefix
///
/// # Height Calculation
///
/// [`calculate_height`](Self::calculate_height) predicts rendered height with
/// `textwrap` options that match Ratatui's `Paragraph` wrapping, so the parent
/// `MessageList` can lay out a scroll canvas without rendering anything.
#[derive(Clone, Copy)]
pub struct MessageBubble<'a> {
    pub message: &'a Message,
}

impl<'a> MessageBubble<'a> {
    pub fn new(message: &'a Message) -> Self {
        Self { message }
    }

    /// Calculate the height required for a message's text given a width.
    ///
    /// The wrapping options must match the `Ratatui` default for `Paragraph`
    /// to ensure 1:1 mapping between calculated and actual height.
    pub fn calculate_height(text: &str, width: u16) -> u16 {
        let content_width = width.saturating_sub(HORIZONTAL_OVERHEAD);
        if content_width == 0 {
            // Terminal too narrow for borders + padding; still occupy a row.
            return 1;
        }

        let content = text.trim();
        if content.is_empty() {
            return VERTICAL_OVERHEAD;
        }

        let options = textwrap::Options::new(content_width as usize)
            .break_words(true)
            .word_separator(textwrap::WordSeparator::AsciiSpace);

        let lines = textwrap::wrap(content, options);
        (lines.len() as u16).max(1) + VERTICAL_OVERHEAD
    }
}

pub fn role_style(role: Role) -> Style {
    match role {
        Role::User => Style::default().fg(Color::Green),
        Role::Bot => Style::default().fg(Color::Blue),
        Role::Error => Style::default().fg(Color::Red),
    }
}

/// Footer text for a bot reply.
pub fn meta_label(meta: &MessageMeta) -> String {
    let mut label = format!(
        "{} tokens · {:.1} tok/s",
        meta.token_count, meta.tokens_per_second
    );
    if let Some(seconds) = meta.processing_time {
        label.push_str(&format!(" · {seconds:.2}s"));
    }
    label
}

impl<'a> Widget for MessageBubble<'a> {
    fn render(self, area: Rect, buf: &mut ratatui::buffer::Buffer) {
        let role = self.message.role();
        let style = role_style(role);
        let border_style = match role {
            Role::Error => style.add_modifier(Modifier::BOLD),
            _ => style.add_modifier(Modifier::DIM),
        };

        let title = format!(
            "{} · {}",
            role.label(),
            self.message.created_at().format("%H:%M")
        );

        let mut block = Block::bordered()
            .title(title)
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .title_style(border_style)
            .padding(Padding::horizontal(CONTENT_PAD_H));

        if let Some(meta) = self.message.meta() {
            block = block.title_bottom(Line::from(meta_label(meta)).right_aligned());
        }

        let inner_area = block.inner(area);
        block.render(area, buf);

        Paragraph::new(self.message.text().trim())
            .style(style)
            .wrap(Wrap { trim: true })
            .render(inner_area, buf);
    }
}
