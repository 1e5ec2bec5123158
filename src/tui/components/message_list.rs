//! Scrollable view of the conversation.
//!
//! ## Responsibilities
//!
//! - Display one bubble per message, oldest first
//! - Keep the newest message in view whenever the conversation grows
//! - Cache bubble heights so only new messages are measured
//!
//! ## Architecture
//!
//! A `MessageList` is rebuilt every frame from two borrows: the persistent
//! `MessageListState` owned by `TuiState` and the conversation slice. The
//! render pass updates the height cache and scroll offset in place.

use ratatui::Frame;
use ratatui::layout::{Position, Rect, Size};
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::core::state::{Message, MessageId};
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::message::MessageBubble;
use crate::tui::event::TuiEvent;

/// Scroll position and height cache that outlive a single frame.
pub struct MessageListState {
    pub scroll_state: ScrollViewState,
    pub layout: LayoutCache,
    /// When true, auto-scroll to bottom on render
    pub stick_to_bottom: bool,
    /// Viewport height from the last render, used to clamp scrolling
    pub viewport_height: u16,
    /// Message count at the previous render; growth re-pins to bottom
    seen_count: usize,
}

impl Default for MessageListState {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageListState {
    pub fn new() -> Self {
        Self {
            scroll_state: ScrollViewState::default(),
            layout: LayoutCache::new(),
            stick_to_bottom: true,
            viewport_height: 0,
            seen_count: 0,
        }
    }

    fn max_offset(&self) -> u16 {
        self.layout
            .total_height()
            .saturating_sub(self.viewport_height)
    }

    /// Clamp scroll offset so it never exceeds the content bounds.
    pub fn clamp_scroll(&mut self) {
        let max_y = self.max_offset();
        let current = self.scroll_state.offset();
        if current.y > max_y {
            self.scroll_state.set_offset(Position {
                x: current.x,
                y: max_y,
            });
        }
    }

    /// Move the offset to the last full page of content.
    fn pin_to_bottom(&mut self) {
        let x = self.scroll_state.offset().x;
        self.scroll_state.set_offset(Position {
            x,
            y: self.max_offset(),
        });
    }

    /// Clamp scroll and re-engage auto-scroll if the user has reached the bottom.
    pub fn repin_if_at_bottom(&mut self) {
        let max_y = self.max_offset();
        let current = self.scroll_state.offset();
        if current.y >= max_y {
            self.stick_to_bottom = true;
            self.scroll_state.set_offset(Position {
                x: current.x,
                y: max_y,
            });
        }
    }

    /// Called once per render with the current message count.
    fn observe_count(&mut self, count: usize) {
        if count > self.seen_count {
            self.stick_to_bottom = true;
        }
        self.seen_count = count;
    }
}

/// Scrollable conversation view component.
/// Created fresh each frame with references to state and data.
pub struct MessageList<'a> {
    pub state: &'a mut MessageListState,
    pub messages: &'a [Message],
}

impl<'a> MessageList<'a> {
    pub fn new(state: &'a mut MessageListState, messages: &'a [Message]) -> Self {
        Self { state, messages }
    }
}

impl<'a> Component for MessageList<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let content_width = area.width.saturating_sub(1); // -1 for scrollbar safe area

        self.state.observe_count(self.messages.len());

        // 1. Update layout cache: measure only messages past the reusable prefix
        let layout = &mut self.state.layout;
        let reusable = layout.reusable_count(self.messages, content_width);
        layout.truncate(reusable);
        for message in &self.messages[reusable..] {
            let height = MessageBubble::calculate_height(message.text(), content_width);
            layout.push(message.id(), height);
        }
        layout.content_width = content_width;
        layout.rebuild_prefix_heights();

        let total_height = layout.total_height();

        // 2. Settle the offset for this frame before culling
        self.state.viewport_height = area.height;
        if self.state.stick_to_bottom {
            self.state.pin_to_bottom();
        } else {
            self.state.clamp_scroll();
        }

        let scroll_offset = self.state.scroll_state.offset().y;
        let visible_range = self.state.layout.visible_range(scroll_offset, area.height);

        // 3. Render visible bubbles into a ScrollView
        let mut scroll_view = ScrollView::new(Size::new(content_width, total_height))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Automatic)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);

        let mut y_offset: u16 = if visible_range.start > 0 {
            self.state.layout.prefix_heights[visible_range.start - 1]
        } else {
            0
        };

        for i in visible_range {
            let height = self.state.layout.heights[i];
            let rect = Rect::new(0, y_offset, content_width, height);
            scroll_view.render_widget(MessageBubble::new(&self.messages[i]), rect);
            y_offset += height;
        }

        frame.render_stateful_widget(scroll_view, area, &mut self.state.scroll_state);
    }
}

/// EventHandler is implemented on `MessageListState` rather than `MessageList`
/// because `MessageList` is recreated each frame and can't hold scroll state.
impl EventHandler for MessageListState {
    type Event = ();

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::ScrollUp => {
                self.scroll_state.scroll_up();
                self.stick_to_bottom = false;
            }
            TuiEvent::ScrollDown => {
                self.scroll_state.scroll_down();
                self.repin_if_at_bottom();
            }
            TuiEvent::ScrollPageUp => {
                self.scroll_state.scroll_page_up();
                self.stick_to_bottom = false;
            }
            TuiEvent::ScrollPageDown => {
                self.scroll_state.scroll_page_down();
                self.repin_if_at_bottom();
            }
            TuiEvent::ScrollToBottom => {
                self.stick_to_bottom = true;
                self.pin_to_bottom();
            }
            _ => {}
        }
        None
    }
}

/// Cached bubble heights, keyed by message id.
///
/// Messages never change once appended, so a cached height stays valid as
/// long as the id at that position and the content width are unchanged.
pub struct LayoutCache {
    pub heights: Vec<u16>,
    pub prefix_heights: Vec<u16>,
    ids: Vec<MessageId>,
    content_width: u16,
}

impl Default for LayoutCache {
    fn default() -> Self {
        Self::new()
    }
}

impl LayoutCache {
    pub fn new() -> Self {
        Self {
            heights: Vec::new(),
            prefix_heights: Vec::new(),
            ids: Vec::new(),
            content_width: 0,
        }
    }

    /// Number of leading cached heights still valid for `messages` at `content_width`.
    pub fn reusable_count(&self, messages: &[Message], content_width: u16) -> usize {
        if self.content_width != content_width {
            return 0;
        }
        self.ids
            .iter()
            .zip(messages)
            .take_while(|(id, message)| **id == message.id())
            .count()
    }

    fn truncate(&mut self, len: usize) {
        self.heights.truncate(len);
        self.ids.truncate(len);
    }

    fn push(&mut self, id: MessageId, height: u16) {
        self.ids.push(id);
        self.heights.push(height);
    }

    pub fn total_height(&self) -> u16 {
        self.prefix_heights.last().copied().unwrap_or(0)
    }

    pub fn rebuild_prefix_heights(&mut self) {
        self.prefix_heights = self
            .heights
            .iter()
            .scan(0u16, |acc, &h| {
                *acc = acc.saturating_add(h);
                Some(*acc)
            })
            .collect();
    }

    /// Indices of messages overlapping the viewport, plus half a viewport of slack.
    pub fn visible_range(&self, scroll_offset: u16, viewport_height: u16) -> std::ops::Range<usize> {
        let buffer = viewport_height / 2;
        let buffered_start = scroll_offset.saturating_sub(buffer);
        let buffered_end = scroll_offset
            .saturating_add(viewport_height)
            .saturating_add(buffer);

        let start = self
            .prefix_heights
            .partition_point(|&end| end <= buffered_start);
        let end = self
            .prefix_heights
            .partition_point(|&end| end < buffered_end)
            .saturating_add(1)
            .min(self.prefix_heights.len());

        start..end
    }
}
