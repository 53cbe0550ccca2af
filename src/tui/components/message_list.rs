//! # MessageList Component
//!
//! Scrollable view of the current page of messages.
//!
//! `MessageList` is a transient component (created each frame) that wraps
//! `&'a mut MessageListState` (persistent scroll state) and the messages
//! (props). Since `Component::render` takes `&mut self`, the scroll state can
//! be clamped during the render pass.

use ratatui::Frame;
use ratatui::layout::{Alignment, Position, Rect, Size};
use ratatui::style::{Color, Style};
use ratatui::widgets::Paragraph;
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::api::Message;
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::message_card::MessageCard;
use crate::tui::event::TuiEvent;

/// Must be persisted in the parent TuiState.
#[derive(Default)]
pub struct MessageListState {
    pub scroll_state: ScrollViewState,
    /// Total content height from the last render, for clamping.
    pub content_height: u16,
    pub viewport_height: u16,
}

impl MessageListState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clamp scroll offset so it never exceeds the content bounds.
    pub fn clamp_scroll(&mut self) {
        let max_y = self.content_height.saturating_sub(self.viewport_height);
        let current = self.scroll_state.offset();
        if current.y > max_y {
            self.scroll_state.set_offset(Position {
                x: current.x,
                y: max_y,
            });
        }
    }
}

impl EventHandler for MessageListState {
    type Event = ();

    fn handle_event(&mut self, event: &TuiEvent) -> Option<()> {
        match event {
            TuiEvent::ScrollUp | TuiEvent::CursorUp => self.scroll_state.scroll_up(),
            TuiEvent::ScrollDown | TuiEvent::CursorDown => self.scroll_state.scroll_down(),
            TuiEvent::ScrollPageUp => self.scroll_state.scroll_page_up(),
            TuiEvent::ScrollPageDown => self.scroll_state.scroll_page_down(),
            _ => return None,
        }
        self.clamp_scroll();
        None
    }
}

pub struct MessageList<'a> {
    state: &'a mut MessageListState,
    messages: &'a [Message],
    is_loading: bool,
}

impl<'a> MessageList<'a> {
    pub fn new(state: &'a mut MessageListState, messages: &'a [Message], is_loading: bool) -> Self {
        Self {
            state,
            messages,
            is_loading,
        }
    }
}

impl Component for MessageList<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        if self.messages.is_empty() {
            let text = if self.is_loading {
                "Loading..."
            } else {
                "No messages on this page."
            };
            let empty = Paragraph::new(text)
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center);
            frame.render_widget(empty, area);
            self.state.content_height = 0;
            self.state.viewport_height = area.height;
            self.state.clamp_scroll();
            return;
        }

        // Leave a column for the scrollbar
        let content_width = area.width.saturating_sub(1);
        let cards: Vec<(MessageCard, u16)> = self
            .messages
            .iter()
            .map(|m| {
                let card = MessageCard::new(m);
                (card, card.height(content_width))
            })
            .collect();
        let total_height = cards.iter().map(|(_, h)| *h).fold(0u16, u16::saturating_add);

        self.state.content_height = total_height;
        self.state.viewport_height = area.height;
        self.state.clamp_scroll();

        let mut scroll_view = ScrollView::new(Size::new(content_width, total_height))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Always)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);

        let mut y_offset: u16 = 0;
        for (card, height) in cards {
            scroll_view.render_widget(card, Rect::new(0, y_offset, content_width, height));
            y_offset = y_offset.saturating_add(height);
        }

        frame.render_stateful_widget(scroll_view, area, &mut self.state.scroll_state);
    }
}
