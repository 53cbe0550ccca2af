//! # Composer Component
//!
//! Text area for posting a new message. Only rendered for admins; the
//! parent decides that, the composer itself doesn't know about roles.
//!
//! The buffer survives a failed post and is only emptied when the server
//! accepts the message (`Effect::ClearDraft`).

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, BorderType, Paragraph, Wrap};

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

/// Borders top and bottom.
const VERTICAL_OVERHEAD: u16 = 2;
const MAX_VISIBLE_LINES: u16 = 4;
const PLACEHOLDER: &str = "Write a new message...";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComposerEvent {
    Submit(String),
}

#[derive(Debug, Default)]
pub struct Composer {
    pub buffer: String,
    /// Prop: a post is in flight.
    pub is_submitting: bool,
}

impl Composer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    /// Rows needed for the current buffer, clamped to the visible maximum.
    pub fn calculate_height(&self) -> u16 {
        let lines = self.buffer.split('\n').count().max(1) as u16;
        lines.min(MAX_VISIBLE_LINES) + VERTICAL_OVERHEAD
    }
}

impl Component for Composer {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let title = if self.is_submitting {
            "New message (posting...)"
        } else {
            "New message (Enter post · Ctrl+J newline)"
        };
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .title(title);

        let paragraph = if self.buffer.is_empty() {
            Paragraph::new(PLACEHOLDER).style(Style::default().fg(Color::DarkGray))
        } else {
            Paragraph::new(self.buffer.as_str()).style(Style::default().fg(Color::Green))
        };

        // Keep the tail of long drafts in view
        let total = self.buffer.split('\n').count() as u16;
        let scroll = total.saturating_sub(MAX_VISIBLE_LINES);
        frame.render_widget(
            paragraph.block(block).wrap(Wrap { trim: false }).scroll((scroll, 0)),
            area,
        );

        let last_line = self.buffer.rsplit('\n').next().unwrap_or("");
        let row = (total.saturating_sub(1) - scroll).min(area.height.saturating_sub(3));
        let col = (last_line.chars().count() as u16).min(area.width.saturating_sub(3));
        frame.set_cursor_position((area.x + 1 + col, area.y + 1 + row));
    }
}

impl EventHandler for Composer {
    type Event = ComposerEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<ComposerEvent> {
        match event {
            TuiEvent::InputChar(c) => self.buffer.push(*c),
            TuiEvent::Paste(text) => self.buffer.push_str(text),
            TuiEvent::Backspace => {
                self.buffer.pop();
            }
            TuiEvent::Submit => return Some(ComposerEvent::Submit(self.buffer.clone())),
            _ => {}
        }
        None
    }
}
