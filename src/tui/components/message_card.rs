use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Padding, Paragraph, Widget, Wrap};

use crate::api::Message;

/// One message from the feed: body text in a rounded box, author id on the
/// bottom border.
///
/// Transient: built per frame by `MessageList`, which also uses
/// [`height`](Self::height) to lay cards out inside its scroll view.
#[derive(Clone, Copy)]
pub struct MessageCard<'a> {
    pub message: &'a Message,
}

impl<'a> MessageCard<'a> {
    pub fn new(message: &'a Message) -> Self {
        Self { message }
    }

    fn paragraph(&self) -> Paragraph<'a> {
        let border = Style::default().fg(Color::Green).add_modifier(Modifier::DIM);
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(border)
            .padding(Padding::horizontal(1))
            .title(Line::from(format!("#{}", self.message.id)))
            .title_bottom(
                Line::from(format!("User ID: {}", self.message.user_id)).right_aligned(),
            );
        Paragraph::new(self.message.message.as_str())
            .block(block)
            .wrap(Wrap { trim: false })
    }

    /// Rendered height at `width`, borders included. Saturates at `u16::MAX`.
    pub fn height(&self, width: u16) -> u16 {
        u16::try_from(self.paragraph().line_count(width)).unwrap_or(u16::MAX)
    }
}

impl Widget for MessageCard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.paragraph().render(area, buf);
    }
}
