//! # Pagination Component
//!
//! Bottom bar: `◀ Previous   Page N   Next ▶` plus key hints. Stateless; the
//! page number is a prop from `FeedState`. "Previous" is dimmed on page 1
//! since it won't go anywhere.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::component::Component;

pub struct Pagination {
    pub page: u32,
    pub is_admin: bool,
}

impl Pagination {
    pub fn new(page: u32, is_admin: bool) -> Self {
        Self { page, is_admin }
    }

    fn line(&self) -> Line<'static> {
        let enabled = Style::default().fg(Color::Cyan);
        let disabled = Style::default().fg(Color::DarkGray);
        let hint = Style::default().fg(Color::DarkGray);

        let previous_style = if self.page > 1 { enabled } else { disabled };
        let keys = if self.is_admin {
            "   ←→ page · Enter post · Ctrl+X logout · Esc quit"
        } else {
            "   ←→ page · ↑↓ scroll · Ctrl+X logout · Esc quit"
        };

        Line::from(vec![
            Span::styled("◀ Previous", previous_style),
            Span::raw("   "),
            Span::styled(
                format!("Page {}", self.page),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw("   "),
            Span::styled("Next ▶", enabled),
            Span::styled(keys, hint),
        ])
    }
}

impl Component for Pagination {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        frame.render_widget(Paragraph::new(self.line()).alignment(Alignment::Center), area);
    }
}
