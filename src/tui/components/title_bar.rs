//! # TitleBar Component
//!
//! Single-line bar at the top of every screen: app name, who is signed in,
//! and the transient status message.
//!
//! Stateless. All three props come from core `App` state; the bar just
//! renders what it's given.
//!
//! 1. **Signed in + status**: `"Message Board (admin: admin) | Loading..."`
//! 2. **Signed in**: `"Message Board (admin: admin)"`
//! 3. **Signed out**: `"Message Board"` or `"Message Board | <status>"`

use crate::tui::component::Component;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::Span;

pub struct TitleBar {
    pub username: Option<String>,
    pub role: Option<String>,
    pub status_message: String,
}

impl TitleBar {
    pub fn new(username: Option<String>, role: Option<String>, status_message: String) -> Self {
        Self {
            username,
            role,
            status_message,
        }
    }

    fn text(&self) -> String {
        let mut title = String::from("Message Board");
        if let Some(user) = &self.username {
            match &self.role {
                Some(role) => title.push_str(&format!(" ({role}: {user})")),
                None => title.push_str(&format!(" ({user})")),
            }
        }
        if !self.status_message.is_empty() {
            title.push_str(" | ");
            title.push_str(&self.status_message);
        }
        title
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let span = Span::styled(self.text(), Style::default().add_modifier(Modifier::BOLD));
        frame.render_widget(span, area);
    }
}
