//! # Login Form Component
//!
//! Username and password fields, an error line and a key hint, centered on
//! screen. Tab / Shift+Tab / Up / Down move focus, Enter submits.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `LoginFormState` lives in `TuiState`
//! - `LoginForm` is created each frame with borrowed state and props

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Clear, Paragraph, Wrap};

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Field {
    #[default]
    Username,
    Password,
}

impl Field {
    fn other(self) -> Field {
        match self {
            Field::Username => Field::Password,
            Field::Password => Field::Username,
        }
    }
}

/// Events emitted by the login form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginEvent {
    Submit { username: String, password: String },
}

#[derive(Debug, Default)]
pub struct LoginFormState {
    pub username: String,
    pub password: String,
    pub focus: Field,
}

impl LoginFormState {
    pub fn new() -> Self {
        Self::default()
    }

    fn focused_mut(&mut self) -> &mut String {
        match self.focus {
            Field::Username => &mut self.username,
            Field::Password => &mut self.password,
        }
    }
}

impl EventHandler for LoginFormState {
    type Event = LoginEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<LoginEvent> {
        match event {
            TuiEvent::InputChar('\n') => None,
            TuiEvent::InputChar(c) => {
                self.focused_mut().push(*c);
                None
            }
            TuiEvent::Paste(text) => {
                let line = text.lines().next().unwrap_or("");
                self.focused_mut().push_str(line);
                None
            }
            TuiEvent::Backspace => {
                self.focused_mut().pop();
                None
            }
            TuiEvent::NextField
            | TuiEvent::PrevField
            | TuiEvent::CursorUp
            | TuiEvent::CursorDown => {
                self.focus = self.focus.other();
                None
            }
            TuiEvent::Submit => Some(LoginEvent::Submit {
                username: self.username.clone(),
                password: self.password.clone(),
            }),
            _ => None,
        }
    }
}

/// Transient render wrapper for the login form.
pub struct LoginForm<'a> {
    state: &'a LoginFormState,
    error: Option<&'a str>,
    notice: Option<&'a str>,
    is_loading: bool,
}

impl<'a> LoginForm<'a> {
    pub fn new(
        state: &'a LoginFormState,
        error: Option<&'a str>,
        notice: Option<&'a str>,
        is_loading: bool,
    ) -> Self {
        Self {
            state,
            error,
            notice,
            is_loading,
        }
    }

    fn field_block(&self, title: &'static str, field: Field) -> Block<'static> {
        let style = if self.state.focus == field {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(style)
            .title(title)
    }
}

impl Component for LoginForm<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let [panel] = Layout::horizontal([Constraint::Length(48)])
            .flex(Flex::Center)
            .areas(area);
        let [panel] = Layout::vertical([Constraint::Length(14)])
            .flex(Flex::Center)
            .areas(panel);

        frame.render_widget(Clear, panel);
        let outer = Block::bordered()
            .border_type(BorderType::Rounded)
            .title(" Sign in ")
            .title_alignment(Alignment::Center);
        let inner = outer.inner(panel);
        frame.render_widget(outer, panel);

        let [notice_area, user_area, pass_area, error_area, hint_area] = Layout::vertical([
            Constraint::Length(2),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(2),
            Constraint::Length(1),
        ])
        .areas(inner);

        if let Some(notice) = self.notice {
            frame.render_widget(
                Paragraph::new(notice)
                    .style(Style::default().fg(Color::Yellow))
                    .alignment(Alignment::Center)
                    .wrap(Wrap { trim: true }),
                notice_area,
            );
        }

        let username = Paragraph::new(self.state.username.as_str())
            .block(self.field_block("Username", Field::Username));
        frame.render_widget(username, user_area);

        let masked = "•".repeat(self.state.password.chars().count());
        let password =
            Paragraph::new(masked).block(self.field_block("Password", Field::Password));
        frame.render_widget(password, pass_area);

        if let Some(error) = self.error {
            frame.render_widget(
                Paragraph::new(error)
                    .style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD))
                    .alignment(Alignment::Center),
                error_area,
            );
        }

        let hint = if self.is_loading {
            Line::from(Span::styled("Signing in...", Style::default().fg(Color::Yellow)))
        } else {
            Line::from(Span::styled(
                "Tab switch field · Enter sign in · Esc quit",
                Style::default().fg(Color::DarkGray),
            ))
        };
        frame.render_widget(Paragraph::new(hint).alignment(Alignment::Center), hint_area);

        // Cursor at the end of the focused field
        let (field_area, len) = match self.state.focus {
            Field::Username => (user_area, self.state.username.chars().count()),
            Field::Password => (pass_area, self.state.password.chars().count()),
        };
        let max_x = field_area.width.saturating_sub(2);
        let x = field_area.x + 1 + (len as u16).min(max_x);
        frame.set_cursor_position((x, field_area.y + 1));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::components::buffer_text;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn type_str(state: &mut LoginFormState, text: &str) {
        for c in text.chars() {
            state.handle_event(&TuiEvent::InputChar(c));
        }
    }

    #[test]
    fn test_typing_goes_to_focused_field() {
        let mut state = LoginFormState::new();
        type_str(&mut state, "admin");
        state.handle_event(&TuiEvent::NextField);
        type_str(&mut state, "admin123");
        assert_eq!(state.username, "admin");
        assert_eq!(state.password, "admin123");
    }

    #[test]
    fn test_backspace_edits_focused_field() {
        let mut state = LoginFormState::new();
        type_str(&mut state, "adminx");
        state.handle_event(&TuiEvent::Backspace);
        assert_eq!(state.username, "admin");
    }

    #[test]
    fn test_submit_emits_both_fields() {
        let mut state = LoginFormState::new();
        type_str(&mut state, "user");
        state.handle_event(&TuiEvent::CursorDown);
        type_str(&mut state, "user123");
        assert_eq!(
            state.handle_event(&TuiEvent::Submit),
            Some(LoginEvent::Submit {
                username: "user".to_string(),
                password: "user123".to_string(),
            })
        );
    }

    #[test]
    fn test_paste_keeps_first_line_only() {
        let mut state = LoginFormState::new();
        state.handle_event(&TuiEvent::Paste("admin\nextra".to_string()));
        assert_eq!(state.username, "admin");
    }

    #[test]
    fn test_password_is_masked() {
        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut state = LoginFormState::new();
        type_str(&mut state, "admin");
        state.handle_event(&TuiEvent::NextField);
        type_str(&mut state, "secret");

        terminal
            .draw(|f| {
                LoginForm::new(&state, Some("Invalid credentials"), None, false)
                    .render(f, f.area());
            })
            .unwrap();

        let text = buffer_text(terminal.backend().buffer());
        assert!(text.contains("admin"));
        assert!(!text.contains("secret"));
        assert!(text.contains("••••••"));
        assert!(text.contains("Invalid credentials"));
    }
}
