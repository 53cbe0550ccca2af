//! # TUI Components
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! - `TitleBar`: Top bar with signed-in user and status
//! - `MessageCard`: A single message
//! - `Pagination`: Page number and key hints
//!
//! ### Stateful Components (Event-Driven)
//!
//! - `LoginFormState` / `LoginForm`: Username and password fields
//! - `Composer`: Admin-only new message box
//! - `MessageListState` / `MessageList`: Scrollable page of messages
//!
//! Components receive external data as props, not by reaching into `App`:
//!
//! ```rust,ignore
//! // Dependencies are explicit
//! Pagination::new(app.feed.page, app.feed.is_admin()).render(frame, area);
//! ```

pub mod composer;
pub mod login_form;
pub mod message_card;
pub mod message_list;
pub mod pagination;
mod title_bar;

pub use composer::{Composer, ComposerEvent};
pub use login_form::{LoginEvent, LoginForm, LoginFormState};
pub use message_list::{MessageList, MessageListState};
pub use pagination::Pagination;
pub use title_bar::TitleBar;

/// Flattens a test buffer into one string for `contains` checks.
#[cfg(test)]
pub(crate) fn buffer_text(buffer: &ratatui::buffer::Buffer) -> String {
    buffer.content().iter().map(|c| c.symbol()).collect()
}
