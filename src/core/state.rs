//! # Application State
//!
//! Core state for the client. Domain data only; text buffers, focus and
//! scroll offsets live in the `tui` module.
//!
//! ```text
//! App
//! ├── api: Arc<dyn MessageApi>   // remote API (used by the effect runner)
//! ├── storage: LocalStorage      // token / role / username
//! ├── route: Route               // current path
//! ├── per_page: u32              // page size sent to the API
//! ├── login: LoginState          // login screen
//! ├── feed: FeedState            // message list screen
//! └── status_message: String     // title bar text
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use std::sync::Arc;

use crate::api::{Message, MessageApi};
use crate::core::config::ResolvedConfig;
use crate::core::route::Route;
use crate::core::storage::LocalStorage;

/// The role string that unlocks the message composer.
pub const ADMIN_ROLE: &str = "admin";

#[derive(Debug, Default)]
pub struct LoginState {
    pub error: Option<String>,
    pub is_loading: bool,
}

#[derive(Debug)]
pub struct FeedState {
    pub messages: Vec<Message>,
    /// 1-based. Never below 1, no upper bound.
    pub page: u32,
    pub error: Option<String>,
    /// Role read from storage when the screen mounted.
    pub role: Option<String>,
    pub is_loading: bool,
    pub is_submitting: bool,
}

impl Default for FeedState {
    fn default() -> Self {
        Self {
            messages: Vec::new(),
            page: 1,
            error: None,
            role: None,
            is_loading: false,
            is_submitting: false,
        }
    }
}

impl FeedState {
    pub fn is_admin(&self) -> bool {
        self.role.as_deref() == Some(ADMIN_ROLE)
    }
}

pub struct App {
    pub api: Arc<dyn MessageApi>,
    pub storage: LocalStorage,
    pub route: Route,
    pub per_page: u32,
    pub login: LoginState,
    pub feed: FeedState,
    pub status_message: String,
}

impl App {
    /// Builds an app sitting on the login screen. Call
    /// `update(app, Action::Navigate(route))` to enter the start route so
    /// the message screen gets its mount behavior.
    pub fn new(api: Arc<dyn MessageApi>, storage: LocalStorage, per_page: u32) -> Self {
        Self {
            api,
            storage,
            route: Route::Login,
            per_page,
            login: LoginState::default(),
            feed: FeedState::default(),
            status_message: String::new(),
        }
    }

    pub fn from_config(api: Arc<dyn MessageApi>, config: &ResolvedConfig) -> Self {
        let storage = LocalStorage::open(&config.storage_path);
        Self::new(api, storage, config.per_page)
    }
}
