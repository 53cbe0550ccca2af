//! # Actions
//!
//! Everything that can happen in the client becomes an `Action`.
//! User presses Enter on the login form? That's `Action::SubmitLogin`.
//! API responds? That's `Action::MessagesLoaded` or `Action::FetchFailed`.
//!
//! `update()` applies an action to the state and returns an `Effect`
//! describing any network work the event loop should start. No requests are
//! made here; the only I/O is the storage file, mirroring how the screens
//! touch local storage directly.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```

use log::{debug, info, warn};

use crate::api::{LoginResponse, Message};
use crate::core::route::{Route, Screen};
use crate::core::state::{App, FeedState};
use crate::core::storage::{ROLE_KEY, TOKEN_KEY, USERNAME_KEY};

pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch messages. Please log in again.";
pub const CREATE_FAILED_MESSAGE: &str = "Failed to add message. Please try again.";
pub const MISSING_CREDENTIALS_MESSAGE: &str = "Username and password are required";
pub const LOGIN_FAILED_MESSAGE: &str = "Login failed. Please try again.";

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Navigate(Route),
    SubmitLogin { username: String, password: String },
    LoginSucceeded(LoginResponse),
    /// Carries the server's message, if it sent one.
    LoginFailed(Option<String>),
    NextPage,
    PreviousPage,
    MessagesLoaded { page: u32, messages: Vec<Message> },
    FetchFailed(String),
    SubmitMessage(String),
    MessageCreated(Message),
    CreateFailed(String),
    Logout,
    Quit,
}

/// A single request for the effect runner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    Login { username: String, password: String },
    FetchPage { token: String, page: u32, per_page: u32 },
    CreateMessage { token: String, body: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    Quit,
    Request(Request),
    /// The composer's text was accepted by the server and should be emptied.
    ClearDraft,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::Navigate(route) => navigate(app, route),

        Action::SubmitLogin { username, password } => {
            if username.is_empty() || password.is_empty() {
                app.login.error = Some(MISSING_CREDENTIALS_MESSAGE.to_string());
                return Effect::None;
            }
            app.login.error = None;
            app.login.is_loading = true;
            app.status_message = "Signing in...".to_string();
            Effect::Request(Request::Login { username, password })
        }

        Action::LoginSucceeded(response) => {
            app.login.is_loading = false;
            app.login.error = None;
            let user = &response.user;
            info!("Logged in as {} (role={})", user.username, user.role);
            for (key, value) in [
                (TOKEN_KEY, response.token.as_str()),
                (ROLE_KEY, user.role.as_str()),
                (USERNAME_KEY, user.username.as_str()),
            ] {
                if let Err(e) = app.storage.set_item(key, value) {
                    warn!("Failed to persist {}: {}", key, e);
                }
            }
            app.status_message.clear();
            navigate(app, Route::Messages)
        }

        Action::LoginFailed(message) => {
            app.login.is_loading = false;
            app.login.error = Some(message.unwrap_or_else(|| LOGIN_FAILED_MESSAGE.to_string()));
            app.status_message.clear();
            Effect::None
        }

        Action::NextPage => {
            if app.route.screen() != Screen::Messages {
                return Effect::None;
            }
            app.feed.page += 1;
            fetch_current_page(app)
        }

        Action::PreviousPage => {
            if app.route.screen() != Screen::Messages {
                return Effect::None;
            }
            let previous = app.feed.page.saturating_sub(1).max(1);
            if previous == app.feed.page {
                return Effect::None;
            }
            app.feed.page = previous;
            fetch_current_page(app)
        }

        Action::MessagesLoaded { page, messages } => {
            // Late responses still land: there is no cancellation of stale fetches.
            debug!(
                "Loaded {} messages for page {} (showing page {})",
                messages.len(),
                page,
                app.feed.page
            );
            app.feed.is_loading = false;
            app.feed.messages = messages;
            app.status_message.clear();
            Effect::None
        }

        Action::FetchFailed(reason) => {
            warn!("Fetch failed, signing out: {}", reason);
            app.feed.is_loading = false;
            app.feed.error = Some(FETCH_FAILED_MESSAGE.to_string());
            if let Err(e) = app.storage.clear_session() {
                warn!("Failed to clear stored session: {}", e);
            }
            app.route = Route::Login;
            app.status_message = FETCH_FAILED_MESSAGE.to_string();
            Effect::None
        }

        Action::SubmitMessage(body) => {
            if app.route.screen() != Screen::Messages || !app.feed.is_admin() {
                return Effect::None;
            }
            if body.is_empty() {
                return Effect::None;
            }
            match app.storage.token() {
                Some(token) => {
                    app.feed.is_submitting = true;
                    Effect::Request(Request::CreateMessage {
                        token: token.to_string(),
                        body,
                    })
                }
                None => {
                    app.feed.error = Some(CREATE_FAILED_MESSAGE.to_string());
                    Effect::None
                }
            }
        }

        Action::MessageCreated(message) => {
            info!("Message {} created", message.id);
            app.feed.is_submitting = false;
            app.feed.messages.insert(0, message);
            Effect::ClearDraft
        }

        Action::CreateFailed(reason) => {
            warn!("Create failed: {}", reason);
            app.feed.is_submitting = false;
            app.feed.error = Some(CREATE_FAILED_MESSAGE.to_string());
            Effect::None
        }

        Action::Logout => {
            info!("Logging out");
            if let Err(e) = app.storage.clear_session() {
                warn!("Failed to clear stored session: {}", e);
            }
            app.route = Route::Login;
            app.feed.error = None;
            app.status_message.clear();
            Effect::None
        }

        Action::Quit => Effect::Quit,
    }
}

fn navigate(app: &mut App, route: Route) -> Effect {
    debug!("Navigate {} -> {}", app.route.path(), route.path());
    app.route = route;
    match route.screen() {
        Screen::Login => Effect::None,
        Screen::Messages => {
            // Fresh mount: page, list and error start over.
            app.feed = FeedState {
                role: app.storage.role().map(str::to_string),
                ..FeedState::default()
            };
            fetch_current_page(app)
        }
    }
}

/// Token check + request for `app.feed.page`, or a redirect to login.
fn fetch_current_page(app: &mut App) -> Effect {
    let Some(token) = app.storage.token() else {
        info!("No stored token, redirecting to /login");
        app.route = Route::Login;
        return Effect::None;
    };
    app.feed.is_loading = true;
    app.status_message = "Loading...".to_string();
    Effect::Request(Request::FetchPage {
        token: token.to_string(),
        page: app.feed.page,
        per_page: app.per_page,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::User;
    use crate::test_support::{message, test_app, test_app_with_session};

    fn fetch(token: &str, page: u32) -> Effect {
        Effect::Request(Request::FetchPage {
            token: token.to_string(),
            page,
            per_page: 10,
        })
    }

    #[test]
    fn test_messages_without_token_redirects_without_fetch() {
        let mut app = test_app();
        let effect = update(&mut app, Action::Navigate(Route::Messages));
        assert_eq!(effect, Effect::None);
        assert_eq!(app.route, Route::Login);
        assert!(!app.feed.is_loading);
    }

    #[test]
    fn test_mount_with_token_fetches_page_one() {
        let mut app = test_app_with_session("tok", "readonly");
        let effect = update(&mut app, Action::Navigate(Route::Messages));
        assert_eq!(effect, fetch("tok", 1));
        assert_eq!(app.route, Route::Messages);
        assert!(app.feed.is_loading);
    }

    #[test]
    fn test_loaded_messages_replace_list() {
        let mut app = test_app_with_session("tok", "readonly");
        update(&mut app, Action::Navigate(Route::Messages));
        let effect = update(
            &mut app,
            Action::MessagesLoaded {
                page: 1,
                messages: vec![message(1, "first"), message(2, "second")],
            },
        );
        assert_eq!(effect, Effect::None);
        assert_eq!(app.feed.messages.len(), 2);
        assert_eq!(app.feed.messages[0].message, "first");
        assert!(!app.feed.is_loading);
    }

    #[test]
    fn test_next_page_fetches_page_two() {
        let mut app = test_app_with_session("tok", "readonly");
        update(&mut app, Action::Navigate(Route::Messages));
        let effect = update(&mut app, Action::NextPage);
        assert_eq!(effect, fetch("tok", 2));
        assert_eq!(app.feed.page, 2);
    }

    #[test]
    fn test_previous_at_page_one_stays_without_fetch() {
        let mut app = test_app_with_session("tok", "readonly");
        update(&mut app, Action::Navigate(Route::Messages));
        let effect = update(&mut app, Action::PreviousPage);
        assert_eq!(effect, Effect::None);
        assert_eq!(app.feed.page, 1);
    }

    #[test]
    fn test_previous_after_next_goes_back() {
        let mut app = test_app_with_session("tok", "readonly");
        update(&mut app, Action::Navigate(Route::Messages));
        update(&mut app, Action::NextPage);
        update(&mut app, Action::NextPage);
        let effect = update(&mut app, Action::PreviousPage);
        assert_eq!(effect, fetch("tok", 2));
        assert_eq!(app.feed.page, 2);
    }

    #[test]
    fn test_next_page_is_unbounded() {
        let mut app = test_app_with_session("tok", "readonly");
        update(&mut app, Action::Navigate(Route::Messages));
        for _ in 0..50 {
            update(&mut app, Action::NextPage);
        }
        assert_eq!(app.feed.page, 51);
    }

    #[test]
    fn test_remount_resets_page() {
        let mut app = test_app_with_session("tok", "readonly");
        update(&mut app, Action::Navigate(Route::Messages));
        update(&mut app, Action::NextPage);
        let effect = update(&mut app, Action::Navigate(Route::Messages));
        assert_eq!(effect, fetch("tok", 1));
        assert_eq!(app.feed.page, 1);
    }

    #[test]
    fn test_fetch_failure_clears_token_and_redirects() {
        let mut app = test_app_with_session("tok", "admin");
        update(&mut app, Action::Navigate(Route::Messages));
        let effect = update(&mut app, Action::FetchFailed("HTTP 500".to_string()));
        assert_eq!(effect, Effect::None);
        assert_eq!(app.route, Route::Login);
        assert_eq!(app.storage.token(), None);
        assert_eq!(app.feed.error.as_deref(), Some(FETCH_FAILED_MESSAGE));
        assert_eq!(app.status_message, FETCH_FAILED_MESSAGE);
    }

    #[test]
    fn test_stale_response_overwrites_current_page() {
        let mut app = test_app_with_session("tok", "readonly");
        update(&mut app, Action::Navigate(Route::Messages));
        update(&mut app, Action::NextPage);
        update(
            &mut app,
            Action::MessagesLoaded {
                page: 2,
                messages: vec![message(11, "page two")],
            },
        );
        update(
            &mut app,
            Action::MessagesLoaded {
                page: 1,
                messages: vec![message(1, "page one")],
            },
        );
        assert_eq!(app.feed.page, 2);
        assert_eq!(app.feed.messages[0].message, "page one");
    }

    #[test]
    fn test_non_admin_submit_is_ignored() {
        let mut app = test_app_with_session("tok", "readonly");
        update(&mut app, Action::Navigate(Route::Messages));
        let effect = update(&mut app, Action::SubmitMessage("hello".to_string()));
        assert_eq!(effect, Effect::None);
        assert!(!app.feed.is_submitting);
    }

    #[test]
    fn test_admin_submit_requests_create() {
        let mut app = test_app_with_session("tok", "admin");
        update(&mut app, Action::Navigate(Route::Messages));
        let effect = update(&mut app, Action::SubmitMessage("hello".to_string()));
        assert_eq!(
            effect,
            Effect::Request(Request::CreateMessage {
                token: "tok".to_string(),
                body: "hello".to_string(),
            })
        );
    }

    #[test]
    fn test_empty_draft_is_not_submitted() {
        let mut app = test_app_with_session("tok", "admin");
        update(&mut app, Action::Navigate(Route::Messages));
        let effect = update(&mut app, Action::SubmitMessage(String::new()));
        assert_eq!(effect, Effect::None);
    }

    #[test]
    fn test_submit_without_token_reports_create_error() {
        let mut app = test_app_with_session("tok", "admin");
        update(&mut app, Action::Navigate(Route::Messages));
        app.storage.remove_item(TOKEN_KEY).unwrap();

        let effect = update(&mut app, Action::SubmitMessage("x".to_string()));
        assert_eq!(effect, Effect::None);
        assert_eq!(app.feed.error.as_deref(), Some(CREATE_FAILED_MESSAGE));
        assert!(!app.feed.is_submitting);
    }

    #[test]
    fn test_created_message_is_prepended_without_refetch() {
        let mut app = test_app_with_session("tok", "admin");
        update(&mut app, Action::Navigate(Route::Messages));
        update(
            &mut app,
            Action::MessagesLoaded {
                page: 1,
                messages: vec![message(1, "old")],
            },
        );
        update(&mut app, Action::SubmitMessage("new".to_string()));
        let effect = update(&mut app, Action::MessageCreated(message(3, "new")));
        assert_eq!(effect, Effect::ClearDraft);
        let bodies: Vec<&str> = app.feed.messages.iter().map(|m| m.message.as_str()).collect();
        assert_eq!(bodies, vec!["new", "old"]);
        assert!(!app.feed.is_submitting);
    }

    #[test]
    fn test_create_failure_keeps_token_and_screen() {
        let mut app = test_app_with_session("tok", "admin");
        update(&mut app, Action::Navigate(Route::Messages));
        update(&mut app, Action::SubmitMessage("new".to_string()));
        let effect = update(&mut app, Action::CreateFailed("HTTP 403".to_string()));
        assert_eq!(effect, Effect::None);
        assert_eq!(app.route, Route::Messages);
        assert_eq!(app.storage.token(), Some("tok"));
        assert_eq!(app.feed.error.as_deref(), Some(CREATE_FAILED_MESSAGE));
    }

    #[test]
    fn test_logout_clears_token() {
        let mut app = test_app_with_session("tok", "admin");
        update(&mut app, Action::Navigate(Route::Messages));
        let effect = update(&mut app, Action::Logout);
        assert_eq!(effect, Effect::None);
        assert_eq!(app.route, Route::Login);
        assert_eq!(app.storage.token(), None);
    }

    #[test]
    fn test_logout_drops_create_error() {
        let mut app = test_app_with_session("tok", "admin");
        update(&mut app, Action::Navigate(Route::Messages));
        update(&mut app, Action::SubmitMessage("new".to_string()));
        update(&mut app, Action::CreateFailed("HTTP 403".to_string()));
        update(&mut app, Action::Logout);
        assert_eq!(app.feed.error, None);
    }

    #[test]
    fn test_login_requires_both_fields() {
        let mut app = test_app();
        let effect = update(
            &mut app,
            Action::SubmitLogin {
                username: "admin".to_string(),
                password: String::new(),
            },
        );
        assert_eq!(effect, Effect::None);
        assert_eq!(app.login.error.as_deref(), Some(MISSING_CREDENTIALS_MESSAGE));
    }

    #[test]
    fn test_login_submit_requests_login() {
        let mut app = test_app();
        let effect = update(
            &mut app,
            Action::SubmitLogin {
                username: "admin".to_string(),
                password: "admin123".to_string(),
            },
        );
        assert_eq!(
            effect,
            Effect::Request(Request::Login {
                username: "admin".to_string(),
                password: "admin123".to_string(),
            })
        );
        assert!(app.login.is_loading);
    }

    #[test]
    fn test_login_success_stores_session_and_mounts_feed() {
        let mut app = test_app();
        let response = LoginResponse {
            token: "jwt".to_string(),
            user: User {
                id: 1,
                username: "admin".to_string(),
                role: "admin".to_string(),
            },
        };
        let effect = update(&mut app, Action::LoginSucceeded(response));
        assert_eq!(effect, fetch("jwt", 1));
        assert_eq!(app.route, Route::Messages);
        assert_eq!(app.storage.token(), Some("jwt"));
        assert_eq!(app.storage.username(), Some("admin"));
        assert!(app.feed.is_admin());
    }

    #[test]
    fn test_login_failure_shows_server_message() {
        let mut app = test_app();
        update(&mut app, Action::LoginFailed(Some("Invalid credentials".to_string())));
        assert_eq!(app.login.error.as_deref(), Some("Invalid credentials"));
        assert_eq!(app.route, Route::Login);

        update(&mut app, Action::LoginFailed(None));
        assert_eq!(app.login.error.as_deref(), Some(LOGIN_FAILED_MESSAGE));
    }

    #[test]
    fn test_root_and_login_do_not_fetch() {
        let mut app = test_app_with_session("tok", "admin");
        assert_eq!(update(&mut app, Action::Navigate(Route::Root)), Effect::None);
        assert_eq!(app.route, Route::Root);
        assert_eq!(update(&mut app, Action::Navigate(Route::Login)), Effect::None);
        assert_eq!(app.storage.token(), Some("tok"));
    }

    #[test]
    fn test_paging_ignored_off_feed() {
        let mut app = test_app_with_session("tok", "admin");
        assert_eq!(update(&mut app, Action::NextPage), Effect::None);
        assert_eq!(app.feed.page, 1);
    }

    #[test]
    fn test_quit() {
        let mut app = test_app();
        assert_eq!(update(&mut app, Action::Quit), Effect::Quit);
    }
}
