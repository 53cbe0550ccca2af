//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the two
//! screens, and translates keyboard events into core `Action` values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Requests
//!
//! `update()` hands back an `Effect::Request`; the loop spawns one tokio task
//! per request, and that task sends exactly one `Action` back over an
//! `mpsc` channel. Nothing is cancelled: if the page changes twice quickly,
//! whichever response arrives last wins.
//!
//! ## Redraw Strategy
//!
//! Draws only after an event or a finished request. While a request is in
//! flight the poll timeout drops to 100ms so results show promptly.

mod component;
mod components;
mod event;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::sync::{Arc, mpsc};
use std::time::Duration;

use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
};
use crossterm::execute;
use ratatui::DefaultTerminal;

use crate::api::{ApiError, HttpApi, MessageApi};
use crate::core::action::{Action, Effect, Request, update};
use crate::core::config::ResolvedConfig;
use crate::core::route::Screen;
use crate::core::state::App;
use crate::tui::component::EventHandler;
use crate::tui::components::{
    Composer, ComposerEvent, LoginEvent, LoginFormState, MessageListState,
};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub login_form: LoginFormState,
    pub composer: Composer,
    pub message_list: MessageListState,
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            login_form: LoginFormState::new(),
            composer: Composer::new(),
            message_list: MessageListState::new(),
        }
    }

    /// A screen was entered: its local state starts fresh, like a remount.
    fn remount(&mut self, screen: Screen) {
        debug!("Remounting {:?}", screen);
        match screen {
            Screen::Login => self.login_form = LoginFormState::new(),
            Screen::Messages => {
                self.composer = Composer::new();
                self.message_list = MessageListState::new();
            }
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(stdout(), EnableMouseCapture, EnableBracketedPaste)?;
        info!("Terminal modes enabled (mouse, bracketed paste)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), DisableMouseCapture, DisableBracketedPaste);
    }
}

/// Runs one request against the API and turns the outcome into the action
/// that reports it.
pub async fn perform_request(api: &dyn MessageApi, request: Request) -> Action {
    match request {
        Request::Login { username, password } => match api.login(&username, &password).await {
            Ok(response) => Action::LoginSucceeded(response),
            Err(e) => {
                info!("Login failed: {}", e);
                let message = match e {
                    ApiError::Api { message, .. } if !message.is_empty() => Some(message),
                    _ => None,
                };
                Action::LoginFailed(message)
            }
        },
        Request::FetchPage {
            token,
            page,
            per_page,
        } => match api.list_messages(&token, page, per_page).await {
            Ok(messages) => Action::MessagesLoaded { page, messages },
            Err(e) => Action::FetchFailed(e.to_string()),
        },
        Request::CreateMessage { token, body } => match api.create_message(&token, &body).await {
            Ok(message) => Action::MessageCreated(message),
            Err(e) => Action::CreateFailed(e.to_string()),
        },
    }
}

fn spawn_request(api: Arc<dyn MessageApi>, request: Request, tx: mpsc::Sender<Action>) {
    info!("Spawning API request");
    tokio::spawn(async move {
        let action = perform_request(api.as_ref(), request).await;
        if tx.send(action).is_err() {
            warn!("Failed to deliver request result: receiver dropped");
        }
    });
}

/// Applies `action` and carries out whatever effect it returns.
/// Returns true when the app should exit.
fn dispatch(app: &mut App, tui: &mut TuiState, action: Action, tx: &mpsc::Sender<Action>) -> bool {
    let before = app.route.screen();
    let effect = update(app, action);
    let after = app.route.screen();
    if before != after {
        tui.remount(after);
    }

    match effect {
        Effect::Quit => return true,
        Effect::Request(request) => spawn_request(app.api.clone(), request, tx.clone()),
        Effect::ClearDraft => tui.composer.clear(),
        Effect::None => {}
    }
    false
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let api: Arc<dyn MessageApi> = Arc::new(HttpApi::new(config.base_url.clone()));
    let mut app = App::from_config(api, &config);
    let mut tui = TuiState::new();

    let mut terminal = ratatui::init();
    let result = TerminalModeGuard::new().and_then(|_guard| {
        event_loop(&mut terminal, &mut app, &mut tui, &config)
    });
    ratatui::restore();
    result
}

fn event_loop(
    terminal: &mut DefaultTerminal,
    app: &mut App,
    tui: &mut TuiState,
    config: &ResolvedConfig,
) -> std::io::Result<()> {
    // Channel for actions from background tasks
    let (tx, rx) = mpsc::channel();

    info!("Starting at {}", config.start_route.path());
    tui.remount(config.start_route.screen());
    if dispatch(app, tui, Action::Navigate(config.start_route), &tx) {
        return Ok(());
    }

    let mut needs_redraw = true;

    loop {
        if needs_redraw {
            terminal.draw(|f| ui::draw_ui(f, app, tui))?;
            needs_redraw = false;
        }

        let busy = app.login.is_loading || app.feed.is_loading || app.feed.is_submitting;
        let timeout = if busy {
            Duration::from_millis(100)
        } else {
            Duration::from_millis(500)
        };

        // First event waits up to `timeout`; then drain everything pending before the next draw
        let mut should_quit = false;
        let mut next = poll_event_timeout(timeout)?;
        while let Some(event) = next {
            needs_redraw = true;
            if handle_event(app, tui, event, &tx) {
                should_quit = true;
                break;
            }
            next = poll_event_immediate()?;
        }

        if should_quit {
            break;
        }

        // Results from request tasks
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            if dispatch(app, tui, action, &tx) {
                return Ok(());
            }
        }
    }

    Ok(())
}

/// Routes one terminal event to the active screen. Returns true to quit.
fn handle_event(
    app: &mut App,
    tui: &mut TuiState,
    event: TuiEvent,
    tx: &mpsc::Sender<Action>,
) -> bool {
    match event {
        TuiEvent::Resize => return false,
        TuiEvent::Quit | TuiEvent::ForceQuit => return dispatch(app, tui, Action::Quit, tx),
        _ => {}
    }

    match app.route.screen() {
        Screen::Login => {
            if let Some(LoginEvent::Submit { username, password }) =
                tui.login_form.handle_event(&event)
                && !app.login.is_loading
            {
                return dispatch(app, tui, Action::SubmitLogin { username, password }, tx);
            }
            false
        }
        Screen::Messages => match event {
            TuiEvent::Logout => dispatch(app, tui, Action::Logout, tx),
            TuiEvent::CursorLeft => dispatch(app, tui, Action::PreviousPage, tx),
            TuiEvent::CursorRight => dispatch(app, tui, Action::NextPage, tx),
            TuiEvent::CursorUp
            | TuiEvent::CursorDown
            | TuiEvent::ScrollUp
            | TuiEvent::ScrollDown
            | TuiEvent::ScrollPageUp
            | TuiEvent::ScrollPageDown => {
                tui.message_list.handle_event(&event);
                false
            }
            _ if app.feed.is_admin() => {
                if let Some(ComposerEvent::Submit(text)) = tui.composer.handle_event(&event)
                    && !app.feed.is_submitting
                {
                    return dispatch(app, tui, Action::SubmitMessage(text), tx);
                }
                false
            }
            _ => false,
        },
    }
}
