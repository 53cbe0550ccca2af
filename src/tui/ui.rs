use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::core::route::Screen;
use crate::core::state::App;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{LoginForm, MessageList, Pagination, TitleBar};

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState) {
    use Constraint::{Length, Min};
    let [title_area, main_area] = Layout::vertical([Length(1), Min(0)]).areas(frame.area());

    let mut title_bar = TitleBar::new(
        app.storage.username().map(str::to_string),
        app.storage.role().map(str::to_string),
        app.status_message.clone(),
    );
    title_bar.render(frame, title_area);

    match app.route.screen() {
        Screen::Login => draw_login(frame, main_area, app, tui),
        Screen::Messages => draw_feed(frame, main_area, app, tui),
    }
}

fn draw_login(frame: &mut Frame, area: Rect, app: &App, tui: &TuiState) {
    // The feed's fetch error outlives its screen so the user sees why they're here.
    let notice = app.feed.error.as_deref();
    LoginForm::new(
        &tui.login_form,
        app.login.error.as_deref(),
        notice,
        app.login.is_loading,
    )
    .render(frame, area);
}

fn draw_feed(frame: &mut Frame, area: Rect, app: &App, tui: &mut TuiState) {
    use Constraint::{Length, Min};

    let is_admin = app.feed.is_admin();
    let error_height = if app.feed.error.is_some() { 1 } else { 0 };
    let composer_height = if is_admin {
        tui.composer.calculate_height()
    } else {
        0
    };

    let [header_area, error_area, composer_area, list_area, pagination_area] =
        Layout::vertical([
            Length(1),
            Length(error_height),
            Length(composer_height),
            Min(0),
            Length(1),
        ])
        .areas(area);

    let header = Line::from(vec![
        Span::styled("Message List", Style::default().add_modifier(Modifier::BOLD)),
        Span::styled("   [Ctrl+X] Logout", Style::default().fg(Color::DarkGray)),
    ]);
    frame.render_widget(Paragraph::new(header), header_area);

    if let Some(error) = &app.feed.error {
        let error = Paragraph::new(error.as_str()).style(Style::default().fg(Color::Red));
        frame.render_widget(error, error_area);
    }

    if is_admin {
        tui.composer.is_submitting = app.feed.is_submitting;
        tui.composer.render(frame, composer_area);
    }

    MessageList::new(&mut tui.message_list, &app.feed.messages, app.feed.is_loading)
        .render(frame, list_area);

    Pagination::new(app.feed.page, is_admin).render(frame, pagination_area);
}
