//! Pure view/render functions for the TUI.
//!
//! Functions here take `&AppState`, draw to a ratatui `Frame`, and never
//! mutate state or return effects.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::features::{auth, dashboard, welcome};
use crate::overlays::render_toasts;
use crate::state::{AppState, Screen};

/// Height of the title bar.
const HEADER_HEIGHT: u16 = 1;

/// Spinner frames for loading indicators.
const SPINNER_FRAMES: &[&str] = &["◐", "◓", "◑", "◒"];

/// Renders the entire TUI to the frame.
pub fn render(app: &AppState, frame: &mut Frame) {
    let area = frame.area();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(HEADER_HEIGHT), Constraint::Min(1)])
        .split(area);

    render_header(app, frame, chunks[0]);

    let body = Rect::new(
        chunks[1].x + 1,
        chunks[1].y,
        chunks[1].width.saturating_sub(2),
        chunks[1].height,
    );
    let spinner = SPINNER_FRAMES[app.spinner_frame % SPINNER_FRAMES.len()];

    match app.screen {
        Screen::Welcome => welcome::render_welcome(frame, body),
        Screen::Login => auth::render_login(frame, &app.login.form, body, spinner),
        Screen::Register => auth::render_register(frame, &app.register.form, body, spinner),
        Screen::Dashboard => {
            dashboard::render_dashboard(frame, &app.dashboard, app.session.as_ref(), body, spinner);
        }
    }

    render_toasts(frame, &app.toasts, area);
}

fn render_header(app: &AppState, frame: &mut Frame, area: Rect) {
    let title = Span::styled(
        " Taller ",
        Style::default()
            .fg(Color::Black)
            .bg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    );
    frame.render_widget(Paragraph::new(Line::from(title)), area);

    // The logout control lives in the header, on the dashboard only.
    if app.screen == Screen::Dashboard {
        let logout = Line::from(vec![
            Span::styled("o", Style::default().fg(Color::Cyan)),
            Span::styled(" Cerrar Sesión ", Style::default().fg(Color::Gray)),
        ])
        .right_aligned();
        frame.render_widget(Paragraph::new(logout), area);
    }
}
