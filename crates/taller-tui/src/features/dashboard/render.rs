use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Row, Table, TableState, Tabs};
use taller_core::messages;
use taller_core::models::{Session, UserSummary};

use super::{DashboardState, DashboardTab, UsersView};
use crate::common::truncate_with_ellipsis;
use crate::overlays::render_utils::{InputHint, render_hints};

/// Renders the dashboard for `session`.
pub fn render_dashboard(
    frame: &mut Frame,
    dashboard: &DashboardState,
    session: Option<&Session>,
    area: Rect,
    spinner: &str,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Greeting
            Constraint::Length(1), // Tabs
            Constraint::Min(1),    // Tab content
            Constraint::Length(1), // Hints
        ])
        .split(area);

    render_greeting(frame, session, chunks[0]);
    render_tabs(frame, dashboard.tab, chunks[1]);

    let content = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let content_area = content.inner(chunks[2]);
    frame.render_widget(content, chunks[2]);

    match dashboard.tab {
        DashboardTab::Users => render_users(frame, dashboard, content_area, spinner),
        DashboardTab::Profile => render_profile(frame, session, content_area),
    }

    let hints = [
        InputHint::new("Tab", "pestaña"),
        InputHint::new("↑↓", "mover"),
        InputHint::new("r", "recargar"),
        InputHint::new("o", "cerrar sesión"),
        InputHint::new("q", "salir"),
    ];
    render_hints(frame, chunks[3], &hints, Color::Cyan);
}

fn render_greeting(frame: &mut Frame, session: Option<&Session>, area: Rect) {
    let (username, email) = session.map_or(("", ""), |s| (s.username.as_str(), s.email.as_str()));
    let line = Line::from(vec![
        Span::styled("Hola, ", Style::default().fg(Color::Gray)),
        Span::styled(
            username.to_string(),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!("  <{email}>"), Style::default().fg(Color::DarkGray)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn render_tabs(frame: &mut Frame, active: DashboardTab, area: Rect) {
    let titles = DashboardTab::ALL
        .iter()
        .enumerate()
        .map(|(i, tab)| format!("{} {}", i + 1, tab.title()));
    let tabs = Tabs::new(titles)
        .select(active.index())
        .style(Style::default().fg(Color::Gray))
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        );
    frame.render_widget(tabs, area);
}

fn render_users(frame: &mut Frame, dashboard: &DashboardState, area: Rect, spinner: &str) {
    match &dashboard.users {
        UsersView::Idle => {}
        UsersView::Loading => {
            let line = Line::from(Span::styled(
                format!("{spinner} {}", messages::USERS_LOADING),
                Style::default().fg(Color::Yellow),
            ));
            frame.render_widget(Paragraph::new(line), area);
        }
        UsersView::Failed => {
            let line = Line::from(Span::styled(
                messages::USERS_LOAD_FAILED,
                Style::default().fg(Color::Red),
            ));
            frame.render_widget(Paragraph::new(line), area);
        }
        UsersView::Loaded(users) if users.is_empty() => {
            let line = Line::from(Span::styled(
                messages::USERS_EMPTY,
                Style::default().fg(Color::Gray),
            ));
            frame.render_widget(Paragraph::new(line), area);
        }
        UsersView::Loaded(users) => render_users_table(frame, users, dashboard.selected, area),
    }
}

fn render_users_table(frame: &mut Frame, users: &[UserSummary], selected: usize, area: Rect) {
    let widths = [
        Constraint::Length(8),
        Constraint::Percentage(25),
        Constraint::Percentage(35),
        Constraint::Fill(1),
    ];
    let email_width = (area.width as usize * 35 / 100).saturating_sub(1);

    let header = Row::new(["ID", "Usuario", "Email", "Nombre"]).style(
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    );
    let rows = users.iter().map(|user| {
        Row::new([
            truncate_with_ellipsis(&user.id.to_string(), 8),
            user.username.clone(),
            truncate_with_ellipsis(&user.email, email_width),
            user.full_name(),
        ])
    });

    let table = Table::new(rows, widths)
        .header(header)
        .column_spacing(1)
        .row_highlight_style(Style::default().bg(Color::DarkGray));
    let mut state = TableState::default().with_selected(Some(selected));
    frame.render_stateful_widget(table, area, &mut state);
}

fn render_profile(frame: &mut Frame, session: Option<&Session>, area: Rect) {
    let Some(session) = session else {
        return;
    };
    let label = Style::default().fg(Color::Gray);
    let value = Style::default().fg(Color::White);
    let row = |name: &str, text: String| {
        Line::from(vec![
            Span::styled(format!("{name:<18}"), label),
            Span::styled(text, value),
        ])
    };
    let lines = vec![
        row("Usuario:", session.username.clone()),
        row("Email:", session.email.clone()),
        row("ID:", session.id.to_string()),
        row("Nombre completo:", session.display_name()),
    ];
    frame.render_widget(Paragraph::new(lines), area);
}
