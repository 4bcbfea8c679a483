//! TUI reducer (update function).
//!
//! All state mutations happen here. The runtime calls `update(app, event)`
//! and executes the returned effects.

use std::time::Instant;

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::common::TaskKind;
use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::features::auth::{self, FormAction};
use crate::features::dashboard::{DashboardState, DashboardTab};
use crate::state::{AppState, Screen};

/// The main reducer function.
pub fn update(app: &mut AppState, event: UiEvent) -> Vec<UiEffect> {
    match event {
        UiEvent::Init => {
            if app.is_authenticated() {
                enter_dashboard(app)
            } else {
                show(app, Screen::Welcome);
                vec![]
            }
        }
        UiEvent::Tick => {
            app.spinner_frame = app.spinner_frame.wrapping_add(1);
            app.toasts.expire(Instant::now());
            vec![]
        }
        UiEvent::Terminal(Event::Key(key)) if key.kind != KeyEventKind::Release => {
            handle_key(app, key)
        }
        UiEvent::Terminal(Event::Paste(text)) => {
            match app.screen {
                Screen::Login => auth::handle_form_paste(&mut app.login.form, &text),
                Screen::Register => auth::handle_form_paste(&mut app.register.form, &text),
                Screen::Welcome | Screen::Dashboard => {}
            }
            vec![]
        }
        UiEvent::Terminal(_) => vec![],
        UiEvent::TaskCompleted { kind, completed } => {
            if !app.tasks.state_mut(kind).finish_if_active(completed.id) {
                tracing::debug!(?kind, id = completed.id.0, "Dropping stale task result");
                return vec![];
            }
            update(app, *completed.result)
        }
        UiEvent::LoginFinished(result) => {
            app.login.form.submitting = false;
            match result {
                Ok(session) => {
                    app.login.form.reset();
                    app.session = Some(session);
                    enter_dashboard(app)
                }
                Err(_) => vec![],
            }
        }
        UiEvent::RegisterFinished(result) => {
            app.register.form.submitting = false;
            match result {
                Ok(()) => {
                    app.register.form.reset();
                    vec![UiEffect::ScheduleLoginRedirect {
                        delay: app.settings.register_redirect_delay,
                    }]
                }
                Err(_) => vec![],
            }
        }
        UiEvent::UsersLoaded(result) => {
            app.dashboard.finish_loading(result);
            vec![]
        }
        UiEvent::RegisterRedirectDue => {
            // A login completed meanwhile wins over the redirect.
            if app.screen != Screen::Dashboard {
                show(app, Screen::Login);
            }
            vec![]
        }
        UiEvent::Notify(notification) => {
            app.toasts.push(notification, Instant::now());
            vec![]
        }
    }
}

fn show(app: &mut AppState, screen: Screen) {
    if app.screen != screen {
        tracing::debug!(from = ?app.screen, to = ?screen, "Switching screen");
    }
    app.screen = screen;
}

/// Shows the dashboard and starts fetching the users list.
fn enter_dashboard(app: &mut AppState) -> Vec<UiEffect> {
    show(app, Screen::Dashboard);
    start_users_load(app)
}

fn start_users_load(app: &mut AppState) -> Vec<UiEffect> {
    if app.tasks.state(TaskKind::UsersLoad).is_running() {
        return vec![];
    }
    let task = app.task_seq.next_id();
    app.tasks.users_load.on_started(task);
    app.dashboard.begin_loading();
    vec![UiEffect::LoadUsers { task }]
}

fn logout(app: &mut AppState) -> Vec<UiEffect> {
    app.session = None;
    app.tasks.users_load.clear();
    app.dashboard = DashboardState::default();
    show(app, Screen::Welcome);
    vec![UiEffect::Logout]
}

fn handle_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return vec![UiEffect::Quit];
    }

    match app.screen {
        Screen::Welcome => handle_welcome_key(app, key),
        Screen::Login => handle_login_key(app, key),
        Screen::Register => handle_register_key(app, key),
        Screen::Dashboard => handle_dashboard_key(app, key),
    }
}

fn handle_welcome_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    match key.code {
        KeyCode::Char('l') | KeyCode::Enter => show(app, Screen::Login),
        KeyCode::Char('r') => show(app, Screen::Register),
        KeyCode::Char('q') | KeyCode::Esc => return vec![UiEffect::Quit],
        _ => {}
    }
    vec![]
}

fn handle_login_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    match auth::handle_form_key(&mut app.login.form, key) {
        FormAction::None => vec![],
        FormAction::Back => {
            show(app, Screen::Welcome);
            vec![]
        }
        FormAction::ShowLogin => vec![],
        FormAction::ShowRegister => {
            show(app, Screen::Register);
            vec![]
        }
        FormAction::Submit => {
            if app.tasks.state(TaskKind::Login).is_running() {
                return vec![];
            }
            let task = app.task_seq.next_id();
            app.tasks.login.on_started(task);
            app.login.form.submitting = true;
            vec![UiEffect::Login {
                task,
                credentials: app.login.credentials(),
            }]
        }
    }
}

fn handle_register_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    match auth::handle_form_key(&mut app.register.form, key) {
        FormAction::None => vec![],
        FormAction::Back => {
            show(app, Screen::Welcome);
            vec![]
        }
        FormAction::ShowLogin => {
            show(app, Screen::Login);
            vec![]
        }
        FormAction::ShowRegister => vec![],
        FormAction::Submit => {
            if app.tasks.state(TaskKind::Register).is_running() {
                return vec![];
            }
            let task = app.task_seq.next_id();
            app.tasks.register.on_started(task);
            app.register.form.submitting = true;
            vec![UiEffect::Register {
                task,
                request: app.register.request(),
            }]
        }
    }
}

fn handle_dashboard_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    match key.code {
        KeyCode::Tab | KeyCode::BackTab => app.dashboard.tab = app.dashboard.tab.next(),
        KeyCode::Char('1') => app.dashboard.tab = DashboardTab::Users,
        KeyCode::Char('2') => app.dashboard.tab = DashboardTab::Profile,
        KeyCode::Down | KeyCode::Char('j') => app.dashboard.select_next(),
        KeyCode::Up | KeyCode::Char('k') => app.dashboard.select_prev(),
        KeyCode::Char('r') => return start_users_load(app),
        KeyCode::Char('o') => return logout(app),
        KeyCode::Char('q') => return vec![UiEffect::Quit],
        _ => {}
    }
    vec![]
}
