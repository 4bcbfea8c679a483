//! Application state.
//!
//! ```text
//! AppState
//! ├── screen: Screen            (the one visible panel)
//! ├── login / register          (form state)
//! ├── dashboard                 (tab, users list)
//! ├── session: Option<Session>  (snapshot shown by the dashboard)
//! ├── toasts                    (transient notifications)
//! ├── task_seq / tasks          (async task ids and lifecycle)
//! └── should_quit
//! ```
//!
//! The session snapshot mirrors what the session manager reported last; the
//! manager remains the owner of the real session.

use std::time::Duration;

use taller_core::config::Config;
use taller_core::models::Session;

use crate::common::{TaskSeq, Tasks};
use crate::features::auth::{LoginForm, RegisterForm};
use crate::features::dashboard::DashboardState;
use crate::overlays::Toasts;

/// Top-level panels. Exactly one is visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    Welcome,
    Login,
    Register,
    Dashboard,
}

/// Timing knobs read from `[ui]`.
#[derive(Debug, Clone, Copy)]
pub struct UiSettings {
    pub toast_lifetime: Duration,
    pub register_redirect_delay: Duration,
}

impl UiSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            toast_lifetime: config.toast_duration(),
            register_redirect_delay: config.register_redirect_delay(),
        }
    }
}

impl Default for UiSettings {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

pub struct AppState {
    pub should_quit: bool,
    pub screen: Screen,
    pub login: LoginForm,
    pub register: RegisterForm,
    pub dashboard: DashboardState,
    pub session: Option<Session>,
    pub toasts: Toasts,
    pub task_seq: TaskSeq,
    pub tasks: Tasks,
    /// Advanced on every tick; drives the spinners.
    pub spinner_frame: usize,
    pub settings: UiSettings,
}

impl AppState {
    /// Creates the state for a session restored from storage (if any).
    ///
    /// The first screen is chosen when the runtime dispatches `UiEvent::Init`.
    pub fn new(session: Option<Session>, settings: UiSettings) -> Self {
        Self {
            should_quit: false,
            screen: Screen::Welcome,
            login: LoginForm::default(),
            register: RegisterForm::default(),
            dashboard: DashboardState::default(),
            session,
            toasts: Toasts::new(settings.toast_lifetime),
            task_seq: TaskSeq::default(),
            tasks: Tasks::default(),
            spinner_frame: 0,
            settings,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }
}
