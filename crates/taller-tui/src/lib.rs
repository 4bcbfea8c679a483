//! Full-screen terminal interface for Taller.
//!
//! Welcome, login, registration and dashboard panels driven by an Elm-style
//! reducer (`update`), a pure `render`, and a runtime that executes effects.

pub mod common;
pub mod effects;
pub mod events;
pub mod features;
pub mod overlays;
pub mod render;
pub mod runtime;
pub mod state;
pub mod terminal;
pub mod update;

use std::io::{IsTerminal, stdout};
use std::sync::Arc;

use anyhow::Result;
pub use runtime::TuiRuntime;
use taller_core::api::ApiClient;
use taller_core::config::Config;
use taller_core::notify::Notifier;
use taller_core::session::SessionManager;
use taller_core::storage::KeyValueStore;
use taller_core::users::UsersService;

use crate::runtime::inbox::{self, InboxNotifier};
use crate::state::{AppState, UiSettings};

/// Runs the interactive interface against `base_url`, persisting the
/// session in `store`.
///
/// # Errors
/// Returns an error if stdout is not a terminal or the terminal fails.
pub async fn run_interactive(
    config: &Config,
    base_url: &str,
    store: Arc<dyn KeyValueStore>,
) -> Result<()> {
    if !stdout().is_terminal() {
        anyhow::bail!(
            "Interactive mode requires a terminal.\n\
             Use `taller login`, `taller users` or `taller whoami` for scripted use."
        );
    }

    let (inbox_tx, inbox_rx) = inbox::channel();
    let notifier: Arc<dyn Notifier> = Arc::new(InboxNotifier::new(inbox_tx.clone()));

    let api = ApiClient::new(base_url);
    let session = Arc::new(SessionManager::new(
        api.clone(),
        store,
        Arc::clone(&notifier),
    ));
    let users = UsersService::new(api, notifier);

    tracing::info!(
        base_url,
        authenticated = session.is_authenticated(),
        "Starting interactive mode"
    );

    let state = AppState::new(session.current_session(), UiSettings::from_config(config));
    let mut runtime = TuiRuntime::new(state, session, users, inbox_tx, inbox_rx)?;
    runtime.run()
}
