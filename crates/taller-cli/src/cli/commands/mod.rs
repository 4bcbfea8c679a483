pub mod auth;
pub mod config;
pub mod interactive;
pub mod users;

use std::sync::Arc;

use taller_core::api::ApiClient;
use taller_core::session::SessionManager;
use taller_core::storage::FileStore;

use super::console::ConsoleNotifier;

/// Session manager backed by the default storage file, reporting to the console.
fn session_manager(base_url: &str) -> SessionManager {
    SessionManager::new(
        ApiClient::new(base_url),
        Arc::new(FileStore::open_default()),
        Arc::new(ConsoleNotifier),
    )
}
