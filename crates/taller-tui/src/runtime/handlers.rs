//! Effect handlers: async functions that perform I/O and return the event
//! describing the outcome. The runtime owns spawning.

use std::sync::Arc;
use std::time::Duration;

use taller_core::models::{Credentials, RegistrationRequest};
use taller_core::session::SessionManager;
use taller_core::users::UsersService;

use crate::events::UiEvent;

pub async fn login(session: Arc<SessionManager>, credentials: Credentials) -> UiEvent {
    UiEvent::LoginFinished(
        session
            .login(&credentials)
            .await
            .map_err(|e| e.to_string()),
    )
}

pub async fn register(session: Arc<SessionManager>, request: RegistrationRequest) -> UiEvent {
    UiEvent::RegisterFinished(
        session
            .register(&request)
            .await
            .map(|_| ())
            .map_err(|e| e.to_string()),
    )
}

pub async fn load_users(users: UsersService) -> UiEvent {
    UiEvent::UsersLoaded(users.get_all_users().await.map_err(|e| e.to_string()))
}

pub async fn login_redirect(delay: Duration) -> UiEvent {
    tokio::time::sleep(delay).await;
    UiEvent::RegisterRedirectDue
}
