//! User directory listing.

use std::sync::Arc;

use crate::api::{ApiClient, ApiResult, endpoints};
use crate::messages;
use crate::models::UserSummary;
use crate::notify::{Notification, Notifier};

/// Fetches the registered users for the dashboard.
#[derive(Clone)]
pub struct UsersService {
    api: ApiClient,
    notifier: Arc<dyn Notifier>,
}

impl UsersService {
    pub fn new(api: ApiClient, notifier: Arc<dyn Notifier>) -> Self {
        Self { api, notifier }
    }

    /// Lists every user. Results are never cached.
    ///
    /// # Errors
    /// Propagates the request error after an error notification.
    pub async fn get_all_users(&self) -> ApiResult<Vec<UserSummary>> {
        match self.api.get_json::<Vec<UserSummary>>(endpoints::USERS).await {
            Ok(users) => {
                tracing::debug!(count = users.len(), "Loaded users");
                Ok(users)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load users");
                self.notifier
                    .notify(Notification::error(messages::USERS_LOAD_FAILED));
                Err(e)
            }
        }
    }
}
