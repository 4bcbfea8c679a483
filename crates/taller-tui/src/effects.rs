//! UI effect types.
//!
//! Effects are commands returned by the reducer that the runtime executes.
//! They represent I/O and task spawning only, which keeps the reducer pure.

use std::time::Duration;

use taller_core::models::{Credentials, RegistrationRequest};

use crate::common::TaskId;

#[derive(Debug)]
pub enum UiEffect {
    /// Quit the application.
    Quit,

    /// Log in through the session manager.
    Login {
        task: TaskId,
        credentials: Credentials,
    },

    /// Register a new account through the session manager.
    Register {
        task: TaskId,
        request: RegistrationRequest,
    },

    /// Fetch the users list.
    LoadUsers { task: TaskId },

    /// Clear the session (memory and storage).
    Logout,

    /// Deliver `UiEvent::RegisterRedirectDue` after `delay`.
    ScheduleLoginRedirect { delay: Duration },
}
