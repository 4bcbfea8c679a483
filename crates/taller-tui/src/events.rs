//! UI event types.
//!
//! Everything the reducer reacts to: terminal input, ticks, and results
//! delivered to the runtime inbox by spawned tasks.

use crossterm::event::Event;
use taller_core::models::{Session, UserSummary};
use taller_core::notify::Notification;

use crate::common::{TaskCompleted, TaskKind};

#[derive(Debug)]
pub enum UiEvent {
    /// Dispatched once before the first frame.
    Init,
    Tick,
    Terminal(Event),

    /// A tracked task finished; `completed.result` is the inner event.
    TaskCompleted {
        kind: TaskKind,
        completed: TaskCompleted<Box<UiEvent>>,
    },

    /// Login outcome. Errors carry the user-facing message.
    LoginFinished(Result<Session, String>),
    RegisterFinished(Result<(), String>),
    UsersLoaded(Result<Vec<UserSummary>, String>),

    /// The post-registration delay elapsed.
    RegisterRedirectDue,

    /// A notification from the session manager or users service.
    Notify(Notification),
}
