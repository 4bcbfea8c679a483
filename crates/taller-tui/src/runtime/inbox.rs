//! Inbox channel for async results.
//!
//! Spawned tasks and the notification sink push `UiEvent`s here; the runtime
//! drains the receiver once per frame.

use taller_core::notify::{Notification, Notifier};
use tokio::sync::mpsc;

use crate::events::UiEvent;

pub type UiEventSender = mpsc::UnboundedSender<UiEvent>;
pub type UiEventReceiver = mpsc::UnboundedReceiver<UiEvent>;

pub fn channel() -> (UiEventSender, UiEventReceiver) {
    mpsc::unbounded_channel()
}

/// Turns session and users notifications into toast events.
#[derive(Debug, Clone)]
pub struct InboxNotifier {
    tx: UiEventSender,
}

impl InboxNotifier {
    pub fn new(tx: UiEventSender) -> Self {
        Self { tx }
    }
}

impl Notifier for InboxNotifier {
    fn notify(&self, notification: Notification) {
        tracing::debug!(level = ?notification.level, message = %notification.message, "Notification");
        // The receiver only goes away when the UI is shutting down.
        let _ = self.tx.send(UiEvent::Notify(notification));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notifier_forwards_to_inbox() {
        let (tx, mut rx) = channel();
        InboxNotifier::new(tx).notify(Notification::success("ok"));

        match rx.try_recv() {
            Ok(UiEvent::Notify(n)) => assert_eq!(n, Notification::success("ok")),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_notifier_ignores_closed_inbox() {
        let (tx, rx) = channel();
        drop(rx);
        InboxNotifier::new(tx).notify(Notification::info("late"));
    }
}
