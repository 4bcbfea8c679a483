//! Console output for scripted commands.

use std::io::{self, BufRead, IsTerminal, Write};

use anyhow::{Context, Result};
use taller_core::notify::{Notification, NotificationLevel, Notifier};

/// Prints success and info notifications to stdout.
///
/// Error notifications are only logged: the failing command returns the
/// same error and `main` prints it once.
#[derive(Debug, Default)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, notification: Notification) {
        match notification.level {
            NotificationLevel::Success | NotificationLevel::Info => {
                println!("{}", notification.message);
            }
            NotificationLevel::Error => {
                tracing::debug!(message = %notification.message, "Error notification");
            }
        }
    }
}

/// Returns `password`, or reads one line from stdin when it is absent.
///
/// Prompts on stderr when stdin is a terminal.
pub fn password_or_stdin(password: Option<String>) -> Result<String> {
    if let Some(password) = password {
        return Ok(password);
    }

    let stdin = io::stdin();
    if stdin.is_terminal() {
        eprint!("Contraseña: ");
        io::stderr().flush().context("flush prompt")?;
    }

    let mut line = String::new();
    stdin
        .lock()
        .read_line(&mut line)
        .context("read password from stdin")?;

    let password = line.trim_end_matches(['\r', '\n']);
    if password.is_empty() {
        anyhow::bail!("No password given. Pass --password or pipe it on stdin.");
    }
    Ok(password.to_string())
}
