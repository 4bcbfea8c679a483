//! Tracing subscriber setup.
//!
//! The filter comes from `TALLER_LOG` when set, otherwise from the caller's
//! default directive (usually `[log] level`).

use std::path::Path;

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Environment variable holding an `EnvFilter` directive.
pub const LOG_ENV: &str = "TALLER_LOG";

/// Log file name inside the logs directory.
pub const LOG_FILE_NAME: &str = "taller.log";

fn env_filter(default_directive: &str) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(default_directive))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Logs to stderr. Used by scripted commands.
pub fn init_stderr(default_directive: &str) {
    let _ = tracing_subscriber::registry()
        .with(env_filter(default_directive))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .try_init();
}

/// Logs to `<dir>/taller.log` so a full-screen UI is not disturbed.
///
/// Keep the returned guard alive until exit; dropping it flushes the writer.
///
/// # Errors
/// Returns an error if the logs directory cannot be created.
pub fn init_file(dir: &Path, default_directive: &str) -> Result<WorkerGuard> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create logs directory {}", dir.display()))?;

    let appender = tracing_appender::rolling::never(dir, LOG_FILE_NAME);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let _ = tracing_subscriber::registry()
        .with(env_filter(default_directive))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false),
        )
        .try_init();

    Ok(guard)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_default_directive_falls_back() {
        // Must not panic whatever the directive looks like.
        let _ = env_filter("[[not a directive");
    }

    #[test]
    fn test_init_file_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let logs = dir.path().join("logs");
        let _guard = init_file(&logs, "info").unwrap();
        assert!(logs.is_dir());
    }
}
