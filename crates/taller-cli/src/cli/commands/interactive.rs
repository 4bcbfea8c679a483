use std::sync::Arc;

use anyhow::{Context, Result};
use taller_core::config::{Config, paths};
use taller_core::logging;
use taller_core::storage::FileStore;

pub async fn run(config: &Config, base_url: &str) -> Result<()> {
    let logs_dir = paths::logs_dir();
    let _log_guard = logging::init_file(&logs_dir, &config.log.level)
        .with_context(|| format!("init logging in {}", logs_dir.display()))?;

    taller_tui::run_interactive(config, base_url, Arc::new(FileStore::open_default())).await
}
