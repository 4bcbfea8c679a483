use anyhow::{Context, Result};
use taller_core::config::{Config, paths};

pub fn path() {
    println!("{}", paths::config_path().display());
}

pub fn init() -> Result<()> {
    let config_path = paths::config_path();
    Config::init(&config_path)
        .with_context(|| format!("init config at {}", config_path.display()))?;
    println!("Created config at {}", config_path.display());
    Ok(())
}

pub fn set_base_url(url: &str) -> Result<()> {
    let config_path = paths::config_path();
    Config::save_base_url(url)
        .with_context(|| format!("update config at {}", config_path.display()))?;
    println!("Base URL set to {}", url.trim());
    Ok(())
}
