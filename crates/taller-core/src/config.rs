//! Configuration management for Taller.
//!
//! Loads configuration from ${TALLER_HOME}/config.toml with sensible defaults.

use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Default remote service address.
pub const DEFAULT_BASE_URL: &str = "https://areptaler6.duckdns.org:8443";

/// Environment variable overriding the configured base URL.
pub const BASE_URL_ENV: &str = "TALLER_API_BASE_URL";

/// Returns the default config template with comments.
///
/// This is embedded from default_config.toml at compile time.
fn default_config_template() -> &'static str {
    include_str!("../default_config.toml")
}

/// Merges user config values into the default template.
///
/// New comments/sections from the template are always present,
/// while the user's customized values are preserved.
fn merge_with_template(user_config: &str) -> Result<String> {
    use toml_edit::DocumentMut;

    let mut doc: DocumentMut = default_config_template()
        .parse()
        .context("Failed to parse default config template")?;

    let user_doc: DocumentMut = user_config.parse().context("Failed to parse user config")?;

    merge_items(doc.as_table_mut(), user_doc.as_table());

    Ok(doc.to_string())
}

/// Recursively merges items from source table into target table.
fn merge_items(target: &mut toml_edit::Table, source: &toml_edit::Table) {
    use toml_edit::Item;

    for (key, value) in source.iter() {
        match value {
            Item::Value(v) => {
                target[key] = Item::Value(v.clone());
            }
            Item::Table(src_table) => {
                if let Some(Item::Table(target_table)) = target.get_mut(key) {
                    merge_items(target_table, src_table);
                } else {
                    target[key] = Item::Table(src_table.clone());
                }
            }
            Item::ArrayOfTables(src_arr) => {
                target[key] = Item::ArrayOfTables(src_arr.clone());
            }
            Item::None => {}
        }
    }
}

pub mod paths {
    //! Path resolution for Taller configuration and data files.
    //!
    //! TALLER_HOME resolution order:
    //! 1. TALLER_HOME environment variable (if set)
    //! 2. ~/.config/taller (default)
    //! 3. ./.taller when no home directory can be determined

    use std::path::PathBuf;

    /// Returns the Taller home directory.
    pub fn taller_home() -> PathBuf {
        if let Ok(home) = std::env::var("TALLER_HOME") {
            return PathBuf::from(home);
        }

        dirs::home_dir()
            .map(|h| h.join(".config").join("taller"))
            .unwrap_or_else(|| PathBuf::from(".taller"))
    }

    /// Returns the path to the config.toml file.
    pub fn config_path() -> PathBuf {
        taller_home().join("config.toml")
    }

    /// Returns the path to the key-value storage file (session persistence).
    pub fn storage_path() -> PathBuf {
        taller_home().join("storage.json")
    }

    /// Returns the directory holding interactive-mode log files.
    pub fn logs_dir() -> PathBuf {
        taller_home().join("logs")
    }
}

/// Remote service settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL of the remote service (falls back to `DEFAULT_BASE_URL`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

/// Terminal UI settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Seconds a notification stays visible.
    pub toast_secs: u64,
    /// Delay before the login panel is shown after a successful registration.
    pub register_redirect_ms: u64,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            toast_secs: 4,
            register_redirect_ms: 1500,
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// `tracing_subscriber::EnvFilter` directive.
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub ui: UiConfig,
    pub log: LogConfig,
}

impl Config {
    /// Loads configuration from the default config path.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load() -> Result<Self> {
        Self::load_from(&paths::config_path())
    }

    /// Loads configuration from a specific path.
    /// Returns defaults if file doesn't exist.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config from {}", path.display()))
        } else {
            Ok(Config::default())
        }
    }

    /// Creates a default config file at the given path.
    ///
    /// # Errors
    /// Returns an error if the file already exists or cannot be written.
    pub fn init(path: &Path) -> Result<()> {
        if path.exists() {
            anyhow::bail!("Config file already exists at {}", path.display());
        }

        Self::write_config(path, default_config_template())
    }

    /// Saves only the `[api] base_url` key to the default config file.
    ///
    /// # Errors
    /// Returns an error if the URL is invalid or the file cannot be written.
    pub fn save_base_url(base_url: &str) -> Result<()> {
        Self::save_base_url_to(&paths::config_path(), base_url)
    }

    /// Saves only the `[api] base_url` key to a specific config file path.
    ///
    /// Creates the file with the default template if it doesn't exist.
    /// If the file exists, merges user values into the latest template.
    ///
    /// # Errors
    /// Returns an error if the URL is invalid or the file cannot be written.
    pub fn save_base_url_to(path: &Path, base_url: &str) -> Result<()> {
        use toml_edit::{DocumentMut, value};

        let base_url = base_url.trim();
        validate_url(base_url)?;

        let contents = if path.exists() {
            let user_config = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            merge_with_template(&user_config)?
        } else {
            default_config_template().to_string()
        };

        let mut doc: DocumentMut = contents
            .parse()
            .with_context(|| format!("Failed to parse config from {}", path.display()))?;

        doc["api"]["base_url"] = value(base_url);

        Self::write_config(path, &doc.to_string())
    }

    /// Resolves the base URL with precedence: flag > env > config > default.
    ///
    /// # Errors
    /// Returns an error if the winning value is not a valid URL.
    pub fn effective_base_url(&self, flag: Option<&str>) -> Result<String> {
        let env = std::env::var(BASE_URL_ENV).ok();
        resolve_base_url(flag, env.as_deref(), self.api.base_url.as_deref())
    }

    /// Notification lifetime.
    pub fn toast_duration(&self) -> Duration {
        Duration::from_secs(self.ui.toast_secs)
    }

    /// Delay before switching to the login panel after registration.
    pub fn register_redirect_delay(&self) -> Duration {
        Duration::from_millis(self.ui.register_redirect_ms)
    }

    /// Writes config content to a file, creating parent directories as needed.
    /// Uses atomic write (temp file + rename) to prevent corruption.
    fn write_config(path: &Path, content: &str) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        let tmp_path = path.with_extension("toml.tmp");
        fs::write(&tmp_path, content)
            .with_context(|| format!("Failed to write config to {}", tmp_path.display()))?;
        fs::rename(&tmp_path, path).with_context(|| {
            format!(
                "Failed to rename {} to {}",
                tmp_path.display(),
                path.display()
            )
        })?;

        Ok(())
    }
}

/// Picks the first non-blank candidate in precedence order and validates it.
fn resolve_base_url(flag: Option<&str>, env: Option<&str>, config: Option<&str>) -> Result<String> {
    let chosen = [flag, env, config]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|candidate| !candidate.is_empty());

    match chosen {
        Some(url) => {
            validate_url(url)?;
            Ok(url.trim_end_matches('/').to_string())
        }
        None => Ok(DEFAULT_BASE_URL.to_string()),
    }
}

/// Validates that a URL is well-formed.
fn validate_url(url: &str) -> Result<()> {
    url::Url::parse(url).with_context(|| format!("Invalid base URL: {url}"))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_load_missing_file_returns_defaults() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("nonexistent.toml");

        let config = Config::load_from(&config_path).unwrap();
        assert_eq!(config.api.base_url, None);
        assert_eq!(config.ui.toast_secs, 4);
        assert_eq!(config.ui.register_redirect_ms, 1500);
        assert_eq!(config.log.level, "info");
    }

    #[test]
    fn test_load_partial_config_merges_defaults() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.toml");

        fs::write(&config_path, "[ui]\ntoast_secs = 9\n").unwrap();

        let config = Config::load_from(&config_path).unwrap();
        assert_eq!(config.ui.toast_secs, 9);
        assert_eq!(config.ui.register_redirect_ms, 1500);
        assert_eq!(config.api.base_url, None);
    }

    #[test]
    fn test_init_creates_config_with_defaults() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("subdir").join("config.toml");

        Config::init(&config_path).unwrap();

        let contents = fs::read_to_string(&config_path).unwrap();
        assert!(contents.contains("# Taller Configuration"));
        assert!(contents.contains("# base_url ="));

        let config = Config::load_from(&config_path).unwrap();
        assert_eq!(config.ui.toast_secs, 4);
    }

    /// Config init: fails if file exists (no silent overwrite).
    #[test]
    fn test_init_fails_if_exists() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.toml");
        fs::write(&config_path, "").unwrap();

        assert!(Config::init(&config_path).is_err());
    }

    #[test]
    fn test_save_base_url_creates_file_with_template() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("nested").join("config.toml");

        Config::save_base_url_to(&config_path, "http://localhost:8080").unwrap();

        let config = Config::load_from(&config_path).unwrap();
        assert_eq!(
            config.api.base_url.as_deref(),
            Some("http://localhost:8080")
        );
        let contents = fs::read_to_string(&config_path).unwrap();
        assert!(contents.contains("# Taller Configuration"));
    }

    #[test]
    fn test_save_base_url_preserves_other_fields() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.toml");
        fs::write(&config_path, "[ui]\ntoast_secs = 7\n\n[log]\nlevel = \"debug\"\n").unwrap();

        Config::save_base_url_to(&config_path, "https://api.example.com").unwrap();

        let config = Config::load_from(&config_path).unwrap();
        assert_eq!(
            config.api.base_url.as_deref(),
            Some("https://api.example.com")
        );
        assert_eq!(config.ui.toast_secs, 7);
        assert_eq!(config.log.level, "debug");
    }

    #[test]
    fn test_save_base_url_rejects_invalid_url() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.toml");

        assert!(Config::save_base_url_to(&config_path, "not a url").is_err());
        assert!(!config_path.exists());
    }

    #[test]
    fn test_resolve_base_url_precedence() {
        assert_eq!(
            resolve_base_url(Some("http://flag"), Some("http://env"), Some("http://cfg")).unwrap(),
            "http://flag"
        );
        assert_eq!(
            resolve_base_url(None, Some("http://env"), Some("http://cfg")).unwrap(),
            "http://env"
        );
        assert_eq!(
            resolve_base_url(Some("  "), None, Some("http://cfg/")).unwrap(),
            "http://cfg"
        );
        assert_eq!(resolve_base_url(None, None, None).unwrap(), DEFAULT_BASE_URL);
    }

    #[test]
    fn test_resolve_base_url_invalid_is_error() {
        assert!(resolve_base_url(Some("::nope"), None, None).is_err());
    }

    #[test]
    fn test_durations() {
        let config = Config::default();
        assert_eq!(config.toast_duration(), Duration::from_secs(4));
        assert_eq!(config.register_redirect_delay(), Duration::from_millis(1500));
    }
}
