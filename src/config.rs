//! Configuration management for the listings browser.
//!
//! Handles loading configuration from JSONC files and the
//! environment override for the API base URL.

use anyhow::{Context, Result};
use dirs::config_dir;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Base URL used when neither the environment nor the config file sets one.
pub const DEFAULT_API_BASE_URL: &str = "https://lab01-howtokys-projects.vercel.app";

/// Environment variable that overrides the API base URL.
pub const API_BASE_URL_ENV: &str = "LISTINGS_API_BASE_URL";

/// Application configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Listings API base URL (without `/api/listings`)
    pub api_base_url: Option<String>,
    /// HTTP request timeout in seconds; no timeout when unset
    pub request_timeout_secs: Option<u64>,
    /// Log file path (relative to config dir or absolute)
    pub log_path: String,
    /// Default log level filter, overridden by `RUST_LOG`
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: None,
            request_timeout_secs: None,
            log_path: "listings-tui.log".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from file and environment.
    ///
    /// # Arguments
    /// * `path` - Optional path to config file. If None, uses default location.
    ///
    /// # Returns
    /// * `Result<Config>` - Loaded configuration or error
    ///
    /// # Details
    /// Reads `$XDG_CONFIG_HOME/listings-tui/config.jsonc` (or the given path)
    /// when it exists, then applies `LISTINGS_API_BASE_URL` on top.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = Self::load_file(path)?;
        config.apply_base_url_override(std::env::var(API_BASE_URL_ENV).ok());
        Ok(config)
    }

    /// Load configuration from the JSONC file only.
    fn load_file(path: Option<&Path>) -> Result<Self> {
        let config_path = if let Some(p) = path {
            p.to_path_buf()
        } else {
            Self::default_config_path()?
        };

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;

        let config: Config = serde_json::from_str(&strip_line_comments(&content))
            .with_context(|| "Failed to deserialize config")?;

        Ok(config)
    }

    /// Replace the base URL with a non-blank override.
    pub fn apply_base_url_override(&mut self, value: Option<String>) {
        if let Some(url) = value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty()) {
            self.api_base_url = Some(url);
        }
    }

    /// Effective API base URL.
    pub fn api_base_url(&self) -> String {
        self.api_base_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .unwrap_or(DEFAULT_API_BASE_URL)
            .to_string()
    }

    /// Get default configuration file path.
    ///
    /// # Returns
    /// * `Result<PathBuf>` - `$XDG_CONFIG_HOME/listings-tui/config.jsonc`
    pub fn default_config_path() -> Result<PathBuf> {
        let config_dir =
            config_dir().ok_or_else(|| anyhow::anyhow!("Failed to determine config directory"))?;
        Ok(config_dir.join("listings-tui").join("config.jsonc"))
    }

    /// Get log file path.
    ///
    /// # Details
    /// If log_path is absolute, returns it as-is.
    /// Otherwise, returns path relative to config directory.
    pub fn log_file_path(&self) -> Result<PathBuf> {
        let log_path = Path::new(&self.log_path);
        if log_path.is_absolute() {
            Ok(log_path.to_path_buf())
        } else {
            let config_dir = config_dir()
                .ok_or_else(|| anyhow::anyhow!("Failed to determine config directory"))?;
            Ok(config_dir.join("listings-tui").join(&self.log_path))
        }
    }
}

/// Strip `//` comments that are not inside a string.
fn strip_line_comments(content: &str) -> String {
    content
        .lines()
        .map(strip_line_comment)
        .collect::<Vec<_>>()
        .join("\n")
}

fn strip_line_comment(line: &str) -> &str {
    let mut in_string = false;
    let mut prev = None;
    for (i, ch) in line.char_indices() {
        match ch {
            '"' if prev != Some('\\') => in_string = !in_string,
            '/' if !in_string && prev == Some('/') => return line[..i - 1].trim_end(),
            _ => {}
        }
        prev = Some(ch);
    }
    line
}
