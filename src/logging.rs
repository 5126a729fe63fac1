//! File logging setup.
//!
//! The terminal is owned by the UI, so log records go to a file next to the
//! config. `RUST_LOG` overrides the configured level.

use crate::config::Config;
use anyhow::{Context, Result};
use env_logger::{Env, Target};
use std::fs::{self, OpenOptions};
use std::path::PathBuf;

/// Install the global logger.
///
/// # Returns
/// * `Result<PathBuf>` - Path of the log file
pub fn init(config: &Config) -> Result<PathBuf> {
    let path = config.log_file_path()?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory: {}", parent.display()))?;
    }

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file: {}", path.display()))?;

    env_logger::Builder::from_env(Env::default().default_filter_or(config.log_level.as_str()))
        .target(Target::Pipe(Box::new(file)))
        .format_timestamp_millis()
        .try_init()
        .context("Failed to initialize logger")?;

    Ok(path)
}
