//! File logging
//!
//! The terminal belongs to the UI, so log lines go to
//! `headless-cms-tui.log` in the system temp directory instead.

use color_eyre::Result;
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter (`debug`, `headless_cms_tui=trace`, ...)
pub const LOG_FILTER_ENV: &str = "HEADLESS_CMS_LOG";

pub fn log_path() -> PathBuf {
    std::env::temp_dir().join("headless-cms-tui.log")
}

/// Install the global subscriber writing to [`log_path`]
pub fn init() -> Result<PathBuf> {
    let path = log_path();
    let file = OpenOptions::new().create(true).append(true).open(&path)?;

    let filter = EnvFilter::try_from_env(LOG_FILTER_ENV).unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .try_init()
        .map_err(|e| color_eyre::eyre::eyre!("failed to install logger: {e}"))?;

    Ok(path)
}
