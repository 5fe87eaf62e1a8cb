use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

const LOG_FILE: &str = "mimeteo.log";

/// Route tracing output to a log file so it does not draw over the terminal UI.
///
/// The filter comes from `RUST_LOG` and defaults to `info`.
pub(crate) fn init(dir: &Path) -> Result<PathBuf> {
    fs::create_dir_all(dir).context("Failed to create log directory")?;

    let path = dir.join(LOG_FILE);
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_err| EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();

    Ok(path)
}
