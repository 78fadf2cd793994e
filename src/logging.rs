use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

use crate::defaults::Defaults;

/// `RUST_LOG` wins over the built-in default.
fn filter(default: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}

/// Log to stderr; used by the one-shot commands, which stay quiet below
/// warnings unless `RUST_LOG` says otherwise.
pub fn init_stderr() {
    tracing_subscriber::fmt()
        .with_env_filter(filter(Defaults::CLI_LOG_FILTER))
        .with_writer(std::io::stderr)
        .init();
}

/// Log to a file. The TUI owns the terminal, so nothing may go to stderr
/// while it runs.
pub fn init_file(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).with_context(|| format!("creating {}", parent.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter(Defaults::LOG_FILTER))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}
