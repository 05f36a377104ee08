//! File logging. The terminal belongs to the UI, so nothing is written to
//! stdout or stderr once the subscriber is installed.

use std::env;
use std::fs::{self, File};
use std::path::PathBuf;
use std::sync::Arc;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Environment variable holding the `EnvFilter` directives.
pub const LOG_ENV: &str = "VALENTINE_LOG";

/// `$XDG_STATE_HOME/valentine/valentine.log`, else under `~/.local/state`,
/// else the temp dir.
pub fn log_file_path() -> PathBuf {
    let state_dir = env::var_os("XDG_STATE_HOME")
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .or_else(|| {
            env::var_os("HOME")
                .filter(|v| !v.is_empty())
                .map(|home| PathBuf::from(home).join(".local").join("state"))
        })
        .unwrap_or_else(env::temp_dir);
    state_dir.join("valentine").join("valentine.log")
}

pub fn init() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
    let log_path = log_file_path();

    if let Some(parent) = log_path.parent() {
        let _ = fs::create_dir_all(parent);
    }

    match File::create(&log_path) {
        Ok(file) => {
            let file_layer = tracing_subscriber::fmt::layer()
                .with_writer(Arc::new(file))
                .with_ansi(false);
            tracing_subscriber::registry()
                .with(filter)
                .with(file_layer)
                .init();
        }
        Err(e) => {
            // Still before raw mode, so stderr is fine here.
            eprintln!(
                "valentine: failed to create log file at {}: {e}",
                log_path.display()
            );
        }
    }
}
