//! Tracing subscriber setup
//!
//! CLI mode logs to stderr. TUI mode owns the terminal, so it logs to
//! `<cache_dir>/cinemapp/cinemapp.log` instead, or not at all when that file
//! cannot be opened.

use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

fn filter(verbose: bool) -> EnvFilter {
    let default = if verbose { "warn,cinemapp=debug" } else { "warn" };
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}

/// Log file used in TUI mode
pub fn log_path() -> Option<PathBuf> {
    dirs::cache_dir().map(|p| p.join("cinemapp").join("cinemapp.log"))
}

/// Install a stderr subscriber
pub fn init_stderr(verbose: bool) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter(verbose))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Install a file subscriber. Returns false when no log file could be opened.
pub fn init_file(verbose: bool) -> bool {
    let Some(path) = log_path() else {
        return false;
    };
    if let Some(parent) = path.parent() {
        if std::fs::create_dir_all(parent).is_err() {
            return false;
        }
    }
    let Ok(file) = OpenOptions::new().create(true).append(true).open(&path) else {
        return false;
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter(verbose))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .is_ok()
}
