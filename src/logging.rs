//! Log output for the console binary.
//!
//! stdout carries bot replies and nothing else. Logs are written to stderr,
//! or to a file when stderr should stay quiet as well. Both read the level
//! from `RUST_LOG` and default to `info`.

use std::fs::{self, File};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Sends logs to [`get_log_path`], truncated on startup.
///
/// If the file can't be opened, logs go to stderr instead so that replies
/// on stdout are never mixed with log lines.
pub fn init_file_logging() {
    let log_path = get_log_path();

    if let Some(parent) = log_path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            eprintln!("Warning: Could not create log directory: {e}");
            init_stderr_logging();
            return;
        }
    }

    let log_file = match File::create(&log_path) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Warning: Could not create log file: {e}");
            init_stderr_logging();
            return;
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(log_file)
        .with_ansi(false)
        .init();
}

/// Sends logs to stderr, next to the replies printed on stdout.
pub fn init_stderr_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .init();
}

/// `chatroute/chatroute.log` under the state directory, then the config
/// directory, then the temp directory.
pub fn get_log_path() -> PathBuf {
    if let Some(state_dir) = dirs::state_dir() {
        return state_dir.join("chatroute").join("chatroute.log");
    }

    if let Some(config_dir) = dirs::config_dir() {
        return config_dir.join("chatroute").join("chatroute.log");
    }

    std::env::temp_dir().join("chatroute.log")
}
