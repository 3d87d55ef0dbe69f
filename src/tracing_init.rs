//! Tracing setup for the binary — stderr by default, or an append-mode log file
//! when the digest runs from cron and nobody watches the terminal.

use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

fn filter(verbose: bool) -> EnvFilter {
    let default = if verbose { "debug" } else { "info" };
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}

/// Human-readable logs on stderr; stdout stays free for rendered payloads.
pub fn init_stderr_tracing(verbose: bool) {
    tracing_subscriber::fmt()
        .with_env_filter(filter(verbose))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Append structured logs to `log_path`, falling back to stderr when the file
/// cannot be opened.
pub fn init_file_tracing(log_path: &Path, verbose: bool) {
    if let Some(parent) = log_path.parent() {
        std::fs::create_dir_all(parent).ok();
    }

    match std::fs::OpenOptions::new().create(true).append(true).open(log_path) {
        Ok(log_file) => {
            tracing_subscriber::fmt()
                .with_env_filter(filter(verbose))
                .with_writer(Mutex::new(log_file))
                .with_target(true)
                .with_ansi(false)
                .init();
        }
        Err(e) => {
            init_stderr_tracing(verbose);
            tracing::warn!(path = %log_path.display(), error = %e, "Cannot open log file, logging to stderr");
        }
    }
}
