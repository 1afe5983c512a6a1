//! Log setup. The TUI owns the terminal, so events go to a file in the
//! data directory instead of stderr.

use std::fs::{File, OpenOptions};
use std::path::Path;
use std::sync::Arc;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

const LOG_DIRECTIVE: &str = "tabdeck=info";

/// Install the global subscriber writing to `log_path`. Logging is skipped
/// when the file cannot be opened.
pub fn init_logging(log_path: &Path) {
    let file = match OpenOptions::new().create(true).append(true).open(log_path) {
        Ok(file) => file,
        Err(e) => {
            eprintln!("tabdeck: cannot open log file {}: {}", log_path.display(), e);
            return;
        }
    };
    if build_subscriber(file).try_init().is_err() {
        eprintln!("tabdeck: a logger is already installed");
    }
}

/// Fixed `tabdeck=info` filter; the environment is not consulted.
pub fn build_subscriber(log_file: File) -> impl tracing::Subscriber + Send + Sync {
    let env_filter = EnvFilter::new(LOG_DIRECTIVE);

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(Arc::new(log_file))
                .with_ansi(false)
                .with_target(false),
        )
        .with(env_filter)
}
