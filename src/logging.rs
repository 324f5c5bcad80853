//! File-backed diagnostics.
//!
//! The terminal owns stdout/stderr while the UI is up, so tracing output
//! goes to a log file under the data directory instead. Swallowed failures
//! (persistence writes, clipboard access) land here at `warn`.

use std::fs;
use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize tracing to `termhub.log` under the given directory.
///
/// Returns the appender guard; it must be held for the process lifetime or
/// buffered log lines are lost. Returns `None` (and logging is simply off)
/// when the log file cannot be opened.
pub fn init(log_dir: &Path) -> Option<WorkerGuard> {
    let _ = fs::create_dir_all(log_dir);
    let file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_dir.join("termhub.log"))
        .ok()?;

    let (non_blocking, guard) = tracing_appender::non_blocking(file);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_ansi(false).with_writer(non_blocking))
        .init();

    Some(guard)
}
