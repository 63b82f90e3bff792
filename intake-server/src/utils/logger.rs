//! Logging Infrastructure
//!
//! `RUST_LOG` wins over the built-in default filter. When a log directory is
//! given, output goes to a daily rolling file there instead of stdout.

use std::path::Path;

use tracing_subscriber::EnvFilter;

pub const DEFAULT_FILTER: &str = "intake_server=info,tower_http=info";

/// Initialize the logger with optional file output
///
/// Returns the appender guard, which must be held for the life of the process
/// so buffered lines are flushed on exit.
pub fn init_logger(log_dir: Option<&str>) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_FILTER.into());
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false);

    if let Some(dir) = log_dir {
        let log_path = Path::new(dir);
        if std::fs::create_dir_all(log_path).is_ok() {
            let file_appender = tracing_appender::rolling::daily(log_path, "intake-server");
            let (writer, guard) = tracing_appender::non_blocking(file_appender);
            subscriber.with_ansi(false).with_writer(writer).init();
            return Some(guard);
        }
        eprintln!("Log directory {dir} is not writable, logging to stdout");
    }

    subscriber.init();
    None
}
