use std::fs;
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initializes console logging, plus JSON file output when a log directory is given.
///
/// `RUST_LOG` overrides the default `minutes_converter=info` directive. Keep the
/// returned guard alive until exit so the file writer is flushed.
pub fn init_logging(log_dir: Option<&Path>) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("minutes_converter=info"));

    // Console output goes to stderr so stdout stays the progress listing
    let console_layer = fmt::layer().with_writer(std::io::stderr);

    let mut guard = None;
    let file_layer = log_dir.and_then(|dir| {
        if let Err(e) = fs::create_dir_all(dir) {
            eprintln!("Could not create log directory {}: {}", dir.display(), e);
            return None;
        }
        let file_appender = tracing_appender::rolling::daily(dir, "minutes_converter.log");
        let (non_blocking_writer, worker_guard) = tracing_appender::non_blocking(file_appender);
        guard = Some(worker_guard);
        Some(fmt::layer().json().with_writer(non_blocking_writer))
    });

    if let Err(e) = tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(console_layer)
        .try_init()
    {
        eprintln!("Could not install the log subscriber: {}", e);
    }

    guard
}
