use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tracing_appender::rolling;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::LoggingConfig;

/// Split a log file path into the directory and file name the daily roller
/// expects. A bare file name lands in `./logs`.
fn log_file_target(file_path: &str) -> (PathBuf, OsString) {
    let path = Path::new(file_path);
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("./logs"));
    let name = path
        .file_name()
        .unwrap_or_else(|| std::ffi::OsStr::new("fetcher.log"));
    (dir.to_path_buf(), name.to_os_string())
}

static GUARD: OnceLock<tracing_appender::non_blocking::WorkerGuard> = OnceLock::new();

pub fn init_logger(cfg: &LoggingConfig) {
    // RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&cfg.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    // Build console Layer
    let console_layer = fmt::layer()
        .with_target(false)
        .with_ansi(true)
        .with_writer(std::io::stdout);

    if cfg.to_file {
        // Build file Layer
        let (dir, name) = log_file_target(&cfg.file_path);
        let appender = rolling::daily(dir, name);
        let (non_blocking, guard) = tracing_appender::non_blocking(appender);
        GUARD.set(guard).ok();

        let file_layer = fmt::layer()
            .with_target(false)
            .with_ansi(false)
            .with_writer(non_blocking);

        tracing_subscriber::registry()
            .with(filter)
            .with(console_layer) // Also output to console
            .with(file_layer) // Also output to file
            .init();
    } else {
        // Only output to console
        tracing_subscriber::registry()
            .with(filter)
            .with(console_layer)
            .init();
    }
}
