use std::fs;
use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Installs the global subscriber: a daily-rolling file layer, plus a console
/// layer when `log_to_stdout` is set. `LOG_LEVEL` in the environment wins over `log_level`.
///
/// Keep the returned guard alive for the life of the process, otherwise
/// buffered file output is dropped.
pub fn init_logging(log_file: &str, log_level: &str, log_to_stdout: bool) -> WorkerGuard {
    let path = Path::new(log_file);
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("logs"));
    let file_name = path
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("calculator.log");

    fs::create_dir_all(dir).ok();

    let file_appender = rolling::daily(dir, file_name);
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = fmt::layer()
        .with_writer(file_writer)
        .with_ansi(false)
        .with_target(true);

    let env_filter =
        EnvFilter::try_from_env("LOG_LEVEL").unwrap_or_else(|_| EnvFilter::new(log_level));

    let registry = tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer);

    if log_to_stdout {
        // stdout carries the JSON report, so console logs go to stderr.
        let stdout_layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_ansi(true)
            .with_target(true);
        registry.with(stdout_layer).try_init().ok();
    } else {
        registry.try_init().ok();
    }

    guard
}
