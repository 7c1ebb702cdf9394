//! Инициализация логов (tracing)

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tracing_subscriber::EnvFilter;

/// Имя файла логов GUI
pub const LOG_FILE: &str = "slanglit.log";

static LOG_GUARD: OnceLock<tracing_appender::non_blocking::WorkerGuard> = OnceLock::new();

fn filter(default: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}

/// Логи GUI: файл `<data_dir>/logs/slanglit.log`, при ошибке - stderr
pub fn init_file_logging(data_dir: &Path) -> Option<PathBuf> {
    let log_dir = data_dir.join("logs");
    let log_path = log_dir.join(LOG_FILE);

    let opened = fs::create_dir_all(&log_dir).and_then(|_| {
        fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)
    });

    match opened {
        Ok(file) => {
            let (non_blocking, guard) = tracing_appender::non_blocking(file);
            let initialized = tracing_subscriber::fmt()
                .with_env_filter(filter("info"))
                .with_target(false)
                .with_ansi(false)
                .with_writer(non_blocking)
                .try_init()
                .is_ok();
            if !initialized {
                return None;
            }
            let _ = LOG_GUARD.set(guard);
            tracing::info!(path = %log_path.display(), "logging initialized");
            Some(log_path)
        }
        Err(e) => {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter("info"))
                .with_target(false)
                .try_init();
            tracing::warn!(error = %e, "failed to open log file; using stderr");
            None
        }
    }
}

/// Логи CLI: stderr, по умолчанию только предупреждения
pub fn init_cli_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter(default))
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
