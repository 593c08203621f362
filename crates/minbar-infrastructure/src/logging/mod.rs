//! Logging setup.
//!
//! One subscriber for the whole process: a human-readable stdout layer and
//! a one-line-JSON daily-rolling file layer. The `log` crate macros used
//! inside the HTTP client are bridged into `tracing` so everything lands
//! in the same place.

use std::path::PathBuf;
use std::sync::OnceLock;

use log::LevelFilter;
use tracing_appender::{non_blocking::WorkerGuard, rolling};
use tracing_log::LogTracer;
use tracing_subscriber::{fmt, layer::SubscriberExt, EnvFilter, Layer, Registry};

static LOGGER_READY: OnceLock<()> = OnceLock::new();
static FILE_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

/// Initialize the global subscriber. Safe to call more than once; only the
/// first call wins.
///
/// `MINBAR_LOG` overrides the filter (`info` by default). Passing `None`
/// for `log_dir` skips the file layer, which is what the tests and
/// one-shot CLI runs want.
pub fn init_logger(log_dir: Option<PathBuf>) -> anyhow::Result<()> {
    if LOGGER_READY.get().is_some() {
        return Ok(());
    }

    // Forward log-crate records into tracing
    let _ = LogTracer::builder()
        .with_max_level(LevelFilter::Trace)
        .init();

    let file_layer = match log_dir {
        Some(dir) => {
            std::fs::create_dir_all(&dir)?;
            let file_appender = rolling::daily(&dir, "minbar.log");
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            let _ = FILE_GUARD.set(guard);

            Some(
                fmt::layer()
                    .with_writer(non_blocking)
                    .json()
                    .with_current_span(false)
                    .with_span_list(false)
                    .with_file(true)
                    .with_line_number(true)
                    .with_target(true)
                    .with_filter(env_filter()),
            )
        }
        None => None,
    };

    let stdout_layer = fmt::layer()
        .with_target(true)
        .with_ansi(true)
        .with_filter(env_filter());

    let subscriber = Registry::default().with(file_layer).with(stdout_layer);

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("Failed to set global subscriber: {}", e))?;

    let _ = LOGGER_READY.set(());

    tracing::info!(
        target: "minbar::logging",
        version = env!("CARGO_PKG_VERSION"),
        "Logger initialized"
    );

    Ok(())
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env("MINBAR_LOG").unwrap_or_else(|_| EnvFilter::new("info"))
}
