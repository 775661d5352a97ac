//! Logging setup: console plus rolling files, JSON in production.

pub mod middleware;

use std::io;

use tracing_appender::{non_blocking, non_blocking::WorkerGuard, rolling};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Initializes the subscriber and returns the writer guards.
///
/// The guards must live as long as the program; dropping them shuts down the
/// background writer threads and loses buffered lines.
pub fn init() -> Vec<WorkerGuard> {
    let environment = std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string());
    let is_production = environment == "production";

    std::fs::create_dir_all("logs").ok();

    let (file_writer, file_guard) = non_blocking(rolling::daily("logs", "app.log"));
    let (error_writer, error_guard) = non_blocking(rolling::daily("logs", "error.log"));
    let (console_writer, console_guard) = non_blocking(io::stdout());

    let log_level = std::env::var("LOG_LEVEL")
        .unwrap_or_else(|_| if is_production { "info" } else { "debug" }.to_string());

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "folio_backend={log_level},tower_http=debug,axum=debug"
        ))
    });

    let registry = tracing_subscriber::registry().with(env_filter);

    if is_production {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_writer(file_writer)
                    .with_target(true)
                    .with_file(true)
                    .with_line_number(true),
            )
            .with(
                fmt::layer()
                    .json()
                    .with_writer(error_writer)
                    .with_target(true)
                    .with_filter(tracing_subscriber::filter::LevelFilter::ERROR),
            )
            .with(fmt::layer().json().with_writer(console_writer).with_target(false))
            .init();
    } else {
        registry
            .with(
                fmt::layer()
                    .with_writer(file_writer)
                    .with_target(true)
                    .with_file(true)
                    .with_line_number(true)
                    .with_ansi(false),
            )
            .with(fmt::layer().with_writer(console_writer).with_target(true).pretty())
            .init();
    }

    tracing::info!("Logging initialized for {} environment", environment);

    vec![file_guard, error_guard, console_guard]
}
