//! # Structured Logging Module
//!
//! Environment-aware structured logging for planning runs. Console output is
//! either human readable or JSON, filtered by an `EnvFilter` directive taken
//! from the configuration, `RUST_LOG`, or the detected environment.

use chrono::Utc;
use std::sync::OnceLock;
use tracing_subscriber::{
    fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer, Registry,
};

use crate::config::{LogFormat, LoggingConfig};

static LOGGER_INITIALIZED: OnceLock<()> = OnceLock::new();

/// Initialize structured logging once per process; later calls are no-ops.
pub fn init_structured_logging(config: &LoggingConfig) {
    LOGGER_INITIALIZED.get_or_init(|| {
        let environment = get_environment();
        let directive = resolve_directive(config, &environment);

        let layer: Box<dyn Layer<Registry> + Send + Sync> = match config.format {
            LogFormat::Pretty => fmt::layer()
                .with_target(true)
                .with_thread_ids(true)
                .with_level(true)
                .with_ansi(true)
                .with_filter(EnvFilter::new(&directive))
                .boxed(),
            LogFormat::Json => fmt::layer()
                .with_target(true)
                .with_thread_ids(true)
                .with_level(true)
                .with_ansi(false)
                .json()
                .with_filter(EnvFilter::new(&directive))
                .boxed(),
        };

        // A host application may already own the global subscriber
        if tracing_subscriber::registry().with(layer).try_init().is_err() {
            tracing::debug!("Global tracing subscriber already initialized, keeping it");
        }

        tracing::info!(
            environment = %environment,
            directive = %directive,
            format = ?config.format,
            "Structured logging initialized"
        );
    });
}

/// Explicit level from the configuration, then `RUST_LOG`, then the environment default
fn resolve_directive(config: &LoggingConfig, environment: &str) -> String {
    config
        .level
        .clone()
        .or_else(|| std::env::var("RUST_LOG").ok())
        .unwrap_or_else(|| get_log_level(environment).to_string())
}

/// Get current environment from environment variables
fn get_environment() -> String {
    std::env::var("TASK_ASSIGNING_ENV")
        .or_else(|_| std::env::var("APP_ENV"))
        .unwrap_or_else(|_| "development".to_string())
}

/// Get log level based on environment
fn get_log_level(environment: &str) -> &'static str {
    match environment {
        "production" => "info",
        _ => "debug",
    }
}

/// Log structured data for a problem fact change
pub fn log_change_operation(change: &str, status: &str, details: Option<&str>) {
    tracing::info!(
        change = %change,
        status = %status,
        details = details,
        timestamp = %Utc::now().to_rfc3339(),
        "PROBLEM_FACT_CHANGE"
    );
}
