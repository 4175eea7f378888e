//! Logging configuration and initialization for fsbrowse.

use std::fs::{self, File};
use std::path::Path;
use std::sync::Arc;

use tracing::Level;
use tracing_subscriber::fmt::writer::MakeWriterExt;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;
use crate::Result;

/// Parse log level string to tracing Level.
fn parse_level(level: &str) -> Level {
    match level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" | "warning" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}

/// Default directives for a configured level.
///
/// The crate logs at `level`. Request spans from `tower_http` and axum
/// extractor rejections only show up at debug and below.
fn default_directives(level: Level) -> String {
    let crate_name = env!("CARGO_CRATE_NAME");
    if level >= Level::DEBUG {
        format!("{crate_name}={level},tower_http={level},axum::rejection=trace")
    } else {
        format!("{crate_name}={level},tower_http=warn,warn")
    }
    .to_lowercase()
}

/// `RUST_LOG` when set, otherwise [`default_directives`].
fn build_filter(level: &str) -> EnvFilter {
    let level = parse_level(level);
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directives(level)))
}

/// Initialize the logging system with the given configuration.
///
/// Log lines go to stdout and to `config.file`. `RUST_LOG` overrides the
/// configured level.
pub fn init(config: &LoggingConfig) -> Result<()> {
    let filter = build_filter(&config.level);

    if let Some(parent) = Path::new(&config.file).parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }

    let log_file = Arc::new(File::create(&config.file)?);
    let writer = std::io::stdout.and(log_file);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(false),
        )
        .with(filter)
        .init();

    Ok(())
}

/// Initialize console-only logging (for development or when the log file
/// cannot be opened).
pub fn init_console_only(level: &str) {
    let filter = build_filter(level);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stdout)
                .with_ansi(true)
                .with_target(true),
        )
        .with(filter)
        .init();
}
