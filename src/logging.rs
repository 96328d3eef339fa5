//! Structured logging and tracing for the Outlook client
//!
//! This module provides logging initialization with console and optional file
//! output, plus a small component-scoped logger used throughout the crate.

use crate::config::LoggingConfig;
use crate::error::{OutlookError, Result};
use once_cell::sync::OnceCell;
use std::path::Path;
use std::sync::Once;
use tracing::{Level, debug, error, info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::{non_blocking, rolling};
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

// Keep the non-blocking worker guard alive for the entire process lifetime
static LOG_GUARD: OnceCell<WorkerGuard> = OnceCell::new();
static INIT_ONCE: Once = Once::new();
static INIT_ERROR: OnceCell<String> = OnceCell::new();

/// Initialize the logging system based on configuration
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    INIT_ONCE.call_once(|| {
        let init_result = (|| -> Result<()> {
            let level = parse_log_level(&config.level)?;
            let filter = build_env_filter(level);

            if should_use_console_only(config) {
                init_console_only(filter, config.json_format);
                return Ok(());
            }

            init_with_file(config, filter)?;
            Ok(())
        })();

        if let Err(e) = init_result {
            let _ = INIT_ERROR.set(e.to_string());
        }
    });

    if let Some(err) = INIT_ERROR.get() {
        return Err(OutlookError::config(err.clone()));
    }
    Ok(())
}

fn build_env_filter(level: Level) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("jemena_outlook={level},reqwest=warn").into())
}

fn should_use_console_only(config: &LoggingConfig) -> bool {
    cfg!(test) || config.file.is_none()
}

fn init_console_only(filter: EnvFilter, json_format: bool) {
    let console_layer = {
        let layer = fmt::layer()
            .with_writer(std::io::stdout)
            .with_target(false)
            .with_thread_ids(false);
        if json_format {
            layer.json().boxed()
        } else {
            layer.boxed()
        }
    };
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .try_init();
}

fn init_with_file(config: &LoggingConfig, filter: EnvFilter) -> Result<()> {
    let Some(file) = config.file.as_deref() else {
        init_console_only(filter, config.json_format);
        return Ok(());
    };

    let path = Path::new(file);
    let directory = path.parent().unwrap_or_else(|| Path::new("."));
    let filename = path
        .file_name()
        .ok_or_else(|| OutlookError::config(format!("Invalid log file path: {file}")))?;

    let appender = rolling::never(directory, filename);
    let (writer, guard) = non_blocking(appender);
    let _ = LOG_GUARD.set(guard);

    let file_layer = {
        let layer = fmt::layer().with_writer(writer).with_ansi(false);
        if config.json_format {
            layer.json().boxed()
        } else {
            layer.boxed()
        }
    };

    let registry = tracing_subscriber::registry().with(filter).with(file_layer);
    if config.console_output {
        let console_layer = fmt::layer()
            .with_writer(std::io::stdout)
            .with_target(false)
            .boxed();
        let _ = registry.with(console_layer).try_init();
    } else {
        let _ = registry.try_init();
    }
    Ok(())
}

fn parse_log_level(level: &str) -> Result<Level> {
    match level.to_uppercase().as_str() {
        "TRACE" => Ok(Level::TRACE),
        "DEBUG" => Ok(Level::DEBUG),
        "INFO" => Ok(Level::INFO),
        "WARN" | "WARNING" => Ok(Level::WARN),
        "ERROR" | "CRITICAL" => Ok(Level::ERROR),
        other => Err(OutlookError::config(format!("Unknown log level: {other}"))),
    }
}

/// Component-scoped logger carrying a fixed context field
#[derive(Clone)]
pub struct StructuredLogger {
    component: String,
}

impl StructuredLogger {
    /// Create a new structured logger for a component
    pub fn new(component: &str) -> Self {
        Self {
            component: component.to_string(),
        }
    }

    /// Log an info message with context
    pub fn info(&self, message: &str) {
        info!(component = %self.component, "{}", message);
    }

    /// Log a warning message with context
    pub fn warn(&self, message: &str) {
        warn!(component = %self.component, "{}", message);
    }

    /// Log an error message with context
    pub fn error(&self, message: &str) {
        error!(component = %self.component, "{}", message);
    }

    /// Log a debug message with context
    pub fn debug(&self, message: &str) {
        debug!(component = %self.component, "{}", message);
    }
}

/// Create a logger for a component
pub fn get_logger(component: &str) -> StructuredLogger {
    StructuredLogger::new(component)
}
