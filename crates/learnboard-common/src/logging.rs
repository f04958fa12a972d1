//! Structured logging infrastructure for learnboard

use crate::{LearnboardError, Result};
use std::sync::Mutex;
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

/// Configuration for the logging system
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "learnboard_analytics=trace")
    pub level: String,
    /// Whether to emit one JSON object per event
    pub json_format: bool,
    /// Whether to enable pretty formatting with colors
    pub pretty_format: bool,
    /// Optional file path for log output
    pub file_path: Option<String>,
    /// Whether to include span open/close events in the output
    pub include_spans: bool,
    /// Whether to include target module information
    pub include_targets: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json_format: false,
            pretty_format: true,
            file_path: None,
            include_spans: false,
            include_targets: true,
        }
    }
}

fn open_log_file(path: &str) -> Result<Mutex<std::fs::File>> {
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)?;
    Ok(Mutex::new(file))
}

/// Initialize the tracing subscriber with the given configuration
pub fn init_logging(config: LoggingConfig) -> Result<()> {
    let env_filter = EnvFilter::try_new(&config.level)
        .or_else(|_| EnvFilter::try_new("info"))
        .map_err(|e| LearnboardError::config_with_source("Invalid log filter", e))?;

    let span_events = if config.include_spans {
        FmtSpan::NEW | FmtSpan::CLOSE
    } else {
        FmtSpan::NONE
    };

    let registry = tracing_subscriber::registry().with(env_filter);

    let result = if config.json_format {
        let layer = fmt::layer()
            .json()
            .with_span_events(span_events)
            .with_target(config.include_targets);

        match config.file_path {
            Some(path) => registry.with(layer.with_writer(open_log_file(&path)?)).try_init(),
            None => registry.with(layer).try_init(),
        }
    } else if config.pretty_format {
        let layer = fmt::layer()
            .pretty()
            .with_span_events(span_events)
            .with_target(config.include_targets);

        match config.file_path {
            Some(path) => registry
                .with(layer.with_ansi(false).with_writer(open_log_file(&path)?))
                .try_init(),
            None => registry.with(layer).try_init(),
        }
    } else {
        let layer = fmt::layer()
            .compact()
            .with_span_events(span_events)
            .with_target(config.include_targets);

        match config.file_path {
            Some(path) => registry
                .with(layer.with_ansi(false).with_writer(open_log_file(&path)?))
                .try_init(),
            None => registry.with(layer).try_init(),
        }
    };

    result.map_err(|e| LearnboardError::with_source("Failed to install tracing subscriber", e))
}

/// Initialize logging with default configuration
pub fn init_default_logging() -> Result<()> {
    init_logging(LoggingConfig::default())
}

/// Initialize logging for development (pretty, debug level)
pub fn init_dev_logging() -> Result<()> {
    init_logging(LoggingConfig {
        level: "debug".to_string(),
        pretty_format: true,
        json_format: false,
        include_spans: true,
        ..LoggingConfig::default()
    })
}

/// Initialize logging for production (JSON lines, info level, file output)
pub fn init_prod_logging(log_file: impl Into<String>) -> Result<()> {
    init_logging(LoggingConfig {
        level: "info".to_string(),
        json_format: true,
        pretty_format: false,
        file_path: Some(log_file.into()),
        include_spans: false,
        ..LoggingConfig::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = LoggingConfig::default();
        assert_eq!(config.level, "info");
        assert!(!config.json_format);
        assert!(config.pretty_format);
        assert!(config.file_path.is_none());
        assert!(!config.include_spans);
        assert!(config.include_targets);
    }

    #[test]
    fn test_second_init_reports_error() {
        // Whichever call wins, the other must fail cleanly instead of panicking.
        let first = init_logging(LoggingConfig {
            pretty_format: false,
            ..LoggingConfig::default()
        });
        let second = init_default_logging();
        assert!(first.is_err() || second.is_err());
    }
}
