//! Error types and utilities for learnboard

use thiserror::Error;

/// Result type alias for learnboard operations
pub type Result<T> = std::result::Result<T, LearnboardError>;

/// Main error type for learnboard operations
#[derive(Error, Debug)]
pub enum LearnboardError {
    /// Configuration related errors
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// I/O related errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Internationalization and localization errors
    #[error("Localization error: {message}")]
    Localization {
        message: String,
        locale: Option<String>,
    },

    /// Validation errors for user input or data
    #[error("Validation error: {message}")]
    Validation {
        message: String,
        field: Option<String>,
    },

    /// A time range selector the caller should never have produced
    #[error("Invalid time range: {0} (expected week, month or year)")]
    InvalidTimeRange(String),

    /// The data-access collaborator could not provide a snapshot
    #[error("Data source error: {message}")]
    DataSource {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Document rendering or export failed
    #[error("Export error: {message}")]
    Export {
        message: String,
        /// Whether retrying the same export may succeed
        retryable: bool,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Generic error with custom message
    #[error("{message}")]
    Generic {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl LearnboardError {
    /// Create a new generic error with a custom message
    pub fn new(msg: impl Into<String>) -> Self {
        Self::Generic {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new generic error with a custom message and source
    pub fn with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Generic {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new configuration error with source
    pub fn config_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Config {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new localization error
    pub fn localization(msg: impl Into<String>) -> Self {
        Self::Localization {
            message: msg.into(),
            locale: None,
        }
    }

    /// Create a new localization error with locale
    pub fn localization_with_locale(msg: impl Into<String>, locale: impl Into<String>) -> Self {
        Self::Localization {
            message: msg.into(),
            locale: Some(locale.into()),
        }
    }

    /// Create a new validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
            field: None,
        }
    }

    /// Create a new validation error with field name
    pub fn validation_field(msg: impl Into<String>, field: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
            field: Some(field.into()),
        }
    }

    /// Create a new data source error with source
    pub fn data_source_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::DataSource {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new data source error
    pub fn data_source(msg: impl Into<String>) -> Self {
        Self::DataSource {
            message: msg.into(),
            source: None,
        }
    }

    /// Create an export error the caller may retry
    pub fn export_retryable(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Export {
            message: msg.into(),
            retryable: true,
            source: Some(Box::new(source)),
        }
    }

    /// Whether the operation that produced this error may succeed on retry
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Export { retryable, .. } => *retryable,
            Self::Io(_) | Self::DataSource { .. } => true,
            _ => false,
        }
    }
}
