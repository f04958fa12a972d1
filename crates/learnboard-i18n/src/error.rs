//! Error types for internationalization operations

use learnboard_common::LearnboardError;
use thiserror::Error;

/// Errors that can occur during internationalization operations
#[derive(Error, Debug)]
pub enum I18nError {
    /// Failed to parse a language identifier
    #[error("Invalid language identifier: {0}")]
    InvalidLanguageId(String),

    /// Locale code that is not one of the supported locales
    #[error("Unsupported locale: {0}")]
    UnsupportedLocale(String),

    /// Failed to parse a Fluent resource
    #[error("Failed to parse Fluent resource for {locale}: {errors:?}")]
    FluentParseError { locale: String, errors: Vec<String> },

    /// Message not found in any bundle
    #[error("Message not found: {key}")]
    MessageNotFound { key: String },

    /// Failed to format a message
    #[error("Failed to format message '{key}': {errors:?}")]
    MessageFormatError { key: String, errors: Vec<String> },

    /// Bundle creation failed
    #[error("Failed to create bundle for locale {locale}: {message}")]
    BundleCreationError { locale: String, message: String },
}

/// Result type for i18n operations
pub type I18nResult<T> = Result<T, I18nError>;

impl From<I18nError> for LearnboardError {
    fn from(err: I18nError) -> Self {
        match &err {
            I18nError::FluentParseError { locale, .. }
            | I18nError::BundleCreationError { locale, .. } => {
                LearnboardError::localization_with_locale(err.to_string(), locale.clone())
            }
            _ => LearnboardError::localization(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversion_keeps_locale() {
        let err = I18nError::FluentParseError {
            locale: "ja-JP".to_string(),
            errors: vec!["expected token".to_string()],
        };
        match LearnboardError::from(err) {
            LearnboardError::Localization { locale, message } => {
                assert_eq!(locale.as_deref(), Some("ja-JP"));
                assert!(message.contains("expected token"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_missing_message_display() {
        let err = I18nError::MessageNotFound {
            key: "status-completed".to_string(),
        };
        assert_eq!(err.to_string(), "Message not found: status-completed");
    }
}
