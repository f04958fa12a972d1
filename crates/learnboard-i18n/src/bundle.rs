//! FluentBundle management and message formatting

use crate::error::{I18nError, I18nResult};
use crate::Locale;
use fluent_bundle::concurrent::FluentBundle;
use fluent_bundle::{FluentArgs, FluentResource, FluentValue};
use std::collections::HashMap;
use tracing::{debug, error, warn};

type Bundle = FluentBundle<FluentResource>;

/// Manages FluentBundle instances for different locales.
///
/// Bundles use the concurrent memoizer so the manager is `Send + Sync` and can
/// be shared behind an `Arc` once loaded.
pub struct BundleManager {
    bundles: HashMap<Locale, Bundle>,
}

impl std::fmt::Debug for BundleManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BundleManager")
            .field("locales", &self.bundles.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl BundleManager {
    /// Create a new BundleManager
    pub fn new() -> Self {
        Self {
            bundles: HashMap::new(),
        }
    }

    /// Parse `source` and add it to the locale's bundle
    pub fn add_source(&mut self, locale: Locale, source: &str) -> I18nResult<()> {
        let resource = FluentResource::try_new(source.to_string()).map_err(|(_, errors)| {
            let errors: Vec<String> = errors.iter().map(|e| format!("{e:?}")).collect();
            error!("Failed to parse Fluent resource for {}: {:?}", locale, errors);
            I18nError::FluentParseError {
                locale: locale.code().to_string(),
                errors,
            }
        })?;

        let lang_id = locale.to_language_identifier()?;
        let bundle = self.bundles.entry(locale).or_insert_with(|| {
            let mut bundle = FluentBundle::new_concurrent(vec![lang_id]);
            bundle.set_use_isolating(false);
            bundle
        });

        bundle
            .add_resource(resource)
            .map_err(|errors| I18nError::BundleCreationError {
                locale: locale.code().to_string(),
                message: errors
                    .iter()
                    .map(|e| format!("{e:?}"))
                    .collect::<Vec<_>>()
                    .join(", "),
            })?;

        debug!("Added resource to bundle for locale: {}", locale);
        Ok(())
    }

    /// Format a message with the given arguments
    pub fn format_message(
        &self,
        locale: Locale,
        message_id: &str,
        args: Option<&FluentArgs>,
    ) -> I18nResult<String> {
        let not_found = || I18nError::MessageNotFound {
            key: message_id.to_string(),
        };

        let bundle = self.bundles.get(&locale).ok_or_else(not_found)?;
        let pattern = bundle
            .get_message(message_id)
            .and_then(|message| message.value())
            .ok_or_else(not_found)?;

        let mut errors = Vec::new();
        let formatted = bundle.format_pattern(pattern, args, &mut errors);

        if !errors.is_empty() {
            let errors: Vec<String> = errors.iter().map(|e| format!("{e:?}")).collect();
            warn!("Formatting errors for message '{}': {:?}", message_id, errors);
            return Err(I18nError::MessageFormatError {
                key: message_id.to_string(),
                errors,
            });
        }

        Ok(formatted.into_owned())
    }

    /// Check if a message exists in the bundle
    pub fn has_message(&self, locale: Locale, message_id: &str) -> bool {
        self.bundles
            .get(&locale)
            .is_some_and(|bundle| bundle.has_message(message_id))
    }

    /// Get all loaded locales
    pub fn available_locales(&self) -> Vec<Locale> {
        self.bundles.keys().copied().collect()
    }
}

impl Default for BundleManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Helper function to create FluentArgs from key-value pairs
pub fn fluent_args<'a>(args: &[(&'a str, FluentValue<'a>)]) -> FluentArgs<'a> {
    let mut fluent_args = FluentArgs::new();
    for (key, value) in args {
        fluent_args.set(*key, value.clone());
    }
    fluent_args
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_and_format() {
        let mut manager = BundleManager::new();
        manager
            .add_source(Locale::English, "greeting = Hello, { $name }!")
            .unwrap();

        let args = fluent_args(&[("name", FluentValue::from("Taro"))]);
        let text = manager
            .format_message(Locale::English, "greeting", Some(&args))
            .unwrap();
        assert_eq!(text, "Hello, Taro!");
        assert!(manager.has_message(Locale::English, "greeting"));
        assert!(!manager.has_message(Locale::Japanese, "greeting"));
    }

    #[test]
    fn test_invalid_source_is_rejected() {
        let mut manager = BundleManager::new();
        let result = manager.add_source(Locale::Japanese, "broken = { $unclosed");
        assert!(matches!(result, Err(I18nError::FluentParseError { .. })));
    }

    #[test]
    fn test_missing_argument_reports_format_error() {
        let mut manager = BundleManager::new();
        manager
            .add_source(Locale::English, "count = { $count } items")
            .unwrap();
        let result = manager.format_message(Locale::English, "count", None);
        assert!(matches!(result, Err(I18nError::MessageFormatError { .. })));
    }
}
