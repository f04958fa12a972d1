//! Locale-aware message lookup over the embedded catalogs

use crate::bundle::{fluent_args, BundleManager};
use crate::error::{I18nError, I18nResult};
use crate::Locale;
use fluent_bundle::{FluentArgs, FluentValue};
use tracing::{info, warn};

const JA_CATALOG: &str = include_str!("../locales/ja/main.ftl");
const EN_CATALOG: &str = include_str!("../locales/en/main.ftl");

/// The Fluent source compiled into the crate for `locale`
pub fn embedded_catalog(locale: Locale) -> &'static str {
    match locale {
        Locale::Japanese => JA_CATALOG,
        Locale::English => EN_CATALOG,
    }
}

/// Translates message ids into user-visible text.
///
/// Lookups try the requested locale, then the default locale, and finally
/// the caller-supplied fallback.
#[derive(Debug)]
pub struct Translator {
    default_locale: Locale,
    bundles: BundleManager,
}

impl Translator {
    /// Create a translator with every supported locale loaded
    pub fn new(default_locale: Locale) -> I18nResult<Self> {
        let mut bundles = BundleManager::new();
        for locale in Locale::all() {
            bundles.add_source(locale, embedded_catalog(locale))?;
        }
        info!("Translator initialized with default locale: {}", default_locale);

        Ok(Self {
            default_locale,
            bundles,
        })
    }

    /// Get the default locale
    pub fn default_locale(&self) -> Locale {
        self.default_locale
    }

    /// Get a localized message
    pub fn message(
        &self,
        locale: Locale,
        key: &str,
        args: Option<&FluentArgs>,
    ) -> I18nResult<String> {
        if self.bundles.has_message(locale, key) {
            return self.bundles.format_message(locale, key, args);
        }

        if locale != self.default_locale && self.bundles.has_message(self.default_locale, key) {
            warn!(
                "Message '{}' not found in locale {}, falling back to {}",
                key, locale, self.default_locale
            );
            return self.bundles.format_message(self.default_locale, key, args);
        }

        Err(I18nError::MessageNotFound {
            key: key.to_string(),
        })
    }

    /// Get a localized message with fallback to a default message
    pub fn message_or_default(
        &self,
        locale: Locale,
        key: &str,
        args: Option<&FluentArgs>,
        default: &str,
    ) -> String {
        self.message(locale, key, args).unwrap_or_else(|e| {
            warn!("Message '{}' unavailable ({}), using default: '{}'", key, e, default);
            default.to_string()
        })
    }

    /// Plain label lookup; falls back to the key itself
    pub fn text(&self, locale: Locale, key: &str) -> String {
        self.message_or_default(locale, key, None, key)
    }

    /// Label lookup with named arguments; falls back to the key itself
    pub fn text_with(&self, locale: Locale, key: &str, args: &[(&str, FluentValue<'_>)]) -> String {
        let args = fluent_args(args);
        self.message_or_default(locale, key, Some(&args), key)
    }

    /// Check if a message exists for the given locale or the default locale
    pub fn has_message(&self, locale: Locale, key: &str) -> bool {
        self.bundles.has_message(locale, key) || self.bundles.has_message(self.default_locale, key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn translator() -> Translator {
        Translator::new(Locale::Japanese).unwrap()
    }

    #[test]
    fn test_japanese_labels() {
        let t = translator();
        assert_eq!(t.text(Locale::Japanese, "status-completed"), "完了");
        assert_eq!(t.text(Locale::Japanese, "content-type-quiz"), "クイズ・テスト");
        assert_eq!(
            t.text_with(Locale::Japanese, "bucket-week", &[("number", FluentValue::from(2))]),
            "第2週"
        );
    }

    #[test]
    fn test_english_labels() {
        let t = translator();
        assert_eq!(t.text(Locale::English, "status-not-started"), "Not started");
        assert_eq!(
            t.text_with(
                Locale::English,
                "duration",
                &[("hours", FluentValue::from(2)), ("minutes", FluentValue::from(30))]
            ),
            "2h 30m"
        );
    }

    #[test]
    fn test_unknown_key_falls_back_to_key() {
        let t = translator();
        assert!(t.message(Locale::English, "no-such-message", None).is_err());
        assert_eq!(t.text(Locale::English, "no-such-message"), "no-such-message");
    }

    #[test]
    fn test_invitation_message_interpolates_company() {
        let t = translator();
        let text = t.text_with(
            Locale::Japanese,
            "invitation-message",
            &[("company", FluentValue::from("Acme")), ("code", FluentValue::from("ACME01"))],
        );
        assert!(text.starts_with("AcmeのDX Seed Platformへの招待"));
        assert!(text.contains("企業コード: ACME01"));
    }
}
