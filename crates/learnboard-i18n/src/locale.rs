//! Locale management and utilities

use crate::error::{I18nError, I18nResult};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use unic_langid::LanguageIdentifier;

/// Supported locales
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum Locale {
    #[default]
    #[serde(rename = "ja-JP", alias = "ja")]
    Japanese,
    #[serde(rename = "en-US", alias = "en")]
    English,
}

impl Locale {
    /// Get the language code for this locale
    pub fn code(&self) -> &'static str {
        match self {
            Self::Japanese => "ja-JP",
            Self::English => "en-US",
        }
    }

    /// Get the short language code for this locale
    pub fn short_code(&self) -> &'static str {
        match self {
            Self::Japanese => "ja",
            Self::English => "en",
        }
    }

    /// Parse a locale from a language code
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "ja" | "ja-JP" => Some(Self::Japanese),
            "en" | "en-US" => Some(Self::English),
            _ => None,
        }
    }

    /// Convert to Fluent LanguageIdentifier
    pub fn to_language_identifier(&self) -> I18nResult<LanguageIdentifier> {
        self.code()
            .parse()
            .map_err(|_| I18nError::InvalidLanguageId(self.code().to_string()))
    }

    /// Get all supported locales
    pub fn all() -> [Self; 2] {
        [Self::Japanese, Self::English]
    }

    /// Get the display name for this locale
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Japanese => "日本語",
            Self::English => "English",
        }
    }

    /// Short numeric date in the locale's conventional order, without zero padding
    pub fn format_date(&self, date: NaiveDate) -> String {
        match self {
            Self::Japanese => date.format("%Y/%-m/%-d").to_string(),
            Self::English => date.format("%-m/%-d/%Y").to_string(),
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Locale {
    type Err = I18nError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_code(s.trim()).ok_or_else(|| I18nError::UnsupportedLocale(s.to_string()))
    }
}
