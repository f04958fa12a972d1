//! # Learnboard I18n
//!
//! Locales, Fluent bundles and the embedded Japanese and English message
//! catalogs used for every user-visible chart and report label.

pub mod bundle;
pub mod error;
pub mod locale;
pub mod translator;

pub use bundle::{fluent_args, BundleManager};
pub use error::{I18nError, I18nResult};
pub use fluent_bundle::{FluentArgs, FluentValue};
pub use locale::Locale;
pub use translator::{embedded_catalog, Translator};
