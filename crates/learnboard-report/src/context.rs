//! Shared inputs of every report builder

use learnboard_analytics::TimeContext;
use learnboard_common::StudyTime;
use learnboard_config::ReportLayout;
use learnboard_i18n::{FluentValue, Locale, Translator};

/// Translator, locale, geometry and clock a report is built with
#[derive(Debug, Clone, Copy)]
pub struct ReportContext<'a> {
    pub translator: &'a Translator,
    pub locale: Locale,
    pub layout: &'a ReportLayout,
    pub time: &'a TimeContext,
}

impl<'a> ReportContext<'a> {
    pub fn new(
        translator: &'a Translator,
        locale: Locale,
        layout: &'a ReportLayout,
        time: &'a TimeContext,
    ) -> Self {
        Self {
            translator,
            locale,
            layout,
            time,
        }
    }

    pub fn text(&self, key: &str) -> String {
        self.translator.text(self.locale, key)
    }

    pub fn text_with(&self, key: &str, args: &[(&str, FluentValue<'_>)]) -> String {
        self.translator.text_with(self.locale, key, args)
    }

    /// `H時間M分`-style duration, seconds truncated
    pub fn duration(&self, seconds: u64) -> String {
        let time = StudyTime::from_seconds(seconds);
        self.text_with(
            "duration",
            &[
                ("hours", FluentValue::from(time.hours.to_string())),
                ("minutes", FluentValue::from(time.minutes.to_string())),
            ],
        )
    }

    /// Today's local date in the locale's short format
    pub fn report_date(&self) -> String {
        self.locale.format_date(self.time.today())
    }
}
