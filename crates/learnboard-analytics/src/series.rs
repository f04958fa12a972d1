//! Chart series construction.
//!
//! Turns aggregates into `{labels, series}` pairs any charting surface can
//! bind to. Every series always has exactly one value per label; empty input
//! produces zeros, never missing arrays.

use crate::aggregator::{AggregateResult, ContentTypeTally, DayPeriod, OverallTally};
use crate::bucketing::{TimeContext, TimeRange};
use crate::calendar::CalendarMonth;
use chrono::{Datelike, Weekday};
use learnboard_common::{ContentType, ProgressStatus};
use learnboard_i18n::{FluentValue, Locale, Translator};
use serde::{Deserialize, Serialize};
use std::iter;

/// One named sequence of values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedSeries {
    pub name: String,
    pub values: Vec<f64>,
}

/// Labels plus parallel series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub series: Vec<NamedSeries>,
}

impl ChartData {
    /// Whether every series has one value per label
    pub fn is_consistent(&self) -> bool {
        self.series.iter().all(|s| s.values.len() == self.labels.len())
    }

    fn push(&mut self, name: String, values: impl IntoIterator<Item = f64>) {
        let values = values
            .into_iter()
            .chain(iter::repeat(0.0))
            .take(self.labels.len())
            .collect();
        self.series.push(NamedSeries { name, values });
    }
}

fn weekday_key(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Sun => "weekday-sun",
        Weekday::Mon => "weekday-mon",
        Weekday::Tue => "weekday-tue",
        Weekday::Wed => "weekday-wed",
        Weekday::Thu => "weekday-thu",
        Weekday::Fri => "weekday-fri",
        Weekday::Sat => "weekday-sat",
    }
}

const SUNDAY_FIRST: [Weekday; 7] = [
    Weekday::Sun,
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
];

/// Builds localized chart data
pub struct SeriesBuilder<'a> {
    translator: &'a Translator,
    locale: Locale,
    ctx: TimeContext,
}

impl<'a> SeriesBuilder<'a> {
    pub fn new(translator: &'a Translator, locale: Locale, ctx: TimeContext) -> Self {
        Self {
            translator,
            locale,
            ctx,
        }
    }

    fn text(&self, key: &str) -> String {
        self.translator.text(self.locale, key)
    }

    pub fn status_label(&self, status: ProgressStatus) -> String {
        self.text(match status {
            ProgressStatus::Completed => "status-completed",
            ProgressStatus::InProgress => "status-in-progress",
            ProgressStatus::NotStarted => "status-not-started",
        })
    }

    pub fn content_type_label(&self, content_type: ContentType) -> String {
        self.text(&format!("content-type-{}", content_type.key()))
    }

    pub fn period_label(&self, period: DayPeriod) -> String {
        self.text(period.label_key())
    }

    /// Labels for the buckets of `range`, oldest first
    pub fn bucket_labels(&self, range: TimeRange) -> Vec<String> {
        match range {
            TimeRange::Week => self
                .ctx
                .bucket_dates(range)
                .into_iter()
                .map(|date| self.text(weekday_key(date.weekday())))
                .collect(),
            TimeRange::Month => (1..=range.bucket_count())
                .map(|number| {
                    self.translator.text_with(
                        self.locale,
                        "bucket-week",
                        &[("number", FluentValue::from(number))],
                    )
                })
                .collect(),
            TimeRange::Year => self
                .ctx
                .bucket_dates(range)
                .into_iter()
                .map(|date| self.text(&format!("month-{}", date.month())))
                .collect(),
        }
    }

    /// Completed and in-progress courses per bucket
    pub fn progress(&self, aggregate: &AggregateResult) -> ChartData {
        let mut chart = ChartData {
            labels: self.bucket_labels(aggregate.range),
            series: Vec::new(),
        };
        chart.push(
            self.text("series-completed-courses"),
            aggregate.buckets.iter().map(|b| b.completed as f64),
        );
        chart.push(
            self.text("series-in-progress-courses"),
            aggregate.buckets.iter().map(|b| b.in_progress as f64),
        );
        chart
    }

    /// Progress chart for no data: full labels, zero values
    pub fn empty_progress(&self, range: TimeRange) -> ChartData {
        self.progress(&AggregateResult::empty(range))
    }

    /// Completed / in-progress / not-started split of the catalog
    pub fn completion_overview(&self, overall: &OverallTally) -> ChartData {
        let mut chart = ChartData {
            labels: vec![
                self.status_label(ProgressStatus::Completed),
                self.status_label(ProgressStatus::InProgress),
                self.status_label(ProgressStatus::NotStarted),
            ],
            series: Vec::new(),
        };
        chart.push(
            self.text("series-course-count"),
            [
                overall.completed_count as f64,
                overall.in_progress_count as f64,
                overall.not_started_count as f64,
            ],
        );
        chart
    }

    /// Status split per content type; every known type with zeros when
    /// the catalog is empty
    pub fn content_types(&self, tallies: &[ContentTypeTally]) -> ChartData {
        let placeholder: Vec<ContentTypeTally>;
        let tallies = if tallies.is_empty() {
            placeholder = ContentType::ALL
                .iter()
                .map(|content_type| ContentTypeTally {
                    content_type: *content_type,
                    total: 0,
                    completed: 0,
                    in_progress: 0,
                    not_started: 0,
                })
                .collect();
            &placeholder
        } else {
            tallies
        };

        let mut chart = ChartData {
            labels: tallies
                .iter()
                .map(|t| self.content_type_label(t.content_type))
                .collect(),
            series: Vec::new(),
        };
        chart.push(
            self.status_label(ProgressStatus::Completed),
            tallies.iter().map(|t| t.completed as f64),
        );
        chart.push(
            self.status_label(ProgressStatus::InProgress),
            tallies.iter().map(|t| t.in_progress as f64),
        );
        chart.push(
            self.status_label(ProgressStatus::NotStarted),
            tallies.iter().map(|t| t.not_started as f64),
        );
        chart
    }

    fn hour_labels() -> Vec<String> {
        (0..24).map(|hour| format!("{hour}:00")).collect()
    }

    /// Smoothed learning hours per hour of day
    pub fn hourly_distribution(&self, hourly: &[f64; 24]) -> ChartData {
        let mut chart = ChartData {
            labels: Self::hour_labels(),
            series: Vec::new(),
        };
        chart.push(self.text("series-learning-hours"), hourly.iter().copied());
        chart
    }

    /// Learning-log events per hour of one day
    pub fn hourly_activity(&self, counts: &[u32; 24]) -> ChartData {
        let mut chart = ChartData {
            labels: Self::hour_labels(),
            series: Vec::new(),
        };
        chart.push(
            self.text("series-activity-count"),
            counts.iter().map(|c| f64::from(*c)),
        );
        chart
    }

    /// Summed activity level per weekday, Sunday first
    pub fn weekday_activity(&self, calendar: &CalendarMonth) -> ChartData {
        let mut chart = ChartData {
            labels: SUNDAY_FIRST
                .iter()
                .map(|weekday| self.text(weekday_key(*weekday)))
                .collect(),
            series: Vec::new(),
        };
        chart.push(
            self.text("series-activity-level"),
            calendar.weekday_levels.iter().map(|l| f64::from(*l)),
        );
        chart
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use learnboard_common::test_utils::mock_timestamp;

    fn translator() -> Translator {
        Translator::new(Locale::Japanese).unwrap()
    }

    // Saturday
    fn ctx() -> TimeContext {
        TimeContext::utc(mock_timestamp(2024, 6, 15, 12, 0, 0))
    }

    #[test]
    fn test_week_labels_end_today() {
        let t = translator();
        let builder = SeriesBuilder::new(&t, Locale::Japanese, ctx());
        assert_eq!(
            builder.bucket_labels(TimeRange::Week),
            vec!["日", "月", "火", "水", "木", "金", "土"]
        );

        let english = SeriesBuilder::new(&t, Locale::English, ctx());
        assert_eq!(english.bucket_labels(TimeRange::Week)[6], "Sat");
    }

    #[test]
    fn test_month_and_year_labels() {
        let t = translator();
        let builder = SeriesBuilder::new(&t, Locale::Japanese, ctx());
        assert_eq!(
            builder.bucket_labels(TimeRange::Month),
            vec!["第1週", "第2週", "第3週", "第4週"]
        );

        let year = builder.bucket_labels(TimeRange::Year);
        assert_eq!(year.len(), 12);
        assert_eq!(year[0], "7月");
        assert_eq!(year[11], "6月");
    }

    #[test]
    fn test_empty_progress_is_zero_filled() {
        let t = translator();
        let builder = SeriesBuilder::new(&t, Locale::Japanese, ctx());
        for range in TimeRange::ALL {
            let chart = builder.empty_progress(range);
            assert_eq!(chart.labels.len(), range.bucket_count());
            assert_eq!(chart.series.len(), 2);
            assert!(chart.is_consistent());
            assert!(chart.series.iter().all(|s| s.values.iter().all(|v| *v == 0.0)));
        }
        assert_eq!(builder.empty_progress(TimeRange::Week).series[0].name, "完了コース");
    }

    #[test]
    fn test_content_types_empty_catalog() {
        let t = translator();
        let builder = SeriesBuilder::new(&t, Locale::Japanese, ctx());
        let chart = builder.content_types(&[]);
        assert_eq!(
            chart.labels,
            vec!["動画コンテンツ", "テキストコンテンツ", "クイズ・テスト", "インタラクティブ", "その他"]
        );
        let names: Vec<&str> = chart.series.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["完了", "学習中", "未開始"]);
        assert!(chart.is_consistent());
    }

    #[test]
    fn test_completion_overview() {
        let t = translator();
        let builder = SeriesBuilder::new(&t, Locale::English, ctx());
        let chart = builder.completion_overview(&OverallTally {
            completed_count: 3,
            in_progress_count: 2,
            not_started_count: 5,
        });
        assert_eq!(chart.labels, vec!["Completed", "In progress", "Not started"]);
        assert_eq!(chart.series[0].values, vec![3.0, 2.0, 5.0]);
    }

    #[test]
    fn test_hourly_labels() {
        let t = translator();
        let builder = SeriesBuilder::new(&t, Locale::Japanese, ctx());
        let chart = builder.hourly_distribution(&[0.0; 24]);
        assert_eq!(chart.labels.len(), 24);
        assert_eq!(chart.labels[0], "0:00");
        assert_eq!(chart.labels[23], "23:00");
        assert_eq!(chart.series[0].values, vec![0.0; 24]);

        let mut counts = [0u32; 24];
        counts[9] = 4;
        assert_eq!(builder.hourly_activity(&counts).series[0].values[9], 4.0);
    }
}
