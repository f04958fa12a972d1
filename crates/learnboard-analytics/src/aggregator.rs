//! Progress aggregation pipeline.
//!
//! Reduces progress records into per-bucket, per-content-type and overall
//! tallies plus the time-of-day distribution. Every call is a pure function of
//! its inputs; nothing is cached between calls.

use crate::bucketing::{TimeContext, TimeRange};
use chrono::NaiveDate;
use learnboard_common::{
    ContentItem, ContentType, Employee, EntityId, LearningLog, ProgressRecord,
};
use learnboard_config::AnalyticsConfig;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, instrument, warn};

/// Completed and in-progress counts of one time bucket
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BucketTally {
    pub completed: u64,
    pub in_progress: u64,
}

/// Status counts of one content type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentTypeTally {
    pub content_type: ContentType,
    /// Catalog items of this type
    pub total: u64,
    pub completed: u64,
    pub in_progress: u64,
    /// `total - completed - in_progress`, clamped at zero
    pub not_started: u64,
}

/// Status counts across the whole catalog
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverallTally {
    pub completed_count: u64,
    pub in_progress_count: u64,
    pub not_started_count: u64,
}

/// Upstream data problems noticed while aggregating
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DataQualityWarning {
    /// A progress record refers to content missing from the catalog
    MissingContent {
        user_id: EntityId,
        content_id: EntityId,
    },
    /// More started records than catalog items; `not_started` was clamped to 0.
    /// `content_type` is `None` for the overall tally.
    NegativeCount {
        content_type: Option<ContentType>,
        total: u64,
        completed: u64,
        in_progress: u64,
    },
}

/// Everything the dashboard charts need for one time range
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateResult {
    pub range: TimeRange,
    /// One entry per bucket, oldest first
    pub buckets: Vec<BucketTally>,
    /// In first-appearance order of the content catalog
    pub by_content_type: Vec<ContentTypeTally>,
    pub overall: OverallTally,
    /// Smoothed learning hours per local hour of day
    pub hourly_hours: [f64; 24],
    pub warnings: Vec<DataQualityWarning>,
}

impl AggregateResult {
    /// The result for no records and no contents
    pub fn empty(range: TimeRange) -> Self {
        Self {
            range,
            buckets: vec![BucketTally::default(); range.bucket_count()],
            by_content_type: Vec::new(),
            overall: OverallTally::default(),
            hourly_hours: [0.0; 24],
            warnings: Vec::new(),
        }
    }
}

/// Derives `total - completed - in_progress`, clamping at zero
fn not_started(total: u64, completed: u64, in_progress: u64) -> Option<u64> {
    total.checked_sub(completed + in_progress)
}

/// Aggregates progress records relative to a fixed clock
#[derive(Debug, Clone)]
pub struct ProgressAggregator {
    ctx: TimeContext,
    config: AnalyticsConfig,
}

impl ProgressAggregator {
    pub fn new(ctx: TimeContext, config: &AnalyticsConfig) -> Self {
        Self {
            ctx,
            config: config.clone(),
        }
    }

    pub fn context(&self) -> &TimeContext {
        &self.ctx
    }

    pub fn config(&self) -> &AnalyticsConfig {
        &self.config
    }

    /// Run every reduction over `records`
    #[instrument(skip(self, records, contents), fields(records = records.len(), contents = contents.len()))]
    pub fn aggregate(
        &self,
        records: &[ProgressRecord],
        contents: &[ContentItem],
        range: TimeRange,
    ) -> AggregateResult {
        let mut warnings = Vec::new();

        let buckets = self.bucket_tallies(records, range);
        let by_content_type = self.content_type_tallies(records, contents, &mut warnings);
        let overall = self.overall_tally(records, contents.len() as u64, &mut warnings);
        let hourly_hours = self.hourly_distribution(records);

        debug!(
            buckets = buckets.len(),
            content_types = by_content_type.len(),
            warnings = warnings.len(),
            "Aggregated progress records"
        );

        AggregateResult {
            range,
            buckets,
            by_content_type,
            overall,
            hourly_hours,
            warnings,
        }
    }

    /// Aggregate the records of every listed employee, in employee order
    pub fn aggregate_company(
        &self,
        progress_by_employee: &BTreeMap<EntityId, Vec<ProgressRecord>>,
        employees: &[Employee],
        contents: &[ContentItem],
        range: TimeRange,
    ) -> AggregateResult {
        let records: Vec<ProgressRecord> = employees
            .iter()
            .filter_map(|employee| progress_by_employee.get(&employee.id))
            .flatten()
            .cloned()
            .collect();
        self.aggregate(&records, contents, range)
    }

    /// Completed and in-progress counts per time bucket
    pub fn bucket_tallies(&self, records: &[ProgressRecord], range: TimeRange) -> Vec<BucketTally> {
        let mut buckets = vec![BucketTally::default(); range.bucket_count()];

        for record in records {
            let Some(index) = self.ctx.bucket_index(record.last_accessed_at, range) else {
                continue;
            };
            if record.is_completed() {
                buckets[index].completed += 1;
            } else if record.is_in_progress() {
                buckets[index].in_progress += 1;
            }
        }

        buckets
    }

    /// Status counts per content type present in `contents`
    pub fn content_type_tallies(
        &self,
        records: &[ProgressRecord],
        contents: &[ContentItem],
        warnings: &mut Vec<DataQualityWarning>,
    ) -> Vec<ContentTypeTally> {
        let mut order: Vec<ContentType> = Vec::new();
        let mut totals: HashMap<ContentType, (u64, u64, u64)> = HashMap::new();
        let catalog: HashMap<&str, ContentType> = contents
            .iter()
            .map(|content| (content.id.as_str(), content.content_type))
            .collect();

        for content in contents {
            let entry = totals.entry(content.content_type).or_insert_with(|| {
                order.push(content.content_type);
                (0, 0, 0)
            });
            entry.0 += 1;
        }

        for record in records {
            let Some(content_type) = catalog.get(record.content_id.as_str()) else {
                debug!(
                    user_id = %record.user_id,
                    content_id = %record.content_id,
                    "Skipping progress record with unknown content"
                );
                warnings.push(DataQualityWarning::MissingContent {
                    user_id: record.user_id.clone(),
                    content_id: record.content_id.clone(),
                });
                continue;
            };

            if let Some(entry) = totals.get_mut(content_type) {
                if record.is_completed() {
                    entry.1 += 1;
                } else if record.is_in_progress() {
                    entry.2 += 1;
                }
            }
        }

        order
            .into_iter()
            .map(|content_type| {
                let (total, completed, in_progress) = totals[&content_type];
                let not_started = not_started(total, completed, in_progress).unwrap_or_else(|| {
                    warn!(
                        content_type = content_type.key(),
                        total, completed, in_progress, "Clamping negative not-started count"
                    );
                    warnings.push(DataQualityWarning::NegativeCount {
                        content_type: Some(content_type),
                        total,
                        completed,
                        in_progress,
                    });
                    0
                });
                ContentTypeTally {
                    content_type,
                    total,
                    completed,
                    in_progress,
                    not_started,
                }
            })
            .collect()
    }

    /// Status counts across all records against `total_contents` catalog items
    pub fn overall_tally(
        &self,
        records: &[ProgressRecord],
        total_contents: u64,
        warnings: &mut Vec<DataQualityWarning>,
    ) -> OverallTally {
        let completed_count = records.iter().filter(|r| r.is_completed()).count() as u64;
        let in_progress_count = records.iter().filter(|r| r.is_in_progress()).count() as u64;

        let not_started_count = not_started(total_contents, completed_count, in_progress_count)
            .unwrap_or_else(|| {
                warn!(
                    total = total_contents,
                    completed = completed_count,
                    in_progress = in_progress_count,
                    "Clamping negative overall not-started count"
                );
                warnings.push(DataQualityWarning::NegativeCount {
                    content_type: None,
                    total: total_contents,
                    completed: completed_count,
                    in_progress: in_progress_count,
                });
                0
            });

        OverallTally {
            completed_count,
            in_progress_count,
            not_started_count,
        }
    }

    /// Learning hours per local hour of day.
    ///
    /// Records carry only their last access time, so each record's time is
    /// spread over a window starting at that hour: `time / window` on the
    /// access hour and `weight` times that on the following hour.
    pub fn hourly_distribution(&self, records: &[ProgressRecord]) -> [f64; 24] {
        let mut hours = [0.0; 24];
        let window = self.config.smoothing_window_seconds.max(1) as f64;

        for record in records {
            let Some(accessed) = record.last_accessed_at else {
                continue;
            };
            let hour = self.ctx.hour_of_day(accessed);
            let share = record.time_spent_seconds as f64 / window;
            hours[hour] += share;
            hours[(hour + 1) % 24] += share * self.config.next_hour_weight;
        }

        hours
    }
}

/// Per-employee totals shown in the roster and reports
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeSummary {
    pub employee_id: EntityId,
    pub completed: u64,
    pub in_progress: u64,
    pub total_time_seconds: u64,
    /// Rounded mean best score over completed records; missing scores count as 0
    pub average_score: u64,
}

impl EmployeeSummary {
    pub fn from_records(employee_id: impl Into<EntityId>, records: &[ProgressRecord]) -> Self {
        let completed: Vec<&ProgressRecord> = records.iter().filter(|r| r.is_completed()).collect();
        let score_sum: u64 = completed
            .iter()
            .map(|r| u64::from(r.best_score.unwrap_or(0)))
            .sum();
        let average_score = if completed.is_empty() {
            0
        } else {
            (score_sum as f64 / completed.len() as f64).round() as u64
        };

        Self {
            employee_id: employee_id.into(),
            completed: completed.len() as u64,
            in_progress: records.iter().filter(|r| r.is_in_progress()).count() as u64,
            total_time_seconds: records.iter().map(|r| r.time_spent_seconds).sum(),
            average_score,
        }
    }
}

/// Completions of one course across the company
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseCompletion {
    pub content_id: EntityId,
    pub title: String,
    pub completions: u64,
    /// Share of employees who completed it, `0.0..=1.0`
    pub rate: f64,
}

/// Company-wide headline numbers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyOverview {
    pub total_employees: u64,
    pub active_employees: u64,
    pub total_completed: u64,
    pub total_in_progress: u64,
    pub total_time_seconds: u64,
    /// Completed records over `employees × contents`, `0.0..=1.0`
    pub average_completion_rate: f64,
    /// Sorted by completions, most completed first
    pub course_completions: Vec<CourseCompletion>,
}

impl CompanyOverview {
    #[instrument(skip_all, fields(employees = employees.len()))]
    pub fn build(
        employees: &[Employee],
        progress_by_employee: &BTreeMap<EntityId, Vec<ProgressRecord>>,
        contents: &[ContentItem],
    ) -> Self {
        let empty = Vec::new();
        let records_of = |employee: &Employee| progress_by_employee.get(&employee.id).unwrap_or(&empty);

        let summaries: Vec<EmployeeSummary> = employees
            .iter()
            .map(|employee| EmployeeSummary::from_records(employee.id.clone(), records_of(employee)))
            .collect();

        let total_employees = employees.len() as u64;
        let total_completed = summaries.iter().map(|s| s.completed).sum();
        let slots = total_employees * contents.len() as u64;
        let average_completion_rate = if slots == 0 {
            0.0
        } else {
            (total_completed as f64 / slots as f64).min(1.0)
        };

        let mut completions: HashMap<&str, u64> = HashMap::new();
        for record in employees.iter().flat_map(records_of) {
            if record.is_completed() {
                *completions.entry(record.content_id.as_str()).or_default() += 1;
            }
        }

        let mut course_completions: Vec<CourseCompletion> = contents
            .iter()
            .map(|content| {
                let count = completions.get(content.id.as_str()).copied().unwrap_or(0);
                CourseCompletion {
                    content_id: content.id.clone(),
                    title: content.title.clone(),
                    completions: count,
                    rate: if total_employees == 0 {
                        0.0
                    } else {
                        (count as f64 / total_employees as f64).min(1.0)
                    },
                }
            })
            .collect();
        course_completions.sort_by(|a, b| b.completions.cmp(&a.completions));

        Self {
            total_employees,
            active_employees: employees.iter().filter(|e| e.is_active()).count() as u64,
            total_completed,
            total_in_progress: summaries.iter().map(|s| s.in_progress).sum(),
            total_time_seconds: summaries.iter().map(|s| s.total_time_seconds).sum(),
            average_completion_rate,
            course_completions,
        }
    }
}

/// Number of learning-log events per local hour on `date`
pub fn hourly_activity_counts(logs: &[LearningLog], date: NaiveDate, ctx: &TimeContext) -> [u32; 24] {
    let mut counts = [0u32; 24];
    for log in logs {
        if ctx.local_date(log.timestamp) == date {
            counts[ctx.hour_of_day(log.timestamp)] += 1;
        }
    }
    counts
}

/// Coarse part of the day used to describe learning habits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayPeriod {
    /// 5:00 to 11:59
    Morning,
    /// 12:00 to 16:59
    Daytime,
    /// 17:00 to 20:59
    Evening,
    Night,
}

impl DayPeriod {
    pub const ALL: [DayPeriod; 4] = [Self::Morning, Self::Daytime, Self::Evening, Self::Night];

    pub fn from_hour(hour: usize) -> Self {
        match hour {
            5..=11 => Self::Morning,
            12..=16 => Self::Daytime,
            17..=20 => Self::Evening,
            _ => Self::Night,
        }
    }

    /// Message id of the localized label
    pub fn label_key(&self) -> &'static str {
        match self {
            Self::Morning => "period-morning",
            Self::Daytime => "period-daytime",
            Self::Evening => "period-evening",
            Self::Night => "period-night",
        }
    }
}

/// Period with the most learning time; `None` when every hour is zero.
/// Ties go to the earlier period of the day.
pub fn preferred_period(hourly: &[f64; 24]) -> Option<DayPeriod> {
    let mut totals = [0.0f64; 4];
    for (hour, value) in hourly.iter().enumerate() {
        let period = DayPeriod::from_hour(hour);
        if let Some(index) = DayPeriod::ALL.iter().position(|p| *p == period) {
            totals[index] += value;
        }
    }

    let mut best: Option<(DayPeriod, f64)> = None;
    for (period, total) in DayPeriod::ALL.into_iter().zip(totals) {
        if total > 0.0 && best.map_or(true, |(_, current)| total > current) {
            best = Some((period, total));
        }
    }
    best.map(|(period, _)| period)
}

#[cfg(test)]
mod tests {
    use super::*;
    use learnboard_common::test_utils::{content, employee, mock_timestamp, RecordBuilder};
    use learnboard_common::ProgressStatus;
    use proptest::prelude::*;

    fn aggregator() -> ProgressAggregator {
        ProgressAggregator::new(
            TimeContext::utc(mock_timestamp(2024, 6, 15, 12, 0, 0)),
            &AnalyticsConfig::default(),
        )
    }

    #[test]
    fn test_video_scenario() {
        let contents = vec![content("c1", ContentType::Video), content("c2", ContentType::Video)];
        let records = vec![
            RecordBuilder::new("u1", "c1")
                .completed(mock_timestamp(2024, 6, 14, 9, 0, 0))
                .build(),
            RecordBuilder::new("u1", "c2").in_progress(40).build(),
        ];

        let result = aggregator().aggregate(&records, &contents, TimeRange::Week);
        assert_eq!(
            result.by_content_type,
            vec![ContentTypeTally {
                content_type: ContentType::Video,
                total: 2,
                completed: 1,
                in_progress: 1,
                not_started: 0,
            }]
        );
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_empty_inputs() {
        let result = aggregator().aggregate(&[], &[], TimeRange::Year);
        assert_eq!(result, AggregateResult::empty(TimeRange::Year));
        assert_eq!(result.buckets.len(), 12);
        assert_eq!(result.overall, OverallTally::default());
    }

    #[test]
    fn test_buckets_ignore_not_started_and_null_access() {
        let accessed = mock_timestamp(2024, 6, 15, 8, 0, 0);
        let records = vec![
            RecordBuilder::new("u1", "c1").completed(accessed).build(),
            RecordBuilder::new("u1", "c2").in_progress(10).accessed(accessed).build(),
            RecordBuilder::new("u1", "c3").accessed(accessed).build(),
            RecordBuilder::new("u1", "c4").in_progress(10).build(),
        ];

        let buckets = aggregator().bucket_tallies(&records, TimeRange::Week);
        assert_eq!(buckets[6], BucketTally { completed: 1, in_progress: 1 });
        assert_eq!(buckets.iter().map(|b| b.completed + b.in_progress).sum::<u64>(), 2);
    }

    #[test]
    fn test_missing_content_is_skipped_with_warning() {
        let contents = vec![content("c1", ContentType::Quiz)];
        let records = vec![
            RecordBuilder::new("u1", "c1").in_progress(50).build(),
            RecordBuilder::new("u1", "gone").in_progress(50).build(),
        ];

        let result = aggregator().aggregate(&records, &contents, TimeRange::Month);
        assert_eq!(result.by_content_type[0].in_progress, 1);
        assert!(result.warnings.contains(&DataQualityWarning::MissingContent {
            user_id: "u1".to_string(),
            content_id: "gone".to_string(),
        }));
    }

    #[test]
    fn test_negative_not_started_is_clamped() {
        let contents = vec![content("c1", ContentType::Text)];
        let records = vec![
            RecordBuilder::new("u1", "c1").in_progress(50).build(),
            RecordBuilder::new("u2", "c1")
                .completed(mock_timestamp(2024, 6, 1, 0, 0, 0))
                .build(),
        ];

        let result = aggregator().aggregate(&records, &contents, TimeRange::Week);
        assert_eq!(result.by_content_type[0].not_started, 0);
        assert_eq!(result.overall.not_started_count, 0);
        let clamps = result
            .warnings
            .iter()
            .filter(|w| matches!(w, DataQualityWarning::NegativeCount { .. }))
            .count();
        assert_eq!(clamps, 2);
    }

    #[test]
    fn test_content_types_keep_catalog_order() {
        let contents = vec![
            content("c1", ContentType::Quiz),
            content("c2", ContentType::Video),
            content("c3", ContentType::Quiz),
        ];
        let tallies = aggregator().content_type_tallies(&[], &contents, &mut Vec::new());
        let types: Vec<ContentType> = tallies.iter().map(|t| t.content_type).collect();
        assert_eq!(types, vec![ContentType::Quiz, ContentType::Video]);
        assert_eq!(tallies[0].total, 2);
        assert_eq!(tallies[0].not_started, 2);
    }

    #[test]
    fn test_hourly_distribution_smoothing() {
        let records = vec![
            RecordBuilder::new("u1", "c1")
                .accessed(mock_timestamp(2024, 6, 15, 23, 10, 0))
                .time_spent(7200)
                .build(),
            RecordBuilder::new("u1", "c2")
                .accessed(mock_timestamp(2024, 6, 15, 9, 0, 0))
                .time_spent(3600)
                .build(),
        ];

        let hours = aggregator().hourly_distribution(&records);
        assert_eq!(hours[23], 1.0);
        assert_eq!(hours[0], 0.5);
        assert_eq!(hours[9], 0.5);
        assert_eq!(hours[10], 0.25);
        assert_eq!(hours.iter().sum::<f64>(), 2.25);
    }

    #[test]
    fn test_aggregate_company_uses_listed_employees_only() {
        let contents = vec![content("c1", ContentType::Video)];
        let employees = vec![employee("e1", "Taro", "Yamada")];
        let progress = BTreeMap::from([
            ("e1".to_string(), vec![RecordBuilder::new("e1", "c1").in_progress(20).build()]),
            ("e2".to_string(), vec![RecordBuilder::new("e2", "c1").in_progress(20).build()]),
        ]);

        let result = aggregator().aggregate_company(&progress, &employees, &contents, TimeRange::Week);
        assert_eq!(result.overall.in_progress_count, 1);
    }

    #[test]
    fn test_employee_summary() {
        let done = mock_timestamp(2024, 6, 1, 0, 0, 0);
        let records = vec![
            RecordBuilder::new("e1", "c1").completed(done).best_score(80).time_spent(3000).build(),
            RecordBuilder::new("e1", "c2").completed(done).best_score(85).time_spent(600).build(),
            RecordBuilder::new("e1", "c3").completed(done).time_spent(0).build(),
            RecordBuilder::new("e1", "c4").in_progress(30).time_spent(59).build(),
        ];

        let summary = EmployeeSummary::from_records("e1", &records);
        assert_eq!(summary.completed, 3);
        assert_eq!(summary.in_progress, 1);
        assert_eq!(summary.total_time_seconds, 3659);
        // (80 + 85 + 0) / 3 = 55
        assert_eq!(summary.average_score, 55);

        let none = EmployeeSummary::from_records("e2", &[]);
        assert_eq!(none.average_score, 0);
    }

    #[test]
    fn test_company_overview() {
        let done = mock_timestamp(2024, 6, 1, 0, 0, 0);
        let contents = vec![content("c1", ContentType::Video), content("c2", ContentType::Text)];
        let mut inactive = employee("e2", "Hanako", "Sato");
        inactive.status = learnboard_common::EmployeeStatus::Inactive;
        let employees = vec![employee("e1", "Taro", "Yamada"), inactive];
        let progress = BTreeMap::from([(
            "e1".to_string(),
            vec![
                RecordBuilder::new("e1", "c2").completed(done).time_spent(1200).build(),
                RecordBuilder::new("e1", "c1").in_progress(50).time_spent(600).build(),
            ],
        )]);

        let overview = CompanyOverview::build(&employees, &progress, &contents);
        assert_eq!(overview.total_employees, 2);
        assert_eq!(overview.active_employees, 1);
        assert_eq!(overview.total_completed, 1);
        assert_eq!(overview.total_in_progress, 1);
        assert_eq!(overview.total_time_seconds, 1800);
        assert_eq!(overview.average_completion_rate, 0.25);
        assert_eq!(overview.course_completions[0].content_id, "c2");
        assert_eq!(overview.course_completions[0].rate, 0.5);
    }

    #[test]
    fn test_hourly_activity_counts_filters_by_local_date() {
        let log = |id: &str, ts| LearningLog {
            id: id.to_string(),
            user_id: "u1".to_string(),
            content_id: "c1".to_string(),
            action: "view".to_string(),
            timestamp: ts,
        };
        let logs = vec![
            log("l1", mock_timestamp(2024, 6, 15, 9, 5, 0)),
            log("l2", mock_timestamp(2024, 6, 15, 9, 55, 0)),
            log("l3", mock_timestamp(2024, 6, 15, 18, 0, 0)),
            log("l4", mock_timestamp(2024, 6, 14, 9, 0, 0)),
        ];
        let ctx = TimeContext::utc(mock_timestamp(2024, 6, 15, 23, 0, 0));

        let counts = hourly_activity_counts(&logs, ctx.today(), &ctx);
        assert_eq!(counts[9], 2);
        assert_eq!(counts[18], 1);
        assert_eq!(counts.iter().sum::<u32>(), 3);
    }

    #[test]
    fn test_day_periods() {
        assert_eq!(DayPeriod::from_hour(4), DayPeriod::Night);
        assert_eq!(DayPeriod::from_hour(5), DayPeriod::Morning);
        assert_eq!(DayPeriod::from_hour(12), DayPeriod::Daytime);
        assert_eq!(DayPeriod::from_hour(20), DayPeriod::Evening);
        assert_eq!(DayPeriod::from_hour(21), DayPeriod::Night);

        let mut hourly = [0.0; 24];
        assert_eq!(preferred_period(&hourly), None);
        hourly[22] = 1.0;
        hourly[18] = 0.5;
        assert_eq!(preferred_period(&hourly), Some(DayPeriod::Night));
    }

    fn arb_status() -> impl Strategy<Value = ProgressStatus> {
        prop_oneof![
            Just(ProgressStatus::NotStarted),
            Just(ProgressStatus::InProgress),
            Just(ProgressStatus::Completed),
        ]
    }

    proptest! {
        #[test]
        fn prop_content_type_counts_add_up(
            types in prop::collection::vec(0usize..5, 1..20),
            picks in prop::collection::vec((any::<prop::sample::Index>(), arb_status()), 0..20),
        ) {
            let contents: Vec<ContentItem> = types
                .iter()
                .enumerate()
                .map(|(i, t)| content(&format!("c{i}"), ContentType::ALL[*t]))
                .collect();
            // One record per content item at most, so no clamp can trigger
            let mut seen = std::collections::HashSet::new();
            let records: Vec<ProgressRecord> = picks
                .iter()
                .map(|(index, status)| (index.index(contents.len()), *status))
                .filter(|(i, _)| seen.insert(*i))
                .map(|(i, status)| {
                    let mut record = ProgressRecord::not_started("u1", contents[i].id.clone());
                    record.status = status;
                    record
                })
                .collect();

            let result = aggregator().aggregate(&records, &contents, TimeRange::Week);
            prop_assert!(result.warnings.is_empty());
            for tally in &result.by_content_type {
                prop_assert_eq!(tally.completed + tally.in_progress + tally.not_started, tally.total);
            }
        }

        #[test]
        fn prop_no_access_means_flat_distribution(
            spent in prop::collection::vec(0u64..1_000_000, 0..30),
        ) {
            let records: Vec<ProgressRecord> = spent
                .iter()
                .enumerate()
                .map(|(i, s)| RecordBuilder::new("u1", &format!("c{i}")).in_progress(10).time_spent(*s).build())
                .collect();
            let hours = aggregator().hourly_distribution(&records);
            prop_assert_eq!(hours.len(), 24);
            prop_assert!(hours.iter().all(|h| *h == 0.0));
        }
    }
}
