//! Test utilities and shared fixtures.
//!
//! Available to other workspace crates through the `testing` feature.

use crate::{
    ContentItem, ContentType, Employee, EmployeeStatus, ProgressRecord, ProgressStatus, Timestamp,
};
use chrono::{TimeZone, Utc};
use std::sync::Once;
use tracing_subscriber::{fmt, EnvFilter};

static INIT: Once = Once::new();

/// Initialize logging for tests. Safe to call from every test.
pub fn init_test_logging() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
        let _ = fmt().with_test_writer().with_env_filter(filter).try_init();
    });
}

/// Test fixture for creating a UTC timestamp.
pub fn mock_timestamp(year: i32, month: u32, day: u32, hour: u32, min: u32, sec: u32) -> Timestamp {
    Utc.with_ymd_and_hms(year, month, day, hour, min, sec)
        .unwrap()
}

/// Catalog entry fixture
pub fn content(id: &str, content_type: ContentType) -> ContentItem {
    ContentItem {
        id: id.to_string(),
        title: format!("Course {id}"),
        content_type,
    }
}

/// Active employee fixture
pub fn employee(id: &str, first_name: &str, last_name: &str) -> Employee {
    Employee {
        id: id.to_string(),
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
        email: format!("{}@example.com", last_name.to_lowercase()),
        status: EmployeeStatus::Active,
        joined_at: mock_timestamp(2024, 4, 1, 0, 0, 0),
    }
}

/// Builder for progress record fixtures that keeps the completion invariants
#[derive(Debug, Clone)]
pub struct RecordBuilder {
    record: ProgressRecord,
}

impl RecordBuilder {
    pub fn new(user_id: &str, content_id: &str) -> Self {
        Self {
            record: ProgressRecord::not_started(user_id, content_id),
        }
    }

    pub fn completed(mut self, at: Timestamp) -> Self {
        self.record.status = ProgressStatus::Completed;
        self.record.progress_percentage = 100;
        self.record.started_at.get_or_insert(at);
        self.record.completed_at = Some(at);
        self.record.last_accessed_at = Some(at);
        self
    }

    pub fn in_progress(mut self, percentage: u8) -> Self {
        self.record.status = ProgressStatus::InProgress;
        self.record.progress_percentage = percentage;
        self.record.completed_at = None;
        self
    }

    pub fn accessed(mut self, at: Timestamp) -> Self {
        self.record.started_at.get_or_insert(at);
        self.record.last_accessed_at = Some(at);
        self
    }

    pub fn time_spent(mut self, seconds: u64) -> Self {
        self.record.time_spent_seconds = seconds;
        self
    }

    pub fn best_score(mut self, score: u8) -> Self {
        self.record.best_score = Some(score);
        self
    }

    pub fn build(self) -> ProgressRecord {
        self.record
    }
}

/// Assert that two floating point numbers are approximately equal within a tolerance.
pub fn assert_approx_eq(left: f64, right: f64, tolerance: f64) {
    let diff = (left - right).abs();
    assert!(
        diff <= tolerance,
        "assertion failed: `{left}` is not approximately equal to `{right}` (tolerance: {tolerance}, diff: {diff})"
    );
}
