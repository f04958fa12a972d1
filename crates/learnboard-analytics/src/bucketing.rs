//! Temporal bucketing of progress records.
//!
//! Every computation is relative to a [`TimeContext`]: the instant treated as
//! "now" and the time zone that defines local hours, dates and months.

use chrono::{DateTime, Datelike, Duration, Months, NaiveDate, Timelike, Utc};
use chrono_tz::Tz;
use learnboard_common::{LearnboardError, Timestamp};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const SECONDS_PER_DAY: i64 = 86_400;
const SECONDS_PER_WEEK: i64 = 7 * SECONDS_PER_DAY;

/// Rolling window a progress chart covers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeRange {
    /// Last 7 days ending today
    Week,
    /// Last 4 weeks ending today
    Month,
    /// Last 12 calendar months ending this month
    Year,
}

impl TimeRange {
    pub const ALL: [TimeRange; 3] = [TimeRange::Week, TimeRange::Month, TimeRange::Year];

    /// Number of buckets in this range
    pub fn bucket_count(&self) -> usize {
        match self {
            Self::Week => 7,
            Self::Month => 4,
            Self::Year => 12,
        }
    }

    /// Index of the most recent bucket
    pub fn last_index(&self) -> usize {
        self.bucket_count() - 1
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Week => "week",
            Self::Month => "month",
            Self::Year => "year",
        }
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeRange {
    type Err = LearnboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "week" => Ok(Self::Week),
            "month" => Ok(Self::Month),
            "year" => Ok(Self::Year),
            other => Err(LearnboardError::InvalidTimeRange(other.to_string())),
        }
    }
}

/// The clock and time zone an aggregation runs against
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeContext {
    pub now: Timestamp,
    pub tz: Tz,
}

impl TimeContext {
    pub fn new(now: Timestamp, tz: Tz) -> Self {
        Self { now, tz }
    }

    /// Context in UTC
    pub fn utc(now: Timestamp) -> Self {
        Self::new(now, chrono_tz::UTC)
    }

    /// Context at the current instant
    pub fn current(tz: Tz) -> Self {
        Self::new(Utc::now(), tz)
    }

    /// `ts` in the context's time zone
    pub fn local(&self, ts: Timestamp) -> DateTime<Tz> {
        ts.with_timezone(&self.tz)
    }

    /// Local calendar date of `ts`
    pub fn local_date(&self, ts: Timestamp) -> NaiveDate {
        self.local(ts).date_naive()
    }

    /// Local calendar date of `now`
    pub fn today(&self) -> NaiveDate {
        self.local_date(self.now)
    }

    /// Local hour of `ts`, always in `0..24`
    pub fn hour_of_day(&self, ts: Timestamp) -> usize {
        self.local(ts).hour() as usize
    }

    /// Bucket of a record whose reference timestamp is `reference`.
    ///
    /// `None` excludes the record. Timestamps older than the window land on
    /// the oldest bucket and future timestamps on the newest one.
    pub fn bucket_index(&self, reference: Option<Timestamp>, range: TimeRange) -> Option<usize> {
        let ts = reference?;
        let last = range.last_index() as i64;

        let age = match range {
            TimeRange::Week => (self.now - ts).num_seconds().div_euclid(SECONDS_PER_DAY),
            TimeRange::Month => (self.now - ts).num_seconds().div_euclid(SECONDS_PER_WEEK),
            TimeRange::Year => months_between(self.today(), self.local_date(ts)),
        };

        Some((last - age.clamp(0, last)) as usize)
    }

    /// Calendar anchor of every bucket, oldest first.
    ///
    /// Week buckets map to the day itself, month buckets to the first day of
    /// each 7-day slice and year buckets to the first day of the month.
    pub fn bucket_dates(&self, range: TimeRange) -> Vec<NaiveDate> {
        let today = self.today();
        let last = range.last_index();

        (0..range.bucket_count())
            .map(|index| {
                let back = (last - index) as u32;
                match range {
                    TimeRange::Week => today - Duration::days(back as i64),
                    TimeRange::Month => today - Duration::days(7 * back as i64 + 6),
                    TimeRange::Year => first_of_month(today)
                        .checked_sub_months(Months::new(back))
                        .unwrap_or(today),
                }
            })
            .collect()
    }
}

/// Whole calendar months from `earlier` to `later`; negative when reversed
pub fn months_between(later: NaiveDate, earlier: NaiveDate) -> i64 {
    (later.year() as i64 - earlier.year() as i64) * 12 + later.month() as i64
        - earlier.month() as i64
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

#[cfg(test)]
mod tests {
    use super::*;
    use learnboard_common::test_utils::mock_timestamp;
    use proptest::prelude::*;

    fn ctx() -> TimeContext {
        TimeContext::utc(mock_timestamp(2024, 6, 15, 12, 0, 0))
    }

    #[test]
    fn test_parse_time_range() {
        assert_eq!("week".parse::<TimeRange>().unwrap(), TimeRange::Week);
        assert_eq!("year".parse::<TimeRange>().unwrap(), TimeRange::Year);

        let err = "quarter".parse::<TimeRange>().unwrap_err();
        assert!(matches!(err, LearnboardError::InvalidTimeRange(ref s) if s == "quarter"));
        assert!("Week".parse::<TimeRange>().is_err());
    }

    #[test]
    fn test_null_reference_is_excluded() {
        for range in TimeRange::ALL {
            assert_eq!(ctx().bucket_index(None, range), None);
        }
    }

    #[test]
    fn test_week_buckets() {
        let ctx = ctx();
        let day = |d, h| Some(mock_timestamp(2024, 6, d, h, 0, 0));
        assert_eq!(ctx.bucket_index(day(15, 11), TimeRange::Week), Some(6));
        // 24h ago exactly is one day back
        assert_eq!(ctx.bucket_index(day(14, 12), TimeRange::Week), Some(5));
        // 23h59 ago is still today
        assert_eq!(
            ctx.bucket_index(Some(mock_timestamp(2024, 6, 14, 12, 1, 0)), TimeRange::Week),
            Some(6)
        );
        assert_eq!(ctx.bucket_index(day(9, 12), TimeRange::Week), Some(0));
        // Older records clamp onto the oldest bucket
        assert_eq!(ctx.bucket_index(day(1, 0), TimeRange::Week), Some(0));
        // Future records clamp onto the newest bucket
        assert_eq!(ctx.bucket_index(day(20, 0), TimeRange::Week), Some(6));
    }

    #[test]
    fn test_month_buckets() {
        let ctx = ctx();
        let day = |d| Some(mock_timestamp(2024, 6, d, 12, 0, 0));
        assert_eq!(ctx.bucket_index(day(15), TimeRange::Month), Some(3));
        assert_eq!(ctx.bucket_index(day(8), TimeRange::Month), Some(2));
        assert_eq!(ctx.bucket_index(day(1), TimeRange::Month), Some(1));
        assert_eq!(
            ctx.bucket_index(Some(mock_timestamp(2024, 1, 1, 0, 0, 0)), TimeRange::Month),
            Some(0)
        );
    }

    #[test]
    fn test_year_buckets_use_calendar_months() {
        let ctx = ctx();
        let month = |y, m| Some(mock_timestamp(y, m, 28, 0, 0, 0));
        assert_eq!(ctx.bucket_index(month(2024, 6), TimeRange::Year), Some(11));
        assert_eq!(ctx.bucket_index(month(2024, 5), TimeRange::Year), Some(10));
        assert_eq!(ctx.bucket_index(month(2023, 7), TimeRange::Year), Some(0));
        assert_eq!(ctx.bucket_index(month(2021, 1), TimeRange::Year), Some(0));
    }

    #[test]
    fn test_year_bucket_respects_time_zone() {
        // 2024-05-31T20:00Z is already June 1st in Tokyo
        let tokyo = TimeContext::new(mock_timestamp(2024, 6, 15, 12, 0, 0), chrono_tz::Asia::Tokyo);
        let ts = Some(mock_timestamp(2024, 5, 31, 20, 0, 0));
        assert_eq!(tokyo.bucket_index(ts, TimeRange::Year), Some(11));
        assert_eq!(ctx().bucket_index(ts, TimeRange::Year), Some(10));
    }

    #[test]
    fn test_hour_of_day_is_local() {
        let ts = mock_timestamp(2024, 6, 15, 23, 30, 0);
        assert_eq!(ctx().hour_of_day(ts), 23);
        let tokyo = TimeContext::new(ts, chrono_tz::Asia::Tokyo);
        assert_eq!(tokyo.hour_of_day(ts), 8);
    }

    #[test]
    fn test_bucket_dates() {
        let ctx = ctx();
        let week = ctx.bucket_dates(TimeRange::Week);
        assert_eq!(week.len(), 7);
        assert_eq!(week[0], NaiveDate::from_ymd_opt(2024, 6, 9).unwrap());
        assert_eq!(week[6], NaiveDate::from_ymd_opt(2024, 6, 15).unwrap());

        let year = ctx.bucket_dates(TimeRange::Year);
        assert_eq!(year.len(), 12);
        assert_eq!(year[0], NaiveDate::from_ymd_opt(2023, 7, 1).unwrap());
        assert_eq!(year[11], NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());

        assert_eq!(ctx.bucket_dates(TimeRange::Month).len(), 4);
    }

    proptest! {
        #[test]
        fn prop_now_is_last_bucket(secs in 0i64..4_000_000_000) {
            let now = DateTime::from_timestamp(secs, 0).unwrap();
            let ctx = TimeContext::new(now, chrono_tz::Asia::Tokyo);
            for range in TimeRange::ALL {
                prop_assert_eq!(ctx.bucket_index(Some(now), range), Some(range.last_index()));
            }
        }

        #[test]
        fn prop_index_always_in_range(now in 0i64..4_000_000_000, ts in 0i64..4_000_000_000) {
            let ctx = TimeContext::utc(DateTime::from_timestamp(now, 0).unwrap());
            let ts = DateTime::from_timestamp(ts, 0).unwrap();
            for range in TimeRange::ALL {
                let index = ctx.bucket_index(Some(ts), range).unwrap();
                prop_assert!(index < range.bucket_count());
            }
        }

        #[test]
        fn prop_hour_of_day_in_range(secs in 0i64..4_000_000_000) {
            let ts = DateTime::from_timestamp(secs, 0).unwrap();
            prop_assert!(TimeContext::utc(ts).hour_of_day(ts) < 24);
        }
    }
}
