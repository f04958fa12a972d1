//! Learning calendar: daily time spent and activity levels

use crate::bucketing::TimeContext;
use chrono::{Datelike, Duration, NaiveDate};
use learnboard_common::{bail, ProgressRecord, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Ordinal intensity of one day's learning
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    None,
    Low,
    Moderate,
    High,
    VeryHigh,
}

impl ActivityLevel {
    /// Level for `seconds` of learning given the exclusive upper bounds of
    /// levels 1 to 3
    pub fn from_seconds(seconds: u64, thresholds: &[u64; 3]) -> Self {
        match seconds {
            0 => Self::None,
            s if s < thresholds[0] => Self::Low,
            s if s < thresholds[1] => Self::Moderate,
            s if s < thresholds[2] => Self::High,
            _ => Self::VeryHigh,
        }
    }

    /// Numeric level, 0 to 4
    pub fn value(&self) -> u8 {
        *self as u8
    }
}

/// Seconds of learning per local calendar day, keyed by the day of each
/// record's last access
pub fn daily_time_spent(records: &[ProgressRecord], ctx: &TimeContext) -> BTreeMap<NaiveDate, u64> {
    let mut days = BTreeMap::new();
    for record in records {
        if let Some(accessed) = record.last_accessed_at {
            *days.entry(ctx.local_date(accessed)).or_insert(0) += record.time_spent_seconds;
        }
    }
    days
}

/// One cell of the month grid
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarDay {
    pub date: NaiveDate,
    /// False for the leading cells borrowed from the previous month
    pub in_month: bool,
    pub time_spent_seconds: u64,
    pub level: ActivityLevel,
}

/// A month grid starting on Sunday
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarMonth {
    pub year: i32,
    pub month: u32,
    pub days: Vec<CalendarDay>,
    /// Sum of activity levels per weekday, Sunday first
    pub weekday_levels: [u32; 7],
}

impl CalendarMonth {
    pub fn build(
        year: i32,
        month: u32,
        records: &[ProgressRecord],
        ctx: &TimeContext,
        thresholds: &[u64; 3],
    ) -> Result<Self> {
        let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) else {
            bail!("Invalid calendar month: {}-{}", year, month);
        };

        let daily = daily_time_spent(records, ctx);
        let leading = first.weekday().num_days_from_sunday() as i64;
        let mut days: Vec<CalendarDay> = (1..=leading)
            .rev()
            .map(|back| CalendarDay {
                date: first - Duration::days(back),
                in_month: false,
                time_spent_seconds: 0,
                level: ActivityLevel::None,
            })
            .collect();

        let mut weekday_levels = [0u32; 7];
        let mut date = first;
        while date.month() == month {
            let seconds = daily.get(&date).copied().unwrap_or(0);
            let level = ActivityLevel::from_seconds(seconds, thresholds);
            weekday_levels[date.weekday().num_days_from_sunday() as usize] += u32::from(level.value());
            days.push(CalendarDay {
                date,
                in_month: true,
                time_spent_seconds: seconds,
                level,
            });
            let Some(next) = date.succ_opt() else { break };
            date = next;
        }

        Ok(Self {
            year,
            month,
            days,
            weekday_levels,
        })
    }

    /// Year and month before this one
    pub fn previous(&self) -> (i32, u32) {
        if self.month == 1 {
            (self.year - 1, 12)
        } else {
            (self.year, self.month - 1)
        }
    }

    /// Year and month after this one
    pub fn next(&self) -> (i32, u32) {
        if self.month == 12 {
            (self.year + 1, 1)
        } else {
            (self.year, self.month + 1)
        }
    }

    /// Days that belong to the month itself
    pub fn month_days(&self) -> impl Iterator<Item = &CalendarDay> {
        self.days.iter().filter(|day| day.in_month)
    }
}
