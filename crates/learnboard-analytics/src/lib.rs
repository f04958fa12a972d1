//! # Learnboard Analytics
//!
//! Pure reductions over learning-progress snapshots: temporal bucketing,
//! status tallies, activity calendars, chart series, roster queries and
//! invitation bookkeeping. Results are published to readers through
//! [`DashboardState`].

#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod aggregator;
pub mod bucketing;
pub mod calendar;
pub mod invitation;
pub mod roster;
pub mod series;
pub mod source;
pub mod state;

pub use aggregator::{
    hourly_activity_counts, preferred_period, AggregateResult, BucketTally, CompanyOverview,
    ContentTypeTally, CourseCompletion, DataQualityWarning, DayPeriod, EmployeeSummary,
    OverallTally, ProgressAggregator,
};
pub use bucketing::{months_between, TimeContext, TimeRange};
pub use calendar::{daily_time_spent, ActivityLevel, CalendarDay, CalendarMonth};
pub use invitation::{
    invitation_message, parse_invite_emails, status_label, InvitationBook, InvitationExt,
    StatusCounts,
};
pub use roster::{ProgressFilter, RosterEntry, RosterQuery, SortDirection, SortField};
pub use series::{ChartData, NamedSeries, SeriesBuilder};
pub use source::{DashboardSnapshot, JsonFileSource, SnapshotSource, StaticSource};
pub use state::{DashboardState, DashboardView};
