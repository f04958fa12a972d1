//! Employee roster filtering and sorting

use crate::aggregator::EmployeeSummary;
use learnboard_common::{Employee, EntityId, ProgressRecord};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Which employees to keep based on their progress
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgressFilter {
    #[default]
    All,
    /// At least one completed course
    Completed,
    /// At least one course in progress
    InProgress,
    /// No progress records at all
    NotStarted,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortField {
    #[default]
    Name,
    CompletedCourses,
    InProgressCourses,
    TotalTime,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    /// The opposite direction, used when the same column is picked twice
    pub fn toggled(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

/// An employee together with their progress totals
#[derive(Debug, Clone, PartialEq)]
pub struct RosterEntry<'a> {
    pub employee: &'a Employee,
    pub summary: EmployeeSummary,
}

/// Search, filter and sort settings of the roster view
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RosterQuery {
    /// Case-insensitive substring of e-mail, first or last name
    pub search: String,
    pub progress_filter: ProgressFilter,
    pub sort_field: SortField,
    pub direction: SortDirection,
}

impl RosterQuery {
    /// Select `field`; picking the current field again flips the direction
    pub fn sort_by(&mut self, field: SortField) {
        if self.sort_field == field {
            self.direction = self.direction.toggled();
        } else {
            self.sort_field = field;
            self.direction = SortDirection::Asc;
        }
    }

    fn matches_search(&self, employee: &Employee) -> bool {
        let query = self.search.trim().to_lowercase();
        query.is_empty()
            || [&employee.email, &employee.first_name, &employee.last_name]
                .iter()
                .any(|field| field.to_lowercase().contains(&query))
    }

    fn matches_progress(&self, records: &[ProgressRecord]) -> bool {
        match self.progress_filter {
            ProgressFilter::All => true,
            ProgressFilter::Completed => records.iter().any(ProgressRecord::is_completed),
            ProgressFilter::InProgress => records.iter().any(ProgressRecord::is_in_progress),
            ProgressFilter::NotStarted => records.is_empty(),
        }
    }

    fn compare(&self, a: &RosterEntry<'_>, b: &RosterEntry<'_>) -> Ordering {
        let ordering = match self.sort_field {
            SortField::Name => a.employee.display_name().cmp(&b.employee.display_name()),
            SortField::CompletedCourses => a.summary.completed.cmp(&b.summary.completed),
            SortField::InProgressCourses => a.summary.in_progress.cmp(&b.summary.in_progress),
            SortField::TotalTime => a.summary.total_time_seconds.cmp(&b.summary.total_time_seconds),
        };
        match self.direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }

    /// Employees matching the query, sorted stably
    pub fn filter_and_sort<'a>(
        &self,
        employees: &'a [Employee],
        progress_by_employee: &BTreeMap<EntityId, Vec<ProgressRecord>>,
    ) -> Vec<RosterEntry<'a>> {
        let mut entries: Vec<RosterEntry<'a>> = employees
            .iter()
            .filter(|employee| self.matches_search(employee))
            .filter_map(|employee| {
                let records = progress_by_employee
                    .get(&employee.id)
                    .map(Vec::as_slice)
                    .unwrap_or_default();
                self.matches_progress(records).then(|| RosterEntry {
                    employee,
                    summary: EmployeeSummary::from_records(employee.id.clone(), records),
                })
            })
            .collect();

        entries.sort_by(|a, b| self.compare(a, b));
        entries
    }
}
