//! Snapshot data access.
//!
//! The analytics core never fetches data itself. A [`SnapshotSource`] hands it
//! one consistent, read-only copy of everything the dashboard shows.

use learnboard_common::{
    ContentItem, Employee, EntityId, Invitation, LearningLog, LearnboardError, ProgressRecord,
    Result,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, instrument};

/// Everything one dashboard computation reads
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DashboardSnapshot {
    pub employees: Vec<Employee>,
    pub contents: Vec<ContentItem>,
    pub progress_by_employee: BTreeMap<EntityId, Vec<ProgressRecord>>,
    pub invitations: Vec<Invitation>,
    pub logs: Vec<LearningLog>,
}

impl DashboardSnapshot {
    /// Progress records of one employee, empty when none exist
    pub fn records_of(&self, employee_id: &str) -> &[ProgressRecord] {
        self.progress_by_employee
            .get(employee_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn employee(&self, employee_id: &str) -> Option<&Employee> {
        self.employees.iter().find(|e| e.id == employee_id)
    }

    pub fn record_count(&self) -> usize {
        self.progress_by_employee.values().map(Vec::len).sum()
    }
}

/// Provides dashboard snapshots
#[cfg_attr(test, mockall::automock)]
pub trait SnapshotSource: Send + Sync {
    fn snapshot(&self) -> Result<DashboardSnapshot>;
}

/// In-memory source returning the same snapshot every time
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    snapshot: DashboardSnapshot,
}

impl StaticSource {
    pub fn new(snapshot: DashboardSnapshot) -> Self {
        Self { snapshot }
    }
}

impl SnapshotSource for StaticSource {
    fn snapshot(&self) -> Result<DashboardSnapshot> {
        Ok(self.snapshot.clone())
    }
}

/// Reads a snapshot exported as camelCase JSON
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SnapshotSource for JsonFileSource {
    #[instrument(skip(self), fields(path = %self.path.display()))]
    fn snapshot(&self) -> Result<DashboardSnapshot> {
        let contents = fs::read_to_string(&self.path).map_err(|e| {
            LearnboardError::data_source_with_source(
                format!("Failed to read snapshot {}", self.path.display()),
                e,
            )
        })?;
        let snapshot: DashboardSnapshot = serde_json::from_str(&contents).map_err(|e| {
            LearnboardError::data_source_with_source(
                format!("Malformed snapshot {}", self.path.display()),
                e,
            )
        })?;

        debug!(
            employees = snapshot.employees.len(),
            contents = snapshot.contents.len(),
            records = snapshot.record_count(),
            "Loaded dashboard snapshot"
        );
        Ok(snapshot)
    }
}
