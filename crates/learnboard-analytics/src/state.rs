//! Last-write-wins publication of computed dashboard views.
//!
//! Every recomputation takes a generation number when it starts. A finished
//! view is only published if no newer generation has been published already,
//! so a slow, stale computation can never overwrite a fresher one. Readers get
//! a whole view or the previous whole view, never a mix.

use crate::aggregator::{AggregateResult, CompanyOverview, EmployeeSummary, ProgressAggregator};
use crate::bucketing::TimeRange;
use crate::invitation::{InvitationBook, StatusCounts};
use crate::source::SnapshotSource;
use arc_swap::ArcSwapOption;
use learnboard_common::Result;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, instrument, warn};

/// A complete, immutable set of dashboard numbers
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    pub generation: u64,
    pub range: TimeRange,
    pub aggregate: AggregateResult,
    pub overview: CompanyOverview,
    /// In employee order
    pub summaries: Vec<EmployeeSummary>,
    pub invitations: StatusCounts,
}

/// Holds the most recently published [`DashboardView`]
#[derive(Debug, Default)]
pub struct DashboardState {
    generation: AtomicU64,
    view: ArcSwapOption<DashboardView>,
}

impl DashboardState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve the next generation number
    pub fn begin(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Publish `view` unless a newer generation is already visible.
    ///
    /// Returns whether the view was published.
    pub fn publish(&self, view: DashboardView) -> bool {
        let generation = view.generation;
        let candidate = Arc::new(view);
        let previous = self.view.rcu(|current| match current {
            Some(existing) if existing.generation >= generation => Some(Arc::clone(existing)),
            _ => Some(Arc::clone(&candidate)),
        });

        let published = previous.map_or(true, |p| p.generation < generation);
        if published {
            debug!(generation, "Published dashboard view");
        } else {
            warn!(generation, "Discarded stale dashboard view");
        }
        published
    }

    /// The latest published view, if any
    pub fn current(&self) -> Option<Arc<DashboardView>> {
        self.view.load_full()
    }

    /// Fetch a snapshot, compute a view for `range` and publish it.
    ///
    /// Returns whether the computed view was published.
    #[instrument(skip(self, source, aggregator))]
    pub fn recompute(
        &self,
        source: &dyn SnapshotSource,
        aggregator: &ProgressAggregator,
        range: TimeRange,
    ) -> Result<bool> {
        let generation = self.begin();
        let snapshot = source.snapshot()?;

        let aggregate = aggregator.aggregate_company(
            &snapshot.progress_by_employee,
            &snapshot.employees,
            &snapshot.contents,
            range,
        );
        let overview = CompanyOverview::build(
            &snapshot.employees,
            &snapshot.progress_by_employee,
            &snapshot.contents,
        );
        let summaries = snapshot
            .employees
            .iter()
            .map(|e| EmployeeSummary::from_records(e.id.clone(), snapshot.records_of(&e.id)))
            .collect();
        let invitations =
            InvitationBook::new(snapshot.invitations).status_counts(aggregator.context().now);

        Ok(self.publish(DashboardView {
            generation,
            range,
            aggregate,
            overview,
            summaries,
            invitations,
        }))
    }
}
