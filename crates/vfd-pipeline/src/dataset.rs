//! Empty-state taxonomy for the filtered dataset.
//!
//! "No data" is a state, not an error — but the remedy differs depending
//! on whether the fetch came back empty ("check connection") or the
//! filters emptied a non-empty snapshot ("adjust filters"). Aggregates
//! are only reachable through [`FilteredSet`], which is non-empty by
//! construction, so no consumer can divide by zero or chart an empty
//! group.

use chrono::{DateTime, Utc};
use serde::Serialize;

use vfd_core::{FeedbackRecord, Snapshot};

use crate::aggregate::{summarize, Summary};
use crate::filter::{apply, FilterParams};

/// Why the current view has no rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyCause {
    /// The fetch itself yielded nothing (empty table, unconfigured
    /// backend, or a swallowed fetch failure — see the snapshot origin).
    SourceEmpty,
    /// The snapshot had rows, but the current filters excluded them all.
    FiltersExhausted,
}

/// Result of running the pipeline over a snapshot.
#[derive(Debug, Clone)]
pub enum FilterOutcome {
    Rows(FilteredSet),
    Empty(EmptyCause),
}

impl FilterOutcome {
    #[must_use]
    pub fn rows(&self) -> Option<&FilteredSet> {
        match self {
            FilterOutcome::Rows(set) => Some(set),
            FilterOutcome::Empty(_) => None,
        }
    }
}

/// A non-empty filtered view. The only entry point to aggregates.
#[derive(Debug, Clone)]
pub struct FilteredSet {
    records: Vec<FeedbackRecord>,
}

impl FilteredSet {
    #[must_use]
    pub fn records(&self) -> &[FeedbackRecord] {
        &self.records
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Always false; kept so slices and sets read the same at call sites.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }

    #[must_use]
    pub fn summary(&self) -> Summary {
        summarize(&self.records)
    }

    /// Records newest-first, the order the tabular view wants.
    #[must_use]
    pub fn newest_first(&self) -> Vec<FeedbackRecord> {
        let mut sorted = self.records.clone();
        sorted.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        sorted
    }
}

/// Runs the full pipeline over a snapshot.
#[must_use]
pub fn run(snapshot: &Snapshot, params: &FilterParams, now: DateTime<Utc>) -> FilterOutcome {
    if snapshot.records.is_empty() {
        return FilterOutcome::Empty(EmptyCause::SourceEmpty);
    }
    let records = apply(&snapshot.records, params, now);
    if records.is_empty() {
        tracing::debug!(
            window_days = params.effective_window_days(),
            brands = params.brands.len(),
            categories = params.categories.len(),
            "filters excluded every record"
        );
        return FilterOutcome::Empty(EmptyCause::FiltersExhausted);
    }
    FilterOutcome::Rows(FilteredSet { records })
}
