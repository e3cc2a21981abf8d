//! Analysis engine: streaks, novelty, day-over-day changes and reporting.
//!
//! Every function here is a pure projection of a [`SnapshotStore`]: it
//! reads the store, never mutates it, and returns owned results. Thresholds
//! are passed in through [`AnalysisConfig`] rather than read from globals.
//!
//! ```text
//! SnapshotStore
//!     │
//!     ├── novelty     (lifetime occurrence counts)
//!     ├── streak      (days at current quantity, variation)
//!     │       │
//!     │       └── aggregator ── EntityState per key ── report (summary, ranking)
//!     │
//!     └── differ      (two most recent dates → ChangeEvent stream)
//! ```

pub mod aggregator;
pub mod differ;
pub mod metrics;
pub mod novelty;
pub mod report;
pub mod streak;

use std::collections::BTreeMap;

use serde::Serialize;

use crate::domain::{ChangeEvent, EntityKey, EntityState, SnapshotStore};
use report::SnapshotSummary;

/// Default lifetime occurrence count at or below which an entity is new.
pub const DEFAULT_NOVELTY_THRESHOLD: usize = 7;

/// Default day-over-day percent change that counts as a large swing.
pub const DEFAULT_SWING_THRESHOLD_PCT: f64 = 20.0;

/// Thresholds threaded into every analysis entry point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AnalysisConfig {
    /// Entities observed at most this many times are new.
    pub novelty_threshold: usize,
    /// Minimum absolute percent change reported as a large swing.
    pub swing_threshold_pct: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            novelty_threshold: DEFAULT_NOVELTY_THRESHOLD,
            swing_threshold_pct: DEFAULT_SWING_THRESHOLD_PCT,
        }
    }
}

/// Complete output of one analysis run.
#[derive(Debug, Clone)]
pub struct AnalysisRun {
    /// Current state per key active on the latest date.
    pub states: BTreeMap<EntityKey, EntityState>,
    /// Day-over-day changes, ordered by key.
    pub events: Vec<ChangeEvent>,
    /// Headline metrics.
    pub summary: SnapshotSummary,
}

/// Runs the whole pipeline once over `store`.
#[must_use]
pub fn run(store: &SnapshotStore, config: &AnalysisConfig) -> AnalysisRun {
    let states = aggregator::build_current_state(store, config);
    let events = differ::diff_latest(store, config.swing_threshold_pct);
    let summary = report::summarize(store, &states);
    tracing::info!(
        observations = store.len(),
        entities = states.len(),
        events = events.len(),
        "analysis complete"
    );
    AnalysisRun {
        states,
        events,
        summary,
    }
}
