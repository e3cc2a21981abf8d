//! Radar service: owns the snapshot store and runs analyses over it.

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::analysis::report::{self, SnapshotSummary};
use crate::analysis::{AnalysisConfig, aggregator, differ};
use crate::domain::{
    ChangeEvent, ChangeKind, EntityKey, EntityState, IngestReport, RawObservation, SnapshotStore,
    SubscriberPreferences,
};
use crate::error::RadarError;

/// Orchestration layer between the HTTP handlers and the analysis engine.
///
/// Holds the [`SnapshotStore`] behind a `tokio::sync::RwLock`. Ingestion
/// takes the write lock; every analysis takes the read lock for its whole
/// run, so a run always sees one consistent snapshot of the log.
#[derive(Debug, Clone)]
pub struct RadarService {
    store: Arc<RwLock<SnapshotStore>>,
    config: AnalysisConfig,
}

impl RadarService {
    /// Creates a service over an existing store.
    #[must_use]
    pub fn new(store: SnapshotStore, config: AnalysisConfig) -> Self {
        Self {
            store: Arc::new(RwLock::new(store)),
            config,
        }
    }

    /// Returns the thresholds used by every run.
    #[must_use]
    pub const fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Validates and appends a batch of raw rows.
    ///
    /// # Errors
    ///
    /// Returns [`RadarError::InvalidRequest`] for an empty batch. Malformed
    /// rows do not fail the batch; they are counted in the report.
    pub async fn ingest(&self, rows: Vec<RawObservation>) -> Result<IngestReport, RadarError> {
        if rows.is_empty() {
            return Err(RadarError::InvalidRequest(
                "observation batch is empty".to_string(),
            ));
        }
        let mut store = self.store.write().await;
        let report = store.ingest(rows);
        tracing::info!(
            accepted = report.accepted,
            rejected = report.rejected.len(),
            total = store.len(),
            "observations ingested"
        );
        Ok(report)
    }

    /// Number of stored observations.
    pub async fn observation_count(&self) -> usize {
        self.store.read().await.len()
    }

    /// Current state of every key active on the latest date, ordered by key.
    pub async fn current_states(&self) -> Vec<EntityState> {
        let store = self.store.read().await;
        aggregator::build_current_state(&store, &self.config)
            .into_values()
            .collect()
    }

    /// Current state of a single key.
    ///
    /// # Errors
    ///
    /// Returns [`RadarError::EntityNotFound`] if the key is not active on
    /// the latest date, or [`RadarError::EmptyStore`] before any ingestion.
    pub async fn entity_state(&self, key: &EntityKey) -> Result<EntityState, RadarError> {
        let store = self.store.read().await;
        aggregator::current_state_of(&store, &self.config, key)
    }

    /// Day-over-day changes, optionally restricted to one kind.
    pub async fn changes(&self, kind: Option<ChangeKind>) -> Vec<ChangeEvent> {
        let store = self.store.read().await;
        let events = differ::diff_latest(&store, self.config.swing_threshold_pct);
        match kind {
            Some(kind) => events.into_iter().filter(|e| e.kind() == kind).collect(),
            None => events,
        }
    }

    /// Day-over-day changes selected by a subscriber's preferences.
    pub async fn changes_for(&self, preferences: &SubscriberPreferences) -> Vec<ChangeEvent> {
        let events = self.changes(None).await;
        let selected: Vec<ChangeEvent> = preferences
            .select(&events)
            .into_iter()
            .cloned()
            .collect();
        tracing::debug!(
            total = events.len(),
            selected = selected.len(),
            "changes filtered for subscriber"
        );
        selected
    }

    /// Top `limit` keys by ratio.
    pub async fn ranking(&self, limit: usize, flagged_only: bool) -> Vec<EntityState> {
        let store = self.store.read().await;
        let states = aggregator::build_current_state(&store, &self.config);
        report::rank_by_ratio(states.values(), limit, flagged_only)
            .into_iter()
            .cloned()
            .collect()
    }

    /// Headline metrics of the latest snapshot.
    pub async fn summary(&self) -> SnapshotSummary {
        let store = self.store.read().await;
        let states = aggregator::build_current_state(&store, &self.config);
        report::summarize(&store, &states)
    }
}

impl Default for RadarService {
    fn default() -> Self {
        Self::new(SnapshotStore::new(), AnalysisConfig::default())
    }
}
