//! Append-only snapshot log held in memory.
//!
//! [`SnapshotStore`] keeps every accepted [`Observation`] in an arena in
//! arrival order and indexes it per [`EntityKey`] and per calendar date.
//! Nothing is ever removed or rewritten: analysis runs read the store as
//! an immutable snapshot.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use chrono::NaiveDate;
use serde::Serialize;

use super::{EntityKey, Observation, RawObservation};

/// Outcome of ingesting a batch of raw rows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IngestReport {
    /// Rows admitted to the store.
    pub accepted: usize,
    /// Reasons for every rejected row, in batch order.
    pub rejected: Vec<String>,
}

/// In-memory, append-only collection of observations.
///
/// Duplicate `(entity_id, currency, timestamp)` rows are kept. Readers that
/// need a single row per key and date pick the one with the latest
/// timestamp, and the first one that arrived among rows sharing it.
#[derive(Debug, Clone, Default)]
pub struct SnapshotStore {
    observations: Vec<Observation>,
    by_key: HashMap<EntityKey, Vec<usize>>,
    dates: BTreeSet<NaiveDate>,
}

impl SnapshotStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store from already validated rows, preserving their order.
    #[must_use]
    pub fn from_observations(observations: impl IntoIterator<Item = Observation>) -> Self {
        let mut store = Self::new();
        for observation in observations {
            store.push(observation);
        }
        store
    }

    /// Appends one validated row.
    pub fn push(&mut self, observation: Observation) {
        let index = self.observations.len();
        self.dates.insert(observation.date());
        self.by_key.entry(observation.key()).or_default().push(index);
        self.observations.push(observation);
    }

    /// Validates and appends a batch of raw rows.
    ///
    /// Rows that fail validation are skipped and reported; the rest of the
    /// batch is still admitted.
    pub fn ingest(&mut self, rows: impl IntoIterator<Item = RawObservation>) -> IngestReport {
        let mut report = IngestReport::default();
        for raw in rows {
            match Observation::try_from(raw) {
                Ok(observation) => {
                    self.push(observation);
                    report.accepted += 1;
                }
                Err(rejection) => {
                    tracing::warn!(reason = %rejection, "observation rejected");
                    report.rejected.push(rejection.to_string());
                }
            }
        }
        report
    }

    /// All observations in arrival order.
    #[must_use]
    pub fn all(&self) -> &[Observation] {
        &self.observations
    }

    /// Number of stored observations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.observations.len()
    }

    /// Returns `true` if nothing has been ingested yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// Observations of `key`, most recent first.
    ///
    /// Rows sharing a timestamp keep their arrival order, so the first-seen
    /// duplicate is the one reported as most recent.
    #[must_use]
    pub fn history(&self, key: &EntityKey) -> Vec<&Observation> {
        let mut rows: Vec<&Observation> = self
            .by_key
            .get(key)
            .map(|indices| {
                indices
                    .iter()
                    .filter_map(|&i| self.observations.get(i))
                    .collect()
            })
            .unwrap_or_default();
        rows.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        rows
    }

    /// Distinct observation dates in ascending order.
    #[must_use]
    pub fn distinct_dates(&self) -> &BTreeSet<NaiveDate> {
        &self.dates
    }

    /// Most recent observation date.
    #[must_use]
    pub fn latest_date(&self) -> Option<NaiveDate> {
        self.dates.last().copied()
    }

    /// The two most recent distinct dates as `(today, yesterday)`.
    ///
    /// "Yesterday" is the previous date present in the log, which need not
    /// be the previous calendar day.
    #[must_use]
    pub fn latest_two_dates(&self) -> Option<(NaiveDate, NaiveDate)> {
        let mut recent = self.dates.iter().rev();
        let today = *recent.next()?;
        let yesterday = *recent.next()?;
        Some((today, yesterday))
    }

    /// Rows observed on `date`, one per key.
    ///
    /// The row with the latest timestamp of the day represents the key,
    /// following the ordering of [`Self::history`]. Among rows sharing that
    /// timestamp the first-seen one wins.
    #[must_use]
    pub fn partition(&self, date: NaiveDate) -> BTreeMap<EntityKey, &Observation> {
        let mut rows: BTreeMap<EntityKey, &Observation> = BTreeMap::new();
        for observation in self.observations.iter().filter(|o| o.date() == date) {
            rows.entry(observation.key())
                .and_modify(|kept| {
                    if observation.timestamp > kept.timestamp {
                        *kept = observation;
                    }
                })
                .or_insert(observation);
        }
        rows
    }

    /// Returns `true` if `key` was observed on any date before `date`.
    #[must_use]
    pub fn seen_before(&self, key: &EntityKey, date: NaiveDate) -> bool {
        self.by_key.get(key).is_some_and(|indices| {
            indices
                .iter()
                .filter_map(|&i| self.observations.get(i))
                .any(|o| o.date() < date)
        })
    }
}
