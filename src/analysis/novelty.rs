//! Novelty classification by lifetime occurrence count.

use std::collections::{HashMap, HashSet};

use crate::domain::SnapshotStore;

/// Lifetime number of observations per entity, all currencies and dates.
#[must_use]
pub fn occurrence_counts(store: &SnapshotStore) -> HashMap<&str, usize> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for observation in store.all() {
        *counts.entry(observation.entity_id.as_str()).or_insert(0) += 1;
    }
    counts
}

/// Entities observed at most `threshold` times over the whole log.
///
/// The threshold is inclusive: an entity seen exactly `threshold` times is
/// still new.
#[must_use]
pub fn novel_entities(store: &SnapshotStore, threshold: usize) -> HashSet<String> {
    occurrence_counts(store)
        .into_iter()
        .filter(|&(_, count)| count <= threshold)
        .map(|(entity, _)| entity.to_string())
        .collect()
}
