//! Day-over-day differ: classifies what changed between two snapshot dates.

use std::collections::BTreeSet;

use chrono::NaiveDate;

use super::metrics::percent_change;
use crate::domain::{ChangeEvent, EntityKey, Observation, SnapshotStore};

/// Diffs the two most recent distinct dates of the store.
///
/// Returns an empty list when the store has fewer than two dates: there is
/// nothing to compare yet, which callers report as a normal state.
#[must_use]
pub fn diff_latest(store: &SnapshotStore, swing_threshold_pct: f64) -> Vec<ChangeEvent> {
    let Some((today, yesterday)) = store.latest_two_dates() else {
        tracing::debug!(dates = store.distinct_dates().len(), "not enough history to diff");
        return Vec::new();
    };
    diff_dates(store, today, yesterday, swing_threshold_pct)
}

/// Diffs the partitions of `today` and `yesterday`.
///
/// Each partition keeps one row per `(entity_id, currency)`: the latest of
/// the day, first-seen among rows sharing that timestamp.
/// At most one event is emitted per key, ordered by key. Flag transitions
/// are checked before the quantity swing, so a key that both loses its
/// offer and swings only reports the flag change.
#[must_use]
pub fn diff_dates(
    store: &SnapshotStore,
    today: NaiveDate,
    yesterday: NaiveDate,
    swing_threshold_pct: f64,
) -> Vec<ChangeEvent> {
    let current = store.partition(today);
    let previous = store.partition(yesterday);

    let keys: BTreeSet<&EntityKey> = current.keys().chain(previous.keys()).collect();
    let mut events = Vec::new();

    for key in keys {
        let event = match (current.get(key), previous.get(key)) {
            (Some(now), None) => Some(arrival(store, key, now, today.min(yesterday))),
            (None, Some(before)) => Some(ChangeEvent::Disappeared {
                key: key.clone(),
                previous_quantity: before.quantity,
                has_flag: before.has_flag,
            }),
            (Some(now), Some(before)) => compare(key, now, before, swing_threshold_pct),
            (None, None) => None,
        };
        events.extend(event);
    }

    tracing::debug!(%today, %yesterday, events = events.len(), "day-over-day diff complete");
    events
}

/// Classifies a key that is present today but not yesterday.
fn arrival(
    store: &SnapshotStore,
    key: &EntityKey,
    now: &Observation,
    cutoff: NaiveDate,
) -> ChangeEvent {
    if store.seen_before(key, cutoff) {
        ChangeEvent::AppearedAgain {
            key: key.clone(),
            current_quantity: now.quantity,
            has_flag: now.has_flag,
        }
    } else {
        ChangeEvent::NewEntity {
            key: key.clone(),
            current_quantity: now.quantity,
            has_flag: now.has_flag,
        }
    }
}

/// Classifies a key present on both dates.
fn compare(
    key: &EntityKey,
    now: &Observation,
    before: &Observation,
    swing_threshold_pct: f64,
) -> Option<ChangeEvent> {
    match (before.has_flag, now.has_flag) {
        (false, true) => Some(ChangeEvent::GainedFlag {
            key: key.clone(),
            current_quantity: now.quantity,
            previous_quantity: before.quantity,
        }),
        (true, false) => Some(ChangeEvent::LostFlag {
            key: key.clone(),
            current_quantity: now.quantity,
            previous_quantity: before.quantity,
        }),
        _ => {
            let variation = percent_change(now.quantity, before.quantity);
            (before.quantity != 0.0 && variation.abs() >= swing_threshold_pct).then(|| {
                ChangeEvent::LargeSwing {
                    key: key.clone(),
                    current_quantity: now.quantity,
                    previous_quantity: before.quantity,
                    variation_percent: variation,
                    has_flag: now.has_flag,
                }
            })
        }
    }
}
