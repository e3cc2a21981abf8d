//! Streak analysis: how long each entity has held its current quantity.
//!
//! Two scans run over an entity's history, most recent first:
//!
//! 1. **Streak scan.** Looks only at rows strictly older than the latest
//!    timestamp and finds where the current run of equal quantities
//!    started. The streak length counts calendar days, both ends included.
//! 2. **Variation scan.** Skips only the latest row and finds the most
//!    recent differing quantity, which becomes `previous_quantity`. The
//!    elapsed time is measured between timestamps in whole days.
//!
//! The scans cover different windows and are kept separate: when several
//! rows share the latest timestamp, the variation scan sees them and the
//! streak scan does not.

use std::collections::BTreeMap;

use serde::Serialize;

use super::metrics::percent_change;
use crate::domain::{EntityKey, Observation, SnapshotStore};
use crate::error::RadarError;

/// Streak figures of a single entity key.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StreakStats {
    /// Consecutive days at the current quantity, at least 1.
    pub days_at_current_quantity: u32,
    /// Most recent differing quantity found by the variation scan.
    pub previous_quantity: Option<f64>,
    /// Whole days between the latest row and `previous_quantity`'s row.
    pub days_since_change: u32,
    /// Signed percent change from `previous_quantity`; 0 without one.
    pub variation_percent: f64,
}

impl StreakStats {
    /// Figures for an entity with no usable history: one day, no change.
    #[must_use]
    pub const fn first_day() -> Self {
        Self {
            days_at_current_quantity: 1,
            previous_quantity: None,
            days_since_change: 0,
            variation_percent: 0.0,
        }
    }
}

impl Default for StreakStats {
    fn default() -> Self {
        Self::first_day()
    }
}

/// Computes streak figures from a history sorted most recent first.
#[must_use]
pub fn analyze_history(history: &[&Observation]) -> StreakStats {
    let [latest, rest @ ..] = history else {
        return StreakStats::first_day();
    };
    if rest.is_empty() {
        return StreakStats::first_day();
    }
    let current = latest.quantity;

    let days_at_current_quantity = streak_days(latest, history);

    let mut stats = StreakStats {
        days_at_current_quantity,
        ..StreakStats::first_day()
    };
    if let Some(changed) = rest.iter().find(|o| o.quantity != current) {
        let elapsed = latest
            .timestamp
            .signed_duration_since(changed.timestamp)
            .num_days();
        stats.previous_quantity = Some(changed.quantity);
        stats.variation_percent = percent_change(current, changed.quantity);
        stats.days_since_change = to_days(elapsed.max(0));
    }
    stats
}

/// Streak scan over the rows strictly older than `latest`.
///
/// The run starts at the row right after the most recent differing row,
/// the first scrape showing the current quantity, rather than at the
/// differing row itself. For `[(d1,10),(d3,10),(d5,15)]` this yields one
/// day, where counting from the differing row would yield three.
fn streak_days(latest: &Observation, history: &[&Observation]) -> u32 {
    let older: Vec<&Observation> = history
        .iter()
        .copied()
        .filter(|o| o.timestamp < latest.timestamp)
        .collect();

    let start = match older.iter().position(|o| o.quantity != latest.quantity) {
        // The run began on the row right after the differing one.
        Some(0) => Some(latest),
        Some(pos) => pos.checked_sub(1).and_then(|i| older.get(i)).copied(),
        None => older.last().copied(),
    };

    let Some(start) = start else {
        return 1;
    };
    let span = (latest.date() - start.date()).num_days() + 1;
    to_days(span.max(1))
}

fn to_days(days: i64) -> u32 {
    u32::try_from(days).unwrap_or(u32::MAX)
}

/// Computes streak figures for one key that must be active on the latest
/// date.
///
/// # Errors
///
/// Returns [`RadarError::EmptyStore`] if the store holds nothing, and
/// [`RadarError::EntityNotFound`] if `key` has no observation on the
/// latest date.
pub fn analyze_entity(store: &SnapshotStore, key: &EntityKey) -> Result<StreakStats, RadarError> {
    let latest_date = store.latest_date().ok_or(RadarError::EmptyStore)?;
    let history = store.history(key);
    match history.first() {
        Some(latest) if latest.date() == latest_date => Ok(analyze_history(&history)),
        _ => Err(RadarError::EntityNotFound {
            key: key.clone(),
            date: latest_date,
        }),
    }
}

/// Computes streak figures for every key active on the latest date.
///
/// Keys absent from the latest date are left out.
#[must_use]
pub fn analyze_all(store: &SnapshotStore) -> BTreeMap<EntityKey, StreakStats> {
    let Some(latest_date) = store.latest_date() else {
        return BTreeMap::new();
    };
    let streaks: BTreeMap<EntityKey, StreakStats> = store
        .partition(latest_date)
        .into_keys()
        .map(|key| {
            let stats = analyze_history(&store.history(&key));
            (key, stats)
        })
        .collect();
    tracing::debug!(%latest_date, keys = streaks.len(), "streaks computed");
    streaks
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::snapshot_store::tests::{obs, obs_at};

    fn acme() -> EntityKey {
        EntityKey::new("Acme", "BRL")
    }

    fn stats_for(rows: Vec<Observation>) -> StreakStats {
        let store = SnapshotStore::from_observations(rows);
        let Ok(stats) = analyze_entity(&store, &acme()) else {
            panic!("Acme should be active on the latest date");
        };
        stats
    }

    #[test]
    fn change_on_latest_day_starts_a_new_streak() {
        let stats = stats_for(vec![
            obs("Acme", 1, 10.0, false),
            obs("Acme", 3, 10.0, false),
            obs("Acme", 5, 15.0, false),
        ]);
        assert_eq!(stats.days_at_current_quantity, 1);
        assert_eq!(stats.previous_quantity, Some(10.0));
        assert!((stats.variation_percent - 50.0).abs() < 1e-9);
        assert_eq!(stats.days_since_change, 2);
    }

    #[test]
    fn single_observation_is_a_one_day_streak() {
        let stats = stats_for(vec![obs("Acme", 4, 10.0, true)]);
        assert_eq!(stats, StreakStats::first_day());
    }

    #[test]
    fn constant_history_spans_first_to_last_date() {
        let stats = stats_for(vec![
            obs("Acme", 2, 10.0, false),
            obs("Acme", 3, 10.0, false),
            obs("Acme", 9, 10.0, false),
        ]);
        assert_eq!(stats.days_at_current_quantity, 8);
        assert_eq!(stats.previous_quantity, None);
        assert_eq!(stats.variation_percent, 0.0);
        assert_eq!(stats.days_since_change, 0);
    }

    #[test]
    fn streak_starts_after_last_differing_row() {
        let stats = stats_for(vec![
            obs("Acme", 1, 5.0, false),
            obs("Acme", 2, 10.0, false),
            obs("Acme", 3, 10.0, false),
            obs("Acme", 4, 10.0, false),
        ]);
        assert_eq!(stats.days_at_current_quantity, 3);
        assert_eq!(stats.previous_quantity, Some(5.0));
        assert!((stats.variation_percent - 100.0).abs() < 1e-9);
        assert_eq!(stats.days_since_change, 3);
    }

    #[test]
    fn revert_to_older_value_counts_from_the_revert() {
        let stats = stats_for(vec![
            obs("Acme", 1, 10.0, false),
            obs("Acme", 2, 15.0, false),
            obs("Acme", 3, 10.0, false),
        ]);
        assert_eq!(stats.days_at_current_quantity, 1);
        assert_eq!(stats.previous_quantity, Some(15.0));
        assert!((stats.variation_percent + 100.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn days_since_change_uses_whole_elapsed_days() {
        let stats = stats_for(vec![
            obs_at("Acme", "BRL", 4, 12, 8.0, false),
            obs_at("Acme", "BRL", 5, 10, 10.0, false),
        ]);
        // 22 hours apart: one calendar day of streak span, zero whole days.
        assert_eq!(stats.days_at_current_quantity, 1);
        assert_eq!(stats.days_since_change, 0);
        assert_eq!(stats.previous_quantity, Some(8.0));
    }

    #[test]
    fn zero_previous_quantity_gives_zero_variation() {
        let stats = stats_for(vec![obs("Acme", 1, 0.0, false), obs("Acme", 2, 4.0, false)]);
        assert_eq!(stats.previous_quantity, Some(0.0));
        assert_eq!(stats.variation_percent, 0.0);
    }

    #[test]
    fn scans_diverge_on_rows_sharing_the_latest_timestamp() {
        // Two rows at the latest timestamp: the first-seen one is current.
        let stats = stats_for(vec![
            obs("Acme", 3, 10.0, false),
            obs("Acme", 5, 15.0, false),
            obs("Acme", 5, 12.0, false),
        ]);
        // Streak scan ignores the duplicate and finds the day-3 change.
        assert_eq!(stats.days_at_current_quantity, 1);
        // Variation scan stops at the duplicate.
        assert_eq!(stats.previous_quantity, Some(12.0));
        assert!((stats.variation_percent - 25.0).abs() < 1e-9);
        assert_eq!(stats.days_since_change, 0);
    }

    #[test]
    fn identical_duplicates_only_are_a_one_day_streak() {
        let stats = stats_for(vec![obs("Acme", 5, 15.0, false), obs("Acme", 5, 15.0, false)]);
        assert_eq!(stats, StreakStats::first_day());
    }

    #[test]
    fn entity_missing_today_is_not_found() {
        let store = SnapshotStore::from_observations([
            obs("Acme", 1, 10.0, false),
            obs("Beta", 2, 10.0, false),
        ]);
        let result = analyze_entity(&store, &acme());
        assert!(matches!(result, Err(RadarError::EntityNotFound { .. })));
    }

    #[test]
    fn empty_store_is_reported() {
        let result = analyze_entity(&SnapshotStore::new(), &acme());
        assert!(matches!(result, Err(RadarError::EmptyStore)));
    }

    #[test]
    fn analyze_all_skips_inactive_keys() {
        let store = SnapshotStore::from_observations([
            obs("Acme", 1, 10.0, false),
            obs("Beta", 1, 10.0, false),
            obs("Beta", 2, 12.0, false),
        ]);
        let all = analyze_all(&store);
        assert_eq!(all.len(), 1);
        assert!(all.contains_key(&EntityKey::new("Beta", "BRL")));
    }

    #[test]
    fn analysis_is_idempotent() {
        let store = SnapshotStore::from_observations([
            obs("Acme", 1, 10.0, false),
            obs("Acme", 2, 11.0, true),
            obs("Beta", 2, 3.0, false),
        ]);
        assert_eq!(analyze_all(&store), analyze_all(&store));
    }
}
