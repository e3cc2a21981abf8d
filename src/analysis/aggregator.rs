//! Aggregator: the per-entity current state view.
//!
//! Joins streak figures and novelty onto the rows of the latest snapshot
//! date. Every key active today gets a complete [`EntityState`], even when
//! its streak could not be determined.

use std::collections::{BTreeMap, HashMap};

use super::metrics::format_unit_value;
use super::streak::{self, StreakStats};
use super::{AnalysisConfig, novelty};
use crate::domain::{EntityKey, EntityState, Observation, SnapshotStore};
use crate::error::RadarError;

/// Builds the state of every key active on the latest date.
///
/// When the latest date holds several rows for a key, the latest scrape of
/// the day supplies quantity, flag and unit value, the same row the streak
/// scans treat as current. Rows sharing that timestamp resolve first-seen.
#[must_use]
pub fn build_current_state(
    store: &SnapshotStore,
    config: &AnalysisConfig,
) -> BTreeMap<EntityKey, EntityState> {
    let Some(latest_date) = store.latest_date() else {
        return BTreeMap::new();
    };
    let streaks = streak::analyze_all(store);
    let counts = novelty::occurrence_counts(store);
    let novel = novelty::novel_entities(store, config.novelty_threshold);

    store
        .partition(latest_date)
        .into_iter()
        .map(|(key, row)| {
            let stats = streaks.get(&key).copied().unwrap_or_default();
            let occurrences = counts.get(row.entity_id.as_str()).copied().unwrap_or(0);
            let is_new = novel.contains(&row.entity_id);
            let state = project(row, &stats, is_new, occurrences);
            (key, state)
        })
        .collect()
}

/// Builds the state of a single key.
///
/// # Errors
///
/// Returns [`RadarError::EmptyStore`] on an empty store and
/// [`RadarError::EntityNotFound`] if `key` is not active on the latest
/// date.
pub fn current_state_of(
    store: &SnapshotStore,
    config: &AnalysisConfig,
    key: &EntityKey,
) -> Result<EntityState, RadarError> {
    let stats = streak::analyze_entity(store, key)?;
    let latest_date = store.latest_date().ok_or(RadarError::EmptyStore)?;
    let partition = store.partition(latest_date);
    let row = partition
        .get(key)
        .ok_or_else(|| RadarError::EntityNotFound {
            key: key.clone(),
            date: latest_date,
        })?;

    let counts: HashMap<&str, usize> = novelty::occurrence_counts(store);
    let occurrences = counts.get(key.entity_id.as_str()).copied().unwrap_or(0);
    Ok(project(
        row,
        &stats,
        occurrences <= config.novelty_threshold,
        occurrences,
    ))
}

fn project(row: &Observation, stats: &StreakStats, is_new: bool, occurrences: usize) -> EntityState {
    EntityState {
        entity_id: row.entity_id.clone(),
        currency: row.currency.clone(),
        current_quantity: row.quantity,
        unit_value: row.unit_value,
        ratio: row.ratio(),
        display_value: format_unit_value(&row.currency, row.unit_value),
        has_flag: row.has_flag,
        days_at_current_quantity: stats.days_at_current_quantity.max(1),
        previous_quantity: stats.previous_quantity,
        days_since_change: stats.days_since_change,
        variation_percent: stats.variation_percent,
        is_new,
        occurrences,
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::analysis::metrics::percent_change;
    use crate::domain::snapshot_store::tests::{obs, obs_at};

    fn config() -> AnalysisConfig {
        AnalysisConfig::default()
    }

    #[test]
    fn only_keys_active_today_are_listed() {
        let store = SnapshotStore::from_observations([
            obs("Acme", 1, 10.0, false),
            obs("Beta", 1, 5.0, false),
            obs("Acme", 2, 15.0, true),
        ]);
        let states = build_current_state(&store, &config());
        let keys: Vec<String> = states.keys().map(ToString::to_string).collect();
        assert_eq!(keys, vec!["Acme|BRL".to_string()]);
    }

    #[test]
    fn state_joins_streak_and_novelty() {
        let store = SnapshotStore::from_observations([
            obs("Acme", 1, 10.0, false),
            obs("Acme", 3, 10.0, false),
            obs("Acme", 5, 15.0, true),
        ]);
        let states = build_current_state(&store, &config());
        let Some(acme) = states.get(&EntityKey::new("Acme", "BRL")) else {
            panic!("Acme missing");
        };
        assert_eq!(acme.days_at_current_quantity, 1);
        assert_eq!(acme.previous_quantity, Some(10.0));
        assert!((acme.variation_percent - 50.0).abs() < 1e-9);
        assert!(acme.has_flag);
        assert!(acme.is_new);
        assert_eq!(acme.occurrences, 3);
        assert!((acme.ratio - 15.0).abs() < 1e-9);
        assert_eq!(acme.display_value, "R$ 1,00");
    }

    #[test]
    fn novelty_threshold_is_a_parameter() {
        let store = SnapshotStore::from_observations([
            obs("Acme", 1, 10.0, false),
            obs("Acme", 2, 10.0, false),
            obs("Acme", 3, 10.0, false),
        ]);
        let strict = AnalysisConfig {
            novelty_threshold: 2,
            ..AnalysisConfig::default()
        };
        let states = build_current_state(&store, &strict);
        let Some(acme) = states.get(&EntityKey::new("Acme", "BRL")) else {
            panic!("Acme missing");
        };
        assert!(!acme.is_new);
        assert_eq!(acme.days_at_current_quantity, 3);
    }

    #[test]
    fn duplicate_rows_today_first_seen_wins() {
        let store = SnapshotStore::from_observations([
            obs("Acme", 1, 10.0, false),
            obs("Acme", 2, 12.0, true),
            obs("Acme", 2, 99.0, false),
        ]);
        let states = build_current_state(&store, &config());
        let Some(acme) = states.get(&EntityKey::new("Acme", "BRL")) else {
            panic!("Acme missing");
        };
        assert!((acme.current_quantity - 12.0).abs() < 1e-9);
        assert!(acme.has_flag);
    }

    #[test]
    fn intraday_rows_use_the_latest_scrape() {
        let store = SnapshotStore::from_observations([
            obs_at("Acme", "BRL", 1, 10, 10.0, false),
            obs_at("Acme", "BRL", 2, 8, 10.0, false),
            obs_at("Acme", "BRL", 2, 18, 15.0, true),
        ]);
        let key = EntityKey::new("Acme", "BRL");
        let states = build_current_state(&store, &config());
        let Some(acme) = states.get(&key) else {
            panic!("Acme missing");
        };
        assert!((acme.current_quantity - 15.0).abs() < 1e-9);
        assert!(acme.has_flag);
        assert_eq!(acme.previous_quantity, Some(10.0));
        let Some(previous) = acme.previous_quantity else {
            panic!("previous quantity expected");
        };
        let expected = percent_change(acme.current_quantity, previous);
        assert!((acme.variation_percent - expected).abs() < 1e-9);
        assert!((acme.variation_percent - 50.0).abs() < 1e-9);
        assert_eq!(acme.days_at_current_quantity, 1);

        let Ok(single) = current_state_of(&store, &config(), &key) else {
            panic!("lookup failed");
        };
        assert_eq!(&single, acme);
    }

    #[test]
    fn novelty_counts_all_currencies_of_the_entity() {
        let mut rows = Vec::new();
        for day in 1..=4 {
            rows.push(obs_at("Acme", "BRL", day, 10, 3.0, false));
            rows.push(obs_at("Acme", "USD", day, 10, 6.0, false));
        }
        let store = SnapshotStore::from_observations(rows);
        let states = build_current_state(&store, &config());
        assert_eq!(states.len(), 2);
        assert!(states.values().all(|s| !s.is_new && s.occurrences == 8));
    }

    #[test]
    fn single_lookup_matches_bulk_view() {
        let store = SnapshotStore::from_observations([
            obs("Acme", 1, 10.0, false),
            obs("Acme", 2, 12.0, true),
            obs("Beta", 2, 3.0, false),
        ]);
        let key = EntityKey::new("Acme", "BRL");
        let bulk = build_current_state(&store, &config());
        let Ok(single) = current_state_of(&store, &config(), &key) else {
            panic!("lookup failed");
        };
        assert_eq!(bulk.get(&key), Some(&single));
    }

    #[test]
    fn single_lookup_of_inactive_key_fails() {
        let store = SnapshotStore::from_observations([
            obs("Acme", 1, 10.0, false),
            obs("Beta", 2, 3.0, false),
        ]);
        let result = current_state_of(&store, &config(), &EntityKey::new("Acme", "BRL"));
        assert!(matches!(result, Err(RadarError::EntityNotFound { .. })));
    }

    #[test]
    fn empty_store_has_empty_view() {
        assert!(build_current_state(&SnapshotStore::new(), &config()).is_empty());
    }
}
