//! Headline metrics and ratio ranking over the current state view.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::{EntityKey, EntityState, SnapshotStore};

/// Headline figures of the latest snapshot, compared with the previous one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SnapshotSummary {
    /// Most recent snapshot date.
    pub latest_date: Option<NaiveDate>,
    /// Previous distinct snapshot date.
    pub previous_date: Option<NaiveDate>,
    /// Keys active on the latest date.
    pub total_entities: usize,
    /// Keys with an active offer on the latest date.
    pub total_with_flag: usize,
    /// Share of keys with an offer on the latest date, in percent.
    pub flag_rate_percent: f64,
    /// Same share on the previous date.
    pub previous_flag_rate_percent: Option<f64>,
    /// Change in active keys versus the previous date.
    pub entity_delta: Option<i64>,
    /// Change in keys with an offer versus the previous date.
    pub flag_delta: Option<i64>,
    /// Keys active today whose entity is classified as new.
    pub new_entities: usize,
    /// Mean ratio over keys with an offer; 0 without any.
    pub mean_ratio_flagged: f64,
}

/// Computes the summary from the store and the current state view.
#[must_use]
pub fn summarize(
    store: &SnapshotStore,
    states: &BTreeMap<EntityKey, EntityState>,
) -> SnapshotSummary {
    let total_entities = states.len();
    let flagged: Vec<&EntityState> = states.values().filter(|s| s.has_flag).collect();
    let total_with_flag = flagged.len();
    let mean_ratio_flagged = if flagged.is_empty() {
        0.0
    } else {
        flagged.iter().map(|s| s.ratio).sum::<f64>() / flagged.len() as f64
    };

    let previous_date = store.latest_two_dates().map(|(_, yesterday)| yesterday);
    let previous = previous_date.map(|date| {
        let partition = store.partition(date);
        let with_flag = partition.values().filter(|o| o.has_flag).count();
        (partition.len(), with_flag)
    });

    SnapshotSummary {
        latest_date: store.latest_date(),
        previous_date,
        total_entities,
        total_with_flag,
        flag_rate_percent: share(total_with_flag, total_entities),
        previous_flag_rate_percent: previous.map(|(total, with_flag)| share(with_flag, total)),
        entity_delta: previous.map(|(total, _)| delta(total_entities, total)),
        flag_delta: previous.map(|(_, with_flag)| delta(total_with_flag, with_flag)),
        new_entities: states.values().filter(|s| s.is_new).count(),
        mean_ratio_flagged,
    }
}

fn share(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}

fn delta(now: usize, before: usize) -> i64 {
    let now = i64::try_from(now).unwrap_or(i64::MAX);
    let before = i64::try_from(before).unwrap_or(i64::MAX);
    now.saturating_sub(before)
}

/// Top `limit` states by ratio, highest first.
///
/// Ties are broken by entity name, then currency, so the ranking is stable
/// across runs.
#[must_use]
pub fn rank_by_ratio<'a>(
    states: impl IntoIterator<Item = &'a EntityState>,
    limit: usize,
    flagged_only: bool,
) -> Vec<&'a EntityState> {
    let mut ranked: Vec<&EntityState> = states
        .into_iter()
        .filter(|s| !flagged_only || s.has_flag)
        .collect();
    ranked.sort_by(|a, b| {
        b.ratio
            .partial_cmp(&a.ratio)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.entity_id.cmp(&b.entity_id))
            .then_with(|| a.currency.cmp(&b.currency))
    });
    ranked.truncate(limit);
    ranked
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::analysis::{AnalysisConfig, aggregator::build_current_state};
    use crate::domain::snapshot_store::tests::obs;

    fn store() -> SnapshotStore {
        SnapshotStore::from_observations([
            obs("Acme", 1, 10.0, true),
            obs("Beta", 1, 4.0, false),
            obs("Acme", 2, 10.0, true),
            obs("Beta", 2, 6.0, true),
            obs("Gamma", 2, 2.0, false),
            obs("Delta", 2, 6.0, false),
        ])
    }

    #[test]
    fn summary_compares_with_previous_date() {
        let store = store();
        let states = build_current_state(&store, &AnalysisConfig::default());
        let summary = summarize(&store, &states);

        assert_eq!(summary.total_entities, 4);
        assert_eq!(summary.total_with_flag, 2);
        assert!((summary.flag_rate_percent - 50.0).abs() < 1e-9);
        let Some(previous_rate) = summary.previous_flag_rate_percent else {
            panic!("previous rate expected");
        };
        assert!((previous_rate - 50.0).abs() < 1e-9);
        assert_eq!(summary.entity_delta, Some(2));
        assert_eq!(summary.flag_delta, Some(1));
        assert_eq!(summary.new_entities, 4);
        assert!((summary.mean_ratio_flagged - 8.0).abs() < 1e-9);
    }

    #[test]
    fn summary_without_previous_date() {
        let store = SnapshotStore::from_observations([obs("Acme", 1, 10.0, false)]);
        let states = build_current_state(&store, &AnalysisConfig::default());
        let summary = summarize(&store, &states);
        assert_eq!(summary.previous_date, None);
        assert_eq!(summary.entity_delta, None);
        assert_eq!(summary.mean_ratio_flagged, 0.0);
    }

    #[test]
    fn ranking_orders_by_ratio_then_name() {
        let store = store();
        let states = build_current_state(&store, &AnalysisConfig::default());
        let ranked = rank_by_ratio(states.values(), 3, false);
        let names: Vec<&str> = ranked.iter().map(|s| s.entity_id.as_str()).collect();
        assert_eq!(names, vec!["Acme", "Beta", "Delta"]);
    }

    #[test]
    fn ranking_can_keep_only_offers() {
        let store = store();
        let states = build_current_state(&store, &AnalysisConfig::default());
        let ranked = rank_by_ratio(states.values(), 10, true);
        assert_eq!(ranked.len(), 2);
        assert!(ranked.iter().all(|s| s.has_flag));
    }
}
