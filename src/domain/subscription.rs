//! Per-subscriber change filter.
//!
//! Tracks which entity keys and change kinds a subscriber wants to hear
//! about and selects the matching [`ChangeEvent`]s. Delivery of the
//! selected events is left to the notification transport.

use std::collections::HashSet;

use super::{ChangeEvent, ChangeKind, EntityKey};

/// Notification preferences of a single subscriber.
#[derive(Debug, Clone, Default)]
pub struct SubscriberPreferences {
    /// Favorite entity keys. Ignored when `all_entities` is set.
    favorites: HashSet<EntityKey>,
    /// Opted-in change kinds. Empty means offers starting only.
    kinds: HashSet<ChangeKind>,
    /// Whether the subscriber follows every entity.
    all_entities: bool,
}

impl SubscriberPreferences {
    /// Creates preferences with no favorites and the default kinds.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds favorite keys. `wildcard` follows every entity.
    pub fn follow(&mut self, keys: &[EntityKey], wildcard: bool) {
        if wildcard {
            self.all_entities = true;
        }
        for key in keys {
            self.favorites.insert(key.clone());
        }
    }

    /// Opts into an additional change kind.
    pub fn notify_on(&mut self, kind: ChangeKind) {
        self.kinds.insert(kind);
    }

    /// Returns `true` if the subscriber wants `event`.
    #[must_use]
    pub fn matches(&self, event: &ChangeEvent) -> bool {
        let entity_ok = self.all_entities || self.favorites.contains(event.key());
        let kind_ok = if self.kinds.is_empty() {
            event.kind() == ChangeKind::GainedFlag
        } else {
            self.kinds.contains(&event.kind())
        };
        entity_ok && kind_ok
    }

    /// Selects the events this subscriber wants, preserving order.
    #[must_use]
    pub fn select<'a>(&self, events: &'a [ChangeEvent]) -> Vec<&'a ChangeEvent> {
        events.iter().filter(|e| self.matches(e)).collect()
    }
}
