//! Per-entity current state view.

use serde::Serialize;

use super::EntityKey;

/// Derived state of one entity key as of the latest snapshot date.
///
/// Pure projection of the snapshot log: rebuilt wholesale on every
/// analysis run and never stored.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntityState {
    /// Entity (partner) name.
    pub entity_id: String,
    /// Currency code of the quantity scale.
    pub currency: String,
    /// Quantity on the latest date.
    pub current_quantity: f64,
    /// Currency units the quantity refers to.
    pub unit_value: f64,
    /// `current_quantity / unit_value`, zero when the unit value is zero.
    pub ratio: f64,
    /// Unit value formatted for display (e.g. `R$ 1.000,00`).
    pub display_value: String,
    /// Offer flag on the latest date.
    pub has_flag: bool,
    /// Consecutive days at the current quantity (at least 1).
    pub days_at_current_quantity: u32,
    /// Most recent quantity that differs from the current one.
    pub previous_quantity: Option<f64>,
    /// Days since `previous_quantity` was observed; 0 without one.
    pub days_since_change: u32,
    /// Signed percent change from `previous_quantity`; 0 without one.
    pub variation_percent: f64,
    /// Whether the entity is rarely observed historically.
    pub is_new: bool,
    /// Lifetime number of observations of the entity, all currencies.
    pub occurrences: usize,
}

impl EntityState {
    /// Returns the `(entity_id, currency)` key of this state.
    #[must_use]
    pub fn key(&self) -> EntityKey {
        EntityKey::new(self.entity_id.clone(), self.currency.clone())
    }
}
