//! Composite entity identity.
//!
//! [`EntityKey`] pairs an entity name with the currency its quantity is
//! quoted in. The same partner may publish parallel rates for several
//! currencies, so the pair (not the name alone) identifies a series.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::RadarError;

/// Identity of one quantity series: `(entity_id, currency)`.
///
/// Ordered by entity name first, then currency, which is the order every
/// keyed output of the engine follows. Displayed as `entity|currency`, the
/// same form subscribers use for their favorites.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityKey {
    /// Entity (partner) name.
    pub entity_id: String,
    /// Currency code of the quantity scale.
    pub currency: String,
}

impl EntityKey {
    /// Creates a key from its two components.
    #[must_use]
    pub fn new(entity_id: impl Into<String>, currency: impl Into<String>) -> Self {
        Self {
            entity_id: entity_id.into(),
            currency: currency.into(),
        }
    }
}

impl fmt::Display for EntityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}|{}", self.entity_id, self.currency)
    }
}

impl FromStr for EntityKey {
    type Err = RadarError;

    /// Parses the `entity|currency` form.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (entity_id, currency) = s
            .rsplit_once('|')
            .ok_or_else(|| RadarError::InvalidRequest(format!("malformed entity key: {s}")))?;
        if entity_id.is_empty() || currency.is_empty() {
            return Err(RadarError::InvalidRequest(format!(
                "malformed entity key: {s}"
            )));
        }
        Ok(Self::new(entity_id, currency))
    }
}
