//! Day-over-day change classification.
//!
//! The differ compares the two most recent snapshot dates and emits one
//! [`ChangeEvent`] per entity key that changed in a way subscribers care
//! about. Events are consumed by notification routing collaborators.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::EntityKey;
use crate::error::RadarError;

/// Category of a day-over-day change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeKind {
    /// Key present today, never observed before.
    NewEntity,
    /// Key present today, absent yesterday, observed on an older date.
    AppearedAgain,
    /// Offer flag went from false to true.
    GainedFlag,
    /// Offer flag went from true to false.
    LostFlag,
    /// Quantity moved by at least the swing threshold with the flag unchanged.
    LargeSwing,
    /// Key present yesterday, absent today.
    Disappeared,
}

impl ChangeKind {
    /// Every kind, in declaration order.
    pub const ALL: [Self; 6] = [
        Self::NewEntity,
        Self::AppearedAgain,
        Self::GainedFlag,
        Self::LostFlag,
        Self::LargeSwing,
        Self::Disappeared,
    ];

    /// Returns the kind as a static string slice.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::NewEntity => "new_entity",
            Self::AppearedAgain => "appeared_again",
            Self::GainedFlag => "gained_flag",
            Self::LostFlag => "lost_flag",
            Self::LargeSwing => "large_swing",
            Self::Disappeared => "disappeared",
        }
    }
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChangeKind {
    type Err = RadarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| RadarError::InvalidChangeKind(s.to_string()))
    }
}

/// One classified change between the two most recent snapshot dates.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChangeEvent {
    /// First ever observation of the key.
    NewEntity {
        /// Entity key.
        #[serde(flatten)]
        key: EntityKey,
        /// Today's quantity.
        current_quantity: f64,
        /// Today's offer flag.
        has_flag: bool,
    },

    /// Key returns after being absent on the previous date.
    AppearedAgain {
        /// Entity key.
        #[serde(flatten)]
        key: EntityKey,
        /// Today's quantity.
        current_quantity: f64,
        /// Today's offer flag.
        has_flag: bool,
    },

    /// Offer started.
    GainedFlag {
        /// Entity key.
        #[serde(flatten)]
        key: EntityKey,
        /// Today's quantity.
        current_quantity: f64,
        /// Yesterday's quantity.
        previous_quantity: f64,
    },

    /// Offer ended.
    LostFlag {
        /// Entity key.
        #[serde(flatten)]
        key: EntityKey,
        /// Today's quantity.
        current_quantity: f64,
        /// Yesterday's quantity.
        previous_quantity: f64,
    },

    /// Quantity moved past the swing threshold.
    LargeSwing {
        /// Entity key.
        #[serde(flatten)]
        key: EntityKey,
        /// Today's quantity.
        current_quantity: f64,
        /// Yesterday's quantity.
        previous_quantity: f64,
        /// Signed percent change from yesterday to today.
        variation_percent: f64,
        /// Offer flag (identical on both dates).
        has_flag: bool,
    },

    /// Key missing today.
    Disappeared {
        /// Entity key.
        #[serde(flatten)]
        key: EntityKey,
        /// Yesterday's quantity.
        previous_quantity: f64,
        /// Yesterday's offer flag.
        has_flag: bool,
    },
}

impl ChangeEvent {
    /// Returns the category of this event.
    #[must_use]
    pub const fn kind(&self) -> ChangeKind {
        match self {
            Self::NewEntity { .. } => ChangeKind::NewEntity,
            Self::AppearedAgain { .. } => ChangeKind::AppearedAgain,
            Self::GainedFlag { .. } => ChangeKind::GainedFlag,
            Self::LostFlag { .. } => ChangeKind::LostFlag,
            Self::LargeSwing { .. } => ChangeKind::LargeSwing,
            Self::Disappeared { .. } => ChangeKind::Disappeared,
        }
    }

    /// Returns the entity key this event is about.
    #[must_use]
    pub const fn key(&self) -> &EntityKey {
        match self {
            Self::NewEntity { key, .. }
            | Self::AppearedAgain { key, .. }
            | Self::GainedFlag { key, .. }
            | Self::LostFlag { key, .. }
            | Self::LargeSwing { key, .. }
            | Self::Disappeared { key, .. } => key,
        }
    }

    /// Today's quantity; `None` for [`ChangeEvent::Disappeared`].
    #[must_use]
    pub const fn current_quantity(&self) -> Option<f64> {
        match self {
            Self::NewEntity {
                current_quantity, ..
            }
            | Self::AppearedAgain {
                current_quantity, ..
            }
            | Self::GainedFlag {
                current_quantity, ..
            }
            | Self::LostFlag {
                current_quantity, ..
            }
            | Self::LargeSwing {
                current_quantity, ..
            } => Some(*current_quantity),
            Self::Disappeared { .. } => None,
        }
    }

    /// Yesterday's quantity; `None` for keys absent yesterday.
    #[must_use]
    pub const fn previous_quantity(&self) -> Option<f64> {
        match self {
            Self::GainedFlag {
                previous_quantity, ..
            }
            | Self::LostFlag {
                previous_quantity, ..
            }
            | Self::LargeSwing {
                previous_quantity, ..
            }
            | Self::Disappeared {
                previous_quantity, ..
            } => Some(*previous_quantity),
            Self::NewEntity { .. } | Self::AppearedAgain { .. } => None,
        }
    }

    /// Signed percent change; only present for [`ChangeEvent::LargeSwing`].
    #[must_use]
    pub const fn variation_percent(&self) -> Option<f64> {
        match self {
            Self::LargeSwing {
                variation_percent, ..
            } => Some(*variation_percent),
            _ => None,
        }
    }

    /// Offer flag carried by the event.
    ///
    /// Today's flag, except for [`ChangeEvent::Disappeared`] which carries
    /// yesterday's.
    #[must_use]
    pub const fn has_flag(&self) -> bool {
        match self {
            Self::NewEntity { has_flag, .. }
            | Self::AppearedAgain { has_flag, .. }
            | Self::LargeSwing { has_flag, .. }
            | Self::Disappeared { has_flag, .. } => *has_flag,
            Self::GainedFlag { .. } => true,
            Self::LostFlag { .. } => false,
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn kind_parses_from_wire_name() {
        for kind in ChangeKind::ALL {
            let Ok(parsed) = kind.as_str().parse::<ChangeKind>() else {
                panic!("failed to parse {kind}");
            };
            assert_eq!(parsed, kind);
        }
        assert!("price_updated".parse::<ChangeKind>().is_err());
    }

    #[test]
    fn disappeared_has_no_current_quantity() {
        let event = ChangeEvent::Disappeared {
            key: EntityKey::new("Acme", "BRL"),
            previous_quantity: 4.0,
            has_flag: true,
        };
        assert_eq!(event.kind(), ChangeKind::Disappeared);
        assert_eq!(event.current_quantity(), None);
        assert_eq!(event.previous_quantity(), Some(4.0));
        assert!(event.has_flag());
    }

    #[test]
    fn large_swing_serializes_flat() {
        let event = ChangeEvent::LargeSwing {
            key: EntityKey::new("Acme", "BRL"),
            current_quantity: 6.0,
            previous_quantity: 4.0,
            variation_percent: 50.0,
            has_flag: false,
        };
        let Ok(json) = serde_json::to_value(&event) else {
            panic!("serialization failed");
        };
        assert_eq!(json["kind"], "large_swing");
        assert_eq!(json["entity_id"], "Acme");
        assert_eq!(json["currency"], "BRL");
        assert_eq!(json["variation_percent"], 50.0);
    }

    #[test]
    fn only_large_swing_carries_variation() {
        let event = ChangeEvent::GainedFlag {
            key: EntityKey::new("Acme", "BRL"),
            current_quantity: 6.0,
            previous_quantity: 2.0,
        };
        assert_eq!(event.variation_percent(), None);
        assert!(event.has_flag());
    }
}
