//! Snapshot log rows.
//!
//! [`RawObservation`] is what the scraper hands over: numbers and flags may
//! arrive as JSON numbers, booleans or loosely formatted strings.
//! [`Observation`] is the validated row the analysis engine works with.
//! Conversion never fails the whole batch; a row that cannot be read is
//! rejected with an [`ObservationRejection`] and treated as absent.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::EntityKey;
use crate::analysis::metrics;

/// One validated row of the snapshot log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// Entity (partner) name.
    pub entity_id: String,
    /// Point in time the row was scraped.
    pub timestamp: NaiveDateTime,
    /// Currency code of the quantity scale.
    pub currency: String,
    /// Whether an offer was active.
    pub has_flag: bool,
    /// Reward points granted per `unit_value`.
    pub quantity: f64,
    /// Currency units the quantity refers to.
    pub unit_value: f64,
}

impl Observation {
    /// Returns the `(entity_id, currency)` key of this row.
    #[must_use]
    pub fn key(&self) -> EntityKey {
        EntityKey::new(self.entity_id.clone(), self.currency.clone())
    }

    /// Calendar date of the observation.
    #[must_use]
    pub fn date(&self) -> NaiveDate {
        self.timestamp.date()
    }

    /// Points per currency unit; zero when `unit_value` is zero.
    #[must_use]
    pub fn ratio(&self) -> f64 {
        metrics::ratio(self.quantity, self.unit_value)
    }
}

/// Unvalidated row as received from the ingestion collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawObservation {
    /// Entity (partner) name.
    pub entity_id: String,
    /// Point in time the row was scraped.
    pub timestamp: NaiveDateTime,
    /// Currency code of the quantity scale.
    pub currency: String,
    /// Offer flag: boolean, `0`/`1`, or `"Sim"`/`"Não"`/`"yes"`/`"no"`.
    #[serde(default)]
    pub has_flag: Value,
    /// Reward points: number or numeric string.
    #[serde(default)]
    pub quantity: Value,
    /// Currency units: number or numeric string.
    #[serde(default)]
    pub unit_value: Value,
}

/// Reason a raw row was not admitted to the store.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ObservationRejection {
    /// Entity name is blank.
    #[error("entity id is empty")]
    EmptyEntity,
    /// Currency code is blank.
    #[error("currency is empty for {0}")]
    EmptyCurrency(String),
    /// A numeric field is missing or not a finite number.
    #[error("field `{field}` of {entity_id} is not numeric")]
    NotNumeric {
        /// Entity the row belongs to.
        entity_id: String,
        /// Name of the offending field.
        field: &'static str,
    },
}

impl TryFrom<RawObservation> for Observation {
    type Error = ObservationRejection;

    fn try_from(raw: RawObservation) -> Result<Self, Self::Error> {
        let entity_id = raw.entity_id.trim().to_string();
        if entity_id.is_empty() {
            return Err(ObservationRejection::EmptyEntity);
        }
        let currency = raw.currency.trim().to_string();
        if currency.is_empty() {
            return Err(ObservationRejection::EmptyCurrency(entity_id));
        }

        let Some(quantity) = parse_number(&raw.quantity) else {
            return Err(ObservationRejection::NotNumeric {
                entity_id,
                field: "quantity",
            });
        };
        let Some(unit_value) = parse_number(&raw.unit_value) else {
            return Err(ObservationRejection::NotNumeric {
                entity_id,
                field: "unit_value",
            });
        };

        Ok(Self {
            entity_id,
            timestamp: raw.timestamp,
            currency,
            has_flag: parse_flag(&raw.has_flag),
            quantity,
            unit_value,
        })
    }
}

/// Reads a finite number from a JSON number or a numeric string.
///
/// Strings may use a decimal comma (`"1,5"`); thousands separators are not
/// accepted.
fn parse_number(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().replace(',', ".").parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|v| v.is_finite())
}

/// Reads the offer flag. Anything unrecognised counts as "no offer".
fn parse_flag(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|v| v != 0.0),
        Value::String(s) => matches!(
            s.trim().to_lowercase().as_str(),
            "sim" | "s" | "yes" | "y" | "true" | "1"
        ),
        _ => false,
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(quantity: Value, unit_value: Value, flag: Value) -> RawObservation {
        let Ok(timestamp) =
            NaiveDateTime::parse_from_str("2024-05-01 09:30:00", "%Y-%m-%d %H:%M:%S")
        else {
            panic!("valid timestamp");
        };
        RawObservation {
            entity_id: " Acme ".to_string(),
            timestamp,
            currency: "BRL".to_string(),
            has_flag: flag,
            quantity,
            unit_value,
        }
    }

    #[test]
    fn accepts_numbers_and_numeric_strings() {
        let Ok(obs) = Observation::try_from(raw(json!("2,5"), json!(1), json!("Sim"))) else {
            panic!("row should be accepted");
        };
        assert_eq!(obs.entity_id, "Acme");
        assert!((obs.quantity - 2.5).abs() < f64::EPSILON);
        assert!(obs.has_flag);
        assert!((obs.ratio() - 2.5).abs() < f64::EPSILON);
    }

    #[test]
    fn rejects_non_numeric_quantity() {
        let result = Observation::try_from(raw(json!("n/a"), json!(1), json!(false)));
        assert_eq!(
            result,
            Err(ObservationRejection::NotNumeric {
                entity_id: "Acme".to_string(),
                field: "quantity",
            })
        );
    }

    #[test]
    fn rejects_missing_unit_value() {
        let result = Observation::try_from(raw(json!(3), Value::Null, json!(false)));
        assert!(matches!(
            result,
            Err(ObservationRejection::NotNumeric {
                field: "unit_value",
                ..
            })
        ));
    }

    #[test]
    fn zero_unit_value_gives_zero_ratio() {
        let Ok(obs) = Observation::try_from(raw(json!(3), json!(0), json!(true))) else {
            panic!("row should be accepted");
        };
        assert_eq!(obs.ratio(), 0.0);
    }

    #[test]
    fn unknown_flag_values_mean_no_offer() {
        assert!(!parse_flag(&json!("Não")));
        assert!(!parse_flag(&Value::Null));
        assert!(parse_flag(&json!(1)));
    }
}
