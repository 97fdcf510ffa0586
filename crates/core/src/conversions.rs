//! Measurement units and constant-factor conversion.
//!
//! Volume converts through milliliters, mass through grams. Count-style
//! units (pieces, pinches) have no base factor and never convert.

use crate::error::CoreError;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Units
// ---------------------------------------------------------------------------

/// Measurement unit for an ingredient amount.
///
/// Serializes as its short display form (`"g"`, `"tbsp"`, ...), matching
/// the strings ingredient rows carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Unit {
    #[serde(rename = "g")]
    Grams,
    #[serde(rename = "kg")]
    Kilograms,
    #[serde(rename = "ml")]
    Milliliters,
    #[serde(rename = "l")]
    Liters,
    #[serde(rename = "tsp")]
    Teaspoons,
    #[serde(rename = "tbsp")]
    Tablespoons,
    #[serde(rename = "cup")]
    Cups,
    #[serde(rename = "pcs")]
    Pieces,
    #[serde(rename = "pinch")]
    Pinch,
}

/// All valid unit strings.
const VALID_UNIT_STRINGS: &[&str] = &[
    "g", "kg", "ml", "l", "tsp", "tbsp", "cup", "pcs", "pinch",
];

impl Unit {
    /// Return the unit as its short display string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Grams => "g",
            Self::Kilograms => "kg",
            Self::Milliliters => "ml",
            Self::Liters => "l",
            Self::Teaspoons => "tsp",
            Self::Tablespoons => "tbsp",
            Self::Cups => "cup",
            Self::Pieces => "pcs",
            Self::Pinch => "pinch",
        }
    }

    /// Parse a unit from its short string form.
    pub fn from_str(s: &str) -> Result<Self, CoreError> {
        match s {
            "g" => Ok(Self::Grams),
            "kg" => Ok(Self::Kilograms),
            "ml" => Ok(Self::Milliliters),
            "l" => Ok(Self::Liters),
            "tsp" => Ok(Self::Teaspoons),
            "tbsp" => Ok(Self::Tablespoons),
            "cup" => Ok(Self::Cups),
            "pcs" => Ok(Self::Pieces),
            "pinch" => Ok(Self::Pinch),
            _ => Err(CoreError::Validation(format!(
                "Invalid unit '{s}'. Must be one of: {}",
                VALID_UNIT_STRINGS.join(", ")
            ))),
        }
    }

    /// Factor to this unit's base unit (grams for mass, milliliters for
    /// volume). `None` for count-style units.
    fn base_factor(&self) -> Option<f64> {
        match self {
            Self::Grams => Some(1.0),
            Self::Kilograms => Some(1000.0),
            Self::Milliliters => Some(1.0),
            Self::Liters => Some(1000.0),
            Self::Teaspoons => Some(4.93),
            Self::Tablespoons => Some(14.79),
            Self::Cups => Some(236.59),
            Self::Pieces | Self::Pinch => None,
        }
    }

    /// Whether this unit measures mass (as opposed to volume or count).
    fn is_mass(&self) -> bool {
        matches!(self, Self::Grams | Self::Kilograms)
    }
}

// ---------------------------------------------------------------------------
// Conversion
// ---------------------------------------------------------------------------

/// Convert an amount between two units of the same dimension.
///
/// Fails for count-style units and for mass<->volume conversions (which
/// would need a per-ingredient density this module does not carry).
pub fn convert_amount(amount: f64, from: Unit, to: Unit) -> Result<f64, CoreError> {
    let (from_factor, to_factor) = match (from.base_factor(), to.base_factor()) {
        (Some(f), Some(t)) => (f, t),
        _ => {
            return Err(CoreError::Validation(format!(
                "Cannot convert between '{}' and '{}'",
                from.as_str(),
                to.as_str()
            )))
        }
    };
    if from.is_mass() != to.is_mass() {
        return Err(CoreError::Validation(format!(
            "Cannot convert mass unit '{}' to volume unit '{}' without a density",
            from.as_str(),
            to.as_str()
        )));
    }
    Ok(amount * from_factor / to_factor)
}

/// A display-friendly amount/unit pair produced by [`humanize_amount`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayAmount {
    pub amount: f64,
    pub unit: Unit,
}

/// Promote an amount to a larger unit once it crosses the usual display
/// thresholds (1000 g -> kg, 1000 ml -> l, 3 tsp -> tbsp, 16 tbsp -> cup).
pub fn humanize_amount(amount: f64, unit: Unit) -> DisplayAmount {
    let (amount, unit) = match unit {
        Unit::Grams if amount >= 1000.0 => (amount / 1000.0, Unit::Kilograms),
        Unit::Milliliters if amount >= 1000.0 => (amount / 1000.0, Unit::Liters),
        Unit::Teaspoons if amount >= 3.0 => (amount / 3.0, Unit::Tablespoons),
        Unit::Tablespoons if amount >= 16.0 => (amount / 16.0, Unit::Cups),
        _ => (amount, unit),
    };
    DisplayAmount { amount, unit }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // -- Unit parsing --------------------------------------------------------

    #[test]
    fn units_roundtrip_through_strings() {
        for s in VALID_UNIT_STRINGS {
            let parsed = Unit::from_str(s).unwrap();
            assert_eq!(parsed.as_str(), *s);
        }
    }

    #[test]
    fn rejects_unknown_unit() {
        assert!(Unit::from_str("stone").is_err());
    }

    // -- convert_amount ------------------------------------------------------

    #[test]
    fn grams_to_kilograms() {
        let kg = convert_amount(1500.0, Unit::Grams, Unit::Kilograms).unwrap();
        assert!((kg - 1.5).abs() < 1e-9);
    }

    #[test]
    fn liters_to_milliliters() {
        let ml = convert_amount(0.25, Unit::Liters, Unit::Milliliters).unwrap();
        assert!((ml - 250.0).abs() < 1e-9);
    }

    #[test]
    fn tablespoons_to_teaspoons() {
        let tsp = convert_amount(1.0, Unit::Tablespoons, Unit::Teaspoons).unwrap();
        assert!((tsp - 3.0).abs() < 0.01);
    }

    #[test]
    fn rejects_count_unit_conversion() {
        assert!(convert_amount(3.0, Unit::Pieces, Unit::Grams).is_err());
    }

    #[test]
    fn rejects_mass_to_volume() {
        assert!(convert_amount(100.0, Unit::Grams, Unit::Milliliters).is_err());
    }

    // -- humanize_amount -----------------------------------------------------

    #[test]
    fn grams_promote_to_kilograms_at_threshold() {
        let display = humanize_amount(1500.0, Unit::Grams);
        assert_eq!(display.unit, Unit::Kilograms);
        assert!((display.amount - 1.5).abs() < 1e-9);
    }

    #[test]
    fn grams_below_threshold_stay_grams() {
        let display = humanize_amount(999.0, Unit::Grams);
        assert_eq!(display.unit, Unit::Grams);
    }

    #[test]
    fn teaspoons_promote_to_tablespoons() {
        let display = humanize_amount(6.0, Unit::Teaspoons);
        assert_eq!(display.unit, Unit::Tablespoons);
        assert!((display.amount - 2.0).abs() < 1e-9);
    }

    #[test]
    fn count_units_never_promote() {
        let display = humanize_amount(5000.0, Unit::Pieces);
        assert_eq!(display.unit, Unit::Pieces);
    }
}
