//! Display units for weight values. Storage is always kilograms.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    Kg,
    /// Chinese market catty: 1 kg = 2 jin.
    Jin,
}

impl Unit {
    /// Display-units-per-kilogram factor.
    #[must_use]
    pub fn factor(self) -> f64 {
        match self {
            Unit::Kg => 1.0,
            Unit::Jin => 2.0,
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Unit::Kg => "kg",
            Unit::Jin => "jin",
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Unit {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "kg" => Ok(Unit::Kg),
            "jin" => Ok(Unit::Jin),
            _ => Err(CoreError::validation(format!(
                "Invalid unit '{s}'. Use 'kg' or 'jin'"
            ))),
        }
    }
}

/// Convert canonical kilograms to the given display unit.
#[must_use]
pub fn to_display(weight_kg: f64, unit: Unit) -> f64 {
    weight_kg * unit.factor()
}

/// Convert a display-unit value back to canonical kilograms.
#[must_use]
pub fn to_storage(display_value: f64, unit: Unit) -> f64 {
    display_value / unit.factor()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factors() {
        assert!((Unit::Kg.factor() - 1.0).abs() < f64::EPSILON);
        assert!((Unit::Jin.factor() - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_jin_conversion() {
        assert!((to_display(70.0, Unit::Jin) - 140.0).abs() < 1e-9);
        assert!((to_storage(140.0, Unit::Jin) - 70.0).abs() < 1e-9);
        assert!((to_display(70.0, Unit::Kg) - 70.0).abs() < 1e-9);
    }

    #[test]
    fn test_round_trip() {
        for unit in [Unit::Kg, Unit::Jin] {
            for w in [0.1, 52.3, 70.0, 123.456, 599.9] {
                let back = to_storage(to_display(w, unit), unit);
                assert!((back - w).abs() < 1e-9, "{w} {unit} -> {back}");
            }
        }
    }

    #[test]
    fn test_parse_labels() {
        assert_eq!("kg".parse::<Unit>().unwrap(), Unit::Kg);
        assert_eq!("jin".parse::<Unit>().unwrap(), Unit::Jin);
        assert_eq!("KG".parse::<Unit>().unwrap(), Unit::Kg);
        assert_eq!("Jin".parse::<Unit>().unwrap(), Unit::Jin);
    }

    #[test]
    fn test_parse_unknown_label() {
        assert!("lbs".parse::<Unit>().is_err());
        assert!("".parse::<Unit>().is_err());
    }
}
