//! Metrics derived at read time: BMI, classification band, trend delta.
//!
//! Everything here is a pure function of its inputs; records are read,
//! never mutated.

use std::fmt;

use serde::Serialize;

use crate::error::{CoreError, Result};
use crate::models::Record;

/// BMI classification bands, boundary-inclusive on the lower end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Band {
    Underweight,
    Normal,
    Overweight,
    Obese,
}

impl Band {
    /// Classify a BMI value. Total over all inputs.
    #[must_use]
    pub fn classify(bmi: f64) -> Band {
        if bmi < 18.5 {
            Band::Underweight
        } else if bmi < 24.0 {
            Band::Normal
        } else if bmi < 28.0 {
            Band::Overweight
        } else {
            Band::Obese
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Band::Underweight => "Underweight",
            Band::Normal => "Normal",
            Band::Overweight => "Overweight",
            Band::Obese => "Obese",
        }
    }
}

impl fmt::Display for Band {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

pub fn ensure_valid_height(height_cm: f64) -> Result<()> {
    if !height_cm.is_finite() || height_cm <= 0.0 {
        return Err(CoreError::validation("Height must be greater than 0"));
    }
    Ok(())
}

/// Body-mass index from kilograms and centimetres.
pub fn bmi(weight_kg: f64, height_cm: f64) -> Result<f64> {
    ensure_valid_height(height_cm)?;
    let height_m = height_cm / 100.0;
    Ok(weight_kg / (height_m * height_m))
}

/// Delta between the two most recent weights of an ascending-date
/// sequence, in kilograms. `None` below two records.
#[must_use]
pub fn trend(records: &[Record]) -> Option<f64> {
    if records.len() < 2 {
        return None;
    }
    let last = &records[records.len() - 1];
    let prev = &records[records.len() - 2];
    Some(last.weight_kg - prev.weight_kg)
}
