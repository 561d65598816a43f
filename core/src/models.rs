use chrono::NaiveDate;
use serde::Serialize;

use crate::error::{CoreError, Result};
use crate::metrics::Band;
use crate::units::Unit;

/// One persisted day: weight in the canonical storage unit (kilograms)
/// plus optional free text. The date is the natural primary key.
#[derive(Debug, Clone, Serialize)]
pub struct Record {
    pub date: NaiveDate,
    pub weight_kg: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub breakfast: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lunch: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dinner: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewRecord {
    pub date: NaiveDate,
    pub weight_kg: f64,
    pub note: Option<String>,
    pub breakfast: Option<String>,
    pub lunch: Option<String>,
    pub dinner: Option<String>,
}

/// Validate a record before it reaches the store: weight must be a
/// positive real number.
pub fn validate_new_record(record: &NewRecord) -> Result<()> {
    if !record.weight_kg.is_finite() || record.weight_kg <= 0.0 {
        return Err(CoreError::validation("Weight must be greater than 0"));
    }
    Ok(())
}

// --- Read model ---

/// One day of the read model: stored fields plus metrics derived against
/// the height supplied at read time, weight in display units.
#[derive(Debug, Clone, Serialize)]
pub struct DayView {
    pub date: NaiveDate,
    pub display_weight: f64,
    pub bmi: f64,
    pub band: Band,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub breakfast: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lunch: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dinner: Option<String>,
}

/// The full chronological read model handed to front-ends: every day in
/// ascending date order plus the store-wide trend delta, both expressed
/// in `unit`.
#[derive(Debug, Clone, Serialize)]
pub struct WeightReport {
    pub unit: Unit,
    pub height_cm: f64,
    pub days: Vec<DayView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trend: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(weight_kg: f64) -> NewRecord {
        NewRecord {
            date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            weight_kg,
            note: None,
            breakfast: None,
            lunch: None,
            dinner: None,
        }
    }

    #[test]
    fn test_validate_positive_weight() {
        assert!(validate_new_record(&sample(70.0)).is_ok());
        assert!(validate_new_record(&sample(0.1)).is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_and_negative() {
        assert!(matches!(
            validate_new_record(&sample(0.0)),
            Err(CoreError::Validation(_))
        ));
        assert!(matches!(
            validate_new_record(&sample(-5.0)),
            Err(CoreError::Validation(_))
        ));
    }

    #[test]
    fn test_validate_rejects_non_finite() {
        assert!(validate_new_record(&sample(f64::NAN)).is_err());
        assert!(validate_new_record(&sample(f64::INFINITY)).is_err());
    }

    #[test]
    fn test_record_json_omits_empty_text() {
        let record = Record {
            date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            weight_kg: 70.0,
            note: None,
            breakfast: Some("congee".to_string()),
            lunch: None,
            dinner: None,
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["breakfast"], "congee");
        assert!(json.get("note").is_none());
        assert!(json.get("lunch").is_none());
    }
}
