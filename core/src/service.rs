use std::path::Path;

use chrono::NaiveDate;

use crate::db::Database;
use crate::error::{CoreError, Result};
use crate::metrics::{self, Band};
use crate::models::{DayView, NewRecord, Record, WeightReport};
use crate::units::{self, Unit};

const HEIGHT_CM_KEY: &str = "height_cm";
const DISPLAY_UNIT_KEY: &str = "display_unit";

/// The narrow contract front-ends consume: the write path converts display
/// units to kilograms before hitting the store, the read path derives BMI,
/// band, and trend against the unit and height supplied by the caller.
///
/// Display unit and height are always explicit parameters; the service
/// never reads them from ambient state. The `default_*` accessors only
/// remember the caller's last choice between sessions.
pub struct WeighService {
    db: Database,
}

impl WeighService {
    pub fn new(db_path: &Path) -> Result<Self> {
        let db = Database::open(db_path)?;
        Ok(Self { db })
    }

    pub fn new_in_memory() -> Result<Self> {
        let db = Database::open_in_memory()?;
        Ok(Self { db })
    }

    // --- Write path ---

    /// Convert `display_weight` to kilograms and insert-or-replace the
    /// day's record.
    #[allow(clippy::too_many_arguments)]
    pub fn save_day(
        &self,
        date: NaiveDate,
        display_weight: f64,
        unit: Unit,
        note: Option<String>,
        breakfast: Option<String>,
        lunch: Option<String>,
        dinner: Option<String>,
    ) -> Result<Record> {
        let weight_kg = units::to_storage(display_weight, unit);
        self.db.upsert_record(&NewRecord {
            date,
            weight_kg,
            note,
            breakfast,
            lunch,
            dinner,
        })
    }

    // --- Read path ---

    pub fn get_day(&self, date: NaiveDate) -> Result<Option<Record>> {
        self.db.get_record(date)
    }

    pub fn exists(&self, date: NaiveDate) -> Result<bool> {
        self.db.record_exists(date)
    }

    /// Full chronological read model: every stored day plus derived
    /// metrics, weights and trend delta expressed in `unit`.
    pub fn load_all(&self, unit: Unit, height_cm: f64) -> Result<WeightReport> {
        metrics::ensure_valid_height(height_cm)?;
        let records = self.db.get_all_records()?;
        let trend = metrics::trend(&records).map(|kg| units::to_display(kg, unit));
        let mut days = Vec::with_capacity(records.len());
        for record in &records {
            days.push(Self::view_of(record, unit, height_cm)?);
        }
        Ok(WeightReport {
            unit,
            height_cm,
            days,
            trend,
        })
    }

    /// Single-day read model. Fails with [`CoreError::NotFound`] when the
    /// date has no record.
    pub fn day_view(&self, date: NaiveDate, unit: Unit, height_cm: f64) -> Result<DayView> {
        let record = self
            .db
            .get_record(date)?
            .ok_or(CoreError::NotFound(date))?;
        Self::view_of(&record, unit, height_cm)
    }

    fn view_of(record: &Record, unit: Unit, height_cm: f64) -> Result<DayView> {
        let bmi = metrics::bmi(record.weight_kg, height_cm)?;
        Ok(DayView {
            date: record.date,
            display_weight: units::to_display(record.weight_kg, unit),
            bmi,
            band: Band::classify(bmi),
            note: record.note.clone(),
            breakfast: record.breakfast.clone(),
            lunch: record.lunch.clone(),
            dinner: record.dinner.clone(),
        })
    }

    // --- Session defaults ---

    pub fn set_default_height(&self, height_cm: f64) -> Result<()> {
        metrics::ensure_valid_height(height_cm)?;
        self.db.set_setting(HEIGHT_CM_KEY, &height_cm.to_string())
    }

    pub fn default_height(&self) -> Result<Option<f64>> {
        match self.db.get_setting(HEIGHT_CM_KEY)? {
            Some(v) => {
                let cm = v.parse::<f64>().map_err(|_| {
                    CoreError::validation(format!("Corrupt height setting '{v}'"))
                })?;
                Ok(Some(cm))
            }
            None => Ok(None),
        }
    }

    pub fn set_default_unit(&self, unit: Unit) -> Result<()> {
        self.db.set_setting(DISPLAY_UNIT_KEY, unit.label())
    }

    pub fn default_unit(&self) -> Result<Option<Unit>> {
        match self.db.get_setting(DISPLAY_UNIT_KEY)? {
            Some(v) => Ok(Some(v.parse()?)),
            None => Ok(None),
        }
    }
}
