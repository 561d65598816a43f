use std::path::Path;

use chrono::{Local, NaiveDate};
use rusqlite::{Connection, params};

use crate::error::{CoreError, Result};
use crate::models::{NewRecord, Record, validate_new_record};

pub struct Database {
    conn: Connection,
}

impl Database {
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        let db = Database { conn };
        db.migrate()?;
        Ok(db)
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Database { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> Result<()> {
        let version: i64 = self
            .conn
            .pragma_query_value(None, "user_version", |row| row.get(0))?;

        if version < 1 {
            self.conn.execute_batch(
                "CREATE TABLE IF NOT EXISTS records (
                    date TEXT PRIMARY KEY,
                    weight_kg REAL NOT NULL,
                    note TEXT
                );

                PRAGMA user_version = 1;",
            )?;
        }

        if version < 2 {
            // Meal columns arrived after the weight-only schema; upgrade
            // existing databases in place.
            self.conn.execute_batch(
                "ALTER TABLE records ADD COLUMN breakfast TEXT;
                 ALTER TABLE records ADD COLUMN lunch TEXT;
                 ALTER TABLE records ADD COLUMN dinner TEXT;
                 PRAGMA user_version = 2;",
            )?;
        }

        if version < 3 {
            self.conn.execute_batch(
                "CREATE TABLE IF NOT EXISTS user_settings (
                    key TEXT PRIMARY KEY NOT NULL,
                    value TEXT NOT NULL,
                    updated_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%SZ', 'now'))
                );

                PRAGMA user_version = 3;",
            )?;
        }

        Ok(())
    }

    // --- Row mapping helpers ---

    fn record_from_row(row: &rusqlite::Row) -> rusqlite::Result<Record> {
        let date_str: String = row.get(0)?;
        let date = NaiveDate::parse_from_str(&date_str, "%Y-%m-%d").map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
        })?;
        Ok(Record {
            date,
            weight_kg: row.get(1)?,
            note: row.get(2)?,
            breakfast: row.get(3)?,
            lunch: row.get(4)?,
            dinner: row.get(5)?,
        })
    }

    // --- Records ---

    /// Insert or fully replace the record for `new.date`.
    ///
    /// A single conditional write, so the one-record-per-date invariant
    /// holds even with concurrent callers. Every field is overwritten on
    /// conflict: saving a blank note over an existing date erases it.
    pub fn upsert_record(&self, new: &NewRecord) -> Result<Record> {
        validate_new_record(new)?;
        let date_str = new.date.format("%Y-%m-%d").to_string();
        self.conn.execute(
            "INSERT INTO records (date, weight_kg, note, breakfast, lunch, dinner)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)
             ON CONFLICT(date) DO UPDATE SET
                weight_kg = excluded.weight_kg,
                note = excluded.note,
                breakfast = excluded.breakfast,
                lunch = excluded.lunch,
                dinner = excluded.dinner",
            params![
                date_str,
                new.weight_kg,
                new.note,
                new.breakfast,
                new.lunch,
                new.dinner
            ],
        )?;
        self.get_record(new.date)?
            .ok_or(CoreError::NotFound(new.date))
    }

    pub fn get_record(&self, date: NaiveDate) -> Result<Option<Record>> {
        let date_str = date.format("%Y-%m-%d").to_string();
        let mut stmt = self.conn.prepare(
            "SELECT date, weight_kg, note, breakfast, lunch, dinner
             FROM records WHERE date = ?1",
        )?;
        let mut rows = stmt.query(params![date_str])?;
        if let Some(row) = rows.next()? {
            Ok(Some(Self::record_from_row(row)?))
        } else {
            Ok(None)
        }
    }

    /// All records sorted ascending by date.
    pub fn get_all_records(&self) -> Result<Vec<Record>> {
        let mut stmt = self.conn.prepare(
            "SELECT date, weight_kg, note, breakfast, lunch, dinner
             FROM records ORDER BY date ASC",
        )?;
        let records = stmt
            .query_map([], Self::record_from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(records)
    }

    pub fn record_exists(&self, date: NaiveDate) -> Result<bool> {
        let date_str = date.format("%Y-%m-%d").to_string();
        let mut stmt = self
            .conn
            .prepare("SELECT 1 FROM records WHERE date = ?1")?;
        Ok(stmt.exists(params![date_str])?)
    }

    // --- User Settings ---

    pub fn set_setting(&self, key: &str, value: &str) -> Result<()> {
        let now = Local::now().to_rfc3339();
        self.conn.execute(
            "INSERT INTO user_settings (key, value, updated_at)
             VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            params![key, value, now],
        )?;
        Ok(())
    }

    pub fn get_setting(&self, key: &str) -> Result<Option<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT value FROM user_settings WHERE key = ?1")?;
        let mut rows = stmt.query(params![key])?;
        if let Some(row) = rows.next()? {
            Ok(Some(row.get(0)?))
        } else {
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn sample_record(date: &str, weight_kg: f64) -> NewRecord {
        NewRecord {
            date: d(date),
            weight_kg,
            note: None,
            breakfast: None,
            lunch: None,
            dinner: None,
        }
    }

    #[test]
    fn test_upsert_and_get_record() {
        let db = Database::open_in_memory().unwrap();
        let record = db
            .upsert_record(&NewRecord {
                note: Some("after run".to_string()),
                breakfast: Some("congee".to_string()),
                ..sample_record("2024-05-01", 70.0)
            })
            .unwrap();

        assert_eq!(record.date, d("2024-05-01"));
        assert!((record.weight_kg - 70.0).abs() < f64::EPSILON);
        assert_eq!(record.note.as_deref(), Some("after run"));
        assert_eq!(record.breakfast.as_deref(), Some("congee"));

        let fetched = db.get_record(d("2024-05-01")).unwrap().unwrap();
        assert_eq!(fetched.date, record.date);
        assert_eq!(fetched.note.as_deref(), Some("after run"));
    }

    #[test]
    fn test_upsert_is_unique_per_date() {
        let db = Database::open_in_memory().unwrap();
        db.upsert_record(&sample_record("2024-05-01", 70.0)).unwrap();
        db.upsert_record(&sample_record("2024-05-01", 71.0)).unwrap();
        db.upsert_record(&sample_record("2024-05-01", 72.0)).unwrap();

        let all = db.get_all_records().unwrap();
        assert_eq!(all.len(), 1);
        assert!((all[0].weight_kg - 72.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_upsert_overwrites_all_fields() {
        let db = Database::open_in_memory().unwrap();
        db.upsert_record(&NewRecord {
            note: Some("a".to_string()),
            lunch: Some("noodles".to_string()),
            ..sample_record("2024-05-01", 70.0)
        })
        .unwrap();

        // Second save with blank text erases the previous fields, not merges.
        let record = db
            .upsert_record(&NewRecord {
                note: Some("b".to_string()),
                ..sample_record("2024-05-01", 72.0)
            })
            .unwrap();

        assert!((record.weight_kg - 72.0).abs() < f64::EPSILON);
        assert_eq!(record.note.as_deref(), Some("b"));
        assert!(record.lunch.is_none());
    }

    #[test]
    fn test_get_all_sorted_ascending() {
        let db = Database::open_in_memory().unwrap();
        db.upsert_record(&sample_record("2024-01-03", 70.0)).unwrap();
        db.upsert_record(&sample_record("2024-01-01", 71.0)).unwrap();
        db.upsert_record(&sample_record("2024-01-02", 72.0)).unwrap();

        let all = db.get_all_records().unwrap();
        let dates: Vec<NaiveDate> = all.iter().map(|r| r.date).collect();
        assert_eq!(dates, vec![d("2024-01-01"), d("2024-01-02"), d("2024-01-03")]);
    }

    #[test]
    fn test_upsert_rejects_nonpositive_weight() {
        let db = Database::open_in_memory().unwrap();

        let err = db.upsert_record(&sample_record("2024-05-01", -5.0));
        assert!(matches!(err, Err(CoreError::Validation(_))));
        let err = db.upsert_record(&sample_record("2024-05-01", 0.0));
        assert!(matches!(err, Err(CoreError::Validation(_))));

        // Rejected writes must not create or alter anything.
        assert!(!db.record_exists(d("2024-05-01")).unwrap());
        assert!(db.get_all_records().unwrap().is_empty());
    }

    #[test]
    fn test_rejected_upsert_keeps_prior_record() {
        let db = Database::open_in_memory().unwrap();
        db.upsert_record(&sample_record("2024-05-01", 70.0)).unwrap();

        assert!(db.upsert_record(&sample_record("2024-05-01", -1.0)).is_err());

        let kept = db.get_record(d("2024-05-01")).unwrap().unwrap();
        assert!((kept.weight_kg - 70.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_record_exists() {
        let db = Database::open_in_memory().unwrap();
        assert!(!db.record_exists(d("2024-05-01")).unwrap());

        db.upsert_record(&sample_record("2024-05-01", 70.0)).unwrap();
        assert!(db.record_exists(d("2024-05-01")).unwrap());
        assert!(!db.record_exists(d("2024-05-02")).unwrap());
    }

    #[test]
    fn test_settings_set_get_overwrite() {
        let db = Database::open_in_memory().unwrap();
        assert!(db.get_setting("height_cm").unwrap().is_none());

        db.set_setting("height_cm", "180").unwrap();
        assert_eq!(db.get_setting("height_cm").unwrap().as_deref(), Some("180"));

        db.set_setting("height_cm", "175").unwrap();
        assert_eq!(db.get_setting("height_cm").unwrap().as_deref(), Some("175"));
    }
}
