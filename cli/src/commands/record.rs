use anyhow::{Result, bail};
use tabled::{
    Table, Tabled,
    settings::{Alignment, Modify, Style, object::Columns},
};

use weigh_core::error::CoreError;
use weigh_core::metrics::{self, Band};
use weigh_core::service::WeighService;
use weigh_core::units;

use super::helpers::{json_error, parse_date, require_height, resolve_height, resolve_unit, truncate};

#[allow(clippy::too_many_arguments)]
pub(crate) fn cmd_log(
    service: &WeighService,
    value: f64,
    unit_flag: Option<&str>,
    date: Option<String>,
    height_flag: Option<f64>,
    note: Option<String>,
    breakfast: Option<String>,
    lunch: Option<String>,
    dinner: Option<String>,
    json: bool,
) -> Result<()> {
    if value <= 0.0 {
        bail!("Weight must be greater than 0");
    }

    let unit = resolve_unit(service, unit_flag)?;
    let date = parse_date(date)?;

    let record = service.save_day(date, value, unit, note, breakfast, lunch, dinner)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&record)?);
        return Ok(());
    }

    let display = units::to_display(record.weight_kg, unit);
    let label = unit.label();
    println!(
        "Logged {display:.1} {label} for {}",
        record.date.format("%Y-%m-%d")
    );
    if let Some(height_cm) = resolve_height(service, height_flag)? {
        let bmi = metrics::bmi(record.weight_kg, height_cm)?;
        println!("  BMI {bmi:.1} ({})", Band::classify(bmi).label());
    }
    if let Some(ref n) = record.note {
        println!("  Note: {n}");
    }

    Ok(())
}

pub(crate) fn cmd_show(
    service: &WeighService,
    date: Option<String>,
    unit_flag: Option<&str>,
    height_flag: Option<f64>,
    json: bool,
) -> Result<()> {
    let unit = resolve_unit(service, unit_flag)?;
    let height_cm = require_height(service, height_flag)?;
    let date = parse_date(date)?;

    match service.day_view(date, unit, height_cm) {
        Ok(view) => {
            if json {
                println!("{}", serde_json::to_string_pretty(&view)?);
            } else {
                let label = unit.label();
                println!(
                    "{}: {:.1} {label} — BMI {:.1} ({})",
                    view.date.format("%Y-%m-%d"),
                    view.display_weight,
                    view.bmi,
                    view.band.label()
                );
                let lines = [
                    ("Breakfast", &view.breakfast),
                    ("Lunch", &view.lunch),
                    ("Dinner", &view.dinner),
                    ("Note", &view.note),
                ];
                for (tag, text) in lines {
                    if let Some(t) = text {
                        println!("  {tag}: {t}");
                    }
                }
            }
            Ok(())
        }
        Err(CoreError::NotFound(date)) => {
            let date_str = date.format("%Y-%m-%d");
            if json {
                println!("{}", json_error(&format!("No record for {date_str}")));
            } else {
                eprintln!("No record for {date_str}");
            }
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

pub(crate) fn cmd_history(
    service: &WeighService,
    unit_flag: Option<&str>,
    height_flag: Option<f64>,
    json: bool,
) -> Result<()> {
    let unit = resolve_unit(service, unit_flag)?;
    let height_cm = require_height(service, height_flag)?;

    let report = service.load_all(unit, height_cm)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    if report.days.is_empty() {
        eprintln!("No records yet. Use `weigh log` to record your first weigh-in.");
        return Ok(());
    }

    let label = unit.label();

    #[derive(Tabled)]
    struct DayRow {
        #[tabled(rename = "Date")]
        date: String,
        #[tabled(rename = "Weight")]
        weight: String,
        #[tabled(rename = "BMI")]
        bmi: String,
        #[tabled(rename = "Status")]
        band: String,
        #[tabled(rename = "Breakfast")]
        breakfast: String,
        #[tabled(rename = "Lunch")]
        lunch: String,
        #[tabled(rename = "Dinner")]
        dinner: String,
        #[tabled(rename = "Note")]
        note: String,
    }

    let text = |t: &Option<String>| t.as_deref().map(|s| truncate(s, 20)).unwrap_or_default();

    let rows: Vec<DayRow> = report
        .days
        .iter()
        .map(|day| DayRow {
            date: day.date.format("%Y-%m-%d").to_string(),
            weight: format!("{:.1}", day.display_weight),
            bmi: format!("{:.1}", day.bmi),
            band: day.band.label().to_string(),
            breakfast: text(&day.breakfast),
            lunch: text(&day.lunch),
            dinner: text(&day.dinner),
            note: text(&day.note),
        })
        .collect();

    let table = Table::new(&rows)
        .with(Style::rounded())
        .with(Modify::new(Columns::new(1..3)).with(Alignment::right()))
        .to_string();
    println!("{table}");

    if let Some(latest) = report.days.last() {
        let days_logged = report.days.len();
        let height = report.height_cm;
        let delta = report
            .trend
            .map_or_else(|| "-".to_string(), |t| format!("{t:+.1} {label}"));
        println!(
            "\nLatest: {:.1} {label} ({delta}) | BMI {:.1} ({}) | {days_logged} days logged | height {height:.0} cm",
            latest.display_weight,
            latest.bmi,
            latest.band.label()
        );
    }

    Ok(())
}
