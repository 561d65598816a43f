use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use serde::Serialize;

use weigh_core::service::WeighService;
use weigh_core::units::Unit;

pub(crate) fn parse_date(date_str: Option<String>) -> Result<NaiveDate> {
    match date_str {
        None => Ok(Local::now().date_naive()),
        Some(s) => match s.as_str() {
            "today" => Ok(Local::now().date_naive()),
            "yesterday" => Ok(Local::now().date_naive() - chrono::Duration::days(1)),
            "tomorrow" => Ok(Local::now().date_naive() + chrono::Duration::days(1)),
            _ => NaiveDate::parse_from_str(&s, "%Y-%m-%d").with_context(|| {
                format!("Invalid date '{s}'. Use YYYY-MM-DD or today/yesterday/tomorrow")
            }),
        },
    }
}

/// Resolve the display unit: explicit flag wins, then the stored default,
/// then kilograms.
pub(crate) fn resolve_unit(service: &WeighService, flag: Option<&str>) -> Result<Unit> {
    match flag {
        Some(s) => Ok(s.parse()?),
        None => Ok(service.default_unit()?.unwrap_or(Unit::Kg)),
    }
}

/// Resolve the BMI height: explicit flag wins, then the stored default.
pub(crate) fn resolve_height(service: &WeighService, flag: Option<f64>) -> Result<Option<f64>> {
    match flag {
        Some(cm) => Ok(Some(cm)),
        None => Ok(service.default_height()?),
    }
}

pub(crate) fn require_height(service: &WeighService, flag: Option<f64>) -> Result<f64> {
    resolve_height(service, flag)?
        .context("No height configured. Pass --height <cm> or run `weigh height set <cm>`")
}

pub(crate) fn json_error(message: &str) -> String {
    #[derive(Serialize)]
    struct CliError<'a> {
        error: &'a str,
    }
    serde_json::to_string(&CliError { error: message })
        .unwrap_or_else(|_| format!("{{\"error\":\"{message}\"}}"))
}

pub(crate) fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let end = s.char_indices().nth(max - 3).map_or(s.len(), |(i, _)| i);
        format!("{}...", &s[..end])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date_none() {
        let today = Local::now().date_naive();
        assert_eq!(parse_date(None).unwrap(), today);
    }

    #[test]
    fn test_parse_date_keywords() {
        let today = Local::now().date_naive();
        assert_eq!(parse_date(Some("today".to_string())).unwrap(), today);
        assert_eq!(
            parse_date(Some("yesterday".to_string())).unwrap(),
            today - chrono::Duration::days(1)
        );
        assert_eq!(
            parse_date(Some("tomorrow".to_string())).unwrap(),
            today + chrono::Duration::days(1)
        );
    }

    #[test]
    fn test_parse_date_iso() {
        let date = parse_date(Some("2024-01-15".to_string())).unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
    }

    #[test]
    fn test_parse_date_invalid() {
        assert!(parse_date(Some("nope".to_string())).is_err());
    }

    #[test]
    fn test_resolve_unit_precedence() {
        let svc = WeighService::new_in_memory().unwrap();
        assert_eq!(resolve_unit(&svc, None).unwrap(), Unit::Kg);

        svc.set_default_unit(Unit::Jin).unwrap();
        assert_eq!(resolve_unit(&svc, None).unwrap(), Unit::Jin);
        assert_eq!(resolve_unit(&svc, Some("kg")).unwrap(), Unit::Kg);

        assert!(resolve_unit(&svc, Some("stone")).is_err());
    }

    #[test]
    fn test_require_height() {
        let svc = WeighService::new_in_memory().unwrap();
        assert!(require_height(&svc, None).is_err());
        assert!((require_height(&svc, Some(180.0)).unwrap() - 180.0).abs() < f64::EPSILON);

        svc.set_default_height(175.0).unwrap();
        assert!((require_height(&svc, None).unwrap() - 175.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_json_error_shape() {
        assert_eq!(json_error("boom"), "{\"error\":\"boom\"}");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("hello", 10), "hello");
        assert_eq!(truncate("hello world this is long", 10), "hello w...");
    }

    #[test]
    fn test_truncate_utf8() {
        // Should not panic on multi-byte characters
        assert_eq!(truncate("Crème fraîche", 10), "Crème f...");
        assert_eq!(truncate("皮蛋瘦肉粥加油条", 5), "皮蛋...");
    }
}
