use anyhow::Result;

use weigh_core::service::WeighService;
use weigh_core::units::Unit;

pub(crate) fn cmd_height_set(service: &WeighService, cm: f64, json: bool) -> Result<()> {
    service.set_default_height(cm)?;

    if json {
        println!("{}", serde_json::json!({ "height_cm": cm }));
    } else {
        println!("Default height set to {cm:.0} cm");
    }
    Ok(())
}

pub(crate) fn cmd_height_show(service: &WeighService, json: bool) -> Result<()> {
    let height = service.default_height()?;

    if json {
        println!("{}", serde_json::json!({ "height_cm": height }));
    } else {
        match height {
            Some(cm) => println!("Default height: {cm:.0} cm"),
            None => eprintln!("No default height set. Use `weigh height set <cm>`."),
        }
    }
    Ok(())
}

pub(crate) fn cmd_unit_set(service: &WeighService, unit: &str, json: bool) -> Result<()> {
    let unit: Unit = unit.parse()?;
    service.set_default_unit(unit)?;

    if json {
        println!("{}", serde_json::json!({ "unit": unit.label() }));
    } else {
        println!("Default unit set to {}", unit.label());
    }
    Ok(())
}

pub(crate) fn cmd_unit_show(service: &WeighService, json: bool) -> Result<()> {
    let unit = service.default_unit()?;

    if json {
        println!("{}", serde_json::json!({ "unit": unit.map(Unit::label) }));
    } else {
        match unit {
            Some(u) => println!("Default unit: {}", u.label()),
            None => println!("Default unit: kg (not configured)"),
        }
    }
    Ok(())
}
