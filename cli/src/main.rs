mod commands;
mod config;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::process;

use crate::commands::{
    cmd_height_set, cmd_height_show, cmd_history, cmd_log, cmd_show, cmd_unit_set, cmd_unit_show,
};
use crate::config::Config;
use weigh_core::service::WeighService;

#[derive(Parser)]
#[command(
    name = "weigh",
    version,
    about = "A simple weight and BMI tracker CLI",
    long_about = "\n\n  ██╗    ██╗███████╗██╗ ██████╗ ██╗  ██╗
  ██║    ██║██╔════╝██║██╔════╝ ██║  ██║
  ██║ █╗ ██║█████╗  ██║██║  ███╗███████║
  ██║███╗██║██╔══╝  ██║██║   ██║██╔══██║
  ╚███╔███╔╝███████╗██║╚██████╔╝██║  ██║
   ╚══╝╚══╝ ╚══════╝╚═╝ ╚═════╝ ╚═╝  ╚═╝
        one weigh-in a day.
"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log a weigh-in (inserts or fully overwrites the day's record)
    Log {
        /// Weight value in the display unit
        value: f64,
        /// Unit: kg or jin (default: configured unit, else kg)
        #[arg(short, long)]
        unit: Option<String>,
        /// Date (YYYY-MM-DD or today/yesterday/tomorrow, default: today)
        #[arg(long)]
        date: Option<String>,
        /// Height in cm, used only to report the BMI of the saved value
        #[arg(long)]
        height: Option<f64>,
        /// Breakfast text
        #[arg(long)]
        breakfast: Option<String>,
        /// Lunch text
        #[arg(long)]
        lunch: Option<String>,
        /// Dinner text
        #[arg(long)]
        dinner: Option<String>,
        /// Optional note
        #[arg(long)]
        note: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show one day's record with BMI (default: today)
    Show {
        /// Date (YYYY-MM-DD or today/yesterday/tomorrow, default: today)
        date: Option<String>,
        /// Unit: kg or jin (default: configured unit, else kg)
        #[arg(short, long)]
        unit: Option<String>,
        /// Height in cm (default: configured height)
        #[arg(long)]
        height: Option<f64>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the full history with BMI, band, and trend
    History {
        /// Unit: kg or jin (default: configured unit, else kg)
        #[arg(short, long)]
        unit: Option<String>,
        /// Height in cm (default: configured height)
        #[arg(long)]
        height: Option<f64>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Manage the default height used for BMI
    Height {
        #[command(subcommand)]
        command: HeightCommands,
    },
    /// Manage the default display unit
    Unit {
        #[command(subcommand)]
        command: UnitCommands,
    },
}

#[derive(Subcommand)]
enum HeightCommands {
    /// Set the default height in centimetres
    Set {
        /// Height in cm
        cm: f64,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the configured default height
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
enum UnitCommands {
    /// Set the default display unit (kg or jin)
    Set {
        /// Unit label: kg or jin
        unit: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the configured default display unit
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = Config::load()?;
    let service = WeighService::new(&config.db_path)?;

    match cli.command {
        Commands::Log {
            value,
            unit,
            date,
            height,
            breakfast,
            lunch,
            dinner,
            note,
            json,
        } => cmd_log(
            &service,
            value,
            unit.as_deref(),
            date,
            height,
            note,
            breakfast,
            lunch,
            dinner,
            json,
        ),
        Commands::Show {
            date,
            unit,
            height,
            json,
        } => cmd_show(&service, date, unit.as_deref(), height, json),
        Commands::History { unit, height, json } => {
            cmd_history(&service, unit.as_deref(), height, json)
        }
        Commands::Height { command } => match command {
            HeightCommands::Set { cm, json } => cmd_height_set(&service, cm, json),
            HeightCommands::Show { json } => cmd_height_show(&service, json),
        },
        Commands::Unit { command } => match command {
            UnitCommands::Set { unit, json } => cmd_unit_set(&service, &unit, json),
            UnitCommands::Show { json } => cmd_unit_show(&service, json),
        },
    }
}
