mod cli;

use anyhow::{bail, Context};
use chrono::{Local, NaiveDate, Utc};
use clap::Parser;
use cli::{AlertCommand, Cli, Commands, SoilCommand, WeatherCommand};
use krishimitra::config::Config;
use krishimitra::db::Database;
use krishimitra::logic::{self, advisory::ADVISORY_READINGS, CropCatalog, WeatherSummary};
use krishimitra::models::{AlertStatus, Season, SoilSnapshot, StoredAlert, WeatherSnapshot};
use krishimitra::AdvisorError;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

/// Everything a command needs, resolved once at startup.
struct Session {
    config: Config,
    catalog: CropCatalog,
    db: Database,
    farmer: i64,
    json: bool,
    today: NaiveDate,
}

fn main() -> anyhow::Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;
    let catalog = config.catalog().context("Failed to load crop catalog")?;

    let db_path = Config::db_path(cli.data_dir.as_ref())?;
    let db = Database::open(&db_path)
        .with_context(|| format!("Failed to open database at {}", db_path.display()))?;

    let ctx = Session {
        config,
        catalog,
        db,
        farmer: cli.farmer,
        json: cli.json,
        today: Local::now().date_naive(),
    };

    match cli.command {
        Commands::Crops { season } => list_crops(&ctx, season),
        Commands::Soil { action } => match action {
            SoilCommand::Add {
                ph,
                moisture,
                nitrogen,
                phosphorus,
                potassium,
                temperature,
                soil_type,
            } => {
                let reading = SoilSnapshot::new(ctx.farmer, soil_type, Utc::now())
                    .with_ph(ph)
                    .with_moisture(moisture)
                    .with_npk(nitrogen, phosphorus, potassium)
                    .with_temperature(temperature);
                let id = ctx.db.insert_soil_reading(&reading)?;
                print_or(&ctx, &reading, || println!("Recorded soil test #{}", id))
            }
        },
        Commands::Weather { action } => match action {
            WeatherCommand::Add {
                temperature,
                humidity,
                rainfall,
            } => {
                let reading =
                    WeatherSnapshot::new(ctx.farmer, temperature, humidity, rainfall, Utc::now());
                let id = ctx.db.insert_weather_reading(&reading)?;
                print_or(&ctx, &reading, || println!("Recorded weather reading #{}", id))
            }
        },
        Commands::Recommend { min_confidence } => recommend(&ctx, min_confidence),
        Commands::Adopt { crop_id, on } => adopt(&ctx, crop_id, on.unwrap_or(ctx.today)),
        Commands::Calendar { crop_id, start } => calendar(&ctx, crop_id, start),
        Commands::Alerts { action } => alerts(&ctx, action),
        Commands::Advisory => advisory(&ctx),
    }
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// JSON when `--json` was given, otherwise the text rendering.
fn print_or<T: Serialize>(
    ctx: &Session,
    value: &T,
    text: impl FnOnce(),
) -> anyhow::Result<()> {
    if ctx.json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        text();
    }
    Ok(())
}

fn list_crops(ctx: &Session, season: Option<Season>) -> anyhow::Result<()> {
    let crops = match season {
        Some(season) => ctx.catalog.crops_for_season(season),
        None => ctx.catalog.all().to_vec(),
    };

    print_or(ctx, &crops, || {
        for crop in &crops {
            println!(
                "{:>3}  {:<20} {:<7} {:>4} days  pH {:.1}-{:.1}  {:.0}-{:.0}°C",
                crop.id,
                crop.name,
                crop.season.as_str(),
                crop.duration_days,
                crop.ph_min,
                crop.ph_max,
                crop.temp_min,
                crop.temp_max
            );
        }
    })
}

fn recommend(ctx: &Session, min_confidence: Option<f64>) -> anyhow::Result<()> {
    let min_confidence = min_confidence.unwrap_or(ctx.config.advisor.min_confidence);
    let soil = ctx.db.latest_soil_reading(ctx.farmer)?;
    let weather = ctx.db.latest_weather_reading(ctx.farmer)?;

    let recs = logic::recommend(
        &ctx.catalog,
        soil.as_ref(),
        weather.as_ref(),
        ctx.today,
        min_confidence,
    )?;

    print_or(ctx, &recs, || {
        println!(
            "{} season, crops at or above {:.0}% confidence:",
            recs.season, recs.min_confidence
        );
        if recs.is_empty() {
            println!("  none");
        }
        for scored in &recs.crops {
            let met: Vec<&str> = scored
                .breakdown
                .iter()
                .filter(|c| c.is_met())
                .map(|c| c.name.as_str())
                .collect();
            println!(
                "  {:>3}  {:<20} {:>5.1}%  ({})",
                scored.crop.id,
                scored.crop.name,
                scored.confidence,
                met.join(", ")
            );
        }
    })
}

fn adopt(ctx: &Session, crop_id: i64, on: NaiveDate) -> anyhow::Result<()> {
    let Some(crop) = ctx.catalog.get(crop_id) else {
        bail!(AdvisorError::NotFound(format!("crop {}", crop_id)));
    };

    let soil = ctx.db.latest_soil_reading(ctx.farmer)?;
    let weather = ctx.db.latest_weather_reading(ctx.farmer)?;
    let confidence = match (soil, weather) {
        (Some(soil), Some(weather)) => logic::score(crop, &soil, &weather).confidence,
        _ => {
            tracing::warn!(crop_id, "No readings on file, adopting with zero confidence");
            0.0
        }
    };

    let adopted = ctx.db.adopt_crop(ctx.farmer, crop, confidence, on)?;
    let plan = ctx.db.regenerate_alerts(ctx.farmer, &ctx.catalog, ctx.today)?;

    print_or(ctx, &adopted, || {
        println!(
            "Adopted {} on {} ({:.1}% confidence), {} alerts scheduled",
            crop.name,
            adopted.adopted_on,
            adopted.confidence,
            plan.created()
        );
    })
}

fn calendar(ctx: &Session, crop_id: i64, start: Option<NaiveDate>) -> anyhow::Result<()> {
    let Some(crop) = ctx.catalog.get(crop_id) else {
        bail!(AdvisorError::NotFound(format!("crop {}", crop_id)));
    };

    let start = match start {
        Some(date) => date,
        None => ctx
            .db
            .adopted_crops(ctx.farmer)?
            .iter()
            .find(|a| a.crop_id == crop_id)
            .map(|a| a.adopted_on)
            .unwrap_or(ctx.today),
    };

    let entries = logic::crop_calendar(crop, start);
    print_or(ctx, &entries, || {
        println!("{} calendar from {}", crop.name, start);
        for entry in &entries {
            println!(
                "  {}  {:<10} {:<22} {}",
                entry.date, entry.kind.as_str(), entry.title, entry.description
            );
        }
    })
}

fn alerts(ctx: &Session, action: AlertCommand) -> anyhow::Result<()> {
    match action {
        AlertCommand::Generate => {
            let plan = ctx.db.regenerate_alerts(ctx.farmer, &ctx.catalog, ctx.today)?;
            print_or(ctx, &plan, || println!("Created {} new alerts", plan.created()))
        }
        AlertCommand::List { all } => {
            let alerts: Vec<StoredAlert> = ctx
                .db
                .alerts_for_farmer(ctx.farmer)?
                .into_iter()
                .filter(|a| all || a.is_pending())
                .collect();
            print_or(ctx, &alerts, || print_alerts(ctx, &alerts))
        }
        AlertCommand::Upcoming { days } => {
            let window = days.unwrap_or(ctx.config.advisor.upcoming_window_days);
            let due = logic::upcoming(&ctx.db.alerts_for_farmer(ctx.farmer)?, ctx.today, window);
            print_or(ctx, &due, || {
                println!("Due in the next {} days:", window);
                print_alerts(ctx, &due);
            })
        }
        AlertCommand::Complete { id } => set_status(ctx, id, AlertStatus::Completed),
        AlertCommand::Dismiss { id } => set_status(ctx, id, AlertStatus::Dismissed),
        AlertCommand::Delete { id } => {
            owned_alert(ctx, id)?;
            ctx.db.delete_alert(id)?;
            print_or(ctx, &id, || println!("Deleted alert #{}", id))
        }
    }
}

fn set_status(ctx: &Session, id: i64, status: AlertStatus) -> anyhow::Result<()> {
    let mut alert = owned_alert(ctx, id)?;
    ctx.db.set_alert_status(id, status)?;
    alert.status = status;
    print_or(ctx, &alert, || println!("Alert #{} marked {}", id, status))
}

/// The alert, if it exists and belongs to the current farmer.
fn owned_alert(ctx: &Session, id: i64) -> anyhow::Result<StoredAlert> {
    match ctx.db.get_alert(id)? {
        Some(alert) if alert.event.farmer_id == ctx.farmer => Ok(alert),
        _ => bail!(AdvisorError::NotFound(format!("alert {}", id))),
    }
}

fn print_alerts(ctx: &Session, alerts: &[StoredAlert]) {
    if alerts.is_empty() {
        println!("  none");
    }
    for alert in alerts {
        let crop = ctx
            .catalog
            .get(alert.event.crop_id)
            .map(|c| c.name.as_str())
            .unwrap_or("?");
        println!(
            "  #{:<5} {}  {:<10} {:<18} {:<9} {}",
            alert.id,
            alert.event.date,
            alert.event.alert_type.as_str(),
            crop,
            alert.status.as_str(),
            alert.event.message
        );
    }
}

#[derive(Serialize)]
struct AdvisoryReport {
    summary: Option<WeatherSummary>,
    advice: Vec<logic::Advice>,
}

fn advisory(ctx: &Session) -> anyhow::Result<()> {
    let readings = ctx
        .db
        .recent_weather_readings(ctx.farmer, ADVISORY_READINGS)?;
    let report = AdvisoryReport {
        summary: WeatherSummary::from_recent(&readings),
        advice: logic::conditions_advisory(&readings),
    };

    print_or(ctx, &report, || match &report.summary {
        None => println!("No weather readings recorded"),
        Some(summary) => {
            println!(
                "Last {} readings: avg {:.1}°C, {:.0}% humidity, {:.1} mm rain",
                summary.readings,
                summary.avg_temperature,
                summary.avg_humidity,
                summary.total_rainfall_mm
            );
            if report.advice.is_empty() {
                println!("  Conditions are favourable, no action needed");
            }
            for advice in &report.advice {
                println!("  [{}] {}", advice.kind, advice.message);
            }
        }
    })
}
