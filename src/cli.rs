use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use krishimitra::models::{Season, SoilType};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "krishimitra",
    version,
    about = "Crop recommendations and field-operation alerts for farmers"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to config.yaml
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Override SQLite data directory
    #[arg(short, long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Farmer the command acts for
    #[arg(short, long, global = true, default_value_t = 1)]
    pub farmer: i64,

    /// Print machine-readable JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    /// Increase log verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List catalog crops, optionally for one season
    Crops {
        #[arg(short, long, value_parser = parse_season)]
        season: Option<Season>,
    },
    /// Record soil test results
    Soil {
        #[command(subcommand)]
        action: SoilCommand,
    },
    /// Record weather observations
    Weather {
        #[command(subcommand)]
        action: WeatherCommand,
    },
    /// Rank this season's crops against the latest readings
    Recommend {
        /// Minimum confidence (0-100) for a crop to be listed
        #[arg(short, long)]
        min_confidence: Option<f64>,
    },
    /// Start growing a crop and schedule its alerts
    Adopt {
        crop_id: i64,
        /// Sowing date (defaults to today)
        #[arg(long)]
        on: Option<NaiveDate>,
    },
    /// Show the full lifecycle calendar for a crop
    Calendar {
        crop_id: i64,
        /// Start date (defaults to the adoption date, else today)
        #[arg(long)]
        start: Option<NaiveDate>,
    },
    /// Manage scheduled alerts
    Alerts {
        #[command(subcommand)]
        action: AlertCommand,
    },
    /// Field advice from the last week of weather
    Advisory,
}

#[derive(Subcommand)]
pub enum SoilCommand {
    Add {
        #[arg(long)]
        ph: f64,
        /// Moisture, percent
        #[arg(long)]
        moisture: f64,
        #[arg(long)]
        nitrogen: f64,
        #[arg(long)]
        phosphorus: f64,
        #[arg(long)]
        potassium: f64,
        /// Soil temperature, °C
        #[arg(long, allow_negative_numbers = true)]
        temperature: f64,
        #[arg(long, value_parser = parse_soil_type)]
        soil_type: SoilType,
    },
}

#[derive(Subcommand)]
pub enum WeatherCommand {
    Add {
        /// Air temperature, °C
        #[arg(long, allow_negative_numbers = true)]
        temperature: f64,
        /// Relative humidity, percent
        #[arg(long)]
        humidity: f64,
        #[arg(long, default_value_t = 0.0)]
        rainfall: f64,
    },
}

#[derive(Subcommand)]
pub enum AlertCommand {
    /// Create alerts for all adopted crops
    Generate,
    /// List alerts
    List {
        /// Include completed and dismissed alerts
        #[arg(short, long)]
        all: bool,
    },
    /// Pending alerts due soon
    Upcoming {
        /// Look-ahead window in days
        #[arg(long)]
        days: Option<u32>,
    },
    Complete {
        id: i64,
    },
    Dismiss {
        id: i64,
    },
    Delete {
        id: i64,
    },
}

fn parse_season(s: &str) -> Result<Season, String> {
    Season::from_str(s).ok_or_else(|| format!("unknown season '{}' (kharif, rabi, summer)", s))
}

fn parse_soil_type(s: &str) -> Result<SoilType, String> {
    SoilType::from_str(s).ok_or_else(|| {
        format!(
            "unknown soil type '{}' (black, red, alluvial, laterite, sandy, clay, loamy)",
            s
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "krishimitra",
            "alerts",
            "upcoming",
            "--days",
            "14",
            "--farmer",
            "3",
            "--json",
        ])
        .unwrap();
        assert_eq!(cli.farmer, 3);
        assert!(cli.json);
        assert!(matches!(
            cli.command,
            Commands::Alerts {
                action: AlertCommand::Upcoming { days: Some(14) }
            }
        ));
    }

    #[test]
    fn parses_season_and_soil_type() {
        let cli = Cli::try_parse_from(["krishimitra", "crops", "--season", "zaid"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Crops {
                season: Some(Season::Summer)
            }
        ));

        let bad = Cli::try_parse_from(["krishimitra", "crops", "--season", "monsoon"]);
        assert!(bad.is_err());

        let cli = Cli::try_parse_from([
            "krishimitra",
            "soil",
            "add",
            "--ph",
            "6.5",
            "--moisture",
            "55",
            "--nitrogen",
            "25",
            "--phosphorus",
            "15",
            "--potassium",
            "20",
            "--temperature",
            "27",
            "--soil-type",
            "regur",
        ])
        .unwrap();
        assert!(matches!(
            cli.command,
            Commands::Soil {
                action: SoilCommand::Add {
                    soil_type: SoilType::Black,
                    ..
                }
            }
        ));
    }

    #[test]
    fn negative_temperatures_parse() {
        let cli = Cli::try_parse_from([
            "krishimitra",
            "soil",
            "add",
            "--ph",
            "6.5",
            "--moisture",
            "55",
            "--nitrogen",
            "25",
            "--phosphorus",
            "15",
            "--potassium",
            "20",
            "--temperature",
            "-5",
            "--soil-type",
            "black",
        ])
        .unwrap();
        assert!(matches!(
            cli.command,
            Commands::Soil {
                action: SoilCommand::Add { temperature, .. }
            } if temperature == -5.0
        ));

        let cli = Cli::try_parse_from([
            "krishimitra",
            "weather",
            "add",
            "--temperature",
            "-3.5",
            "--humidity",
            "40",
        ])
        .unwrap();
        assert!(matches!(
            cli.command,
            Commands::Weather {
                action: WeatherCommand::Add { temperature, .. }
            } if temperature == -3.5
        ));
    }

    #[test]
    fn adopt_takes_an_optional_date() {
        let cli =
            Cli::try_parse_from(["krishimitra", "adopt", "4", "--on", "2024-07-01"]).unwrap();
        match cli.command {
            Commands::Adopt { crop_id, on } => {
                assert_eq!(crop_id, 4);
                assert_eq!(on, NaiveDate::from_ymd_opt(2024, 7, 1));
            }
            _ => panic!("expected adopt"),
        }
    }
}
