//! Weather dashboard CLI
//!
//! Shows current conditions, a daily forecast and the air quality index for
//! a city, optionally keeping the AQI refreshed in the terminal.

#![allow(clippy::print_stdout, clippy::print_stderr)]

mod render;

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use application::{DashboardService, spawn_aqi_refresh_task};
use clap::{Parser, Subcommand};
use infrastructure::{AppConfig, WeatherAdapter, init_logging};
use tokio::sync::watch;
use tracing::info;

/// City shown when none is given
const DEFAULT_CITY: &str = "New Delhi";

/// Weather dashboard CLI
#[derive(Parser)]
#[command(name = "weather-dashboard")]
#[command(author, version, about = "Weather and air quality dashboard", long_about = None)]
struct Cli {
    /// Verbosity level
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Print machine-readable JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    /// OpenWeather API key (overrides the configuration file)
    #[arg(long, global = true, env = "OPENWEATHER_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Path to a configuration file (default: ./config.toml if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show current weather, forecast and air quality
    Dashboard {
        /// City name
        #[arg(default_value = DEFAULT_CITY)]
        city: String,
    },

    /// Show the daily forecast and where it came from
    Forecast {
        /// City name
        #[arg(default_value = DEFAULT_CITY)]
        city: String,
    },

    /// Show the air quality index with its health category
    Aqi {
        /// City name
        #[arg(default_value = DEFAULT_CITY)]
        city: String,
    },

    /// Show the dashboard, then keep refreshing the AQI until Ctrl-C
    Watch {
        /// City name
        #[arg(default_value = DEFAULT_CITY)]
        city: String,

        /// Seconds between refreshes (default: refresh.interval_secs)
        #[arg(long)]
        interval_secs: Option<u64>,
    },
}

/// Determine log filter level from verbosity count
const fn log_filter_from_verbosity(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Load configuration and apply command-line overrides
fn load_config(cli: &Cli) -> anyhow::Result<AppConfig> {
    let mut config = AppConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;
    if let Some(key) = &cli.api_key {
        config = config.with_api_key(key.clone());
    }
    config.validate().map_err(anyhow::Error::msg)?;
    Ok(config)
}

fn print_json(value: &impl serde::Serialize) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

async fn run(cli: Cli, config: AppConfig) -> anyhow::Result<()> {
    let adapter = WeatherAdapter::new(config.weather)?;
    let service = Arc::new(DashboardService::new(Arc::new(adapter)));

    match cli.command {
        Commands::Dashboard { city } => {
            let dashboard = service.load(&city).await?;
            if cli.json {
                print_json(&dashboard)?;
            } else {
                println!("{}", render::dashboard(&dashboard));
            }
        },

        Commands::Forecast { city } => {
            let forecast = service.forecast_for(&city).await?;
            if cli.json {
                print_json(&forecast)?;
            } else {
                println!("{}", render::forecast(&forecast));
            }
        },

        Commands::Aqi { city } => {
            let resolved = service.resolve_city(&city).await?;
            let result = service
                .air_quality(&resolved.location, &resolved.label())
                .await?;
            if cli.json {
                print_json(&render::air_quality_json(&result))?;
            } else {
                println!("{}", render::air_quality(&result));
            }
        },

        Commands::Watch {
            city,
            interval_secs,
        } => {
            let interval = interval_secs.map_or_else(|| config.refresh.interval(), Duration::from_secs);
            anyhow::ensure!(!interval.is_zero(), "--interval-secs must be greater than 0");

            let dashboard = service.load(&city).await?;
            if cli.json {
                print_json(&dashboard)?;
            } else {
                println!("{}", render::dashboard(&dashboard));
            }

            let (tx, mut rx) = watch::channel(Some(dashboard.air_quality.clone()));
            let handle = spawn_aqi_refresh_task(
                Arc::clone(&service),
                dashboard.city.location,
                dashboard.weather.location_label(),
                interval,
                tx,
            );
            info!(interval_secs = interval.as_secs(), "Watching air quality, press Ctrl-C to stop");

            loop {
                tokio::select! {
                    changed = rx.changed() => {
                        if changed.is_err() {
                            break;
                        }
                        let latest = rx.borrow_and_update().clone();
                        if let Some(result) = latest {
                            if cli.json {
                                print_json(&render::air_quality_json(&result))?;
                            } else {
                                println!("{}", render::air_quality(&result));
                            }
                        }
                    },
                    signal = tokio::signal::ctrl_c() => {
                        signal.context("Failed to listen for Ctrl-C")?;
                        break;
                    },
                }
            }

            handle.stop();
        },
    }

    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e:#}");
            return ExitCode::FAILURE;
        },
    };

    if let Err(e) = init_logging(config.logging.format, log_filter_from_verbosity(cli.verbose)) {
        eprintln!("Warning: {e}");
    }

    match run(cli, config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        },
    }
}
