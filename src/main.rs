use std::process::ExitCode;

use chrono::Utc;
use slot_matcher::config::{LoggingSettings, Settings};
use slot_matcher::core::{Matcher, MatcherOptions};
use slot_matcher::services::{offset_day, MatchingRunner, MemoryStore, RunnerError};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Initialize logging; LOG_LEVEL and LOG_FORMAT override the config file
fn init_logging(settings: &LoggingSettings) {
    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| settings.level.clone());
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| settings.format.clone());

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(log_level))
        .with_target(false)
        .with_level(true);

    if log_format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.compact().init();
    }
}

fn run(settings: &Settings) -> Result<(), Box<dyn std::error::Error>> {
    let store = MemoryStore::load(&settings.store.path)?;
    info!("Slot store loaded from {}", settings.store.path);

    let today = Utc::now().date_naive();
    let day = match settings.runner.date {
        Some(date) => date,
        None => offset_day(today, settings.runner.day_offset)?,
    };

    let options = MatcherOptions::from(&settings.matching);
    let mut runner = MatchingRunner::new(store, Matcher::new(options));

    let summary = runner
        .run_for(day, today, settings.runner.delete_previous_matches)
        .map_err(|e: RunnerError| {
            error!("Matching run for {} failed: {}", day, e);
            e
        })?;

    runner.into_store().persist(settings.store.output_path())?;
    info!("Store written to {}", settings.store.output_path());

    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

fn main() -> ExitCode {
    // Load .env file if present
    dotenv::dotenv().ok();

    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            init_logging(&LoggingSettings::default());
            error!("Failed to load configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    init_logging(&settings.logging);
    info!("Starting slot matcher...");

    match run(&settings) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
