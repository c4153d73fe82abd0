use anyhow::Context;
use clap::{Parser, Subcommand};
use glucose_trend::history::{export_to_csv, export_to_json, import_from_csv, replay};
use glucose_trend::{Config, GlucoseSample, GlucoseUnit, Reading, ReadingHistory, TrendClassifier};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "glucose-trend")]
#[command(author, version, about = "Blood glucose trend arrows", long_about = None)]
struct Args {
    #[arg(short, long, help = "Path to custom config file")]
    config: Option<PathBuf>,

    #[arg(short, long, help = "Verbose logging")]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Classify the trend between two readings
    Classify {
        #[arg(long, help = "Current value in mg/dl")]
        current: f64,
        #[arg(long, help = "Previous value in mg/dl")]
        previous: f64,
        #[arg(long, help = "Minutes between the readings", default_value = "5")]
        minutes: f64,
    },
    /// Show a mg/dl value in the configured (or given) unit
    Convert {
        #[arg(long, help = "Value in mg/dl")]
        value: f64,
        #[arg(long, help = "Display unit (mgdl, mmol)")]
        units: Option<GlucoseUnit>,
    },
    /// Replay a CSV of timestamp,value rows and print the trend for each
    Replay {
        #[arg(long, help = "CSV file with timestamp (ms) and value (mg/dl) columns")]
        file: PathBuf,
        #[arg(long, help = "Export annotated readings (.csv or .json)", value_name = "FILE")]
        export: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let filter = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter)).init();

    let config = match &args.config {
        Some(path) => {
            log::info!("Loading config from: {}", path.display());
            Config::load_from(path)?
        }
        None => Config::load().unwrap_or_else(|e| {
            log::warn!("Falling back to default config: {}", e);
            Config::default()
        }),
    };

    let classifier = TrendClassifier::new(config.trend.clone())?;

    match args.command {
        Command::Classify { current, previous, minutes } => {
            let elapsed_ms = (minutes * 60_000.0).round() as i64;
            let direction = classifier.classify_pair(
                &GlucoseSample::new(current, elapsed_ms),
                &GlucoseSample::new(previous, 0),
            );
            println!("{} {}", direction, direction.glyph());
        }
        Command::Convert { value, units } => {
            let reading = Reading::default().with_value(value);
            match units {
                Some(units) => println!("{} {}", reading.display_value(&units), units),
                None => println!("{} {}", reading.display_value(&config), config.display.units),
            }
        }
        Command::Replay { file, export } => {
            run_replay(&config, &classifier, &file, export.as_deref())?;
        }
    }

    Ok(())
}

fn run_replay(
    config: &Config,
    classifier: &TrendClassifier,
    file: &Path,
    export: Option<&Path>,
) -> anyhow::Result<()> {
    let readings = import_from_csv(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    log::info!("Replaying {} readings", readings.len());

    let mut history = ReadingHistory::new(config.history.capacity);
    let skipped = replay(&mut history, readings, classifier);
    if skipped > 0 {
        log::warn!("Skipped {} out-of-order readings", skipped);
    }

    for reading in history.iter() {
        println!("{}  ({} {})", reading, reading.display_value(config), config.display.units);
    }

    if let Some(path) = export {
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => export_to_json(&history, path)?,
            _ => export_to_csv(&history, path)?,
        }
        log::info!("Exported {} readings to {}", history.len(), path.display());
    }

    Ok(())
}
