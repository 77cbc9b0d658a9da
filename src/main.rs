//! Confluence CLI: evaluate every market in a snapshot file and print the
//! fused predictions as JSON.

use chrono::{DateTime, Utc};
use clap::Parser;
use confluence::config::Config;
use confluence::logging::init_logging;
use confluence::models::{FusedPrediction, Timeframe};
use confluence::services::{MarketSnapshot, PredictionService, SnapshotProvider};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "confluence")]
#[command(about = "Fuse strategy, ML and news signals into trading predictions")]
struct Cli {
    /// Snapshot file with candles, model outputs and sentiment
    #[arg(short, long)]
    snapshot: PathBuf,

    /// JSON configuration file (environment variables are used otherwise)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Evaluation time (RFC 3339); defaults to the snapshot's, then to now
    #[arg(long)]
    as_of: Option<DateTime<Utc>>,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,
}

#[derive(Serialize)]
struct FailedKey {
    coin: String,
    timeframe: Timeframe,
    error: String,
}

#[derive(Serialize)]
struct Report {
    as_of: DateTime<Utc>,
    predictions: Vec<FusedPrediction>,
    errors: Vec<FailedKey>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging();

    let config = match &cli.config {
        Some(path) => Config::from_json_file(path)?,
        None => Config::from_env()?,
    };

    let snapshot = MarketSnapshot::from_json_file(&cli.snapshot)?;
    let as_of = cli.as_of.or(snapshot.as_of).unwrap_or_else(Utc::now);
    let keys = snapshot.keys();
    info!(markets = keys.len(), %as_of, "Snapshot loaded");

    let provider = Arc::new(SnapshotProvider::new(snapshot));
    let service = PredictionService::new(provider.clone(), provider.clone(), provider, config);

    let mut report = Report {
        as_of,
        predictions: Vec::new(),
        errors: Vec::new(),
    };
    for keyed in service.predict_many(&keys, as_of).await {
        match keyed.result {
            Ok(prediction) => report.predictions.push(prediction),
            Err(err) => {
                error!(coin = %keyed.coin, timeframe = %keyed.timeframe, error = %err, "Prediction failed");
                report.errors.push(FailedKey {
                    coin: keyed.coin,
                    timeframe: keyed.timeframe,
                    error: err.to_string(),
                });
            }
        }
    }

    let output = if cli.pretty {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };
    println!("{}", output);
    Ok(())
}
