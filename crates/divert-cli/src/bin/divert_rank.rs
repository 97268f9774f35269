//! Rank diversion airports for a flight with an in-flight failure.
//!
//! Usage:
//!   divert-rank --demo --failure engine_failure --pretty
//!   divert-rank --flight flight.json --airports airports.json --failure decompression
//!   divert-rank --demo --failure hydraulic_failure --server http://localhost:3000

use anyhow::{bail, Context, Result};
use clap::Parser;
use divert_cli::{fixtures, input, DivertClient};
use divert_core::{AircraftTable, DiversionPlanner, FailureCatalog, ScoringRules};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(author, version, about = "Rank diversion airports after an in-flight failure")]
struct Args {
    /// Flight state JSON file
    #[arg(long)]
    flight: Option<PathBuf>,

    /// Failure kind, e.g. engine_failure
    #[arg(long)]
    failure: String,

    /// Airport candidates JSON file (list of airports)
    #[arg(long)]
    airports: Option<PathBuf>,

    /// Use the synthetic demo flight and airports
    #[arg(long, default_value_t = false)]
    demo: bool,

    /// Failure catalog JSON file (built-in catalog if omitted)
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Aircraft table JSON file (built-in table if omitted)
    #[arg(long)]
    aircraft_table: Option<PathBuf>,

    /// Scoring rules JSON file (built-in thresholds if omitted)
    #[arg(long)]
    rules: Option<PathBuf>,

    /// Post the request to a diversion server instead of ranking locally
    #[arg(long)]
    server: Option<String>,

    /// Request timeout in seconds when using --server
    #[arg(long, default_value_t = 10)]
    timeout_s: u64,

    /// Pretty-print the result
    #[arg(long, default_value_t = false)]
    pretty: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let flight = match (&args.flight, args.demo) {
        (Some(path), _) => input::read_flight_state(path)?,
        (None, true) => fixtures::demo_flight(),
        (None, false) => bail!("--flight is required unless --demo is given"),
    };

    let candidates = match (&args.airports, args.demo) {
        (Some(path), _) => Some(input::read_airports(path)?),
        (None, true) => Some(fixtures::demo_airports()),
        (None, false) if args.server.is_some() => None,
        (None, false) => bail!("--airports is required unless --demo or --server is given"),
    };

    let result = match &args.server {
        Some(url) => {
            tracing::info!("Posting ranking request to {}", url);
            let client = DivertClient::new(url.as_str(), Duration::from_secs(args.timeout_s))?;
            client.rank(&flight, &args.failure, candidates.as_deref())?
        }
        None => {
            let catalog = match &args.catalog {
                Some(path) => FailureCatalog::from_path(path)?,
                None => FailureCatalog::builtin(),
            };
            let aircraft = match &args.aircraft_table {
                Some(path) => AircraftTable::from_path(path)?,
                None => AircraftTable::builtin(),
            };
            let rules = match &args.rules {
                Some(path) => ScoringRules::from_path(path)?,
                None => ScoringRules::default(),
            };
            let planner = DiversionPlanner::new(catalog, aircraft, rules);
            planner
                .rank_str(&flight, &args.failure, candidates.as_deref().unwrap_or_default())
                .context("Ranking failed")?
        }
    };

    let output = if args.pretty {
        serde_json::to_string_pretty(&result)?
    } else {
        serde_json::to_string(&result)?
    };
    println!("{}", output);

    if result.manual_review_required {
        tracing::warn!(
            "Manual review required: {}",
            result.error.as_deref().unwrap_or("no suitable alternate")
        );
    }
    Ok(())
}
