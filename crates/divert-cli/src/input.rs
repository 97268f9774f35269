//! Reading flight and airport JSON for local ranking.

use anyhow::{Context, Result};
use divert_core::{AirportCandidate, FlightState};
use serde::de::DeserializeOwned;
use std::path::Path;

fn read_json<T: DeserializeOwned>(path: &Path, what: &str) -> Result<T> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {} file '{}'", what, path.display()))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse {} file '{}'", what, path.display()))
}

pub fn read_flight_state(path: &Path) -> Result<FlightState> {
    read_json(path, "flight state")
}

/// Airports as a JSON list of candidate records.
pub fn read_airports(path: &Path) -> Result<Vec<AirportCandidate>> {
    read_json(path, "airports")
}
