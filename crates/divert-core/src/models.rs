//! Core data models for diversion analysis.

use crate::catalog::{FailureKind, Severity};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub lat: f64,
    pub lon: f64,
}

impl Position {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    pub fn is_valid(&self) -> bool {
        crate::spatial::is_valid_position(self.lat, self.lon)
    }

    pub fn distance_nm(&self, other: &Position) -> f64 {
        crate::spatial::distance_nm(self.lat, self.lon, other.lat, other.lon)
    }
}

/// Origin or destination of the planned route.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteEndpoint {
    pub code: String,
    pub lat: f64,
    pub lon: f64,
}

impl RouteEndpoint {
    pub fn position(&self) -> Position {
        Position::new(self.lat, self.lon)
    }
}

/// Snapshot of an aircraft at the moment a failure is analysed.
///
/// Created per analysis call and never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlightState {
    pub aircraft_type: String,
    pub origin: RouteEndpoint,
    pub destination: RouteEndpoint,
    pub position_nm_from_origin: f64,
    pub altitude_ft: u32,
    /// Fuel on board; when absent, remaining range is derived from route progress
    #[serde(default)]
    pub fuel_remaining_kg: Option<f64>,
    /// Current coordinates; when absent, interpolated along the planned great circle
    #[serde(default)]
    pub current_position: Option<Position>,
    /// Additional simultaneous failures beyond the one under analysis
    #[serde(default)]
    pub secondary_failures: Vec<FailureKind>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PhaseOfFlight {
    Climb,
    Cruise,
    Descent,
    Approach,
}

/// Pre-fetched weather for a candidate airport.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    #[serde(default)]
    pub ceiling_ft: Option<u32>,
    #[serde(default)]
    pub visibility_nm: Option<f64>,
    #[serde(default)]
    pub observed_at: Option<DateTime<Utc>>,
}

/// Airport record supplied by the caller's airport database.
///
/// Optional fields model incomplete records: a missing value fails the
/// corresponding check instead of aborting the ranking.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AirportCandidate {
    pub icao: String,
    #[serde(default)]
    pub iata: Option<String>,
    #[serde(default)]
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    #[serde(default)]
    pub runway_length_ft: Option<u32>,
    /// ICAO rescue and firefighting category (1-10)
    #[serde(default)]
    pub fire_category: Option<u8>,
    /// Aircraft type families the airport can service, e.g. "A330"
    #[serde(default)]
    pub maintenance_capability: BTreeSet<String>,
    #[serde(default)]
    pub weather: Option<WeatherSnapshot>,
}

impl AirportCandidate {
    pub fn position(&self) -> Position {
        Position::new(self.lat, self.lon)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuitabilityTier {
    Unsuitable,
    Limited,
    Acceptable,
    Good,
    Excellent,
}

impl SuitabilityTier {
    /// Map a 0-100 score to its display tier.
    pub fn from_score(score: f64) -> Self {
        if score >= 85.0 {
            Self::Excellent
        } else if score >= 70.0 {
            Self::Good
        } else if score >= 50.0 {
            Self::Acceptable
        } else if score >= 30.0 {
            Self::Limited
        } else {
            Self::Unsuitable
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuitabilityScore {
    pub icao: String,
    #[serde(default)]
    pub iata: Option<String>,
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    /// Distance from the aircraft's current position
    pub distance_nm: f64,
    pub runway_ok: bool,
    pub firecat_ok: bool,
    pub weather_ok: bool,
    pub maintenance_ok: bool,
    pub score: f64,
    pub tier: SuitabilityTier,
    pub eta_minutes: f64,
    pub fuel_required_kg: f64,
    pub comments: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExclusionReason {
    /// Beyond achievable range under the active fuel penalty
    OutOfRange,
    /// Coordinates missing or invalid, so range cannot be established
    InvalidPosition,
}

/// Candidate removed from the ranking by a hard safety constraint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExcludedCandidate {
    pub icao: String,
    pub reason: ExclusionReason,
    #[serde(default)]
    pub distance_nm: Option<f64>,
    pub detail: String,
}

/// Derived picture of the flight used for every candidate in one ranking.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlightAnalysis {
    pub aircraft_type: String,
    pub aircraft_profile_fallback: bool,
    pub failure_kind: FailureKind,
    pub active_failures: Vec<FailureKind>,
    pub severity: Severity,
    pub diversion_mandatory: bool,
    pub affected_systems: BTreeSet<String>,
    pub phase_of_flight: PhaseOfFlight,
    pub altitude_ft: u32,
    pub adjusted_altitude_ft: u32,
    pub fuel_penalty_fraction: f64,
    pub achievable_range_nm: f64,
    pub route_distance_nm: f64,
    pub current_position: Position,
}

/// Outcome of ranking every candidate for one failure scenario.
///
/// An empty or unsuitable result is a successful outcome: `error` explains it
/// and `manual_review_required` tells the caller to hand it to a dispatcher.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankingResult {
    pub total_evaluated: usize,
    pub suitable_count: usize,
    pub recommended_count: usize,
    pub best_alternate: Option<SuitabilityScore>,
    pub alternates: Vec<SuitabilityScore>,
    pub excluded: Vec<ExcludedCandidate>,
    pub manual_review_required: bool,
    #[serde(default)]
    pub error: Option<String>,
    pub analysis: FlightAnalysis,
    pub generated_at: DateTime<Utc>,
}
