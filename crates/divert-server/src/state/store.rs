//! In-memory state store using DashMap.

use crate::cache::{self, CacheEntry};
use crate::config::Config;
use dashmap::DashMap;
use divert_core::tables::read_json_table;
use divert_core::{
    AircraftTable, AirportCandidate, DiversionPlanner, FailureCatalog, ScoringRules,
    WeatherSnapshot,
};
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
struct WeatherEntry {
    snapshot: WeatherSnapshot,
    fetched_at: Instant,
}

impl CacheEntry for WeatherEntry {
    fn fetched_at(&self) -> Instant {
        self.fetched_at
    }
}

/// Application state: immutable ranking tables plus the caller-side
/// airport database and pre-fetched weather snapshots.
pub struct AppState {
    planner: DiversionPlanner,
    airports: DashMap<String, AirportCandidate>,
    weather: DashMap<String, WeatherEntry>,
    config: Config,
}

fn airport_key(icao: &str) -> String {
    icao.trim().to_ascii_uppercase()
}

impl AppState {
    /// State with built-in tables and an empty airport database.
    pub fn new(config: Config) -> Self {
        Self::with_planner(DiversionPlanner::default(), config)
    }

    pub fn with_planner(planner: DiversionPlanner, config: Config) -> Self {
        Self {
            planner,
            airports: DashMap::new(),
            weather: DashMap::new(),
            config,
        }
    }

    /// Build state from the tables named in the configuration.
    pub fn from_config(config: Config) -> divert_core::Result<Self> {
        let catalog = match &config.failure_catalog_path {
            Some(path) => FailureCatalog::from_path(path)?,
            None => FailureCatalog::builtin(),
        };
        let aircraft = match &config.aircraft_table_path {
            Some(path) => AircraftTable::from_path(path)?,
            None => AircraftTable::builtin(),
        };
        let rules = match &config.scoring_rules_path {
            Some(path) => ScoringRules::from_path(path)?,
            None => ScoringRules::default(),
        };

        let airports: Vec<AirportCandidate> = match &config.airports_path {
            Some(path) => read_json_table(path)?,
            None => Vec::new(),
        };

        tracing::info!(
            "Loaded {} failure definitions, {} aircraft profiles, {} airports",
            catalog.len(),
            aircraft.profiles().count(),
            airports.len()
        );

        let state = Self::with_planner(DiversionPlanner::new(catalog, aircraft, rules), config);
        for airport in airports {
            state.upsert_airport(airport);
        }
        Ok(state)
    }

    pub fn planner(&self) -> &DiversionPlanner {
        &self.planner
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Insert or replace an airport. Returns true when it was new.
    pub fn upsert_airport(&self, mut airport: AirportCandidate) -> bool {
        let key = airport_key(&airport.icao);
        airport.icao = key.clone();
        self.airports.insert(key, airport).is_none()
    }

    pub fn remove_airport(&self, icao: &str) -> bool {
        self.airports.remove(&airport_key(icao)).is_some()
    }

    pub fn get_airport(&self, icao: &str) -> Option<AirportCandidate> {
        self.airports.get(&airport_key(icao)).map(|a| a.clone())
    }

    /// All airports, ordered by ICAO code.
    pub fn get_airports(&self) -> Vec<AirportCandidate> {
        let mut airports: Vec<AirportCandidate> =
            self.airports.iter().map(|a| a.value().clone()).collect();
        airports.sort_by(|a, b| a.icao.cmp(&b.icao));
        airports
    }

    pub fn airport_count(&self) -> usize {
        self.airports.len()
    }

    pub fn store_weather(&self, icao: &str, snapshot: WeatherSnapshot) {
        self.weather.insert(
            airport_key(icao),
            WeatherEntry {
                snapshot,
                fetched_at: Instant::now(),
            },
        );
    }

    /// Stored snapshot for an airport, unless it is older than the configured age.
    pub fn get_weather(&self, icao: &str) -> Option<WeatherSnapshot> {
        let max_age = Duration::from_secs(self.config.weather_max_age_s);
        self.weather
            .get(&airport_key(icao))
            .filter(|entry| entry.fetched_at.elapsed() <= max_age)
            .map(|entry| entry.snapshot.clone())
    }

    /// All fresh weather snapshots keyed by ICAO code.
    pub fn get_all_weather(&self) -> Vec<(String, WeatherSnapshot)> {
        let max_age = Duration::from_secs(self.config.weather_max_age_s);
        let mut snapshots: Vec<(String, WeatherSnapshot)> = self
            .weather
            .iter()
            .filter(|entry| entry.fetched_at.elapsed() <= max_age)
            .map(|entry| (entry.key().clone(), entry.snapshot.clone()))
            .collect();
        snapshots.sort_by(|a, b| a.0.cmp(&b.0));
        snapshots
    }

    pub fn prune_weather(&self) -> usize {
        cache::prune_cache(
            &self.weather,
            self.config.weather_max_entries,
            Duration::from_secs(self.config.weather_max_age_s),
        )
    }

    /// Candidate list for one ranking call.
    ///
    /// Uses the request's candidates when given, the airport database
    /// otherwise. Stored weather fills in candidates that carry none.
    pub fn candidates_for(&self, supplied: Option<Vec<AirportCandidate>>) -> Vec<AirportCandidate> {
        let mut candidates = supplied.unwrap_or_else(|| self.get_airports());
        for candidate in &mut candidates {
            if candidate.weather.is_none() {
                candidate.weather = self.get_weather(&candidate.icao);
            }
        }
        candidates
    }
}
