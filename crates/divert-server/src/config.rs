//! Server configuration from environment.

use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    pub server_port: u16,
    /// JSON failure catalog keyed by kind; built-in table when unset
    pub failure_catalog_path: Option<PathBuf>,
    /// JSON list of aircraft profiles; built-in table when unset
    pub aircraft_table_path: Option<PathBuf>,
    /// JSON scoring thresholds; defaults when unset
    pub scoring_rules_path: Option<PathBuf>,
    /// JSON list of airport candidates used when a request supplies none
    pub airports_path: Option<PathBuf>,
    pub weather_max_age_s: u64,
    pub weather_max_entries: usize,
    pub weather_prune_interval_s: u64,
    pub log_json: bool,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            server_port: env::var("DIVERT_PORT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(3000),
            failure_catalog_path: env_path("DIVERT_FAILURE_CATALOG"),
            aircraft_table_path: env_path("DIVERT_AIRCRAFT_TABLE"),
            scoring_rules_path: env_path("DIVERT_SCORING_RULES"),
            airports_path: env_path("DIVERT_AIRPORTS"),
            weather_max_age_s: env::var("DIVERT_WEATHER_MAX_AGE_S")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(3600),
            weather_max_entries: env::var("DIVERT_WEATHER_MAX_ENTRIES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(5000),
            weather_prune_interval_s: env::var("DIVERT_WEATHER_PRUNE_INTERVAL_S")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(60),
            log_json: env::var("DIVERT_LOG_JSON")
                .map(|v| matches!(v.trim(), "1" | "true" | "yes"))
                .unwrap_or(false),
        }
    }
}

fn env_path(key: &str) -> Option<PathBuf> {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}
