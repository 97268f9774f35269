//! AppState loading and weather store tests.

use divert_core::{FailureKind, WeatherSnapshot};
use divert_server::config::Config;
use divert_server::state::AppState;
use std::path::PathBuf;

fn temp_file(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("divert-test-{}-{}", std::process::id(), name));
    std::fs::write(&path, contents).expect("write temp table");
    path
}

fn base_config() -> Config {
    let mut config = Config::from_env();
    config.failure_catalog_path = None;
    config.aircraft_table_path = None;
    config.scoring_rules_path = None;
    config.airports_path = None;
    config.weather_max_age_s = 3600;
    config.weather_max_entries = 2;
    config
}

#[test]
fn loads_tables_from_config_paths() {
    let catalog = temp_file(
        "catalog.json",
        r#"{"engine_failure": {"severity": "critical", "fuel_burn_penalty_fraction": 0.25, "drift_down_ft": 12000, "diversion_mandatory": true}}"#,
    );
    let airports = temp_file(
        "airports.json",
        r#"[
            {"icao": "einn", "name": "Shannon", "lat": 52.70, "lon": -8.92, "runway_length_ft": 10495, "fire_category": 9},
            {"icao": "EIDW", "name": "Dublin", "lat": 53.42, "lon": -6.27, "runway_length_ft": 10200, "fire_category": 9}
        ]"#,
    );

    let mut config = base_config();
    config.failure_catalog_path = Some(catalog.clone());
    config.airports_path = Some(airports.clone());

    let state = AppState::from_config(config).expect("load state");
    assert_eq!(state.airport_count(), 2);
    assert!(state.get_airport("EINN").is_some());

    let engine = state.planner().catalog.lookup(FailureKind::EngineFailure).unwrap();
    assert_eq!(engine.drift_down_ft, Some(12_000));
    assert!(state.planner().catalog.lookup(FailureKind::HydraulicFailure).is_err());

    let _ = std::fs::remove_file(catalog);
    let _ = std::fs::remove_file(airports);
}

#[test]
fn missing_table_file_fails_startup() {
    let mut config = base_config();
    config.aircraft_table_path = Some(PathBuf::from("/nonexistent/aircraft.json"));
    assert!(AppState::from_config(config).is_err());
}

#[test]
fn stored_weather_fills_candidates_without_weather() {
    let state = AppState::new(base_config());
    state.upsert_airport(
        serde_json::from_str(r#"{"icao": "BIKF", "lat": 63.98, "lon": -22.61}"#).unwrap(),
    );
    state.store_weather(
        "bikf",
        WeatherSnapshot { ceiling_ft: Some(800), visibility_nm: Some(2.0), observed_at: None },
    );

    let candidates = state.candidates_for(None);
    assert_eq!(candidates.len(), 1);
    assert_eq!(candidates[0].weather.as_ref().unwrap().ceiling_ft, Some(800));
}

#[test]
fn weather_store_is_bounded() {
    let state = AppState::new(base_config());
    for icao in ["AAAA", "BBBB", "CCCC"] {
        state.store_weather(
            icao,
            WeatherSnapshot { ceiling_ft: Some(1000), visibility_nm: Some(5.0), observed_at: None },
        );
        std::thread::sleep(std::time::Duration::from_millis(2));
    }

    assert_eq!(state.prune_weather(), 1);
    assert!(state.get_weather("AAAA").is_none());
    assert_eq!(state.get_all_weather().len(), 2);
}
