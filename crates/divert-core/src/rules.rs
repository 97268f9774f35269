//! Canonical thresholds and weights for alternate scoring.

use crate::aircraft::AircraftCategory;
use crate::catalog::Severity;
use crate::error::Result;
use crate::tables::read_json_table;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for suitability scoring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringRules {
    /// Nominal landing runway length for narrowbody aircraft (feet)
    pub narrowbody_runway_ft: u32,
    /// Nominal landing runway length for widebody aircraft (feet)
    pub widebody_runway_ft: u32,
    /// Multiplier on nominal runway length for high/critical failures
    pub severe_runway_margin: f64,
    /// Minimum ICAO fire category for narrowbody aircraft
    pub narrowbody_min_firecat: u8,
    /// Minimum ICAO fire category for widebody aircraft
    pub widebody_min_firecat: u8,
    /// Instrument approach minimum ceiling (feet)
    pub min_ceiling_ft: u32,
    /// Instrument approach minimum visibility (nautical miles)
    pub min_visibility_nm: f64,
    pub runway_penalty: f64,
    pub firecat_penalty: f64,
    pub weather_penalty: f64,
    pub maintenance_penalty: f64,
    /// Points lost at the edge of achievable range, linear in distance
    pub distance_penalty_weight: f64,
    /// Share of achievable range held back as reserve
    pub range_reserve_fraction: f64,
    /// Altitude below which drift-down is not applied (feet)
    pub drift_down_floor_ft: u32,
}

impl Default for ScoringRules {
    fn default() -> Self {
        Self {
            narrowbody_runway_ft: 6_000,
            widebody_runway_ft: 8_000,
            severe_runway_margin: 1.2,
            narrowbody_min_firecat: 7,
            widebody_min_firecat: 9,
            min_ceiling_ft: 200,
            min_visibility_nm: 0.5,
            runway_penalty: 40.0,
            firecat_penalty: 40.0,
            weather_penalty: 20.0,
            maintenance_penalty: 15.0,
            distance_penalty_weight: 30.0,
            range_reserve_fraction: 0.05,
            drift_down_floor_ft: 10_000,
        }
    }
}

impl ScoringRules {
    pub fn from_path(path: &Path) -> Result<Self> {
        read_json_table(path)
    }

    /// Runway length required to land the category with a failure of `severity`.
    pub fn required_runway_ft(&self, category: AircraftCategory, severity: Severity) -> f64 {
        let nominal = match category {
            AircraftCategory::Narrowbody => self.narrowbody_runway_ft,
            AircraftCategory::Widebody => self.widebody_runway_ft,
        } as f64;

        if severity >= Severity::High {
            nominal * self.severe_runway_margin
        } else {
            nominal
        }
    }

    pub fn minimum_firecat(&self, category: AircraftCategory) -> u8 {
        match category {
            AircraftCategory::Narrowbody => self.narrowbody_min_firecat,
            AircraftCategory::Widebody => self.widebody_min_firecat,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severe_failures_add_runway_margin() {
        let rules = ScoringRules::default();
        let nominal = rules.required_runway_ft(AircraftCategory::Widebody, Severity::Medium);
        let critical = rules.required_runway_ft(AircraftCategory::Widebody, Severity::Critical);
        let high = rules.required_runway_ft(AircraftCategory::Widebody, Severity::High);
        assert!((nominal - 8_000.0).abs() < 1e-9);
        assert!((critical - 9_600.0).abs() < 1e-9);
        assert!((high - critical).abs() < 1e-9);
    }

    #[test]
    fn hard_checks_outweigh_soft_checks() {
        let rules = ScoringRules::default();
        assert!(rules.runway_penalty > rules.weather_penalty);
        assert!(rules.runway_penalty > rules.maintenance_penalty);
        assert!(rules.firecat_penalty > rules.weather_penalty);
        assert!(rules.firecat_penalty > rules.maintenance_penalty);
    }

    #[test]
    fn partial_rules_file_keeps_defaults() {
        let rules: ScoringRules = serde_json::from_str(r#"{"min_ceiling_ft": 300}"#).unwrap();
        assert_eq!(rules.min_ceiling_ft, 300);
        assert_eq!(rules.widebody_min_firecat, 9);
    }
}
