//! Aircraft type profiles and the fleet-wide lookup table.

use crate::error::{DivertError, Result};
use crate::tables::read_json_table;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Size class used for runway length and fire category minima.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AircraftCategory {
    Narrowbody,
    Widebody,
}

/// Designator used when an unknown type falls back to the generic profile.
pub const FALLBACK_DESIGNATOR: &str = "GENERIC-WB";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AircraftProfile {
    /// Type designator, e.g. "A330-300"
    pub type_designator: String,
    /// Family used to match maintenance capability, e.g. "A330"
    pub type_family: String,
    pub category: AircraftCategory,
    pub max_fuel_kg: f64,
    pub max_range_nm: f64,
    pub cruise_altitude_ft: u32,
    #[serde(default = "default_engine_count")]
    pub engine_count: u8,
    #[serde(default = "default_cruise_speed_kts")]
    pub cruise_speed_kts: f64,
}

fn default_engine_count() -> u8 {
    2
}

fn default_cruise_speed_kts() -> f64 {
    470.0
}

impl AircraftProfile {
    /// Generic mid-size widebody used when a type is not in the table.
    ///
    /// Figures follow the A330-300 so whole-fleet batch runs keep producing
    /// conservative answers for unlisted types.
    pub fn fallback_widebody() -> Self {
        Self {
            type_designator: FALLBACK_DESIGNATOR.to_string(),
            type_family: "GENERIC".to_string(),
            category: AircraftCategory::Widebody,
            max_fuel_kg: 109_185.0,
            max_range_nm: 6_350.0,
            cruise_altitude_ft: 37_000,
            engine_count: 2,
            cruise_speed_kts: 470.0,
        }
    }

    pub fn is_twin(&self) -> bool {
        self.engine_count == 2
    }

    /// Nominal still-air range per kilogram of fuel.
    pub fn nm_per_kg(&self) -> f64 {
        if self.max_fuel_kg <= 0.0 {
            return 0.0;
        }
        self.max_range_nm / self.max_fuel_kg
    }
}

/// Immutable table of aircraft profiles keyed by upper-cased designator.
#[derive(Debug, Clone)]
pub struct AircraftTable {
    profiles: BTreeMap<String, AircraftProfile>,
}

impl Default for AircraftTable {
    fn default() -> Self {
        Self::builtin()
    }
}

impl AircraftTable {
    pub fn builtin() -> Self {
        use AircraftCategory::{Narrowbody, Widebody};

        let rows = [
            ("A320-200", "A320", Narrowbody, 18_730.0, 3_300.0, 37_000, 2, 450.0),
            ("A321NEO", "A320", Narrowbody, 25_820.0, 3_500.0, 37_000, 2, 450.0),
            ("B737-800", "B737", Narrowbody, 20_894.0, 2_935.0, 37_000, 2, 453.0),
            ("A330-300", "A330", Widebody, 109_185.0, 6_350.0, 37_000, 2, 470.0),
            ("A350-900", "A350", Widebody, 110_523.0, 8_100.0, 39_000, 2, 488.0),
            ("B777-300ER", "B777", Widebody, 145_538.0, 7_370.0, 35_000, 2, 490.0),
            ("B787-9", "B787", Widebody, 101_456.0, 7_635.0, 39_000, 2, 488.0),
            ("B747-400", "B747", Widebody, 173_000.0, 7_260.0, 35_000, 4, 490.0),
        ];

        let profiles = rows
            .into_iter()
            .map(|(designator, family, category, fuel, range, cruise, engines, speed)| {
                (
                    designator.to_string(),
                    AircraftProfile {
                        type_designator: designator.to_string(),
                        type_family: family.to_string(),
                        category,
                        max_fuel_kg: fuel,
                        max_range_nm: range,
                        cruise_altitude_ft: cruise,
                        engine_count: engines,
                        cruise_speed_kts: speed,
                    },
                )
            })
            .collect();

        Self { profiles }
    }

    /// Parse a table from a JSON list of profiles.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let raw: Vec<AircraftProfile> = serde_json::from_str(json)?;
        Self::from_profiles(raw)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let raw: Vec<AircraftProfile> = read_json_table(path)?;
        Self::from_profiles(raw)
    }

    fn from_profiles(raw: Vec<AircraftProfile>) -> Result<Self> {
        let mut profiles = BTreeMap::new();
        for profile in raw {
            if profile.max_fuel_kg <= 0.0 || profile.max_range_nm <= 0.0 {
                return Err(DivertError::InvalidTable(format!(
                    "{} must have positive max_fuel_kg and max_range_nm",
                    profile.type_designator
                )));
            }
            let key = profile.type_designator.trim().to_ascii_uppercase();
            if profiles.insert(key, profile).is_some() {
                return Err(DivertError::InvalidTable(
                    "duplicate aircraft type designator".to_string(),
                ));
            }
        }
        Ok(Self { profiles })
    }

    pub fn lookup(&self, aircraft_type: &str) -> Result<&AircraftProfile> {
        self.profiles
            .get(&aircraft_type.trim().to_ascii_uppercase())
            .ok_or_else(|| DivertError::UnknownAircraftType(aircraft_type.to_string()))
    }

    /// Look up a profile, substituting the generic widebody for unknown types.
    ///
    /// Returns the profile and whether the fallback was used.
    pub fn lookup_or_fallback(&self, aircraft_type: &str) -> (AircraftProfile, bool) {
        match self.lookup(aircraft_type) {
            Ok(profile) => (profile.clone(), false),
            Err(err) => {
                tracing::warn!("{}; using {} profile", err, FALLBACK_DESIGNATOR);
                (AircraftProfile::fallback_widebody(), true)
            }
        }
    }

    pub fn profiles(&self) -> impl Iterator<Item = &AircraftProfile> {
        self.profiles.values()
    }
}
