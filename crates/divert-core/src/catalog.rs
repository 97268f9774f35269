//! Static catalog of in-flight failure kinds.

use crate::error::{DivertError, Result};
use crate::tables::read_json_table;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    EngineFailure,
    HydraulicFailure,
    ElectricalFailure,
    Decompression,
    FuelEmergency,
    MedicalEmergency,
    LandingGearMalfunction,
    PressurizationFailure,
}

impl FailureKind {
    pub const ALL: [FailureKind; 8] = [
        FailureKind::EngineFailure,
        FailureKind::HydraulicFailure,
        FailureKind::ElectricalFailure,
        FailureKind::Decompression,
        FailureKind::FuelEmergency,
        FailureKind::MedicalEmergency,
        FailureKind::LandingGearMalfunction,
        FailureKind::PressurizationFailure,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::EngineFailure => "engine_failure",
            Self::HydraulicFailure => "hydraulic_failure",
            Self::ElectricalFailure => "electrical_failure",
            Self::Decompression => "decompression",
            Self::FuelEmergency => "fuel_emergency",
            Self::MedicalEmergency => "medical_emergency",
            Self::LandingGearMalfunction => "landing_gear_malfunction",
            Self::PressurizationFailure => "pressurization_failure",
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FailureKind {
    type Err = DivertError;

    fn from_str(s: &str) -> Result<Self> {
        let needle = s.trim();
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(needle))
            .ok_or_else(|| DivertError::UnknownFailureKind(s.to_string()))
    }
}

/// Severity of a failure. Ordered, so `>=` comparisons read naturally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        })
    }
}

/// Operational consequences of a failure kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FailureDefinition {
    pub kind: FailureKind,
    pub severity: Severity,
    /// System identifiers affected, e.g. "HYD 2", "GEN 2"
    pub affected_systems: BTreeSet<String>,
    /// Fractional increase over nominal fuel burn (0.22 = +22%)
    pub fuel_burn_penalty_fraction: f64,
    /// Hard altitude ceiling imposed by the failure
    pub altitude_restriction_ft: Option<u32>,
    /// Fixed drift-down decrement for twin-engine aircraft
    #[serde(default)]
    pub drift_down_ft: Option<u32>,
    pub diversion_mandatory: bool,
}

/// Table row as it appears in a JSON catalog keyed by failure kind.
#[derive(Debug, Deserialize)]
struct CatalogEntry {
    severity: Severity,
    #[serde(default)]
    affected_systems: BTreeSet<String>,
    fuel_burn_penalty_fraction: f64,
    #[serde(default)]
    altitude_restriction_ft: Option<u32>,
    #[serde(default)]
    drift_down_ft: Option<u32>,
    diversion_mandatory: bool,
}

/// Immutable failure catalog, built once and shared read-only.
#[derive(Debug, Clone)]
pub struct FailureCatalog {
    entries: BTreeMap<FailureKind, FailureDefinition>,
}

impl Default for FailureCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl FailureCatalog {
    /// The canonical built-in catalog.
    pub fn builtin() -> Self {
        let rows = [
            (
                FailureKind::EngineFailure,
                Severity::Critical,
                &["ENG 2", "GEN 2", "HYD 2", "BLEED 2"][..],
                0.22,
                None,
                Some(10_000),
                true,
            ),
            (
                FailureKind::HydraulicFailure,
                Severity::High,
                &["HYD 2", "FLT CTL", "L/G"][..],
                0.15,
                None,
                None,
                true,
            ),
            (
                FailureKind::ElectricalFailure,
                Severity::Medium,
                &["GEN 2", "AC BUS 2"][..],
                0.15,
                None,
                None,
                false,
            ),
            (
                FailureKind::Decompression,
                Severity::Critical,
                &["PRESS", "CABIN", "OXY"][..],
                0.30,
                Some(10_000),
                None,
                true,
            ),
            (
                FailureKind::FuelEmergency,
                Severity::Critical,
                &["FUEL"][..],
                0.10,
                None,
                None,
                true,
            ),
            (
                FailureKind::MedicalEmergency,
                Severity::Medium,
                &[][..],
                0.0,
                None,
                None,
                true,
            ),
            (
                FailureKind::LandingGearMalfunction,
                Severity::High,
                &["L/G", "BRAKES"][..],
                0.10,
                None,
                None,
                false,
            ),
            (
                FailureKind::PressurizationFailure,
                Severity::High,
                &["PRESS", "BLEED"][..],
                0.25,
                Some(10_000),
                None,
                true,
            ),
        ];

        let entries = rows
            .into_iter()
            .map(
                |(kind, severity, systems, penalty, restriction, drift_down, mandatory)| {
                    (
                        kind,
                        FailureDefinition {
                            kind,
                            severity,
                            affected_systems: systems.iter().map(|s| s.to_string()).collect(),
                            fuel_burn_penalty_fraction: penalty,
                            altitude_restriction_ft: restriction,
                            drift_down_ft: drift_down,
                            diversion_mandatory: mandatory,
                        },
                    )
                },
            )
            .collect();

        Self { entries }
    }

    /// Parse a catalog from a JSON object keyed by failure kind.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let raw: BTreeMap<String, CatalogEntry> = serde_json::from_str(json)?;
        Self::from_entries(raw)
    }

    /// Load a catalog from a JSON file keyed by failure kind.
    pub fn from_path(path: &Path) -> Result<Self> {
        let raw: BTreeMap<String, CatalogEntry> = read_json_table(path)?;
        Self::from_entries(raw)
    }

    fn from_entries(raw: BTreeMap<String, CatalogEntry>) -> Result<Self> {
        let mut entries = BTreeMap::new();
        for (key, entry) in raw {
            let kind: FailureKind = key.parse()?;
            let penalty = entry.fuel_burn_penalty_fraction;
            if !penalty.is_finite() || penalty < 0.0 {
                return Err(DivertError::InvalidTable(format!(
                    "{} has invalid fuel_burn_penalty_fraction {}",
                    kind, penalty
                )));
            }
            entries.insert(
                kind,
                FailureDefinition {
                    kind,
                    severity: entry.severity,
                    affected_systems: entry.affected_systems,
                    fuel_burn_penalty_fraction: penalty,
                    altitude_restriction_ft: entry.altitude_restriction_ft,
                    drift_down_ft: entry.drift_down_ft,
                    diversion_mandatory: entry.diversion_mandatory,
                },
            );
        }
        Ok(Self { entries })
    }

    pub fn lookup(&self, kind: FailureKind) -> Result<&FailureDefinition> {
        self.entries
            .get(&kind)
            .ok_or_else(|| DivertError::UnknownFailureKind(kind.to_string()))
    }

    pub fn lookup_str(&self, kind: &str) -> Result<&FailureDefinition> {
        self.lookup(kind.parse()?)
    }

    pub fn definitions(&self) -> impl Iterator<Item = &FailureDefinition> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
