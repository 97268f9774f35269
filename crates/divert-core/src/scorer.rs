//! Suitability scoring of a single alternate airport.

use crate::aircraft::AircraftProfile;
use crate::catalog::{FailureDefinition, Severity};
use crate::fuel;
use crate::models::{
    AirportCandidate, ExcludedCandidate, ExclusionReason, FlightState, SuitabilityScore,
    SuitabilityTier,
};
use crate::phase::{self, ResolvedPosition};
use crate::rules::ScoringRules;

/// Highest score a candidate may keep with one failed weather/maintenance check.
const ACCEPTABLE_CEILING: f64 = 69.9;
/// Highest score with a failed runway/fire check or two failed soft checks.
const LIMITED_CEILING: f64 = 49.9;

/// Everything about the aircraft and its failures that scoring needs.
///
/// Resolved once per ranking call and shared by every candidate.
#[derive(Debug, Clone)]
pub struct Situation<'a> {
    pub flight: &'a FlightState,
    /// Failure under analysis
    pub failure: &'a FailureDefinition,
    pub aircraft: &'a AircraftProfile,
    /// Failure under analysis followed by any secondary failures
    pub active_failures: Vec<&'a FailureDefinition>,
    pub severity: Severity,
    pub resolved: ResolvedPosition,
    pub fuel_penalty_fraction: f64,
    pub achievable_range_nm: f64,
}

impl<'a> Situation<'a> {
    pub fn new(
        flight: &'a FlightState,
        failure: &'a FailureDefinition,
        secondary: &[&'a FailureDefinition],
        aircraft: &'a AircraftProfile,
        rules: &ScoringRules,
    ) -> Self {
        let mut active_failures = vec![failure];
        for &def in secondary {
            if !active_failures.iter().any(|f| f.kind == def.kind) {
                active_failures.push(def);
            }
        }

        let severity = active_failures
            .iter()
            .map(|f| f.severity)
            .max()
            .unwrap_or(failure.severity);
        let fuel_penalty_fraction = fuel::compute_penalty(&active_failures);
        let resolved = phase::resolve(flight, &active_failures, aircraft, rules);
        let achievable_range_nm =
            fuel::achievable_range_nm(aircraft, flight, fuel_penalty_fraction, rules);

        Self {
            flight,
            failure,
            aircraft,
            active_failures,
            severity,
            resolved,
            fuel_penalty_fraction,
            achievable_range_nm,
        }
    }

    pub fn diversion_mandatory(&self) -> bool {
        self.active_failures.iter().any(|f| f.diversion_mandatory)
    }
}

#[derive(Debug, Clone)]
pub enum Evaluation {
    Scored(SuitabilityScore),
    Excluded(ExcludedCandidate),
}

/// Score one candidate against the situation.
///
/// Range infeasibility is a hard exclusion, never a low score. Missing or
/// malformed candidate fields fail the affected check only.
pub fn score(candidate: &AirportCandidate, situation: &Situation<'_>, rules: &ScoringRules) -> Evaluation {
    let aircraft = situation.aircraft;

    if !candidate.position().is_valid() {
        return exclude(
            candidate,
            ExclusionReason::InvalidPosition,
            None,
            format!("invalid coordinates ({}, {})", candidate.lat, candidate.lon),
        );
    }

    let distance_nm = situation.resolved.position.distance_nm(&candidate.position());
    if !distance_nm.is_finite() {
        return exclude(
            candidate,
            ExclusionReason::InvalidPosition,
            None,
            "distance from current position could not be established".to_string(),
        );
    }

    let range_nm = situation.achievable_range_nm;
    if distance_nm > range_nm {
        return exclude(
            candidate,
            ExclusionReason::OutOfRange,
            Some(distance_nm),
            format!(
                "{:.0} nm exceeds achievable range of {:.0} nm (fuel penalty {:.1}%)",
                distance_nm,
                range_nm,
                situation.fuel_penalty_fraction * 100.0
            ),
        );
    }

    let mut comments = Vec::new();

    let required_runway = rules.required_runway_ft(aircraft.category, situation.severity);
    let runway_ok = match candidate.runway_length_ft {
        Some(length) if length > 0 => {
            let ok = length as f64 >= required_runway;
            if !ok {
                comments.push(format!(
                    "Runway {} ft below {:.0} ft required for {} severity failure",
                    length, required_runway, situation.severity
                ));
            }
            ok
        }
        _ => {
            comments.push("Runway length unknown".to_string());
            false
        }
    };

    let min_firecat = rules.minimum_firecat(aircraft.category);
    let firecat_ok = match candidate.fire_category {
        Some(category) if (1..=10).contains(&category) => {
            let ok = category >= min_firecat;
            if !ok {
                comments.push(format!(
                    "Fire category {} below minimum {}",
                    category, min_firecat
                ));
            }
            ok
        }
        Some(category) => {
            comments.push(format!("Fire category {} is not a valid ICAO category", category));
            false
        }
        None => {
            comments.push("Fire category unknown".to_string());
            false
        }
    };

    let weather_ok = match &candidate.weather {
        Some(weather) => match (weather.ceiling_ft, weather.visibility_nm) {
            (Some(ceiling), Some(visibility)) if visibility.is_finite() => {
                let ok = ceiling >= rules.min_ceiling_ft && visibility >= rules.min_visibility_nm;
                if !ok {
                    comments.push(format!(
                        "Weather below approach minima (ceiling {} ft, visibility {:.1} nm)",
                        ceiling, visibility
                    ));
                }
                ok
            }
            _ => {
                comments.push("Incomplete weather observation; minima assumed unmet".to_string());
                false
            }
        },
        None => {
            comments.push("No weather observation; minima assumed unmet".to_string());
            false
        }
    };

    let maintenance_ok = candidate
        .maintenance_capability
        .iter()
        .any(|family| family.trim().eq_ignore_ascii_case(&aircraft.type_family));
    if !maintenance_ok {
        comments.push(format!("No {} maintenance capability", aircraft.type_family));
    }

    let mut raw: f64 = 100.0;
    if !runway_ok {
        raw -= rules.runway_penalty;
    }
    if !firecat_ok {
        raw -= rules.firecat_penalty;
    }
    if !weather_ok {
        raw -= rules.weather_penalty;
    }
    if !maintenance_ok {
        raw -= rules.maintenance_penalty;
    }

    let range_share = if range_nm > 0.0 {
        distance_nm / range_nm
    } else if distance_nm > 0.0 {
        1.0
    } else {
        0.0
    };
    raw -= rules.distance_penalty_weight * range_share;

    let mut score = (raw.clamp(0.0, 100.0) * 10.0).round() / 10.0;

    let soft_failures = [weather_ok, maintenance_ok].iter().filter(|ok| !**ok).count();
    if !runway_ok || !firecat_ok || soft_failures >= 2 {
        score = score.min(LIMITED_CEILING);
    } else if soft_failures == 1 {
        score = score.min(ACCEPTABLE_CEILING);
    }

    if range_share > 0.8 {
        comments.push(format!(
            "Near range limit: {:.0} of {:.0} nm achievable",
            distance_nm, range_nm
        ));
    }

    Evaluation::Scored(SuitabilityScore {
        icao: candidate.icao.clone(),
        iata: candidate.iata.clone(),
        name: candidate.name.clone(),
        lat: candidate.lat,
        lon: candidate.lon,
        distance_nm,
        runway_ok,
        firecat_ok,
        weather_ok,
        maintenance_ok,
        score,
        tier: SuitabilityTier::from_score(score),
        eta_minutes: eta_minutes(distance_nm, aircraft.cruise_speed_kts),
        fuel_required_kg: fuel::fuel_required_kg(
            aircraft,
            distance_nm,
            situation.fuel_penalty_fraction,
        ),
        comments,
    })
}

fn eta_minutes(distance_nm: f64, speed_kts: f64) -> f64 {
    if speed_kts <= 0.0 {
        return f64::INFINITY;
    }
    distance_nm / speed_kts * 60.0
}

fn exclude(
    candidate: &AirportCandidate,
    reason: ExclusionReason,
    distance_nm: Option<f64>,
    detail: String,
) -> Evaluation {
    tracing::debug!("Excluding {}: {}", candidate.icao, detail);
    Evaluation::Excluded(ExcludedCandidate {
        icao: candidate.icao.clone(),
        reason,
        distance_nm,
        detail,
    })
}
