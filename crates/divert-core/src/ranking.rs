//! Ranking of scored alternates and the outward diversion-analysis entry point.

use crate::aircraft::AircraftTable;
use crate::catalog::{FailureCatalog, FailureDefinition, FailureKind};
use crate::error::Result;
use crate::models::{
    AirportCandidate, FlightAnalysis, FlightState, RankingResult, SuitabilityScore,
};
use crate::rules::ScoringRules;
use crate::scorer::{self, Evaluation, Situation};
use chrono::Utc;
use std::cmp::Ordering;

/// Minimum score for an alternate to count as suitable.
pub const SUITABLE_SCORE: f64 = 50.0;
/// Minimum score for an alternate to be recommended.
pub const RECOMMENDED_SCORE: f64 = 70.0;

/// Score desc, then distance asc, then ICAO code so the order is total.
fn compare_alternates(a: &SuitabilityScore, b: &SuitabilityScore) -> Ordering {
    b.score
        .total_cmp(&a.score)
        .then_with(|| a.distance_nm.total_cmp(&b.distance_nm))
        .then_with(|| a.icao.cmp(&b.icao))
}

/// Score, filter and sort every candidate for one situation.
///
/// Each candidate is evaluated independently. An empty or entirely
/// infeasible candidate list yields a successful result that asks for
/// manual dispatcher review.
pub fn rank(
    candidates: &[AirportCandidate],
    situation: &Situation<'_>,
    rules: &ScoringRules,
    aircraft_profile_fallback: bool,
) -> RankingResult {
    let mut alternates = Vec::with_capacity(candidates.len());
    let mut excluded = Vec::new();

    for candidate in candidates {
        match scorer::score(candidate, situation, rules) {
            Evaluation::Scored(score) => alternates.push(score),
            Evaluation::Excluded(exclusion) => excluded.push(exclusion),
        }
    }

    alternates.sort_by(compare_alternates);

    let suitable_count = alternates
        .iter()
        .filter(|alt| alt.score >= SUITABLE_SCORE)
        .count();
    let recommended_count = alternates
        .iter()
        .filter(|alt| alt.score >= RECOMMENDED_SCORE)
        .count();
    let best_alternate = alternates
        .first()
        .filter(|alt| alt.score >= SUITABLE_SCORE)
        .cloned();

    let error = if candidates.is_empty() {
        Some("No candidate airports supplied; manual dispatcher review required".to_string())
    } else if alternates.is_empty() {
        Some(format!(
            "No candidate within achievable range of {:.0} nm; manual dispatcher review required",
            situation.achievable_range_nm
        ))
    } else if best_alternate.is_none() {
        Some("No suitable alternate (all scores below 50); manual dispatcher review required".to_string())
    } else {
        None
    };

    if let Some(note) = &error {
        tracing::warn!("{}", note);
    }

    RankingResult {
        total_evaluated: candidates.len(),
        suitable_count,
        recommended_count,
        manual_review_required: best_alternate.is_none(),
        best_alternate,
        alternates,
        excluded,
        error,
        analysis: analysis(situation, aircraft_profile_fallback),
        generated_at: Utc::now(),
    }
}

fn analysis(situation: &Situation<'_>, aircraft_profile_fallback: bool) -> FlightAnalysis {
    FlightAnalysis {
        aircraft_type: situation.aircraft.type_designator.clone(),
        aircraft_profile_fallback,
        failure_kind: situation.failure.kind,
        active_failures: situation.active_failures.iter().map(|f| f.kind).collect(),
        severity: situation.severity,
        diversion_mandatory: situation.diversion_mandatory(),
        affected_systems: situation
            .active_failures
            .iter()
            .flat_map(|f| f.affected_systems.iter().cloned())
            .collect(),
        phase_of_flight: situation.resolved.phase,
        altitude_ft: situation.flight.altitude_ft,
        adjusted_altitude_ft: situation.resolved.adjusted_altitude_ft,
        fuel_penalty_fraction: situation.fuel_penalty_fraction,
        achievable_range_nm: situation.achievable_range_nm,
        route_distance_nm: situation.resolved.route_distance_nm,
        current_position: situation.resolved.position,
    }
}

/// Diversion analysis over injected tables.
///
/// Holds only immutable data, so one planner can serve any number of
/// concurrent requests; each call builds its own working set.
#[derive(Debug, Clone, Default)]
pub struct DiversionPlanner {
    pub catalog: FailureCatalog,
    pub aircraft: AircraftTable,
    pub rules: ScoringRules,
}

impl DiversionPlanner {
    pub fn new(catalog: FailureCatalog, aircraft: AircraftTable, rules: ScoringRules) -> Self {
        Self { catalog, aircraft, rules }
    }

    /// Rank candidates for `failure_kind` plus any secondary failures on the flight.
    ///
    /// Unknown failure kinds are errors. Unknown aircraft types fall back to
    /// the generic widebody profile and are flagged in the analysis.
    pub fn rank(
        &self,
        flight: &FlightState,
        failure_kind: FailureKind,
        candidates: &[AirportCandidate],
    ) -> Result<RankingResult> {
        let failure = self.catalog.lookup(failure_kind)?;
        let secondary = flight
            .secondary_failures
            .iter()
            .map(|kind| self.catalog.lookup(*kind))
            .collect::<Result<Vec<&FailureDefinition>>>()?;
        let (aircraft, fallback) = self.aircraft.lookup_or_fallback(&flight.aircraft_type);

        let situation = Situation::new(flight, failure, &secondary, &aircraft, &self.rules);
        let result = rank(candidates, &situation, &self.rules, fallback);

        tracing::debug!(
            "Ranked {} candidates for {} on {}: {} suitable, {} excluded",
            result.total_evaluated,
            failure_kind,
            aircraft.type_designator,
            result.suitable_count,
            result.excluded.len()
        );
        Ok(result)
    }

    pub fn rank_str(
        &self,
        flight: &FlightState,
        failure_kind: &str,
        candidates: &[AirportCandidate],
    ) -> Result<RankingResult> {
        self.rank(flight, failure_kind.parse()?, candidates)
    }
}

/// Rank diversion airports against the built-in catalog, aircraft table and rules.
pub fn rank_diversion_airports(
    flight: &FlightState,
    failure_kind: FailureKind,
    candidates: &[AirportCandidate],
) -> Result<RankingResult> {
    DiversionPlanner::default().rank(flight, failure_kind, candidates)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DivertError;
    use crate::models::{Position, RouteEndpoint, SuitabilityTier, WeatherSnapshot};

    fn flight() -> FlightState {
        FlightState {
            aircraft_type: "A330-300".to_string(),
            origin: RouteEndpoint { code: "EGLL".into(), lat: 51.4700, lon: -0.4543 },
            destination: RouteEndpoint { code: "KJFK".into(), lat: 40.6413, lon: -73.7781 },
            position_nm_from_origin: 600.0,
            altitude_ft: 37_000,
            fuel_remaining_kg: None,
            current_position: Some(Position::new(53.0, -15.0)),
            secondary_failures: Vec::new(),
        }
    }

    fn airport(icao: &str, lat: f64, lon: f64, runway_ft: u32, firecat: u8) -> AirportCandidate {
        AirportCandidate {
            icao: icao.to_string(),
            iata: None,
            name: icao.to_string(),
            lat,
            lon,
            runway_length_ft: Some(runway_ft),
            fire_category: Some(firecat),
            maintenance_capability: ["A330".to_string()].into_iter().collect(),
            weather: Some(WeatherSnapshot {
                ceiling_ft: Some(2_000),
                visibility_nm: Some(6.0),
                observed_at: None,
            }),
        }
    }

    #[test]
    fn sorted_by_score_then_distance() {
        let candidates = vec![
            airport("EIDW", 53.42, -6.27, 8_652, 9),
            airport("EINN", 52.70, -8.92, 10_495, 9),
            airport("EICK", 51.84, -8.49, 6_998, 7),
        ];
        let result =
            rank_diversion_airports(&flight(), FailureKind::EngineFailure, &candidates).unwrap();

        assert_eq!(result.total_evaluated, 3);
        assert_eq!(result.alternates[0].icao, "EINN");
        assert_eq!(result.best_alternate.as_ref().unwrap().icao, "EINN");
        for pair in result.alternates.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
        assert_eq!(result.recommended_count, 1);
        assert!(!result.manual_review_required);
        assert!(result.error.is_none());
    }

    #[test]
    fn equal_scores_prefer_closer_airport() {
        let a = SuitabilityScore {
            icao: "FAR".into(),
            iata: None,
            name: String::new(),
            lat: 0.0,
            lon: 0.0,
            distance_nm: 200.0,
            runway_ok: true,
            firecat_ok: true,
            weather_ok: true,
            maintenance_ok: true,
            score: 90.0,
            tier: SuitabilityTier::Excellent,
            eta_minutes: 0.0,
            fuel_required_kg: 0.0,
            comments: Vec::new(),
        };
        let b = SuitabilityScore { icao: "NEAR".into(), distance_nm: 100.0, ..a.clone() };
        assert_eq!(compare_alternates(&b, &a), Ordering::Less);
        assert_eq!(compare_alternates(&a, &b), Ordering::Greater);
    }

    #[test]
    fn empty_candidate_list_is_not_an_error() {
        let result = rank_diversion_airports(&flight(), FailureKind::EngineFailure, &[]).unwrap();
        assert_eq!(result.total_evaluated, 0);
        assert_eq!(result.suitable_count, 0);
        assert!(result.best_alternate.is_none());
        assert!(result.manual_review_required);
        assert!(result.error.is_some());
    }

    #[test]
    fn all_out_of_range_reports_note() {
        let mut state = flight();
        state.fuel_remaining_kg = Some(500.0);
        let candidates = vec![airport("EINN", 52.70, -8.92, 10_495, 9)];
        let result =
            rank_diversion_airports(&state, FailureKind::EngineFailure, &candidates).unwrap();
        assert!(result.alternates.is_empty());
        assert_eq!(result.excluded.len(), 1);
        assert_eq!(result.total_evaluated, 1);
        assert!(result.error.as_deref().unwrap().contains("achievable range"));
    }

    #[test]
    fn unsuitable_top_is_not_best() {
        let candidates = vec![airport("GRASS", 53.1, -14.5, 3_000, 3)];
        let result =
            rank_diversion_airports(&flight(), FailureKind::EngineFailure, &candidates).unwrap();
        assert_eq!(result.alternates.len(), 1);
        assert!(result.best_alternate.is_none());
        assert!(result.manual_review_required);
    }

    #[test]
    fn unknown_secondary_failure_in_loaded_catalog_is_an_error() {
        let catalog = FailureCatalog::from_json_str(
            r#"{"engine_failure": {"severity": "critical", "fuel_burn_penalty_fraction": 0.2, "diversion_mandatory": true}}"#,
        )
        .unwrap();
        let planner = DiversionPlanner::new(catalog, AircraftTable::builtin(), ScoringRules::default());
        let mut state = flight();
        state.secondary_failures = vec![FailureKind::HydraulicFailure];
        assert!(matches!(
            planner.rank(&state, FailureKind::EngineFailure, &[]),
            Err(DivertError::UnknownFailureKind(_))
        ));
    }

    #[test]
    fn rank_str_rejects_unknown_kind() {
        let planner = DiversionPlanner::default();
        assert!(matches!(
            planner.rank_str(&flight(), "tail_strike", &[]),
            Err(DivertError::UnknownFailureKind(_))
        ));
    }

    #[test]
    fn unknown_aircraft_is_flagged_not_fatal() {
        let mut state = flight();
        state.aircraft_type = "IL-96".to_string();
        let result = rank_diversion_airports(&state, FailureKind::MedicalEmergency, &[]).unwrap();
        assert!(result.analysis.aircraft_profile_fallback);
        assert_eq!(result.analysis.aircraft_type, crate::aircraft::FALLBACK_DESIGNATOR);
    }
}
