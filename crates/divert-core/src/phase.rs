//! Flight phase and failure-adjusted altitude resolution.
//!
//! Drift-down is a fixed decrement (engine failure on a twin: 37,000 ft
//! becomes 27,000 ft), approximating the single-engine ceiling. It is not a
//! climb-performance model and should not be tuned as one.

use crate::aircraft::AircraftProfile;
use crate::catalog::FailureDefinition;
use crate::models::{FlightState, PhaseOfFlight, Position};
use crate::rules::ScoringRules;
use crate::spatial;

/// Routes shorter than this have no meaningful progress ratio.
const MIN_ROUTE_NM: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedPosition {
    pub phase: PhaseOfFlight,
    pub adjusted_altitude_ft: u32,
    pub route_distance_nm: f64,
    pub progress_ratio: f64,
    pub position: Position,
}

/// Classify a route progress ratio (position / route distance).
pub fn phase_for_ratio(ratio: f64) -> PhaseOfFlight {
    if ratio < 0.2 {
        PhaseOfFlight::Climb
    } else if ratio < 0.8 {
        PhaseOfFlight::Cruise
    } else if ratio <= 0.95 {
        PhaseOfFlight::Descent
    } else {
        PhaseOfFlight::Approach
    }
}

/// Altitude the aircraft can hold with the given failures active.
pub fn adjusted_altitude_ft(
    altitude_ft: u32,
    failures: &[&FailureDefinition],
    aircraft: &AircraftProfile,
    rules: &ScoringRules,
) -> u32 {
    let mut altitude = altitude_ft;

    if aircraft.is_twin() {
        let drift_down = failures.iter().filter_map(|f| f.drift_down_ft).max();
        if let Some(decrement) = drift_down {
            let floor = rules.drift_down_floor_ft;
            if altitude > floor {
                altitude = altitude.saturating_sub(decrement).max(floor);
            }
        }
    }

    for restriction in failures.iter().filter_map(|f| f.altitude_restriction_ft) {
        altitude = altitude.min(restriction);
    }

    altitude
}

/// Resolve phase, adjusted altitude and current position for a flight.
pub fn resolve(
    state: &FlightState,
    failures: &[&FailureDefinition],
    aircraft: &AircraftProfile,
    rules: &ScoringRules,
) -> ResolvedPosition {
    let origin = state.origin.position();
    let destination = state.destination.position();
    let route_distance_nm = origin.distance_nm(&destination);
    let flown_nm = state.position_nm_from_origin.max(0.0);

    let (phase, progress_ratio) = if route_distance_nm.is_finite() && route_distance_nm >= MIN_ROUTE_NM
    {
        let ratio = flown_nm / route_distance_nm;
        (phase_for_ratio(ratio), ratio)
    } else {
        (PhaseOfFlight::Cruise, 0.0)
    };

    let position = match state.current_position {
        Some(position) if position.is_valid() => position,
        _ => {
            let (lat, lon) = spatial::intermediate_point(
                origin.lat,
                origin.lon,
                destination.lat,
                destination.lon,
                progress_ratio.min(1.0),
            );
            Position::new(lat, lon)
        }
    };

    ResolvedPosition {
        phase,
        adjusted_altitude_ft: adjusted_altitude_ft(state.altitude_ft, failures, aircraft, rules),
        route_distance_nm,
        progress_ratio,
        position,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aircraft::AircraftTable;
    use crate::catalog::{FailureCatalog, FailureKind};
    use crate::models::RouteEndpoint;

    fn transatlantic(position_nm: f64, altitude_ft: u32) -> FlightState {
        FlightState {
            aircraft_type: "A330-300".to_string(),
            origin: RouteEndpoint { code: "EGLL".into(), lat: 51.4700, lon: -0.4543 },
            destination: RouteEndpoint { code: "KJFK".into(), lat: 40.6413, lon: -73.7781 },
            position_nm_from_origin: position_nm,
            altitude_ft,
            fuel_remaining_kg: None,
            current_position: None,
            secondary_failures: Vec::new(),
        }
    }

    #[test]
    fn phase_boundaries() {
        assert_eq!(phase_for_ratio(0.0), PhaseOfFlight::Climb);
        assert_eq!(phase_for_ratio(0.19), PhaseOfFlight::Climb);
        assert_eq!(phase_for_ratio(0.2), PhaseOfFlight::Cruise);
        assert_eq!(phase_for_ratio(0.79), PhaseOfFlight::Cruise);
        assert_eq!(phase_for_ratio(0.8), PhaseOfFlight::Descent);
        assert_eq!(phase_for_ratio(0.95), PhaseOfFlight::Descent);
        assert_eq!(phase_for_ratio(0.96), PhaseOfFlight::Approach);
    }

    #[test]
    fn engine_failure_on_twin_drifts_down_ten_thousand_feet() {
        let catalog = FailureCatalog::builtin();
        let aircraft = AircraftTable::builtin().lookup("A330-300").unwrap().clone();
        let engine = catalog.lookup(FailureKind::EngineFailure).unwrap();
        let rules = ScoringRules::default();

        let resolved = resolve(&transatlantic(1_500.0, 37_000), &[engine], &aircraft, &rules);
        assert_eq!(resolved.adjusted_altitude_ft, 27_000);
        assert_eq!(resolved.phase, PhaseOfFlight::Cruise);
    }

    #[test]
    fn drift_down_never_goes_below_floor() {
        let catalog = FailureCatalog::builtin();
        let aircraft = AircraftTable::builtin().lookup("B737-800").unwrap().clone();
        let engine = catalog.lookup(FailureKind::EngineFailure).unwrap();
        let rules = ScoringRules::default();

        assert_eq!(adjusted_altitude_ft(15_000, &[engine], &aircraft, &rules), 10_000);
        assert_eq!(adjusted_altitude_ft(8_000, &[engine], &aircraft, &rules), 8_000);
    }

    #[test]
    fn quad_does_not_drift_down() {
        let catalog = FailureCatalog::builtin();
        let aircraft = AircraftTable::builtin().lookup("B747-400").unwrap().clone();
        let engine = catalog.lookup(FailureKind::EngineFailure).unwrap();
        let rules = ScoringRules::default();

        assert_eq!(adjusted_altitude_ft(35_000, &[engine], &aircraft, &rules), 35_000);
    }

    #[test]
    fn restriction_caps_altitude() {
        let catalog = FailureCatalog::builtin();
        let aircraft = AircraftTable::builtin().lookup("A320-200").unwrap().clone();
        let decompression = catalog.lookup(FailureKind::Decompression).unwrap();
        let rules = ScoringRules::default();

        assert_eq!(adjusted_altitude_ft(37_000, &[decompression], &aircraft, &rules), 10_000);
        assert_eq!(adjusted_altitude_ft(6_000, &[decompression], &aircraft, &rules), 6_000);
    }

    #[test]
    fn no_failure_keeps_altitude() {
        let aircraft = AircraftTable::builtin().lookup("A320-200").unwrap().clone();
        assert_eq!(
            adjusted_altitude_ft(33_000, &[], &aircraft, &ScoringRules::default()),
            33_000
        );
    }

    #[test]
    fn position_is_interpolated_along_route() {
        let aircraft = AircraftTable::builtin().lookup("A330-300").unwrap().clone();
        let state = transatlantic(0.0, 5_000);
        let resolved = resolve(&state, &[], &aircraft, &ScoringRules::default());
        assert_eq!(resolved.phase, PhaseOfFlight::Climb);
        assert!((resolved.position.lat - 51.47).abs() < 1e-6);

        let state = transatlantic(resolved.route_distance_nm, 1_500);
        let resolved = resolve(&state, &[], &aircraft, &ScoringRules::default());
        assert_eq!(resolved.phase, PhaseOfFlight::Approach);
        assert!((resolved.position.lat - 40.6413).abs() < 1e-4);
    }

    #[test]
    fn explicit_position_wins() {
        let aircraft = AircraftTable::builtin().lookup("A330-300").unwrap().clone();
        let mut state = transatlantic(1_000.0, 37_000);
        state.current_position = Some(Position::new(55.0, -30.0));
        let resolved = resolve(&state, &[], &aircraft, &ScoringRules::default());
        assert_eq!(resolved.position, Position::new(55.0, -30.0));
    }

    #[test]
    fn degenerate_route_resolves_to_cruise() {
        let aircraft = AircraftTable::builtin().lookup("A320-200").unwrap().clone();
        let mut state = transatlantic(100.0, 20_000);
        state.destination = state.origin.clone();
        let resolved = resolve(&state, &[], &aircraft, &ScoringRules::default());
        assert_eq!(resolved.phase, PhaseOfFlight::Cruise);
    }
}
