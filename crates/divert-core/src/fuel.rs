//! Fuel burn penalty and achievable range under active failures.

use crate::aircraft::AircraftProfile;
use crate::catalog::FailureDefinition;
use crate::models::FlightState;
use crate::rules::ScoringRules;

/// Combined fuel burn penalty for simultaneous failures.
///
/// Penalties compound multiplicatively: `product(1 + p_i) - 1`. Two +15%
/// failures give +32.25%, not +30%. This is a conservative safety margin.
pub fn compute_penalty(failures: &[&FailureDefinition]) -> f64 {
    let multiplier: f64 = failures
        .iter()
        .map(|f| 1.0 + f.fuel_burn_penalty_fraction.max(0.0))
        .product();
    (multiplier - 1.0).max(0.0)
}

/// Distance the aircraft can still fly with the given fuel penalty, net of reserve.
pub fn achievable_range_nm(
    aircraft: &AircraftProfile,
    state: &FlightState,
    penalty_fraction: f64,
    rules: &ScoringRules,
) -> f64 {
    let nominal_nm = match state.fuel_remaining_kg {
        Some(fuel_kg) if fuel_kg.is_finite() => fuel_kg.max(0.0) * aircraft.nm_per_kg(),
        _ => (aircraft.max_range_nm - state.position_nm_from_origin.max(0.0)).max(0.0),
    };
    let reserve = rules.range_reserve_fraction.clamp(0.0, 1.0);
    nominal_nm / (1.0 + penalty_fraction.max(0.0)) * (1.0 - reserve)
}

/// Fuel needed to cover `distance_nm` with the given penalty.
pub fn fuel_required_kg(aircraft: &AircraftProfile, distance_nm: f64, penalty_fraction: f64) -> f64 {
    let nm_per_kg = aircraft.nm_per_kg();
    if nm_per_kg <= 0.0 {
        return f64::INFINITY;
    }
    distance_nm / nm_per_kg * (1.0 + penalty_fraction.max(0.0))
}
