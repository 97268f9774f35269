//! Diversion airport ranking for aircraft with in-flight failures.
//!
//! Everything here is pure and synchronous: static tables in, a ranked
//! `RankingResult` out. Weather and airport data are fetched by the caller.

pub mod aircraft;
pub mod catalog;
pub mod error;
pub mod fuel;
pub mod models;
pub mod phase;
pub mod ranking;
pub mod rules;
pub mod scorer;
pub mod spatial;
pub mod tables;

pub use aircraft::{AircraftCategory, AircraftProfile, AircraftTable, FALLBACK_DESIGNATOR};
pub use catalog::{FailureCatalog, FailureDefinition, FailureKind, Severity};
pub use error::{DivertError, Result};
pub use fuel::{achievable_range_nm, compute_penalty};
pub use models::{
    AirportCandidate, ExcludedCandidate, ExclusionReason, FlightAnalysis, FlightState,
    PhaseOfFlight, Position, RankingResult, RouteEndpoint, SuitabilityScore, SuitabilityTier,
    WeatherSnapshot,
};
pub use phase::{resolve, ResolvedPosition};
pub use ranking::{rank, rank_diversion_airports, DiversionPlanner};
pub use rules::ScoringRules;
pub use scorer::{score, Evaluation, Situation};
pub use spatial::haversine_distance;
