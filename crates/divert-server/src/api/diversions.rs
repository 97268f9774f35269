//! Diversion analysis endpoint.

use axum::{extract::State, Json};
use divert_core::{AirportCandidate, FlightState, RankingResult};
use serde::Deserialize;
use std::sync::Arc;

use crate::api::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RankRequest {
    pub flight_state: FlightState,
    /// Failure kind under analysis, e.g. "engine_failure"
    pub failure_kind: String,
    /// Candidates to rank; the airport database is used when omitted
    #[serde(default)]
    pub candidates: Option<Vec<AirportCandidate>>,
    /// Trim the returned alternates list; counts still cover every candidate
    #[serde(default)]
    pub max_candidates: Option<usize>,
}

/// Rank diversion airports for an in-flight failure.
///
/// An empty or unsuitable ranking is still a 200: the caller shows it as
/// "manual dispatcher review required".
pub async fn rank_diversions(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RankRequest>,
) -> Result<Json<RankingResult>, ApiError> {
    let candidates = state.candidates_for(req.candidates);
    let mut result = state
        .planner()
        .rank_str(&req.flight_state, &req.failure_kind, &candidates)?;

    match &result.best_alternate {
        Some(best) => tracing::info!(
            "{} on {}: best alternate {} (score {:.1}, {:.0} nm) of {} evaluated",
            req.failure_kind,
            req.flight_state.aircraft_type,
            best.icao,
            best.score,
            best.distance_nm,
            result.total_evaluated
        ),
        None => tracing::warn!(
            "{} on {}: no suitable alternate among {} evaluated",
            req.failure_kind,
            req.flight_state.aircraft_type,
            result.total_evaluated
        ),
    }

    if let Some(max) = req.max_candidates {
        result.alternates.truncate(max);
    }

    Ok(Json(result))
}
