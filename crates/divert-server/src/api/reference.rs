//! Read-only access to the failure catalog and aircraft profile table.

use axum::{
    extract::{Path, State},
    Json,
};
use divert_core::{AircraftProfile, FailureDefinition, FailureKind};
use std::sync::Arc;

use crate::api::error::ApiError;
use crate::state::AppState;

pub async fn list_failures(State(state): State<Arc<AppState>>) -> Json<Vec<FailureDefinition>> {
    Json(state.planner().catalog.definitions().cloned().collect())
}

pub async fn get_failure(
    State(state): State<Arc<AppState>>,
    Path(kind): Path<String>,
) -> Result<Json<FailureDefinition>, ApiError> {
    let kind: FailureKind = kind
        .parse()
        .map_err(|err: divert_core::DivertError| ApiError::NotFound(err.to_string()))?;
    let definition = state
        .planner()
        .catalog
        .lookup(kind)
        .map_err(|err| ApiError::NotFound(err.to_string()))?;
    Ok(Json(definition.clone()))
}

pub async fn list_aircraft(State(state): State<Arc<AppState>>) -> Json<Vec<AircraftProfile>> {
    Json(state.planner().aircraft.profiles().cloned().collect())
}

/// Exact lookup; the fallback profile is only applied during ranking.
pub async fn get_aircraft(
    State(state): State<Arc<AppState>>,
    Path(aircraft_type): Path<String>,
) -> Result<Json<AircraftProfile>, ApiError> {
    let profile = state.planner().aircraft.lookup(&aircraft_type)?;
    Ok(Json(profile.clone()))
}
