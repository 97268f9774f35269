//! Airport database endpoints.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use divert_core::AirportCandidate;
use std::sync::Arc;

use crate::api::error::ApiError;
use crate::state::AppState;

pub async fn list_airports(State(state): State<Arc<AppState>>) -> Json<Vec<AirportCandidate>> {
    Json(state.get_airports())
}

pub async fn get_airport(
    State(state): State<Arc<AppState>>,
    Path(icao): Path<String>,
) -> Result<Json<AirportCandidate>, ApiError> {
    state
        .get_airport(&icao)
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("unknown airport '{}'", icao)))
}

/// Insert or replace an airport record. The path code wins over the body.
pub async fn put_airport(
    State(state): State<Arc<AppState>>,
    Path(icao): Path<String>,
    Json(mut airport): Json<AirportCandidate>,
) -> Result<(StatusCode, Json<AirportCandidate>), ApiError> {
    if icao.trim().is_empty() {
        return Err(ApiError::BadRequest("airport code must not be empty".to_string()));
    }
    airport.icao = icao;
    let created = state.upsert_airport(airport.clone());
    let stored = state
        .get_airport(&airport.icao)
        .ok_or_else(|| ApiError::Internal("airport vanished after insert".to_string()))?;

    if created {
        tracing::info!("Added airport {}", stored.icao);
        Ok((StatusCode::CREATED, Json(stored)))
    } else {
        tracing::info!("Updated airport {}", stored.icao);
        Ok((StatusCode::OK, Json(stored)))
    }
}

pub async fn delete_airport(
    State(state): State<Arc<AppState>>,
    Path(icao): Path<String>,
) -> StatusCode {
    if state.remove_airport(&icao) {
        tracing::info!("Removed airport {}", icao);
        StatusCode::NO_CONTENT
    } else {
        StatusCode::NOT_FOUND
    }
}
