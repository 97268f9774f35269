//! Pre-fetched weather snapshots.
//!
//! Weather is fetched by whatever feeds this service; ranking only reads
//! what has been stored here and treats a missing snapshot as below minima.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use divert_core::WeatherSnapshot;
use serde::Serialize;
use std::sync::Arc;

use crate::api::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct StoredWeather {
    pub icao: String,
    #[serde(flatten)]
    pub snapshot: WeatherSnapshot,
}

pub async fn list_weather(State(state): State<Arc<AppState>>) -> Json<Vec<StoredWeather>> {
    Json(
        state
            .get_all_weather()
            .into_iter()
            .map(|(icao, snapshot)| StoredWeather { icao, snapshot })
            .collect(),
    )
}

pub async fn put_weather(
    State(state): State<Arc<AppState>>,
    Path(icao): Path<String>,
    Json(snapshot): Json<WeatherSnapshot>,
) -> Result<StatusCode, ApiError> {
    if let Some(visibility) = snapshot.visibility_nm {
        if !visibility.is_finite() || visibility < 0.0 {
            return Err(ApiError::BadRequest(format!(
                "visibility_nm must be a non-negative number (got {})",
                visibility
            )));
        }
    }

    state.store_weather(&icao, snapshot);
    tracing::debug!("Stored weather for {}", icao);
    Ok(StatusCode::NO_CONTENT)
}
