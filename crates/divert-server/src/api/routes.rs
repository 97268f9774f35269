//! REST API routes.

use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;

use crate::api::{airports, diversions, reference, request_id, weather};
use crate::state::AppState;

/// Create the API router.
pub fn create_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(|| async { "OK" }))
        .route("/v1/failures", get(reference::list_failures))
        .route("/v1/failures/:kind", get(reference::get_failure))
        .route("/v1/aircraft", get(reference::list_aircraft))
        .route("/v1/aircraft/:aircraft_type", get(reference::get_aircraft))
        .route("/v1/airports", get(airports::list_airports))
        .route(
            "/v1/airports/:icao",
            put(airports::put_airport)
                .get(airports::get_airport)
                .delete(airports::delete_airport),
        )
        .route("/v1/weather", get(weather::list_weather))
        .route("/v1/weather/:icao", put(weather::put_weather))
        .route("/v1/diversions/rank", post(diversions::rank_diversions))
        .layer(middleware::from_fn(request_id::ensure_request_id))
}
