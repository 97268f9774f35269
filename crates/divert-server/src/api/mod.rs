//! API routes for the diversion server.

pub mod airports;
pub mod diversions;
pub mod error;
pub mod reference;
pub mod request_id;
mod routes;
pub mod weather;

use axum::Router;
use std::sync::Arc;

pub fn routes() -> Router<Arc<crate::state::AppState>> {
    routes::create_router()
}
