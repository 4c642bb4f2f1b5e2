use std::sync::Arc;

use axum::{routing::get, Json, Router};
use serde_json::json;

use appointment_cell::router::{appointment_routes, doctor_routes};
use shared_models::state::AppState;
use triage_cell::router::triage_routes;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(|| async { "Clinic Appointments API is running!" }))
        .route("/health", get(|| async { Json(json!({ "status": "healthy" })) }))
        .nest("/appointments", appointment_routes(state.clone()))
        .nest("/doctors", doctor_routes(state.clone()))
        .nest("/triage", triage_routes(state))
}
