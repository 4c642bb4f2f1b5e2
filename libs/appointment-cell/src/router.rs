// libs/appointment-cell/src/router.rs
use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use shared_models::state::AppState;

use crate::handlers;

pub fn appointment_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", post(handlers::create_appointment))
        .route("/{appointment_id}", get(handlers::get_appointment))
        .route("/doctors/{doctor_id}", get(handlers::get_doctor_appointments))
        .with_state(state)
}

pub fn doctor_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(handlers::list_doctors))
        .with_state(state)
}
