// libs/triage-cell/src/router.rs
use std::sync::Arc;

use axum::{routing::get, Router};

use shared_models::state::AppState;

use crate::handlers;

pub fn triage_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/recommendations", get(handlers::get_recommendations))
        .with_state(state)
}
