// libs/triage-cell/src/handlers.rs
use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use serde_json::{json, Value};
use tracing::debug;

use appointment_cell::services::store::AppointmentStore;
use shared_models::error::AppError;
use shared_models::state::AppState;

use crate::models::{DoctorRecommendation, TriageQuery};
use crate::services::rules;

#[axum::debug_handler]
pub async fn get_recommendations(
    State(state): State<Arc<AppState>>,
    Query(query): Query<TriageQuery>,
) -> Result<Json<Value>, AppError> {
    let symptoms = query.symptoms.trim();
    if symptoms.is_empty() {
        return Err(AppError::Unprocessable(
            "empty_symptoms",
            "Describe the symptoms to get a recommendation".to_string(),
        ));
    }

    let recommendations = rules::recommend(symptoms);
    debug!(
        "Matched {} specialties for symptom description",
        recommendations.len()
    );

    // Join against the active roster so every suggestion carries bookable
    // doctor ids. A specialty with no doctors on staff still comes back,
    // just with an empty list.
    let store = AppointmentStore::new(state.db.clone());
    let doctors = store
        .list_active_doctors()
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

    let recommendations: Vec<DoctorRecommendation> = recommendations
        .into_iter()
        .map(|rec| DoctorRecommendation {
            doctor_ids: doctors
                .iter()
                .filter(|d| d.specialization.eq_ignore_ascii_case(rec.specialty))
                .map(|d| d.id)
                .collect(),
            specialty: rec.specialty,
            confidence: rec.confidence,
            reasoning: rec.reasoning,
        })
        .collect();

    Ok(Json(json!({ "recommendations": recommendations })))
}
