// libs/appointment-cell/src/handlers.rs
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};

use shared_models::error::AppError;
use shared_models::state::AppState;

use crate::models::{Appointment, AppointmentWindowQuery, BookingError, CreateAppointmentRequest};
use crate::services::admission::AdmissionService;
use crate::services::store::AppointmentStore;

#[axum::debug_handler]
pub async fn create_appointment(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CreateAppointmentRequest>,
) -> Result<(StatusCode, Json<Appointment>), AppError> {
    let admission = AdmissionService::new(state.db.clone(), state.config.clinic_timezone);

    let appointment = admission
        .book(request)
        .await
        .map_err(booking_error_response)?;

    Ok((StatusCode::CREATED, Json(appointment)))
}

#[axum::debug_handler]
pub async fn get_appointment(
    State(state): State<Arc<AppState>>,
    Path(appointment_id): Path<i64>,
) -> Result<Json<Appointment>, AppError> {
    let store = AppointmentStore::new(state.db.clone());

    let appointment = store
        .find_by_id(appointment_id)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?
        .ok_or_else(|| AppError::NotFound("not_found", "Appointment not found".to_string()))?;

    Ok(Json(appointment))
}

#[axum::debug_handler]
pub async fn get_doctor_appointments(
    State(state): State<Arc<AppState>>,
    Path(doctor_id): Path<i64>,
    Query(window): Query<AppointmentWindowQuery>,
) -> Result<Json<Value>, AppError> {
    if window.from >= window.to {
        return Err(AppError::Unprocessable(
            "invalid_window",
            "Window start must be before window end".to_string(),
        ));
    }

    let store = AppointmentStore::new(state.db.clone());

    let appointments = store
        .find_by_doctor_in_window(doctor_id, window.from, window.to)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

    Ok(Json(json!({ "appointments": appointments })))
}

#[axum::debug_handler]
pub async fn list_doctors(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Value>, AppError> {
    let store = AppointmentStore::new(state.db.clone());

    let doctors = store
        .list_active_doctors()
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

    Ok(Json(json!({ "doctors": doctors })))
}

/// Map admission outcomes onto the HTTP error vocabulary: validation failures
/// are 422 with the specific reason, business conflicts 400 with distinct
/// reasons, anything else a server fault with no internal detail leaked.
fn booking_error_response(e: BookingError) -> AppError {
    let reason = e.reason();
    match e {
        BookingError::Database(detail) => AppError::Database(detail),
        BookingError::DoctorUnavailable | BookingError::SlotTaken => {
            AppError::BadRequest(reason, e.to_string())
        }
        _ => AppError::Unprocessable(reason, e.to_string()),
    }
}
