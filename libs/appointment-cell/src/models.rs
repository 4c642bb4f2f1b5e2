// libs/appointment-cell/src/models.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::services::time_policy::TimePolicyError;

pub const MAX_PATIENT_NAME_LEN: usize = 255;

// ==============================================================================
// CORE BOOKING MODELS
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Doctor {
    pub id: i64,
    pub name: String,
    pub specialization: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Appointment {
    pub id: i64,
    pub doctor_id: i64,
    pub patient_name: String,
    /// Canonical instant: always stored and compared in UTC, regardless of
    /// the offset the client used to express it.
    pub start_time: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ==============================================================================
// REQUEST MODELS
// ==============================================================================

/// `start_time` stays a raw string until TimePolicy has parsed it, so an
/// offset-less timestamp can be rejected with its own reason instead of a
/// generic deserialization failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAppointmentRequest {
    pub doctor_id: i64,
    pub patient_name: String,
    pub start_time: String,
}

#[derive(Debug, Deserialize)]
pub struct AppointmentWindowQuery {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
}

// ==============================================================================
// ERROR TYPES
// ==============================================================================

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BookingError {
    #[error(transparent)]
    InvalidTime(#[from] TimePolicyError),

    #[error("Patient name must be between 1 and {MAX_PATIENT_NAME_LEN} characters after trimming")]
    InvalidPatientName,

    #[error("Doctor id must be a positive integer")]
    InvalidDoctorId,

    #[error("Doctor not found or inactive")]
    DoctorUnavailable,

    #[error("Doctor is already booked at this time")]
    SlotTaken,

    #[error("Database error: {0}")]
    Database(String),
}

impl BookingError {
    /// Machine-readable reason code surfaced next to the human message.
    pub fn reason(&self) -> &'static str {
        match self {
            BookingError::InvalidTime(e) => e.reason(),
            BookingError::InvalidPatientName => "invalid_patient_name",
            BookingError::InvalidDoctorId => "invalid_doctor_id",
            BookingError::DoctorUnavailable => "doctor_unavailable",
            BookingError::SlotTaken => "slot_taken",
            BookingError::Database(_) => "database_error",
        }
    }

    /// Client-fault errors that never opened a transaction.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            BookingError::InvalidTime(_)
                | BookingError::InvalidPatientName
                | BookingError::InvalidDoctorId
        )
    }
}
