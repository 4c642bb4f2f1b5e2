// libs/appointment-cell/src/services/admission.rs
use chrono::Utc;
use chrono_tz::Tz;
use sqlx::postgres::PgPool;
use sqlx::{Postgres, Transaction};
use tracing::{info, warn};

use crate::models::{
    Appointment, BookingError, CreateAppointmentRequest, MAX_PATIENT_NAME_LEN,
};
use crate::services::conflict::{self, Reservation, UNIQUE_DOCTOR_TIME};
use crate::services::time_policy;

/// The single entry point for "try to book": validation, time normalization,
/// then the lock/check/insert/commit protocol.
pub struct AdmissionService {
    db: PgPool,
    clinic_tz: Tz,
}

impl AdmissionService {
    pub fn new(db: PgPool, clinic_tz: Tz) -> Self {
        Self { db, clinic_tz }
    }

    pub async fn book(
        &self,
        request: CreateAppointmentRequest,
    ) -> Result<Appointment, BookingError> {
        // Cheapest rejections first: nothing below touches the database
        // until the request has fully passed local validation.
        if request.doctor_id < 1 {
            return Err(BookingError::InvalidDoctorId);
        }

        let patient_name = request.patient_name.trim();
        if patient_name.is_empty() || patient_name.chars().count() > MAX_PATIENT_NAME_LEN {
            return Err(BookingError::InvalidPatientName);
        }

        let start = time_policy::parse_start_time(&request.start_time)?;
        let start_time = time_policy::normalize(start, Utc::now(), self.clinic_tz)?;

        let mut tx = self.db.begin().await.map_err(db_error)?;

        match conflict::reserve(&mut tx, request.doctor_id, start_time).await {
            Ok(Reservation::Reserved(_)) => {}
            Ok(Reservation::NotFound) => {
                rollback_quietly(tx).await;
                return Err(BookingError::DoctorUnavailable);
            }
            Ok(Reservation::Unavailable) => {
                rollback_quietly(tx).await;
                return Err(BookingError::SlotTaken);
            }
            Err(e) => {
                rollback_quietly(tx).await;
                return Err(db_error(e));
            }
        }

        let inserted = sqlx::query_as::<_, Appointment>(
            r#"
            INSERT INTO appointments (doctor_id, patient_name, start_time)
            VALUES ($1, $2, $3)
            RETURNING id, doctor_id, patient_name, start_time, created_at, updated_at
            "#,
        )
        .bind(request.doctor_id)
        .bind(patient_name)
        .bind(start_time)
        .fetch_one(&mut *tx)
        .await;

        let appointment = match inserted {
            Ok(appointment) => appointment,
            Err(e) => {
                rollback_quietly(tx).await;
                return Err(classify_write_error(e));
            }
        };

        // A race that slipped past the row lock (isolation-level gaps) shows
        // up here as a unique violation and is still a slot conflict, not a
        // system error.
        tx.commit().await.map_err(classify_write_error)?;

        info!(
            "Created appointment {} for doctor {} at {}",
            appointment.id, appointment.doctor_id, appointment.start_time
        );
        Ok(appointment)
    }
}

fn db_error(e: sqlx::Error) -> BookingError {
    BookingError::Database(e.to_string())
}

fn classify_write_error(e: sqlx::Error) -> BookingError {
    if let Some(db_err) = e.as_database_error() {
        let on_expected_key = db_err.constraint().map_or(true, |c| c == UNIQUE_DOCTOR_TIME);
        if db_err.is_unique_violation() && on_expected_key {
            return BookingError::SlotTaken;
        }
    }
    BookingError::Database(e.to_string())
}

async fn rollback_quietly(tx: Transaction<'_, Postgres>) {
    // Rollback failures do not change the classification already chosen for
    // the client response; they are only logged.
    if let Err(e) = tx.rollback().await {
        warn!("Failed to roll back booking transaction: {}", e);
    }
}
