// libs/appointment-cell/src/services/store.rs
use chrono::{DateTime, Utc};
use sqlx::postgres::PgPool;

use crate::models::{Appointment, Doctor};

/// Read-side persistence for the boundary layer. No business logic; absence
/// is `None` or an empty vec, never an error.
pub struct AppointmentStore {
    db: PgPool,
}

impl AppointmentStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Appointment>, sqlx::Error> {
        sqlx::query_as::<_, Appointment>(
            r#"
            SELECT id, doctor_id, patient_name, start_time, created_at, updated_at
            FROM appointments
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await
    }

    /// All appointments for a doctor with `from <= start_time < to`, ordered
    /// by start time ascending.
    pub async fn find_by_doctor_in_window(
        &self,
        doctor_id: i64,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<Appointment>, sqlx::Error> {
        sqlx::query_as::<_, Appointment>(
            r#"
            SELECT id, doctor_id, patient_name, start_time, created_at, updated_at
            FROM appointments
            WHERE doctor_id = $1 AND start_time >= $2 AND start_time < $3
            ORDER BY start_time
            "#,
        )
        .bind(doctor_id)
        .bind(from)
        .bind(to)
        .fetch_all(&self.db)
        .await
    }

    pub async fn list_active_doctors(&self) -> Result<Vec<Doctor>, sqlx::Error> {
        sqlx::query_as::<_, Doctor>(
            r#"
            SELECT id, name, specialization, is_active, created_at, updated_at
            FROM doctors
            WHERE is_active = TRUE
            ORDER BY name
            "#,
        )
        .fetch_all(&self.db)
        .await
    }
}
