// libs/appointment-cell/src/services/conflict.rs
use chrono::{DateTime, Utc};
use sqlx::{Postgres, Transaction};
use tracing::debug;

use crate::models::Doctor;

/// Name of the uniqueness constraint on `(doctor_id, start_time)`. The
/// constraint is the second line of defense behind the row lock: a duplicate
/// insert that slips past the lock fails here instead of corrupting state.
pub const UNIQUE_DOCTOR_TIME: &str = "unique_doctor_time";

#[derive(Debug)]
pub enum Reservation {
    /// The doctor row is exclusively locked and the slot is free; the caller
    /// may insert within the same transaction.
    Reserved(Doctor),
    /// An appointment already exists for this doctor at this instant.
    Unavailable,
    /// Doctor missing or inactive.
    NotFound,
}

/// Lock the doctor row and check the target slot, inside the caller's
/// transaction. The `FOR UPDATE` on the doctor row serializes all concurrent
/// reservations for the same doctor until the transaction ends; bookings for
/// different doctors proceed in parallel.
pub async fn reserve(
    tx: &mut Transaction<'_, Postgres>,
    doctor_id: i64,
    start_time: DateTime<Utc>,
) -> Result<Reservation, sqlx::Error> {
    let doctor = sqlx::query_as::<_, Doctor>(
        r#"
        SELECT id, name, specialization, is_active, created_at, updated_at
        FROM doctors
        WHERE id = $1 AND is_active = TRUE
        FOR UPDATE
        "#,
    )
    .bind(doctor_id)
    .fetch_optional(&mut **tx)
    .await?;

    let Some(doctor) = doctor else {
        debug!("Doctor {} not found or inactive", doctor_id);
        return Ok(Reservation::NotFound);
    };

    let existing: Option<(i64,)> = sqlx::query_as(
        r#"
        SELECT id
        FROM appointments
        WHERE doctor_id = $1 AND start_time = $2
        FOR UPDATE
        "#,
    )
    .bind(doctor_id)
    .bind(start_time)
    .fetch_optional(&mut **tx)
    .await?;

    if existing.is_some() {
        debug!("Doctor {} already booked at {}", doctor_id, start_time);
        return Ok(Reservation::Unavailable);
    }

    Ok(Reservation::Reserved(doctor))
}
