// libs/appointment-cell/tests/booking_test.rs
//
// End-to-end admission tests against a real Postgres. Skipped unless
// TEST_DATABASE_URL points at a disposable database.
use chrono::{DateTime, Datelike, Duration, NaiveDate, TimeZone, Utc, Weekday};
use chrono_tz::Tz;
use futures::future::join_all;
use sqlx::postgres::{PgPool, PgPoolOptions};

use appointment_cell::models::{BookingError, CreateAppointmentRequest};
use appointment_cell::services::admission::AdmissionService;
use appointment_cell::services::store::AppointmentStore;

const CLINIC_TZ: Tz = Tz::Europe__Moscow;

async fn setup_pool() -> Option<PgPool> {
    let url = match std::env::var("TEST_DATABASE_URL") {
        Ok(url) => url,
        Err(_) => {
            println!("Skipping DB integration tests (set TEST_DATABASE_URL to enable)");
            return None;
        }
    };

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&url)
        .await
        .expect("failed to connect to test database");

    shared_database::init_schema(&pool)
        .await
        .expect("failed to initialize schema");

    Some(pool)
}

async fn seed_doctor(pool: &PgPool, active: bool) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO doctors (name, specialization, is_active) VALUES ($1, $2, $3) RETURNING id",
    )
    .bind("Dr. Test")
    .bind("General Practice")
    .bind(active)
    .fetch_one(pool)
    .await
    .expect("failed to seed doctor")
}

/// A weekday at least a week out, so every slot derived from it passes the
/// future-only check for the lifetime of a test run.
fn future_weekday() -> NaiveDate {
    let mut day = (Utc::now() + Duration::days(7))
        .with_timezone(&CLINIC_TZ)
        .date_naive();
    while matches!(day.weekday(), Weekday::Sat | Weekday::Sun) {
        day += Duration::days(1);
    }
    day
}

/// Clinic-local 10:00 on the next test weekday, shifted by half-hour slots.
fn future_slot(offset_slots: i64) -> DateTime<Utc> {
    let local = CLINIC_TZ
        .from_local_datetime(&future_weekday().and_hms_opt(10, 0, 0).unwrap())
        .unwrap();
    (local + Duration::minutes(30 * offset_slots)).with_timezone(&Utc)
}

fn request(doctor_id: i64, patient_name: &str, start_time: String) -> CreateAppointmentRequest {
    CreateAppointmentRequest {
        doctor_id,
        patient_name: patient_name.to_string(),
        start_time,
    }
}

#[tokio::test]
async fn booking_persists_with_trimmed_name() {
    let Some(pool) = setup_pool().await else { return };
    let doctor_id = seed_doctor(&pool, true).await;
    let admission = AdmissionService::new(pool.clone(), CLINIC_TZ);

    let slot = future_slot(0);
    let appointment = admission
        .book(request(doctor_id, "  Jane Doe  ", slot.to_rfc3339()))
        .await
        .expect("booking should succeed");

    assert_eq!(appointment.doctor_id, doctor_id);
    assert_eq!(appointment.patient_name, "Jane Doe");
    assert_eq!(appointment.start_time, slot);

    let store = AppointmentStore::new(pool.clone());
    let found = store
        .find_by_id(appointment.id)
        .await
        .unwrap()
        .expect("appointment should be readable");
    assert_eq!(found.start_time, slot);
}

#[tokio::test]
async fn exactly_one_winner_under_concurrency() {
    let Some(pool) = setup_pool().await else { return };
    let doctor_id = seed_doctor(&pool, true).await;
    let admission = AdmissionService::new(pool.clone(), CLINIC_TZ);

    let slot = future_slot(1).to_rfc3339();
    let attempts = 8;

    let results = join_all((0..attempts).map(|i| {
        let patient = format!("Patient {}", i);
        let start_time = slot.clone();
        let admission = &admission;
        async move { admission.book(request(doctor_id, &patient, start_time)).await }
    }))
    .await;

    let winners = results.iter().filter(|r| r.is_ok()).count();
    let losers = results
        .iter()
        .filter(|r| matches!(r, Err(BookingError::SlotTaken)))
        .count();

    assert_eq!(winners, 1, "exactly one concurrent booking must win");
    assert_eq!(losers, attempts - 1, "every other attempt must see slot_taken");
}

#[tokio::test]
async fn same_instant_in_different_offsets_conflicts() {
    let Some(pool) = setup_pool().await else { return };
    let doctor_id = seed_doctor(&pool, true).await;
    let admission = AdmissionService::new(pool.clone(), CLINIC_TZ);

    let day = future_weekday();
    // 12:00+03:00 and 09:00Z are the same canonical instant.
    let moscow = format!("{}T12:00:00+03:00", day);
    let utc = format!("{}T09:00:00Z", day);

    admission
        .book(request(doctor_id, "First Patient", moscow))
        .await
        .expect("first booking should succeed");

    let err = admission
        .book(request(doctor_id, "Second Patient", utc))
        .await
        .unwrap_err();
    assert!(matches!(err, BookingError::SlotTaken));
}

#[tokio::test]
async fn different_instants_in_different_offsets_both_succeed() {
    let Some(pool) = setup_pool().await else { return };
    let doctor_id = seed_doctor(&pool, true).await;
    let admission = AdmissionService::new(pool.clone(), CLINIC_TZ);

    let day = future_weekday();
    // Same wall clock, different offsets: 12:00+03:00 is 09:00Z, while
    // 12:00Z is 15:00 clinic time - two distinct, both bookable, slots.
    let moscow = format!("{}T12:00:00+03:00", day);
    let utc = format!("{}T12:00:00Z", day);

    admission
        .book(request(doctor_id, "First Patient", moscow))
        .await
        .expect("clinic-offset booking should succeed");
    admission
        .book(request(doctor_id, "Second Patient", utc))
        .await
        .expect("UTC booking for a different instant should succeed");
}

#[tokio::test]
async fn inactive_and_missing_doctors_are_unavailable() {
    let Some(pool) = setup_pool().await else { return };
    let inactive_id = seed_doctor(&pool, false).await;
    let admission = AdmissionService::new(pool.clone(), CLINIC_TZ);

    let err = admission
        .book(request(inactive_id, "Jane Doe", future_slot(2).to_rfc3339()))
        .await
        .unwrap_err();
    assert!(matches!(err, BookingError::DoctorUnavailable));

    let err = admission
        .book(request(9_999_999, "Jane Doe", future_slot(2).to_rfc3339()))
        .await
        .unwrap_err();
    assert!(matches!(err, BookingError::DoctorUnavailable));
}

#[tokio::test]
async fn find_by_id_returns_none_for_missing_appointment() {
    let Some(pool) = setup_pool().await else { return };
    let store = AppointmentStore::new(pool);

    let found = store.find_by_id(9_999_999).await.unwrap();
    assert!(found.is_none());
}

#[tokio::test]
async fn window_listing_is_ordered_by_start_time() {
    let Some(pool) = setup_pool().await else { return };
    let doctor_id = seed_doctor(&pool, true).await;
    let admission = AdmissionService::new(pool.clone(), CLINIC_TZ);

    // Book out of order; the window read must come back ascending.
    for offset in [4, 3, 5] {
        admission
            .book(request(doctor_id, "Jane Doe", future_slot(offset).to_rfc3339()))
            .await
            .expect("booking should succeed");
    }

    let store = AppointmentStore::new(pool.clone());
    let appointments = store
        .find_by_doctor_in_window(doctor_id, future_slot(3), future_slot(6))
        .await
        .unwrap();

    assert_eq!(appointments.len(), 3);
    assert!(appointments
        .windows(2)
        .all(|pair| pair[0].start_time < pair[1].start_time));
}

#[tokio::test]
async fn active_doctor_listing_excludes_inactive() {
    let Some(pool) = setup_pool().await else { return };
    let active_id = seed_doctor(&pool, true).await;
    let inactive_id = seed_doctor(&pool, false).await;

    let store = AppointmentStore::new(pool);
    let doctors = store.list_active_doctors().await.unwrap();

    assert!(doctors.iter().any(|d| d.id == active_id));
    assert!(doctors.iter().all(|d| d.id != inactive_id));
}
