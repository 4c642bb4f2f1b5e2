pub mod handlers;
pub mod models;
pub mod router;
pub mod services;

pub use models::{Appointment, BookingError, CreateAppointmentRequest, Doctor};
pub use services::admission::AdmissionService;
pub use services::store::AppointmentStore;
