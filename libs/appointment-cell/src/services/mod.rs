pub mod admission;
pub mod conflict;
pub mod store;
pub mod time_policy;
