//! Job board backend: job postings, paginated search, application intake with
//! single-submission enforcement, and cookie-based sessions.

pub mod applications;
pub mod config;
pub mod error;
pub mod jobs;
pub mod session;
pub mod store;
pub mod telemetry;
