//! Application intake with one submission per applicant and job.

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{Applicant, Application, ApplicationId, ApplicationSubmission};
pub use repository::ApplicationRepository;
pub use router::application_router;
pub use service::{ApplicationService, ApplicationServiceError};
