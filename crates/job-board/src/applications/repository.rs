use async_trait::async_trait;

use super::domain::{Application, ApplicationSubmission};
use crate::jobs::domain::JobId;
use crate::store::RepositoryError;

/// Access to the `applications` collection.
#[async_trait]
pub trait ApplicationRepository: Send + Sync {
    /// Store a submission. Stores that enforce uniqueness on
    /// (applicant email, job id) report a duplicate as [`RepositoryError::Conflict`].
    async fn record(&self, submission: ApplicationSubmission)
        -> Result<Application, RepositoryError>;

    async fn find_by_applicant(
        &self,
        email: &str,
        job_id: &JobId,
    ) -> Result<Option<Application>, RepositoryError>;
}
