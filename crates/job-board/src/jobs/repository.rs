use async_trait::async_trait;

use super::domain::{Job, JobId, NewJob};
use super::query::{JobFilter, JobQuery};
use crate::store::RepositoryError;

/// Access to the `jobs` collection.
#[async_trait]
pub trait JobRepository: Send + Sync {
    /// Store a posting, assigning its identifier.
    async fn insert(&self, job: NewJob) -> Result<Job, RepositoryError>;
    async fn fetch(&self, id: &JobId) -> Result<Option<Job>, RepositoryError>;
    async fn all(&self) -> Result<Vec<Job>, RepositoryError>;
    async fn find(&self, query: &JobQuery) -> Result<Vec<Job>, RepositoryError>;
    async fn count(&self, filter: &JobFilter) -> Result<u64, RepositoryError>;
    async fn posted_by(&self, email: &str) -> Result<Vec<Job>, RepositoryError>;
    /// Atomically add one to `applicant_count`; `NotFound` when the job is gone.
    async fn increment_applicant_count(&self, id: &JobId) -> Result<(), RepositoryError>;
}
