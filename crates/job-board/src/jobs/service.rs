use std::sync::Arc;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::{error, info};

use super::domain::{Job, JobId, NewJob};
use super::query::{CountParams, ListingParams, QueryError};
use super::repository::JobRepository;
use crate::error::error_response;
use crate::store::RepositoryError;

/// Read and create operations over the `jobs` collection.
pub struct JobService<R> {
    repository: Arc<R>,
}

impl<R> JobService<R>
where
    R: JobRepository + 'static,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    pub async fn all(&self) -> Result<Vec<Job>, JobServiceError> {
        Ok(self.repository.all().await?)
    }

    pub async fn get(&self, id: &JobId) -> Result<Job, JobServiceError> {
        self.repository
            .fetch(id)
            .await?
            .ok_or_else(|| JobServiceError::NotFound(id.clone()))
    }

    /// Paginated, filtered and optionally deadline-sorted listing.
    pub async fn search(&self, params: &ListingParams) -> Result<Vec<Job>, JobServiceError> {
        let query = params.build()?;
        Ok(self.repository.find(&query).await?)
    }

    /// Number of jobs matching the listing filter, ignoring pagination.
    pub async fn count(&self, params: &CountParams) -> Result<u64, JobServiceError> {
        Ok(self.repository.count(&params.filter()).await?)
    }

    pub async fn create(&self, job: NewJob) -> Result<Job, JobServiceError> {
        if let Some(field) = job.missing_field() {
            return Err(JobServiceError::MissingField(field));
        }

        let stored = self.repository.insert(job).await?;
        info!(job_id = %stored.id, category = %stored.category, "job posted");
        Ok(stored)
    }

    pub async fn posted_by(&self, email: &str) -> Result<Vec<Job>, JobServiceError> {
        Ok(self.repository.posted_by(email).await?)
    }
}

/// Error raised by the job service.
#[derive(Debug, thiserror::Error)]
pub enum JobServiceError {
    #[error(transparent)]
    Query(#[from] QueryError),
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("job {0} not found")]
    NotFound(JobId),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl JobServiceError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            JobServiceError::Query(_) | JobServiceError::MissingField(_) => {
                StatusCode::BAD_REQUEST
            }
            JobServiceError::NotFound(_) => StatusCode::NOT_FOUND,
            JobServiceError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for JobServiceError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!(error = %self, "job store request failed");
        }
        error_response(status, self.to_string())
    }
}
