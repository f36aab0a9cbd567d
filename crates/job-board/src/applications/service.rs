use std::sync::Arc;

use axum::http::StatusCode;
use tracing::{error, info, warn};

use super::domain::{Application, ApplicationId, ApplicationSubmission};
use super::repository::ApplicationRepository;
use crate::jobs::domain::JobId;
use crate::jobs::repository::JobRepository;
use crate::store::RepositoryError;

pub const DUPLICATE_APPLICATION_MESSAGE: &str = "You have already applied for this job.";

/// Records applications and keeps each job's applicant counter in step.
pub struct ApplicationService<J, A> {
    jobs: Arc<J>,
    applications: Arc<A>,
}

impl<J, A> ApplicationService<J, A>
where
    J: JobRepository + 'static,
    A: ApplicationRepository + 'static,
{
    pub fn new(jobs: Arc<J>, applications: Arc<A>) -> Self {
        Self { jobs, applications }
    }

    /// Record a submission and bump the target job's applicant count.
    ///
    /// The duplicate lookup and the insert are separate store calls; stores that
    /// enforce (email, job id) uniqueness close the gap between them, and their
    /// conflict is reported as [`ApplicationServiceError::AlreadyApplied`].
    pub async fn submit(
        &self,
        submission: ApplicationSubmission,
    ) -> Result<Application, ApplicationServiceError> {
        if let Some(field) = submission.missing_field() {
            return Err(ApplicationServiceError::MissingField(field));
        }

        let job_id = submission.job_id.clone();
        if self.jobs.fetch(&job_id).await?.is_none() {
            return Err(ApplicationServiceError::JobNotFound(job_id));
        }

        let email = submission.applicant.email.clone();
        if self
            .applications
            .find_by_applicant(&email, &job_id)
            .await?
            .is_some()
        {
            warn!(%job_id, applicant = %email, "duplicate application rejected");
            return Err(ApplicationServiceError::AlreadyApplied);
        }

        let application = match self.applications.record(submission).await {
            Ok(application) => application,
            Err(RepositoryError::Conflict) => {
                warn!(%job_id, applicant = %email, "duplicate application rejected by store");
                return Err(ApplicationServiceError::AlreadyApplied);
            }
            Err(other) => return Err(other.into()),
        };

        if let Err(source) = self.jobs.increment_applicant_count(&job_id).await {
            error!(
                application_id = %application.id,
                %job_id,
                error = %source,
                "application recorded without applicant count update"
            );
            return Err(ApplicationServiceError::CountNotUpdated {
                application_id: application.id,
                job_id,
                source,
            });
        }

        info!(application_id = %application.id, %job_id, "application recorded");
        Ok(application)
    }
}

/// Error raised by the application service.
#[derive(Debug, thiserror::Error)]
pub enum ApplicationServiceError {
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("job {0} not found")]
    JobNotFound(JobId),
    #[error("You have already applied for this job.")]
    AlreadyApplied,
    /// The application is stored but the job counter is stale.
    #[error("application {application_id} recorded but applicant count for job {job_id} was not updated: {source}")]
    CountNotUpdated {
        application_id: ApplicationId,
        job_id: JobId,
        #[source]
        source: RepositoryError,
    },
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl ApplicationServiceError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApplicationServiceError::MissingField(_) | ApplicationServiceError::AlreadyApplied => {
                StatusCode::BAD_REQUEST
            }
            ApplicationServiceError::JobNotFound(_) => StatusCode::NOT_FOUND,
            ApplicationServiceError::CountNotUpdated { .. }
            | ApplicationServiceError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
