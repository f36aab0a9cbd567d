use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;

use super::{next_document_id, RepositoryError};
use crate::applications::domain::{Application, ApplicationId, ApplicationSubmission};
use crate::applications::repository::ApplicationRepository;
use crate::jobs::domain::{Job, JobId, NewJob};
use crate::jobs::query::{JobFilter, JobQuery};
use crate::jobs::repository::JobRepository;

/// Process-local document store holding the `jobs` and `applications` collections.
///
/// Collections keep insertion order, which is the default ordering for unsorted
/// queries. Cloning shares the underlying collections.
#[derive(Default, Clone)]
pub struct MemoryDocumentStore {
    jobs: Arc<Mutex<Vec<Job>>>,
    applications: Arc<Mutex<Vec<Application>>>,
}

fn lock<T>(collection: &Mutex<T>) -> Result<MutexGuard<'_, T>, RepositoryError> {
    collection
        .lock()
        .map_err(|_| RepositoryError::Unavailable("collection lock poisoned".to_string()))
}

impl MemoryDocumentStore {
    /// Applications recorded against a job, in submission order.
    pub fn applications_for(&self, job_id: &JobId) -> Vec<Application> {
        match lock(&self.applications) {
            Ok(guard) => guard
                .iter()
                .filter(|application| &application.job_id == job_id)
                .cloned()
                .collect(),
            Err(_) => Vec::new(),
        }
    }
}

#[async_trait]
impl JobRepository for MemoryDocumentStore {
    async fn insert(&self, job: NewJob) -> Result<Job, RepositoryError> {
        let job = job.into_job(JobId(next_document_id()));
        lock(&self.jobs)?.push(job.clone());
        Ok(job)
    }

    async fn fetch(&self, id: &JobId) -> Result<Option<Job>, RepositoryError> {
        let guard = lock(&self.jobs)?;
        Ok(guard.iter().find(|job| &job.id == id).cloned())
    }

    async fn all(&self) -> Result<Vec<Job>, RepositoryError> {
        Ok(lock(&self.jobs)?.clone())
    }

    async fn find(&self, query: &JobQuery) -> Result<Vec<Job>, RepositoryError> {
        let guard = lock(&self.jobs)?;
        Ok(query.apply(guard.iter()))
    }

    async fn count(&self, filter: &JobFilter) -> Result<u64, RepositoryError> {
        let guard = lock(&self.jobs)?;
        Ok(guard.iter().filter(|job| filter.matches(job)).count() as u64)
    }

    async fn posted_by(&self, email: &str) -> Result<Vec<Job>, RepositoryError> {
        let guard = lock(&self.jobs)?;
        Ok(guard
            .iter()
            .filter(|job| job.poster.email == email)
            .cloned()
            .collect())
    }

    async fn increment_applicant_count(&self, id: &JobId) -> Result<(), RepositoryError> {
        let mut guard = lock(&self.jobs)?;
        let job = guard
            .iter_mut()
            .find(|job| &job.id == id)
            .ok_or(RepositoryError::NotFound)?;
        job.applicant_count = job.applicant_count.saturating_add(1);
        Ok(())
    }
}

#[async_trait]
impl ApplicationRepository for MemoryDocumentStore {
    async fn record(
        &self,
        submission: ApplicationSubmission,
    ) -> Result<Application, RepositoryError> {
        let mut guard = lock(&self.applications)?;
        // Uniqueness on (applicant email, job id) is checked under the same lock as the insert.
        let duplicate = guard.iter().any(|existing| {
            existing.applicant.email == submission.applicant.email
                && existing.job_id == submission.job_id
        });
        if duplicate {
            return Err(RepositoryError::Conflict);
        }

        let application = submission.into_application(ApplicationId(next_document_id()));
        guard.push(application.clone());
        Ok(application)
    }

    async fn find_by_applicant(
        &self,
        email: &str,
        job_id: &JobId,
    ) -> Result<Option<Application>, RepositoryError> {
        let guard = lock(&self.applications)?;
        Ok(guard
            .iter()
            .find(|application| {
                application.applicant.email == email && &application.job_id == job_id
            })
            .cloned())
    }
}
