use std::sync::Arc;

use async_trait::async_trait;
use axum::response::Response;
use chrono::{TimeZone, Utc};
use serde_json::{json, Map, Value};

use crate::applications::domain::{Application, ApplicationSubmission};
use crate::applications::repository::ApplicationRepository;
use crate::applications::service::ApplicationService;
use crate::jobs::domain::{Job, JobId, NewJob, Poster};
use crate::jobs::query::{JobFilter, JobQuery};
use crate::jobs::repository::JobRepository;
use crate::store::{MemoryDocumentStore, RepositoryError};

pub(super) fn new_job(title: &str) -> NewJob {
    NewJob {
        title: title.to_string(),
        category: "Engineering".to_string(),
        application_deadline: Utc
            .with_ymd_and_hms(2025, 11, 1, 0, 0, 0)
            .single()
            .expect("valid deadline"),
        poster: Poster {
            email: "poster@example.com".to_string(),
            details: Map::new(),
        },
        details: Map::new(),
    }
}

pub(super) async fn seed_job(store: &MemoryDocumentStore, title: &str) -> Job {
    JobRepository::insert(store, new_job(title))
        .await
        .expect("job stored")
}

pub(super) fn submission(email: &str, job_id: &JobId) -> ApplicationSubmission {
    serde_json::from_value(json!({
        "applicant": { "email": email, "name": "Applicant" },
        "applyJobId": job_id.0,
        "price": 1200,
        "comment": "Available immediately"
    }))
    .expect("submission parses")
}

pub(super) fn build_service() -> (
    ApplicationService<MemoryDocumentStore, MemoryDocumentStore>,
    Arc<MemoryDocumentStore>,
) {
    let store = Arc::new(MemoryDocumentStore::default());
    let service = ApplicationService::new(store.clone(), store.clone());
    (service, store)
}

pub(super) async fn applicant_count(store: &MemoryDocumentStore, id: &JobId) -> u64 {
    store
        .fetch(id)
        .await
        .expect("fetch succeeds")
        .expect("job present")
        .applicant_count
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

/// Job store whose counter update always fails, to exercise the partial write path.
#[derive(Default)]
pub(super) struct FrozenCounterJobs {
    pub(super) inner: MemoryDocumentStore,
}

#[async_trait]
impl JobRepository for FrozenCounterJobs {
    async fn insert(&self, job: NewJob) -> Result<Job, RepositoryError> {
        JobRepository::insert(&self.inner, job).await
    }

    async fn fetch(&self, id: &JobId) -> Result<Option<Job>, RepositoryError> {
        self.inner.fetch(id).await
    }

    async fn all(&self) -> Result<Vec<Job>, RepositoryError> {
        self.inner.all().await
    }

    async fn find(&self, query: &JobQuery) -> Result<Vec<Job>, RepositoryError> {
        self.inner.find(query).await
    }

    async fn count(&self, filter: &JobFilter) -> Result<u64, RepositoryError> {
        self.inner.count(filter).await
    }

    async fn posted_by(&self, email: &str) -> Result<Vec<Job>, RepositoryError> {
        self.inner.posted_by(email).await
    }

    async fn increment_applicant_count(&self, _id: &JobId) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("counter write failed".to_string()))
    }
}

/// Application store whose lookup never sees the competing submission, standing in
/// for a request that lost the race between duplicate check and insert.
pub(super) struct RacingApplications;

#[async_trait]
impl ApplicationRepository for RacingApplications {
    async fn record(
        &self,
        _submission: ApplicationSubmission,
    ) -> Result<Application, RepositoryError> {
        Err(RepositoryError::Conflict)
    }

    async fn find_by_applicant(
        &self,
        _email: &str,
        _job_id: &JobId,
    ) -> Result<Option<Application>, RepositoryError> {
        Ok(None)
    }
}

pub(super) struct UnavailableApplications;

#[async_trait]
impl ApplicationRepository for UnavailableApplications {
    async fn record(
        &self,
        _submission: ApplicationSubmission,
    ) -> Result<Application, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    async fn find_by_applicant(
        &self,
        _email: &str,
        _job_id: &JobId,
    ) -> Result<Option<Application>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}
