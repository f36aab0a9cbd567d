use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use axum_extra::extract::cookie::CookieJar;
use serde_json::json;

use super::domain::{JobId, NewJob};
use super::query::{CountParams, ListingParams};
use super::repository::JobRepository;
use super::service::JobService;
use crate::error::error_response;
use crate::session::SessionAuthority;
use crate::store::InsertResult;

pub(crate) struct JobRoutes<R> {
    pub(crate) service: Arc<JobService<R>>,
    pub(crate) sessions: Arc<SessionAuthority>,
}

impl<R> Clone for JobRoutes<R> {
    fn clone(&self) -> Self {
        Self {
            service: self.service.clone(),
            sessions: self.sessions.clone(),
        }
    }
}

/// Router exposing listing, lookup, search, count, creation and owner views.
pub fn job_router<R>(service: Arc<JobService<R>>, sessions: Arc<SessionAuthority>) -> Router
where
    R: JobRepository + 'static,
{
    Router::new()
        .route("/jobs", get(list_handler::<R>).post(create_handler::<R>))
        .route("/jobs/search", get(search_handler::<R>))
        .route("/jobs/count", get(count_handler::<R>))
        .route("/jobs/owner/:email", get(owner_handler::<R>))
        .route("/jobs/:id", get(detail_handler::<R>))
        .with_state(JobRoutes { service, sessions })
}

pub(crate) async fn list_handler<R>(State(routes): State<JobRoutes<R>>) -> Response
where
    R: JobRepository + 'static,
{
    match routes.service.all().await {
        Ok(jobs) => Json(jobs).into_response(),
        Err(err) => err.into_response(),
    }
}

pub(crate) async fn detail_handler<R>(
    State(routes): State<JobRoutes<R>>,
    Path(id): Path<String>,
) -> Response
where
    R: JobRepository + 'static,
{
    match routes.service.get(&JobId(id)).await {
        Ok(job) => Json(job).into_response(),
        Err(err) => err.into_response(),
    }
}

pub(crate) async fn search_handler<R>(
    State(routes): State<JobRoutes<R>>,
    Query(params): Query<ListingParams>,
) -> Response
where
    R: JobRepository + 'static,
{
    match routes.service.search(&params).await {
        Ok(jobs) => Json(jobs).into_response(),
        Err(err) => err.into_response(),
    }
}

pub(crate) async fn count_handler<R>(
    State(routes): State<JobRoutes<R>>,
    Query(params): Query<CountParams>,
) -> Response
where
    R: JobRepository + 'static,
{
    match routes.service.count(&params).await {
        Ok(count) => Json(json!({ "count": count })).into_response(),
        Err(err) => err.into_response(),
    }
}

pub(crate) async fn create_handler<R>(
    State(routes): State<JobRoutes<R>>,
    payload: Result<Json<NewJob>, JsonRejection>,
) -> Response
where
    R: JobRepository + 'static,
{
    let Json(job) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return error_response(StatusCode::BAD_REQUEST, rejection.body_text()),
    };

    match routes.service.create(job).await {
        Ok(stored) => Json(InsertResult::acknowledged(stored.id.0)).into_response(),
        Err(err) => err.into_response(),
    }
}

pub(crate) async fn owner_handler<R>(
    State(routes): State<JobRoutes<R>>,
    jar: CookieJar,
    Path(email): Path<String>,
) -> Response
where
    R: JobRepository + 'static,
{
    if let Err(err) = routes.sessions.authorize(&jar, &email) {
        return err.into_response();
    }

    match routes.service.posted_by(&email).await {
        Ok(jobs) => Json(jobs).into_response(),
        Err(err) => err.into_response(),
    }
}
