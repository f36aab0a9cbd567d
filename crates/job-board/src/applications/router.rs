use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use tracing::error;

use super::domain::ApplicationSubmission;
use super::repository::ApplicationRepository;
use super::service::{ApplicationService, ApplicationServiceError};
use crate::error::error_response;
use crate::jobs::repository::JobRepository;
use crate::store::InsertResult;

/// Router builder exposing the application intake endpoint.
pub fn application_router<J, A>(service: Arc<ApplicationService<J, A>>) -> Router
where
    J: JobRepository + 'static,
    A: ApplicationRepository + 'static,
{
    Router::new()
        .route("/applications", post(submit_handler::<J, A>))
        .with_state(service)
}

pub(crate) async fn submit_handler<J, A>(
    State(service): State<Arc<ApplicationService<J, A>>>,
    payload: Result<Json<ApplicationSubmission>, JsonRejection>,
) -> Response
where
    J: JobRepository + 'static,
    A: ApplicationRepository + 'static,
{
    let Json(submission) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return error_response(StatusCode::BAD_REQUEST, rejection.body_text()),
    };

    match service.submit(submission).await {
        Ok(application) => Json(InsertResult::acknowledged(application.id.0)).into_response(),
        Err(err @ ApplicationServiceError::Repository(_)) => {
            error!(error = %err, "application store request failed");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
        }
        Err(err) => error_response(err.status_code(), err.to_string()),
    }
}
