use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;
use serde_json::json;

use super::SessionAuthority;
use crate::error::error_response;

#[derive(Debug, Deserialize)]
pub(crate) struct SessionRequest {
    #[serde(default)]
    pub(crate) email: String,
}

/// Session issuance and termination endpoints.
pub fn session_router(authority: Arc<SessionAuthority>) -> Router {
    Router::new()
        .route("/session", post(issue_handler))
        .route("/session/logout", get(logout_handler))
        .with_state(authority)
}

pub(crate) async fn issue_handler(
    State(authority): State<Arc<SessionAuthority>>,
    jar: CookieJar,
    payload: Result<Json<SessionRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return error_response(StatusCode::BAD_REQUEST, rejection.body_text()),
    };

    match authority.issue(&request.email) {
        Ok(token) => {
            let jar = jar.add(authority.session_cookie(token));
            (jar, Json(json!({ "success": true }))).into_response()
        }
        Err(err) => err.into_response(),
    }
}

pub(crate) async fn logout_handler(
    State(authority): State<Arc<SessionAuthority>>,
    jar: CookieJar,
) -> Response {
    let jar = jar.add(authority.removal_cookie());
    (jar, Json(json!({ "success": true }))).into_response()
}
