//! Cookie-carried session tokens.
//!
//! A session is an HS256-signed JWT holding the holder's email, stored in the
//! HTTP-only `token` cookie. Nothing about a session is persisted server side.

pub mod router;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::config::SessionConfig;
use crate::error::error_response;

pub use router::session_router;

pub const SESSION_COOKIE: &str = "token";

/// Signed token payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    pub email: String,
    pub iat: i64,
    pub exp: i64,
}

/// Authenticated caller derived from a verified token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionIdentity {
    pub email: String,
}

/// Issues and verifies session tokens and builds the cookies that carry them.
#[derive(Clone)]
pub struct SessionAuthority {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
    secure_cookie: bool,
}

impl SessionAuthority {
    pub fn new(secret: &[u8], ttl: Duration, secure_cookie: bool) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            ttl,
            secure_cookie,
        }
    }

    pub fn from_config(config: &SessionConfig) -> Self {
        Self::new(
            config.token_secret.as_bytes(),
            Duration::minutes(config.ttl_minutes),
            config.secure_cookie,
        )
    }

    pub fn issue(&self, email: &str) -> Result<String, SessionError> {
        self.issue_at(email, Utc::now())
    }

    pub fn issue_at(&self, email: &str, now: DateTime<Utc>) -> Result<String, SessionError> {
        let email = email.trim();
        if email.is_empty() {
            return Err(SessionError::MissingEmail);
        }

        let claims = SessionClaims {
            email: email.to_string(),
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };
        encode(&Header::default(), &claims, &self.encoding).map_err(SessionError::Signing)
    }

    pub fn verify(&self, token: &str) -> Result<SessionIdentity, SessionError> {
        let data = decode::<SessionClaims>(token, &self.decoding, &Validation::default())
            .map_err(|err| {
                warn!(error = %err, "rejected session token");
                SessionError::InvalidToken(err)
            })?;

        Ok(SessionIdentity {
            email: data.claims.email,
        })
    }

    /// Resolve the caller from the session cookie.
    pub fn identify(&self, jar: &CookieJar) -> Result<SessionIdentity, SessionError> {
        let cookie = jar.get(SESSION_COOKIE).ok_or(SessionError::MissingToken)?;
        self.verify(cookie.value())
    }

    /// Resolve the caller and require that it is `email`.
    pub fn authorize(&self, jar: &CookieJar, email: &str) -> Result<SessionIdentity, SessionError> {
        let identity = self.identify(jar)?;
        if identity.email != email {
            warn!(session = %identity.email, requested = %email, "session identity mismatch");
            return Err(SessionError::Forbidden);
        }
        Ok(identity)
    }

    pub fn session_cookie(&self, token: String) -> Cookie<'static> {
        Cookie::build((SESSION_COOKIE, token))
            .http_only(true)
            .secure(self.secure_cookie)
            .same_site(self.same_site())
            .path("/")
            .build()
    }

    /// Expired, empty cookie with the same attributes as the session cookie.
    pub fn removal_cookie(&self) -> Cookie<'static> {
        let mut cookie = self.session_cookie(String::new());
        cookie.make_removal();
        cookie
    }

    fn same_site(&self) -> SameSite {
        if self.secure_cookie {
            SameSite::None
        } else {
            SameSite::Strict
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("email is required")]
    MissingEmail,
    #[error("unauthorized access")]
    MissingToken,
    #[error("unauthorized access")]
    InvalidToken(#[source] jsonwebtoken::errors::Error),
    #[error("forbidden access")]
    Forbidden,
    #[error("unable to sign session token: {0}")]
    Signing(#[source] jsonwebtoken::errors::Error),
}

impl SessionError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            SessionError::MissingEmail => StatusCode::BAD_REQUEST,
            SessionError::MissingToken | SessionError::InvalidToken(_) => {
                StatusCode::UNAUTHORIZED
            }
            SessionError::Forbidden => StatusCode::FORBIDDEN,
            SessionError::Signing(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for SessionError {
    fn into_response(self) -> Response {
        error_response(self.status_code(), self.to_string())
    }
}
