use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use folio_storage::errors::Error as StorageError;

use crate::services::auth::AuthError;

/// An error as reported to API clients, `{success: false, error}` with a matching status.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    Unauthorized(String),
    #[error("{0}")]
    Forbidden(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Map a storage error to the response for `context`, e.g. `"Failed to fetch artworks"`.
    ///
    /// [`StorageError::NotFound`] becomes a 404 with `not_found`, anything else is logged and
    /// becomes a 500 with `context`.
    pub fn from_storage(
        not_found: impl Into<String>,
        context: impl Into<String>,
    ) -> impl FnOnce(StorageError) -> Self {
        let not_found = not_found.into();
        let context = context.into();
        move |e| match e {
            StorageError::NotFound => Self::NotFound(not_found),
            e => {
                log::error!("{context}: {e}");
                Self::Internal(context)
            }
        }
    }

    /// Map a storage error to a 500 with `context`, logging it.
    pub fn internal(context: impl Into<String>) -> impl FnOnce(StorageError) -> Self {
        let context = context.into();
        move |e| {
            log::error!("{context}: {e}");
            Self::Internal(context)
        }
    }
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    success: bool,
    error: &'a str,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let error = self.to_string();
        let body = ErrorBody {
            success: false,
            error: &error,
        };
        (self.status(), Json(body)).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<AuthError> for ApiError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::InvalidCredentials => Self::Unauthorized(e.to_string()),
            AuthError::InvalidToken | AuthError::Expired => {
                Self::Unauthorized("Not authenticated".to_owned())
            }
            AuthError::AdminExists => Self::Conflict(e.to_string()),
            AuthError::Hash(_) | AuthError::Storage(_) => {
                log::error!("Authentication failed: {e}");
                Self::Internal("Internal server error".to_owned())
            }
        }
    }
}
