//! # API Errors
//!
//! Maps service failures onto the three wire outcomes: bad request, not
//! found, internal. Every handled error is logged in full before being
//! reduced to a generic message, so internal detail never reaches the
//! caller.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use crate::observability::RequestContext;
use crate::sequence::StoreError;

/// Errors returned to API callers
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// Malformed input, rejected before any store access
    #[error("{0}")]
    BadRequest(String),

    /// The store signalled no matching row
    #[error("{0}")]
    NotFound(String),

    /// Anything else; the cause is logged, never exposed
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Reject malformed input, logging the reason
    pub fn bad_request(ctx: &RequestContext, message: &str) -> Self {
        ctx.warn("request rejected", &[("reason", message)]);
        ApiError::BadRequest(message.to_string())
    }

    /// Wrap an unexpected failure. The cause is logged in full; the caller
    /// only sees `message`.
    pub fn internal(ctx: &RequestContext, cause: &StoreError, message: &str) -> Self {
        ctx.error(
            "request failed",
            &[("cause", &cause.to_string()), ("message", message)],
        );
        ApiError::Internal(message.to_string())
    }

    /// Classify a store error at the handler boundary: the no-rows signal
    /// becomes not-found, anything else is reduced to a generic internal
    /// error.
    pub fn from_store(
        ctx: &RequestContext,
        err: StoreError,
        not_found: &str,
        internal: &str,
    ) -> Self {
        match err {
            StoreError::NoRows => {
                ctx.warn("record not found", &[("message", not_found)]);
                ApiError::NotFound(not_found.to_string())
            }
            err => Self::internal(ctx, &err, internal),
        }
    }
}

/// Wire shape of every error response
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub message: String,
    pub status: u16,
}

impl From<&ApiError> for ErrorBody {
    fn from(err: &ApiError) -> Self {
        Self {
            message: err.to_string(),
            status: err.status_code().as_u16(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorBody::from(&self);
        (status, Json(body)).into_response()
    }
}
