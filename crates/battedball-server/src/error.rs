//! Error responses for the HTTP service.

use axum::Json;
use axum::extract::rejection::QueryRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

/// Body text of every 5xx response. Internal details stay in the logs.
pub const GENERIC_ERROR_MESSAGE: &str = "An error occurred while processing your request.";

/// Errors that can end a request.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The query string could not be decoded.
    #[error("invalid query string: {0}")]
    BadQuery(#[from] QueryRejection),

    /// An error from the dataset layer.
    #[error(transparent)]
    Dataset(#[from] battedball::Error),

    /// The blocking query task panicked or was cancelled.
    #[error("query task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl ApiError {
    /// HTTP status for this error.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadQuery(_) => StatusCode::BAD_REQUEST,
            Self::Dataset(e) if e.is_client_error() => StatusCode::BAD_REQUEST,
            Self::Dataset(_) | Self::Task(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to show to the caller.
    ///
    /// Client errors describe what was wrong with the request; everything
    /// else collapses to [`GENERIC_ERROR_MESSAGE`].
    #[must_use]
    pub fn public_message(&self) -> String {
        if self.status().is_client_error() {
            self.to_string()
        } else {
            GENERIC_ERROR_MESSAGE.to_string()
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(json!({ "error": self.public_message() }))).into_response()
    }
}
