//! Mapping of analyzer failures onto relay responses

use crate::error::Error;
use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::{Value, json};
use tracing::error;

/// Error returned by a relay endpoint
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The query string or JSON body could not be read
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The request named a repository that could not be parsed
    #[error("Invalid repository reference: {0}")]
    BadRequest(String),

    /// Listing the repository's files failed
    #[error("Failed to fetch repository files: {0}")]
    FetchFiles(Error),

    /// Any failure while analyzing the selected files
    #[error("Failed to analyze repository: {0}")]
    Analyze(Error),
}

impl ApiError {
    /// Classify a failure of the listing endpoint
    pub fn fetch_files(err: Error) -> Self {
        match err {
            Error::InvalidRepository(msg) => ApiError::BadRequest(msg),
            other => ApiError::FetchFiles(other),
        }
    }

    /// Classify a failure of the analysis endpoint
    pub fn analyze(err: Error) -> Self {
        match err {
            Error::InvalidRepository(msg) => ApiError::BadRequest(msg),
            other => ApiError::Analyze(other),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::InvalidRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::InvalidRequest(rejection.body_text())
    }
}

/// The remote's body as JSON when it parses, as a string otherwise
fn remote_response(err: &Error) -> Value {
    match err.remote_body() {
        Some(body) => serde_json::from_str(body).unwrap_or_else(|_| Value::String(body.to_string())),
        None => Value::Null,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            ApiError::InvalidRequest(msg) => (
                StatusCode::BAD_REQUEST,
                json!({
                    "error": "Invalid request",
                    "details": msg,
                }),
            ),
            ApiError::BadRequest(msg) => (
                StatusCode::BAD_REQUEST,
                json!({
                    "error": "Invalid repository reference",
                    "details": msg,
                }),
            ),
            ApiError::FetchFiles(err) => {
                error!("Failed to fetch repository files: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({
                        "error": "Failed to fetch repository files",
                        "details": err.to_string(),
                        "response": remote_response(err),
                    }),
                )
            }
            ApiError::Analyze(err @ Error::PromptTooLarge { .. }) => (
                StatusCode::PAYLOAD_TOO_LARGE,
                json!({
                    "error": "Selected files are too large to analyze",
                    "details": err.to_string(),
                }),
            ),
            ApiError::Analyze(err) => {
                error!("Failed to analyze repository: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "Failed to analyze repository" }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}
