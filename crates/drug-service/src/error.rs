//! Client-facing errors and their HTTP responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use drug_loader::QueryError;
use serde_json::json;
use thiserror::Error;

/// Errors returned to HTTP clients.
#[derive(Error, Debug)]
pub enum AppError {
    /// Missing or insufficient request parameters.
    #[error("{0}")]
    InvalidRequest(String),

    /// Datasets are not loaded (yet, or the load failed).
    #[error("Data is not loaded")]
    NotReady {
        /// Whether a load is currently running.
        is_loading: bool,
    },
}

impl From<QueryError> for AppError {
    fn from(err: QueryError) -> Self {
        match err {
            QueryError::InvalidRequest(message) => AppError::InvalidRequest(message),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::InvalidRequest(ref message) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "error": message }))).into_response()
            }
            AppError::NotReady { is_loading } => (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({ "error": self.to_string(), "isLoading": is_loading })),
            )
                .into_response(),
        }
    }
}
