use std::collections::BTreeMap;

use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use core_types::ValidationErrors;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

pub const VALIDATION_TITLE: &str = "One or more validation errors occurred.";

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] database::DbError),
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationErrors),
    /// An extractor refused the request; carries the status axum chose
    /// (400, 413, 415, 422...).
    #[error("Request rejected ({0}): {1}")]
    Rejected(StatusCode, String),
    #[error("Not found: {0}")]
    NotFound(String),
}

/// Body of every non-validation error response.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    #[schema(example = "Student 42 not found")]
    pub error: String,
}

/// Body of a 400 caused by failed field rules, keyed by JSON field name.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ValidationErrorBody {
    #[schema(example = "One or more validation errors occurred.")]
    pub error: String,
    pub errors: BTreeMap<String, Vec<String>>,
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Rejected(rejection.status(), rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::Rejected(rejection.status(), rejection.body_text())
    }
}

/// Converts our custom `AppError` into an HTTP response.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::Validation(errors) => {
                tracing::debug!(errors = ?errors.failures(), "Request failed validation.");
                let body = ValidationErrorBody {
                    error: VALIDATION_TITLE.to_string(),
                    errors: errors.by_field(),
                };
                return (StatusCode::BAD_REQUEST, Json(body)).into_response();
            }
            AppError::Database(db_err) => {
                tracing::error!(error = ?db_err, "Database error.");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal database error occurred".to_string(),
                )
            }
            AppError::Rejected(status, message) => (status, message),
            AppError::NotFound(message) => (StatusCode::NOT_FOUND, message),
        };

        let body = Json(ErrorBody {
            error: error_message,
        });
        (status, body).into_response()
    }
}
