//! Typed errors and HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("not found: {0}")]
    NotFound(String),
    #[error("validation: {0}")]
    Validation(String),
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("database: {0}")]
    Db(#[from] sqlx::Error),
}

/// Error body shape for every failure: `{"detail": "<message>"}`.
#[derive(Serialize)]
pub struct ErrorBody {
    pub detail: String,
}

impl AppError {
    /// Reclassify a unique-constraint violation as a conflict; everything
    /// else stays a storage error.
    pub fn from_unique(e: sqlx::Error, conflict_detail: &str) -> Self {
        if let sqlx::Error::Database(ref db) = e {
            if matches!(db.kind(), sqlx::error::ErrorKind::UniqueViolation) {
                return AppError::Conflict(conflict_detail.to_string());
            }
        }
        AppError::Db(e)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, detail) = match &self {
            AppError::NotFound(what) => (StatusCode::NOT_FOUND, format!("{} not found", what)),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg.clone()),
            AppError::Db(e) => {
                // Internal detail is logged, never leaked to the caller.
                tracing::error!(error = %e, "database failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal database error".to_string(),
                )
            }
        };
        (status, Json(ErrorBody { detail })).into_response()
    }
}
