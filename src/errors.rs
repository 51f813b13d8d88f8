use axum::{http::StatusCode, response::IntoResponse, Json};
use tracing::error;

use crate::JsonResponse;

#[derive(Debug)]
pub enum ApiError {
    Validation(&'static str),
    Conflict(&'static str),
    Forbidden(&'static str),
    NotFound(&'static str),
    UnsupportedMedia,
    ServerError,
    DatabaseError(sqlx::Error),
    IoError(std::io::Error),
}

#[derive(serde::Serialize)]
pub struct ErrorEnvelope {
    result: bool,
    error_type: &'static str,
    error_message: String,
}

impl ErrorEnvelope {
    pub fn new(error_type: &'static str, error_message: impl Into<String>) -> ErrorEnvelope {
        ErrorEnvelope {
            result: false,
            error_type,
            error_message: error_message.into(),
        }
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(value: sqlx::Error) -> Self {
        Self::DatabaseError(value)
    }
}

impl From<std::io::Error> for ApiError {
    fn from(value: std::io::Error) -> Self {
        Self::IoError(value)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        self.to_json_response().into_response()
    }
}

impl ApiError {
    pub fn to_json_response(&self) -> JsonResponse<ErrorEnvelope> {
        let (status_code, json) = match self {
            ApiError::Validation(message) => (
                StatusCode::BAD_REQUEST,
                ErrorEnvelope::new("Bad Request", *message),
            ),
            ApiError::Conflict(message) => (
                StatusCode::BAD_REQUEST,
                ErrorEnvelope::new("Bad Request", *message),
            ),
            ApiError::Forbidden(message) => (
                StatusCode::FORBIDDEN,
                ErrorEnvelope::new("Forbidden", *message),
            ),
            ApiError::NotFound(message) => (
                StatusCode::NOT_FOUND,
                ErrorEnvelope::new("Not Found", *message),
            ),
            ApiError::UnsupportedMedia => (
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
                ErrorEnvelope::new("Unsupported Media Type", "File type is not supported."),
            ),
            ApiError::ServerError => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorEnvelope::new("Internal Server Error", "Internal Server Error"),
            ),
            ApiError::DatabaseError(e) => {
                error!("Database error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorEnvelope::new("Internal Server Error", "Internal Server Error"),
                )
            }
            ApiError::IoError(e) => {
                error!("I/O error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorEnvelope::new("Internal Server Error", "Internal Server Error"),
                )
            }
        };
        (status_code, Json(json))
    }

    /// Two racing inserts for the same edge are arbitrated by a unique
    /// constraint; the loser's violation maps to the same conflict signal as
    /// the up-front membership check.
    pub fn conflict_on_unique(error: sqlx::Error, message: &'static str) -> ApiError {
        if let sqlx::Error::Database(e) = &error {
            if e.message().contains("UNIQUE constraint failed") {
                return ApiError::Conflict(message);
            }
        }
        ApiError::DatabaseError(error)
    }
}
