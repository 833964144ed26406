use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::api::ErrorResponse;
use crate::models::FieldError;
use crate::store::StoreError;

/// Everything a recipe handler can fail with, mapped onto a status code.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Validation failed")]
    Validation(Vec<FieldError>),

    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    #[error("Unsupported media type: {0}")]
    UnsupportedMediaType(String),

    #[error("ID mismatch.")]
    IdMismatch,

    #[error("Recipe not found")]
    NotFound,

    #[error("Storage failure: {0}")]
    Storage(StoreError),
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound => ApiError::NotFound,
            other => ApiError::Storage(other),
        }
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::InvalidBody(_) | ApiError::IdMismatch => {
                StatusCode::BAD_REQUEST
            }
            ApiError::UnsupportedMediaType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            ApiError::Validation(fields) => ErrorResponse {
                error: "Validation failed".to_string(),
                fields,
            },
            ApiError::Storage(e) => {
                tracing::error!("Storage failure: {}", e);
                ErrorResponse::new("Internal server error")
            }
            other => ErrorResponse::new(other.to_string()),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_not_found_becomes_404() {
        let err = ApiError::from(StoreError::NotFound);
        assert!(matches!(err, ApiError::NotFound));
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_storage_failure_is_500() {
        let err = ApiError::from(StoreError::Database(diesel::result::Error::BrokenTransactionManager));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_client_errors_are_400() {
        assert_eq!(ApiError::IdMismatch.status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::Validation(vec![]).status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ApiError::InvalidBody("eof".to_string()).status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_unsupported_media_type_is_415() {
        let err = ApiError::UnsupportedMediaType("text/plain".to_string());
        assert_eq!(err.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    }
}
