use crate::domain::error::DomainError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;
use validator::ValidationErrors;

#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("validation error: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("unknown endpoint")]
    NotFound,

    #[error("{0}")]
    BadRequest(String),

    #[error("token missing")]
    Unauthorized,

    #[error("token invalid")]
    InvalidToken,

    #[error("request timed out")]
    Timeout,

    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

pub(crate) type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            AppError::Domain(err) => match err {
                DomainError::Validation { .. } => StatusCode::BAD_REQUEST,
                DomainError::AlreadyExists(_) => StatusCode::CONFLICT,
                DomainError::Unauthorized | DomainError::InvalidCredentials => {
                    StatusCode::UNAUTHORIZED
                }
                DomainError::NotFound(_) => StatusCode::NOT_FOUND,
                DomainError::Forbidden => StatusCode::FORBIDDEN,
                DomainError::Unexpected(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            AppError::Validation(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Unauthorized | AppError::InvalidToken => StatusCode::UNAUTHORIZED,
            AppError::Timeout => StatusCode::REQUEST_TIMEOUT,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let msg = if status == StatusCode::INTERNAL_SERVER_ERROR {
            error!(error = ?self, "request failed");
            "internal error".to_string()
        } else {
            self.to_string()
        };

        (status, Json(ErrorBody { error: msg })).into_response()
    }
}
