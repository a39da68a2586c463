//! API error type and its HTTP mapping.
//!
//! | Variant | Status | Code |
//! |---------|--------|------|
//! | `NotFound` | 404 | `E0003` |
//! | `Conflict` | 409 | `E0004` |
//! | `Internal` | 500 | `E9001` |

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use log::error;
use roster_core::EmployeeServiceError;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ApiResult<T> = Result<T, ApiError>;

/// Error body returned for every failed request except an absent GET.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: &'static str,
    pub message: String,
}

#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    Conflict(String),
    /// Details are logged, never sent to the client.
    Internal(String),
}

impl Display for ApiError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(message) => write!(f, "resource not found: {message}"),
            Self::Conflict(message) => write!(f, "resource already exists: {message}"),
            Self::Internal(message) => write!(f, "internal server error: {message}"),
        }
    }
}

impl Error for ApiError {}

impl From<EmployeeServiceError> for ApiError {
    fn from(value: EmployeeServiceError) -> Self {
        match value {
            EmployeeServiceError::DuplicateResource(_) => Self::Conflict(value.to_string()),
            EmployeeServiceError::NotFound(_) => Self::NotFound(value.to_string()),
            EmployeeServiceError::Repo(err) => Self::Internal(err.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            Self::NotFound(message) => (StatusCode::NOT_FOUND, "E0003", message),
            Self::Conflict(message) => (StatusCode::CONFLICT, "E0004", message),
            Self::Internal(message) => {
                error!("event=request_failed module=http status=error error={message}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "E9001",
                    "Internal server error".to_string(),
                )
            }
        };

        (status, Json(ErrorBody { code, message })).into_response()
    }
}
