//! Maps crate errors onto HTTP responses with a small JSON body.

use crate::errors::Error;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::error;

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    field: Option<&'static str>,
}

/// Handler error: a crate [`Error`] rendered as `{"error": ...}`.
#[derive(Debug)]
pub struct ApiError(pub Error);

impl From<Error> for ApiError {
    fn from(value: Error) -> Self {
        Self(value)
    }
}

impl ApiError {
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            Error::Validation { .. } | Error::InvalidAmount { .. } | Error::MissingRecipient => {
                StatusCode::BAD_REQUEST
            }
            Error::TimesheetNotFound { .. } | Error::JobNotFound { .. } => StatusCode::NOT_FOUND,
            Error::Notification { .. } | Error::Http(_) => StatusCode::BAD_GATEWAY,
            Error::Config { .. } | Error::Database(_) | Error::Io(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!("Request failed: {}", self.0);
        }
        let field = match &self.0 {
            Error::Validation { field, .. } => Some(*field),
            _ => None,
        };
        let body = ErrorBody {
            error: self.0.to_string(),
            field,
        };
        (status, Json(body)).into_response()
    }
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            ApiError(Error::MissingRecipient).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError(Error::TimesheetNotFound { id: Uuid::nil() }).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError(Error::Notification {
                message: "down".to_string()
            })
            .status(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            ApiError(Error::Config {
                message: "bad".to_string()
            })
            .status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
