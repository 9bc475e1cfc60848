use super::config;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ExpiryError {
    #[error("Date parameter is required")]
    MissingParameter,

    #[error("Invalid date format: {0}. Use YYYY-MM-DD format.")]
    InvalidDateFormat(String),

    #[error("Invalid expiry type: {0}. Use monthly, weekly or both.")]
    InvalidExpiryKind(String),

    #[error("Invalid request body: {0}")]
    InvalidRequestBody(String),

    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl ExpiryError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ExpiryError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for ExpiryError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let body = match &self {
            ExpiryError::MissingParameter => json!({
                "error": self.to_string(),
                "example_get": config::EXAMPLE_GET,
                "example_post": config::EXAMPLE_POST,
            }),
            ExpiryError::InternalError(details) => json!({
                "error": "Internal server error",
                "details": details,
            }),
            _ => json!({ "error": self.to_string() }),
        };

        if status.is_server_error() {
            error!(error = %self, "expiry request failed");
        } else {
            warn!(error = %self, "rejected expiry request");
        }

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(ExpiryError::MissingParameter.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ExpiryError::InvalidDateFormat("2024-13-01".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ExpiryError::InternalError("boom".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_invalid_date_message_echoes_input() {
        let err = ExpiryError::InvalidDateFormat("15/01/2024".into());
        assert_eq!(err.to_string(), "Invalid date format: 15/01/2024. Use YYYY-MM-DD format.");
    }
}
