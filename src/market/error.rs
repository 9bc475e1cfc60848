use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

#[derive(Debug, Error)]
pub enum MarketDataError {
    #[error("All inputs are required!")]
    MissingInputs,

    #[error("Invalid date format! Use YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Unsupported resample rule: {0}")]
    UnsupportedResample(String),

    #[error("No data found for given inputs!")]
    NoData,

    #[error("Request error: {0}")]
    Request(String),

    #[error("Upstream returned status {0}")]
    UpstreamStatus(u16),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl From<reqwest::Error> for MarketDataError {
    fn from(err: reqwest::Error) -> Self {
        MarketDataError::Request(err.to_string())
    }
}

impl From<serde_json::Error> for MarketDataError {
    fn from(err: serde_json::Error) -> Self {
        MarketDataError::Parse(err.to_string())
    }
}

impl MarketDataError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            MarketDataError::MissingInputs
            | MarketDataError::InvalidDate(_)
            | MarketDataError::UnsupportedResample(_) => StatusCode::BAD_REQUEST,
            MarketDataError::NoData => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for MarketDataError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            error!(error = %self, "market data request failed");
        } else {
            warn!(error = %self, "rejected market data request");
        }

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
