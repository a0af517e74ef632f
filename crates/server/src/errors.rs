use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use service::errors::ServiceError;
use thiserror::Error;
use tracing::error;

/// Literal body for every missing id/iso.
pub const NOT_FOUND_TEXT: &str = "Malaria data not found";

/// Plain-text error response; clients get a status and a fixed description only.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: &'static str,
}

impl ApiError {
    pub fn new(status: StatusCode, message: &'static str) -> Self { Self { status, message } }

    pub fn not_found() -> Self { Self::new(StatusCode::NOT_FOUND, NOT_FOUND_TEXT) }

    /// Map a failed mutation: missing record is 404, anything else is a
    /// storage failure reported as 501 with `failure` as the body.
    pub fn mutation(e: ServiceError, failure: &'static str) -> Self {
        match e {
            ServiceError::NotFound(_) => Self::not_found(),
            other => {
                error!(err = %other, "{}", failure);
                Self::new(StatusCode::NOT_IMPLEMENTED, failure)
            }
        }
    }

    /// Map a failed read: missing record is 404, storage trouble is 500.
    pub fn read(e: ServiceError) -> Self {
        match e {
            ServiceError::NotFound(_) => Self::not_found(),
            other => {
                error!(err = %other, "read malaria data failed");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Error reading malaria data")
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, self.message).into_response()
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
