use axum::{http::StatusCode, response::Json};
use compute::ComputeError;
use tracing::warn;

use crate::schemas::ErrorResponse;

pub type ApiError = (StatusCode, Json<ErrorResponse>);

/// Maps a compute failure to an HTTP status and error code.
pub fn compute_error(err: ComputeError) -> ApiError {
    let (status, code) = match &err {
        ComputeError::Configuration { .. } => (StatusCode::UNPROCESSABLE_ENTITY, "CONFIGURATION_ERROR"),
        ComputeError::InvalidInput(_) => (StatusCode::BAD_REQUEST, "INVALID_INPUT"),
        ComputeError::Date(_) => (StatusCode::UNPROCESSABLE_ENTITY, "DATE_ERROR"),
        ComputeError::Overflow(_) => (StatusCode::UNPROCESSABLE_ENTITY, "AMOUNT_OVERFLOW"),
    };
    warn!("Request rejected: {}", err);
    (status, Json(ErrorResponse::new(err.to_string(), code)))
}
