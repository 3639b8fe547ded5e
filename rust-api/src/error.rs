use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use std::fmt;

use crate::core::OddsError;
use crate::models::ErrorResponse;

/// Maximum rows accepted in a single batch request
pub const MAX_BATCH_ROWS: usize = 10_000;

/// Application error types
#[derive(Debug)]
pub enum AppError {
    /// Invalid request data
    ValidationError(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl From<OddsError> for AppError {
    fn from(err: OddsError) -> Self {
        AppError::ValidationError(err.to_string())
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let (error_code, message) = match self {
            AppError::ValidationError(msg) => ("validation_error", msg.clone()),
        };

        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: error_code.to_string(),
            message,
        })
    }
}

/// Reject batches over the row limit
pub fn validate_batch_size(count: usize) -> Result<(), AppError> {
    if count > MAX_BATCH_ROWS {
        return Err(AppError::ValidationError(format!(
            "At most {} rows per batch, got {}",
            MAX_BATCH_ROWS, count
        )));
    }
    Ok(())
}
