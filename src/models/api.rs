use crate::models::error::DomainError;
use crate::models::error_type::ErrorType;
use serde::{Deserialize, Serialize};

/// Successful API response wrapping the returned data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: String,
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn ok(message: String, data: T) -> Self {
        Self {
            success: true,
            message,
            data,
        }
    }
}

/// Generic API error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code, e.g. SYS0121
    pub error: String,
    pub details: Option<String>,
}

impl ErrorResponse {
    pub fn new(error_type: ErrorType, details: String) -> Self {
        Self {
            error: error_type.code().to_string(),
            details: Some(details),
        }
    }
}

impl From<&DomainError> for ErrorResponse {
    fn from(error: &DomainError) -> Self {
        ErrorResponse::new(error.error_type(), error.to_string())
    }
}
