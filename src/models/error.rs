use crate::models::error_type::ErrorType;
use crate::utils::error_msg::return_msg;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("{message}")]
    NotFound { resource: String, message: String },

    #[error("Invalid page request: {0}")]
    InvalidPageRequest(String),

    #[error("Failed to read config file '{path}': {cause}")]
    ConfigRead { path: PathBuf, cause: io::Error },

    #[error("Failed to parse config file '{path}': {cause}")]
    ConfigParse {
        path: PathBuf,
        cause: serde_json::Error,
    },

    #[error("Invalid configuration: {0}")]
    ConfigInvalid(String),

    #[error("Failed to open or create database file '{path}': {cause}")]
    DatabaseConnection { path: String, cause: r2d2::Error },

    #[error("Failed to get database connection from pool: {0}")]
    DatabasePool(#[from] r2d2::Error),

    #[error("Database query failed for '{operation}': {cause}")]
    DatabaseQuery {
        operation: String,
        cause: rusqlite::Error,
    },

    #[error("Failed to insert into {table}: {cause}")]
    DatabaseInsert {
        table: String,
        cause: rusqlite::Error,
    },

    #[error("Transaction {operation} failed: {cause}")]
    Transaction {
        operation: String,
        cause: rusqlite::Error,
    },
}

impl DomainError {
    /// Error raised when a read yields no rows for `resource`
    pub fn no_object_exists(resource: &str) -> Self {
        DomainError::NotFound {
            resource: resource.to_string(),
            message: return_msg(ErrorType::NoObjectExists, &[resource]),
        }
    }

    pub fn error_type(&self) -> ErrorType {
        match self {
            DomainError::NotFound { .. } => ErrorType::NoObjectExists,
            DomainError::InvalidPageRequest(_) => ErrorType::InvalidParam,
            _ => ErrorType::SystemError,
        }
    }
}

pub type Result<T> = std::result::Result<T, DomainError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_object_exists_names_resource() {
        let error = DomainError::no_object_exists("log");

        assert_eq!(error.error_type(), ErrorType::NoObjectExists);
        assert_eq!(error.to_string(), "No log exists.");
        match error {
            DomainError::NotFound { resource, .. } => assert_eq!(resource, "log"),
            _ => panic!("Expected NotFound error"),
        }
    }

    #[test]
    fn test_error_type_mapping() {
        let invalid = DomainError::InvalidPageRequest("size must be at least 1".to_string());
        assert_eq!(invalid.error_type(), ErrorType::InvalidParam);

        let query = DomainError::DatabaseQuery {
            operation: "find all logs".to_string(),
            cause: rusqlite::Error::QueryReturnedNoRows,
        };
        assert_eq!(query.error_type(), ErrorType::SystemError);
    }
}
