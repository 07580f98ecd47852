use serde::Serialize;

/// Catalog of error codes reported to API callers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ErrorType {
    /// Unexpected failure in persistence, configuration or the runtime
    SystemError,

    /// A request parameter could not be accepted
    InvalidParam,

    /// A read returned no rows
    NoObjectExists,
}

impl ErrorType {
    /// Stable code shown to clients
    pub fn code(&self) -> &'static str {
        match self {
            ErrorType::SystemError => "SYS0001",
            ErrorType::InvalidParam => "SYS0002",
            ErrorType::NoObjectExists => "SYS0121",
        }
    }

    /// Message template; each `{}` is filled with one label in order
    pub fn template(&self) -> &'static str {
        match self {
            ErrorType::SystemError => "System error: {}",
            ErrorType::InvalidParam => "Invalid {}: {}",
            ErrorType::NoObjectExists => "No {} exists.",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes() {
        assert_eq!(ErrorType::SystemError.code(), "SYS0001");
        assert_eq!(ErrorType::InvalidParam.code(), "SYS0002");
        assert_eq!(ErrorType::NoObjectExists.code(), "SYS0121");
    }
}
