//! Error types for eventstatus

use thiserror::Error;

/// Service-level error type for eventstatus operations
///
/// Library crates keep their own error enums; this is what the service
/// surface converts them into before they reach a client.
#[derive(Debug, Error)]
pub enum EventStatusError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Lookup error: {0}")]
    LookupError(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Rate limited")]
    RateLimited,
}

impl EventStatusError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }

    pub fn lookup(msg: impl Into<String>) -> Self {
        Self::LookupError(msg.into())
    }

    pub fn invalid_request(msg: impl Into<String>) -> Self {
        Self::InvalidRequest(msg.into())
    }

    pub fn permission(msg: impl Into<String>) -> Self {
        Self::PermissionDenied(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, EventStatusError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_keep_message() {
        let err = EventStatusError::lookup("connection reset");
        assert_eq!(err.to_string(), "Lookup error: connection reset");

        let err = EventStatusError::permission("reload requires admin");
        assert_eq!(err.to_string(), "Permission denied: reload requires admin");
    }
}
