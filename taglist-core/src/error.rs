use std::fmt;
use thiserror::Error;

/// Transport operation that produced a failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportOperation {
    /// Creating the request context for a descriptor
    Create,
    /// Performing the listing round trip
    Read,
    /// Fetching the response buffer
    Buffer,
}

impl fmt::Display for TransportOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TransportOperation::Create => "create",
            TransportOperation::Read => "read",
            TransportOperation::Buffer => "buffer",
        };
        f.write_str(name)
    }
}

/// Main error type for tag listing operations
#[derive(Error, Debug)]
pub enum TagListError {
    #[error("Invalid descriptor: {0}")]
    InvalidDescriptor(String),

    #[error("{operation} failed for {scope}: {message}")]
    TransportFailure {
        operation: TransportOperation,
        scope: String,
        status: i32,
        message: String,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid data: {0}")]
    InvalidData(String),
}

impl TagListError {
    /// Raw transport status carried by a `TransportFailure`
    pub fn status(&self) -> Option<i32> {
        match self {
            TagListError::TransportFailure { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Result type alias for tag listing operations
pub type TagListResult<T> = Result<T, TagListError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_failure_message() {
        let err = TagListError::TransportFailure {
            operation: TransportOperation::Read,
            scope: "controller".to_string(),
            status: -32,
            message: "PLCTAG_ERR_TIMEOUT".to_string(),
        };
        assert_eq!(err.to_string(), "read failed for controller: PLCTAG_ERR_TIMEOUT");
        assert_eq!(err.status(), Some(-32));
        assert_eq!(TagListError::InvalidData("x".to_string()).status(), None);
    }
}
