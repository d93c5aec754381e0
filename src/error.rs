//! Error types for threadboard operations.

use thiserror::Error;

/// Result type alias for threadboard operations.
pub type Result<T> = std::result::Result<T, ThreadboardError>;

/// Main error type for threadboard operations.
///
/// Every variant is local and recoverable. The core returns these to its
/// caller and never logs or renders them itself.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ThreadboardError {
    /// Path text that does not parse as a comma-separated index list
    #[error("Malformed path: {0}")]
    MalformedPath(String),

    /// Well-formed path that does not address an existing post
    #[error("Path not found: {0}")]
    PathNotFound(String),

    /// Empty author or body, or a submission missing its fields
    #[error("Invalid field: {0}")]
    InvalidField(String),
}

impl ThreadboardError {
    /// Creates a new malformed path error.
    pub fn malformed_path<T: ToString>(msg: T) -> Self {
        Self::MalformedPath(msg.to_string())
    }

    /// Creates a new path not found error.
    pub fn path_not_found<T: ToString>(msg: T) -> Self {
        Self::PathNotFound(msg.to_string())
    }

    /// Creates a new invalid field error.
    pub fn invalid_field<T: ToString>(msg: T) -> Self {
        Self::InvalidField(msg.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ThreadboardError::path_not_found("5");
        assert_eq!(err.to_string(), "Path not found: 5");

        let err = ThreadboardError::malformed_path("segment 1 is empty");
        assert_eq!(err.to_string(), "Malformed path: segment 1 is empty");

        let err = ThreadboardError::invalid_field("author cannot be empty");
        assert_eq!(err.to_string(), "Invalid field: author cannot be empty");
    }
}
