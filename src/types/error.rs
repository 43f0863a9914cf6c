use thiserror::Error;

/// spendtrack error types
#[derive(Error, Debug)]
pub enum SpendtrackError {
    /// Query collaborator failed for a report variant
    #[error("query error: {0}")]
    Query(String),

    /// A row could not be decoded into the expected shape
    #[error("row error: {0}")]
    Row(String),

    /// Invalid run configuration, rejected before any row is read
    #[error("config error: {0}")]
    Config(String),

    /// File I/O error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to parse JSON input
    #[error("parse error: {0}")]
    Parse(String),
}

/// Result type alias for spendtrack
pub type Result<T> = std::result::Result<T, SpendtrackError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SpendtrackError::Config("threshold must not be negative".into());
        assert_eq!(
            err.to_string(),
            "config error: threshold must not be negative"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: SpendtrackError = io_err.into();
        assert!(err.to_string().contains("io error"));
    }
}
