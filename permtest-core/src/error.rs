//! Structured error types for permtest.

use thiserror::Error;

/// Unified error type for all permtest operations.
#[derive(Debug, Error)]
pub enum PermtestError {
    /// I/O error (file not found, permission denied, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A token could not be read as a real number
    #[error("parse error: {0}")]
    Parse(String),

    /// Invalid input (empty group, subset larger than its universe)
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// Convenience alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, PermtestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_error_converts() {
        fn open() -> Result<()> {
            Err(std::io::Error::new(std::io::ErrorKind::NotFound, "missing.txt"))?;
            Ok(())
        }
        let err = open().unwrap_err();
        assert!(matches!(err, PermtestError::Io(_)));
        assert!(err.to_string().starts_with("I/O error:"));
    }

    #[test]
    fn display_prefixes() {
        let parse = PermtestError::Parse("token 3: 'abc'".into());
        assert_eq!(parse.to_string(), "parse error: token 3: 'abc'");
        let invalid = PermtestError::InvalidInput("group_a is empty".into());
        assert_eq!(invalid.to_string(), "invalid input: group_a is empty");
    }
}
