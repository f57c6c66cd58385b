//! Common error types for privsweep.

use std::path::PathBuf;
use thiserror::Error;

/// Common error type for privsweep operations.
///
/// Only `EnvironmentUnavailable` may abort a scan; every other kind is
/// handled at single-file granularity so one bad document cannot hide
/// findings in the rest of the corpus.
#[derive(Error, Debug)]
pub enum Error {
    #[error("scan root unavailable: {0}")]
    EnvironmentUnavailable(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("unreadable file {}: {reason}", .path.display())]
    FileUnreadable { path: PathBuf, reason: String },

    #[error("malformed document {}: {reason}", .path.display())]
    ParseFailure { path: PathBuf, reason: String },

    #[error("no schema matches {}", .0.display())]
    SchemaMismatch(PathBuf),

    #[error("credential decode failed: {0}")]
    DecodeFailure(String),

    #[error("{0}")]
    Other(String),
}

/// Result type alias using common Error.
pub type Result<T> = std::result::Result<T, Error>;

impl From<anyhow::Error> for Error {
    fn from(e: anyhow::Error) -> Self {
        Error::Other(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_carry_the_path() {
        let err = Error::FileUnreadable {
            path: PathBuf::from("/cache/Groups.xml"),
            reason: "permission denied".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("/cache/Groups.xml"));
        assert!(msg.contains("permission denied"));
    }

    #[test]
    fn test_decode_failure_message() {
        let err = Error::DecodeFailure("invalid base64".to_string());
        assert_eq!(err.to_string(), "credential decode failed: invalid base64");
    }
}
