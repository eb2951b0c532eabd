//! Unified error types for edit-forensics.
//!
//! The crate strongly prefers degraded results over errors: partial
//! snapshots, skipped leaves, and silently ignored geometry failures are
//! normal runtime states. The variants here cover the remaining cases that
//! signal host misuse rather than an expected degradation.

use thiserror::Error;

/// Main error type for edit-forensics operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ForensicsError {
    /// Errors during snapshot capture
    #[error("Snapshot capture failed: {context}")]
    Snapshot {
        context: String,
        #[source]
        source: SnapshotErrorKind,
    },

    /// Configuration errors
    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Specific snapshot error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum SnapshotErrorKind {
    #[error("root node is not part of the observed tree")]
    InvalidRoot,
}

/// Convenience result type for edit-forensics operations.
pub type Result<T> = std::result::Result<T, ForensicsError>;

impl ForensicsError {
    /// Create a snapshot error with context.
    pub fn snapshot(context: impl Into<String>, source: SnapshotErrorKind) -> Self {
        Self::Snapshot {
            context: context.into(),
            source,
        }
    }
}
