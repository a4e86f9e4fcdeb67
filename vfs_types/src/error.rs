//! Filesystem error kinds
//!
//! Every public filesystem operation returns [`FsResult`]. Errors are values,
//! never aborts, and the originating kind is preserved all the way up.

use thiserror::Error;

/// Errors that can occur during filesystem operations
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FsError {
    /// A path segment does not name an existing node
    #[error("No such file or directory")]
    NotFound,

    /// A lookup or directory operation was attempted on a non-directory
    #[error("Not a directory")]
    NotADirectory,

    /// A file operation was attempted on something that is not a file
    #[error("Not a file")]
    NotAFile,

    /// The node being created already exists
    #[error("File exists")]
    AlreadyExists,

    /// Path nesting exceeds the maximum recursion depth
    #[error("Path too deep")]
    TooDeep,

    /// The canonical path exceeds the maximum path length
    #[error("File name too long")]
    NameTooLong,

    /// Allocating storage for a segment name failed
    #[error("Out of memory")]
    OutOfMemory,

    /// Filesystem state does not permit the operation (e.g. no root installed)
    #[error("Internal filesystem error")]
    InternalError,

    /// A name that cannot be used for a directory entry
    #[error("Invalid name: {0:?}")]
    InvalidName(String),

    /// The backend does not implement this capability
    #[error("Operation not supported")]
    NotSupported,

    /// Backend-specific failure, passed through unchanged
    #[error("Backend error: {0}")]
    Backend(String),
}

/// Result type for filesystem operations
pub type FsResult<T> = Result<T, FsError>;
