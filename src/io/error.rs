//! Error types for board generation, configuration, and export operations

use std::fmt;
use std::path::PathBuf;

/// Main error type for all board operations
///
/// Lookup misses and degenerate matches are deliberately not errors: the
/// former surface as `None` returns, the latter as an unsnapped evaluation.
#[derive(Debug)]
pub enum BoardError {
    /// Parameter validation failed before generation
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// No valid container context for a generation step
    ///
    /// Generation aborts before any destructive step, so a board the
    /// caller already holds is left untouched.
    MissingContext {
        /// Operation that required the context
        operation: &'static str,
        /// Description of what was missing
        reason: String,
    },

    /// Failed to save a board render to disk
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
        source: image::ImageError,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },
}

impl fmt::Display for BoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::MissingContext { operation, reason } => {
                write!(f, "Missing context for {operation}: {reason}")
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export image to '{}': {source}",
                    path.display()
                )
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
        }
    }
}

impl std::error::Error for BoardError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<std::io::Error> for BoardError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

/// Convenience type alias for board results
pub type Result<T> = std::result::Result<T, BoardError>;

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> BoardError {
    BoardError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create a missing context error
pub fn missing_context(operation: &'static str, reason: &impl ToString) -> BoardError {
    BoardError::MissingContext {
        operation,
        reason: reason.to_string(),
    }
}
