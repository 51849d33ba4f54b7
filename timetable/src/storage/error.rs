//! Storage error types.

use std::path::PathBuf;

/// Errors from reading or writing a timetable file.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The file could not be read or written
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file content does not follow the timetable format
    #[error("malformed timetable at line {line}: {message}")]
    Malformed { line: usize, message: String },
}

impl StorageError {
    pub(crate) fn malformed(line: usize, message: impl Into<String>) -> Self {
        StorageError::Malformed {
            line,
            message: message.into(),
        }
    }
}
