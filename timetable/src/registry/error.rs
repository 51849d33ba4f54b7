//! Registry error types.

use crate::domain::DomainError;
use crate::storage::StorageError;
use crate::validation::ValidationError;

/// Errors surfaced by [`Registry`](super::Registry) operations.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// Input failed validation; nothing was changed
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Operation precondition on existing state was violated
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// The backing file could not be read or written
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

impl RegistryError {
    /// Was this caused by user input?
    pub fn is_validation(&self) -> bool {
        matches!(self, RegistryError::Validation(_))
    }

    /// Was this caused by the backing file?
    pub fn is_storage(&self) -> bool {
        matches!(self, RegistryError::Storage(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn categories() {
        let err = RegistryError::from(ValidationError::NoDays);
        assert!(err.is_validation());
        assert!(!err.is_storage());
        assert_eq!(err.to_string(), "no operating days given");

        let err = RegistryError::from(DomainError::RouteNotFound(5));
        assert!(!err.is_validation());
        assert!(!err.is_storage());
        assert_eq!(err.to_string(), "route 5 not found");

        let err = RegistryError::from(StorageError::Malformed {
            line: 2,
            message: "bad".into(),
        });
        assert!(err.is_storage());
        assert_eq!(
            err.to_string(),
            "storage error: malformed timetable at line 2: bad"
        );
    }
}
