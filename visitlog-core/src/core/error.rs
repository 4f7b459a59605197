//! Error types for the Visitlog core library.

use thiserror::Error;

/// All errors that can occur within the Visitlog core library.
#[derive(Debug, Error)]
pub enum VisitlogError {
    /// A SQLite operation failed.
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// A required field was empty or malformed when trying to save a visit.
    #[error("Validation failed: {0}")]
    ValidationFailed(String),

    /// A visit ID was targeted by an update but does not exist in the collection.
    #[error("Visit not found: {0}")]
    VisitNotFound(String),

    /// The opened file is not a valid Visitlog database.
    #[error("Invalid store: {0}")]
    InvalidStore(String),

    /// A candidate import document is malformed and was rejected wholesale.
    #[error("Import rejected: {0}")]
    ImportValidation(String),

    /// Export was requested on an empty collection.
    #[error("There are no visits to export")]
    NothingToExport,

    /// An I/O operation on the filesystem failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Stored visit data could not be serialized to or from JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias that pins the error type to [`VisitlogError`].
pub type Result<T> = std::result::Result<T, VisitlogError>;

impl VisitlogError {
    /// Returns a short, human-readable message suitable for display to the end user.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Database(e) => format!("Failed to save: {e}"),
            Self::ValidationFailed(msg) => msg.clone(),
            Self::VisitNotFound(_) => "Visit no longer exists".to_string(),
            Self::InvalidStore(_) => "Could not open visit log file".to_string(),
            Self::ImportValidation(msg) => format!("Import failed: {msg}"),
            Self::NothingToExport => "There are no visits to export".to_string(),
            Self::Io(e) => format!("File error: {e}"),
            Self::Json(e) => format!("Data format error: {e}"),
        }
    }

    /// True for failures of the durable store itself, as opposed to bad input.
    /// These roll back the attempted in-memory change and are retryable.
    #[must_use]
    pub fn is_persistence(&self) -> bool {
        matches!(self, Self::Database(_) | Self::Io(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_user_message_hides_id() {
        let e = VisitlogError::VisitNotFound("abc-123".to_string());
        assert!(!e.user_message().contains("abc-123"));
    }

    #[test]
    fn test_persistence_classification() {
        assert!(VisitlogError::Io(std::io::Error::other("disk full")).is_persistence());
        assert!(!VisitlogError::ValidationFailed("x".to_string()).is_persistence());
        assert!(!VisitlogError::NothingToExport.is_persistence());
    }
}
