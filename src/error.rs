//! Error types for the search server

use crate::document::DocumentId;
use thiserror::Error;

/// Search server error type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// A document with this id is already indexed
    #[error("Document already exists: {0}")]
    DuplicateId(DocumentId),

    /// No document with this id is indexed
    #[error("Document not found: {0}")]
    NotFound(DocumentId),

    /// Malformed query text
    #[error("Invalid query: {0}")]
    InvalidQuery(String),
}

/// Result type alias for search server operations
pub type Result<T> = std::result::Result<T, SearchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(SearchError::DuplicateId(7).to_string(), "Document already exists: 7");
        assert_eq!(SearchError::NotFound(3).to_string(), "Document not found: 3");
        assert_eq!(
            SearchError::InvalidQuery("lone minus".to_string()).to_string(),
            "Invalid query: lone minus"
        );
    }
}
