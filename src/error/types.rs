//! Error types
//!
//! Defines domain-specific error types for each module of the crate.

use std::io;
use thiserror::Error;

/// Listing provider errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Invalid path: {0}")]
    InvalidPath(String),
    #[error("Path not found: {0}")]
    PathNotFound(String),
    #[error("Backend error: {0}")]
    Backend(String),
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),
}

/// Path resolution errors
///
/// A path with no case-insensitive match is not an error; it is reported as
/// `PathMatch::NotFound` by the resolver.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("Multiple paths matched '{segment}' with case insensitive compare: {candidates:?}")]
    AmbiguousMatch {
        segment: String,
        candidates: Vec<String>,
    },
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Reasons a filter specification is rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterError {
    #[error("Unknown column: {0}")]
    UnknownColumn(String),
    #[error("Unknown operator: {0}")]
    UnknownOperator(String),
    #[error("Operator '{operator}' cannot be applied to column '{column}'")]
    UnsupportedOperator { column: String, operator: String },
    #[error("Value '{value}' is not valid for column '{column}'")]
    InvalidValue { column: String, value: String },
}

/// Listing query errors
#[derive(Debug, Error)]
pub enum ListingError {
    #[error("Directory '{0}' could not be found")]
    DirectoryNotFound(String),
    #[error("Invalid sort field: {0}")]
    InvalidSortField(String),
    #[error(transparent)]
    Resolve(#[from] ResolveError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// General error that encompasses all error types
#[derive(Debug, Error)]
pub enum LakeError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Listing error: {0}")]
    Listing(#[from] ListingError),
    #[error("Resolve error: {0}")]
    Resolve(#[from] ResolveError),
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ambiguity_names_the_segment() {
        let err = ResolveError::AmbiguousMatch {
            segment: "data".into(),
            candidates: vec!["Data".into(), "data".into()],
        };
        let msg = err.to_string();
        assert!(msg.contains("'data'"));
        assert!(msg.contains("\"Data\""));
    }

    #[test]
    fn storage_errors_pass_through_listing_errors() {
        let err = ListingError::from(StorageError::Backend("timeout".into()));
        assert_eq!(err.to_string(), "Backend error: timeout");
    }

    #[test]
    fn sort_field_is_reported() {
        let err = LakeError::from(ListingError::InvalidSortField("size".into()));
        assert_eq!(err.to_string(), "Listing error: Invalid sort field: size");
    }
}
