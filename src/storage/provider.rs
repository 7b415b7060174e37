//! Listing provider interface
//!
//! The storage backend is consumed through [`PathLister`]. Paths are relative
//! to the container root and use `/` separators; a `None` or empty directory
//! means the root.

use async_trait::async_trait;
use chrono::{DateTime, FixedOffset};

use crate::error::StorageError;

/// One path reported by a listing provider
#[derive(Debug, Clone, PartialEq)]
pub struct RawPath {
    /// Full path relative to the container root
    pub path: String,
    pub is_directory: Option<bool>,
    pub content_length: Option<u64>,
    pub last_modified: Option<DateTime<FixedOffset>>,
}

impl RawPath {
    pub fn is_directory(&self) -> bool {
        self.is_directory.unwrap_or(false)
    }
}

#[async_trait]
pub trait PathLister: Send + Sync {
    /// List paths under a directory, descending into subdirectories if `recursive`
    async fn list_paths(
        &self,
        directory: Option<&str>,
        recursive: bool,
    ) -> Result<Vec<RawPath>, StorageError>;

    /// Check whether a directory exists with exactly this casing
    async fn directory_exists(&self, path: &str) -> Result<bool, StorageError>;

    /// Check whether a file exists with exactly this casing
    async fn file_exists(&self, path: &str) -> Result<bool, StorageError>;
}
