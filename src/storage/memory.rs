//! In-memory listing provider
//!
//! Holds a case-sensitive path tree in a `BTreeMap` and counts calls per
//! operation so callers can assert which lookups were made.

use async_trait::async_trait;
use chrono::{DateTime, FixedOffset};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::error::StorageError;
use crate::storage::provider::{PathLister, RawPath};
use crate::utils::paths::{is_root, parent_directory};

#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, RawPath>,
    list_calls: AtomicUsize,
    exists_calls: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a directory and any missing parents
    pub fn with_directory(mut self, path: &str) -> Self {
        self.insert_directory(path);
        self
    }

    /// Adds a file with no modification time
    pub fn with_file(self, path: &str, content_length: u64) -> Self {
        self.insert_file(path, content_length, None)
    }

    /// Adds a file with a modification time
    pub fn with_file_modified(
        self,
        path: &str,
        content_length: u64,
        last_modified: DateTime<FixedOffset>,
    ) -> Self {
        self.insert_file(path, content_length, Some(last_modified))
    }

    fn insert_file(
        mut self,
        path: &str,
        content_length: u64,
        last_modified: Option<DateTime<FixedOffset>>,
    ) -> Self {
        let path = path.trim_matches('/').to_string();
        let parent = parent_directory(&path);
        if !is_root(&parent) {
            self.insert_directory(&parent);
        }
        self.entries.insert(
            path.clone(),
            RawPath {
                path,
                is_directory: Some(false),
                content_length: Some(content_length),
                last_modified,
            },
        );
        self
    }

    fn insert_directory(&mut self, path: &str) {
        let mut current = String::new();
        for segment in path.split('/').filter(|s| !s.is_empty()) {
            if !current.is_empty() {
                current.push('/');
            }
            current.push_str(segment);
            self.entries.entry(current.clone()).or_insert_with(|| RawPath {
                path: current.clone(),
                is_directory: Some(true),
                content_length: None,
                last_modified: None,
            });
        }
    }

    /// Number of `list_paths` calls served
    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    /// Number of existence checks served
    pub fn exists_calls(&self) -> usize {
        self.exists_calls.load(Ordering::SeqCst)
    }

    fn is_directory(&self, path: &str) -> bool {
        is_root(path)
            || self
                .entries
                .get(path.trim_matches('/'))
                .is_some_and(RawPath::is_directory)
    }
}

#[async_trait]
impl PathLister for MemoryStore {
    async fn list_paths(
        &self,
        directory: Option<&str>,
        recursive: bool,
    ) -> Result<Vec<RawPath>, StorageError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);

        let directory = directory.map(|d| d.trim_matches('/')).unwrap_or("");
        if !self.is_directory(directory) {
            return Err(StorageError::PathNotFound(directory.to_string()));
        }

        let prefix = if directory.is_empty() {
            String::new()
        } else {
            format!("{directory}/")
        };

        Ok(self
            .entries
            .values()
            .filter(|entry| {
                let Some(rest) = entry.path.strip_prefix(&prefix) else {
                    return false;
                };
                !rest.is_empty() && (recursive || !rest.contains('/'))
            })
            .cloned()
            .collect())
    }

    async fn directory_exists(&self, path: &str) -> Result<bool, StorageError> {
        self.exists_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.is_directory(path))
    }

    async fn file_exists(&self, path: &str) -> Result<bool, StorageError> {
        self.exists_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .entries
            .get(path.trim_matches('/'))
            .is_some_and(|entry| !entry.is_directory()))
    }
}
