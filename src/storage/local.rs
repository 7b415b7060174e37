//! Local filesystem listing provider
//!
//! Serves a directory tree on disk as a container. Lookups keep the casing
//! of the host filesystem.

use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, Utc};
use log::{debug, error};
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};
use tokio::fs;

use crate::error::StorageError;
use crate::storage::provider::{PathLister, RawPath};
use crate::utils::paths::join;

pub struct LocalStore {
    root: PathBuf,
}

impl LocalStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Maps a lake path onto the store root, rejecting traversal
    fn real_path(&self, lake_path: &str) -> Result<PathBuf, StorageError> {
        let relative = Path::new(lake_path.trim_matches('/'));
        if relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir))
        {
            return Err(StorageError::InvalidPath(lake_path.to_string()));
        }
        Ok(self.root.join(relative))
    }

    async fn read_directory(
        &self,
        directory: Option<&str>,
        out: &mut Vec<RawPath>,
    ) -> Result<Vec<String>, StorageError> {
        let real_path = self.real_path(directory.unwrap_or(""))?;
        let mut entries = match fs::read_dir(&real_path).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(StorageError::PathNotFound(
                    directory.unwrap_or("/").to_string(),
                ));
            }
            Err(e) => {
                error!("Failed to list directory {}: {}", real_path.display(), e);
                return Err(StorageError::from(e));
            }
        };

        let mut subdirectories = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let name = entry.file_name().to_string_lossy().to_string();
            let path = join(directory, &name);
            let metadata = entry.metadata().await?;
            let is_dir = metadata.is_dir();

            let last_modified: Option<DateTime<FixedOffset>> = metadata
                .modified()
                .ok()
                .map(|time| DateTime::<Utc>::from(time).into());

            if is_dir {
                subdirectories.push(path.clone());
            }
            out.push(RawPath {
                path,
                is_directory: Some(is_dir),
                content_length: Some(if is_dir { 0 } else { metadata.len() }),
                last_modified,
            });
        }

        Ok(subdirectories)
    }
}

#[async_trait]
impl PathLister for LocalStore {
    async fn list_paths(
        &self,
        directory: Option<&str>,
        recursive: bool,
    ) -> Result<Vec<RawPath>, StorageError> {
        let directory = directory
            .map(|d| d.trim_matches('/'))
            .filter(|d| !d.is_empty());

        let mut paths = Vec::new();
        let mut pending = vec![directory.map(str::to_string)];

        while let Some(current) = pending.pop() {
            let subdirectories = self.read_directory(current.as_deref(), &mut paths).await?;
            if recursive {
                pending.extend(subdirectories.into_iter().map(Some));
            }
        }

        paths.sort_by(|a, b| a.path.cmp(&b.path));
        debug!(
            "Listed {} paths under '{}' (recursive: {})",
            paths.len(),
            directory.unwrap_or("/"),
            recursive
        );
        Ok(paths)
    }

    async fn directory_exists(&self, path: &str) -> Result<bool, StorageError> {
        match fs::metadata(self.real_path(path)?).await {
            Ok(metadata) => Ok(metadata.is_dir()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(StorageError::from(e)),
        }
    }

    async fn file_exists(&self, path: &str) -> Result<bool, StorageError> {
        match fs::metadata(self.real_path(path)?).await {
            Ok(metadata) => Ok(metadata.is_file()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(StorageError::from(e)),
        }
    }
}
