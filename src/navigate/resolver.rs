//! Case-insensitive path resolution

use log::{debug, info};

use crate::error::ResolveError;
use crate::navigate::results::PathMatch;
use crate::storage::PathLister;
use crate::utils::paths::{is_root, join, leaf_name, normalize_separators, segments, split_file_path};

/// Reconciles caller-supplied paths with the casing stored in the lake.
///
/// Mis-cased paths are walked one segment at a time, listing only the
/// children of the directory matched so far. Two siblings that differ only
/// in case make the lookup ambiguous.
pub struct PathResolver<'a> {
    store: &'a dyn PathLister,
}

impl<'a> PathResolver<'a> {
    pub fn new(store: &'a dyn PathLister) -> Self {
        Self { store }
    }

    /// Resolves a directory path
    pub async fn resolve_directory(&self, path: Option<&str>) -> Result<PathMatch, ResolveError> {
        self.resolve(path, true).await
    }

    /// Resolves a file path
    pub async fn resolve_file(&self, path: Option<&str>) -> Result<PathMatch, ResolveError> {
        self.resolve(path, false).await
    }

    /// Finds the stored path matching `path` ignoring case.
    ///
    /// A path that exists with its given casing is returned unchanged without
    /// listing anything.
    pub async fn resolve(
        &self,
        path: Option<&str>,
        is_directory: bool,
    ) -> Result<PathMatch, ResolveError> {
        let Some(path) = path.filter(|p| !is_root(p)) else {
            return Ok(PathMatch::Root);
        };

        let exists = if is_directory {
            self.store.directory_exists(path).await?
        } else {
            self.store.file_exists(path).await?
        };
        if exists {
            return Ok(PathMatch::Found(path.to_string()));
        }

        info!(
            "{} '{}' not found, checking path case using case insensitive compare...",
            if is_directory { "Directory" } else { "File" },
            path
        );

        let (directory_path, filename) = if is_directory {
            (normalize_separators(path), None)
        } else {
            let (directory, filename) = split_file_path(path);
            (directory, Some(filename))
        };

        let mut valid_directory: Option<String> = None;
        for segment in segments(&directory_path) {
            match self.match_child(valid_directory.as_deref(), segment, true).await? {
                Some(matched) => valid_directory = Some(matched),
                None => {
                    debug!("No directory matches segment '{}'", segment);
                    return Ok(PathMatch::NotFound);
                }
            }
        }

        let Some(filename) = filename else {
            return Ok(valid_directory.map_or(PathMatch::Root, PathMatch::Found));
        };

        // Only the directory casing may have been wrong
        let candidate = join(valid_directory.as_deref(), &filename);
        if self.store.file_exists(&candidate).await? {
            return Ok(PathMatch::Found(candidate));
        }

        Ok(self
            .match_child(valid_directory.as_deref(), &filename, false)
            .await?
            .map_or(PathMatch::NotFound, PathMatch::Found))
    }

    /// Finds the single child of `directory` whose name matches `name` ignoring case
    async fn match_child(
        &self,
        directory: Option<&str>,
        name: &str,
        is_directory: bool,
    ) -> Result<Option<String>, ResolveError> {
        let wanted = name.to_lowercase();
        let mut candidates: Vec<String> = self
            .store
            .list_paths(directory, false)
            .await?
            .into_iter()
            .filter(|p| p.is_directory() == is_directory)
            .filter(|p| leaf_name(&p.path).to_lowercase() == wanted)
            .map(|p| p.path)
            .collect();

        match candidates.len() {
            0 => Ok(None),
            1 => Ok(candidates.pop()),
            _ => Err(ResolveError::AmbiguousMatch {
                segment: name.to_string(),
                candidates,
            }),
        }
    }
}
