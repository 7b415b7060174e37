//! Listing query pipeline
//!
//! Resolves the directory, fetches the full listing, then filters, sorts and
//! truncates it.

use log::{info, warn};

use crate::error::ListingError;
use crate::listing::filter::{Field, FilterSpec};
use crate::listing::results::{Listing, PathItem};
use crate::navigate::{PathMatch, PathResolver};
use crate::storage::PathLister;
use crate::utils::paths::is_root;

/// Parameters of a listing
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListingRequest {
    /// `None` or `/` lists the container root
    pub directory: Option<String>,
    pub recursive: bool,
    pub ignore_directory_case: bool,
    pub filters: Vec<FilterSpec>,
    pub order_by: Option<String>,
    pub order_by_descending: bool,
    /// Values `<= 0` mean no limit
    pub limit: i64,
}

impl ListingRequest {
    pub fn new(directory: impl Into<String>) -> Self {
        Self {
            directory: Some(directory.into()),
            ..Self::default()
        }
    }

    pub fn recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    pub fn ignore_directory_case(mut self, ignore: bool) -> Self {
        self.ignore_directory_case = ignore;
        self
    }

    pub fn filter(mut self, filter: FilterSpec) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn order_by(mut self, column: impl Into<String>, descending: bool) -> Self {
        self.order_by = Some(column.into());
        self.order_by_descending = descending;
        self
    }

    pub fn limit(mut self, limit: i64) -> Self {
        self.limit = limit;
        self
    }
}

pub struct ListingQuery<'a> {
    store: &'a dyn PathLister,
}

impl<'a> ListingQuery<'a> {
    pub fn new(store: &'a dyn PathLister) -> Self {
        Self { store }
    }

    /// Runs a listing request, addressing items under `base_url`
    pub async fn execute(
        &self,
        base_url: &str,
        request: &ListingRequest,
    ) -> Result<Listing, ListingError> {
        let requested = request.directory.as_deref().filter(|d| !is_root(d));

        let directory = if request.ignore_directory_case {
            match PathResolver::new(self.store)
                .resolve_directory(requested)
                .await?
            {
                PathMatch::Root => None,
                PathMatch::Found(path) => Some(path),
                PathMatch::NotFound => {
                    return Err(ListingError::DirectoryNotFound(
                        requested.unwrap_or("/").to_string(),
                    ));
                }
            }
        } else {
            requested.map(str::to_string)
        };

        let corrected_directory = directory
            .as_deref()
            .filter(|d| Some(*d) != requested)
            .map(str::to_string);
        if let Some(corrected) = &corrected_directory {
            info!(
                "Corrected directory '{}' to '{}'",
                requested.unwrap_or("/"),
                corrected
            );
        }

        if let Some(directory) = directory.as_deref() {
            if !self.store.directory_exists(directory).await? {
                return Err(ListingError::DirectoryNotFound(directory.to_string()));
            }
        }

        let mut items: Vec<PathItem> = self
            .store
            .list_paths(directory.as_deref(), request.recursive)
            .await?
            .into_iter()
            .map(|raw| PathItem::from_raw(raw, base_url))
            .collect();
        let listed = items.len();

        let mut all_filters_valid = true;
        for filter in &request.filters {
            if let Some(err) = filter.error() {
                warn!("Ignoring invalid filter {}: {}", filter, err);
                all_filters_valid = false;
            }
        }

        for filter in request.filters.iter().filter(|f| f.is_valid()) {
            info!("Applying filter: {}", filter);
            items.retain(|item| filter.matches(item));
        }

        if let Some(column) = request.order_by.as_deref().filter(|c| !c.trim().is_empty()) {
            let field =
                Field::parse(column).ok_or_else(|| ListingError::InvalidSortField(column.into()))?;
            let descending = request.order_by_descending;
            items.sort_by(|a, b| {
                let ordering = field.compare(a, b);
                if descending { ordering.reverse() } else { ordering }
            });
        }

        if request.limit > 0 {
            items.truncate(usize::try_from(request.limit).unwrap_or(usize::MAX));
        }

        if !all_filters_valid {
            items.clear();
        }

        info!(
            "Listed '{}': {} of {} paths returned",
            directory.as_deref().unwrap_or("/"),
            items.len(),
            listed
        );

        Ok(Listing {
            items,
            all_filters_valid,
            corrected_directory,
        })
    }
}
