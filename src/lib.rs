//! lakepath
//!
//! Case-insensitive path resolution and filtered directory listings over a
//! case-sensitive data lake namespace.

pub mod config;
pub mod error;
pub mod listing;
pub mod navigate;
pub mod storage;
pub mod utils;

pub use listing::{FilterSpec, Listing, ListingQuery, ListingRequest, PathItem};
pub use navigate::{PathMatch, PathResolver};
pub use storage::{LocalStore, MemoryStore, PathLister, RawPath};
