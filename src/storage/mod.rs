//! Storage access
//!
//! Defines the listing provider interface and the local and in-memory
//! providers.

pub mod local;
pub mod memory;
pub mod provider;

pub use local::LocalStore;
pub use memory::MemoryStore;
pub use provider::{PathLister, RawPath};
