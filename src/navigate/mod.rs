//! Navigate module
//!
//! Resolves caller-supplied paths against the casing stored in the lake.

mod resolver;
mod results;

// Re-export public types
pub use resolver::PathResolver;
pub use results::PathMatch;
