//! Result types for navigate operations

/// Outcome of a case-insensitive path lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathMatch {
    /// The input addressed the container root
    Root,
    /// The path as stored
    Found(String),
    /// No path matched, even ignoring case
    NotFound,
}
