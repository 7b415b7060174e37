//! Listing module
//!
//! Lists a directory and narrows the result with a filter chain, an optional
//! sort and an optional limit.

pub mod filter;
pub mod query;
pub mod results;

pub use filter::{Field, FilterSpec, Operand, Operator, Predicate};
pub use query::{ListingQuery, ListingRequest};
pub use results::{Listing, ListingEnvelope, PathItem};
