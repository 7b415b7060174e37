//! Utility functions
//!
//! Provides logging setup and lake path helpers.

pub mod logging;
pub mod paths;
