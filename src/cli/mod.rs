//! CLI entry points
//!
//! This module bridges the declarative application model to the underlying
//! parsing engine and routes completion requests.

pub mod app;

// Re-export main types
pub use app::*;
