//! Declarative application model
//!
//! This module holds the structures an application is described with: the
//! command/parameter declarations and the group tree used for default and
//! help fallback.

pub mod tree;
pub mod types;

// Re-export main types
pub use tree::*;
pub use types::*;
