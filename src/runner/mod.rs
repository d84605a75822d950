//! Command invocation state
//!
//! This module holds the context handed to user callbacks and command
//! actions, together with the parsed values collected from the engine.

pub mod context;

// Re-export main types
pub use context::*;
