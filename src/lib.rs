//! Cliform - declarative command signatures turned into a CLI
//!
//! Cliform lets an application describe its commands and parameters as plain
//! data, delegates argument parsing to clap, and adds the two pieces the
//! engine does not own: flexible-arity user callbacks (validation and
//! autocompletion) and dynamic, cross-shell completion.

// Public modules
pub mod callback;
pub mod cli;
pub mod command;
pub mod completion;
pub mod error;
pub mod runner;

// Re-export commonly used types
pub use error::{CliformError, Result};

/// Current version of Cliform
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
