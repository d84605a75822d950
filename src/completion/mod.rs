//! Shell completion
//!
//! This module handles the completion request/response protocol: reading
//! the trigger environment variables, generating candidates from the
//! application model, and rendering them in each shell's on-wire format.

pub mod generate;
pub mod item;
pub mod request;
pub mod shell;

// Re-export main types
pub use generate::*;
pub use item::*;
pub use request::*;
pub use shell::*;
