//! Error types for Cliform

use std::io;
use thiserror::Error;

/// Result type alias for Cliform operations
pub type Result<T> = std::result::Result<T, CliformError>;

/// Main error type for Cliform
#[derive(Error, Debug)]
pub enum CliformError {
    /// Callback signature errors
    #[error(transparent)]
    Callback(#[from] CallbackError),

    /// Shell completion errors
    #[error(transparent)]
    Completion(#[from] CompletionError),

    /// A validation callback rejected a parameter value
    #[error("Invalid value for '{param}': {message}")]
    Validation { param: String, message: String },

    /// Errors surfaced by the underlying parsing engine
    #[error("{0}")]
    Engine(#[from] clap::Error),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Command action failures
    #[error("{0}")]
    Command(String),
}

/// Callback arity errors
///
/// Raised when a user callback is first invoked, not when it is declared.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CallbackError {
    #[error("Too many CLI parameter callback function parameters")]
    TooManyValidationParameters,

    #[error("Invalid autocompletion callback parameters: {0}")]
    TooManyAutocompletionParameters(String),
}

/// Shell completion protocol errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CompletionError {
    #[error("Shell {0} is not supported.")]
    UnsupportedShell(String),

    #[error("Completion request is missing the argument list")]
    MissingArgs,

    #[error("Could not resolve the user home directory")]
    NoHomeDir,

    #[error("Shell could not be detected from the environment")]
    ShellNotDetected,
}

/// Specialized result type for callback operations
pub type CallbackResult<T> = std::result::Result<T, CallbackError>;

/// Specialized result type for completion operations
pub type CompletionResult<T> = std::result::Result<T, CompletionError>;
