//! Completion request protocol
//!
//! A shell triggers completion by re-invoking the program with environment
//! variables set: a per-program trigger variable carrying the shell
//! instruction, plus two fixed variables carrying the command line typed so
//! far and the test-harness marker. The request is built once from the
//! environment and read-only afterwards.

use std::env;

use regex::Regex;

use crate::completion::shell::Shell;
use crate::error::{CompletionError, CompletionResult};

/// Fixed variable carrying the command line typed so far
pub const COMPLETE_ARGS_VAR: &str = "_CLIFORM_COMPLETE_ARGS";

/// Fixed variable marking a test-harness invocation
pub const COMPLETE_TESTING_VAR: &str = "_CLIFORM_COMPLETE_TESTING";

/// The per-program trigger variable name: `_{PROG}_COMPLETE` with the
/// program name uppercased and separators normalized to underscores
pub fn trigger_var(program_name: &str) -> String {
    let re = Regex::new(r"[^A-Z0-9]").unwrap();
    let upper = program_name.to_uppercase();
    let normalized = re.replace_all(&upper, "_");
    format!("_{}_COMPLETE", normalized)
}

/// One shell completion request, derived from the invocation environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionRequest {
    /// Executable name the shell invoked
    pub program_name: String,

    /// Dialect to render candidates for
    pub shell: Shell,

    /// Fully-typed words preceding the incomplete token (program word dropped)
    pub args_so_far: Vec<String>,

    /// The partially-typed word being completed
    pub incomplete: String,

    /// Whether this run came from a test harness
    pub testing: bool,
}

impl CompletionRequest {
    /// Read a completion request from the environment.
    ///
    /// Returns `Ok(None)` when the trigger variable is unset, which is the
    /// ordinary non-completion invocation.
    pub fn from_env(program_name: &str) -> CompletionResult<Option<Self>> {
        let instruction = match env::var(trigger_var(program_name)) {
            Ok(value) => value,
            Err(_) => return Ok(None),
        };
        let shell_name = instruction
            .strip_prefix("complete_")
            .unwrap_or(&instruction);
        let shell: Shell = shell_name.parse()?;

        let testing = env::var(COMPLETE_TESTING_VAR).is_ok();
        let line = match env::var(COMPLETE_ARGS_VAR) {
            Ok(line) => line,
            // completion scripts always set the args variable; only a test
            // harness may legitimately leave it out
            Err(_) if testing => String::new(),
            Err(_) => return Err(CompletionError::MissingArgs),
        };
        let (args_so_far, incomplete) = split_command_line(&line);

        log::debug!(
            "completion request: shell={} args={:?} incomplete={:?}",
            shell,
            args_so_far,
            incomplete
        );
        Ok(Some(CompletionRequest {
            program_name: program_name.to_string(),
            shell,
            args_so_far,
            incomplete,
            testing,
        }))
    }

    /// Build a request directly, bypassing the environment
    pub fn from_parts(
        program_name: impl Into<String>,
        shell: Shell,
        args_so_far: Vec<String>,
        incomplete: impl Into<String>,
    ) -> Self {
        CompletionRequest {
            program_name: program_name.into(),
            shell,
            args_so_far,
            incomplete: incomplete.into(),
            testing: false,
        }
    }
}

/// Split the typed command line into (args-so-far, incomplete).
///
/// The program word is dropped. A line ending in whitespace means the user
/// is starting a new word, so the incomplete token is empty; otherwise the
/// last word is the incomplete token.
pub fn split_command_line(line: &str) -> (Vec<String>, String) {
    let mut words: Vec<String> = line.split_whitespace().map(str::to_string).collect();
    if !words.is_empty() {
        words.remove(0);
    }
    if line.ends_with(char::is_whitespace) {
        return (words, String::new());
    }
    match words.pop() {
        Some(incomplete) => (words, incomplete),
        None => (words, String::new()),
    }
}
