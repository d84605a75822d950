//! Invocation context for command execution
//!
//! The context tracks the state a user callback or command action may need
//! during a single invocation.

use std::collections::HashMap;

/// Invocation context passed to callbacks and command actions
#[derive(Debug, Clone)]
pub struct Context {
    /// Name of the entity being invoked: the command name during execution,
    /// the program name during a completion request
    pub info_name: String,

    /// Command words leading to the current command (empty for the root)
    pub command_path: Vec<String>,
}

impl Context {
    /// Create a new context for the given invocation name
    pub fn new(info_name: impl Into<String>) -> Self {
        Context {
            info_name: info_name.into(),
            command_path: Vec::new(),
        }
    }

    /// Set the command path
    pub fn with_command_path(mut self, path: Vec<String>) -> Self {
        self.command_path = path;
        self
    }
}

/// Parameter values collected from the engine for one command invocation
///
/// Every value is kept as text; coercion is the engine's concern and is not
/// re-done here. Repeatable options hold all their occurrences in order.
#[derive(Debug, Clone, Default)]
pub struct ParsedArgs {
    values: HashMap<String, Vec<String>>,
    flags: HashMap<String, bool>,
}

impl ParsedArgs {
    /// Create an empty value set
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a value occurrence for a parameter
    pub fn push_value(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.entry(name.into()).or_default().push(value.into());
    }

    /// Replace the value at `index` for a parameter (validation transforms)
    pub fn replace_value(&mut self, name: &str, index: usize, value: String) {
        if let Some(values) = self.values.get_mut(name) {
            if let Some(slot) = values.get_mut(index) {
                *slot = value;
            }
        }
    }

    /// Record a boolean flag
    pub fn set_flag(&mut self, name: impl Into<String>, value: bool) {
        self.flags.insert(name.into(), value);
    }

    /// Get the first value of a parameter
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).and_then(|v| v.first()).map(String::as_str)
    }

    /// Get all values of a parameter in the order they were given
    pub fn get_all(&self, name: &str) -> &[String] {
        self.values.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Get a boolean flag (false when never set)
    pub fn get_flag(&self, name: &str) -> bool {
        self.flags.get(name).copied().unwrap_or(false)
    }

    /// Whether the parameter received at least one value
    pub fn is_present(&self, name: &str) -> bool {
        self.values.get(name).is_some_and(|v| !v.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_new() {
        let ctx = Context::new("greet");
        assert_eq!(ctx.info_name, "greet");
        assert!(ctx.command_path.is_empty());
    }

    #[test]
    fn test_context_with_command_path() {
        let ctx = Context::new("add").with_command_path(vec!["remote".to_string()]);
        assert_eq!(ctx.command_path, vec!["remote"]);
    }

    #[test]
    fn test_parsed_args_values() {
        let mut args = ParsedArgs::new();
        args.push_value("name", "Camila");
        args.push_value("name", "Carlos");

        assert_eq!(args.get("name"), Some("Camila"));
        assert_eq!(args.get_all("name"), &["Camila", "Carlos"]);
        assert!(args.is_present("name"));
        assert!(!args.is_present("user"));
    }

    #[test]
    fn test_parsed_args_replace_value() {
        let mut args = ParsedArgs::new();
        args.push_value("name", "camila");
        args.replace_value("name", 0, "Camila".to_string());
        assert_eq!(args.get("name"), Some("Camila"));
    }

    #[test]
    fn test_parsed_args_flags() {
        let mut args = ParsedArgs::new();
        args.set_flag("verbose", true);
        assert!(args.get_flag("verbose"));
        assert!(!args.get_flag("quiet"));
    }
}
