//! Application model
//!
//! This module defines the data structures an application declares its
//! commands and parameters with. Parsing these declarations into actual
//! command-line matches is delegated to the engine; completion and callback
//! dispatch read the same declarations directly.

use std::fmt;

use crate::callback::{CompletionCallback, ValidationCallback};
use crate::command::tree::{CommandTree, GroupNode, NodeId};
use crate::error::Result;
use crate::runner::{Context, ParsedArgs};

/// The function run when a command is invoked
pub type CommandAction = Box<dyn Fn(&Context, &ParsedArgs) -> Result<()> + Send + Sync>;

/// How a parameter is passed on the command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamKind {
    /// Positional argument
    Argument,

    /// Value-taking option, e.g. `--name NAME`
    Option { long: String, short: Option<char> },

    /// Boolean flag, e.g. `--verbose`
    Flag { long: String, short: Option<char> },
}

/// A parameter declaration
#[derive(Debug)]
pub struct ParamSpec {
    /// Parameter name (also the value key in [`ParsedArgs`])
    pub name: String,

    /// How the parameter is passed
    pub kind: ParamKind,

    /// Help text
    pub help: Option<String>,

    /// Default value used when the parameter is not given
    pub default: Option<String>,

    /// Whether the parameter must be given
    pub required: bool,

    /// Whether the parameter may repeat
    pub multiple: bool,

    /// Static completion candidates
    pub choices: Vec<String>,

    /// Validation callback, run once per provided value
    pub validation: Option<ValidationCallback>,

    /// Autocompletion callback, run during shell completion
    pub completion: Option<CompletionCallback>,
}

impl ParamSpec {
    fn new(name: impl Into<String>, kind: ParamKind) -> Self {
        ParamSpec {
            name: name.into(),
            kind,
            help: None,
            default: None,
            required: false,
            multiple: false,
            choices: Vec::new(),
            validation: None,
            completion: None,
        }
    }

    /// Declare a positional argument
    pub fn argument(name: impl Into<String>) -> Self {
        Self::new(name, ParamKind::Argument)
    }

    /// Declare a value-taking option whose long flag is the parameter name
    pub fn option(name: impl Into<String>) -> Self {
        let name = name.into();
        let long = name.clone();
        Self::new(name, ParamKind::Option { long, short: None })
    }

    /// Declare a boolean flag whose long flag is the parameter name
    pub fn flag(name: impl Into<String>) -> Self {
        let name = name.into();
        let long = name.clone();
        Self::new(name, ParamKind::Flag { long, short: None })
    }

    /// Set a short flag character
    pub fn short(mut self, c: char) -> Self {
        match &mut self.kind {
            ParamKind::Option { short, .. } | ParamKind::Flag { short, .. } => *short = Some(c),
            ParamKind::Argument => {}
        }
        self
    }

    /// Set the help text
    pub fn help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    /// Set the default value
    pub fn default_value(mut self, default: impl Into<String>) -> Self {
        self.default = Some(default.into());
        self
    }

    /// Mark the parameter required
    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Allow the parameter to repeat
    pub fn multiple(mut self, multiple: bool) -> Self {
        self.multiple = multiple;
        self
    }

    /// Set static completion candidates
    pub fn choices<I, S>(mut self, choices: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.choices = choices.into_iter().map(Into::into).collect();
        self
    }

    /// Attach a validation callback
    pub fn validate(mut self, callback: ValidationCallback) -> Self {
        self.validation = Some(callback);
        self
    }

    /// Attach an autocompletion callback
    pub fn complete(mut self, callback: CompletionCallback) -> Self {
        self.completion = Some(callback);
        self
    }

    /// The long flag including dashes, for non-positional parameters
    pub fn long_flag(&self) -> Option<String> {
        match &self.kind {
            ParamKind::Option { long, .. } | ParamKind::Flag { long, .. } => {
                Some(format!("--{}", long))
            }
            ParamKind::Argument => None,
        }
    }

    /// The short flag including the dash, if declared
    pub fn short_flag(&self) -> Option<String> {
        match &self.kind {
            ParamKind::Option { short, .. } | ParamKind::Flag { short, .. } => {
                short.map(|c| format!("-{}", c))
            }
            ParamKind::Argument => None,
        }
    }

    /// Whether the parameter consumes a value token
    pub fn takes_value(&self) -> bool {
        !matches!(self.kind, ParamKind::Flag { .. })
    }

    /// Whether the parameter is positional
    pub fn is_positional(&self) -> bool {
        matches!(self.kind, ParamKind::Argument)
    }
}

/// A command declaration
pub struct CommandSpec {
    /// Command name
    pub name: String,

    /// Help text (falls back through the group chain when absent)
    pub help: Option<String>,

    /// Parameters, in declaration order
    pub params: Vec<ParamSpec>,

    /// The function to run
    pub action: Option<CommandAction>,
}

impl CommandSpec {
    /// Declare a command
    pub fn new(name: impl Into<String>) -> Self {
        CommandSpec {
            name: name.into(),
            help: None,
            params: Vec::new(),
            action: None,
        }
    }

    /// Set the help text
    pub fn help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    /// Add a parameter
    pub fn param(mut self, param: ParamSpec) -> Self {
        self.params.push(param);
        self
    }

    /// Set the command action
    pub fn action<F>(mut self, action: F) -> Self
    where
        F: Fn(&Context, &ParsedArgs) -> Result<()> + Send + Sync + 'static,
    {
        self.action = Some(Box::new(action));
        self
    }

    /// Find a parameter by its long or short flag token
    pub fn param_for_flag(&self, token: &str) -> Option<&ParamSpec> {
        self.params.iter().find(|param| {
            param.long_flag().as_deref() == Some(token)
                || param.short_flag().as_deref() == Some(token)
        })
    }

    /// Positional parameters in declaration order
    pub fn positionals(&self) -> impl Iterator<Item = &ParamSpec> {
        self.params.iter().filter(|param| param.is_positional())
    }
}

impl fmt::Debug for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandSpec")
            .field("name", &self.name)
            .field("help", &self.help)
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}

/// A declarative CLI application: a group tree plus the commands attached
/// to its nodes
#[derive(Debug)]
pub struct App {
    tree: CommandTree,
    commands: Vec<(NodeId, CommandSpec)>,
}

impl App {
    /// Create an application with the given program name
    pub fn new(name: impl Into<String>) -> Self {
        App {
            tree: CommandTree::new(GroupNode::new(name)),
            commands: Vec::new(),
        }
    }

    /// Set the application help text
    pub fn help(mut self, help: impl Into<String>) -> Self {
        self.tree.get_mut(self.tree.root()).help = Some(help.into());
        self
    }

    /// Name the command run when no command word is given
    pub fn default_command(mut self, name: impl Into<String>) -> Self {
        self.tree.get_mut(self.tree.root()).default = Some(name.into());
        self
    }

    /// Attach a command to the root group
    pub fn command(mut self, spec: CommandSpec) -> Self {
        self.commands.push((self.tree.root(), spec));
        self
    }

    /// Add a child group under `parent`, returning its handle
    pub fn add_group(&mut self, parent: NodeId, node: GroupNode) -> NodeId {
        self.tree.add_child(parent, node)
    }

    /// Attach a command to a group node
    pub fn add_command(&mut self, node: NodeId, spec: CommandSpec) {
        self.commands.push((node, spec));
    }

    /// The program name
    pub fn name(&self) -> &str {
        &self.tree.get(self.tree.root()).name
    }

    /// The group tree
    pub fn tree(&self) -> &CommandTree {
        &self.tree
    }

    /// The root group handle
    pub fn root(&self) -> NodeId {
        self.tree.root()
    }

    /// Commands attached directly to a group, in declaration order
    pub fn commands_at(&self, node: NodeId) -> impl Iterator<Item = &CommandSpec> {
        self.commands
            .iter()
            .filter(move |(at, _)| *at == node)
            .map(|(_, spec)| spec)
    }

    /// The application's single command, when it has exactly one and no
    /// child groups; such applications are flattened onto the root
    pub fn single_command(&self) -> Option<&CommandSpec> {
        if self.commands.len() == 1 && self.tree.children(self.tree.root()).next().is_none() {
            self.commands.first().map(|(_, spec)| spec)
        } else {
            None
        }
    }

    /// Find a command by name within a group
    pub fn find_command(&self, node: NodeId, name: &str) -> Option<&CommandSpec> {
        self.commands_at(node).find(|spec| spec.name == name)
    }
}
