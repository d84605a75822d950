//! Candidate generation
//!
//! Walks the application model against the words typed so far to decide
//! what is being completed: a value for a pending option, an option name,
//! a positional value, or a command/group name. Candidates keep the order
//! their source produced them; no sorting happens here.

use crate::callback::adapt_completion;
use crate::command::{App, CommandSpec, NodeId, ParamSpec};
use crate::completion::item::CompletionItem;
use crate::completion::request::CompletionRequest;
use crate::error::Result;
use crate::runner::Context;

/// Where the cursor sits in the command hierarchy
enum Location<'a> {
    /// Inside a command's own parameters
    Command {
        spec: &'a CommandSpec,
        local_args: &'a [String],
        path: Vec<String>,
    },
    /// Still choosing a command or group name
    Group { node: NodeId },
}

/// Produce the candidate list for one completion request
pub fn generate(app: &App, request: &CompletionRequest) -> Result<Vec<CompletionItem>> {
    log::debug!(
        "generating candidates for {:?} (incomplete {:?})",
        request.args_so_far,
        request.incomplete
    );
    let ctx = Context::new(request.program_name.clone());

    match locate(app, &request.args_so_far) {
        Location::Command {
            spec,
            local_args,
            path,
        } => {
            let ctx = ctx.with_command_path(path);
            if let Some(param) = pending_value_option(spec, local_args) {
                log::debug!("completing a value for '--{}'", param.name);
                return param_candidates(param, &ctx, request);
            }
            if request.incomplete.starts_with('-') {
                return Ok(flag_candidates(spec, &request.incomplete));
            }
            if let Some(param) = next_positional(spec, local_args) {
                return param_candidates(param, &ctx, request);
            }
            Ok(Vec::new())
        }
        Location::Group { node } => Ok(group_candidates(app, node, &request.incomplete)),
    }
}

/// Find the command being completed and the words local to it
fn locate<'a>(app: &'a App, args_so_far: &'a [String]) -> Location<'a> {
    if let Some(spec) = app.single_command() {
        return Location::Command {
            spec,
            local_args: args_so_far,
            path: Vec::new(),
        };
    }

    let mut node = app.root();
    let mut path = Vec::new();
    for (index, token) in args_so_far.iter().enumerate() {
        if token.starts_with('-') {
            continue;
        }
        if let Some(child) = app.tree().child_named(node, token) {
            node = child;
            path.push(token.clone());
            continue;
        }
        if let Some(spec) = app.find_command(node, token) {
            path.push(token.clone());
            return Location::Command {
                spec,
                local_args: &args_so_far[index + 1..],
                path,
            };
        }
        // unknown word; stay at the current group
    }
    Location::Group { node }
}

/// The option whose value the user is about to type, if the previous word
/// was a value-taking flag
fn pending_value_option<'a>(spec: &'a CommandSpec, local_args: &[String]) -> Option<&'a ParamSpec> {
    let last = local_args.last()?;
    spec.param_for_flag(last).filter(|param| param.takes_value())
}

/// The positional parameter the next bare word would bind to
fn next_positional<'a>(spec: &'a CommandSpec, local_args: &[String]) -> Option<&'a ParamSpec> {
    let mut consumed = 0;
    let mut skip_value = false;
    for token in local_args {
        if skip_value {
            skip_value = false;
            continue;
        }
        if token.starts_with('-') {
            skip_value = spec
                .param_for_flag(token)
                .is_some_and(|param| param.takes_value());
            continue;
        }
        consumed += 1;
    }

    let positionals: Vec<&ParamSpec> = spec.positionals().collect();
    if let Some(param) = positionals.get(consumed).copied() {
        return Some(param);
    }
    // a trailing repeatable positional keeps accepting words
    positionals
        .last()
        .copied()
        .filter(|param| param.multiple)
}

/// Candidates for one parameter: a user callback (trusted as pre-filtered)
/// or the static choice list (prefix-filtered, case-sensitive)
fn param_candidates(
    param: &ParamSpec,
    ctx: &Context,
    request: &CompletionRequest,
) -> Result<Vec<CompletionItem>> {
    if let Some(callback) = &param.completion {
        let bound = adapt_completion(callback)?;
        let raw = bound.call(ctx, &request.args_so_far, &request.incomplete);
        return Ok(raw.into_iter().map(CompletionItem::from).collect());
    }
    Ok(param
        .choices
        .iter()
        .filter(|choice| choice.starts_with(&request.incomplete))
        .map(CompletionItem::new)
        .collect())
}

/// Flag-name candidates for a command, with their help text
fn flag_candidates(spec: &CommandSpec, incomplete: &str) -> Vec<CompletionItem> {
    spec.params
        .iter()
        .filter_map(|param| {
            let flag = param.long_flag()?;
            if !flag.starts_with(incomplete) {
                return None;
            }
            Some(match &param.help {
                Some(help) => CompletionItem::with_help(flag, help),
                None => CompletionItem::new(flag),
            })
        })
        .collect()
}

/// Command and child-group names available at a group node
fn group_candidates(app: &App, node: NodeId, incomplete: &str) -> Vec<CompletionItem> {
    let mut items = Vec::new();
    for spec in app.commands_at(node) {
        if !spec.name.starts_with(incomplete) {
            continue;
        }
        let help = spec
            .help
            .as_deref()
            .or_else(|| app.tree().resolve_help(node));
        items.push(match help {
            Some(help) => CompletionItem::with_help(&spec.name, help),
            None => CompletionItem::new(&spec.name),
        });
    }
    for child in app.tree().children(node) {
        let group = app.tree().get(child);
        if !group.name.starts_with(incomplete) {
            continue;
        }
        items.push(match app.tree().resolve_help(child) {
            Some(help) => CompletionItem::with_help(&group.name, help),
            None => CompletionItem::new(&group.name),
        });
    }
    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::callback::CompletionCallback;
    use crate::command::{CommandSpec, GroupNode, ParamSpec};
    use crate::completion::request::CompletionRequest;
    use crate::completion::shell::Shell;

    fn request(args: &[&str], incomplete: &str) -> CompletionRequest {
        CompletionRequest::from_parts(
            "tool",
            Shell::Zsh,
            args.iter().map(|s| s.to_string()).collect(),
            incomplete,
        )
    }

    fn names_callback() -> CompletionCallback {
        CompletionCallback::new(&["ctx", "args", "incomplete"], |args| {
            let incomplete = args.incomplete.unwrap_or("");
            [
                ("Camila", "The reader of books."),
                ("Carlos", "The writer of scripts."),
                ("Sebastian", "The type hints guy."),
            ]
            .iter()
            .filter(|(name, _)| name.starts_with(incomplete))
            .map(|&(name, help)| (name, help).into())
            .collect()
        })
    }

    fn single_command_app() -> App {
        App::new("tool").command(
            CommandSpec::new("greet")
                .param(ParamSpec::argument("user"))
                .param(
                    ParamSpec::option("name")
                        .help("Who to greet")
                        .multiple(true)
                        .complete(names_callback()),
                )
                .param(ParamSpec::option("color").choices(["red", "green", "blue"]))
                .param(ParamSpec::flag("loud").help("Shout the greeting")),
        )
    }

    #[test]
    fn test_pending_option_value_from_callback() {
        let app = single_command_app();
        let req = request(&["--name", "Sebastian", "--name"], "Ca");
        let items = generate(&app, &req).unwrap();
        let values: Vec<&str> = items.iter().map(|i| i.value.as_str()).collect();
        assert_eq!(values, ["Camila", "Carlos"]);
        assert_eq!(items[0].help.as_deref(), Some("The reader of books."));
        assert_eq!(items[1].help.as_deref(), Some("The writer of scripts."));
    }

    #[test]
    fn test_callback_output_order_is_preserved() {
        let app = single_command_app();
        let req = request(&["--name"], "");
        let items = generate(&app, &req).unwrap();
        let values: Vec<&str> = items.iter().map(|i| i.value.as_str()).collect();
        assert_eq!(values, ["Camila", "Carlos", "Sebastian"]);
    }

    #[test]
    fn test_static_choices_are_prefix_filtered() {
        let app = single_command_app();
        let req = request(&["--color"], "g");
        let items = generate(&app, &req).unwrap();
        let values: Vec<&str> = items.iter().map(|i| i.value.as_str()).collect();
        assert_eq!(values, ["green"]);
    }

    #[test]
    fn test_flag_name_completion() {
        let app = single_command_app();
        let req = request(&[], "--l");
        let items = generate(&app, &req).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].value, "--loud");
        assert_eq!(items[0].help.as_deref(), Some("Shout the greeting"));
    }

    #[test]
    fn test_no_candidates_is_empty_not_error() {
        let app = single_command_app();
        let req = request(&["--color"], "zz");
        let items = generate(&app, &req).unwrap();
        assert!(items.is_empty());
    }

    #[test]
    fn test_subcommand_name_completion() {
        let mut app = App::new("tool")
            .help("A tool")
            .command(CommandSpec::new("build").help("Build it"))
            .command(CommandSpec::new("clean"));
        let node = app.add_group(app.root(), GroupNode::new("remote").with_help("Remotes"));
        app.add_command(node, CommandSpec::new("add"));

        let items = generate(&app, &request(&[], "")).unwrap();
        let values: Vec<&str> = items.iter().map(|i| i.value.as_str()).collect();
        assert_eq!(values, ["build", "clean", "remote"]);
        assert_eq!(items[0].help.as_deref(), Some("Build it"));
        // command help falls back through the group chain
        assert_eq!(items[1].help.as_deref(), Some("A tool"));
        assert_eq!(items[2].help.as_deref(), Some("Remotes"));

        let items = generate(&app, &request(&["remote"], "a")).unwrap();
        let values: Vec<&str> = items.iter().map(|i| i.value.as_str()).collect();
        assert_eq!(values, ["add"]);
    }

    #[test]
    fn test_positional_choices_in_subcommand() {
        let app = App::new("tool")
            .command(CommandSpec::new("build").param(
                ParamSpec::argument("target").choices(["debug", "release"]),
            ))
            .command(CommandSpec::new("clean"));
        let items = generate(&app, &request(&["build"], "re")).unwrap();
        let values: Vec<&str> = items.iter().map(|i| i.value.as_str()).collect();
        assert_eq!(values, ["release"]);
    }

    #[test]
    fn test_too_many_callback_parameters_fails_before_output() {
        let app = App::new("tool").command(
            CommandSpec::new("greet").param(
                ParamSpec::option("name").complete(CompletionCallback::new(
                    &["ctx", "args", "incomplete", "val2"],
                    |_| vec![],
                )),
            ),
        );
        let err = generate(&app, &request(&["--name"], "Ca")).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid autocompletion callback parameters: val2"
        );
    }
}
