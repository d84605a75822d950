//! Main CLI bridge
//!
//! Builds the engine command from the application model, routes completion
//! requests picked up from the environment, handles the reserved completion
//! flags, and finally runs validation callbacks and the command action.

use std::path::Path;

use clap::error::ErrorKind;
use clap::{Arg, ArgAction, ArgMatches, Command};

use crate::callback::adapt_validation;
use crate::command::{App, CommandSpec, NodeId, ParamKind};
use crate::completion::{generate, CompletionRequest, Shell};
use crate::error::{CliformError, Result};
use crate::runner::{Context, ParsedArgs};

/// Run the application with the process arguments
pub fn run(app: App) -> Result<()> {
    run_from(app, std::env::args().collect())
}

/// Run the application with explicit arguments
pub fn run_from(app: App, argv: Vec<String>) -> Result<()> {
    let prog = program_name(&argv, &app);

    // a completion request takes over the whole invocation
    if let Some(request) = CompletionRequest::from_env(&prog)? {
        let items = generate(&app, &request)?;
        print!("{}", request.shell.render(&items));
        return Ok(());
    }

    let mut command = build_command(&app);
    let matches = match command.clone().try_get_matches_from(&argv) {
        Ok(matches) => matches,
        Err(err)
            if matches!(
                err.kind(),
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion
            ) =>
        {
            err.print()?;
            return Ok(());
        }
        Err(err) => return Err(err.into()),
    };

    if let Some(shell) = shell_flag(&matches, "install-completion")? {
        let path = shell.install(&prog)?;
        println!("{} completion installed in {}", shell, path.display());
        println!("Completion will take effect once you restart the terminal");
        return Ok(());
    }
    if let Some(shell) = shell_flag(&matches, "show-completion")? {
        print!("{}", shell.completion_script(&prog));
        return Ok(());
    }

    dispatch(&app, &matches, &mut command)
}

/// The executable name the program was invoked as
fn program_name(argv: &[String], app: &App) -> String {
    argv.first()
        .map(|arg0| {
            Path::new(arg0)
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| arg0.clone())
        })
        .unwrap_or_else(|| app.name().to_string())
}

/// Build the engine command from the application model
fn build_command(app: &App) -> Command {
    let tree = app.tree();
    let mut root = Command::new(app.name().to_string());
    if let Some(help) = tree.resolve_help(app.root()) {
        root = root.about(help.to_string());
    }
    root = root
        .arg(completion_flag_arg(
            "install-completion",
            "Install completion for the given shell",
        ))
        .arg(completion_flag_arg(
            "show-completion",
            "Show completion for the given shell, to copy or customize it",
        ));

    match app.single_command() {
        Some(spec) => add_params(root, spec),
        None => add_group_commands(root, app, app.root()),
    }
}

fn completion_flag_arg(id: &'static str, help: &'static str) -> Arg {
    Arg::new(id)
        .long(id)
        .value_name("SHELL")
        .num_args(0..=1)
        .default_missing_value("auto")
        .help(help)
}

/// Attach the commands and child groups of `node` as subcommands
fn add_group_commands(mut cmd: Command, app: &App, node: NodeId) -> Command {
    for spec in app.commands_at(node) {
        let mut sub = Command::new(spec.name.clone());
        if let Some(help) = spec
            .help
            .as_deref()
            .or_else(|| app.tree().resolve_help(node))
        {
            sub = sub.about(help.to_string());
        }
        sub = add_params(sub, spec);
        cmd = cmd.subcommand(sub);
    }
    for child in app.tree().children(node) {
        let group = app.tree().get(child);
        let mut sub = Command::new(group.name.clone());
        if let Some(help) = app.tree().resolve_help(child) {
            sub = sub.about(help.to_string());
        }
        sub = add_group_commands(sub, app, child);
        cmd = cmd.subcommand(sub);
    }
    cmd
}

/// Attach a command's parameters as engine arguments
fn add_params(mut cmd: Command, spec: &CommandSpec) -> Command {
    for param in &spec.params {
        let mut arg = Arg::new(param.name.clone());
        match &param.kind {
            ParamKind::Argument => {
                arg = arg.value_name(param.name.to_uppercase());
                if param.multiple {
                    arg = arg.num_args(1..);
                }
            }
            ParamKind::Option { long, short } => {
                arg = arg
                    .long(long.clone())
                    .value_name(param.name.to_uppercase())
                    .action(if param.multiple {
                        ArgAction::Append
                    } else {
                        ArgAction::Set
                    });
                if let Some(c) = short {
                    arg = arg.short(*c);
                }
            }
            ParamKind::Flag { long, short } => {
                arg = arg.long(long.clone()).action(ArgAction::SetTrue);
                if let Some(c) = short {
                    arg = arg.short(*c);
                }
            }
        }
        if let Some(help) = &param.help {
            arg = arg.help(help.clone());
        }
        if let Some(default) = &param.default {
            arg = arg.default_value(default.clone());
        }
        if param.required {
            arg = arg.required(true);
        }
        cmd = cmd.arg(arg);
    }
    cmd
}

/// Resolve a reserved completion flag into a shell, detecting it from the
/// environment when the flag was given without a value
fn shell_flag(matches: &ArgMatches, id: &str) -> Result<Option<Shell>> {
    match matches.get_one::<String>(id) {
        None => Ok(None),
        Some(value) if value == "auto" => Ok(Some(Shell::detect()?)),
        Some(value) => Ok(Some(value.parse::<Shell>().map_err(CliformError::from)?)),
    }
}

/// Route the parsed matches to a command and run it
fn dispatch(app: &App, matches: &ArgMatches, command: &mut Command) -> Result<()> {
    if let Some(spec) = app.single_command() {
        return invoke(spec, matches, Vec::new());
    }

    let mut node = app.root();
    let mut current = matches;
    let mut path = Vec::new();
    loop {
        match current.subcommand() {
            Some((name, sub)) => {
                if let Some(child) = app.tree().child_named(node, name) {
                    node = child;
                    current = sub;
                    path.push(name.to_string());
                    continue;
                }
                if let Some(spec) = app.find_command(node, name) {
                    path.push(name.to_string());
                    return invoke(spec, sub, path);
                }
                return Err(CliformError::Command(format!("Unknown command '{}'", name)));
            }
            None => {
                // no command word: the group chain may name a default command
                if let Some(default) = app.tree().resolve_default(node) {
                    if let Some(spec) = app.find_command(node, default) {
                        return invoke_with_defaults(spec, path);
                    }
                }
                command.print_help()?;
                println!();
                return Ok(());
            }
        }
    }
}

/// Run one command from its engine matches
fn invoke(spec: &CommandSpec, matches: &ArgMatches, path: Vec<String>) -> Result<()> {
    let ctx = Context::new(spec.name.clone()).with_command_path(path);
    let mut args = ParsedArgs::new();
    for param in &spec.params {
        match &param.kind {
            ParamKind::Flag { .. } => args.set_flag(&param.name, matches.get_flag(&param.name)),
            _ => {
                if let Some(values) = matches.get_many::<String>(&param.name) {
                    for value in values {
                        args.push_value(&param.name, value.clone());
                    }
                }
            }
        }
    }
    run_validation(spec, &ctx, &mut args)?;
    match &spec.action {
        Some(action) => action(&ctx, &args),
        None => Ok(()),
    }
}

/// Run a default command with declared defaults only
fn invoke_with_defaults(spec: &CommandSpec, path: Vec<String>) -> Result<()> {
    let ctx = Context::new(spec.name.clone()).with_command_path(path);
    let mut args = ParsedArgs::new();
    for param in &spec.params {
        if let Some(default) = &param.default {
            args.push_value(&param.name, default.clone());
        }
    }
    run_validation(spec, &ctx, &mut args)?;
    match &spec.action {
        Some(action) => action(&ctx, &args),
        None => Ok(()),
    }
}

/// Run validation callbacks over every provided value
fn run_validation(spec: &CommandSpec, ctx: &Context, args: &mut ParsedArgs) -> Result<()> {
    for param in &spec.params {
        let callback = match &param.validation {
            Some(callback) => callback,
            None => continue,
        };
        let bound = adapt_validation(callback)?;
        let values: Vec<String> = args.get_all(&param.name).to_vec();
        for (index, value) in values.iter().enumerate() {
            match bound.call(ctx, param, value) {
                Ok(Some(replacement)) => args.replace_value(&param.name, index, replacement),
                Ok(None) => {}
                Err(message) => {
                    return Err(CliformError::Validation {
                        param: param
                            .long_flag()
                            .unwrap_or_else(|| param.name.clone()),
                        message,
                    })
                }
            }
        }
    }
    Ok(())
}
