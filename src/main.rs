//! Showcase binary: a small greeting CLI built with the cliform API.
//!
//! The integration tests drive this binary end to end, including the shell
//! completion protocol.

use std::process;

use colored::Colorize;

use cliform::callback::{CompletionCallback, ValidationCallback};
use cliform::command::{App, CommandSpec, ParamSpec};
use cliform::completion::RawCompletion;
use cliform::runner::{Context, ParsedArgs};

const NAMES: [(&str, &str); 3] = [
    ("Camila", "The reader of books."),
    ("Carlos", "The writer of scripts."),
    ("Sebastian", "The type hints guy."),
];

fn main() {
    env_logger::init();
    if let Err(e) = run() {
        eprintln!("{} {}", "Error:".red(), e);
        process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    cliform::cli::run(build_app())?;
    Ok(())
}

fn build_app() -> App {
    App::new("cliform").command(
        CommandSpec::new("greet")
            .help("Greet people by name")
            .param(ParamSpec::argument("user").help("Single person to greet"))
            .param(
                ParamSpec::option("name")
                    .help("People to greet, repeatable")
                    .multiple(true)
                    .validate(ValidationCallback::new(&["ctx", "value"], check_name))
                    .complete(CompletionCallback::new(
                        &["ctx", "args", "incomplete"],
                        complete_name,
                    )),
            )
            .action(greet),
    )
}

fn greet(_ctx: &Context, args: &ParsedArgs) -> cliform::Result<()> {
    match args.get("user") {
        Some(user) => println!("Hello {}", user),
        None => println!("Hello World"),
    }
    for name in args.get_all("name") {
        println!("Greeting {}", name);
    }
    Ok(())
}

fn check_name(
    args: cliform::callback::ValidationArgs<'_>,
) -> Result<Option<String>, String> {
    let value = args.value.unwrap_or("");
    if value.trim().is_empty() {
        return Err("name must not be blank".to_string());
    }
    Ok(None)
}

fn complete_name(args: cliform::callback::CompletionArgs<'_>) -> Vec<RawCompletion> {
    if let Some(ctx) = args.ctx {
        eprintln!("info name is: {}", ctx.info_name);
    }
    if let Some(so_far) = args.args {
        eprintln!("args is: {:?}", so_far);
    }
    let incomplete = args.incomplete.unwrap_or("");
    eprintln!("incomplete is: {}", incomplete);

    NAMES
        .iter()
        .filter(|(name, _)| name.starts_with(incomplete))
        .map(|&(name, help)| (name, help).into())
        .collect()
}
