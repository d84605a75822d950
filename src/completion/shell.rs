//! Shell dialects: on-wire candidate encoding and completion scripts
//!
//! Each supported shell parses candidate lines with a fixed-format reader,
//! so the per-dialect encodings here must stay byte-stable:
//!
//! - bash: `{value}`
//! - zsh: `"{value}":"{help}"` (help rendered empty when absent)
//! - fish: `{value}\t{help}` (tab and help omitted when absent)
//! - powershell: `{value}:::{help}`

use std::env;
use std::fmt;
use std::fs;
use std::path::PathBuf;
use std::str::FromStr;

use directories::BaseDirs;

use crate::completion::item::CompletionItem;
use crate::completion::request::{trigger_var, COMPLETE_ARGS_VAR};
use crate::error::{CompletionError, CompletionResult, Result};

/// A supported shell dialect
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}

impl Shell {
    /// All supported dialects
    pub const ALL: [Shell; 4] = [Shell::Bash, Shell::Zsh, Shell::Fish, Shell::PowerShell];

    /// The instruction value the completion script puts in the trigger
    /// variable, e.g. `complete_zsh`
    pub fn instruction(self) -> &'static str {
        match self {
            Shell::Bash => "complete_bash",
            Shell::Zsh => "complete_zsh",
            Shell::Fish => "complete_fish",
            Shell::PowerShell => "complete_powershell",
        }
    }

    /// Encode one candidate in this dialect's line format
    pub fn format_item(self, item: &CompletionItem) -> String {
        let help = item.help.as_deref().unwrap_or("");
        match self {
            Shell::Bash => item.value.clone(),
            Shell::Zsh => format!(
                "\"{}\":\"{}\"",
                zsh_escape(&item.value),
                zsh_escape(help)
            ),
            Shell::Fish => match &item.help {
                Some(help) => format!("{}\t{}", item.value, help),
                None => item.value.clone(),
            },
            Shell::PowerShell => format!("{}:::{}", item.value, help),
        }
    }

    /// Render a candidate list, one line per candidate, in source order
    pub fn render(self, items: &[CompletionItem]) -> String {
        let mut out = String::new();
        for item in items {
            out.push_str(&self.format_item(item));
            out.push('\n');
        }
        out
    }

    /// The completion script for this dialect, wired to re-invoke `prog`
    /// with the trigger and args variables set
    pub fn completion_script(self, prog: &str) -> String {
        let trigger = trigger_var(prog);
        let func = prog.replace(['-', '.'], "_");
        match self {
            Shell::Bash => format!(
                r#"_{func}_completion() {{
    local IFS=$'\n'
    COMPREPLY=( $( env {trigger}={instruction} \
        {args_var}="${{COMP_LINE}}" \
        {prog} ) )
    return 0
}}

complete -o default -F _{func}_completion {prog}
"#,
                func = func,
                trigger = trigger,
                instruction = self.instruction(),
                args_var = COMPLETE_ARGS_VAR,
                prog = prog,
            ),
            Shell::Zsh => format!(
                r#"#compdef {prog}

_{func}_completion() {{
    local -a completions
    local -a response
    response=("${{(@f)$( env {trigger}={instruction} \
        {args_var}="${{words[1,$CURRENT]}}" \
        {prog} )}}")
    for line in $response; do
        completions+=("${{(Q)line}}")
    done
    _describe -V unsorted completions -U
}}

compdef _{func}_completion {prog}
"#,
                func = func,
                trigger = trigger,
                instruction = self.instruction(),
                args_var = COMPLETE_ARGS_VAR,
                prog = prog,
            ),
            Shell::Fish => format!(
                r#"complete --no-files --command {prog} --arguments "( env {trigger}={instruction} {args_var}=(commandline -cp) {prog} )"
"#,
                trigger = trigger,
                instruction = self.instruction(),
                args_var = COMPLETE_ARGS_VAR,
                prog = prog,
            ),
            Shell::PowerShell => format!(
                r#"Register-ArgumentCompleter -Native -CommandName {prog} -ScriptBlock {{
    param($wordToComplete, $commandAst, $cursorPosition)
    $Env:{trigger} = "{instruction}"
    $Env:{args_var} = $commandAst.ToString()
    {prog} | ForEach-Object {{
        $value, $help = $_ -Split ':::'
        [System.Management.Automation.CompletionResult]::new($value, $value, 'ParameterValue', $help)
    }}
    $Env:{trigger} = $null
    $Env:{args_var} = $null
}}
"#,
                trigger = trigger,
                instruction = self.instruction(),
                args_var = COMPLETE_ARGS_VAR,
                prog = prog,
            ),
        }
    }

    /// Detect the current shell from `$SHELL`
    pub fn detect() -> CompletionResult<Shell> {
        let shell_path = env::var("SHELL").map_err(|_| CompletionError::ShellNotDetected)?;
        let name = shell_path
            .rsplit('/')
            .next()
            .unwrap_or(shell_path.as_str());
        name.parse()
    }

    /// Install the completion script for `prog` under the user's home
    /// directory, returning the path written
    pub fn install(self, prog: &str) -> Result<PathBuf> {
        let base = BaseDirs::new().ok_or(CompletionError::NoHomeDir)?;
        let home = base.home_dir();
        let script = self.completion_script(prog);

        let path = match self {
            Shell::Bash => {
                let path = home.join(".bash_completions").join(format!("{}.sh", prog));
                write_script(&path, &script)?;
                let source_line = format!("source {}", path.display());
                append_rc_line(&home.join(".bashrc"), &source_line)?;
                path
            }
            Shell::Zsh => {
                let path = home.join(".zfunc").join(format!("_{}", prog));
                write_script(&path, &script)?;
                append_rc_line(&home.join(".zshrc"), "fpath+=~/.zfunc")?;
                append_rc_line(&home.join(".zshrc"), "autoload -Uz compinit && compinit")?;
                path
            }
            Shell::Fish => {
                let path = home
                    .join(".config/fish/completions")
                    .join(format!("{}.fish", prog));
                write_script(&path, &script)?;
                path
            }
            Shell::PowerShell => {
                let path = home
                    .join(".config/powershell")
                    .join("Microsoft.PowerShell_profile.ps1");
                append_rc_line(&path, &script)?;
                path
            }
        };
        Ok(path)
    }
}

impl FromStr for Shell {
    type Err = CompletionError;

    fn from_str(s: &str) -> CompletionResult<Shell> {
        match s {
            "bash" => Ok(Shell::Bash),
            "zsh" => Ok(Shell::Zsh),
            "fish" => Ok(Shell::Fish),
            "powershell" | "pwsh" => Ok(Shell::PowerShell),
            other => Err(CompletionError::UnsupportedShell(other.to_string())),
        }
    }
}

impl fmt::Display for Shell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Shell::Bash => "bash",
            Shell::Zsh => "zsh",
            Shell::Fish => "fish",
            Shell::PowerShell => "powershell",
        };
        write!(f, "{}", name)
    }
}

fn zsh_escape(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

fn write_script(path: &PathBuf, script: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, script)?;
    Ok(())
}

/// Append a snippet to an rc file unless it is already present
fn append_rc_line(path: &PathBuf, line: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let existing = fs::read_to_string(path).unwrap_or_default();
    if existing.contains(line.trim()) {
        return Ok(());
    }
    let mut content = existing;
    if !content.is_empty() && !content.ends_with('\n') {
        content.push('\n');
    }
    content.push_str(line);
    content.push('\n');
    fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_shells() {
        assert_eq!("bash".parse::<Shell>().unwrap(), Shell::Bash);
        assert_eq!("zsh".parse::<Shell>().unwrap(), Shell::Zsh);
        assert_eq!("fish".parse::<Shell>().unwrap(), Shell::Fish);
        assert_eq!("pwsh".parse::<Shell>().unwrap(), Shell::PowerShell);
        assert_eq!("powershell".parse::<Shell>().unwrap(), Shell::PowerShell);
    }

    #[test]
    fn test_parse_unsupported_shell() {
        let err = "xshell".parse::<Shell>().unwrap_err();
        assert_eq!(err, CompletionError::UnsupportedShell("xshell".to_string()));
        assert_eq!(err.to_string(), "Shell xshell is not supported.");
    }

    #[test]
    fn test_bash_format_is_plain_value() {
        let item = CompletionItem::with_help("Camila", "The reader of books.");
        assert_eq!(Shell::Bash.format_item(&item), "Camila");
    }

    #[test]
    fn test_zsh_format_quotes_value_and_help() {
        let item = CompletionItem::with_help("Camila", "The reader of books.");
        assert_eq!(
            Shell::Zsh.format_item(&item),
            "\"Camila\":\"The reader of books.\""
        );
        let bare = CompletionItem::new("Camila");
        assert_eq!(Shell::Zsh.format_item(&bare), "\"Camila\":\"\"");
    }

    #[test]
    fn test_zsh_format_escapes_quotes() {
        let item = CompletionItem::with_help("say\"hi\"", "a \\ b");
        assert_eq!(
            Shell::Zsh.format_item(&item),
            "\"say\\\"hi\\\"\":\"a \\\\ b\""
        );
    }

    #[test]
    fn test_fish_format_tab_separated() {
        let item = CompletionItem::with_help("Camila", "The reader of books.");
        assert_eq!(Shell::Fish.format_item(&item), "Camila\tThe reader of books.");
        assert_eq!(Shell::Fish.format_item(&CompletionItem::new("Camila")), "Camila");
    }

    #[test]
    fn test_powershell_format() {
        let item = CompletionItem::with_help("Camila", "The reader of books.");
        assert_eq!(
            Shell::PowerShell.format_item(&item),
            "Camila:::The reader of books."
        );
    }

    #[test]
    fn test_render_preserves_order() {
        let items = vec![
            CompletionItem::new("Sebastian"),
            CompletionItem::new("Camila"),
        ];
        assert_eq!(Shell::Bash.render(&items), "Sebastian\nCamila\n");
    }

    #[test]
    fn test_render_empty_is_empty_output() {
        assert_eq!(Shell::Zsh.render(&[]), "");
    }

    #[test]
    fn test_scripts_reference_trigger_variable() {
        for shell in Shell::ALL {
            let script = shell.completion_script("greet");
            assert!(script.contains("_GREET_COMPLETE"));
            assert!(script.contains(shell.instruction()));
            assert!(script.contains(COMPLETE_ARGS_VAR));
        }
    }
}
