use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{ArgAction, Args, CommandFactory, Parser, Subcommand};
use clap_complete::{Shell, generate};

#[derive(Clone, Debug, Parser)]
#[command(name = "adb-cli", version = env!("CARGO_PKG_VERSION"), about, long_about = None, propagate_version = true)]
pub struct App {
    /// App root holding the tool cache and config.toml [default: ~/.adb_cli]
    #[arg(long, global = true, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Configuration file [default: <root>/config.toml]
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub cmd: Option<Commands>,
}

#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    #[command(alias = "c", name = "completions", about = "Print shell completions")]
    Completions(CompletionsArg),
}

#[derive(Args, Clone, Debug)]
pub struct CompletionsArg {
    /// Shell to generate for; the login shell when omitted
    pub shell: Option<Shell>,
}

pub fn completions(arg: &CompletionsArg) -> Result<()> {
    let shell = match arg.shell {
        Some(s) => s,
        None => detect_shell()?,
    };
    let mut cmd = App::command();
    generate(shell, &mut cmd, "adb-cli", &mut std::io::stdout());
    Ok(())
}

fn detect_shell() -> Result<Shell> {
    let shell = query_shell::get_shell().with_context(|| "Failed to get shell")?;
    Ok(match shell {
        query_shell::Shell::Bash => Shell::Bash,
        query_shell::Shell::Elvish => Shell::Elvish,
        query_shell::Shell::Fish => Shell::Fish,
        query_shell::Shell::Powershell => Shell::PowerShell,
        query_shell::Shell::Zsh => Shell::Zsh,
        _ => bail!("no completions for the current shell; pass one explicitly"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_is_consistent() {
        App::command().debug_assert();
    }

    #[test]
    fn no_subcommand_starts_the_menu() {
        let app = App::try_parse_from(["adb-cli"]).unwrap();
        assert!(app.cmd.is_none());
        assert_eq!(app.verbose, 0);
    }

    #[test]
    fn global_flags() {
        let app = App::try_parse_from(["adb-cli", "-vv", "--root", "/tmp/r", "--config", "/tmp/c.toml"]).unwrap();
        assert_eq!(app.verbose, 2);
        assert_eq!(app.root, Some(PathBuf::from("/tmp/r")));
        assert_eq!(app.config, Some(PathBuf::from("/tmp/c.toml")));
    }

    #[test]
    fn completions_take_a_shell() {
        let app = App::try_parse_from(["adb-cli", "completions", "zsh"]).unwrap();
        let Some(Commands::Completions(arg)) = app.cmd else {
            panic!("expected completions");
        };
        assert_eq!(arg.shell, Some(Shell::Zsh));
        assert!(App::try_parse_from(["adb-cli", "completions", "cmd.exe"]).is_err());
    }
}
