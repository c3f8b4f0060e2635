use std::process::ExitCode;

use adbcli_core::{AdbBridge, MirrorTool, Session, run_loop};
use adbcli_locate::ExecutableLocator;
use adbcli_platform::{dir, interrupt::Interrupt, os};
use anyhow::{Context, Result};
use clap::Parser;
use console::style;

use crate::cli::{App, Commands};
use crate::term::ConsoleTerminal;

mod cli;
mod config;
mod logging;
mod term;

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{} {e:#}", style("error:").red().bold());
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<ExitCode> {
    let app = App::parse();
    logging::init_logging(app.verbose);

    if let Some(Commands::Completions(arg)) = &app.cmd {
        cli::completions(arg)?;
        return Ok(ExitCode::SUCCESS);
    }

    let settings = config::load(app.root.as_deref(), app.config.as_deref())?;
    let root = dir::app_root(settings.root.as_deref()).context("Failed to get home directory")?;
    let platform = os::detect();
    tracing::debug!(%platform, root = %root.display(), "starting");

    let interrupt = Interrupt::install().context("Failed to install Ctrl-C handler")?;
    let locator = ExecutableLocator::new(platform, root, settings.scrcpy_version.clone());
    let bridge = AdbBridge::new(locator.clone(), interrupt.clone());
    let mirror = MirrorTool::new(
        locator,
        settings.scrcpy_url(),
        settings.download_timeout(),
        interrupt.clone(),
    );
    let mut terminal = ConsoleTerminal::new(interrupt);

    let mut session = Session::new(&bridge, &mirror, &mut terminal)
        .with_pair_connect_port(settings.pair_connect_port);
    let end = run_loop(&mut session)?;
    tracing::debug!(?end, "session ended");

    Ok(match end.exit_code() {
        0 => ExitCode::SUCCESS,
        _ => ExitCode::FAILURE,
    })
}
