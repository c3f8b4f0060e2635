//! The interactive menu loop.

use crate::bridge::Bridge;
use crate::error::{Error, Result};
use crate::mirror::Mirror;
use crate::ops::{self, Operation};
use crate::outcome::Outcome;
use crate::terminal::Terminal;
use crate::ui;

pub const DEFAULT_PAIR_CONNECT_PORT: u16 = 5555;

/// Startup hint when adb cannot be found yet.
pub const BRIDGE_HINT: &str = "adb was not found. Install Android platform-tools manually \
    (https://developer.android.com/tools/releases/platform-tools) and put adb on PATH.";

/// Everything an operation may touch.
pub struct Session<'a> {
    pub bridge: &'a dyn Bridge,
    pub mirror: &'a dyn Mirror,
    pub terminal: &'a mut dyn Terminal,
    /// Port for the `connect` issued after a successful pair.
    pub pair_connect_port: u16,
}

impl<'a> Session<'a> {
    pub fn new(bridge: &'a dyn Bridge, mirror: &'a dyn Mirror, terminal: &'a mut dyn Terminal) -> Self {
        Self {
            bridge,
            mirror,
            terminal,
            pair_connect_port: DEFAULT_PAIR_CONNECT_PORT,
        }
    }

    pub fn with_pair_connect_port(mut self, port: u16) -> Self {
        self.pair_connect_port = port;
        self
    }
}

/// Why the loop stopped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEnd {
    /// The user confirmed exit.
    UserExit,
    /// Interrupt or closed input at a prompt.
    Interrupted,
    /// adb disappeared; carries the reported message.
    BridgeMissing(String),
}

impl SessionEnd {
    pub fn exit_code(&self) -> i32 {
        match self {
            SessionEnd::UserExit | SessionEnd::Interrupted => 0,
            SessionEnd::BridgeMissing(_) => 1,
        }
    }
}

/// Run menu cycles until the user leaves or adb goes missing.
pub fn run_loop(session: &mut Session<'_>) -> Result<SessionEnd> {
    if session.bridge.locate().is_none() {
        tracing::warn!("adb not found at startup");
        session.terminal.show(&ui::notice(BRIDGE_HINT))?;
    }

    loop {
        match cycle(session) {
            Ok(Some(end)) => return Ok(end),
            Ok(None) => {}
            Err(Error::Interrupted) => {
                let _ = session.terminal.show(&ui::notice("\nCancelled by user."));
                return Ok(SessionEnd::Interrupted);
            }
            Err(e @ Error::BridgeMissing { .. }) => {
                let message = e.to_string();
                let _ = session.terminal.show(&ui::outcome(&Outcome::Failure(message.clone())));
                return Ok(SessionEnd::BridgeMissing(message));
            }
            Err(e) => return Err(e),
        }
    }
}

fn cycle(session: &mut Session<'_>) -> Result<Option<SessionEnd>> {
    session.terminal.clear()?;
    session.terminal.show(&ui::menu(
        Operation::ALL.into_iter().map(|op| (op.number(), op.label())),
    ))?;
    let choice = session.terminal.ask("Choose an action", Some("1"))?;
    let choice = choice.trim();

    if choice == "0" {
        if session.terminal.confirm("Really quit?")? {
            session.terminal.show("Goodbye!")?;
            return Ok(Some(SessionEnd::UserExit));
        }
    } else {
        let outcome = match Operation::from_choice(choice) {
            Some(op) => ops::run(op, session)?,
            None => Outcome::Failure("Unknown choice.".to_string()),
        };
        if !outcome.message().is_empty() {
            session.terminal.show(&ui::outcome(&outcome))?;
        }
    }

    session
        .terminal
        .pause(&ui::dim("Press Enter to return to the menu..."))?;
    Ok(None)
}
