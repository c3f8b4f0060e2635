//! The fixed catalog of device operations.
//!
//! Every operation validates its input before touching the bridge, and
//! reports through an [`Outcome`]. Only a missing bridge or a user
//! interrupt at a prompt escapes as an [`crate::Error`].

use std::path::Path;

use crate::bridge::{CommandResult, Completion, argv};
use crate::device::{self, Selection};
use crate::error::Result;
use crate::outcome::Outcome;
use crate::session::Session;
use crate::ui;

/// Substring of `adb pair` stdout that confirms pairing.
pub const PAIR_MARKER: &str = "Successfully";

pub const DEFAULT_TCPIP_PORT: &str = "5555";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    ListDevices,
    StartServer,
    StopServer,
    Pair,
    Connect,
    EnableTcpip,
    OpenShell,
    RunCommand,
    InstallApk,
    PushFile,
    PullFile,
    Reboot,
    Disconnect,
    Mirror,
    Help,
}

impl Operation {
    /// Menu order.
    pub const ALL: [Operation; 15] = [
        Operation::ListDevices,
        Operation::StartServer,
        Operation::StopServer,
        Operation::Pair,
        Operation::Connect,
        Operation::EnableTcpip,
        Operation::OpenShell,
        Operation::RunCommand,
        Operation::InstallApk,
        Operation::PushFile,
        Operation::PullFile,
        Operation::Reboot,
        Operation::Disconnect,
        Operation::Mirror,
        Operation::Help,
    ];

    pub fn number(self) -> u8 {
        match self {
            Operation::ListDevices => 1,
            Operation::StartServer => 2,
            Operation::StopServer => 3,
            Operation::Pair => 4,
            Operation::Connect => 5,
            Operation::EnableTcpip => 6,
            Operation::OpenShell => 7,
            Operation::RunCommand => 8,
            Operation::InstallApk => 9,
            Operation::PushFile => 10,
            Operation::PullFile => 11,
            Operation::Reboot => 12,
            Operation::Disconnect => 13,
            Operation::Mirror => 14,
            Operation::Help => 15,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Operation::ListDevices => "List devices",
            Operation::StartServer => "Start ADB server",
            Operation::StopServer => "Stop ADB server",
            Operation::Pair => "Pair device",
            Operation::Connect => "Connect device",
            Operation::EnableTcpip => "Enable tcpip",
            Operation::OpenShell => "Open shell",
            Operation::RunCommand => "Run command",
            Operation::InstallApk => "Install APK",
            Operation::PushFile => "Push file",
            Operation::PullFile => "Pull file",
            Operation::Reboot => "Reboot device",
            Operation::Disconnect => "Disconnect device",
            Operation::Mirror => "Screen mirroring",
            Operation::Help => "Help",
        }
    }

    /// The command line an operation issues, for the help screen.
    pub fn usage(self) -> &'static str {
        match self {
            Operation::ListDevices => "adb devices -l",
            Operation::StartServer => "adb start-server",
            Operation::StopServer => "adb kill-server",
            Operation::Pair => "adb pair <ip:port> <PIN>, then adb connect <ip>:5555",
            Operation::Connect => "adb connect <ip:port>",
            Operation::EnableTcpip => "adb -s <serial> tcpip <port>",
            Operation::OpenShell => "adb -s <serial> shell",
            Operation::RunCommand => "adb -s <serial> shell <cmd>",
            Operation::InstallApk => "adb -s <serial> install -r app.apk",
            Operation::PushFile => "adb -s <serial> push <src> <dst>",
            Operation::PullFile => "adb -s <serial> pull <remote> <local>",
            Operation::Reboot => "adb -s <serial> reboot [bootloader|recovery]",
            Operation::Disconnect => "adb disconnect [<ip:port>]",
            Operation::Mirror => "scrcpy, installed on first use",
            Operation::Help => "this screen",
        }
    }

    /// Parse a menu choice; `0` is not an operation.
    pub fn from_choice(choice: &str) -> Option<Self> {
        let number = choice.trim().parse::<u8>().ok()?;
        Self::ALL.into_iter().find(|op| op.number() == number)
    }
}

/// Run one operation against the session.
pub fn run(op: Operation, session: &mut Session<'_>) -> Result<Outcome> {
    tracing::debug!(?op, "dispatch");
    match op {
        Operation::ListDevices => list_devices(session),
        Operation::StartServer => simple(session, argv(["start-server"]), "Server started", "Error"),
        Operation::StopServer => simple(session, argv(["kill-server"]), "Server stopped", "Error"),
        Operation::Pair => pair(session),
        Operation::Connect => connect(session),
        Operation::EnableTcpip => enable_tcpip(session),
        Operation::OpenShell => open_shell(session),
        Operation::RunCommand => run_command(session),
        Operation::InstallApk => install_apk(session),
        Operation::PushFile => push_file(session),
        Operation::PullFile => pull_file(session),
        Operation::Reboot => reboot(session),
        Operation::Disconnect => disconnect(session),
        Operation::Mirror => mirror(session),
        Operation::Help => help(session),
    }
}

/// Pairing succeeded only when adb exits 0 and says so.
pub fn pair_succeeded(result: &CommandResult) -> bool {
    result.success() && result.stdout.contains(PAIR_MARKER)
}

/// `host:port` to connect to after pairing with `hostport`.
pub fn follow_up_target(hostport: &str, port: u16) -> String {
    let host = hostport.rsplit_once(':').map_or(hostport, |(host, _)| host);
    format!("{host}:{port}")
}

pub fn pair_args(hostport: &str, pin: &str) -> Vec<String> {
    argv(["pair", hostport, pin])
}

/// `normal` and empty leave the mode off.
pub fn reboot_args(serial: &str, mode: &str) -> Vec<String> {
    let mut args = argv(["-s", serial, "reboot"]);
    let mode = mode.trim();
    if !mode.is_empty() && mode != "normal" {
        args.push(mode.to_string());
    }
    args
}

/// An empty host disconnects everything.
pub fn disconnect_args(host: &str) -> Vec<String> {
    let host = host.trim();
    if host.is_empty() {
        argv(["disconnect"])
    } else {
        argv(["disconnect", host])
    }
}

pub fn run_command_args(serial: &str, words: Vec<String>) -> Vec<String> {
    let mut args = argv(["-s", serial, "shell"]);
    args.extend(words);
    args
}

/// A TCP port in `1..=65535`.
pub fn parse_port(input: &str) -> Option<u16> {
    input.trim().parse::<u16>().ok().filter(|p| *p != 0)
}

fn or_default(text: &str, default: &str) -> String {
    if text.is_empty() {
        default.to_string()
    } else {
        text.to_string()
    }
}

fn failure(prefix: &str, result: &CommandResult) -> Outcome {
    Outcome::Failure(format!("{prefix}: {}", result.message()))
}

/// The selected serial, or the outcome to return early with.
fn target(session: &mut Session<'_>) -> Result<std::result::Result<String, Outcome>> {
    Ok(match device::select_one(session)? {
        Selection::Serial(serial) => Ok(serial),
        Selection::Unavailable(reason) => Err(Outcome::Failure(reason)),
    })
}

macro_rules! select_or_return {
    ($session:expr) => {
        match target($session)? {
            Ok(serial) => serial,
            Err(outcome) => return Ok(outcome),
        }
    };
}

fn ask_required(session: &mut Session<'_>, label: &str) -> Result<String> {
    Ok(session.terminal.ask(label, None)?.trim().to_string())
}

fn simple(session: &mut Session<'_>, args: Vec<String>, done: &str, prefix: &str) -> Result<Outcome> {
    let result = session.bridge.run(&args)?;
    Ok(if result.success() {
        Outcome::Success(or_default(&result.stdout, done))
    } else {
        failure(prefix, &result)
    })
}

fn list_devices(session: &mut Session<'_>) -> Result<Outcome> {
    let result = session.bridge.run(&argv(["devices", "-l"]))?;
    if !result.success() {
        return Ok(failure("Error", &result));
    }
    let records = device::parse_devices(&result.stdout);
    session.terminal.show(&ui::device_table(&records))?;
    Ok(Outcome::Success(format!("{} device(s) listed.", records.len())))
}

fn pair(session: &mut Session<'_>) -> Result<Outcome> {
    let hostport = ask_required(session, "Pair address ip:port (e.g. 192.168.0.5:37099)")?;
    if hostport.is_empty() {
        return Ok(Outcome::Failure("Pair address is empty.".to_string()));
    }
    let pin = ask_required(session, "Pairing PIN")?;
    if pin.is_empty() {
        return Ok(Outcome::Failure("PIN is empty.".to_string()));
    }

    let paired = session.bridge.run(&pair_args(&hostport, &pin))?;
    if !pair_succeeded(&paired) {
        return Ok(failure("Pair failed", &paired));
    }
    session
        .terminal
        .show(&ui::outcome(&Outcome::Success(paired.stdout.clone())))?;

    let follow_up = follow_up_target(&hostport, session.pair_connect_port);
    let connected = session.bridge.run(&argv(["connect", &follow_up]))?;
    Ok(if connected.success() {
        Outcome::Success(or_default(&connected.stdout, &format!("connected to {follow_up}")))
    } else {
        Outcome::Warning(format!("Paired, but connect failed: {}", connected.message()))
    })
}

fn connect(session: &mut Session<'_>) -> Result<Outcome> {
    let hostport = ask_required(session, "Host/IP:port")?;
    if hostport.is_empty() {
        return Ok(Outcome::Failure("Address is empty.".to_string()));
    }
    let result = session.bridge.run(&argv(["connect", &hostport]))?;
    Ok(if result.success() {
        Outcome::Success(result.stdout)
    } else {
        failure("Connect failed", &result)
    })
}

fn enable_tcpip(session: &mut Session<'_>) -> Result<Outcome> {
    let input = session.terminal.ask("tcpip port", Some(DEFAULT_TCPIP_PORT))?;
    let Some(port) = parse_port(&input) else {
        return Ok(Outcome::Failure(format!("Invalid port: {}", input.trim())));
    };
    let serial = select_or_return!(session);
    let port = port.to_string();
    let result = session.bridge.run(&argv(["-s", &serial, "tcpip", &port]))?;
    Ok(if result.success() {
        Outcome::Success(or_default(&result.stdout, &format!("restarting in TCP mode port: {port}")))
    } else {
        failure("Failed to set tcpip", &result)
    })
}

fn open_shell(session: &mut Session<'_>) -> Result<Outcome> {
    let serial = select_or_return!(session);
    session.terminal.show(&ui::progress(&format!(
        "Opening interactive shell to {serial}. Type 'exit' to leave."
    )))?;
    Ok(match session.bridge.attach(&argv(["-s", &serial, "shell"]))? {
        Completion::Exited(_) => Outcome::Success("Shell closed.".to_string()),
        Completion::Interrupted => Outcome::Cancelled("Shell interrupted by user.".to_string()),
        Completion::LaunchFailed(e) => Outcome::Failure(format!("Error starting shell: {e}")),
    })
}

fn run_command(session: &mut Session<'_>) -> Result<Outcome> {
    let command = ask_required(session, "Shell command (e.g. ls /sdcard)")?;
    if command.is_empty() {
        return Ok(Outcome::Failure("Command is empty.".to_string()));
    }
    let words = match shell_words::split(&command) {
        Ok(words) if !words.is_empty() => words,
        Ok(_) => return Ok(Outcome::Failure("Command is empty.".to_string())),
        Err(e) => return Ok(Outcome::Failure(format!("Cannot parse command: {e}"))),
    };
    let serial = select_or_return!(session);

    let result = session.bridge.run(&run_command_args(&serial, words))?;
    if !result.success() {
        return Ok(failure("Error", &result));
    }
    session.terminal.show(&ui::command_output(&result.stdout))?;
    Ok(Outcome::Success("Command finished.".to_string()))
}

fn install_apk(session: &mut Session<'_>) -> Result<Outcome> {
    let apk = ask_required(session, "Path to local APK file")?;
    if apk.is_empty() || !Path::new(&apk).is_file() {
        return Ok(Outcome::Failure("APK file not found.".to_string()));
    }
    let serial = select_or_return!(session);

    session
        .terminal
        .show(&ui::progress(&format!("Installing {apk} to {serial} ...")))?;
    let result = session.bridge.run(&argv(["-s", &serial, "install", "-r", &apk]))?;
    Ok(if result.success() {
        Outcome::Success(format!("Install success:\n{}", result.stdout))
    } else {
        failure("Install failed", &result)
    })
}

fn push_file(session: &mut Session<'_>) -> Result<Outcome> {
    let src = ask_required(session, "Source file path (PC)")?;
    if src.is_empty() || !Path::new(&src).exists() {
        return Ok(Outcome::Failure("Source file not found.".to_string()));
    }
    let dst = ask_required(session, "Destination path on device (e.g. /sdcard/Download/)")?;
    let serial = select_or_return!(session);

    session
        .terminal
        .show(&ui::progress(&format!("Pushing {src} -> {serial}:{dst}")))?;
    let result = session.bridge.run(&argv(["-s", &serial, "push", &src, &dst]))?;
    Ok(if result.success() {
        Outcome::Success(format!("Push success:\n{}", result.stdout))
    } else {
        failure("Push failed", &result)
    })
}

fn pull_file(session: &mut Session<'_>) -> Result<Outcome> {
    let remote = ask_required(session, "File path on device (e.g. /sdcard/Download/file.txt)")?;
    if remote.is_empty() {
        return Ok(Outcome::Failure("Remote path is empty.".to_string()));
    }
    let local = ask_required(session, "Destination path on PC")?;
    if local.is_empty() {
        return Ok(Outcome::Failure("Destination path is empty.".to_string()));
    }
    let serial = select_or_return!(session);

    session
        .terminal
        .show(&ui::progress(&format!("Pulling {serial}:{remote} -> {local}")))?;
    let result = session.bridge.run(&argv(["-s", &serial, "pull", &remote, &local]))?;
    Ok(if result.success() {
        Outcome::Success(format!("Pull success:\n{}", result.stdout))
    } else {
        failure("Pull failed", &result)
    })
}

fn reboot(session: &mut Session<'_>) -> Result<Outcome> {
    let serial = select_or_return!(session);
    let mode = session
        .terminal
        .ask("Reboot mode (normal/bootloader/recovery)", Some("normal"))?;
    let result = session.bridge.run(&reboot_args(&serial, &mode))?;
    Ok(if result.success() {
        Outcome::Success("Reboot command sent.".to_string())
    } else {
        failure("Reboot failed", &result)
    })
}

fn disconnect(session: &mut Session<'_>) -> Result<Outcome> {
    let host = session
        .terminal
        .ask("Host/IP:port to disconnect (empty for all)", Some(""))?;
    let result = session.bridge.run(&disconnect_args(&host))?;
    Ok(if result.success() {
        Outcome::Success(or_default(&result.stdout, "Disconnected."))
    } else {
        failure("Disconnect failed", &result)
    })
}

fn mirror(session: &mut Session<'_>) -> Result<Outcome> {
    let path = match session.mirror.locate() {
        Some(path) => path,
        None => {
            session
                .terminal
                .show(&ui::notice("scrcpy not found, trying to install it..."))?;
            match session.mirror.acquire() {
                Ok(path) => path,
                Err(e) => {
                    tracing::warn!(error = %e, "scrcpy acquisition failed");
                    return Ok(Outcome::Failure(format!("scrcpy is unavailable: {e}")));
                }
            }
        }
    };

    let listing = session.bridge.run(&argv(["devices"]))?;
    if !listing.success() || device::ready_serials(&listing.stdout).is_empty() {
        return Ok(Outcome::Failure("No ADB device connected.".to_string()));
    }

    session.terminal.show(&ui::progress("Starting scrcpy..."))?;
    Ok(match session.mirror.launch(&path) {
        Completion::Exited(_) => Outcome::Success("Mirroring ended.".to_string()),
        Completion::Interrupted => Outcome::Cancelled("Mirroring interrupted by user.".to_string()),
        Completion::LaunchFailed(e) => Outcome::Failure(format!("Failed to run scrcpy: {e}")),
    })
}

fn help(session: &mut Session<'_>) -> Result<Outcome> {
    let text = ui::help(
        Operation::ALL
            .into_iter()
            .map(|op| (op.number(), op.label(), op.usage())),
    );
    session.terminal.show(&text)?;
    Ok(Outcome::Success(String::new()))
}
