//! Device listings and target selection.

use std::fmt;

use crate::bridge::argv;
use crate::error::Result;
use crate::session::Session;
use crate::ui;

/// Listing state token that marks a device ready for commands.
pub const READY_TOKEN: &str = "device";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeviceState {
    Ready,
    Unauthorized,
    Offline,
    Other(String),
}

impl DeviceState {
    pub fn from_token(token: &str) -> Self {
        match token {
            READY_TOKEN => DeviceState::Ready,
            "unauthorized" => DeviceState::Unauthorized,
            "offline" => DeviceState::Offline,
            other => DeviceState::Other(other.to_string()),
        }
    }
}

impl fmt::Display for DeviceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeviceState::Ready => f.write_str(READY_TOKEN),
            DeviceState::Unauthorized => f.write_str("unauthorized"),
            DeviceState::Offline => f.write_str("offline"),
            DeviceState::Other(s) => f.write_str(s),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceRecord {
    pub serial: String,
    pub state: DeviceState,
    pub info: String,
}

impl DeviceRecord {
    pub fn is_ready(&self) -> bool {
        self.state == DeviceState::Ready
    }
}

/// Parse `adb devices [-l]` output.
///
/// The first line is the header and is always dropped, as are blank lines
/// and daemon banners starting with `*`.
pub fn parse_devices(stdout: &str) -> Vec<DeviceRecord> {
    stdout
        .lines()
        .skip(1)
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('*'))
        .filter_map(parse_line)
        .collect()
}

fn parse_line(line: &str) -> Option<DeviceRecord> {
    let mut parts = line.splitn(2, char::is_whitespace);
    let serial = parts.next()?.to_string();
    let rest = parts.next().unwrap_or("").trim_start();
    let mut rest = rest.splitn(2, char::is_whitespace);
    let state = DeviceState::from_token(rest.next().unwrap_or(""));
    let info = rest.next().unwrap_or("").trim().to_string();
    Some(DeviceRecord {
        serial,
        state,
        info,
    })
}

/// Serials of ready devices, in listing order.
pub fn ready_serials(stdout: &str) -> Vec<String> {
    parse_devices(stdout)
        .into_iter()
        .filter(DeviceRecord::is_ready)
        .map(|d| d.serial)
        .collect()
}

/// Result of resolving a target device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    Serial(String),
    /// No usable device; the reason is meant for the user.
    Unavailable(String),
}

/// 1-based pick from `serials`; anything unparseable or out of range
/// falls back to the first entry.
pub fn pick(serials: &[String], choice: &str) -> Option<String> {
    let index = choice
        .trim()
        .parse::<usize>()
        .ok()
        .filter(|n| (1..=serials.len()).contains(n))
        .map_or(0, |n| n - 1);
    serials.get(index).cloned()
}

/// Resolve one ready device, prompting only when several are attached.
pub fn select_one(session: &mut Session<'_>) -> Result<Selection> {
    let listing = session.bridge.run(&argv(["devices"]))?;
    if !listing.success() {
        return Ok(Selection::Unavailable(format!("Error: {}", listing.message())));
    }

    let serials = ready_serials(&listing.stdout);
    match serials.as_slice() {
        [] => Ok(Selection::Unavailable("No device available.".to_string())),
        [only] => Ok(Selection::Serial(only.clone())),
        _ => {
            session.terminal.show(&ui::enumerate(&serials))?;
            let choice = session.terminal.ask("Select device", Some("1"))?;
            let serial = pick(&serials, &choice).unwrap_or_else(|| serials[0].clone());
            tracing::debug!(%serial, choice = choice.trim(), "device selected");
            Ok(Selection::Serial(serial))
        }
    }
}
