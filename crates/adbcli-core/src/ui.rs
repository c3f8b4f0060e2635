//! Text rendering for the menu, listings and outcomes.
//!
//! Everything here returns a `String`; printing is the terminal's job.

use console::style;
use tabled::{
    Table, Tabled,
    builder::Builder,
    settings::{Panel, Remove, Style, object::Rows},
};

use crate::device::DeviceRecord;
use crate::outcome::Outcome;

/// Shared table layout: optional title panel, optional column names.
#[derive(Debug, Clone, Default)]
pub struct Formatter {
    pub header: Option<String>,
    pub hide_columns: bool,
}

impl Formatter {
    pub fn titled(header: impl Into<String>) -> Self {
        Self {
            header: Some(header.into()),
            ..Self::default()
        }
    }

    pub fn without_columns(mut self) -> Self {
        self.hide_columns = true;
        self
    }

    pub fn build<T: Tabled, I: IntoIterator<Item = T>>(self, data: I) -> Table {
        let mut table = Table::new(data);
        if self.hide_columns {
            table.with(Remove::row(Rows::first()));
        }
        if let Some(header) = self.header {
            table.with(Panel::header(header));
        }
        table.with(Style::blank());
        table
    }
}

#[derive(Tabled)]
struct MenuRow {
    #[tabled(rename = "#")]
    number: String,
    #[tabled(rename = "Action")]
    label: String,
}

#[derive(Tabled)]
struct DeviceRow<'a> {
    #[tabled(rename = "Serial")]
    serial: &'a str,
    #[tabled(rename = "State")]
    state: String,
    #[tabled(rename = "Info")]
    info: &'a str,
}

pub const MENU_TITLE: &str = "ADB Pairing CLI";

/// The numbered menu, with `0 Exit` appended.
pub fn menu<'a>(entries: impl IntoIterator<Item = (u8, &'a str)>) -> String {
    let rows = entries
        .into_iter()
        .map(|(number, label)| MenuRow {
            number: number.to_string(),
            label: label.to_string(),
        })
        .chain(std::iter::once(MenuRow {
            number: "0".to_string(),
            label: "Exit".to_string(),
        }));
    Formatter::titled(MENU_TITLE)
        .without_columns()
        .build(rows)
        .to_string()
}

pub fn device_table(records: &[DeviceRecord]) -> String {
    if records.is_empty() {
        return "No devices attached.".to_string();
    }
    let rows = records.iter().map(|r| DeviceRow {
        serial: &r.serial,
        state: r.state.to_string(),
        info: &r.info,
    });
    Formatter::titled("ADB Devices").build(rows).to_string()
}

/// `1. serial` lines for the device prompt.
pub fn enumerate(serials: &[String]) -> String {
    serials
        .iter()
        .enumerate()
        .map(|(i, s)| format!("{}. {s}", i + 1))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Captured command output in a titled box.
pub fn command_output(stdout: &str) -> String {
    let body = if stdout.is_empty() { "(no output)" } else { stdout };
    let mut builder = Builder::default();
    builder.push_record([body]);
    let mut table = builder.build();
    table.with(Panel::header("Output")).with(Style::rounded());
    table.to_string()
}

/// `n. label -> usage` lines under a title.
pub fn help<'a>(entries: impl IntoIterator<Item = (u8, &'a str, &'a str)>) -> String {
    let mut text = style("Menu guide").cyan().bold().to_string();
    text.push('\n');
    for (number, label, usage) in entries {
        text.push_str(&format!("\n{number}. {label} -> {usage}"));
    }
    text
}

pub fn outcome(outcome: &Outcome) -> String {
    let message = outcome.message();
    match outcome {
        Outcome::Success(_) => style(message).green().to_string(),
        Outcome::Warning(_) | Outcome::Cancelled(_) => style(message).yellow().to_string(),
        Outcome::Failure(_) => style(message).red().to_string(),
    }
}

pub fn notice(text: &str) -> String {
    style(text).yellow().to_string()
}

pub fn progress(text: &str) -> String {
    style(text).cyan().to_string()
}

pub fn dim(text: &str) -> String {
    style(text).dim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::DeviceState;

    #[test]
    fn menu_lists_entries_then_exit() {
        let text = console::strip_ansi_codes(&menu([(1, "List devices"), (15, "Help")])).to_string();
        assert!(text.contains(MENU_TITLE));
        let list = text.find("List devices").unwrap();
        let help = text.find("Help").unwrap();
        let exit = text.find("Exit").unwrap();
        assert!(list < help && help < exit);
        assert!(!text.contains("Action"));
    }

    #[test]
    fn device_table_has_columns() {
        let records = vec![DeviceRecord {
            serial: "emulator-5554".into(),
            state: DeviceState::Ready,
            info: "product:sdk".into(),
        }];
        let text = device_table(&records);
        for needle in ["Serial", "State", "Info", "emulator-5554", "device", "product:sdk"] {
            assert!(text.contains(needle), "missing {needle}");
        }
        assert_eq!(device_table(&[]), "No devices attached.");
    }

    #[test]
    fn enumerate_is_one_based() {
        let serials = vec!["a".to_string(), "b".to_string()];
        assert_eq!(enumerate(&serials), "1. a\n2. b");
    }

    #[test]
    fn empty_output_is_marked() {
        assert!(command_output("").contains("(no output)"));
        assert!(command_output("total 0").contains("total 0"));
    }

    #[test]
    fn help_pairs_label_with_usage() {
        let text = help([(1, "List devices", "adb devices -l")]);
        assert!(text.contains("1. List devices -> adb devices -l"));
    }
}
