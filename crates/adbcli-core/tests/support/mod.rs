#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::VecDeque;
use std::io;
use std::path::{Path, PathBuf};

use adbcli_core::acquire::AcquireError;
use adbcli_core::{Bridge, CommandResult, Completion, Error, Mirror, Result, Terminal};

pub const ONE_DEVICE: &str = "List of devices attached\nemulator-5554    device product:sdk\n";
pub const TWO_DEVICES: &str =
    "List of devices attached\nemulator-5554\tdevice\nR58M12ABCDE\tdevice\nZX1G22\tunauthorized\n";
pub const NO_DEVICES: &str = "List of devices attached\n\n";

/// Bridge that replays queued results and records every call.
#[derive(Default)]
pub struct FakeBridge {
    pub missing: bool,
    responses: RefCell<VecDeque<CommandResult>>,
    completions: RefCell<VecDeque<Completion>>,
    interrupt_next: RefCell<bool>,
    calls: RefCell<Vec<Vec<String>>>,
}

impl FakeBridge {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn missing() -> Self {
        Self {
            missing: true,
            ..Self::default()
        }
    }

    pub fn respond(self, result: CommandResult) -> Self {
        self.responses.borrow_mut().push_back(result);
        self
    }

    pub fn stdout(self, stdout: &str) -> Self {
        self.respond(CommandResult::ok(stdout))
    }

    /// The next captured call reports a Ctrl-C.
    pub fn interrupted(self) -> Self {
        *self.interrupt_next.borrow_mut() = true;
        self
    }

    pub fn complete(self, completion: Completion) -> Self {
        self.completions.borrow_mut().push_back(completion);
        self
    }

    pub fn calls(&self) -> Vec<Vec<String>> {
        self.calls.borrow().clone()
    }

    fn record(&self, args: &[String]) -> Result<()> {
        if self.missing {
            return Err(Error::BridgeMissing {
                expected: PathBuf::from("/home/u/.adb_cli/platform-tools/adb"),
            });
        }
        self.calls.borrow_mut().push(args.to_vec());
        Ok(())
    }
}

impl Bridge for FakeBridge {
    fn locate(&self) -> Option<PathBuf> {
        (!self.missing).then(|| PathBuf::from("/usr/bin/adb"))
    }

    fn run(&self, args: &[String]) -> Result<CommandResult> {
        self.record(args)?;
        if self.interrupt_next.replace(false) {
            return Err(Error::Interrupted);
        }
        Ok(self.responses.borrow_mut().pop_front().unwrap_or_default())
    }

    fn attach(&self, args: &[String]) -> Result<Completion> {
        self.record(args)?;
        Ok(self
            .completions
            .borrow_mut()
            .pop_front()
            .unwrap_or(Completion::Exited(Some(0))))
    }
}

pub enum Answer {
    Line(String),
    Interrupt,
}

/// Terminal fed from a script; closed input once the script runs out.
#[derive(Default)]
pub struct FakeTerminal {
    answers: VecDeque<Answer>,
    pub prompts: Vec<String>,
    pub shown: Vec<String>,
    pub clears: usize,
}

impl FakeTerminal {
    pub fn new(lines: &[&str]) -> Self {
        Self {
            answers: lines.iter().map(|l| Answer::Line(l.to_string())).collect(),
            ..Self::default()
        }
    }

    pub fn then_interrupt(mut self) -> Self {
        self.answers.push_back(Answer::Interrupt);
        self
    }

    /// Everything shown so far, without styling.
    pub fn output(&self) -> String {
        console::strip_ansi_codes(&self.shown.join("\n")).to_string()
    }

    fn next(&mut self, label: &str) -> io::Result<String> {
        self.prompts.push(label.to_string());
        match self.answers.pop_front() {
            Some(Answer::Line(line)) => Ok(line),
            Some(Answer::Interrupt) => Err(io::Error::from(io::ErrorKind::Interrupted)),
            None => Err(io::Error::from(io::ErrorKind::UnexpectedEof)),
        }
    }
}

impl Terminal for FakeTerminal {
    fn show(&mut self, text: &str) -> io::Result<()> {
        self.shown.push(text.to_string());
        Ok(())
    }

    fn ask(&mut self, label: &str, default: Option<&str>) -> io::Result<String> {
        let line = self.next(label)?;
        Ok(match default {
            Some(default) if line.trim().is_empty() => default.to_string(),
            _ => line,
        })
    }

    fn confirm(&mut self, label: &str) -> io::Result<bool> {
        let line = self.next(label)?;
        Ok(matches!(line.trim(), "y" | "Y" | "yes"))
    }

    fn pause(&mut self, _label: &str) -> io::Result<()> {
        Ok(())
    }

    fn clear(&mut self) -> io::Result<()> {
        self.clears += 1;
        Ok(())
    }
}

/// Mirror with a fixed location, acquisition result and completion.
pub struct FakeMirror {
    pub located: Option<PathBuf>,
    pub acquired: RefCell<Option<std::result::Result<PathBuf, AcquireError>>>,
    pub completion: Completion,
    pub launched: RefCell<Vec<PathBuf>>,
}

impl FakeMirror {
    pub fn installed() -> Self {
        Self {
            located: Some(PathBuf::from("/usr/bin/scrcpy")),
            acquired: RefCell::new(None),
            completion: Completion::Exited(Some(0)),
            launched: RefCell::new(Vec::new()),
        }
    }

    pub fn absent(acquired: std::result::Result<PathBuf, AcquireError>) -> Self {
        Self {
            located: None,
            acquired: RefCell::new(Some(acquired)),
            ..Self::installed()
        }
    }
}

impl Mirror for FakeMirror {
    fn locate(&self) -> Option<PathBuf> {
        self.located.clone()
    }

    fn acquire(&self) -> std::result::Result<PathBuf, AcquireError> {
        self.acquired
            .borrow_mut()
            .take()
            .unwrap_or(Err(AcquireError::NotOnPath(adbcli_locate::Tool::Mirror)))
    }

    fn launch(&self, path: &Path) -> Completion {
        self.launched.borrow_mut().push(path.to_path_buf());
        self.completion.clone()
    }
}

pub fn args(parts: &[&str]) -> Vec<String> {
    parts.iter().map(|p| p.to_string()).collect()
}
