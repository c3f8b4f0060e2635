use std::ffi::OsStr;
use std::io;
use std::path::Path;
use std::process::{Command as StdCommand, ExitStatus, Output, Stdio};

use crate::error::{Error, Result};

/// Thin builder over [`std::process::Command`] with uniform error mapping.
///
/// A missing executable surfaces as [`Error::CommandNotFound`]; every other
/// launch problem as [`Error::CommandFailed`].
#[derive(Debug)]
pub struct Command {
    inner: StdCommand,
    program: String,
}

impl Command {
    pub fn new(program: impl AsRef<OsStr>) -> Self {
        let program = program.as_ref();
        Self {
            inner: StdCommand::new(program),
            program: program.to_string_lossy().into_owned(),
        }
    }

    pub fn from_path(path: &Path) -> Self {
        Self::new(path.as_os_str())
    }

    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.inner.arg(arg);
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.inner.args(args);
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn get_args(&self) -> Vec<String> {
        self.inner
            .get_args()
            .map(|a| a.to_string_lossy().into_owned())
            .collect()
    }

    /// Run to completion with stdout and stderr captured; stdin is closed.
    pub fn capture(mut self) -> Result<Output> {
        tracing::debug!(program = %self.program, args = ?self.get_args(), "capture");
        self.inner.stdin(Stdio::null());
        self.inner.output().map_err(|e| self.launch_error(e))
    }

    /// Run to completion with the terminal inherited by the child.
    pub fn attach(mut self) -> Result<ExitStatus> {
        tracing::debug!(program = %self.program, args = ?self.get_args(), "attach");
        self.inner
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());
        self.inner.status().map_err(|e| self.launch_error(e))
    }

    fn launch_error(&self, source: io::Error) -> Error {
        if source.kind() == io::ErrorKind::NotFound {
            Error::CommandNotFound {
                cmd: self.program.clone(),
            }
        } else {
            Error::CommandFailed {
                cmd: self.program.clone(),
                source,
            }
        }
    }
}

/// Stdout/stderr as trimmed text plus the exit code (`-1` when killed by a signal).
pub fn decode(output: &Output) -> (i32, String, String) {
    (
        output.status.code().unwrap_or(-1),
        String::from_utf8_lossy(&output.stdout).trim().to_string(),
        String::from_utf8_lossy(&output.stderr).trim().to_string(),
    )
}
