//! Invocation of the `adb` executable.

use std::path::{Path, PathBuf};

use adbcli_locate::{ExecutableLocator, Tool};
use adbcli_platform::command::{self, Command};
use adbcli_platform::interrupt::Interrupt;

use crate::error::{Error, Result};

/// Captured result of one bridge call. Exit code 0 is the only success.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommandResult {
    pub code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl CommandResult {
    pub fn ok(stdout: impl Into<String>) -> Self {
        Self {
            code: 0,
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    pub fn failed(code: i32, stderr: impl Into<String>) -> Self {
        Self {
            code,
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }

    pub fn success(&self) -> bool {
        self.code == 0
    }

    /// stderr, or stdout when stderr is empty.
    pub fn message(&self) -> &str {
        if self.stderr.is_empty() {
            &self.stdout
        } else {
            &self.stderr
        }
    }
}

/// How an attached (terminal-inheriting) child ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    /// Exit code, `None` when killed by a signal.
    Exited(Option<i32>),
    Interrupted,
    LaunchFailed(String),
}

pub trait Bridge {
    /// Where the bridge currently resolves, if anywhere.
    fn locate(&self) -> Option<PathBuf>;

    /// Captured mode. Fails only with [`Error::BridgeMissing`], or with
    /// [`Error::Interrupted`] when Ctrl-C arrived while adb ran.
    fn run(&self, args: &[String]) -> Result<CommandResult>;

    /// Attached mode: the child owns the terminal until it exits.
    fn attach(&self, args: &[String]) -> Result<Completion>;
}

/// [`Bridge`] backed by the real `adb`, resolved afresh for every call.
pub struct AdbBridge {
    locator: ExecutableLocator,
    interrupt: Interrupt,
}

impl AdbBridge {
    pub fn new(locator: ExecutableLocator, interrupt: Interrupt) -> Self {
        Self { locator, interrupt }
    }

    fn require(&self) -> Result<PathBuf> {
        self.locate().ok_or_else(|| self.missing())
    }

    fn missing(&self) -> Error {
        Error::BridgeMissing {
            expected: self.locator.cache_path(Tool::Bridge),
        }
    }
}

impl Bridge for AdbBridge {
    fn locate(&self) -> Option<PathBuf> {
        self.locator.resolve(Tool::Bridge)
    }

    fn run(&self, args: &[String]) -> Result<CommandResult> {
        let path = self.require()?;
        self.interrupt.take();
        let captured = Command::from_path(&path).args(args).capture();
        if self.interrupt.take() {
            tracing::debug!("adb interrupted by user");
            return Err(Error::Interrupted);
        }
        match captured {
            Ok(output) => {
                let (code, stdout, stderr) = command::decode(&output);
                tracing::debug!(code, "adb finished");
                Ok(CommandResult {
                    code,
                    stdout,
                    stderr,
                })
            }
            Err(adbcli_platform::Error::CommandNotFound { .. }) => Err(self.missing()),
            Err(e) => {
                tracing::warn!(error = %e, "adb could not be launched");
                Ok(CommandResult::failed(1, e.to_string()))
            }
        }
    }

    fn attach(&self, args: &[String]) -> Result<Completion> {
        let path = self.require()?;
        match attach_process(&path, args, &self.interrupt) {
            Err(adbcli_platform::Error::CommandNotFound { .. }) => Err(self.missing()),
            other => Ok(into_completion(other)),
        }
    }
}

/// Run `path` attached to the terminal and watch for a user interrupt.
pub fn attach_process(
    path: &Path,
    args: &[String],
    interrupt: &Interrupt,
) -> adbcli_platform::Result<Completion> {
    interrupt.take();
    let status = Command::from_path(path).args(args).attach()?;
    if interrupt.take() {
        return Ok(Completion::Interrupted);
    }
    Ok(Completion::Exited(status.code()))
}

pub(crate) fn into_completion(result: adbcli_platform::Result<Completion>) -> Completion {
    result.unwrap_or_else(|e| {
        tracing::warn!(error = %e, "attached process failed to start");
        Completion::LaunchFailed(e.to_string())
    })
}

/// Owned argument vector from string slices.
pub fn argv<const N: usize>(parts: [&str; N]) -> Vec<String> {
    parts.iter().map(|p| p.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_prefers_stderr() {
        let result = CommandResult {
            code: 1,
            stdout: "out".into(),
            stderr: "err".into(),
        };
        assert_eq!(result.message(), "err");
        assert_eq!(CommandResult::ok("only out").message(), "only out");
    }

    #[test]
    fn only_zero_is_success() {
        assert!(CommandResult::ok("").success());
        assert!(!CommandResult::failed(1, "").success());
        assert!(!CommandResult::failed(-1, "").success());
    }

    #[test]
    fn argv_builds_owned_tokens() {
        assert_eq!(argv(["devices", "-l"]), vec!["devices".to_string(), "-l".to_string()]);
    }

    #[test]
    fn missing_bridge_is_fatal_error() {
        let dir = tempfile::tempdir().unwrap();
        let locator = ExecutableLocator::new(adbcli_platform::os::detect(), dir.path(), "2.7");
        if locator.resolve(Tool::Bridge).is_some() {
            return;
        }
        let bridge = AdbBridge::new(locator, Interrupt::detached());
        let result = bridge.run(&argv(["devices"]));
        assert!(matches!(result, Err(Error::BridgeMissing { .. })));
        let result = bridge.attach(&argv(["shell"]));
        assert!(matches!(result, Err(Error::BridgeMissing { .. })));
    }

    #[cfg(unix)]
    #[test]
    fn cached_bridge_runs_captured() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let platform = adbcli_platform::os::detect();
        let locator = ExecutableLocator::new(platform, dir.path(), "2.7");
        if locator.resolve_on_path(Tool::Bridge).is_some() {
            return;
        }
        let script = locator.cache_path(Tool::Bridge);
        std::fs::create_dir_all(script.parent().unwrap()).unwrap();
        std::fs::write(&script, "#!/bin/sh\necho \"  args: $*  \"\necho boom >&2\nexit 2\n").unwrap();
        std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();

        let bridge = AdbBridge::new(locator, Interrupt::detached());
        let result = bridge.run(&argv(["devices", "-l"])).unwrap();
        assert_eq!(result.code, 2);
        assert_eq!(result.stdout, "args: devices -l");
        assert_eq!(result.stderr, "boom");
    }

    #[cfg(unix)]
    #[test]
    fn interrupt_during_capture_cancels() {
        use std::os::unix::fs::PermissionsExt;
        use std::time::Duration;

        let dir = tempfile::tempdir().unwrap();
        let platform = adbcli_platform::os::detect();
        let locator = ExecutableLocator::new(platform, dir.path(), "2.7");
        if locator.resolve_on_path(Tool::Bridge).is_some() {
            return;
        }
        let script = locator.cache_path(Tool::Bridge);
        std::fs::create_dir_all(script.parent().unwrap()).unwrap();
        std::fs::write(&script, "#!/bin/sh\nsleep 2\nexit 130\n").unwrap();
        std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();

        let interrupt = Interrupt::detached();
        let bridge = AdbBridge::new(locator, interrupt.clone());
        let raiser = {
            let interrupt = interrupt.clone();
            std::thread::spawn(move || {
                std::thread::sleep(Duration::from_millis(200));
                interrupt.raise();
            })
        };
        let result = bridge.run(&argv(["pair", "192.168.0.5:37099", "123456"]));
        raiser.join().unwrap();

        assert!(matches!(result, Err(Error::Interrupted)));
        assert!(!interrupt.is_raised());
    }
}
