//! The screen-mirroring executable.

use std::path::{Path, PathBuf};
use std::time::Duration;

use adbcli_locate::{ExecutableLocator, Tool};
use adbcli_platform::interrupt::Interrupt;

use crate::acquire::{AcquireError, Acquirer};
use crate::bridge::{Completion, attach_process, into_completion};

pub trait Mirror {
    fn locate(&self) -> Option<PathBuf>;

    /// Install the tool; only called after [`Mirror::locate`] came up empty.
    fn acquire(&self) -> Result<PathBuf, AcquireError>;

    /// Run the tool attached to the terminal, without arguments.
    fn launch(&self, path: &Path) -> Completion;
}

/// [`Mirror`] backed by `scrcpy`.
pub struct MirrorTool {
    locator: ExecutableLocator,
    acquirer: Acquirer,
    interrupt: Interrupt,
}

impl MirrorTool {
    pub fn new(locator: ExecutableLocator, url: impl Into<String>, timeout: Duration, interrupt: Interrupt) -> Self {
        let acquirer = Acquirer::new(locator.clone(), url, timeout);
        Self {
            locator,
            acquirer,
            interrupt,
        }
    }
}

impl Mirror for MirrorTool {
    fn locate(&self) -> Option<PathBuf> {
        self.locator.resolve(Tool::Mirror)
    }

    fn acquire(&self) -> Result<PathBuf, AcquireError> {
        tracing::info!(platform = %self.locator.platform(), "acquiring scrcpy");
        self.acquirer.acquire()
    }

    fn launch(&self, path: &Path) -> Completion {
        into_completion(attach_process(path, &[], &self.interrupt))
    }
}
