//! Acquisition of the mirroring executable.
//!
//! Windows gets the release zip downloaded and extracted into the cache;
//! Linux and macOS go through the system package manager. The bridge is
//! never acquired here.

use std::path::PathBuf;
use std::time::Duration;

use adbcli_archive::extract_zip_file;
use adbcli_fetch::Fetcher;
use adbcli_locate::{ExecutableLocator, Tool, is_executable};
use adbcli_platform::command::Command;
use adbcli_platform::os::Platform;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AcquireError {
    #[error("automatic installation is not supported on {0}")]
    Unsupported(Platform),

    #[error("download failed: {0}")]
    Download(#[from] adbcli_fetch::Error),

    #[error("extraction failed: {0}")]
    Extract(#[from] adbcli_archive::Error),

    #[error("`{cmd}` exited with {}", .code.map_or_else(|| "a signal".to_string(), |c| format!("code {c}")))]
    Install { cmd: String, code: Option<i32> },

    #[error("could not run installer: {0}")]
    Launch(#[from] adbcli_platform::Error),

    #[error("{0} is still not on PATH after installation")]
    NotOnPath(Tool),

    #[error("expected {} after extraction", .0.display())]
    MissingAfterExtract(PathBuf),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// One package-manager invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallStep {
    pub program: String,
    pub args: Vec<String>,
    /// A failing optional step is logged and skipped.
    pub required: bool,
}

impl InstallStep {
    fn new(program: &str, args: &[&str], required: bool) -> Self {
        Self {
            program: program.to_string(),
            args: args.iter().map(|a| a.to_string()).collect(),
            required,
        }
    }

    /// Prefix the step with `sudo`.
    fn elevated(self) -> Self {
        let mut args = vec![self.program];
        args.extend(self.args);
        Self {
            program: "sudo".to_string(),
            args,
            required: self.required,
        }
    }

    pub fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// What acquiring the mirror means on a platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Plan {
    Download {
        url: String,
        archive: PathBuf,
        extract_to: PathBuf,
        expect: PathBuf,
    },
    Packages(Vec<InstallStep>),
    Unsupported(Platform),
}

/// Build the acquisition plan; `sudo` tells whether to elevate apt-get.
pub fn plan(locator: &ExecutableLocator, url: &str, sudo: bool) -> Plan {
    let package = Tool::Mirror.command();
    match locator.platform() {
        Platform::Windows => {
            let dir = locator.mirror_dir();
            Plan::Download {
                url: url.to_string(),
                archive: dir.join("scrcpy.zip"),
                expect: locator.cache_path(Tool::Mirror),
                extract_to: dir,
            }
        }
        Platform::Linux(_) => {
            let steps = [
                InstallStep::new("apt-get", &["update"], false),
                InstallStep::new("apt-get", &["install", "-y", package], true),
            ];
            Plan::Packages(
                steps
                    .into_iter()
                    .map(|s| if sudo { s.elevated() } else { s })
                    .collect(),
            )
        }
        Platform::Macos => Plan::Packages(vec![InstallStep::new("brew", &["install", package], true)]),
        Platform::Other => Plan::Unsupported(Platform::Other),
    }
}

pub struct Acquirer {
    locator: ExecutableLocator,
    url: String,
    timeout: Duration,
}

impl Acquirer {
    pub fn new(locator: ExecutableLocator, url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            locator,
            url: url.into(),
            timeout,
        }
    }

    /// Install the mirroring tool and return its path.
    pub fn acquire(&self) -> Result<PathBuf, AcquireError> {
        if let Platform::Linux(distro) = self.locator.platform() {
            if !distro.uses_apt() {
                tracing::warn!(?distro, "distribution may not provide apt-get");
            }
        }
        let sudo = which::which("sudo").is_ok();
        match plan(&self.locator, &self.url, sudo) {
            Plan::Download {
                url,
                archive,
                extract_to,
                expect,
            } => self.download(&url, &archive, &extract_to, expect),
            Plan::Packages(steps) => self.install(&steps),
            Plan::Unsupported(platform) => Err(AcquireError::Unsupported(platform)),
        }
    }

    fn download(
        &self,
        url: &str,
        archive: &std::path::Path,
        extract_to: &std::path::Path,
        expect: PathBuf,
    ) -> Result<PathBuf, AcquireError> {
        std::fs::create_dir_all(extract_to)?;
        let fetcher = Fetcher::new(self.timeout)?.with_progress(true);
        fetcher.fetch_blocking(url, archive)?;
        let report = extract_zip_file(archive, extract_to)?;
        tracing::info!(entries = report.entry_count, "scrcpy extracted");

        if is_executable(&expect) {
            Ok(expect)
        } else {
            Err(AcquireError::MissingAfterExtract(expect))
        }
    }

    fn install(&self, steps: &[InstallStep]) -> Result<PathBuf, AcquireError> {
        for step in steps {
            tracing::info!(cmd = %step.command_line(), "running installer");
            let result = Command::new(&step.program).args(&step.args).attach();
            let status = match result {
                Ok(status) => status,
                Err(e) if step.required => return Err(e.into()),
                Err(e) => {
                    tracing::warn!(cmd = %step.command_line(), error = %e, "optional step failed");
                    continue;
                }
            };
            if !status.success() {
                if step.required {
                    return Err(AcquireError::Install {
                        cmd: step.command_line(),
                        code: status.code(),
                    });
                }
                tracing::warn!(cmd = %step.command_line(), code = ?status.code(), "optional step failed");
            }
        }
        self.locator
            .resolve_on_path(Tool::Mirror)
            .ok_or(AcquireError::NotOnPath(Tool::Mirror))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use adbcli_platform::os::Distro;
    use std::path::Path;

    const URL: &str = "https://example.invalid/scrcpy-win64-v2.7.zip";

    fn locator(platform: Platform) -> ExecutableLocator {
        ExecutableLocator::new(platform, "/home/u/.adb_cli", "2.7")
    }

    #[test]
    fn windows_downloads_into_cache() {
        let plan = plan(&locator(Platform::Windows), URL, false);
        let root = Path::new("/home/u/.adb_cli");
        assert_eq!(
            plan,
            Plan::Download {
                url: URL.to_string(),
                archive: root.join("scrcpy").join("scrcpy.zip"),
                extract_to: root.join("scrcpy"),
                expect: root.join("scrcpy").join("scrcpy-win64-v2.7").join("scrcpy.exe"),
            }
        );
    }

    #[test]
    fn linux_uses_apt_get_with_sudo() {
        let Plan::Packages(steps) = plan(&locator(Platform::Linux(Distro::Ubuntu)), URL, true) else {
            panic!("expected package plan");
        };
        let lines: Vec<_> = steps.iter().map(InstallStep::command_line).collect();
        assert_eq!(
            lines,
            vec!["sudo apt-get update", "sudo apt-get install -y scrcpy"]
        );
        assert!(!steps[0].required);
        assert!(steps[1].required);
    }

    #[test]
    fn linux_without_sudo_runs_apt_get_directly() {
        let Plan::Packages(steps) = plan(&locator(Platform::Linux(Distro::Debian)), URL, false) else {
            panic!("expected package plan");
        };
        assert_eq!(steps[1].program, "apt-get");
        assert_eq!(steps[1].args, vec!["install", "-y", "scrcpy"]);
    }

    #[test]
    fn macos_uses_brew() {
        let plan = plan(&locator(Platform::Macos), URL, true);
        assert_eq!(
            plan,
            Plan::Packages(vec![InstallStep::new("brew", &["install", "scrcpy"], true)])
        );
    }

    #[test]
    fn other_platforms_are_unsupported() {
        let acquirer = Acquirer::new(locator(Platform::Other), URL, Duration::from_secs(1));
        assert!(matches!(
            acquirer.acquire(),
            Err(AcquireError::Unsupported(Platform::Other))
        ));
    }

    #[test]
    fn install_error_message_names_command() {
        let e = AcquireError::Install {
            cmd: "brew install scrcpy".to_string(),
            code: Some(1),
        };
        assert_eq!(e.to_string(), "`brew install scrcpy` exited with code 1");
    }

    #[cfg(unix)]
    #[test]
    fn required_step_failure_is_reported() {
        let acquirer = Acquirer::new(locator(Platform::Macos), URL, Duration::from_secs(1));
        let steps = vec![InstallStep::new("sh", &["-c", "exit 0"], false), InstallStep::new("sh", &["-c", "exit 4"], true)];
        let result = acquirer.install(&steps);
        assert!(matches!(result, Err(AcquireError::Install { code: Some(4), .. })));
    }

    #[test]
    fn missing_required_installer_is_launch_error() {
        let acquirer = Acquirer::new(locator(Platform::Macos), URL, Duration::from_secs(1));
        let steps = vec![InstallStep::new("adbcli_nonexistent_installer_12345", &[], true)];
        assert!(matches!(acquirer.install(&steps), Err(AcquireError::Launch(_))));
    }
}
