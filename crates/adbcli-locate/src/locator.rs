use std::fmt;
use std::path::{Path, PathBuf};

use adbcli_platform::os::Platform;

use crate::resolver::{CacheResolver, PairResolver, SearchPathResolver, TargetResolver};

/// External executables driven by the front-end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tool {
    /// Device bridge client (`adb`).
    Bridge,
    /// Screen mirroring client (`scrcpy`).
    Mirror,
}

impl Tool {
    pub fn command(self) -> &'static str {
        match self {
            Tool::Bridge => "adb",
            Tool::Mirror => "scrcpy",
        }
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.command())
    }
}

/// Resolves tools on the search path first, then in the cache directory.
///
/// Nothing is memoized: every call walks the chain again, so a tool
/// installed while the session runs is picked up by the next operation.
#[derive(Clone)]
pub struct ExecutableLocator {
    platform: Platform,
    root: PathBuf,
    mirror_version: String,
    chain: PairResolver<SearchPathResolver, CacheResolver>,
}

impl ExecutableLocator {
    pub fn new(platform: Platform, root: impl Into<PathBuf>, mirror_version: impl Into<String>) -> Self {
        let root = root.into();
        let mirror_version = mirror_version.into();
        let cache = [Tool::Bridge, Tool::Mirror]
            .into_iter()
            .fold(CacheResolver::new(), |cache, tool| {
                cache.with_entry(
                    tool.command(),
                    cache_layout(platform, &root, &mirror_version, tool),
                )
            });

        Self {
            platform,
            root,
            mirror_version,
            chain: PairResolver::new(SearchPathResolver::new(platform), cache),
        }
    }

    pub fn resolve(&self, tool: Tool) -> Option<PathBuf> {
        let found = self.chain.resolve(tool.command());
        tracing::debug!(%tool, path = ?found, "resolve");
        found
    }

    /// Search-path lookup only, used to confirm a package-manager install.
    pub fn resolve_on_path(&self, tool: Tool) -> Option<PathBuf> {
        SearchPathResolver::new(self.platform).resolve(tool.command())
    }

    pub fn cache_path(&self, tool: Tool) -> PathBuf {
        cache_layout(self.platform, &self.root, &self.mirror_version, tool)
    }

    /// Directory holding the downloaded mirroring payload.
    pub fn mirror_dir(&self) -> PathBuf {
        self.root.join("scrcpy")
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }
}

/// Cache location of `tool` under `root`.
///
/// The bridge lives in `platform-tools/`; the mirror payload in `scrcpy/`,
/// nested in the versioned release folder on Windows.
pub fn cache_layout(platform: Platform, root: &Path, mirror_version: &str, tool: Tool) -> PathBuf {
    match tool {
        Tool::Bridge => root
            .join("platform-tools")
            .join(platform.exe_name(tool.command())),
        Tool::Mirror => match platform {
            Platform::Windows => root
                .join("scrcpy")
                .join(format!("scrcpy-win64-v{mirror_version}"))
                .join(platform.exe_name(tool.command())),
            Platform::Macos | Platform::Linux(_) | Platform::Other => {
                root.join("scrcpy").join(tool.command())
            }
        },
    }
}
