//! Target resolver abstraction.
//!
//! A resolver maps a command name to an absolute path of an executable file,
//! or `None`. Resolvers never fail and have no side effects.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use adbcli_platform::os::Platform;

pub trait TargetResolver {
    fn resolve(&self, command: &str) -> Option<PathBuf>;
}

#[derive(Clone)]
pub struct PairResolver<R1, R2> {
    primary: R1,
    fallback: R2,
}

impl<R1, R2> PairResolver<R1, R2>
where
    R1: TargetResolver,
    R2: TargetResolver,
{
    pub fn new(primary: R1, fallback: R2) -> Self {
        Self { primary, fallback }
    }
}

impl<R1, R2> TargetResolver for PairResolver<R1, R2>
where
    R1: TargetResolver,
    R2: TargetResolver,
{
    fn resolve(&self, command: &str) -> Option<PathBuf> {
        self.primary
            .resolve(command)
            .or_else(|| self.fallback.resolve(command))
    }
}

/// Looks the command up on the process search path.
#[derive(Clone, Debug)]
pub struct SearchPathResolver {
    platform: Platform,
}

impl SearchPathResolver {
    pub fn new(platform: Platform) -> Self {
        Self { platform }
    }
}

impl TargetResolver for SearchPathResolver {
    fn resolve(&self, command: &str) -> Option<PathBuf> {
        let exe = self.platform.exe_name(command);
        which::which(&exe).ok().filter(|p| is_executable(p))
    }
}

/// Fixed per-command locations inside the cache directory.
#[derive(Clone, Debug, Default)]
pub struct CacheResolver {
    entries: HashMap<String, PathBuf>,
}

impl CacheResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(mut self, command: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        self.entries.insert(command.into(), path.into());
        self
    }
}

impl TargetResolver for CacheResolver {
    fn resolve(&self, command: &str) -> Option<PathBuf> {
        self.entries
            .get(command)
            .filter(|p| is_executable(p))
            .cloned()
    }
}

/// An existing regular file that the current user may execute.
pub fn is_executable(path: &Path) -> bool {
    let Ok(meta) = path.metadata() else {
        return false;
    };
    if !meta.is_file() {
        return false;
    }
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        meta.permissions().mode() & 0o111 != 0
    }
    #[cfg(not(unix))]
    {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct MockResolver(&'static str, Option<PathBuf>);

    impl TargetResolver for MockResolver {
        fn resolve(&self, command: &str) -> Option<PathBuf> {
            if command == self.0 {
                self.1.clone()
            } else {
                None
            }
        }
    }

    #[test]
    fn test_pair_resolver_fallback() {
        let primary = MockResolver("adb", Some(PathBuf::from("/usr/bin/adb")));
        let fallback = MockResolver("scrcpy", Some(PathBuf::from("/cache/scrcpy")));

        let resolver = PairResolver::new(primary, fallback);

        assert_eq!(resolver.resolve("adb"), Some(PathBuf::from("/usr/bin/adb")));
        assert_eq!(
            resolver.resolve("scrcpy"),
            Some(PathBuf::from("/cache/scrcpy"))
        );
        assert_eq!(resolver.resolve("fastboot"), None);
    }

    #[test]
    fn test_pair_resolver_primary_wins() {
        let primary = MockResolver("adb", Some(PathBuf::from("/first/adb")));
        let fallback = MockResolver("adb", Some(PathBuf::from("/second/adb")));
        let resolver = PairResolver::new(primary, fallback);
        assert_eq!(resolver.resolve("adb"), Some(PathBuf::from("/first/adb")));
    }

    #[test]
    fn test_cache_resolver_requires_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("platform-tools").join("adb");
        let resolver = CacheResolver::new().with_entry("adb", &missing);
        assert_eq!(resolver.resolve("adb"), None);
    }

    #[test]
    fn test_cache_resolver_rejects_directory() {
        let dir = tempfile::tempdir().unwrap();
        let resolver = CacheResolver::new().with_entry("adb", dir.path());
        assert_eq!(resolver.resolve("adb"), None);
    }

    #[cfg(unix)]
    #[test]
    fn test_cache_resolver_checks_mode() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("adb");
        std::fs::write(&path, "#!/bin/sh\n").unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o644)).unwrap();

        let resolver = CacheResolver::new().with_entry("adb", &path);
        assert_eq!(resolver.resolve("adb"), None);

        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        assert_eq!(resolver.resolve("adb"), Some(path));
    }

    #[test]
    fn test_search_path_unknown_command() {
        let resolver = SearchPathResolver::new(adbcli_platform::os::detect());
        assert_eq!(resolver.resolve("adbcli_nonexistent_binary_12345"), None);
    }
}
