use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Tunables read from `config.toml`, `ADB_CLI_*` variables and flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// App root; `<home>/.adb_cli` when unset.
    pub root: Option<PathBuf>,
    /// scrcpy release fetched on Windows and used for the cache layout.
    pub scrcpy_version: String,
    pub download_timeout_secs: u64,
    /// Port dialed by the connect that follows a successful pair.
    pub pair_connect_port: u16,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            root: None,
            scrcpy_version: "2.7".to_string(),
            download_timeout_secs: 120,
            pair_connect_port: 5555,
        }
    }
}

impl Settings {
    pub fn scrcpy_url(&self) -> String {
        let v = &self.scrcpy_version;
        format!("https://github.com/Genymobile/scrcpy/releases/download/v{v}/scrcpy-win64-v{v}.zip")
    }

    pub fn download_timeout(&self) -> Duration {
        Duration::from_secs(self.download_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let settings = Settings::default();
        assert_eq!(settings.root, None);
        assert_eq!(settings.pair_connect_port, 5555);
        assert_eq!(settings.download_timeout(), Duration::from_secs(120));
    }

    #[test]
    fn release_url_follows_version() {
        let settings = Settings {
            scrcpy_version: "3.1".to_string(),
            ..Settings::default()
        };
        assert_eq!(
            settings.scrcpy_url(),
            "https://github.com/Genymobile/scrcpy/releases/download/v3.1/scrcpy-win64-v3.1.zip"
        );
    }
}
