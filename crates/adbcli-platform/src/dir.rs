use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Directory name of the app root under the user's home.
pub const APP_DIR: &str = ".adb_cli";

pub fn user_home() -> Option<PathBuf> {
    home::home_dir()
}

/// App root: `override_root` when given, otherwise `<home>/.adb_cli`.
pub fn app_root(override_root: Option<&Path>) -> Result<PathBuf> {
    match override_root {
        Some(root) => Ok(root.to_path_buf()),
        None => user_home().map(|h| h.join(APP_DIR)).ok_or(Error::NoHome),
    }
}
