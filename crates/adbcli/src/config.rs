//! Settings layered from defaults, `config.toml`, `ADB_CLI_*` and flags.

use std::path::{Path, PathBuf};

use adbcli_core::Settings;
use adbcli_platform::dir;
use anyhow::{Context, Result, bail};
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::Serialize;

pub const CONFIG_FILE: &str = "config.toml";
pub const ENV_PREFIX: &str = "ADB_CLI_";

/// Read verbatim from the environment: figment would parse `3.0` as a float.
const VERSION_KEY: &str = "scrcpy_version";

/// Command-line values; unset flags leave lower layers alone.
#[derive(Debug, Default, Serialize)]
struct Flags {
    #[serde(skip_serializing_if = "Option::is_none")]
    root: Option<PathBuf>,
}

/// Resolve the app root, then read the settings that live under it.
///
/// The returned settings always carry a root.
pub fn load(root_flag: Option<&Path>, config_flag: Option<&Path>) -> Result<Settings> {
    let env_root = std::env::var_os(format!("{ENV_PREFIX}ROOT")).map(PathBuf::from);
    let root = dir::app_root(root_flag.or(env_root.as_deref())).context("Failed to get home directory")?;

    let file = match config_flag {
        Some(path) if !path.is_file() => bail!("config file {} does not exist", path.display()),
        Some(path) => path.to_path_buf(),
        None => root.join(CONFIG_FILE),
    };
    tracing::debug!(root = %root.display(), config = %file.display(), "loading settings");

    let mut settings: Settings = layered(&file, root_flag)
        .extract()
        .with_context(|| format!("Invalid configuration in {}", file.display()))?;
    if settings.root.is_none() {
        settings.root = Some(root);
    }
    Ok(settings)
}

fn layered(file: &Path, root_flag: Option<&Path>) -> Figment {
    let mut figment = Figment::from(Serialized::defaults(Settings::default()))
        .merge(Toml::file(file))
        .merge(Env::prefixed(ENV_PREFIX).ignore(&[VERSION_KEY]));
    let version_var = format!("{ENV_PREFIX}{}", VERSION_KEY.to_ascii_uppercase());
    if let Ok(version) = std::env::var(version_var) {
        figment = figment.merge(Serialized::default(VERSION_KEY, version));
    }
    figment.merge(Serialized::defaults(Flags {
        root: root_flag.map(Path::to_path_buf),
    }))
}
