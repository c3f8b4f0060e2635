//! Operating system and distribution detection.

use std::fmt;

use once_cell::sync::Lazy;
use sysinfo::System;

/// Platforms the front-end knows how to dispatch on.
///
/// Every platform-specific decision matches on this enum exhaustively, so a
/// new variant fails to compile instead of falling through silently.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Windows,
    Macos,
    Linux(Distro),
    Other,
}

/// Linux distribution types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Distro {
    Debian,
    Ubuntu,
    LinuxMint,
    PopOs,
    KaliLinux,
    Fedora,
    ArchLinux,
    Manjaro,
    OpenSUSE,
    AlpineLinux,
    Unknown,
}

impl Distro {
    /// Map an os-release `ID` value.
    pub fn from_id(id: &str) -> Self {
        match id.trim().trim_matches('"').to_ascii_lowercase().as_str() {
            "debian" => Distro::Debian,
            "ubuntu" => Distro::Ubuntu,
            "linuxmint" => Distro::LinuxMint,
            "pop" => Distro::PopOs,
            "kali" => Distro::KaliLinux,
            "fedora" => Distro::Fedora,
            "arch" => Distro::ArchLinux,
            "manjaro" => Distro::Manjaro,
            "opensuse" | "opensuse-leap" | "opensuse-tumbleweed" => Distro::OpenSUSE,
            "alpine" => Distro::AlpineLinux,
            _ => Distro::Unknown,
        }
    }

    /// Whether the distribution ships `apt-get`.
    pub fn uses_apt(self) -> bool {
        matches!(
            self,
            Distro::Debian | Distro::Ubuntu | Distro::LinuxMint | Distro::PopOs | Distro::KaliLinux
        )
    }
}

impl Platform {
    /// Build a platform from a `std::env::consts::OS` style tag.
    pub fn from_os_tag(tag: &str, distro: Distro) -> Self {
        match tag {
            "windows" => Platform::Windows,
            "macos" => Platform::Macos,
            "linux" => Platform::Linux(distro),
            _ => Platform::Other,
        }
    }

    pub fn tag(self) -> &'static str {
        match self {
            Platform::Windows => "windows",
            Platform::Macos => "macos",
            Platform::Linux(_) => "linux",
            Platform::Other => "other",
        }
    }

    /// Executable file name for `base` on this platform.
    pub fn exe_name(self, base: &str) -> String {
        match self {
            Platform::Windows => format!("{base}.exe"),
            Platform::Macos | Platform::Linux(_) | Platform::Other => base.to_string(),
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Platform::Linux(Distro::Unknown) => f.write_str("linux"),
            Platform::Linux(distro) => write!(f, "linux ({distro:?})"),
            other => f.write_str(other.tag()),
        }
    }
}

static PLATFORM: Lazy<Platform> = Lazy::new(|| {
    let distro = if cfg!(target_os = "linux") {
        Distro::from_id(&System::distribution_id())
    } else {
        Distro::Unknown
    };
    let platform = Platform::from_os_tag(std::env::consts::OS, distro);
    tracing::debug!(
        %platform,
        os = System::long_os_version().unwrap_or_default(),
        "detected platform"
    );
    platform
});

/// Detect the current platform.
pub fn detect() -> Platform {
    *PLATFORM
}
