use std::fmt;
use std::str::FromStr;

use serde::Serialize;

pub const ARCH_X64: &str = "x64";
pub const ARCH_ARM64: &str = "arm64";

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum PlatformFamily {
    Windows,
    MacOs,
    Linux,
}

impl PlatformFamily {
    pub fn current() -> Self {
        if cfg!(windows) {
            Self::Windows
        } else if cfg!(target_os = "macos") {
            Self::MacOs
        } else {
            Self::Linux
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Windows => "windows",
            Self::MacOs => "macos",
            Self::Linux => "linux",
        }
    }
}

impl FromStr for PlatformFamily {
    type Err = String;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match input.trim().to_ascii_lowercase().as_str() {
            "windows" | "win32" => Ok(Self::Windows),
            "macos" | "darwin" | "mac" => Ok(Self::MacOs),
            "linux" => Ok(Self::Linux),
            other => Err(format!(
                "unsupported platform '{other}'; supported: windows, macos, linux"
            )),
        }
    }
}

impl fmt::Display for PlatformFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Operating system family and native processor architecture of the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostPlatform {
    pub family: PlatformFamily,
    pub arch: String,
}

impl HostPlatform {
    pub fn new(family: PlatformFamily, arch: impl Into<String>) -> Self {
        Self {
            family,
            arch: arch.into(),
        }
    }

    pub fn current() -> Self {
        Self::new(
            PlatformFamily::current(),
            host_arch_name(std::env::consts::ARCH),
        )
    }

    pub fn is_apple_arm(&self) -> bool {
        self.family == PlatformFamily::MacOs && self.arch == ARCH_ARM64
    }
}

/// Maps a Rust target architecture to the name the install script expects.
pub fn host_arch_name(rust_arch: &str) -> String {
    match rust_arch {
        "x86_64" => ARCH_X64.to_string(),
        "aarch64" => ARCH_ARM64.to_string(),
        "x86" => "x86".to_string(),
        "arm" => "arm".to_string(),
        other => other.to_string(),
    }
}
