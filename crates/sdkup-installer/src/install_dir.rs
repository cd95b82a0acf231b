use std::path::{Component, Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use sdkup_core::PlatformFamily;

pub const INSTALL_DIR_ENV: &str = "DOTNET_INSTALL_DIR";

const LINUX_INSTALL_DIR: &str = "/usr/share/dotnet";

pub fn resolve_install_dir(family: PlatformFamily) -> Result<PathBuf> {
    let Some(value) = std::env::var(INSTALL_DIR_ENV)
        .ok()
        .filter(|value| !value.trim().is_empty())
    else {
        return default_install_dir(family);
    };

    let cwd = std::env::current_dir().context("failed to read current directory")?;
    let home = home_dir();
    install_dir_from_override(&value, &cwd, home.as_deref())
}

/// Absolute paths are normalized, `~` expands to `home`, anything else is
/// taken relative to `cwd`.
pub fn install_dir_from_override(value: &str, cwd: &Path, home: Option<&Path>) -> Result<PathBuf> {
    let value = value.trim();
    let raw = Path::new(value);
    if raw.is_absolute() {
        return Ok(normalize_path(raw));
    }

    let joined = match value.strip_prefix('~') {
        Some(rest) => {
            let home = home.ok_or_else(|| {
                anyhow!("cannot expand '~' in {INSTALL_DIR_ENV}: home directory is not set")
            })?;
            home.join(rest.trim_start_matches(['/', '\\']))
        }
        None => cwd.join(raw),
    };
    Ok(normalize_path(&joined))
}

pub fn default_install_dir(family: PlatformFamily) -> Result<PathBuf> {
    default_install_dir_with(family, |key| std::env::var(key).ok())
}

pub fn default_install_dir_with<F>(family: PlatformFamily, lookup: F) -> Result<PathBuf>
where
    F: Fn(&str) -> Option<String>,
{
    match family {
        PlatformFamily::Linux => Ok(PathBuf::from(LINUX_INSTALL_DIR)),
        PlatformFamily::MacOs => {
            let home =
                lookup("HOME").context("HOME is not set; cannot resolve macOS install dir")?;
            Ok(PathBuf::from(home).join(".dotnet"))
        }
        PlatformFamily::Windows => {
            let program_files = lookup("PROGRAMFILES")
                .context("PROGRAMFILES is not set; cannot resolve Windows install dir")?;
            Ok(PathBuf::from(program_files).join("dotnet"))
        }
    }
}

fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}

fn normalize_path(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if matches!(
                    normalized.components().next_back(),
                    Some(Component::Normal(_))
                ) {
                    normalized.pop();
                } else if !normalized.has_root() {
                    normalized.push(component);
                }
            }
            other => normalized.push(other),
        }
    }
    normalized
}
