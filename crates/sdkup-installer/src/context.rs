use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use sdkup_core::{HostPlatform, PlatformFamily};

use crate::install_dir::resolve_install_dir;

pub const INSTALL_SCRIPT_ENV: &str = "SDKUP_INSTALL_SCRIPT";

/// Process-wide settings resolved once before any descriptor is processed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetupContext {
    pub host: HostPlatform,
    pub install_dir: PathBuf,
    pub script_path: PathBuf,
    /// PowerShell host used to run the script on Windows.
    pub powershell: PathBuf,
    pub proxy_address: Option<String>,
    pub proxy_bypass_list: Option<String>,
}

impl SetupContext {
    pub fn from_env(script_override: Option<&Path>) -> Result<Self> {
        let host = HostPlatform::current();
        let install_dir = resolve_install_dir(host.family)?;
        let script_path = match script_override {
            Some(path) => path.to_path_buf(),
            None => default_script_path(host.family)?,
        };
        Ok(Self {
            install_dir,
            script_path,
            powershell: resolve_powershell(),
            proxy_address: non_empty_env("https_proxy"),
            proxy_bypass_list: non_empty_env("no_proxy"),
            host,
        })
    }

    pub fn family(&self) -> PlatformFamily {
        self.host.family
    }

    /// The bash script is invoked directly, so it must carry execute bits.
    pub fn prepare_script(&self) -> Result<()> {
        if !self.script_path.is_file() {
            return Err(anyhow!(
                "install script not found: {}; set {INSTALL_SCRIPT_ENV} or pass --install-script",
                self.script_path.display()
            ));
        }
        if self.family() == PlatformFamily::Windows {
            return Ok(());
        }

        #[cfg(unix)]
        {
            use std::fs;
            use std::os::unix::fs::PermissionsExt;

            let mut permissions = fs::metadata(&self.script_path)
                .with_context(|| format!("failed to stat {}", self.script_path.display()))?
                .permissions();
            permissions.set_mode(0o777);
            fs::set_permissions(&self.script_path, permissions).with_context(|| {
                format!(
                    "failed to set executable mode on {}",
                    self.script_path.display()
                )
            })?;
        }

        Ok(())
    }
}

pub fn default_script_path(family: PlatformFamily) -> Result<PathBuf> {
    if let Some(path) = non_empty_env(INSTALL_SCRIPT_ENV) {
        return Ok(PathBuf::from(path));
    }

    let exe = std::env::current_exe().context("failed to locate the sdkup executable")?;
    let exe_dir = exe
        .parent()
        .ok_or_else(|| anyhow!("sdkup executable has no parent directory"))?;
    let script_name = match family {
        PlatformFamily::Windows => "install-dotnet.ps1",
        PlatformFamily::MacOs | PlatformFamily::Linux => "install-dotnet.sh",
    };
    Ok(exe_dir.join("externals").join(script_name))
}

fn resolve_powershell() -> PathBuf {
    which::which("pwsh")
        .or_else(|_| which::which("powershell"))
        .unwrap_or_else(|_| PathBuf::from("powershell"))
}

fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .filter(|value| !value.trim().is_empty())
}
