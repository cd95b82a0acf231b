use std::process::{Command, Stdio};

use sdkup_core::{HostPlatform, PlatformFamily, SetupError, SetupResult, ARCH_ARM64, ARCH_X64};
use tracing::debug;

const CROSS_INSTALLABLE_ARCHES: [&str; 2] = [ARCH_X64, ARCH_ARM64];
const ROSETTA_DAEMON: &str = "oahd";

/// Windows and macOS hosts can install either 64-bit architecture; other
/// hosts only their native one.
pub fn is_arch_supported(requested: &str, host: &HostPlatform) -> bool {
    match host.family {
        PlatformFamily::MacOs | PlatformFamily::Windows => {
            CROSS_INSTALLABLE_ARCHES.contains(&requested)
        }
        PlatformFamily::Linux => requested == host.arch,
    }
}

/// Only Apple-ARM hosts have an emulation layer to probe; a failed probe
/// counts as inactive.
pub fn is_emulation_layer_active<P>(host: &HostPlatform, probe: P) -> bool
where
    P: FnOnce() -> bool,
{
    host.is_apple_arm() && probe()
}

/// Checks whether the Rosetta 2 translation daemon is running.
pub fn probe_rosetta() -> bool {
    match Command::new("pgrep")
        .arg(ROSETTA_DAEMON)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
    {
        Ok(status) => status.success(),
        Err(err) => {
            debug!(error = %err, "rosetta probe could not run");
            false
        }
    }
}

pub fn ensure_architecture_installable<P>(
    requested: &str,
    host: &HostPlatform,
    probe: P,
) -> SetupResult<()>
where
    P: FnOnce() -> bool,
{
    if !is_arch_supported(requested, host) {
        return Err(SetupError::UnsupportedArchitecture {
            requested: requested.to_string(),
            platform: host.family.to_string(),
            host_arch: host.arch.clone(),
        });
    }

    if requested == ARCH_X64 && host.is_apple_arm() && !is_emulation_layer_active(host, probe) {
        return Err(SetupError::EmulationLayerMissing);
    }

    Ok(())
}

/// The architecture an install actually targets: the requested one, else the host's.
pub fn effective_architecture(requested: Option<&str>, host: &HostPlatform) -> String {
    requested.unwrap_or(&host.arch).to_string()
}
