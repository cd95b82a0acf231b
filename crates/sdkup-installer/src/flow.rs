use anyhow::{Context, Result};
use sdkup_core::{ResolvedDirective, SetupError, SetupResult, VersionDescriptor};
use sdkup_resolver::{resolve_version, LTS_CHANNEL};
use serde::Serialize;
use tracing::{debug, info};

use crate::context::SetupContext;
use crate::platform::{effective_architecture, ensure_architecture_installable};
use crate::runner::ScriptRunner;
use crate::script::{quality_ignored_warning, InstallScript, ScriptInvocation};
use crate::version_output::parse_installed_version;

const RUNTIME_COMPONENT: &str = "dotnet";

/// Both installer invocations for one descriptor, in execution order.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct InstallPlan {
    pub directive: ResolvedDirective,
    pub architecture: String,
    pub runtime: ScriptInvocation,
    pub sdk: ScriptInvocation,
    pub warnings: Vec<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct InstalledSdk {
    pub descriptor: VersionDescriptor,
    pub directive: ResolvedDirective,
    pub architecture: String,
    pub version: Option<String>,
    pub warnings: Vec<String>,
}

/// Validates the architecture, resolves the version and builds both
/// invocations. Returns `None` when the descriptor requests nothing.
pub fn plan_install<F, P>(
    ctx: &SetupContext,
    descriptor: &VersionDescriptor,
    lookup_channel: F,
    emulation_probe: P,
) -> Result<Option<InstallPlan>>
where
    F: FnMut(&str) -> SetupResult<String>,
    P: FnOnce() -> bool,
{
    let architecture = descriptor.architecture.as_deref();
    if let Some(requested) = architecture {
        ensure_architecture_installable(requested, &ctx.host, emulation_probe)?;
    }

    let directive = resolve_version(&descriptor.version_text, lookup_channel)?;
    if directive.is_none() {
        info!("empty version requested; nothing to install");
        return Ok(None);
    }

    let mut warnings = Vec::new();
    if let Some(message) = quality_ignored_warning(&directive, descriptor.quality) {
        warnings.push(message);
    }

    let runtime = InstallScript::new(ctx)
        .use_skip_non_versioned_files()
        .use_runtime(RUNTIME_COMPONENT)
        .use_channel(LTS_CHANNEL)
        .use_install_dir(&ctx.install_dir)
        .use_architecture(architecture)
        .into_invocation();

    let sdk = InstallScript::new(ctx)
        .use_skip_non_versioned_files()
        .use_version(&directive, descriptor.quality)
        .use_install_dir(&ctx.install_dir)
        .use_architecture(architecture)
        .into_invocation();

    Ok(Some(InstallPlan {
        architecture: effective_architecture(architecture, &ctx.host),
        directive,
        runtime,
        sdk,
        warnings,
    }))
}

/// Installs the LTS runtime (best effort) and then the requested SDK.
pub fn install_sdk<F, P, R>(
    ctx: &SetupContext,
    descriptor: &VersionDescriptor,
    lookup_channel: F,
    emulation_probe: P,
    runner: &mut R,
) -> Result<Option<InstalledSdk>>
where
    F: FnMut(&str) -> SetupResult<String>,
    P: FnOnce() -> bool,
    R: ScriptRunner + ?Sized,
{
    let Some(plan) = plan_install(ctx, descriptor, lookup_channel, emulation_probe)? else {
        return Ok(None);
    };
    let InstallPlan {
        directive,
        architecture,
        runtime,
        sdk,
        mut warnings,
    } = plan;

    info!(
        version = %descriptor.version_text,
        directive = directive.kind.as_str(),
        value = %directive.value,
        architecture = %architecture,
        "installing runtime"
    );
    let runtime_output = runner
        .run(&runtime)
        .context("failed to run runtime install")?;
    if !runtime_output.success() {
        let err = SetupError::RuntimeInstallFailed {
            exit_code: runtime_output.exit_code,
            stderr: runtime_output.stderr.trim().to_string(),
        };
        debug!(error = %err, "runtime install failed; continuing with the sdk");
        warnings.push(err.to_string());
    }

    info!(value = %directive.value, "installing sdk");
    let sdk_output = runner.run(&sdk).context("failed to run sdk install")?;
    if !sdk_output.success() {
        return Err(SetupError::SdkInstallFailed {
            exit_code: sdk_output.exit_code,
            stderr: sdk_output.stderr.trim().to_string(),
        }
        .into());
    }

    let version = parse_installed_version(&sdk_output.stdout);
    if version.is_none() {
        warnings.push(SetupError::VersionUnparsable.to_string());
    }

    Ok(Some(InstalledSdk {
        descriptor: descriptor.clone(),
        directive,
        architecture,
        version,
        warnings,
    }))
}
