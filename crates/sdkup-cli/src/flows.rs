use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use sdkup_core::{
    normalize_architecture, PlatformFamily, QualityTier, SetupResult, VersionDescriptor,
};
use sdkup_installer::{
    build_environment_exports, install_sdk, plan_install, probe_rosetta, render_exports,
    resolve_install_dir, select_reported_version, EnvironmentExports, InstalledSdk, ReportedVersion,
    ScriptRunner, SetupContext, ShellKind,
};
use sdkup_registry::ReleaseIndexClient;
use serde::Serialize;
use tracing::info;

use crate::global_json::read_global_json_version;
use crate::render::{
    format_install_report_lines, format_plan_lines, OutputStyle, SpinnerRunner, TerminalRenderer,
};
use crate::{CliShell, InstallArgs};

const GLOBAL_JSON_FILE: &str = "global.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct VersionInputs {
    pub(crate) versions: Vec<String>,
    pub(crate) from_global_json: bool,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub(crate) struct InstallReport {
    pub(crate) installed: Vec<InstalledSdk>,
    pub(crate) reported_version: ReportedVersion,
    pub(crate) exports: Option<EnvironmentExports>,
}

impl From<CliShell> for ShellKind {
    fn from(value: CliShell) -> Self {
        match value {
            CliShell::Posix => ShellKind::Posix,
            CliShell::Powershell => ShellKind::PowerShell,
        }
    }
}

/// Positional versions plus `--global-json-file`; with neither, falls back
/// to a global.json in `cwd`.
pub(crate) fn collect_version_inputs(args: &InstallArgs, cwd: &Path) -> Result<VersionInputs> {
    let mut versions = args.versions.clone();
    let mut from_global_json = false;

    if let Some(path) = &args.global_json_file {
        versions.push(read_global_json_version(&cwd.join(path))?);
        from_global_json = true;
    }

    if versions.is_empty() {
        let fallback = cwd.join(GLOBAL_JSON_FILE);
        if fallback.is_file() {
            versions.push(read_global_json_version(&fallback)?);
        } else {
            info!(
                "no global.json in {}; no .NET version will be installed",
                cwd.display()
            );
        }
    }

    Ok(VersionInputs {
        versions,
        from_global_json,
    })
}

/// `VERSION@ARCH` overrides the run-wide architecture for one entry.
pub(crate) fn parse_version_argument(
    argument: &str,
    default_architecture: Option<&str>,
    quality: Option<QualityTier>,
) -> VersionDescriptor {
    let (version, architecture) = match argument.split_once('@') {
        Some((version, architecture)) => (version, Some(architecture)),
        None => (argument, default_architecture),
    };
    VersionDescriptor::new(version.trim())
        .with_architecture(architecture)
        .with_quality(quality)
}

/// Builds descriptors in input order, installing each distinct request once.
pub(crate) fn build_descriptors(
    versions: &[String],
    default_architecture: Option<&str>,
    quality: Option<QualityTier>,
) -> Vec<VersionDescriptor> {
    let mut seen = HashSet::new();
    versions
        .iter()
        .map(|argument| parse_version_argument(argument, default_architecture, quality))
        .filter(|descriptor| seen.insert(descriptor.clone()))
        .collect()
}

pub(crate) fn install_all<F, P, R>(
    ctx: &SetupContext,
    descriptors: &[VersionDescriptor],
    prefer_last: bool,
    mut lookup_channel: F,
    emulation_probe: P,
    runner: &mut R,
) -> Result<InstallReport>
where
    F: FnMut(&str) -> SetupResult<String>,
    P: Fn() -> bool,
    R: ScriptRunner + ?Sized,
{
    let mut installed = Vec::new();
    for descriptor in descriptors {
        let outcome = install_sdk(
            ctx,
            descriptor,
            &mut lookup_channel,
            &emulation_probe,
            runner,
        )
        .with_context(|| {
            format!("failed to install .NET SDK '{}'", descriptor.version_text)
        })?;
        if let Some(sdk) = outcome {
            installed.push(sdk);
        }
    }

    let versions = installed
        .iter()
        .map(|sdk| sdk.version.clone())
        .collect::<Vec<_>>();
    let reported_version = select_reported_version(&versions, prefer_last);

    let exports = (!installed.is_empty()).then(|| {
        let arches = installed
            .iter()
            .map(|sdk| sdk.architecture.clone())
            .collect::<Vec<_>>();
        build_environment_exports(&ctx.install_dir, &arches)
    });

    Ok(InstallReport {
        installed,
        reported_version,
        exports,
    })
}

pub(crate) fn run_install_command(args: &InstallArgs, style: OutputStyle) -> Result<()> {
    let renderer = TerminalRenderer::from_style(style);
    let cwd = std::env::current_dir().context("failed to read current directory")?;
    let inputs = collect_version_inputs(args, &cwd)?;
    let descriptors = build_descriptors(
        &inputs.versions,
        args.architecture.as_deref(),
        args.quality,
    );
    if descriptors.is_empty() {
        renderer.print_status("info", "no .NET version requested; nothing to install");
        return Ok(());
    }

    let ctx = SetupContext::from_env(args.install_script.as_deref())?;
    let client = ReleaseIndexClient::from_env(args.releases_index_url.as_deref())?;
    info!(
        install_dir = %ctx.install_dir.display(),
        script = %ctx.script_path.display(),
        "resolved setup context"
    );

    if args.dry_run {
        for descriptor in &descriptors {
            let plan = plan_install(
                &ctx,
                descriptor,
                |major| client.channel_for_major(major),
                probe_rosetta,
            )?;
            renderer.print_section(&format!("plan {}", descriptor.version_text));
            match plan {
                Some(plan) => renderer.print_lines(&format_plan_lines(&plan)),
                None => renderer.print_status("info", "empty version; nothing to install"),
            }
        }
        return Ok(());
    }

    ctx.prepare_script()?;
    let mut runner = SpinnerRunner::new(style);
    let report = install_all(
        &ctx,
        &descriptors,
        inputs.from_global_json,
        |major| client.channel_for_major(major),
        probe_rosetta,
        &mut runner,
    )?;

    if args.json {
        let rendered =
            serde_json::to_string_pretty(&report).context("failed to serialize install report")?;
        println!("{rendered}");
        return Ok(());
    }

    for (status, message) in format_install_report_lines(&report) {
        renderer.print_status(status, &message);
    }
    if let Some(exports) = &report.exports {
        for line in render_exports(exports, args.shell.into()) {
            println!("{line}");
        }
    }
    Ok(())
}

pub(crate) fn run_resolve_command(
    version: &str,
    quality: Option<QualityTier>,
    architecture: Option<&str>,
    platform: Option<PlatformFamily>,
    releases_index_url: Option<&str>,
    style: OutputStyle,
) -> Result<()> {
    let renderer = TerminalRenderer::from_style(style);
    let mut ctx = SetupContext::from_env(None)?;
    if let Some(family) = platform {
        ctx.host.family = family;
    }
    let client = ReleaseIndexClient::from_env(releases_index_url)?;
    let descriptor = parse_version_argument(version, architecture, quality);

    let plan = plan_install(
        &ctx,
        &descriptor,
        |major| client.channel_for_major(major),
        probe_rosetta,
    )?;
    match plan {
        Some(plan) => renderer.print_lines(&format_plan_lines(&plan)),
        None => renderer.print_status("info", "empty version; nothing to install"),
    }
    Ok(())
}

pub(crate) fn run_env_command(architectures: &[String], shell: CliShell) -> Result<()> {
    let install_dir = resolve_install_dir(PlatformFamily::current())?;
    let arches = architectures
        .iter()
        .filter_map(|arch| normalize_architecture(Some(arch)))
        .collect::<Vec<_>>();
    let exports = build_environment_exports(&install_dir, &arches);
    for line in render_exports(&exports, shell.into()) {
        println!("{line}");
    }
    Ok(())
}
