use std::ffi::OsString;
use std::path::{Path, PathBuf};

use sdkup_core::{
    normalize_architecture, DirectiveKind, PlatformFamily, QualityTier, ResolvedDirective,
};
use serde::Serialize;
use tracing::debug;

use crate::context::SetupContext;

/// One spelling of every flag the install script understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlagVocabulary {
    pub channel: &'static str,
    pub version: &'static str,
    pub quality: &'static str,
    pub architecture: &'static str,
    pub runtime: &'static str,
    pub install_dir: &'static str,
    pub skip_non_versioned_files: &'static str,
}

const POWERSHELL_FLAGS: FlagVocabulary = FlagVocabulary {
    channel: "-Channel",
    version: "-Version",
    quality: "-Quality",
    architecture: "-Architecture",
    runtime: "-Runtime",
    install_dir: "-InstallDir",
    skip_non_versioned_files: "-SkipNonVersionedFiles",
};

const BASH_FLAGS: FlagVocabulary = FlagVocabulary {
    channel: "--channel",
    version: "--version",
    quality: "--quality",
    architecture: "--architecture",
    runtime: "--runtime",
    install_dir: "--install-dir",
    skip_non_versioned_files: "--skip-non-versioned-files",
};

const POWERSHELL_PREFIX: [&str; 7] = [
    "-NoLogo",
    "-Sta",
    "-NoProfile",
    "-NonInteractive",
    "-ExecutionPolicy",
    "Unrestricted",
    "-Command",
];

impl FlagVocabulary {
    pub fn for_family(family: PlatformFamily) -> &'static FlagVocabulary {
        match family {
            PlatformFamily::Windows => &POWERSHELL_FLAGS,
            PlatformFamily::MacOs | PlatformFamily::Linux => &BASH_FLAGS,
        }
    }

    pub fn directive_flag(&self, kind: DirectiveKind) -> Option<&'static str> {
        match kind {
            DirectiveKind::None => None,
            DirectiveKind::ExactVersion => Some(self.version),
            DirectiveKind::Channel => Some(self.channel),
        }
    }
}

/// A fully built installer command line.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ScriptInvocation {
    pub program: PathBuf,
    pub args: Vec<String>,
}

impl ScriptInvocation {
    pub fn contains(&self, token: &str) -> bool {
        self.args.iter().any(|arg| arg == token)
    }

    /// Value following `flag`, if the flag is present.
    #[cfg(test)]
    pub(crate) fn flag_value(&self, flag: &str) -> Option<&str> {
        self.args
            .iter()
            .position(|arg| arg == flag)
            .and_then(|index| self.args.get(index + 1))
            .map(String::as_str)
    }

    pub fn display_command(&self) -> String {
        let mut parts = vec![self.program.display().to_string()];
        parts.extend(self.args.iter().cloned());
        parts.join(" ")
    }
}

/// Accumulates the argument vector for one install script invocation.
#[derive(Debug, Clone)]
pub struct InstallScript {
    flags: &'static FlagVocabulary,
    program: PathBuf,
    args: Vec<String>,
}

impl InstallScript {
    pub fn new(ctx: &SetupContext) -> Self {
        let flags = FlagVocabulary::for_family(ctx.family());
        if ctx.family() != PlatformFamily::Windows {
            return Self {
                flags,
                program: ctx.script_path.clone(),
                args: Vec::new(),
            };
        }

        let mut args: Vec<String> = POWERSHELL_PREFIX.iter().map(|v| v.to_string()).collect();
        args.push("&".to_string());
        args.push(format!(
            "'{}'",
            escape_ps_single_quote_path(&ctx.script_path)
        ));
        if let Some(proxy) = &ctx.proxy_address {
            args.push("-ProxyAddress".to_string());
            args.push(proxy.clone());
        }
        if let Some(bypass) = &ctx.proxy_bypass_list {
            args.push("-ProxyBypassList".to_string());
            args.push(bypass.clone());
        }
        Self {
            flags,
            program: ctx.powershell.clone(),
            args,
        }
    }

    pub fn flags(&self) -> &'static FlagVocabulary {
        self.flags
    }

    pub fn use_arguments<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn use_skip_non_versioned_files(self) -> Self {
        let flag = self.flags.skip_non_versioned_files;
        self.use_arguments([flag])
    }

    pub fn use_runtime(self, runtime: &str) -> Self {
        let flag = self.flags.runtime;
        self.use_arguments([flag, runtime])
    }

    pub fn use_channel(self, channel: &str) -> Self {
        let flag = self.flags.channel;
        self.use_arguments([flag, channel])
    }

    pub fn use_install_dir(self, install_dir: &Path) -> Self {
        let flag = self.flags.install_dir;
        self.use_arguments([flag.to_string(), install_dir.display().to_string()])
    }

    pub fn use_architecture(self, architecture: Option<&str>) -> Self {
        let Some(architecture) = normalize_architecture(architecture) else {
            return self;
        };
        let flag = self.flags.architecture;
        self.use_arguments([flag.to_string(), architecture])
    }

    /// Adds the directive's channel/version pair and, when the directive
    /// permits it, the quality filter. A disallowed quality is dropped; see
    /// [`quality_ignored_warning`] for the message callers surface.
    pub fn use_version(
        mut self,
        directive: &ResolvedDirective,
        quality: Option<QualityTier>,
    ) -> Self {
        if let Some(flag) = self.flags.directive_flag(directive.kind) {
            self.args.push(flag.to_string());
            self.args.push(directive.value.clone());
        }

        let Some(quality) = quality else {
            return self;
        };
        if let Some(message) = quality_ignored_warning(directive, Some(quality)) {
            debug!(%quality, "{message}");
            return self;
        }
        let flag = self.flags.quality;
        self.use_arguments([flag, quality.as_str()])
    }

    pub fn into_invocation(self) -> ScriptInvocation {
        ScriptInvocation {
            program: self.program,
            args: self.args,
        }
    }
}

pub fn quality_ignored_warning(
    directive: &ResolvedDirective,
    quality: Option<QualityTier>,
) -> Option<String> {
    let quality = quality?;
    if directive.quality_allowed {
        return None;
    }
    Some(format!(
        "quality '{quality}' can be used only with SDK versions in A.B, A.B.x, A, A.x and A.B.Cxx formats where the major tag is 6 or higher; '{}' was requested, so the quality is ignored",
        directive.value
    ))
}

fn escape_ps_single_quote_path(path: &Path) -> String {
    let mut os = OsString::new();
    os.push(path.as_os_str());
    os.to_string_lossy().replace('\'', "''")
}
