use thiserror::Error;

/// Failure kinds raised while resolving and installing an SDK descriptor.
///
/// `RuntimeInstallFailed` and `VersionUnparsable` are reported as warnings by
/// the install flow and never abort a run; every other kind is fatal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SetupError {
    #[error(
        "version '{input}' was supplied in invalid format; supported syntax: A.B.C, A.B, A.B.x, A, A.x, A.B.Cxx"
    )]
    InvalidVersionSyntax { input: String },

    #[error(
        "version '{input}' uses A.B.Cxx syntax, which is available since the .NET 5.0 release"
    )]
    UnsupportedLegacyMajor { input: String },

    #[error("could not find a release channel with major tag '{major}' at {url}")]
    ChannelNotFound { major: String, url: String },

    #[error("failed to fetch release index from {url}: {reason}")]
    NetworkError { url: String, reason: String },

    #[error("architecture '{requested}' is not supported on {platform} ({host_arch})")]
    UnsupportedArchitecture {
        requested: String,
        platform: String,
        host_arch: String,
    },

    #[error(
        "installing x64 SDKs on Apple silicon requires Rosetta 2; run `softwareupdate --install-rosetta --agree-to-license` and retry"
    )]
    EmulationLayerMissing,

    #[error("failed to install dotnet runtime, exit code: {exit_code}. {stderr}")]
    RuntimeInstallFailed { exit_code: i32, stderr: String },

    #[error("failed to install dotnet, exit code: {exit_code}. {stderr}")]
    SdkInstallFailed { exit_code: i32, stderr: String },

    #[error("failed to parse the .NET version installed by the script")]
    VersionUnparsable,

    #[error(
        "value '{value}' is not supported for quality; supported values are: daily, signed, validated, preview, ga"
    )]
    InvalidQuality { value: String },

    #[error("invalid global.json at {path}: {reason}")]
    InvalidGlobalJson { path: String, reason: String },
}

pub type SetupResult<T> = Result<T, SetupError>;
