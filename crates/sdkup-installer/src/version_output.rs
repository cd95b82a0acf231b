use std::sync::LazyLock;

use regex::Regex;
use semver::Version;
use serde::Serialize;
use tracing::debug;

static INSTALLED_VERSION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?P<version>[0-9]+\.[0-9]+\.[0-9]+[a-z0-9._-]*)")
        .expect("installed version regex compiles")
});

/// Extracts the first version-shaped token the install script printed.
pub fn parse_installed_version(stdout: &str) -> Option<String> {
    let Some(captures) = INSTALLED_VERSION_RE.captures(stdout) else {
        debug!("failed to parse the .NET version installed by the script");
        return None;
    };
    Some(captures["version"].to_string())
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(tag = "status", content = "version", rename_all = "kebab-case")]
pub enum ReportedVersion {
    NothingInstalled,
    Unavailable,
    Version(String),
}

/// Picks the single SDK version to report for a run.
///
/// Any descriptor without a parsed version makes the output unavailable.
/// With `prefer_last` (versions sourced from global.json) the last install
/// wins; otherwise the highest semantic version, prereleases included.
pub fn select_reported_version(installed: &[Option<String>], prefer_last: bool) -> ReportedVersion {
    if installed.is_empty() {
        return ReportedVersion::NothingInstalled;
    }
    let Some(versions) = installed.iter().cloned().collect::<Option<Vec<String>>>() else {
        return ReportedVersion::Unavailable;
    };

    if prefer_last {
        return versions
            .last()
            .cloned()
            .map_or(ReportedVersion::Unavailable, ReportedVersion::Version);
    }

    let highest = versions
        .iter()
        .filter_map(|raw| Version::parse(raw).ok().map(|parsed| (parsed, raw)))
        .max_by(|(left, _), (right, _)| left.cmp(right))
        .map(|(_, raw)| raw.clone())
        .or_else(|| versions.last().cloned());

    highest.map_or(ReportedVersion::Unavailable, ReportedVersion::Version)
}
