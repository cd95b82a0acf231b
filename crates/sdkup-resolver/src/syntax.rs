use std::sync::LazyLock;

use regex::Regex;
use sdkup_core::{SetupError, SetupResult};
use semver::{Version, VersionReq};

const LATEST_PATCH_MINIMAL_MAJOR: u64 = 5;

static LATEST_PATCH_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<major>[0-9]+)\.[0-9]+\.[0-9]xx$").expect("latest patch regex compiles")
});

/// Matches `A.B.Cxx`. The syntax only exists from major 5 onward, so an
/// older major is an error rather than a mismatch.
pub fn is_latest_patch_syntax(input: &str) -> SetupResult<bool> {
    let Some(captures) = LATEST_PATCH_RE.captures(input) else {
        return Ok(false);
    };

    let legacy = captures["major"]
        .parse::<u64>()
        .is_ok_and(|major| major < LATEST_PATCH_MINIMAL_MAJOR);
    if legacy {
        return Err(SetupError::UnsupportedLegacyMajor {
            input: input.to_string(),
        });
    }
    Ok(true)
}

/// Accepts `||` alternatives, each a comparator set (`,` or whitespace
/// separated), a hyphen range `A - B`, or an exact version.
pub fn is_valid_range(input: &str) -> bool {
    input.split("||").all(|alternative| {
        let alternative = alternative.trim();
        if alternative.is_empty() {
            return false;
        }
        if let Some((low, high)) = alternative.split_once(" - ") {
            return is_range_bound(low) && is_range_bound(high);
        }
        is_comparator_set(alternative)
            || is_comparator_set(&alternative.split_whitespace().collect::<Vec<_>>().join(", "))
    })
}

/// An exact version, allowing one leading `=` or `v`.
pub fn exact_version(input: &str) -> Option<&str> {
    let cleaned = input
        .strip_prefix('=')
        .or_else(|| input.strip_prefix('v'))
        .unwrap_or(input)
        .trim();
    Version::parse(cleaned).is_ok().then_some(cleaned)
}

fn is_comparator_set(text: &str) -> bool {
    VersionReq::parse(text).is_ok() || exact_version(text).is_some()
}

fn is_range_bound(bound: &str) -> bool {
    let bound = bound.trim();
    !bound.is_empty()
        && !bound.starts_with(['<', '>', '=', '^', '~'])
        && is_comparator_set(bound)
}

pub fn is_numeric_tag(tag: &str) -> bool {
    !tag.is_empty() && tag.bytes().all(|b| b.is_ascii_digit())
}
