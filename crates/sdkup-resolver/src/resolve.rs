use sdkup_core::{ResolvedDirective, SetupError, SetupResult};
use tracing::debug;

use crate::syntax::{exact_version, is_latest_patch_syntax, is_numeric_tag, is_valid_range};

pub const LTS_CHANNEL: &str = "LTS";

const QUALITY_MINIMAL_MAJOR: u64 = 6;

/// Turns version text into an install directive.
///
/// `lookup_channel` maps a bare major tag such as `"8"` to the channel the
/// release index lists for it; it is only called for major-only input.
pub fn resolve_version<F>(input: &str, mut lookup_channel: F) -> SetupResult<ResolvedDirective>
where
    F: FnMut(&str) -> SetupResult<String>,
{
    let input = input.trim();
    if input.is_empty() {
        return Ok(ResolvedDirective::none());
    }

    let latest_patch = is_latest_patch_syntax(input)?;
    if !latest_patch {
        if let Some(version) = exact_version(input) {
            debug!(input, version, "resolved exact version");
            return Ok(ResolvedDirective::exact(version));
        }
        if !is_valid_range(input) {
            return Err(SetupError::InvalidVersionSyntax {
                input: input.to_string(),
            });
        }
    }

    let mut parts = input.split('.');
    let major = parts.next().unwrap_or_default();
    let minor = parts.next().unwrap_or_default();

    let channel = if latest_patch {
        input.to_string()
    } else if is_numeric_tag(major) && is_numeric_tag(minor) {
        format!("{major}.{minor}")
    } else if is_numeric_tag(major) {
        lookup_channel(major)?
    } else {
        LTS_CHANNEL.to_string()
    };

    // a non-numeric major (the LTS fallback, operator prefixes) never allows quality
    let quality_allowed = major
        .parse::<u64>()
        .is_ok_and(|major| major >= QUALITY_MINIMAL_MAJOR);

    debug!(input, channel = %channel, quality_allowed, "resolved channel");
    Ok(ResolvedDirective::channel(channel, quality_allowed))
}
