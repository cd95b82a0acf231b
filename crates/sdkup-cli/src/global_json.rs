use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use sdkup_core::SetupError;
use serde::Deserialize;

const LATEST_FEATURE: &str = "latestFeature";

#[derive(Debug, Deserialize)]
struct GlobalJson {
    sdk: Option<GlobalJsonSdk>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GlobalJsonSdk {
    version: Option<String>,
    roll_forward: Option<String>,
}

pub(crate) fn read_global_json_version(path: &Path) -> Result<String> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read global.json: {}", path.display()))?;
    Ok(parse_global_json_version(
        &content,
        &path.display().to_string(),
    )?)
}

/// Returns `sdk.version`, cut to `major.minor` under the `latestFeature`
/// roll-forward policy; empty when the file pins no SDK.
pub(crate) fn parse_global_json_version(content: &str, origin: &str) -> Result<String, SetupError> {
    let content = content.trim_start_matches('\u{feff}');
    let global_json: GlobalJson =
        serde_json::from_str(content).map_err(|err| SetupError::InvalidGlobalJson {
            path: origin.to_string(),
            reason: err.to_string(),
        })?;

    let Some(sdk) = global_json.sdk else {
        return Ok(String::new());
    };
    let Some(version) = sdk.version else {
        return Ok(String::new());
    };

    if sdk.roll_forward.as_deref() == Some(LATEST_FEATURE) {
        let mut parts = version.split('.');
        let major = parts.next().unwrap_or_default();
        let minor = parts.next().unwrap_or_default();
        return Ok(format!("{major}.{minor}"));
    }
    Ok(version)
}
