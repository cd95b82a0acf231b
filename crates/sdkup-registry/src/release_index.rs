use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ReleaseIndexEntry {
    #[serde(rename = "channel-version")]
    pub channel_version: String,
}

/// The subset of `releases-index.json` the resolver consumes.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ReleaseIndex {
    #[serde(rename = "releases-index", default)]
    pub releases_index: Vec<ReleaseIndexEntry>,
}

impl ReleaseIndex {
    pub fn from_json_str(input: &str) -> serde_json::Result<Self> {
        serde_json::from_str(input)
    }

    /// First channel whose leading dot-separated component equals `major`.
    pub fn channel_for_major(&self, major: &str) -> Option<&str> {
        self.releases_index
            .iter()
            .find(|entry| entry.channel_version.split('.').next() == Some(major))
            .map(|entry| entry.channel_version.as_str())
    }
}
