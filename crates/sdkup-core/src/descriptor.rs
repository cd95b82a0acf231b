use serde::Serialize;

use crate::quality::QualityTier;

/// One requested SDK installation.
#[derive(Debug, Clone, Serialize, PartialEq, Eq, Hash)]
pub struct VersionDescriptor {
    pub version_text: String,
    pub architecture: Option<String>,
    pub quality: Option<QualityTier>,
}

impl VersionDescriptor {
    pub fn new(version_text: impl Into<String>) -> Self {
        Self {
            version_text: version_text.into(),
            architecture: None,
            quality: None,
        }
    }

    pub fn with_architecture(mut self, architecture: Option<&str>) -> Self {
        self.architecture = normalize_architecture(architecture);
        self
    }

    pub fn with_quality(mut self, quality: Option<QualityTier>) -> Self {
        self.quality = quality;
        self
    }
}

/// Trims and lowercases an architecture name; blank input means "not requested".
pub fn normalize_architecture(architecture: Option<&str>) -> Option<String> {
    let trimmed = architecture?.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(trimmed.to_ascii_lowercase())
}
