use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SetupError;

/// Pre-release stability filter accepted by the install script.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum QualityTier {
    Daily,
    Signed,
    Validated,
    Preview,
    Ga,
}

impl QualityTier {
    pub const ALL: [QualityTier; 5] = [
        Self::Daily,
        Self::Signed,
        Self::Validated,
        Self::Preview,
        Self::Ga,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Signed => "signed",
            Self::Validated => "validated",
            Self::Preview => "preview",
            Self::Ga => "ga",
        }
    }
}

impl FromStr for QualityTier {
    type Err = SetupError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|tier| tier.as_str() == input)
            .ok_or_else(|| SetupError::InvalidQuality {
                value: input.to_string(),
            })
    }
}

impl fmt::Display for QualityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
