use serde::Serialize;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum DirectiveKind {
    None,
    ExactVersion,
    Channel,
}

impl DirectiveKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::ExactVersion => "version",
            Self::Channel => "channel",
        }
    }
}

/// Platform-agnostic install directive derived from one version descriptor.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ResolvedDirective {
    pub kind: DirectiveKind,
    pub value: String,
    pub quality_allowed: bool,
}

impl ResolvedDirective {
    pub fn none() -> Self {
        Self {
            kind: DirectiveKind::None,
            value: String::new(),
            quality_allowed: false,
        }
    }

    pub fn exact(version: impl Into<String>) -> Self {
        Self {
            kind: DirectiveKind::ExactVersion,
            value: version.into(),
            quality_allowed: false,
        }
    }

    pub fn channel(channel: impl Into<String>, quality_allowed: bool) -> Self {
        Self {
            kind: DirectiveKind::Channel,
            value: channel.into(),
            quality_allowed,
        }
    }

    pub fn is_none(&self) -> bool {
        self.kind == DirectiveKind::None
    }
}
