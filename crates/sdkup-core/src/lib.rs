mod descriptor;
mod directive;
mod error;
mod platform;
mod quality;

pub use descriptor::{normalize_architecture, VersionDescriptor};
pub use directive::{DirectiveKind, ResolvedDirective};
pub use error::{SetupError, SetupResult};
pub use platform::{host_arch_name, HostPlatform, PlatformFamily, ARCH_ARM64, ARCH_X64};
pub use quality::QualityTier;

#[cfg(test)]
mod tests;
