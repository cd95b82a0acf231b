use std::str::FromStr;

use super::*;

#[test]
fn quality_tier_parses_every_supported_value() {
    for tier in QualityTier::ALL {
        let parsed = QualityTier::from_str(tier.as_str()).expect("known quality must parse");
        assert_eq!(parsed, tier);
    }
}

#[test]
fn quality_tier_rejects_unknown_value() {
    let err = QualityTier::from_str("nightly").expect_err("unknown quality must fail");
    assert_eq!(
        err,
        SetupError::InvalidQuality {
            value: "nightly".to_string()
        }
    );
    assert!(err.to_string().contains("daily, signed, validated, preview, ga"));
}

#[test]
fn quality_tier_is_case_sensitive() {
    assert!(QualityTier::from_str("GA").is_err());
}

#[test]
fn normalize_architecture_lowercases_and_trims() {
    assert_eq!(
        normalize_architecture(Some("  X64 ")).as_deref(),
        Some("x64")
    );
    assert_eq!(
        normalize_architecture(Some("ARM64")).as_deref(),
        Some("arm64")
    );
}

#[test]
fn normalize_architecture_treats_blank_as_absent() {
    assert_eq!(normalize_architecture(Some("   ")), None);
    assert_eq!(normalize_architecture(None), None);
}

#[test]
fn descriptor_builder_normalizes_architecture() {
    let descriptor = VersionDescriptor::new("8.0")
        .with_architecture(Some("Arm64"))
        .with_quality(Some(QualityTier::Preview));
    assert_eq!(descriptor.version_text, "8.0");
    assert_eq!(descriptor.architecture.as_deref(), Some("arm64"));
    assert_eq!(descriptor.quality, Some(QualityTier::Preview));
}

#[test]
fn host_arch_name_maps_rust_names_to_script_names() {
    assert_eq!(host_arch_name("x86_64"), ARCH_X64);
    assert_eq!(host_arch_name("aarch64"), ARCH_ARM64);
    assert_eq!(host_arch_name("x86"), "x86");
    assert_eq!(host_arch_name("riscv64"), "riscv64");
}

#[test]
fn apple_arm_detection_requires_both_family_and_arch() {
    assert!(HostPlatform::new(PlatformFamily::MacOs, ARCH_ARM64).is_apple_arm());
    assert!(!HostPlatform::new(PlatformFamily::MacOs, ARCH_X64).is_apple_arm());
    assert!(!HostPlatform::new(PlatformFamily::Linux, ARCH_ARM64).is_apple_arm());
}

#[test]
fn platform_family_parses_common_aliases() {
    assert_eq!(
        PlatformFamily::from_str("darwin").expect("darwin must parse"),
        PlatformFamily::MacOs
    );
    assert_eq!(
        PlatformFamily::from_str("Windows").expect("windows must parse"),
        PlatformFamily::Windows
    );
    assert!(PlatformFamily::from_str("plan9").is_err());
}

#[test]
fn directive_constructors_set_quality_flag() {
    assert!(ResolvedDirective::none().is_none());
    assert!(!ResolvedDirective::exact("8.0.100").quality_allowed);
    assert!(ResolvedDirective::channel("8.0", true).quality_allowed);
    assert_eq!(DirectiveKind::ExactVersion.as_str(), "version");
}
