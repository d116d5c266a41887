//! Integration tests for platform mode derivation.

use std::sync::Arc;

use gestureflow_platform::{PlatformDetector, PlatformMode, StaticHostEnvironment, derive_mode};

#[test]
fn platform_detection_tests_width_rule_splits_at_768() {
    for width in [320, 480, 768] {
        assert_eq!(derive_mode(Some(false), width), PlatformMode::Mobile);
    }
    for width in [769, 1_024, 2_560] {
        assert_eq!(derive_mode(Some(false), width), PlatformMode::Desktop);
    }
}

#[test]
fn platform_detection_tests_native_flag_overrides_width() {
    let env = Arc::new(StaticHostEnvironment::native(true));
    let detector = PlatformDetector::new(env, 1_920);
    assert_eq!(detector.mode(), PlatformMode::Mobile);
    assert!(detector.is_native());
}

#[test]
fn platform_detection_tests_unreadable_flag_defaults_to_desktop() {
    let env = Arc::new(StaticHostEnvironment::unreadable());
    let detector = PlatformDetector::new(env, 1_024);
    assert_eq!(detector.mode(), PlatformMode::Desktop);
    assert!(!detector.is_native());
}
