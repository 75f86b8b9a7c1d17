//! Property-Based Tests for the Version Gate
//!
//! Property: For any installation and requested version, the gate SHALL
//! accept the version iff `floor <= requested <= installed`.
//!
//! This validates:
//! - Comparison uses the integer encoding of the version
//! - Rejections carry both versions in their message
//! - Configuration construction is gated the same way

use proptest::prelude::*;
use stencil_engine::{
    check_version_supported, Configuration, EngineInstallation, Version, VersionError,
    VERSION_3_0_0,
};
use stencil_test_utils::{assertions, generators, init_tracing};

// ============================================================================
// SCENARIOS
// ============================================================================

#[test]
fn test_installed_version_is_accepted() {
    init_tracing();
    let installation = EngineInstallation::current();
    assert!(check_version_supported(&installation, Some(VERSION_3_0_0)).is_ok());
}

#[test]
fn test_newer_version_is_rejected_with_upgrade_hint() {
    let installation = EngineInstallation::current();
    let requested = Version::new(3, 0, 1);
    let result = check_version_supported(&installation, Some(requested));
    assertions::assert_too_new(&result, requested);

    let message = result.unwrap_err().to_string();
    assert!(message.contains("3.0.1"));
    assert!(message.contains("3.0.0"));
}

#[test]
fn test_older_version_is_rejected_with_floor() {
    let installation = EngineInstallation::current();
    let requested = Version::new(2, 3, 0);
    let result = check_version_supported(&installation, Some(requested));
    assertions::assert_too_old(&result, requested);
    assert_eq!(
        result.unwrap_err().to_string(),
        "\"incompatible_improvements\" must be at least 3.0.0, but was 2.3.0"
    );
}

#[test]
fn test_missing_version_is_rejected() {
    let installation = EngineInstallation::current();
    let result = check_version_supported(&installation, None);
    assertions::assert_missing_argument(&result, "incompatible_improvements");
}

#[test]
fn test_future_installation_widens_the_window() {
    let installation = EngineInstallation::with_installed(Version::new(3, 2, 0));
    assert!(installation.check_version_supported(Some(Version::new(3, 1, 5))).is_ok());
    assert!(matches!(
        installation.check_version_supported(Some(Version::new(3, 2, 1))),
        Err(VersionError::TooNew { .. })
    ));
}

// ============================================================================
// PROPERTIES
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_gate_accepts_exactly_the_window(
        installed in generators::arb_version_near(VERSION_3_0_0)
            .prop_filter("installation must not precede the floor", |v| *v >= VERSION_3_0_0),
        requested in generators::arb_version_near(VERSION_3_0_0),
    ) {
        let installation = EngineInstallation::with_installed(installed);
        let result = installation.check_version_supported(Some(requested));
        let in_window = installation.floor().int_value() <= requested.int_value()
            && requested.int_value() <= installed.int_value();

        prop_assert_eq!(result.is_ok(), in_window);
        if requested > installed {
            let too_new = matches!(result, Err(VersionError::TooNew { .. }));
            prop_assert!(too_new);
        }
        if requested < installation.floor() {
            let too_old = matches!(result, Err(VersionError::TooOld { .. }));
            prop_assert!(too_old);
        }
    }

    #[test]
    fn prop_gate_is_pure(requested in generators::arb_version()) {
        let installation = EngineInstallation::current();
        let first = installation.check_version_supported(Some(requested));
        let second = installation.check_version_supported(Some(requested));
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_configuration_new_matches_gate(requested in generators::arb_version()) {
        let installation = EngineInstallation::current();
        let gate = installation.check_version_supported(Some(requested));
        let built = Configuration::new(&installation, requested);
        prop_assert_eq!(gate.err(), built.err());
    }

    #[test]
    fn prop_version_order_matches_int_value(a in generators::arb_version(), b in generators::arb_version()) {
        prop_assert_eq!(a.cmp(&b), a.int_value().cmp(&b.int_value()));
    }
}
