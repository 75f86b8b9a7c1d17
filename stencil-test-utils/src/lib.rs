//! STENCIL Test Utilities
//!
//! Centralized test infrastructure for the STENCIL workspace:
//! - Proptest generators for versions, setting codes and expressions
//! - Test fixtures for common configurations and exceptions
//! - Custom assertions for STENCIL-specific errors
//! - Tracing setup for tests that want log output

// Re-export core types for convenience
pub use stencil_core::{
    AutoEscapingPolicy, Expression, InvalidSettingError, NamingConvention, SettingEnum,
    SourceLocation, TagSyntax, Version, VersionError, VersionParseError, MAX_MINOR_OR_MICRO,
    VERSION_3_0_0,
};
pub use stencil_engine::{
    Configuration, ConfigurationBuilder, EngineError, EngineInstallation, EngineResult,
    SettingError, SettingsFile, TemplateException,
};

/// Install a fmt subscriber filtered by `RUST_LOG`.
///
/// Safe to call from every test; only the first call installs anything.
pub fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("stencil_engine=debug,warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}

// ============================================================================
// PROPTEST GENERATORS
// ============================================================================

pub mod generators {
    //! Proptest strategies for generating STENCIL values.

    use super::*;
    use proptest::prelude::*;

    // === Version Generators ===

    /// Generate any well-formed Version.
    pub fn arb_version() -> impl Strategy<Value = Version> {
        (0u16..=20, 0u8..=MAX_MINOR_OR_MICRO, 0u8..=MAX_MINOR_OR_MICRO)
            .prop_map(|(major, minor, micro)| Version::new(major, minor, micro))
    }

    /// Generate versions clustered around `center`, so both sides of a
    /// boundary are hit often.
    pub fn arb_version_near(center: Version) -> impl Strategy<Value = Version> {
        let major = center.major();
        (
            major.saturating_sub(1)..=major.saturating_add(1),
            0u8..=3,
            prop_oneof![0u8..=3, 18u8..=24],
        )
            .prop_map(|(major, minor, micro)| Version::new(major, minor, micro))
    }

    /// Generate a version in `[floor, installed]` of the given installation.
    pub fn arb_supported_version(
        installation: EngineInstallation,
    ) -> impl Strategy<Value = Version> {
        let low = installation.floor().int_value();
        let high = installation.installed().int_value();
        (low..=high)
            .prop_filter_map("minor and micro must be at most 99", |value| {
                Version::from_int_value(value).ok()
            })
    }

    // === Setting Generators ===

    /// Generate a variant of any setting enumeration.
    pub fn arb_setting<T: SettingEnum + std::fmt::Debug + 'static>() -> impl Strategy<Value = T> {
        prop::sample::select(T::VARIANTS.to_vec())
    }

    pub fn arb_tag_syntax() -> impl Strategy<Value = TagSyntax> {
        arb_setting::<TagSyntax>()
    }

    pub fn arb_naming_convention() -> impl Strategy<Value = NamingConvention> {
        arb_setting::<NamingConvention>()
    }

    pub fn arb_auto_escaping_policy() -> impl Strategy<Value = AutoEscapingPolicy> {
        arb_setting::<AutoEscapingPolicy>()
    }

    /// Generate an integer that is not the code of any variant of `T`.
    pub fn arb_illegal_code<T: SettingEnum>() -> impl Strategy<Value = i32> {
        prop_oneof![
            any::<i32>(),
            -5i32..40,
        ]
        .prop_filter("must not be a legal code", |code| T::from_code(*code).is_none())
    }

    /// Respell a symbolic name with random letter case, optionally
    /// swapping underscores for dashes.
    pub fn arb_spelling(name: &'static str) -> impl Strategy<Value = String> {
        (prop::collection::vec(any::<bool>(), name.len()), any::<bool>()).prop_map(
            move |(upper, dashes)| {
                name.chars()
                    .zip(upper)
                    .map(|(c, up)| match c {
                        '_' if dashes => '-',
                        c if up => c.to_ascii_uppercase(),
                        c => c.to_ascii_lowercase(),
                    })
                    .collect()
            },
        )
    }

    // === Expression Generators ===

    /// Generate a SourceLocation.
    pub fn arb_source_location() -> impl Strategy<Value = SourceLocation> {
        (
            proptest::option::of("[a-z]{1,8}(\\.ftl)?"),
            1u32..5000,
            1u32..200,
        )
            .prop_map(|(template_name, line, column)| SourceLocation {
                template_name,
                line,
                column,
            })
    }

    /// Generate an Expression with an optional location.
    pub fn arb_expression() -> impl Strategy<Value = Expression> {
        (
            "[a-z][a-zA-Z0-9_.]{0,16}(\\?[a-z_]{1,8})?",
            proptest::option::of(arb_source_location()),
        )
            .prop_map(|(canonical_form, location)| {
                let expression = Expression::new(canonical_form);
                match location {
                    Some(location) => expression.with_location(location),
                    None => expression,
                }
            })
    }
}

// ============================================================================
// TEST FIXTURES
// ============================================================================

pub mod fixtures {
    //! Pre-built test fixtures for common testing scenarios.

    use super::*;
    use std::sync::Arc;
    use stencil_engine::HtmlOutputFormat;

    /// The installation this build reports.
    pub fn installation() -> EngineInstallation {
        EngineInstallation::current()
    }

    /// A configuration with every setting at its 3.0.0 default.
    pub fn default_config() -> Configuration {
        match Configuration::new(&installation(), VERSION_3_0_0) {
            Ok(cfg) => cfg,
            Err(e) => panic!("3.0.0 must be supported by the installed engine: {}", e),
        }
    }

    /// A 3.0.0 configuration producing auto-escaped HTML.
    pub fn html_config() -> Configuration {
        match ConfigurationBuilder::new(VERSION_3_0_0)
            .output_format(Arc::new(HtmlOutputFormat))
            .build(&installation())
        {
            Ok(cfg) => cfg,
            Err(e) => panic!("HTML configuration must build: {}", e),
        }
    }

    /// An exception blamed on `user.name` at line 3, column 14 of "page".
    pub fn blamed_exception() -> TemplateException {
        TemplateException::new("The following has evaluated to null or missing")
            .with_template_name("page")
            .with_blamed_expression(Expression::new("user.name").with_location(SourceLocation {
                template_name: Some("page".to_string()),
                line: 3,
                column: 14,
            }))
    }

    /// A settings document touching every recognized setting.
    pub const FULL_SETTINGS_TOML: &str = r#"
[settings]
incompatible_improvements = "3.0.0"
auto_escaping_policy = "enable_if_supported"
namingConvention = "camel_case"
tag_syntax = 2
outputFormat = "HTML"
template_exception_handler = "html_debug"
cache_storage = "mru:64"
"#;
}

// ============================================================================
// CUSTOM ASSERTIONS
// ============================================================================

pub mod assertions {
    //! Custom assertion functions for STENCIL-specific validation.

    use super::*;

    /// Assert that the gate rejected a version newer than the installation.
    #[track_caller]
    pub fn assert_too_new(result: &Result<(), VersionError>, requested: Version) {
        match result {
            Err(VersionError::TooNew { requested: r, .. }) => {
                assert_eq!(*r, requested, "Wrong requested version in TooNew error");
            }
            other => panic!("Expected TooNew for {}, got: {:?}", requested, other),
        }
    }

    /// Assert that the gate rejected a version below the floor.
    #[track_caller]
    pub fn assert_too_old(result: &Result<(), VersionError>, requested: Version) {
        match result {
            Err(VersionError::TooOld { requested: r, .. }) => {
                assert_eq!(*r, requested, "Wrong requested version in TooOld error");
            }
            other => panic!("Expected TooOld for {}, got: {:?}", requested, other),
        }
    }

    /// Assert that the error is a missing-argument error naming `name`.
    #[track_caller]
    pub fn assert_missing_argument<T: std::fmt::Debug>(
        result: &Result<T, VersionError>,
        name: &str,
    ) {
        match result {
            Err(VersionError::MissingArgument { name: n }) => {
                assert_eq!(*n, name, "Wrong argument name in MissingArgument error");
            }
            other => panic!("Expected MissingArgument({}), got: {:?}", name, other),
        }
    }

    /// Assert that a setting was rejected with a message naming every
    /// alternative of `T`.
    #[track_caller]
    pub fn assert_lists_alternatives<T: SettingEnum>(result: &Result<(), InvalidSettingError>) {
        match result {
            Err(e) => {
                assert_eq!(e.setting, T::SETTING_NAME, "Wrong setting in error");
                let message = e.to_string();
                for name in T::alternatives() {
                    assert!(
                        message.contains(name),
                        "Message {:?} does not mention {}",
                        message,
                        name
                    );
                }
            }
            Ok(()) => panic!("Expected {} to be rejected", T::SETTING_NAME),
        }
    }

    /// Assert that the error is an unknown-setting error for `name`.
    #[track_caller]
    pub fn assert_unknown_setting<T: std::fmt::Debug>(result: &EngineResult<T>, name: &str) {
        match result {
            Err(EngineError::Setting(SettingError::UnknownSetting { name: n, .. })) => {
                assert_eq!(n, name, "Wrong name in UnknownSetting error");
            }
            other => panic!("Expected UnknownSetting({}), got: {:?}", name, other),
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
