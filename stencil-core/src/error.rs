//! Error types for STENCIL configuration-time checks

use crate::Version;
use thiserror::Error;

/// Version gate errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum VersionError {
    #[error(
        "The engine version requested by \"incompatible_improvements\" was {requested}, \
         but the installed engine version is only {installed}. \
         You may need to upgrade the engine in your project."
    )]
    TooNew { requested: Version, installed: Version },

    #[error("\"incompatible_improvements\" must be at least {floor}, but was {requested}")]
    TooOld { requested: Version, floor: Version },

    #[error("Missing required argument: {name}")]
    MissingArgument { name: &'static str },
}

/// Errors produced when parsing a [`Version`] from text or an integer.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum VersionParseError {
    #[error("Malformed version string {input:?}, expected \"major.minor[.micro]\"")]
    Malformed { input: String },

    #[error("Version {component} component out of range: {value}")]
    ComponentOutOfRange { component: &'static str, value: u32 },
}

/// An enumerated setting received a value outside its closed set.
///
/// The message lists every legal alternative by symbolic name so the caller
/// can correct the value without looking anything up.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error(
    "\"{setting}\" can only be set to one of these: {}; got {value}",
    format_alternatives(.alternatives)
)]
pub struct InvalidSettingError {
    /// Legacy (snake_case) name of the setting.
    pub setting: &'static str,
    /// The rejected value, as received.
    pub value: String,
    /// Symbolic names of the legal values.
    pub alternatives: Vec<&'static str>,
}

fn format_alternatives(alternatives: &[&'static str]) -> String {
    match alternatives {
        [] => String::new(),
        [only] => (*only).to_string(),
        [init @ .., last] => format!("{}, or {}", init.join(", "), last),
    }
}

// =============================================================================
// TESTS
// =============================================================================
