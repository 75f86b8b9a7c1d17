//! Precondition checks for integer-coded settings.
//!
//! Callers that receive a raw code run the matching validator before
//! assigning; the check itself never touches any configuration object.

use stencil_core::{AutoEscapingPolicy, InvalidSettingError, NamingConvention, SettingEnum, TagSyntax};

fn validate_code<T: SettingEnum>(code: i32) -> Result<(), InvalidSettingError> {
    T::try_from_code(code).map(|_| ())
}

/// Accepts `DISABLE`, `ENABLE_IF_DEFAULT` or `ENABLE_IF_SUPPORTED`.
pub fn validate_auto_escaping_policy(code: i32) -> Result<(), InvalidSettingError> {
    validate_code::<AutoEscapingPolicy>(code)
}

/// Accepts `AUTO_DETECT`, `LEGACY` or `CAMEL_CASE`.
pub fn validate_naming_convention(code: i32) -> Result<(), InvalidSettingError> {
    validate_code::<NamingConvention>(code)
}

/// Accepts `AUTO_DETECT`, `ANGLE_BRACKET` or `SQUARE_BRACKET`.
pub fn validate_tag_syntax(code: i32) -> Result<(), InvalidSettingError> {
    validate_code::<TagSyntax>(code)
}
