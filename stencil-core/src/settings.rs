//! Enumerated configuration settings
//!
//! Each setting is a closed set of variants carrying a numerically stable
//! integer code. Conversions from codes and from text go through an exhaustive
//! `match`, so a value outside the set can never be represented.

use crate::error::InvalidSettingError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// SHARED BEHAVIOR
// ============================================================================

/// Behavior shared by the integer-coded setting enums.
pub trait SettingEnum: Copy + Sized + 'static {
    /// Legacy (snake_case) setting name, used in error messages.
    const SETTING_NAME: &'static str;

    /// Every legal variant, in code order.
    const VARIANTS: &'static [Self];

    /// Stable integer code of this variant.
    fn code(self) -> i32;

    /// Upper snake case symbolic name, e.g. `SQUARE_BRACKET`.
    fn symbolic_name(self) -> &'static str;

    /// Map a code back to its variant; `None` for codes outside the set.
    fn from_code(code: i32) -> Option<Self>;

    /// Symbolic names of all legal variants.
    fn alternatives() -> Vec<&'static str> {
        Self::VARIANTS.iter().map(|v| v.symbolic_name()).collect()
    }

    /// Checked conversion from an integer code.
    fn try_from_code(code: i32) -> Result<Self, InvalidSettingError> {
        Self::from_code(code).ok_or_else(|| InvalidSettingError {
            setting: Self::SETTING_NAME,
            value: code.to_string(),
            alternatives: Self::alternatives(),
        })
    }

    /// Checked conversion from a textual value.
    ///
    /// Case, underscores, dashes and whitespace are ignored, so
    /// `square_bracket`, `squareBracket` and `SQUARE_BRACKET` are equivalent.
    /// A decimal integer is accepted as a code.
    fn parse_setting_value(value: &str) -> Result<Self, InvalidSettingError> {
        let wanted = normalize_token(value);
        if let Some(found) = Self::VARIANTS
            .iter()
            .copied()
            .find(|v| normalize_token(v.symbolic_name()) == wanted)
        {
            return Ok(found);
        }
        match value.trim().parse::<i32>() {
            Ok(code) => Self::from_code(code).ok_or_else(|| Self::invalid(value)),
            Err(_) => Err(Self::invalid(value)),
        }
    }

    #[doc(hidden)]
    fn invalid(value: &str) -> InvalidSettingError {
        InvalidSettingError {
            setting: Self::SETTING_NAME,
            value: value.to_string(),
            alternatives: Self::alternatives(),
        }
    }
}

fn normalize_token(input: &str) -> String {
    input
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '_' && *c != '-')
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

// ============================================================================
// AUTO-ESCAPING POLICY
// ============================================================================

/// Whether template output is escaped by default for the active output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AutoEscapingPolicy {
    /// Never auto-escape.
    Disable = 20,
    /// Auto-escape when the output format escapes by default.
    #[default]
    EnableIfDefault = 21,
    /// Auto-escape whenever the output format supports escaping at all.
    EnableIfSupported = 22,
}

impl SettingEnum for AutoEscapingPolicy {
    const SETTING_NAME: &'static str = "auto_escaping_policy";
    const VARIANTS: &'static [Self] = &[
        AutoEscapingPolicy::Disable,
        AutoEscapingPolicy::EnableIfDefault,
        AutoEscapingPolicy::EnableIfSupported,
    ];

    fn code(self) -> i32 {
        self as i32
    }

    fn symbolic_name(self) -> &'static str {
        match self {
            AutoEscapingPolicy::Disable => "DISABLE",
            AutoEscapingPolicy::EnableIfDefault => "ENABLE_IF_DEFAULT",
            AutoEscapingPolicy::EnableIfSupported => "ENABLE_IF_SUPPORTED",
        }
    }

    fn from_code(code: i32) -> Option<Self> {
        match code {
            20 => Some(AutoEscapingPolicy::Disable),
            21 => Some(AutoEscapingPolicy::EnableIfDefault),
            22 => Some(AutoEscapingPolicy::EnableIfSupported),
            _ => None,
        }
    }
}

// ============================================================================
// NAMING CONVENTION
// ============================================================================

/// Spelling of built-in names: legacy `snake_case` or `camelCase`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NamingConvention {
    /// Decided by the first name the parser meets.
    #[default]
    AutoDetect = 10,
    Legacy = 11,
    CamelCase = 12,
}

impl NamingConvention {
    /// Guess the convention of a single identifier.
    ///
    /// An uppercase letter means camel case, an underscore means legacy;
    /// names with neither (e.g. `cache`) are spelled the same in both.
    pub fn detect(name: &str) -> NamingConvention {
        if name.chars().any(|c| c.is_ascii_uppercase()) {
            NamingConvention::CamelCase
        } else if name.contains('_') {
            NamingConvention::Legacy
        } else {
            NamingConvention::AutoDetect
        }
    }
}

impl SettingEnum for NamingConvention {
    const SETTING_NAME: &'static str = "naming_convention";
    const VARIANTS: &'static [Self] = &[
        NamingConvention::AutoDetect,
        NamingConvention::Legacy,
        NamingConvention::CamelCase,
    ];

    fn code(self) -> i32 {
        self as i32
    }

    fn symbolic_name(self) -> &'static str {
        match self {
            NamingConvention::AutoDetect => "AUTO_DETECT",
            NamingConvention::Legacy => "LEGACY",
            NamingConvention::CamelCase => "CAMEL_CASE",
        }
    }

    fn from_code(code: i32) -> Option<Self> {
        match code {
            10 => Some(NamingConvention::AutoDetect),
            11 => Some(NamingConvention::Legacy),
            12 => Some(NamingConvention::CamelCase),
            _ => None,
        }
    }
}

// ============================================================================
// TAG SYNTAX
// ============================================================================

/// Directive delimiter style the parser accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TagSyntax {
    #[default]
    AutoDetect = 0,
    /// `<#if x>`
    AngleBracket = 1,
    /// `[#if x]`
    SquareBracket = 2,
}

impl SettingEnum for TagSyntax {
    const SETTING_NAME: &'static str = "tag_syntax";
    const VARIANTS: &'static [Self] = &[
        TagSyntax::AutoDetect,
        TagSyntax::AngleBracket,
        TagSyntax::SquareBracket,
    ];

    fn code(self) -> i32 {
        self as i32
    }

    fn symbolic_name(self) -> &'static str {
        match self {
            TagSyntax::AutoDetect => "AUTO_DETECT",
            TagSyntax::AngleBracket => "ANGLE_BRACKET",
            TagSyntax::SquareBracket => "SQUARE_BRACKET",
        }
    }

    fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(TagSyntax::AutoDetect),
            1 => Some(TagSyntax::AngleBracket),
            2 => Some(TagSyntax::SquareBracket),
            _ => None,
        }
    }
}

// ============================================================================
// STRING / CODE CONVERSIONS
// ============================================================================

macro_rules! setting_enum_conversions {
    ($($ty:ty),* $(,)?) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.symbolic_name())
                }
            }

            impl FromStr for $ty {
                type Err = InvalidSettingError;

                fn from_str(s: &str) -> Result<Self, Self::Err> {
                    <$ty as SettingEnum>::parse_setting_value(s)
                }
            }

            impl TryFrom<i32> for $ty {
                type Error = InvalidSettingError;

                fn try_from(code: i32) -> Result<Self, Self::Error> {
                    <$ty as SettingEnum>::try_from_code(code)
                }
            }

            impl From<$ty> for i32 {
                fn from(value: $ty) -> Self {
                    value.code()
                }
            }
        )*
    };
}

setting_enum_conversions!(AutoEscapingPolicy, NamingConvention, TagSyntax);

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_are_stable() {
        assert_eq!(TagSyntax::AutoDetect.code(), 0);
        assert_eq!(TagSyntax::AngleBracket.code(), 1);
        assert_eq!(TagSyntax::SquareBracket.code(), 2);
        assert_eq!(NamingConvention::AutoDetect.code(), 10);
        assert_eq!(NamingConvention::Legacy.code(), 11);
        assert_eq!(NamingConvention::CamelCase.code(), 12);
        assert_eq!(AutoEscapingPolicy::Disable.code(), 20);
        assert_eq!(AutoEscapingPolicy::EnableIfDefault.code(), 21);
        assert_eq!(AutoEscapingPolicy::EnableIfSupported.code(), 22);
    }

    #[test]
    fn test_from_code_round_trips_every_variant() {
        for v in TagSyntax::VARIANTS {
            assert_eq!(TagSyntax::from_code(v.code()), Some(*v));
        }
        for v in NamingConvention::VARIANTS {
            assert_eq!(NamingConvention::from_code(v.code()), Some(*v));
        }
        for v in AutoEscapingPolicy::VARIANTS {
            assert_eq!(AutoEscapingPolicy::from_code(v.code()), Some(*v));
        }
    }

    #[test]
    fn test_try_from_rejects_foreign_code() {
        // A naming-convention code is not a tag syntax.
        let err = TagSyntax::try_from(11).unwrap_err();
        assert_eq!(err.setting, "tag_syntax");
        assert_eq!(err.value, "11");
        assert_eq!(
            err.alternatives,
            vec!["AUTO_DETECT", "ANGLE_BRACKET", "SQUARE_BRACKET"]
        );
    }

    #[test]
    fn test_parse_any_spelling() {
        assert_eq!("square_bracket".parse(), Ok(TagSyntax::SquareBracket));
        assert_eq!("squareBracket".parse(), Ok(TagSyntax::SquareBracket));
        assert_eq!("SQUARE_BRACKET".parse(), Ok(TagSyntax::SquareBracket));
        assert_eq!("camel-case".parse(), Ok(NamingConvention::CamelCase));
        assert_eq!(
            "enableIfSupported".parse(),
            Ok(AutoEscapingPolicy::EnableIfSupported)
        );
    }

    #[test]
    fn test_parse_accepts_numeric_code() {
        assert_eq!("2".parse(), Ok(TagSyntax::SquareBracket));
        assert!("3".parse::<TagSyntax>().is_err());
    }

    #[test]
    fn test_parse_rejects_unknown_word() {
        let err = "curly".parse::<TagSyntax>().unwrap_err();
        assert_eq!(err.value, "curly");
        assert!(err.to_string().contains("ANGLE_BRACKET"));
    }

    #[test]
    fn test_detect_naming_convention() {
        assert_eq!(
            NamingConvention::detect("tagSyntax"),
            NamingConvention::CamelCase
        );
        assert_eq!(
            NamingConvention::detect("tag_syntax"),
            NamingConvention::Legacy
        );
        assert_eq!(
            NamingConvention::detect("cache"),
            NamingConvention::AutoDetect
        );
    }

    #[test]
    fn test_display_is_symbolic_name() {
        assert_eq!(AutoEscapingPolicy::Disable.to_string(), "DISABLE");
        assert_eq!(i32::from(NamingConvention::Legacy), 11);
    }
}
