//! Engine version values
//!
//! A [`Version`] is the `major.minor.micro` triple used both for the installed
//! engine version and for the "incompatible improvements" baseline a caller
//! pins. Minor and micro are limited to two decimal digits so that the
//! derived ordering is identical to the ordering of [`Version::int_value`].

use crate::error::VersionParseError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Largest allowed minor or micro component.
pub const MAX_MINOR_OR_MICRO: u8 = 99;

/// A `major.minor.micro` engine version.
///
/// Field order matters: the derived `Ord` is lexicographic over
/// `(major, minor, micro)`, which equals `int_value` ordering while minor and
/// micro stay within `0..=99`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Version {
    major: u16,
    minor: u8,
    micro: u8,
}

impl Version {
    /// Build a version in const context.
    ///
    /// # Panics
    ///
    /// Panics if `minor` or `micro` exceeds [`MAX_MINOR_OR_MICRO`]. Use
    /// [`Version::try_new`] for values that come from outside the crate.
    pub const fn new(major: u16, minor: u8, micro: u8) -> Self {
        assert!(minor <= MAX_MINOR_OR_MICRO, "minor version must be <= 99");
        assert!(micro <= MAX_MINOR_OR_MICRO, "micro version must be <= 99");
        Self { major, minor, micro }
    }

    /// Build a version, rejecting out-of-range components.
    pub fn try_new(major: u16, minor: u8, micro: u8) -> Result<Self, VersionParseError> {
        if minor > MAX_MINOR_OR_MICRO {
            return Err(VersionParseError::ComponentOutOfRange {
                component: "minor",
                value: u32::from(minor),
            });
        }
        if micro > MAX_MINOR_OR_MICRO {
            return Err(VersionParseError::ComponentOutOfRange {
                component: "micro",
                value: u32::from(micro),
            });
        }
        Ok(Self { major, minor, micro })
    }

    pub fn major(&self) -> u16 {
        self.major
    }

    pub fn minor(&self) -> u8 {
        self.minor
    }

    pub fn micro(&self) -> u8 {
        self.micro
    }

    /// Single comparable integer: `major*10000 + minor*100 + micro`.
    pub const fn int_value(&self) -> u32 {
        self.major as u32 * 10_000 + self.minor as u32 * 100 + self.micro as u32
    }

    /// Inverse of [`Version::int_value`].
    pub fn from_int_value(value: u32) -> Result<Self, VersionParseError> {
        let major = u16::try_from(value / 10_000).map_err(|_| {
            VersionParseError::ComponentOutOfRange {
                component: "major",
                value: value / 10_000,
            }
        })?;
        // Both remainders are < 100, so the casts cannot truncate.
        Ok(Self {
            major,
            minor: ((value / 100) % 100) as u8,
            micro: (value % 100) as u8,
        })
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.micro)
    }
}

fn parse_component<T: FromStr>(
    input: &str,
    component: &'static str,
    raw: &str,
) -> Result<T, VersionParseError> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(VersionParseError::Malformed {
            input: input.to_string(),
        });
    }
    raw.parse::<T>().map_err(|_| VersionParseError::ComponentOutOfRange {
        component,
        value: raw.parse::<u32>().unwrap_or(u32::MAX),
    })
}

impl FromStr for Version {
    type Err = VersionParseError;

    /// Parses `"M.m.u"` or `"M.m"` (micro defaults to 0).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let parts: Vec<&str> = trimmed.split('.').collect();
        let (major, minor, micro) = match parts.as_slice() {
            [major, minor] => (*major, *minor, "0"),
            [major, minor, micro] => (*major, *minor, *micro),
            _ => {
                return Err(VersionParseError::Malformed {
                    input: s.to_string(),
                })
            }
        };

        let major = parse_component::<u16>(s, "major", major)?;
        let minor = parse_component::<u8>(s, "minor", minor)?;
        let micro = parse_component::<u8>(s, "micro", micro)?;
        Self::try_new(major, minor, micro)
    }
}

impl TryFrom<String> for Version {
    type Error = VersionParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Version> for String {
    fn from(value: Version) -> Self {
        value.to_string()
    }
}

// ============================================================================
// WELL-KNOWN VERSIONS
// ============================================================================

/// First version whose default cache storage is MRU.
pub const VERSION_2_3_21: Version = Version::new(2, 3, 21);

/// First stable release of the 3.x line; the floor for incompatible improvements.
pub const VERSION_3_0_0: Version = Version::new(3, 0, 0);

/// `int_value` of [`VERSION_3_0_0`].
pub const VERSION_INT_3_0_0: u32 = VERSION_3_0_0.int_value();

// =============================================================================
// TESTS
// =============================================================================
