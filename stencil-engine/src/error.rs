//! Error types for STENCIL engine configuration

use stencil_core::{InvalidSettingError, VersionError, VersionParseError};
use thiserror::Error;

/// Errors raised while applying named settings.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SettingError {
    #[error("Unknown setting {name:?}; recognized settings: {}", .known.join(", "))]
    UnknownSetting { name: String, known: Vec<String> },

    #[error("Invalid value for {name}: {value:?} - {reason}")]
    InvalidValue {
        name: String,
        value: String,
        reason: String,
    },

    #[error("Settings parse error: {reason}")]
    Parse { reason: String },
}

/// Master error type for engine configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EngineError {
    #[error("Version error: {0}")]
    Version(#[from] VersionError),

    #[error("Version parse error: {0}")]
    VersionParse(#[from] VersionParseError),

    #[error("Invalid setting: {0}")]
    InvalidSetting(#[from] InvalidSettingError),

    #[error("Setting error: {0}")]
    Setting(#[from] SettingError),
}

/// Result type alias for engine configuration operations.
pub type EngineResult<T> = Result<T, EngineError>;

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use stencil_core::Version;

    #[test]
    fn test_unknown_setting_display_lists_known() {
        let err = SettingError::UnknownSetting {
            name: "tagSyntx".to_string(),
            known: vec!["namingConvention".to_string(), "tagSyntax".to_string()],
        };
        let msg = err.to_string();
        assert!(msg.contains("\"tagSyntx\""));
        assert!(msg.contains("namingConvention, tagSyntax"));
    }

    #[test]
    fn test_invalid_value_display() {
        let err = SettingError::InvalidValue {
            name: "cache_storage".to_string(),
            value: "mru:x".to_string(),
            reason: "capacity must be a non-negative integer".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("cache_storage"));
        assert!(msg.contains("mru:x"));
        assert!(msg.contains("non-negative"));
    }

    #[test]
    fn test_engine_error_from_variants() {
        let version = EngineError::from(VersionError::TooOld {
            requested: Version::new(2, 3, 0),
            floor: Version::new(3, 0, 0),
        });
        assert!(matches!(version, EngineError::Version(_)));

        let parse = EngineError::from(VersionParseError::Malformed {
            input: "x".to_string(),
        });
        assert!(matches!(parse, EngineError::VersionParse(_)));

        let setting = EngineError::from(SettingError::Parse {
            reason: "bad toml".to_string(),
        });
        assert!(matches!(setting, EngineError::Setting(_)));
    }
}
