//! Engine installation descriptor and the incompatible-improvements gate.

use stencil_core::{Version, VersionError, VERSION_3_0_0};

/// Version of this engine build. Kept in step with the workspace version.
pub const INSTALLED_VERSION: Version = Version::new(3, 0, 0);

/// Lowest incompatible-improvements version the engine will emulate.
pub const MINIMUM_SUPPORTED_VERSION: Version = VERSION_3_0_0;

/// Immutable description of the running engine: the installed version (the
/// ceiling) and the minimum supported version (the floor).
///
/// Build it once at startup, usually with [`EngineInstallation::current`], and
/// pass it by reference to whatever needs to check versions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineInstallation {
    installed: Version,
    floor: Version,
}

impl EngineInstallation {
    /// Descriptor for this build of the engine.
    pub const fn current() -> Self {
        Self {
            installed: INSTALLED_VERSION,
            floor: MINIMUM_SUPPORTED_VERSION,
        }
    }

    /// Descriptor for an arbitrary installed version; the floor stays fixed.
    pub const fn with_installed(installed: Version) -> Self {
        Self {
            installed,
            floor: MINIMUM_SUPPORTED_VERSION,
        }
    }

    pub fn installed(&self) -> Version {
        self.installed
    }

    pub fn floor(&self) -> Version {
        self.floor
    }

    /// Check that `requested` lies within `floor..=installed`.
    ///
    /// On success the caller may use `requested` as its incompatible-improvements
    /// baseline. Never mutates anything.
    pub fn check_version_supported(&self, requested: Option<Version>) -> Result<(), VersionError> {
        let requested = requested.ok_or(VersionError::MissingArgument {
            name: "incompatible_improvements",
        })?;

        let requested_int = requested.int_value();
        if requested_int > self.installed.int_value() {
            tracing::debug!(
                requested = %requested,
                installed = %self.installed,
                "Rejected incompatible_improvements newer than the installed engine"
            );
            return Err(VersionError::TooNew {
                requested,
                installed: self.installed,
            });
        }
        if requested_int < self.floor.int_value() {
            tracing::debug!(
                requested = %requested,
                floor = %self.floor,
                "Rejected incompatible_improvements below the supported floor"
            );
            return Err(VersionError::TooOld {
                requested,
                floor: self.floor,
            });
        }
        Ok(())
    }
}

impl Default for EngineInstallation {
    fn default() -> Self {
        Self::current()
    }
}

/// Free-function form of [`EngineInstallation::check_version_supported`].
pub fn check_version_supported(
    installation: &EngineInstallation,
    requested: Option<Version>,
) -> Result<(), VersionError> {
    installation.check_version_supported(requested)
}

// =============================================================================
// TESTS
// =============================================================================
