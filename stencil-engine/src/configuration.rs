//! Engine-wide configuration.
//!
//! Every setter that accepts an externally supplied value validates it first;
//! a rejected value leaves the configuration exactly as it was.

use crate::builder::ConfigurationBuilder;
use crate::cache::{CacheStorage, MruCacheStorage, StrongCacheStorage};
use crate::handler::{DebugHandler, RethrowHandler, TemplateExceptionHandler};
use crate::installation::EngineInstallation;
use std::collections::BTreeSet;
use std::sync::Arc;
use stencil_core::{
    AutoEscapingPolicy, InvalidSettingError, NamingConvention, OutputFormat, SettingEnum,
    TagSyntax, Version, VersionError, VERSION_2_3_21, VERSION_INT_3_0_0,
};

// ============================================================================
// SETTING NAMES
// ============================================================================

pub const INCOMPATIBLE_IMPROVEMENTS_KEY: &str = "incompatible_improvements";
pub const AUTO_ESCAPING_POLICY_KEY: &str = "auto_escaping_policy";
pub const NAMING_CONVENTION_KEY: &str = "naming_convention";
pub const TAG_SYNTAX_KEY: &str = "tag_syntax";
pub const OUTPUT_FORMAT_KEY: &str = "output_format";
pub const TEMPLATE_EXCEPTION_HANDLER_KEY: &str = "template_exception_handler";
pub const CACHE_STORAGE_KEY: &str = "cache_storage";

/// Every recognized setting, in legacy spelling.
pub(crate) const SETTING_NAMES: &[&str] = &[
    AUTO_ESCAPING_POLICY_KEY,
    CACHE_STORAGE_KEY,
    INCOMPATIBLE_IMPROVEMENTS_KEY,
    NAMING_CONVENTION_KEY,
    OUTPUT_FORMAT_KEY,
    TAG_SYNTAX_KEY,
    TEMPLATE_EXCEPTION_HANDLER_KEY,
];

/// `tag_syntax` -> `tagSyntax`.
pub(crate) fn to_camel_case(legacy: &str) -> String {
    let mut out = String::with_capacity(legacy.len());
    let mut upper_next = false;
    for c in legacy.chars() {
        if c == '_' {
            upper_next = true;
        } else if upper_next {
            out.push(c.to_ascii_uppercase());
            upper_next = false;
        } else {
            out.push(c);
        }
    }
    out
}

// ============================================================================
// CONFIGURATION
// ============================================================================

#[derive(Debug, Clone)]
pub struct Configuration {
    pub(crate) incompatible_improvements: Version,
    pub(crate) auto_escaping_policy: AutoEscapingPolicy,
    pub(crate) naming_convention: NamingConvention,
    pub(crate) tag_syntax: TagSyntax,
    pub(crate) output_format: Arc<dyn OutputFormat>,
    pub(crate) template_exception_handler: Arc<dyn TemplateExceptionHandler>,
    pub(crate) template_exception_handler_explicitly_set: bool,
    pub(crate) cache_storage: Arc<dyn CacheStorage>,
    pub(crate) cache_storage_explicitly_set: bool,
}

impl Configuration {
    /// Configuration with every setting at its default for `incompatible_improvements`.
    ///
    /// The version must pass the installation's gate. Use
    /// [`ConfigurationBuilder`] to override settings at construction.
    pub fn new(
        installation: &EngineInstallation,
        incompatible_improvements: Version,
    ) -> Result<Self, VersionError> {
        ConfigurationBuilder::new(incompatible_improvements).build(installation)
    }

    // === Version-gated defaults ===

    /// Handler used when none was set explicitly.
    pub(crate) fn default_template_exception_handler(
        incompatible_improvements: Version,
    ) -> Arc<dyn TemplateExceptionHandler> {
        if incompatible_improvements.int_value() >= VERSION_INT_3_0_0 {
            Arc::new(RethrowHandler)
        } else {
            Arc::new(DebugHandler)
        }
    }

    /// Storage used when none was set explicitly.
    pub(crate) fn create_default_cache_storage(
        incompatible_improvements: Version,
    ) -> Arc<dyn CacheStorage> {
        if incompatible_improvements >= VERSION_2_3_21 {
            Arc::new(MruCacheStorage::unbounded())
        } else {
            Arc::new(StrongCacheStorage::new())
        }
    }

    /// Names of all recognized settings, in the requested spelling.
    pub(crate) fn setting_names(&self, camel_case: bool) -> BTreeSet<String> {
        SETTING_NAMES
            .iter()
            .map(|name| {
                if camel_case {
                    to_camel_case(name)
                } else {
                    (*name).to_string()
                }
            })
            .collect()
    }

    // === Getters ===

    pub fn incompatible_improvements(&self) -> Version {
        self.incompatible_improvements
    }

    pub fn auto_escaping_policy(&self) -> AutoEscapingPolicy {
        self.auto_escaping_policy
    }

    pub fn naming_convention(&self) -> NamingConvention {
        self.naming_convention
    }

    pub fn tag_syntax(&self) -> TagSyntax {
        self.tag_syntax
    }

    pub fn output_format(&self) -> &Arc<dyn OutputFormat> {
        &self.output_format
    }

    pub fn template_exception_handler(&self) -> &Arc<dyn TemplateExceptionHandler> {
        &self.template_exception_handler
    }

    pub fn cache_storage(&self) -> &Arc<dyn CacheStorage> {
        &self.cache_storage
    }

    pub fn is_template_exception_handler_explicitly_set(&self) -> bool {
        self.template_exception_handler_explicitly_set
    }

    pub fn is_cache_storage_explicitly_set(&self) -> bool {
        self.cache_storage_explicitly_set
    }

    // === Setters ===

    /// Change the compatibility baseline.
    ///
    /// Defaults that were never set explicitly are re-derived for the new version.
    pub fn set_incompatible_improvements(
        &mut self,
        installation: &EngineInstallation,
        incompatible_improvements: Version,
    ) -> Result<(), VersionError> {
        installation.check_version_supported(Some(incompatible_improvements))?;
        if incompatible_improvements == self.incompatible_improvements {
            return Ok(());
        }

        tracing::debug!(
            from = %self.incompatible_improvements,
            to = %incompatible_improvements,
            "Changing incompatible_improvements"
        );
        self.incompatible_improvements = incompatible_improvements;
        if !self.template_exception_handler_explicitly_set {
            self.template_exception_handler =
                Self::default_template_exception_handler(incompatible_improvements);
        }
        if !self.cache_storage_explicitly_set {
            self.cache_storage = Self::create_default_cache_storage(incompatible_improvements);
        }
        Ok(())
    }

    pub fn set_auto_escaping_policy(&mut self, policy: AutoEscapingPolicy) {
        self.auto_escaping_policy = policy;
    }

    /// Set from a raw code; rejected codes leave the current policy untouched.
    pub fn set_auto_escaping_policy_code(&mut self, code: i32) -> Result<(), InvalidSettingError> {
        self.auto_escaping_policy = AutoEscapingPolicy::try_from_code(code)?;
        Ok(())
    }

    pub fn set_naming_convention(&mut self, naming_convention: NamingConvention) {
        self.naming_convention = naming_convention;
    }

    /// Set from a raw code; rejected codes leave the current convention untouched.
    pub fn set_naming_convention_code(&mut self, code: i32) -> Result<(), InvalidSettingError> {
        self.naming_convention = NamingConvention::try_from_code(code)?;
        Ok(())
    }

    pub fn set_tag_syntax(&mut self, tag_syntax: TagSyntax) {
        self.tag_syntax = tag_syntax;
    }

    /// Set from a raw code; rejected codes leave the current syntax untouched.
    pub fn set_tag_syntax_code(&mut self, code: i32) -> Result<(), InvalidSettingError> {
        self.tag_syntax = TagSyntax::try_from_code(code)?;
        Ok(())
    }

    pub fn set_output_format(&mut self, output_format: Arc<dyn OutputFormat>) {
        self.output_format = output_format;
    }

    pub fn set_template_exception_handler(&mut self, handler: Arc<dyn TemplateExceptionHandler>) {
        self.template_exception_handler = handler;
        self.template_exception_handler_explicitly_set = true;
    }

    /// Return to the version-dependent default handler.
    pub fn unset_template_exception_handler(&mut self) {
        self.template_exception_handler =
            Self::default_template_exception_handler(self.incompatible_improvements);
        self.template_exception_handler_explicitly_set = false;
    }

    pub fn set_cache_storage(&mut self, cache_storage: Arc<dyn CacheStorage>) {
        self.cache_storage = cache_storage;
        self.cache_storage_explicitly_set = true;
    }

    /// Return to the version-dependent default storage.
    pub fn unset_cache_storage(&mut self) {
        self.cache_storage = Self::create_default_cache_storage(self.incompatible_improvements);
        self.cache_storage_explicitly_set = false;
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handler::IgnoreHandler;
    use stencil_core::{HtmlOutputFormat, VERSION_3_0_0};

    fn config() -> Configuration {
        Configuration::new(&EngineInstallation::current(), VERSION_3_0_0).unwrap()
    }

    #[test]
    fn test_new_rejects_unsupported_version() {
        let err = Configuration::new(&EngineInstallation::current(), Version::new(2, 3, 20))
            .unwrap_err();
        assert!(matches!(err, VersionError::TooOld { .. }));
    }

    #[test]
    fn test_defaults_for_3_0_0() {
        let cfg = config();
        assert_eq!(cfg.auto_escaping_policy(), AutoEscapingPolicy::EnableIfDefault);
        assert_eq!(cfg.naming_convention(), NamingConvention::AutoDetect);
        assert_eq!(cfg.tag_syntax(), TagSyntax::AutoDetect);
        assert_eq!(cfg.output_format().name(), "undefined");
        assert_eq!(cfg.template_exception_handler().name(), "rethrow");
        assert_eq!(cfg.cache_storage().name(), "mru");
        assert!(!cfg.is_template_exception_handler_explicitly_set());
    }

    #[test]
    fn test_version_gated_defaults_differ_for_legacy_versions() {
        let legacy = Version::new(2, 3, 20);
        assert_eq!(Configuration::default_template_exception_handler(legacy).name(), "debug");
        assert_eq!(Configuration::create_default_cache_storage(legacy).name(), "strong");
        assert_eq!(
            Configuration::create_default_cache_storage(VERSION_2_3_21).name(),
            "mru"
        );
    }

    #[test]
    fn test_handler_default_switches_at_3_0_0() {
        let last_2x = Version::new(2, 99, 99);
        assert_eq!(Configuration::default_template_exception_handler(last_2x).name(), "debug");
        assert_eq!(
            Configuration::default_template_exception_handler(VERSION_3_0_0).name(),
            "rethrow"
        );
    }

    #[test]
    fn test_rejected_code_leaves_state_unchanged() {
        let mut cfg = config();
        cfg.set_tag_syntax(TagSyntax::SquareBracket);

        assert!(cfg.set_tag_syntax_code(5).is_err());
        assert_eq!(cfg.tag_syntax(), TagSyntax::SquareBracket);

        assert!(cfg.set_naming_convention_code(0).is_err());
        assert_eq!(cfg.naming_convention(), NamingConvention::AutoDetect);

        assert!(cfg.set_auto_escaping_policy_code(-1).is_err());
        assert_eq!(cfg.auto_escaping_policy(), AutoEscapingPolicy::EnableIfDefault);
    }

    #[test]
    fn test_code_setters_accept_legal_codes() {
        let mut cfg = config();
        cfg.set_tag_syntax_code(1).unwrap();
        cfg.set_naming_convention_code(12).unwrap();
        cfg.set_auto_escaping_policy_code(20).unwrap();
        assert_eq!(cfg.tag_syntax(), TagSyntax::AngleBracket);
        assert_eq!(cfg.naming_convention(), NamingConvention::CamelCase);
        assert_eq!(cfg.auto_escaping_policy(), AutoEscapingPolicy::Disable);
    }

    #[test]
    fn test_rejected_version_leaves_state_unchanged() {
        let mut cfg = config();
        let err = cfg
            .set_incompatible_improvements(&EngineInstallation::current(), Version::new(3, 1, 0))
            .unwrap_err();
        assert!(matches!(err, VersionError::TooNew { .. }));
        assert_eq!(cfg.incompatible_improvements(), VERSION_3_0_0);
    }

    #[test]
    fn test_version_change_keeps_explicit_handler() {
        let installation = EngineInstallation::with_installed(Version::new(3, 1, 0));
        let mut cfg = Configuration::new(&installation, VERSION_3_0_0).unwrap();
        cfg.set_template_exception_handler(Arc::new(IgnoreHandler));

        cfg.set_incompatible_improvements(&installation, Version::new(3, 1, 0))
            .unwrap();
        assert_eq!(cfg.template_exception_handler().name(), "ignore");
        assert_eq!(cfg.incompatible_improvements(), Version::new(3, 1, 0));

        cfg.unset_template_exception_handler();
        assert_eq!(cfg.template_exception_handler().name(), "rethrow");
        assert!(!cfg.is_template_exception_handler_explicitly_set());
    }

    #[test]
    fn test_explicit_cache_storage_round_trip() {
        let mut cfg = config();
        cfg.set_cache_storage(Arc::new(StrongCacheStorage::new()));
        assert_eq!(cfg.cache_storage().name(), "strong");
        assert!(cfg.is_cache_storage_explicitly_set());
        cfg.unset_cache_storage();
        assert_eq!(cfg.cache_storage().name(), "mru");
    }

    #[test]
    fn test_setting_names_both_conventions() {
        let cfg = config();
        let legacy = cfg.setting_names(false);
        let camel = cfg.setting_names(true);
        assert_eq!(legacy.len(), SETTING_NAMES.len());
        assert_eq!(camel.len(), SETTING_NAMES.len());
        assert!(legacy.contains("tag_syntax"));
        assert!(camel.contains("tagSyntax"));
        assert!(camel.contains("incompatibleImprovements"));
        assert!(camel.contains("templateExceptionHandler"));
    }

    #[test]
    fn test_output_format_setter() {
        let mut cfg = config();
        cfg.set_output_format(Arc::new(HtmlOutputFormat));
        assert_eq!(cfg.output_format().name(), "HTML");
    }

    #[test]
    fn test_to_camel_case() {
        assert_eq!(to_camel_case("auto_escaping_policy"), "autoEscapingPolicy");
        assert_eq!(to_camel_case("cache"), "cache");
    }
}
