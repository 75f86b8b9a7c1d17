//! Builders for configurations and templates.

use crate::cache::CacheStorage;
use crate::configuration::Configuration;
use crate::handler::TemplateExceptionHandler;
use crate::installation::EngineInstallation;
use crate::internal;
use crate::template::Template;
use std::sync::Arc;
use stencil_core::{
    AutoEscapingPolicy, NamingConvention, OutputFormat, TagSyntax, UndefinedOutputFormat,
    Version, VersionError,
};

// ============================================================================
// CONFIGURATION BUILDER
// ============================================================================

/// Collects settings and produces a gated [`Configuration`].
///
/// The incompatible-improvements version is mandatory; everything else falls
/// back to the default for that version.
#[derive(Debug, Clone, Default)]
pub struct ConfigurationBuilder {
    incompatible_improvements: Option<Version>,
    auto_escaping_policy: Option<AutoEscapingPolicy>,
    naming_convention: Option<NamingConvention>,
    tag_syntax: Option<TagSyntax>,
    output_format: Option<Arc<dyn OutputFormat>>,
    template_exception_handler: Option<Arc<dyn TemplateExceptionHandler>>,
    cache_storage: Option<Arc<dyn CacheStorage>>,
}

impl ConfigurationBuilder {
    pub fn new(incompatible_improvements: Version) -> Self {
        Self {
            incompatible_improvements: Some(incompatible_improvements),
            ..Self::default()
        }
    }

    pub fn incompatible_improvements(mut self, version: Version) -> Self {
        self.incompatible_improvements = Some(version);
        self
    }

    pub fn auto_escaping_policy(mut self, policy: AutoEscapingPolicy) -> Self {
        self.auto_escaping_policy = Some(policy);
        self
    }

    pub fn naming_convention(mut self, naming_convention: NamingConvention) -> Self {
        self.naming_convention = Some(naming_convention);
        self
    }

    pub fn tag_syntax(mut self, tag_syntax: TagSyntax) -> Self {
        self.tag_syntax = Some(tag_syntax);
        self
    }

    pub fn output_format(mut self, output_format: Arc<dyn OutputFormat>) -> Self {
        self.output_format = Some(output_format);
        self
    }

    pub fn template_exception_handler(mut self, handler: Arc<dyn TemplateExceptionHandler>) -> Self {
        self.template_exception_handler = Some(handler);
        self
    }

    pub fn cache_storage(mut self, cache_storage: Arc<dyn CacheStorage>) -> Self {
        self.cache_storage = Some(cache_storage);
        self
    }

    /// Gate the version, then fill every unset setting with its default.
    pub fn build(self, installation: &EngineInstallation) -> Result<Configuration, VersionError> {
        installation.check_version_supported(self.incompatible_improvements)?;
        let incompatible_improvements = self.incompatible_improvements.ok_or(
            VersionError::MissingArgument {
                name: "incompatible_improvements",
            },
        )?;

        let template_exception_handler_explicitly_set = self.template_exception_handler.is_some();
        let template_exception_handler = self
            .template_exception_handler
            .unwrap_or_else(|| internal::default_exception_handler(incompatible_improvements));

        let cache_storage_explicitly_set = self.cache_storage.is_some();
        let cache_storage = self
            .cache_storage
            .unwrap_or_else(|| internal::default_cache_storage(incompatible_improvements));

        let configuration = Configuration {
            incompatible_improvements,
            auto_escaping_policy: self.auto_escaping_policy.unwrap_or_default(),
            naming_convention: self.naming_convention.unwrap_or_default(),
            tag_syntax: self.tag_syntax.unwrap_or_default(),
            output_format: self
                .output_format
                .unwrap_or_else(|| Arc::new(UndefinedOutputFormat)),
            template_exception_handler,
            template_exception_handler_explicitly_set,
            cache_storage,
            cache_storage_explicitly_set,
        };

        tracing::debug!(
            incompatible_improvements = %configuration.incompatible_improvements,
            handler = configuration.template_exception_handler.name(),
            cache_storage = configuration.cache_storage.name(),
            "Built configuration"
        );
        Ok(configuration)
    }
}

// ============================================================================
// TEMPLATE BUILDER
// ============================================================================

/// Creates [`Template`]s with settings resolved from a [`Configuration`].
///
/// The template inherits the configuration's incompatible-improvements
/// version as its language version. Auto-escaping is derived from the output
/// format and the configuration's policy unless overridden.
#[derive(Debug)]
pub struct TemplateBuilder<'a> {
    configuration: &'a Configuration,
    name: Option<String>,
    source: String,
    output_format: Option<Arc<dyn OutputFormat>>,
    auto_escaping: Option<bool>,
}

impl<'a> TemplateBuilder<'a> {
    pub fn new(configuration: &'a Configuration, source: impl Into<String>) -> Self {
        Self {
            configuration,
            name: None,
            source: source.into(),
            output_format: None,
            auto_escaping: None,
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Output format for this template only, e.g. chosen from its file extension.
    pub fn output_format(mut self, output_format: Arc<dyn OutputFormat>) -> Self {
        self.output_format = Some(output_format);
        self
    }

    /// Force auto-escaping on or off, as a template header would.
    pub fn auto_escaping(mut self, auto_escaping: bool) -> Self {
        self.auto_escaping = Some(auto_escaping);
        self
    }

    pub fn build(self) -> Template {
        let configuration = self.configuration;
        let mut template = Template::new(
            self.name,
            self.source,
            configuration.incompatible_improvements(),
            configuration.tag_syntax(),
            configuration.naming_convention(),
            Arc::clone(configuration.output_format()),
        );

        if let Some(output_format) = self.output_format {
            internal::set_output_format(&mut template, output_format);
        }

        let auto_escaping = self.auto_escaping.unwrap_or_else(|| {
            template
                .output_format()
                .auto_escaping_under(configuration.auto_escaping_policy())
        });
        internal::set_auto_escaping(&mut template, auto_escaping);

        tracing::trace!(
            template = template.name().unwrap_or("<nameless>"),
            language_version = internal::template_language_version_as_int(&template),
            output_format = template.output_format().name(),
            auto_escaping,
            "Built template"
        );
        template
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::StrongCacheStorage;
    use crate::handler::IgnoreHandler;
    use stencil_core::{HtmlOutputFormat, PlainTextOutputFormat, RtfOutputFormat, VERSION_3_0_0};

    fn installation() -> EngineInstallation {
        EngineInstallation::current()
    }

    #[test]
    fn test_build_requires_incompatible_improvements() {
        let err = ConfigurationBuilder::default()
            .build(&installation())
            .unwrap_err();
        assert_eq!(
            err,
            VersionError::MissingArgument {
                name: "incompatible_improvements"
            }
        );
    }

    #[test]
    fn test_build_gates_version() {
        let err = ConfigurationBuilder::new(Version::new(3, 1, 0))
            .build(&installation())
            .unwrap_err();
        assert!(matches!(err, VersionError::TooNew { .. }));
    }

    #[test]
    fn test_build_uses_overrides_and_flags_them() {
        let cfg = ConfigurationBuilder::new(VERSION_3_0_0)
            .tag_syntax(TagSyntax::SquareBracket)
            .naming_convention(NamingConvention::CamelCase)
            .auto_escaping_policy(AutoEscapingPolicy::Disable)
            .template_exception_handler(Arc::new(IgnoreHandler))
            .cache_storage(Arc::new(StrongCacheStorage::new()))
            .build(&installation())
            .unwrap();

        assert_eq!(cfg.tag_syntax(), TagSyntax::SquareBracket);
        assert_eq!(cfg.naming_convention(), NamingConvention::CamelCase);
        assert_eq!(cfg.auto_escaping_policy(), AutoEscapingPolicy::Disable);
        assert_eq!(cfg.template_exception_handler().name(), "ignore");
        assert!(cfg.is_template_exception_handler_explicitly_set());
        assert_eq!(cfg.cache_storage().name(), "strong");
        assert!(cfg.is_cache_storage_explicitly_set());
    }

    #[test]
    fn test_template_inherits_configuration() {
        let cfg = ConfigurationBuilder::new(VERSION_3_0_0)
            .tag_syntax(TagSyntax::AngleBracket)
            .output_format(Arc::new(HtmlOutputFormat))
            .build(&installation())
            .unwrap();
        let template = TemplateBuilder::new(&cfg, "<p>${title}</p>").name("index").build();

        assert_eq!(template.name(), Some("index"));
        assert_eq!(template.source(), "<p>${title}</p>");
        assert_eq!(template.language_version(), VERSION_3_0_0);
        assert_eq!(template.tag_syntax(), TagSyntax::AngleBracket);
        assert_eq!(template.output_format().name(), "HTML");
        assert!(template.auto_escaping());
    }

    #[test]
    fn test_template_format_override_resolves_policy() {
        let cfg = ConfigurationBuilder::new(VERSION_3_0_0)
            .auto_escaping_policy(AutoEscapingPolicy::EnableIfSupported)
            .build(&installation())
            .unwrap();

        let rtf = TemplateBuilder::new(&cfg, "")
            .output_format(Arc::new(RtfOutputFormat))
            .build();
        assert!(rtf.auto_escaping());

        let text = TemplateBuilder::new(&cfg, "")
            .output_format(Arc::new(PlainTextOutputFormat))
            .build();
        assert!(!text.auto_escaping());
    }

    #[test]
    fn test_template_auto_escaping_override_wins() {
        let cfg = ConfigurationBuilder::new(VERSION_3_0_0)
            .output_format(Arc::new(HtmlOutputFormat))
            .build(&installation())
            .unwrap();
        let template = TemplateBuilder::new(&cfg, "").auto_escaping(false).build();
        assert!(!template.auto_escaping());
    }

    #[test]
    fn test_disable_policy_turns_off_html_escaping() {
        let cfg = ConfigurationBuilder::new(VERSION_3_0_0)
            .auto_escaping_policy(AutoEscapingPolicy::Disable)
            .output_format(Arc::new(HtmlOutputFormat))
            .build(&installation())
            .unwrap();
        assert!(!TemplateBuilder::new(&cfg, "").build().auto_escaping());
    }
}
