//! Privileged accessors for sibling modules of this crate.
//!
//! This module is `pub(crate)` and not re-exported: code outside the crate
//! cannot reach it, so there is no runtime check here. Every function
//! forwards to a crate-private method on its target and adds no invariants
//! of its own.

use crate::cache::CacheStorage;
use crate::configuration::Configuration;
use crate::exception::TemplateException;
use crate::handler::TemplateExceptionHandler;
use crate::template::Template;
use std::collections::BTreeSet;
use std::sync::Arc;
use stencil_core::{Expression, OutputFormat, Version};

/// Overwrite the template's auto-escaping flag.
pub(crate) fn set_auto_escaping(template: &mut Template, auto_escaping: bool) {
    template.set_auto_escaping(auto_escaping);
}

/// Overwrite the template's output format.
pub(crate) fn set_output_format(template: &mut Template, output_format: Arc<dyn OutputFormat>) {
    template.set_output_format(output_format);
}

/// The template's language version as `major*10000 + minor*100 + micro`.
pub(crate) fn template_language_version_as_int(template: &Template) -> u32 {
    template.language_version_as_int()
}

/// Default exception handler for an incompatible-improvements version.
pub(crate) fn default_exception_handler(
    incompatible_improvements: Version,
) -> Arc<dyn TemplateExceptionHandler> {
    Configuration::default_template_exception_handler(incompatible_improvements)
}

/// Default cache storage for an incompatible-improvements version.
pub(crate) fn default_cache_storage(incompatible_improvements: Version) -> Arc<dyn CacheStorage> {
    Configuration::create_default_cache_storage(incompatible_improvements)
}

// TODO: drop once setting-name introspection is public on `Configuration`.
pub(crate) fn setting_names(configuration: &Configuration, camel_case: bool) -> BTreeSet<String> {
    configuration.setting_names(camel_case)
}

/// The expression the exception was raised for, if there was a single one.
pub(crate) fn blamed_expression(exception: &TemplateException) -> Option<&Expression> {
    exception.blamed_expression()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::installation::EngineInstallation;
    use stencil_core::{
        NamingConvention, TagSyntax, UndefinedOutputFormat, XmlOutputFormat, VERSION_3_0_0,
        VERSION_INT_3_0_0,
    };

    fn template() -> Template {
        Template::new(
            None,
            "${x}".to_string(),
            VERSION_3_0_0,
            TagSyntax::AutoDetect,
            NamingConvention::AutoDetect,
            Arc::new(UndefinedOutputFormat),
        )
    }

    #[test]
    fn test_setters_overwrite_unconditionally() {
        let mut t = template();
        set_auto_escaping(&mut t, true);
        set_output_format(&mut t, Arc::new(XmlOutputFormat));
        assert!(t.auto_escaping());
        assert_eq!(t.output_format().name(), "XML");

        // No consistency check against the format: the caller decides.
        set_auto_escaping(&mut t, false);
        assert!(!t.auto_escaping());
    }

    #[test]
    fn test_template_language_version_as_int() {
        assert_eq!(template_language_version_as_int(&template()), VERSION_INT_3_0_0);

        let t = Template::new(
            Some("future".to_string()),
            String::new(),
            Version::new(3, 1, 7),
            TagSyntax::SquareBracket,
            NamingConvention::CamelCase,
            Arc::new(UndefinedOutputFormat),
        );
        assert_eq!(template_language_version_as_int(&t), 30107);
    }

    #[test]
    fn test_default_factories_follow_configuration() {
        assert_eq!(default_exception_handler(VERSION_3_0_0).name(), "rethrow");
        assert_eq!(default_exception_handler(Version::new(2, 3, 0)).name(), "debug");
        assert_eq!(default_cache_storage(VERSION_3_0_0).name(), "mru");
        assert_eq!(default_cache_storage(Version::new(2, 3, 20)).name(), "strong");
    }

    #[test]
    fn test_setting_names_forwarded() {
        let cfg = Configuration::new(&EngineInstallation::current(), VERSION_3_0_0).unwrap();
        assert!(setting_names(&cfg, false).contains("naming_convention"));
        assert!(setting_names(&cfg, true).contains("namingConvention"));
    }

    #[test]
    fn test_blamed_expression_absent_is_none() {
        let e = TemplateException::new("boom");
        assert!(blamed_expression(&e).is_none());

        let e = e.with_blamed_expression(Expression::new("a + b"));
        assert_eq!(blamed_expression(&e).map(|x| x.canonical_form()), Some("a + b"));
    }
}
