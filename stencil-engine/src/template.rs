//! Template instances.
//!
//! Parsing is not done here: a [`Template`] holds its source text and the
//! settings resolved for it when it was built by [`crate::TemplateBuilder`].

use std::sync::Arc;
use stencil_core::{NamingConvention, OutputFormat, TagSyntax, Version};

#[derive(Debug, Clone)]
pub struct Template {
    name: Option<String>,
    source: String,
    language_version: Version,
    tag_syntax: TagSyntax,
    naming_convention: NamingConvention,
    auto_escaping: bool,
    output_format: Arc<dyn OutputFormat>,
}

impl Template {
    /// Auto-escaping starts off; the builder resolves it afterwards.
    pub(crate) fn new(
        name: Option<String>,
        source: String,
        language_version: Version,
        tag_syntax: TagSyntax,
        naming_convention: NamingConvention,
        output_format: Arc<dyn OutputFormat>,
    ) -> Self {
        Self {
            name,
            source,
            language_version,
            tag_syntax,
            naming_convention,
            auto_escaping: false,
            output_format,
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Incompatible-improvements version in effect when the template was built.
    pub fn language_version(&self) -> Version {
        self.language_version
    }

    pub fn tag_syntax(&self) -> TagSyntax {
        self.tag_syntax
    }

    pub fn naming_convention(&self) -> NamingConvention {
        self.naming_convention
    }

    pub fn auto_escaping(&self) -> bool {
        self.auto_escaping
    }

    pub fn output_format(&self) -> &Arc<dyn OutputFormat> {
        &self.output_format
    }

    pub(crate) fn language_version_as_int(&self) -> u32 {
        self.language_version.int_value()
    }

    pub(crate) fn set_auto_escaping(&mut self, auto_escaping: bool) {
        self.auto_escaping = auto_escaping;
    }

    pub(crate) fn set_output_format(&mut self, output_format: Arc<dyn OutputFormat>) {
        self.output_format = output_format;
    }
}
