//! Output format descriptors
//!
//! The escaping itself lives in the renderer; this module only describes the
//! formats so that configuration code can decide whether auto-escaping applies.

use crate::settings::AutoEscapingPolicy;
use std::fmt::Debug;
use std::sync::Arc;

/// An output format a template can produce.
pub trait OutputFormat: Debug + Send + Sync {
    /// Unique name, e.g. `HTML`.
    fn name(&self) -> &str;

    /// MIME type, if the format has one.
    fn mime_type(&self) -> Option<&str>;

    /// True for markup formats that have an escaping function.
    fn supports_escaping(&self) -> bool {
        false
    }

    /// True when escaping should be on unless the template says otherwise.
    fn is_auto_escaped_by_default(&self) -> bool {
        false
    }

    /// Resolve the effective auto-escaping flag under `policy`.
    fn auto_escaping_under(&self, policy: AutoEscapingPolicy) -> bool {
        match policy {
            AutoEscapingPolicy::Disable => false,
            AutoEscapingPolicy::EnableIfDefault => {
                self.supports_escaping() && self.is_auto_escaped_by_default()
            }
            AutoEscapingPolicy::EnableIfSupported => self.supports_escaping(),
        }
    }
}

/// Format of templates whose output format was never specified.
#[derive(Debug, Clone, Copy, Default)]
pub struct UndefinedOutputFormat;

impl OutputFormat for UndefinedOutputFormat {
    fn name(&self) -> &str {
        "undefined"
    }

    fn mime_type(&self) -> Option<&str> {
        None
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextOutputFormat;

impl OutputFormat for PlainTextOutputFormat {
    fn name(&self) -> &str {
        "plainText"
    }

    fn mime_type(&self) -> Option<&str> {
        Some("text/plain")
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlOutputFormat;

impl OutputFormat for HtmlOutputFormat {
    fn name(&self) -> &str {
        "HTML"
    }

    fn mime_type(&self) -> Option<&str> {
        Some("text/html")
    }

    fn supports_escaping(&self) -> bool {
        true
    }

    fn is_auto_escaped_by_default(&self) -> bool {
        true
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct XmlOutputFormat;

impl OutputFormat for XmlOutputFormat {
    fn name(&self) -> &str {
        "XML"
    }

    fn mime_type(&self) -> Option<&str> {
        Some("application/xml")
    }

    fn supports_escaping(&self) -> bool {
        true
    }

    fn is_auto_escaped_by_default(&self) -> bool {
        true
    }
}

/// RTF escapes braces and backslashes, but only on request.
#[derive(Debug, Clone, Copy, Default)]
pub struct RtfOutputFormat;

impl OutputFormat for RtfOutputFormat {
    fn name(&self) -> &str {
        "RTF"
    }

    fn mime_type(&self) -> Option<&str> {
        Some("application/rtf")
    }

    fn supports_escaping(&self) -> bool {
        true
    }
}

/// Names of the built-in formats, in lookup order.
pub const BUILTIN_OUTPUT_FORMAT_NAMES: &[&str] = &["undefined", "plainText", "HTML", "XML", "RTF"];

/// Look up a built-in format by name (case-insensitive).
pub fn builtin_output_format(name: &str) -> Option<Arc<dyn OutputFormat>> {
    let format: Arc<dyn OutputFormat> = match name.trim().to_ascii_lowercase().as_str() {
        "undefined" => Arc::new(UndefinedOutputFormat),
        "plaintext" | "plain_text" => Arc::new(PlainTextOutputFormat),
        "html" => Arc::new(HtmlOutputFormat),
        "xml" => Arc::new(XmlOutputFormat),
        "rtf" => Arc::new(RtfOutputFormat),
        _ => return None,
    };
    Some(format)
}

// =============================================================================
// TESTS
// =============================================================================
