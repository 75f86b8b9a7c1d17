//! Expression references carried by template exceptions

use serde::{Deserialize, Serialize};
use std::fmt;

/// Position of a construct inside a template source.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourceLocation {
    pub template_name: Option<String>,
    /// 1-based line.
    pub line: u32,
    /// 1-based column.
    pub column: u32,
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.template_name {
            Some(name) => write!(
                f,
                "in template \"{}\" at line {}, column {}",
                name, self.line, self.column
            ),
            None => write!(
                f,
                "in nameless template at line {}, column {}",
                self.line, self.column
            ),
        }
    }
}

/// A parsed sub-expression, as the parser hands it to error reporting.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Expression {
    canonical_form: String,
    location: Option<SourceLocation>,
}

impl Expression {
    pub fn new(canonical_form: impl Into<String>) -> Self {
        Self {
            canonical_form: canonical_form.into(),
            location: None,
        }
    }

    pub fn with_location(mut self, location: SourceLocation) -> Self {
        self.location = Some(location);
        self
    }

    /// Source text of the expression, normalized by the parser.
    pub fn canonical_form(&self) -> &str {
        &self.canonical_form
    }

    pub fn location(&self) -> Option<&SourceLocation> {
        self.location.as_ref()
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical_form)
    }
}
