//! Template exceptions raised during processing.

use stencil_core::Expression;
use thiserror::Error;

/// Failure raised while processing a template.
///
/// The renderer records the expression it was evaluating when the failure
/// happened. That reference is only readable through the crate's internal
/// bridge; users see it through [`crate::diagnostics::describe`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct TemplateException {
    message: String,
    template_name: Option<String>,
    blamed_expression: Option<Expression>,
}

impl TemplateException {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            template_name: None,
            blamed_expression: None,
        }
    }

    pub fn with_template_name(mut self, name: impl Into<String>) -> Self {
        self.template_name = Some(name.into());
        self
    }

    /// Attach the expression responsible for the failure.
    pub fn with_blamed_expression(mut self, expression: Expression) -> Self {
        self.blamed_expression = Some(expression);
        self
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn template_name(&self) -> Option<&str> {
        self.template_name.as_deref()
    }

    pub(crate) fn blamed_expression(&self) -> Option<&Expression> {
        self.blamed_expression.as_ref()
    }
}
