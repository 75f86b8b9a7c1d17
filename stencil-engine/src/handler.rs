//! Template exception handlers.
//!
//! A handler decides what happens to the output when rendering fails:
//! whether a diagnostic is written into it and whether processing aborts.

use crate::diagnostics;
use crate::exception::TemplateException;
use std::fmt::{self, Debug};
use std::sync::Arc;

pub trait TemplateExceptionHandler: Debug + Send + Sync {
    /// Setting value that selects this handler, e.g. `rethrow`.
    fn name(&self) -> &'static str;

    /// Handle `exception`, optionally writing to `out`.
    ///
    /// Returning `Err` aborts template processing with that exception;
    /// returning `Ok` lets processing continue.
    fn handle(
        &self,
        exception: &TemplateException,
        out: &mut dyn fmt::Write,
    ) -> Result<(), TemplateException>;
}

/// Aborts processing without writing anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct RethrowHandler;

impl TemplateExceptionHandler for RethrowHandler {
    fn name(&self) -> &'static str {
        "rethrow"
    }

    fn handle(
        &self,
        exception: &TemplateException,
        _out: &mut dyn fmt::Write,
    ) -> Result<(), TemplateException> {
        Err(exception.clone())
    }
}

/// Writes a plain-text diagnostic into the output, then aborts.
#[derive(Debug, Clone, Copy, Default)]
pub struct DebugHandler;

impl TemplateExceptionHandler for DebugHandler {
    fn name(&self) -> &'static str {
        "debug"
    }

    fn handle(
        &self,
        exception: &TemplateException,
        out: &mut dyn fmt::Write,
    ) -> Result<(), TemplateException> {
        let report = diagnostics::describe(exception);
        if let Err(e) = write!(out, "\n{}\n", report) {
            tracing::warn!(error = %e, "Failed to write debug diagnostic to template output");
        }
        Err(exception.clone())
    }
}

/// Like [`DebugHandler`], but the diagnostic is HTML-escaped and wrapped so
/// it stays visible inside a rendered page.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlDebugHandler;

impl TemplateExceptionHandler for HtmlDebugHandler {
    fn name(&self) -> &'static str {
        "html_debug"
    }

    fn handle(
        &self,
        exception: &TemplateException,
        out: &mut dyn fmt::Write,
    ) -> Result<(), TemplateException> {
        let report = escape_html(&diagnostics::describe(exception));
        let written = write!(
            out,
            "<!-- STENCIL ERROR MESSAGE STARTS HERE -->\
             <pre style=\"color: #A00000; white-space: pre-wrap\">{}</pre>",
            report
        );
        if let Err(e) = written {
            tracing::warn!(error = %e, "Failed to write HTML diagnostic to template output");
        }
        Err(exception.clone())
    }
}

/// Swallows the exception; processing continues as if nothing happened.
#[derive(Debug, Clone, Copy, Default)]
pub struct IgnoreHandler;

impl TemplateExceptionHandler for IgnoreHandler {
    fn name(&self) -> &'static str {
        "ignore"
    }

    fn handle(
        &self,
        exception: &TemplateException,
        _out: &mut dyn fmt::Write,
    ) -> Result<(), TemplateException> {
        tracing::debug!(error = %exception, "Ignoring template exception");
        Ok(())
    }
}

fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Look up a built-in handler by its setting value.
pub fn handler_by_name(name: &str) -> Option<Arc<dyn TemplateExceptionHandler>> {
    let normalized: String = name
        .trim()
        .chars()
        .filter(|c| *c != '_' && *c != '-')
        .map(|c| c.to_ascii_lowercase())
        .collect();
    let handler: Arc<dyn TemplateExceptionHandler> = match normalized.as_str() {
        "rethrow" => Arc::new(RethrowHandler),
        "debug" => Arc::new(DebugHandler),
        "htmldebug" => Arc::new(HtmlDebugHandler),
        "ignore" => Arc::new(IgnoreHandler),
        _ => return None,
    };
    Some(handler)
}

// =============================================================================
// TESTS
// =============================================================================
