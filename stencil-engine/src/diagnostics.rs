//! Human-readable reports for template exceptions.

use crate::exception::TemplateException;
use crate::internal;

const SEPARATOR: &str = "----";

/// Render an exception with the expression it was blamed on, when known.
///
/// ```text
/// The following has evaluated to null or missing
///
/// ----
/// Failed at: user.name  [in template "page" at line 3, column 14]
/// ----
/// ```
pub fn describe(exception: &TemplateException) -> String {
    let mut report = exception.message().to_string();

    match internal::blamed_expression(exception) {
        Some(expression) => {
            report.push_str("\n\n");
            report.push_str(SEPARATOR);
            report.push_str("\nFailed at: ");
            report.push_str(expression.canonical_form());
            if let Some(location) = expression.location() {
                report.push_str(&format!("  [{}]", location));
            } else if let Some(name) = exception.template_name() {
                report.push_str(&format!("  [in template \"{}\"]", name));
            }
            report.push('\n');
            report.push_str(SEPARATOR);
        }
        None => {
            if let Some(name) = exception.template_name() {
                report.push_str(&format!("\n[in template \"{}\"]", name));
            }
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use stencil_core::{Expression, SourceLocation};

    #[test]
    fn test_describe_without_blame_is_message() {
        let e = TemplateException::new("Division by zero");
        assert_eq!(describe(&e), "Division by zero");
    }

    #[test]
    fn test_describe_without_blame_names_template() {
        let e = TemplateException::new("Division by zero").with_template_name("calc");
        assert_eq!(describe(&e), "Division by zero\n[in template \"calc\"]");
    }

    #[test]
    fn test_describe_with_located_blame() {
        let e = TemplateException::new("The following has evaluated to null or missing")
            .with_blamed_expression(Expression::new("user.name").with_location(SourceLocation {
                template_name: Some("page".to_string()),
                line: 3,
                column: 14,
            }));
        let report = describe(&e);
        assert!(report.starts_with("The following has evaluated to null or missing\n\n----\n"));
        assert!(report.contains(
            "Failed at: user.name  [in template \"page\" at line 3, column 14]"
        ));
        assert!(report.ends_with("\n----"));
    }

    #[test]
    fn test_describe_with_unlocated_blame_uses_template_name() {
        let e = TemplateException::new("bad")
            .with_template_name("mail")
            .with_blamed_expression(Expression::new("x?upper"));
        assert!(describe(&e).contains("Failed at: x?upper  [in template \"mail\"]"));
    }
}
