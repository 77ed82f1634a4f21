//! miette rendering for flowcode errors and repair warnings.
//!
//! Parse errors and repair warnings carry [`Diagnostic`]s with spans into the
//! source text and render as labelled snippets. Every other
//! [`FlowcodeError`] renders as a single report with a `flowcode::*` code.

use std::fmt;

use miette::{
    Diagnostic as MietteDiagnostic, GraphicalReportHandler, LabeledSpan,
    Severity as MietteSeverity, SourceSpan,
};

use flowcode::FlowcodeError;
use flowcode_parser::{
    Span,
    error::{Diagnostic, Severity},
};

/// A flowcode [`Diagnostic`] paired with the source it points into.
#[derive(Debug)]
struct DiagnosticAdapter<'a> {
    diag: &'a Diagnostic,
    src: &'a str,
}

impl fmt::Display for DiagnosticAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.diag.message())
    }
}

impl std::error::Error for DiagnosticAdapter<'_> {}

impl MietteDiagnostic for DiagnosticAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.diag
            .code()
            .map(|code| Box::new(code) as Box<dyn fmt::Display>)
    }

    fn severity(&self) -> Option<MietteSeverity> {
        Some(match self.diag.severity() {
            Severity::Error => MietteSeverity::Error,
            Severity::Warning => MietteSeverity::Warning,
        })
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.diag
            .help()
            .map(|help| Box::new(help) as Box<dyn fmt::Display>)
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        Some(&self.src as &dyn miette::SourceCode)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let labels = self.diag.labels();
        if labels.is_empty() {
            return None;
        }

        Some(Box::new(labels.iter().map(|label| {
            let span = source_span(label.span());
            let message = Some(label.message().to_string());
            if label.is_primary() {
                LabeledSpan::new_primary_with_span(message, span)
            } else {
                LabeledSpan::new_with_span(message, span)
            }
        })))
    }
}

/// A [`FlowcodeError`] without source spans.
#[derive(Debug)]
struct ErrorAdapter<'a>(&'a FlowcodeError);

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match self.0 {
            FlowcodeError::Io(_) => "flowcode::io",
            FlowcodeError::Parse { .. } => return None,
            FlowcodeError::Layout(_) => "flowcode::layout",
            FlowcodeError::Export(_) => "flowcode::export",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self.0 {
            FlowcodeError::Layout(_) => {
                Some(Box::new("raise `layout.max_depth` in the configuration"))
            }
            _ => None,
        }
    }
}

fn source_span(span: Span) -> SourceSpan {
    SourceSpan::new(span.start().into(), span.len())
}

fn render(reporter: &GraphicalReportHandler, diagnostic: &dyn MietteDiagnostic) -> String {
    let mut writer = String::new();
    reporter
        .render_report(&mut writer, diagnostic)
        .expect("Writing to String buffer is infallible");
    writer
}

/// Render diagnostics against `src`, one report per diagnostic.
pub fn render_diagnostics(diagnostics: &[Diagnostic], src: &str) -> Vec<String> {
    let reporter = GraphicalReportHandler::new();
    diagnostics
        .iter()
        .map(|diag| render(&reporter, &DiagnosticAdapter { diag, src }))
        .collect()
}

/// Render a pipeline error.
///
/// A parse error yields one report per diagnostic; any other error yields a
/// single report.
pub fn render_error(err: &FlowcodeError) -> Vec<String> {
    match err {
        FlowcodeError::Parse { err, src } => render_diagnostics(err.diagnostics(), src),
        _ => vec![render(&GraphicalReportHandler::new(), &ErrorAdapter(err))],
    }
}

#[cfg(test)]
mod tests {
    use flowcode::layout::LayoutError;
    use flowcode_parser::error::{ErrorCode, ParseError};

    use super::*;

    #[test]
    fn test_parse_error_renders_each_diagnostic() {
        let diags = vec![
            Diagnostic::error("first error")
                .with_code(ErrorCode::E100)
                .with_label(Span::new(0..5), "first"),
            Diagnostic::error("second error").with_label(Span::new(10..15), "second"),
        ];
        let err = FlowcodeError::new_parse_error(ParseError::from(diags), "source code here...");

        let reports = render_error(&err);

        assert_eq!(reports.len(), 2);
        assert!(reports[0].contains("first error"));
        assert!(reports[1].contains("second error"));
    }

    #[test]
    fn test_layout_error_has_code_and_help() {
        let err = FlowcodeError::Layout(LayoutError::TooDeep { max_depth: 3 });
        let adapter = ErrorAdapter(&err);

        assert_eq!(
            adapter.to_string(),
            "Layout error: flow nesting exceeds the maximum depth of 3"
        );
        assert_eq!(
            adapter.code().map(|code| code.to_string()).as_deref(),
            Some("flowcode::layout")
        );
        assert!(adapter.help().is_some());

        let reports = render_error(&err);
        assert_eq!(reports.len(), 1);
        assert!(reports[0].contains("maximum depth of 3"));
    }

    #[test]
    fn test_warning_labels_and_severity() {
        let diag = Diagnostic::warning("unclosed block")
            .with_label(Span::new(0..5), "primary label")
            .with_secondary_label(Span::new(10..15), "secondary label");
        let adapter = DiagnosticAdapter {
            diag: &diag,
            src: "some source code",
        };

        let labels: Vec<_> = adapter.labels().unwrap().collect();
        assert_eq!(labels.len(), 2);
        assert_eq!(labels[0].label(), Some("primary label"));
        assert!(labels[0].primary());
        assert!(!labels[1].primary());
        assert_eq!(adapter.severity(), Some(MietteSeverity::Warning));
    }

    #[test]
    fn test_render_warnings() {
        let src = "int x = 1\n";
        let diag = Diagnostic::warning("missing semicolon")
            .with_code(ErrorCode::E200)
            .with_label(Span::new(0..9), "statement is not terminated");

        let rendered = render_diagnostics(std::slice::from_ref(&diag), src);
        assert_eq!(rendered.len(), 1);
        assert!(rendered[0].contains("missing semicolon"));
    }
}
