//! Line-based repair heuristics.
//!
//! The block parser assumes well-formed input. This pass looks for the three
//! slips that most often break that assumption in hand-written snippets and
//! proposes a fixed text:
//!
//! - a statement line without a terminating `;` ([`ErrorCode::E200`])
//! - an `if`/`while` condition that assigns with `=` ([`ErrorCode::E201`])
//! - blocks left open at the end of input ([`ErrorCode::E202`])
//!
//! Findings are reported as warnings; applying the fix is up to the caller.

use log::debug;

use crate::{
    error::{Diagnostic, ErrorCode},
    extract::{contains_keyword, starts_with_keyword},
    span::Span,
};

/// Lines starting with these keywords never need a terminator.
const HEADER_KEYWORDS: &[&str] = &["if", "else", "while", "for", "do"];

/// Comparison operators that contain `=` without assigning.
const COMPARISONS: &[&str] = &["==", "!=", "<=", ">=", "->"];

/// Result of [`analyze`].
#[derive(Debug, Clone)]
pub struct Analysis {
    diagnostics: Vec<Diagnostic>,
    fixed: String,
}

impl Analysis {
    /// Warnings found, in source order; an unclosed-block warning comes last.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// The source with every proposed fix applied.
    pub fn fixed(&self) -> &str {
        &self.fixed
    }

    pub fn into_fixed(self) -> String {
        self.fixed
    }

    /// Returns `true` when at least one fix was proposed.
    pub fn has_issues(&self) -> bool {
        !self.diagnostics.is_empty()
    }
}

fn is_skipped(trimmed: &str) -> bool {
    trimmed.is_empty()
        || ["//", "#", "/*", "*"]
            .iter()
            .any(|prefix| trimmed.starts_with(prefix))
}

fn needs_semicolon(trimmed: &str) -> bool {
    !trimmed.ends_with([';', '{', '}'])
        && !HEADER_KEYWORDS
            .iter()
            .any(|keyword| starts_with_keyword(trimmed, keyword))
        && !contains_keyword(trimmed, "main")
}

fn assigns_in_condition(trimmed: &str) -> bool {
    (starts_with_keyword(trimmed, "if") || starts_with_keyword(trimmed, "while"))
        && trimmed.contains('=')
        && !COMPARISONS.iter().any(|op| trimmed.contains(op))
}

/// Span of `trimmed` inside a line starting at byte `offset`.
fn trimmed_span(line: &str, offset: usize) -> Span {
    let leading = line.len() - line.trim_start().len();
    let start = offset + leading;
    Span::new(start..start + line.trim().len())
}

/// Scans `source` line by line and proposes fixes.
///
/// Blank lines, comment lines and preprocessor lines are ignored.
///
/// ```
/// # use flowcode_parser::repair::analyze;
/// let analysis = analyze("x = 1\nif (x = 2) {\n  y = 3;\n");
///
/// assert_eq!(analysis.diagnostics().len(), 3);
/// assert_eq!(analysis.fixed(), "x = 1;\nif (x == 2) {\n  y = 3;\n}\n");
/// ```
pub fn analyze(source: &str) -> Analysis {
    let ends_with_newline = source.ends_with('\n');
    let mut lines: Vec<String> = source.split('\n').map(str::to_string).collect();
    if ends_with_newline {
        lines.pop();
    }

    let mut diagnostics = Vec::new();
    let mut open_braces: Vec<usize> = Vec::new();
    let mut offset = 0;

    for (line_number, line) in lines.iter_mut().enumerate() {
        let line_start = offset;
        offset += line.len() + 1;

        let original = line.clone();
        let trimmed = original.trim();
        if is_skipped(trimmed) {
            continue;
        }
        let span = trimmed_span(&original, line_start);

        if needs_semicolon(trimmed) {
            diagnostics.push(
                Diagnostic::warning("missing semicolon")
                    .with_code(ErrorCode::E200)
                    .with_label(span, "statement is not terminated")
                    .with_help("add `;` at the end of the line"),
            );
            let body_len = line.trim_end().len();
            line.insert(body_len, ';');
            debug!(line = line_number + 1; "Proposed missing semicolon");
        }

        if assigns_in_condition(trimmed) {
            diagnostics.push(
                Diagnostic::warning("assignment in condition")
                    .with_code(ErrorCode::E201)
                    .with_label(span, "`=` assigns instead of comparing")
                    .with_help("use `==` to compare"),
            );
            *line = line.replacen('=', "==", 1);
            debug!(line = line_number + 1; "Proposed comparison fix");
        }

        for (at, c) in original.char_indices() {
            match c {
                '{' => open_braces.push(line_start + at),
                '}' => {
                    open_braces.pop();
                }
                _ => {}
            }
        }
    }

    if !open_braces.is_empty() {
        let end = Span::new(source.len()..source.len());
        let missing = open_braces.len();
        let diagnostic = open_braces.iter().fold(
            Diagnostic::warning("unclosed block")
                .with_code(ErrorCode::E202)
                .with_label(end, format!("expected {missing} more `}}` before end of input")),
            |diagnostic, &at| {
                diagnostic.with_secondary_label(Span::new(at..at + 1), "block opened here")
            },
        );
        diagnostics.push(diagnostic.with_help("close every `{` with a matching `}`"));
        lines.extend(std::iter::repeat_n("}".to_string(), missing));
        debug!(missing = missing; "Proposed closing braces");
    }

    let mut fixed = lines.join("\n");
    if ends_with_newline {
        fixed.push('\n');
    }

    Analysis { diagnostics, fixed }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codes(analysis: &Analysis) -> Vec<ErrorCode> {
        analysis
            .diagnostics()
            .iter()
            .filter_map(Diagnostic::code)
            .collect()
    }

    #[test]
    fn test_clean_source_has_no_issues() {
        let source = concat!(
            "int main() {\n",
            "    int x = 0;\n",
            "    while (x < 3) {\n",
            "        x++;\n",
            "    }\n",
            "    return 0;\n",
            "}\n",
        );
        let analysis = analyze(source);

        assert!(!analysis.has_issues());
        assert_eq!(analysis.fixed(), source);
    }

    #[test]
    fn test_missing_semicolon() {
        let analysis = analyze("x = 1\ny = 2;");

        assert_eq!(codes(&analysis), [ErrorCode::E200]);
        assert_eq!(analysis.fixed(), "x = 1;\ny = 2;");
        assert_eq!(analysis.diagnostics()[0].labels()[0].span().range(), 0..5);
    }

    #[test]
    fn test_semicolon_goes_before_trailing_whitespace() {
        let analysis = analyze("  x = 1  \r\n");
        assert_eq!(analysis.fixed(), "  x = 1;  \r\n");
    }

    #[test]
    fn test_headers_and_comments_need_no_semicolon() {
        let source = concat!(
            "// note\n",
            "#include <stdio.h>\n",
            "/* block\n * more */\n",
            "if (x)\nelse\nfor (;;)\ndo\nint main()\n",
        );
        let analysis = analyze(source);

        assert!(!analysis.has_issues(), "{:?}", analysis.diagnostics());
    }

    #[test]
    fn test_identifier_starting_with_keyword_needs_semicolon() {
        let analysis = analyze("format = 2");
        assert_eq!(codes(&analysis), [ErrorCode::E200]);
    }

    #[test]
    fn test_condition_header_gets_one_fix() {
        let analysis = analyze("if (x = 2)\n    y = 1;\n");

        assert_eq!(codes(&analysis), [ErrorCode::E201]);
        assert_eq!(analysis.fixed(), "if (x == 2)\n    y = 1;\n");
    }

    #[test]
    fn test_assignment_in_condition() {
        let analysis = analyze("while (x = 10) {\n}");

        assert_eq!(codes(&analysis), [ErrorCode::E201]);
        assert_eq!(analysis.fixed(), "while (x == 10) {\n}");
    }

    #[test]
    fn test_comparisons_are_not_flagged() {
        for line in ["if (a == b) {", "if (a != b) {", "while (a <= b) {", "if (p->x) {"] {
            let analysis = analyze(&format!("{line}\n}}"));
            assert!(!analysis.has_issues(), "{line}");
        }
    }

    #[test]
    fn test_unclosed_blocks() {
        let source = "if (x) {\n  while (y) {\n    z();";
        let analysis = analyze(source);

        assert_eq!(codes(&analysis), [ErrorCode::E202]);
        assert_eq!(analysis.fixed(), format!("{source}\n}}\n}}"));

        let labels = analysis.diagnostics()[0].labels();
        assert_eq!(labels.len(), 3);
        assert!(labels[0].is_primary());
        assert_eq!(labels[0].span().start(), source.len());
        assert_eq!(labels[1].span().start(), 7);
    }

    #[test]
    fn test_condition_line_gets_no_semicolon() {
        let analysis = analyze("if (x = 1) y = 2");

        assert_eq!(codes(&analysis), [ErrorCode::E201]);
        assert_eq!(analysis.fixed(), "if (x == 1) y = 2");
    }
}
