//! Splits source text into statement fragments.
//!
//! The tokenizer is deliberately shallow: it does not understand C, it only
//! cuts the text into the line-like units the block parser consumes.
//!
//! - `{` and `}` always become fragments of their own
//! - the `else` keyword becomes a fragment of its own
//! - newlines end the current fragment
//! - `//` and `/* */` comments and `#` directives are dropped
//! - string and character literals are kept intact, so braces or `else`
//!   inside them never split a statement
//!
//! Every fragment remembers the byte span of source it was built from.

use log::debug;
use winnow::{
    Parser as _,
    combinator::{alt, opt, preceded, repeat},
    error::{ContextError, ModalResult},
    stream::{LocatingSlice, Location, Stream},
    token::{none_of, take, take_until, take_while},
};

use crate::span::Span;

type Input<'a> = LocatingSlice<&'a str>;
type IResult<O> = ModalResult<O, ContextError>;

const BLOCK_OPEN: &str = "{";
const BLOCK_CLOSE: &str = "}";
const ELSE: &str = "else";

/// One trimmed, comment-free statement-level unit of source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    text: String,
    span: Span,
}

impl Fragment {
    pub fn new(text: impl Into<String>, span: Span) -> Self {
        Self {
            text: text.into(),
            span,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn span(&self) -> Span {
        self.span
    }

    /// Returns `true` for a `{` fragment.
    pub fn is_block_open(&self) -> bool {
        self.text == BLOCK_OPEN
    }

    /// Returns `true` for a `}` fragment.
    pub fn is_block_close(&self) -> bool {
        self.text == BLOCK_CLOSE
    }

    /// Returns `true` for an `else` fragment.
    pub fn is_else(&self) -> bool {
        self.text == ELSE
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Piece<'a> {
    Text(&'a str),
    /// A comment; separates surrounding text like whitespace would.
    Blank,
    Newline,
    BlockOpen,
    BlockClose,
    Else,
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// A quoted literal, escapes included. An unterminated literal ends at the
/// end of its line.
fn quoted<'a>(input: &mut Input<'a>, quote: char) -> IResult<&'a str> {
    (
        quote,
        repeat::<_, _, (), _, _>(
            0..,
            alt((
                preceded('\\', none_of(['\n'])).void(),
                none_of([quote, '\\', '\n']).void(),
            )),
        ),
        opt(quote),
    )
        .take()
        .parse_next(input)
}

fn string_literal<'a>(input: &mut Input<'a>) -> IResult<&'a str> {
    quoted(input, '"')
}

fn char_literal<'a>(input: &mut Input<'a>) -> IResult<&'a str> {
    quoted(input, '\'')
}

fn line_comment(input: &mut Input<'_>) -> IResult<()> {
    ("//", take_while(0.., |c: char| c != '\n'))
        .void()
        .parse_next(input)
}

/// A block comment; an unterminated one runs to the end of input.
fn block_comment(input: &mut Input<'_>) -> IResult<()> {
    (
        "/*",
        alt((
            (take_until(0.., "*/"), "*/").void(),
            take_while(0.., |_: char| true).void(),
        )),
    )
        .void()
        .parse_next(input)
}

fn directive(input: &mut Input<'_>) -> IResult<()> {
    ('#', take_while(0.., |c: char| c != '\n'))
        .void()
        .parse_next(input)
}

fn word<'a>(input: &mut Input<'a>) -> IResult<Piece<'a>> {
    take_while(1.., is_word_char)
        .map(|word: &str| {
            if word == ELSE {
                Piece::Else
            } else {
                Piece::Text(word)
            }
        })
        .parse_next(input)
}

fn piece<'a>(input: &mut Input<'a>) -> IResult<Piece<'a>> {
    alt((
        line_comment.value(Piece::Blank),
        block_comment.value(Piece::Blank),
        '\n'.value(Piece::Newline),
        '{'.value(Piece::BlockOpen),
        '}'.value(Piece::BlockClose),
        string_literal.map(Piece::Text),
        char_literal.map(Piece::Text),
        word,
        take(1usize).map(Piece::Text),
    ))
    .parse_next(input)
}

/// Accumulates pieces into fragments.
#[derive(Default)]
struct FragmentBuilder {
    fragments: Vec<Fragment>,
    text: String,
    span: Option<Span>,
}

impl FragmentBuilder {
    /// No significant text on the current line yet.
    fn at_line_start(&self) -> bool {
        self.text.trim().is_empty()
    }

    fn push(&mut self, piece: Piece<'_>, span: Span) {
        match piece {
            Piece::Text(text) => {
                if text.trim().is_empty() {
                    if !self.text.is_empty() {
                        self.text.push_str(text);
                    }
                } else {
                    self.text.push_str(text);
                    self.span = Some(self.span.map_or(span, |current| current.union(span)));
                }
            }
            Piece::Blank => {
                if !self.text.is_empty() {
                    self.text.push(' ');
                }
            }
            Piece::Newline => self.flush(),
            Piece::BlockOpen => self.push_alone(BLOCK_OPEN, span),
            Piece::BlockClose => self.push_alone(BLOCK_CLOSE, span),
            Piece::Else => self.push_alone(ELSE, span),
        }
    }

    fn push_alone(&mut self, text: &str, span: Span) {
        self.flush();
        self.fragments.push(Fragment::new(text, span));
    }

    fn flush(&mut self) {
        let text = self.text.trim();
        if let (false, Some(span)) = (text.is_empty(), self.span) {
            self.fragments.push(Fragment::new(text, span));
        }
        self.text.clear();
        self.span = None;
    }

    fn finish(mut self) -> Vec<Fragment> {
        self.flush();
        self.fragments
    }
}

/// Splits source text into an ordered sequence of statement fragments.
///
/// Tokenizing never fails: text that is not recognised as anything special
/// simply becomes part of the current fragment.
///
/// # Example
///
/// ```
/// # use flowcode_parser::tokenize;
/// let fragments = tokenize("if (x > 0) { printf(\"pos\"); } else { y = 1; }");
/// let texts: Vec<&str> = fragments.iter().map(|f| f.text()).collect();
///
/// assert_eq!(
///     texts,
///     ["if (x > 0)", "{", "printf(\"pos\");", "}", "else", "{", "y = 1;", "}"]
/// );
/// ```
pub fn tokenize(source: &str) -> Vec<Fragment> {
    let mut input = LocatingSlice::new(source);
    let mut builder = FragmentBuilder::default();

    while !input.is_empty() {
        if builder.at_line_start() {
            let checkpoint = input.checkpoint();
            if directive(&mut input).is_ok() {
                continue;
            }
            input.reset(&checkpoint);
        }

        let start = input.current_token_start();
        match piece(&mut input) {
            Ok(piece) => {
                let end = input.current_token_start();
                builder.push(piece, Span::new(start..end));
            }
            Err(_) => {
                input.next_token();
            }
        }
    }

    let fragments = builder.finish();
    debug!(fragments_count = fragments.len(); "Source tokenized");
    fragments
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(source: &str) -> Vec<String> {
        tokenize(source)
            .into_iter()
            .map(|fragment| fragment.text().to_string())
            .collect()
    }

    #[test]
    fn test_braces_get_their_own_fragments() {
        assert_eq!(
            texts("while (i < 3) { i++; }"),
            ["while (i < 3)", "{", "i++;", "}"]
        );
    }

    #[test]
    fn test_else_is_split_out() {
        assert_eq!(texts("} else {"), ["}", "else", "{"]);
        assert_eq!(texts("}else if (a) {"), ["}", "else", "if (a)", "{"]);
    }

    #[test]
    fn test_else_inside_identifier_is_kept() {
        assert_eq!(texts("elsewhere = 1;"), ["elsewhere = 1;"]);
    }

    #[test]
    fn test_literals_are_not_split() {
        assert_eq!(
            texts("printf(\"{ else }\");\nc = '{';"),
            ["printf(\"{ else }\");", "c = '{';"]
        );
    }

    #[test]
    fn test_comments_and_blank_lines_are_dropped() {
        let source = "// header\n\n  x = 1; // trailing\n/* block\n * comment */\ny = 2;";
        assert_eq!(texts(source), ["x = 1;", "y = 2;"]);
    }

    #[test]
    fn test_inline_block_comment_separates_text() {
        assert_eq!(texts("x = /* one */1;"), ["x =  1;"]);
    }

    #[test]
    fn test_unterminated_block_comment_swallows_rest() {
        assert_eq!(texts("x = 1;\n/* open\ny = 2;"), ["x = 1;"]);
    }

    #[test]
    fn test_directives_are_dropped() {
        assert_eq!(
            texts("#include <stdio.h>\n  #define N 3\nint x = N;"),
            ["int x = N;"]
        );
    }

    #[test]
    fn test_hash_inside_statement_is_kept() {
        assert_eq!(texts("printf(\"#1\");"), ["printf(\"#1\");"]);
    }

    #[test]
    fn test_fragment_spans() {
        let source = "int main() {\n    x = 1;\n}";
        let fragments = tokenize(source);

        assert_eq!(fragments.len(), 4);
        assert_eq!(&source[fragments[0].span().range()], "int main()");
        assert_eq!(&source[fragments[1].span().range()], "{");
        assert_eq!(&source[fragments[2].span().range()], "x = 1;");
        assert!(fragments[3].is_block_close());
    }

    #[test]
    fn test_crlf_line_endings() {
        assert_eq!(texts("x = 1;\r\ny = 2;\r\n"), ["x = 1;", "y = 2;"]);
    }

    #[test]
    fn test_empty_source() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("   \n\t\n").is_empty());
    }
}
