//! Text extraction from single fragments.
//!
//! These helpers recognise statement shapes (keywords, calls, declarations)
//! and pull labels out of them: conditions between parentheses, the middle
//! clause of a `for` header, the first string literal of an output call and
//! the target variable of an input call. All keyword checks respect
//! identifier boundaries and ignore text inside literals.

use winnow::{
    Parser as _,
    ascii::multispace0,
    combinator::{alt, not, opt, peek, preceded, repeat, terminated},
    error::{ContextError, ModalResult},
    token::{literal, none_of, one_of, take, take_while},
};

type IResult<O> = ModalResult<O, ContextError>;

/// Keywords that open a declaration.
const TYPE_KEYWORDS: &[&str] = &[
    "int", "float", "char", "double", "long", "short", "unsigned", "void",
];

const OUTPUT_CALL: &str = "printf";
const INPUT_CALL: &str = "scanf";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lexeme<'a> {
    /// A string literal, quotes included.
    Str(&'a str),
    Word(&'a str),
    Open,
    Close,
    Other,
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn quoted<'a>(input: &mut &'a str, quote: char) -> IResult<&'a str> {
    (
        quote,
        repeat::<_, _, (), _, _>(
            0..,
            alt((
                preceded('\\', take(1usize)).void(),
                none_of([quote, '\\']).void(),
            )),
        ),
        opt(quote),
    )
        .take()
        .parse_next(input)
}

fn string_literal<'a>(input: &mut &'a str) -> IResult<&'a str> {
    quoted(input, '"')
}

fn char_literal<'a>(input: &mut &'a str) -> IResult<&'a str> {
    quoted(input, '\'')
}

fn lexeme<'a>(input: &mut &'a str) -> IResult<Lexeme<'a>> {
    alt((
        string_literal.map(Lexeme::Str),
        char_literal.value(Lexeme::Other),
        take_while(1.., is_word_char).map(Lexeme::Word),
        '('.value(Lexeme::Open),
        ')'.value(Lexeme::Close),
        take(1usize).value(Lexeme::Other),
    ))
    .parse_next(input)
}

fn lexemes(text: &str) -> impl Iterator<Item = Lexeme<'_>> {
    let mut input = text;
    std::iter::from_fn(move || lexeme.parse_next(&mut input).ok())
}

/// Text between the `(` that opens `text` and its balanced `)`, literals
/// skipped over. Nesting is tracked with a counter, so depth is unbounded.
fn balanced(text: &str) -> Option<&str> {
    let mut input = text;
    let mut depth = 0usize;
    while let Ok(piece) = lexeme.parse_next(&mut input) {
        match piece {
            Lexeme::Open => depth += 1,
            Lexeme::Close if depth > 0 => depth -= 1,
            _ => {}
        }
        if depth == 0 {
            let consumed = text.len() - input.len();
            return (piece == Lexeme::Close).then(|| &text[1..consumed - 1]);
        }
    }
    None
}

fn input_target_at<'a>(input: &mut &'a str) -> IResult<&'a str> {
    preceded((',', multispace0, opt('&')), take_while(1.., is_word_char)).parse_next(input)
}

/// Returns `true` when `text` begins with `keyword` as a whole word.
///
/// ```
/// # use flowcode_parser::extract::starts_with_keyword;
/// assert!(starts_with_keyword("if(x)", "if"));
/// assert!(!starts_with_keyword("ifdef", "if"));
/// ```
pub fn starts_with_keyword(text: &str, keyword: &str) -> bool {
    let mut input = text;
    let result: IResult<&str> =
        terminated(literal(keyword), peek(not(one_of(is_word_char)))).parse_next(&mut input);
    result.is_ok()
}

/// Returns `true` when `keyword` occurs as a whole word outside literals.
pub fn contains_keyword(text: &str, keyword: &str) -> bool {
    lexemes(text).any(|lexeme| lexeme == Lexeme::Word(keyword))
}

/// Returns `true` for an output call such as `printf("...")`.
pub fn is_output(text: &str) -> bool {
    starts_with_keyword(text, OUTPUT_CALL)
}

/// Returns `true` for an input call such as `scanf("%d", &n)`.
pub fn is_input(text: &str) -> bool {
    starts_with_keyword(text, INPUT_CALL)
}

/// Returns `true` for a declaration without initializer, e.g. `int x;` or
/// `int main()`.
pub fn is_declaration(text: &str) -> bool {
    TYPE_KEYWORDS
        .iter()
        .any(|keyword| starts_with_keyword(text, keyword))
        && !text.contains('=')
}

/// Text inside the first parenthesised group.
///
/// The group is matched with balanced parentheses first. When the
/// parentheses do not balance, everything from the first `(` to the last
/// `)` is taken instead. Returns `None` when no such pair exists.
///
/// ```
/// # use flowcode_parser::extract::parenthesized;
/// assert_eq!(parenthesized("if (f(x) > 0)"), Some("f(x) > 0"));
/// assert_eq!(parenthesized("while ((a > b)"), Some("(a > b"));
/// assert_eq!(parenthesized("if x > 0"), None);
/// ```
pub fn parenthesized(text: &str) -> Option<&str> {
    let open = text.find('(')?;
    balanced(&text[open..]).or_else(|| {
        let close = text.rfind(')')?;
        (close > open).then(|| &text[open + 1..close])
    })
}

/// The middle clause of a `for` header, trimmed.
///
/// Returns `None` when the header has no second clause or it is empty.
pub fn for_condition(text: &str) -> Option<&str> {
    parenthesized(text)?
        .split(';')
        .nth(1)
        .map(str::trim)
        .filter(|condition| !condition.is_empty())
}

/// The cleaned text of the first string literal in `text`.
///
/// `\n` escapes are removed, `\t` escapes become spaces and the result is
/// trimmed. Returns `None` when there is no literal.
pub fn output_text(text: &str) -> Option<String> {
    lexemes(text).find_map(|lexeme| match lexeme {
        Lexeme::Str(literal) => Some(clean_literal(literal)),
        _ => None,
    })
}

fn clean_literal(literal: &str) -> String {
    let inner = literal.strip_prefix('"').unwrap_or(literal);
    let inner = inner.strip_suffix('"').unwrap_or(inner);
    inner
        .replace("\\n", "")
        .replace("\\t", " ")
        .trim()
        .to_string()
}

/// The variable an input call reads into: the first identifier directly
/// after a comma, optionally behind `&`.
///
/// ```
/// # use flowcode_parser::extract::input_target;
/// assert_eq!(input_target("scanf(\"%d\", &count);"), Some("count"));
/// assert_eq!(input_target("scanf(\"%d\");"), None);
/// ```
pub fn input_target(text: &str) -> Option<&str> {
    text.match_indices(',').find_map(|(at, _)| {
        let mut input = &text[at..];
        input_target_at.parse_next(&mut input).ok()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_with_keyword_respects_boundaries() {
        assert!(starts_with_keyword("while (x)", "while"));
        assert!(starts_with_keyword("for(;;)", "for"));
        assert!(starts_with_keyword("return", "return"));
        assert!(!starts_with_keyword("format(x);", "for"));
        assert!(!starts_with_keyword("whilex = 1;", "while"));
        assert!(!starts_with_keyword("x = 1;", "if"));
    }

    #[test]
    fn test_contains_keyword_ignores_literals_and_identifiers() {
        assert!(contains_keyword("return 0;", "return"));
        assert!(contains_keyword("if (x) return;", "return"));
        assert!(!contains_keyword("printf(\"return\");", "return"));
        assert!(!contains_keyword("returned = 1;", "return"));
        assert!(!contains_keyword("c = 'r';", "r"));
    }

    #[test]
    fn test_declarations() {
        assert!(is_declaration("int x;"));
        assert!(is_declaration("int main()"));
        assert!(is_declaration("unsigned long total;"));
        assert!(!is_declaration("int x = 0;"));
        assert!(!is_declaration("integer = 4;"));
        assert!(!is_declaration("x = 1;"));
    }

    #[test]
    fn test_parenthesized_skips_literals() {
        assert_eq!(parenthesized("if (s == \")\")"), Some("s == \")\""));
        assert_eq!(parenthesized("if (c == '(')"), Some("c == '('"));
    }

    #[test]
    fn test_parenthesized_deep_nesting() {
        let text = format!("if ({}x{})", "(".repeat(100_000), ")".repeat(100_000));
        let inner = parenthesized(&text).expect("balanced group");
        assert_eq!(inner.len(), 200_001);
        assert!(inner.starts_with("((") && inner.ends_with("))"));
    }

    #[test]
    fn test_parenthesized_without_close() {
        assert_eq!(parenthesized("if (x > 0"), None);
        assert_eq!(parenthesized("if ) x ("), None);
    }

    #[test]
    fn test_for_condition() {
        assert_eq!(for_condition("for (i = 0; i < 5; i++)"), Some("i < 5"));
        assert_eq!(for_condition("for (;;)"), None);
        assert_eq!(for_condition("for (i = 0)"), None);
        assert_eq!(for_condition("for"), None);
    }

    #[test]
    fn test_output_text_cleans_escapes() {
        assert_eq!(output_text("printf(\"Hello\\n\");").as_deref(), Some("Hello"));
        assert_eq!(output_text("printf(\"a\\tb\");").as_deref(), Some("a b"));
        assert_eq!(output_text("printf(\"\\n\");").as_deref(), Some(""));
        assert_eq!(
            output_text("printf(\"say \\\"hi\\\"\");").as_deref(),
            Some("say \\\"hi\\\"")
        );
        assert_eq!(output_text("printf(msg);"), None);
    }

    #[test]
    fn test_input_target() {
        assert_eq!(input_target("scanf(\"%d\", &n);"), Some("n"));
        assert_eq!(input_target("scanf(\"%d\",value);"), Some("value"));
        assert_eq!(input_target("scanf(\"%d,%d\", &a, &b);"), Some("a"));
        assert_eq!(input_target("scanf(\"%d\", *p);"), None);
    }

    #[test]
    fn test_calls() {
        assert!(is_output("printf(\"x\");"));
        assert!(is_input("scanf (\"%d\", &x);"));
        assert!(!is_output("printfx();"));
        assert!(!is_input("x = scanf(\"%d\", &y);"));
    }
}
