//! Block parser: turns fragments into a flow tree.
//!
//! Parsing walks the fragment sequence once. Each fragment is classified by
//! the first matching entry of an ordered rule table; the rule builds at most
//! one node and reports where parsing continues. Braces drive recursion: a
//! `{` after an `if`, `else`, `while` or `for` header opens a nested
//! sequence that ends at the matching `}`.

use log::trace;
use serde::Deserialize;

use flowcode_core::flow::Node;

use crate::{
    error::{Diagnostic, ErrorCode, Result},
    extract,
    tokenizer::Fragment,
};

const DEFAULT_CONDITION: &str = "condition";
const WHILE_FALLBACK: &str = "while";
const FOR_FALLBACK: &str = "for";
const INPUT_FALLBACK: &str = "Value";
const MULTIPLE_OUTPUT_LABEL: &str = "Display Output";

/// Parser settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    max_depth: usize,
}

impl ParserConfig {
    pub fn new(max_depth: usize) -> Self {
        Self { max_depth }
    }

    /// Maximum number of nested blocks accepted before parsing fails.
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self { max_depth: 64 }
    }
}

/// Outcome of applying a rule at one position.
struct Step {
    node: Option<Node>,
    next: usize,
}

impl Step {
    fn node(node: Node, next: usize) -> Self {
        Self {
            node: Some(node),
            next,
        }
    }

    fn skip(next: usize) -> Self {
        Self { node: None, next }
    }
}

/// One entry of the classification table.
struct Rule {
    name: &'static str,
    applies: fn(&[Fragment], usize) -> bool,
    build: fn(&BlockParser, &[Fragment], usize, usize) -> Result<Step>,
}

/// Classification rules, tried in order. The first rule whose `applies`
/// matches the fragment at the current position wins.
const RULES: &[Rule] = &[
    Rule {
        name: "declaration",
        applies: is_declaration,
        build: BlockParser::skip_declaration,
    },
    Rule {
        name: "if",
        applies: is_if,
        build: BlockParser::parse_if,
    },
    Rule {
        name: "loop",
        applies: is_loop,
        build: BlockParser::parse_loop,
    },
    Rule {
        name: "prompted input",
        applies: is_prompted_input,
        build: BlockParser::parse_prompted_input,
    },
    Rule {
        name: "output",
        applies: is_output,
        build: BlockParser::parse_output_run,
    },
    Rule {
        name: "input",
        applies: is_input,
        build: BlockParser::parse_input,
    },
    Rule {
        name: "end",
        applies: is_end,
        build: BlockParser::parse_end,
    },
];

/// Anything no other rule claims becomes a process step.
static PROCESS_RULE: Rule = Rule {
    name: "process",
    applies: always,
    build: BlockParser::parse_process,
};

fn text_at(fragments: &[Fragment], index: usize) -> &str {
    fragments.get(index).map_or("", Fragment::text)
}

fn is_declaration(fragments: &[Fragment], index: usize) -> bool {
    extract::is_declaration(text_at(fragments, index))
}

fn is_if(fragments: &[Fragment], index: usize) -> bool {
    extract::starts_with_keyword(text_at(fragments, index), "if")
}

fn is_loop(fragments: &[Fragment], index: usize) -> bool {
    let text = text_at(fragments, index);
    extract::starts_with_keyword(text, "while") || extract::starts_with_keyword(text, "for")
}

fn is_prompted_input(fragments: &[Fragment], index: usize) -> bool {
    extract::is_output(text_at(fragments, index))
        && extract::is_input(text_at(fragments, index + 1))
}

fn is_output(fragments: &[Fragment], index: usize) -> bool {
    extract::is_output(text_at(fragments, index))
}

fn is_input(fragments: &[Fragment], index: usize) -> bool {
    extract::is_input(text_at(fragments, index))
}

fn is_end(fragments: &[Fragment], index: usize) -> bool {
    extract::contains_keyword(text_at(fragments, index), "return")
}

fn always(_: &[Fragment], _: usize) -> bool {
    true
}

fn input_label(text: &str) -> String {
    format!(
        "Input {}",
        extract::input_target(text).unwrap_or(INPUT_FALLBACK)
    )
}

/// Recursive-descent parser over a fragment sequence.
///
/// The parser is total: every fragment sequence yields a tree, except when
/// blocks nest deeper than [`ParserConfig::max_depth`].
#[derive(Debug, Clone, Copy, Default)]
pub struct BlockParser {
    config: ParserConfig,
}

impl BlockParser {
    pub fn new(config: ParserConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Parses the sequence starting at `start` until the closing `}` of the
    /// current block or the end of input.
    ///
    /// Returns the nodes built and the index just past the closing `}` (or
    /// the fragment count when input ran out). `depth` is the nesting level
    /// of the block being parsed, zero for the root sequence.
    ///
    /// # Errors
    ///
    /// Returns an [`ErrorCode::E100`] diagnostic when blocks nest deeper
    /// than the configured maximum.
    pub fn parse_block(
        &self,
        fragments: &[Fragment],
        start: usize,
        depth: usize,
    ) -> Result<(Vec<Node>, usize)> {
        let mut nodes = Vec::new();
        let mut index = start;

        while let Some(fragment) = fragments.get(index) {
            if fragment.is_block_close() {
                return Ok((nodes, index + 1));
            }
            // A brace without a controlling header just groups statements.
            if fragment.is_block_open() {
                index += 1;
                continue;
            }

            let rule = RULES
                .iter()
                .find(|rule| (rule.applies)(fragments, index))
                .unwrap_or(&PROCESS_RULE);
            trace!(rule = rule.name, fragment = fragment.text(); "Classified fragment");

            let step = (rule.build)(self, fragments, index, depth)?;
            nodes.extend(step.node);
            index = step.next;
        }

        Ok((nodes, index))
    }

    /// Parses the block opened at `index` when the fragment there is `{`.
    ///
    /// Returns an empty sequence and `index` unchanged otherwise.
    fn optional_block(
        &self,
        fragments: &[Fragment],
        index: usize,
        depth: usize,
        header: &Fragment,
    ) -> Result<(Vec<Node>, usize)> {
        if !fragments.get(index).is_some_and(Fragment::is_block_open) {
            return Ok((Vec::new(), index));
        }

        let nested = depth + 1;
        if nested > self.config.max_depth {
            return Err(Diagnostic::error("nesting too deep")
                .with_code(ErrorCode::E100)
                .with_label(
                    header.span(),
                    format!("this block exceeds {} nested levels", self.config.max_depth),
                )
                .with_help("raise `parser.max_depth` or flatten the control flow"));
        }

        self.parse_block(fragments, index + 1, nested)
    }

    fn skip_declaration(&self, _: &[Fragment], index: usize, _: usize) -> Result<Step> {
        Ok(Step::skip(index + 1))
    }

    fn parse_if(&self, fragments: &[Fragment], index: usize, depth: usize) -> Result<Step> {
        let header = &fragments[index];
        let condition = extract::parenthesized(header.text()).unwrap_or(DEFAULT_CONDITION);

        let (true_branch, mut next) = self.optional_block(fragments, index + 1, depth, header)?;

        let mut false_branch = Vec::new();
        if fragments.get(next).is_some_and(Fragment::is_else) {
            let (nodes, after) = self.optional_block(fragments, next + 1, depth, header)?;
            false_branch = nodes;
            next = after;
        }

        Ok(Step::node(
            Node::branch(condition, true_branch, false_branch),
            next,
        ))
    }

    fn parse_loop(&self, fragments: &[Fragment], index: usize, depth: usize) -> Result<Step> {
        let header = &fragments[index];
        let text = header.text();
        let condition = if extract::starts_with_keyword(text, "for") {
            extract::for_condition(text).unwrap_or(FOR_FALLBACK)
        } else {
            extract::parenthesized(text).unwrap_or(WHILE_FALLBACK)
        };

        let (body, next) = self.optional_block(fragments, index + 1, depth, header)?;
        Ok(Step::node(Node::looping(condition, body), next))
    }

    fn parse_prompted_input(&self, fragments: &[Fragment], index: usize, _: usize) -> Result<Step> {
        let label = input_label(text_at(fragments, index + 1));
        Ok(Step::node(Node::io(label), index + 2))
    }

    /// Collapses a run of consecutive output calls into one node.
    fn parse_output_run(&self, fragments: &[Fragment], index: usize, _: usize) -> Result<Step> {
        let run_end = fragments[index..]
            .iter()
            .position(|fragment| !extract::is_output(fragment.text()))
            .map_or(fragments.len(), |offset| index + offset);

        let mut texts: Vec<String> = fragments[index..run_end]
            .iter()
            .filter_map(|fragment| extract::output_text(fragment.text()))
            .filter(|text| !text.is_empty())
            .collect();

        let node = match texts.len() {
            0 => None,
            1 => texts.pop().map(Node::io),
            _ => Some(Node::io(MULTIPLE_OUTPUT_LABEL)),
        };

        Ok(Step {
            node,
            next: run_end,
        })
    }

    fn parse_input(&self, fragments: &[Fragment], index: usize, _: usize) -> Result<Step> {
        let label = input_label(text_at(fragments, index));
        Ok(Step::node(Node::io(label), index + 1))
    }

    fn parse_end(&self, _: &[Fragment], index: usize, _: usize) -> Result<Step> {
        Ok(Step::node(Node::end(), index + 1))
    }

    fn parse_process(&self, fragments: &[Fragment], index: usize, _: usize) -> Result<Step> {
        let text = text_at(fragments, index);
        let label = text.strip_suffix(';').unwrap_or(text).trim_end();
        Ok(Step::node(Node::process(label), index + 1))
    }
}
