//! # Flowcode Parser
//!
//! Turns C-like source text into a Flowcode flow tree. The pipeline is:
//!
//! 1. **Tokenize** - split the text into trimmed statement fragments
//! 2. **Parse** - classify fragments and build the nested node tree
//! 3. **Wrap** - prepend the synthesized start node
//!
//! A separate [`repair`] pass can propose fixes for common slips before
//! parsing.
//!
//! ## Usage
//!
//! ```
//! # use flowcode_parser::{parse, ParserConfig, ParseError};
//! # use flowcode_core::flow::NodeKind;
//!
//! fn main() -> Result<(), ParseError> {
//!     let source = r#"
//!         int main() {
//!             int n;
//!             printf("Enter n: ");
//!             scanf("%d", &n);
//!             if (n > 0) {
//!                 printf("positive\n");
//!             }
//!             return 0;
//!         }
//!     "#;
//!
//!     let program = parse(source, ParserConfig::default())?;
//!     let kinds: Vec<NodeKind> = program.nodes().iter().map(|n| n.kind()).collect();
//!     assert_eq!(kinds, [NodeKind::Start, NodeKind::Io, NodeKind::If, NodeKind::End]);
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod extract;
mod parser;
pub mod repair;
mod span;
mod tokenizer;

pub use error::ParseError;
pub use parser::{BlockParser, ParserConfig};
pub use span::Span;
pub use tokenizer::{Fragment, tokenize};

use log::{debug, info};

use flowcode_core::flow::Program;

/// Parse source text into a flow tree.
///
/// # Errors
///
/// Returns a [`ParseError`] when blocks nest deeper than
/// [`ParserConfig::max_depth`]. Any other input produces a tree.
pub fn parse(source: &str, config: ParserConfig) -> Result<Program, ParseError> {
    info!(source_len = source.len(); "Parsing source");

    let fragments = tokenize(source);
    let program = parse_fragments(&fragments, config)?;

    debug!(
        nodes_count = program.node_count(),
        depth = program.depth();
        "Source parsed",
    );
    Ok(program)
}

/// Parse an already tokenized fragment sequence.
///
/// Parsing stops at the first unmatched `}` of the root sequence, the way
/// a closing brace ends any block.
///
/// # Errors
///
/// See [`parse`].
pub fn parse_fragments(
    fragments: &[Fragment],
    config: ParserConfig,
) -> Result<Program, ParseError> {
    let parser = BlockParser::new(config);
    let (nodes, consumed) = parser.parse_block(fragments, 0, 0)?;
    if consumed < fragments.len() {
        debug!(
            consumed = consumed,
            total = fragments.len();
            "Fragments after the root block were ignored",
        );
    }
    Ok(Program::new(nodes))
}
