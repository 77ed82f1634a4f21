//! The flow tree: control-structure nodes produced by the parser.
//!
//! A [`Program`] is an ordered sequence of [`Node`]s. Decision nodes
//! ([`Node::If`] and [`Node::Loop`]) own their nested sequences, so the whole
//! structure is a tree: a node belongs to exactly one sequence and is never
//! shared.
//!
//! ```
//! # use flowcode_core::flow::{Node, NodeKind, Program};
//! let program = Program::new(vec![
//!     Node::process("i = 0"),
//!     Node::looping("i < 3", vec![Node::process("i++")]),
//! ]);
//!
//! assert_eq!(program.nodes()[0].kind(), NodeKind::Start);
//! assert_eq!(program.node_count(), 4);
//! ```

use std::fmt;

/// Label given to the synthesized entry node of every non-empty program.
pub const START_LABEL: &str = "Start Program";

/// Label given to every terminal node created from a `return` statement.
pub const END_LABEL: &str = "End Program";

/// The kind of a flow node, without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Start,
    End,
    Process,
    Io,
    If,
    Loop,
}

impl NodeKind {
    /// Returns `true` for kinds drawn as diamonds (`if` and `loop`).
    pub fn is_decision(self) -> bool {
        matches!(self, NodeKind::If | NodeKind::Loop)
    }

    /// Returns `true` for `start` and `end` terminals.
    pub fn is_terminal(self) -> bool {
        matches!(self, NodeKind::Start | NodeKind::End)
    }

    /// Lower-case name of the kind, as used in rendered class names.
    pub fn as_str(self) -> &'static str {
        match self {
            NodeKind::Start => "start",
            NodeKind::End => "end",
            NodeKind::Process => "process",
            NodeKind::Io => "io",
            NodeKind::If => "if",
            NodeKind::Loop => "loop",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single node of the flow tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Start {
        label: String,
    },
    End {
        label: String,
    },
    Process {
        label: String,
    },
    Io {
        label: String,
    },
    If {
        condition: String,
        true_branch: Vec<Node>,
        false_branch: Vec<Node>,
    },
    Loop {
        condition: String,
        body: Vec<Node>,
    },
}

impl Node {
    /// The synthesized program entry node.
    pub fn start() -> Self {
        Node::Start {
            label: START_LABEL.to_string(),
        }
    }

    /// A terminal node for a `return` statement.
    pub fn end() -> Self {
        Node::End {
            label: END_LABEL.to_string(),
        }
    }

    pub fn process(label: impl Into<String>) -> Self {
        Node::Process {
            label: label.into(),
        }
    }

    pub fn io(label: impl Into<String>) -> Self {
        Node::Io {
            label: label.into(),
        }
    }

    pub fn branch(
        condition: impl Into<String>,
        true_branch: Vec<Node>,
        false_branch: Vec<Node>,
    ) -> Self {
        Node::If {
            condition: condition.into(),
            true_branch,
            false_branch,
        }
    }

    pub fn looping(condition: impl Into<String>, body: Vec<Node>) -> Self {
        Node::Loop {
            condition: condition.into(),
            body,
        }
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Start { .. } => NodeKind::Start,
            Node::End { .. } => NodeKind::End,
            Node::Process { .. } => NodeKind::Process,
            Node::Io { .. } => NodeKind::Io,
            Node::If { .. } => NodeKind::If,
            Node::Loop { .. } => NodeKind::Loop,
        }
    }

    /// The text displayed inside the node's shape.
    ///
    /// For decisions this is the condition.
    pub fn label(&self) -> &str {
        match self {
            Node::Start { label }
            | Node::End { label }
            | Node::Process { label }
            | Node::Io { label } => label,
            Node::If { condition, .. } | Node::Loop { condition, .. } => condition,
        }
    }

    /// Number of nodes in the subtree rooted at this node, itself included.
    pub fn node_count(&self) -> usize {
        1 + match self {
            Node::If {
                true_branch,
                false_branch,
                ..
            } => sequence_node_count(true_branch) + sequence_node_count(false_branch),
            Node::Loop { body, .. } => sequence_node_count(body),
            _ => 0,
        }
    }

    /// Nesting depth of the subtree: 1 for a leaf, one more than the deepest
    /// nested sequence for decisions.
    pub fn depth(&self) -> usize {
        1 + match self {
            Node::If {
                true_branch,
                false_branch,
                ..
            } => sequence_depth(true_branch).max(sequence_depth(false_branch)),
            Node::Loop { body, .. } => sequence_depth(body),
            _ => 0,
        }
    }
}

/// Total number of nodes reachable from a sequence.
pub fn sequence_node_count(nodes: &[Node]) -> usize {
    nodes.iter().map(Node::node_count).sum()
}

/// Deepest nesting found in a sequence; zero when empty.
pub fn sequence_depth(nodes: &[Node]) -> usize {
    nodes.iter().map(Node::depth).max().unwrap_or(0)
}

/// The root sequence of a parsed source text.
///
/// Construction guarantees that a non-empty program starts with a
/// [`Node::Start`] node.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Program {
    nodes: Vec<Node>,
}

impl Program {
    /// Wraps a root sequence, prepending a start node when the sequence is
    /// non-empty and does not already begin with one.
    pub fn new(mut nodes: Vec<Node>) -> Self {
        let needs_start = nodes
            .first()
            .is_some_and(|node| node.kind() != NodeKind::Start);
        if needs_start {
            nodes.insert(0, Node::start());
        }
        Self { nodes }
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of nodes reachable by a full traversal of the tree.
    pub fn node_count(&self) -> usize {
        sequence_node_count(&self.nodes)
    }

    pub fn depth(&self) -> usize {
        sequence_depth(&self.nodes)
    }

    pub fn into_nodes(self) -> Vec<Node> {
        self.nodes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_program_prepends_start() {
        let program = Program::new(vec![Node::process("x = 1")]);

        assert_eq!(program.nodes().len(), 2);
        assert_eq!(program.nodes()[0], Node::start());
        assert_eq!(program.nodes()[0].label(), START_LABEL);
    }

    #[test]
    fn test_program_keeps_existing_start() {
        let program = Program::new(vec![Node::start(), Node::end()]);
        assert_eq!(program.nodes().len(), 2);
    }

    #[test]
    fn test_empty_program_has_no_start() {
        let program = Program::new(Vec::new());
        assert!(program.is_empty());
        assert_eq!(program.node_count(), 0);
    }

    #[test]
    fn test_node_count_includes_empty_decisions() {
        let program = Program::new(vec![
            Node::branch("c", Vec::new(), Vec::new()),
            Node::looping("i < 3", Vec::new()),
        ]);

        assert_eq!(program.node_count(), 3);
    }

    #[test]
    fn test_node_count_nested() {
        let node = Node::branch(
            "x > 0",
            vec![Node::io("pos"), Node::looping("i", vec![Node::process("i--")])],
            vec![Node::io("neg")],
        );

        assert_eq!(node.node_count(), 5);
        assert_eq!(node.depth(), 3);
    }

    #[test]
    fn test_decision_label_is_condition() {
        let node = Node::looping("i < 3", Vec::new());
        assert_eq!(node.label(), "i < 3");
        assert!(node.kind().is_decision());
        assert!(!node.kind().is_terminal());
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(NodeKind::Io.to_string(), "io");
        assert_eq!(NodeKind::Loop.to_string(), "loop");
    }
}
