use serde::Serialize;
use std::fmt;

/// A node of the binary evaluation tree.
///
/// Leaves carry the raw operand text; inner nodes own both of their
/// subtrees, so an `And`/`Or` node always has two children and brackets
/// never survive into the tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Node {
    Expression { text: String, span: (usize, usize) },
    And(Box<Node>, Box<Node>),
    Or(Box<Node>, Box<Node>),
}

impl Node {
    pub fn expression(text: impl Into<String>, span: (usize, usize)) -> Self {
        Node::Expression {
            text: text.into(),
            span,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Expression { .. })
    }

    pub fn children(&self) -> Option<(&Node, &Node)> {
        match self {
            Node::And(left, right) | Node::Or(left, right) => Some((left, right)),
            Node::Expression { .. } => None,
        }
    }

    /// Number of leaf expressions below this node.
    pub fn leaf_count(&self) -> usize {
        match self.children() {
            Some((left, right)) => left.leaf_count() + right.leaf_count(),
            None => 1,
        }
    }
}

/// Fully parenthesised rendering, e.g. `((eq:a:1 & eq:b:2) | eq:c:3)`.
impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Expression { text, .. } => write!(f, "{}", text),
            Node::And(left, right) => write!(f, "({} & {})", left, right),
            Node::Or(left, right) => write!(f, "({} | {})", left, right),
        }
    }
}
