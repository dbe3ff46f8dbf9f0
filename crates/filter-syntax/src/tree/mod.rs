//! Operator-precedence assembly of the evaluation tree.
//!
//! Infix-to-postfix conversion and tree construction happen in a single
//! pass over the tokens: an operator stack holds brackets and pending
//! `&`/`|` tokens, a node stack holds finished subtrees. Each reduction pops
//! one operator and two subtrees and pushes the combined node back.

use crate::{
    error::SyntaxError,
    lexer::token::{Token, TokenKind},
};
use tracing::debug;

mod node;

pub use node::Node;

pub const DEFAULT_MAX_DEPTH: usize = 128;

/// What the next token has to be for the input to stay well formed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Expect {
    Operand,
    Operator,
    /// Right after an empty `()` group.
    EmptyGroup,
}

/// A finished subtree on the node stack together with its bookkeeping.
struct Subtree {
    node: Node,
    depth: usize,
}

#[derive(Debug, Clone)]
pub struct TreeBuilder {
    max_depth: usize,
}

impl Default for TreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    pub fn with_max_depth(max_depth: usize) -> Self {
        Self {
            max_depth: max_depth.max(1),
        }
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Builds the evaluation tree for `tokens`.
    ///
    /// Yields `Ok(None)` when there is no expression token at all. Input
    /// that would leave operands without an operator, operators without
    /// operands, or unbalanced brackets is rejected rather than merged.
    pub fn build<I>(&self, tokens: I) -> Result<Option<Node>, SyntaxError>
    where
        I: IntoIterator<Item = Token>,
    {
        let mut operators: Vec<Token> = Vec::new();
        let mut nodes: Vec<Subtree> = Vec::new();
        let mut expect = Expect::Operand;

        for Token { kind, span } in tokens {
            match (kind, expect) {
                (
                    TokenKind::BracketLeft | TokenKind::Expression(_),
                    Expect::Operator | Expect::EmptyGroup,
                ) => {
                    return Err(SyntaxError::MissingOperator { position: span.0 });
                }
                (TokenKind::BracketLeft, Expect::Operand) => {
                    operators.push(Token::new(TokenKind::BracketLeft, span));
                }
                (TokenKind::Expression(text), Expect::Operand) => {
                    nodes.push(Subtree {
                        node: Node::expression(text, span),
                        depth: 1,
                    });
                    expect = Expect::Operator;
                }
                (
                    kind @ (TokenKind::And | TokenKind::Or),
                    Expect::Operand | Expect::EmptyGroup,
                ) => {
                    return Err(SyntaxError::MissingOperand {
                        operator: kind.to_string(),
                        position: span.0,
                    });
                }
                (kind @ (TokenKind::And | TokenKind::Or), Expect::Operator) => {
                    while operators
                        .last()
                        .is_some_and(|top| top.priority() >= kind.priority())
                    {
                        if let Some(top) = operators.pop() {
                            self.reduce(top, &mut nodes)?;
                        }
                    }
                    operators.push(Token::new(kind, span));
                    expect = Expect::Operand;
                }
                (TokenKind::BracketRight, Expect::Operator) => loop {
                    match operators.pop() {
                        Some(top) if top.kind == TokenKind::BracketLeft => break,
                        Some(top) => self.reduce(top, &mut nodes)?,
                        None => return Err(SyntaxError::UnmatchedBracket { position: span.0 }),
                    }
                },
                // `()` contributes nothing, but only brackets may follow it.
                (TokenKind::BracketRight, Expect::Operand | Expect::EmptyGroup) => {
                    match operators.pop() {
                        Some(top) if top.kind == TokenKind::BracketLeft => {
                            expect = Expect::EmptyGroup;
                        }
                        Some(top) => {
                            return Err(SyntaxError::MissingOperand {
                                operator: top.kind.to_string(),
                                position: top.span.0,
                            });
                        }
                        None => return Err(SyntaxError::UnmatchedBracket { position: span.0 }),
                    }
                }
            }
        }

        while let Some(top) = operators.pop() {
            self.reduce(top, &mut nodes)?;
        }

        let root = nodes.pop().map(|subtree| subtree.node);
        if let Some(root) = &root {
            debug!(leaves = root.leaf_count(), "assembled filter tree");
        }
        Ok(root)
    }

    /// Pops two subtrees and combines them under `operator`.
    fn reduce(&self, operator: Token, nodes: &mut Vec<Subtree>) -> Result<(), SyntaxError> {
        let combine: fn(Box<Node>, Box<Node>) -> Node = match operator.kind {
            TokenKind::And => Node::And,
            TokenKind::Or => Node::Or,
            _ => {
                return Err(SyntaxError::UnclosedBracket {
                    position: operator.span.0,
                });
            }
        };

        let (Some(right), Some(left)) = (nodes.pop(), nodes.pop()) else {
            return Err(SyntaxError::MissingOperand {
                operator: operator.kind.to_string(),
                position: operator.span.0,
            });
        };

        let depth = left.depth.max(right.depth) + 1;
        if depth > self.max_depth {
            return Err(SyntaxError::NestingTooDeep {
                max_depth: self.max_depth,
            });
        }

        nodes.push(Subtree {
            node: combine(Box::new(left.node), Box::new(right.node)),
            depth,
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::Lexer;

    fn build(input: &str) -> Result<Option<Node>, SyntaxError> {
        TreeBuilder::new().build(Lexer::new().tokenize(input))
    }

    fn render(input: &str) -> String {
        build(input)
            .expect("valid filter")
            .expect("non-empty filter")
            .to_string()
    }

    #[test]
    fn test_empty_input_yields_no_tree() {
        assert_eq!(build("").unwrap(), None);
        assert_eq!(build("  ").unwrap(), None);
    }

    #[test]
    fn test_single_leaf() {
        let node = build("eq:id:1").unwrap().unwrap();
        assert_eq!(node, Node::expression("eq:id:1", (0, 7)));
        assert!(node.is_leaf());
    }

    #[test]
    fn test_and_binds_tighter_than_or() {
        assert_eq!(render("a & b | c"), "((a & b) | c)");
        assert_eq!(render("a | b & c"), "(a | (b & c))");
    }

    #[test]
    fn test_equal_priority_is_left_associative() {
        assert_eq!(render("a & b & c"), "((a & b) & c)");
        assert_eq!(render("a | b | c"), "((a | b) | c)");
    }

    #[test]
    fn test_brackets_override_precedence() {
        assert_eq!(render("(a | b) & c"), "((a | b) & c)");
        assert_eq!(render("a & (b | c) & d"), "((a & (b | c)) & d)");
        assert_eq!(render("((a))"), "a");
    }

    #[test]
    fn test_unmatched_right_bracket() {
        assert_eq!(
            build("a & b)"),
            Err(SyntaxError::UnmatchedBracket { position: 5 })
        );
        assert_eq!(build(")"), Err(SyntaxError::UnmatchedBracket { position: 0 }));
    }

    #[test]
    fn test_unclosed_left_bracket() {
        assert_eq!(
            build("(a & b"),
            Err(SyntaxError::UnclosedBracket { position: 0 })
        );
    }

    #[test]
    fn test_operator_without_operand() {
        assert_eq!(
            build("a &"),
            Err(SyntaxError::MissingOperand {
                operator: "&".to_string(),
                position: 2
            })
        );
        assert!(matches!(
            build("| a"),
            Err(SyntaxError::MissingOperand { .. })
        ));
    }

    #[test]
    fn test_adjacent_operands_are_rejected() {
        assert_eq!(
            build("(a) (b)"),
            Err(SyntaxError::MissingOperator { position: 4 })
        );
        assert_eq!(
            build("(a)(b) && c"),
            Err(SyntaxError::MissingOperator { position: 3 })
        );
        assert_eq!(build("a (b)"), Err(SyntaxError::MissingOperator { position: 2 }));
    }

    #[test]
    fn test_doubled_operator_is_rejected_where_it_appears() {
        assert_eq!(
            build("a & & b"),
            Err(SyntaxError::MissingOperand {
                operator: "&".to_string(),
                position: 4
            })
        );
        assert_eq!(
            build("a & (b |)"),
            Err(SyntaxError::MissingOperand {
                operator: "|".to_string(),
                position: 7
            })
        );
    }

    #[test]
    fn test_empty_group_only_nests_in_brackets() {
        assert_eq!(build("(())").unwrap(), None);
        assert_eq!(build("() a"), Err(SyntaxError::MissingOperator { position: 3 }));
        assert!(matches!(
            build("a & ()"),
            Err(SyntaxError::MissingOperand { .. })
        ));
        assert_eq!(build("())"), Err(SyntaxError::UnmatchedBracket { position: 2 }));
    }

    #[test]
    fn test_depth_limit() {
        let tokens = Lexer::new().tokenize("a & b & c & d");
        assert_eq!(
            TreeBuilder::with_max_depth(3).build(tokens.clone()),
            Err(SyntaxError::NestingTooDeep { max_depth: 3 })
        );
        assert!(TreeBuilder::with_max_depth(4).build(tokens).is_ok());
    }
}
