use serde::Serialize;
use std::fmt;

pub const PRIORITY_AND: u8 = 2;
pub const PRIORITY_OR: u8 = 1;
pub const PRIORITY_NONE: u8 = 0;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    /// Byte offsets of the token in the filter string.
    pub span: (usize, usize),
}

impl Token {
    pub fn new(kind: TokenKind, span: (usize, usize)) -> Self {
        Token { kind, span }
    }

    pub fn priority(&self) -> u8 {
        self.kind.priority()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "text", rename_all = "snake_case")]
pub enum TokenKind {
    // Operators
    And, // &
    Or,  // |

    // Delimiters
    BracketLeft,  // (
    BracketRight, // )

    /// A raw `operator:key:value` operand, trimmed.
    Expression(String),
}

impl TokenKind {
    /// Binding strength used by the tree builder. AND binds tighter than OR.
    pub fn priority(&self) -> u8 {
        match self {
            TokenKind::And => PRIORITY_AND,
            TokenKind::Or => PRIORITY_OR,
            TokenKind::BracketLeft | TokenKind::BracketRight | TokenKind::Expression(_) => {
                PRIORITY_NONE
            }
        }
    }

    pub fn is_operator(&self) -> bool {
        matches!(self, TokenKind::And | TokenKind::Or)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::And => write!(f, "&"),
            TokenKind::Or => write!(f, "|"),
            TokenKind::BracketLeft => write!(f, "("),
            TokenKind::BracketRight => write!(f, ")"),
            TokenKind::Expression(text) => write!(f, "{}", text),
        }
    }
}
