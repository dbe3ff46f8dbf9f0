pub mod error;
pub mod lexer;
pub mod tree;

pub use error::SyntaxError;
pub use lexer::{
    Lexer,
    token::{Token, TokenKind},
};
pub use tree::{DEFAULT_MAX_DEPTH, Node, TreeBuilder};

/// Tokenize a filter string and assemble its evaluation tree.
///
/// Returns `Ok(None)` when the input holds no expressions at all.
pub fn parse(input: &str) -> Result<Option<Node>, SyntaxError> {
    let tokens = Lexer::new().tokenize(input);
    TreeBuilder::new().build(tokens)
}
