use crate::lexer::token::{Token, TokenKind};
use tracing::trace;

pub mod token;


/// Splits a filter string into brackets, `&`/`|` operators and operand
/// expressions. Everything that is not one of `()&|` belongs to an operand.
#[derive(Debug, Default)]
pub struct Lexer {
    tokens: Vec<Token>,
}

impl Lexer {
    pub fn new() -> Self {
        Lexer { tokens: Vec::new() }
    }

    pub fn tokenize(&mut self, input: &str) -> Vec<Token> {
        self.tokens.clear();

        // Byte offset where the pending operand starts.
        let mut pending = 0;

        for (pos, ch) in input.char_indices() {
            let kind = match ch {
                '(' => TokenKind::BracketLeft,
                ')' => TokenKind::BracketRight,
                '&' => TokenKind::And,
                '|' => TokenKind::Or,
                _ => continue,
            };

            self.flush_operand(input, pending, pos);
            self.tokens.push(Token::new(kind, (pos, pos + ch.len_utf8())));
            pending = pos + ch.len_utf8();
        }
        self.flush_operand(input, pending, input.len());

        trace!(count = self.tokens.len(), "tokenized filter string");
        std::mem::take(&mut self.tokens)
    }

    fn flush_operand(&mut self, input: &str, start: usize, end: usize) {
        let raw = &input[start..end];
        let text = raw.trim();
        if text.is_empty() {
            return;
        }

        let offset = start + (raw.len() - raw.trim_start().len());
        self.tokens.push(Token::new(
            TokenKind::Expression(text.to_string()),
            (offset, offset + text.len()),
        ));
    }
}
