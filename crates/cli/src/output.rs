use crate::error::CliError;
use filter_syntax::{Token, TokenKind};
use serde::Serialize;

pub fn print_json<T: Serialize>(value: &T) -> Result<(), CliError> {
    let json = serde_json::to_string_pretty(value).map_err(CliError::JsonSerialize)?;
    println!("{json}");
    Ok(())
}

pub fn print_tokens(tokens: &[Token]) {
    for token in tokens {
        let role = match &token.kind {
            kind if kind.is_operator() => "operator",
            TokenKind::Expression(_) => "expression",
            _ => "bracket",
        };
        println!(
            "{:>4}..{:<4} {:<10} {}",
            token.span.0, token.span.1, role, token.kind
        );
    }
}
