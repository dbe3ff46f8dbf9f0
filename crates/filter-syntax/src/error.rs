use thiserror::Error;

/// Structural problems found while assembling the evaluation tree.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SyntaxError {
    #[error("unmatched ')' at position {position}")]
    UnmatchedBracket { position: usize },

    #[error("unclosed '(' at position {position}")]
    UnclosedBracket { position: usize },

    #[error("operator '{operator}' at position {position} is missing an operand")]
    MissingOperand { operator: String, position: usize },

    #[error("expected '&' or '|' before the expression at position {position}")]
    MissingOperator { position: usize },

    #[error("filter nesting exceeds the maximum depth of {max_depth}")]
    NestingTooDeep { max_depth: usize },
}

impl SyntaxError {
    pub fn position(&self) -> Option<usize> {
        match self {
            SyntaxError::UnmatchedBracket { position }
            | SyntaxError::UnclosedBracket { position }
            | SyntaxError::MissingOperand { position, .. }
            | SyntaxError::MissingOperator { position } => Some(*position),
            SyntaxError::NestingTooDeep { .. } => None,
        }
    }

    /// Format error with the offending filter string and a caret under the position
    pub fn format_error(&self, input: &str) -> String {
        match self.position().filter(|p| input.is_char_boundary(*p)) {
            Some(position) => {
                let column = input[..position].chars().count();
                format!("{}\n{}\n{}^", self, input, " ".repeat(column))
            }
            None => self.to_string(),
        }
    }
}
