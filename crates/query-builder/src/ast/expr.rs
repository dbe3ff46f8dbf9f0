//! Defines the AST for SQL expressions.

use filter_engine::Literal;

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A column or table identifier, e.g., `users` or `users.id`.
    Identifier(Ident),

    /// A bound literal, rendered as a placeholder.
    Value(Literal),

    /// A binary operation, e.g., `column = 'value'` or `a AND b`.
    BinaryOp(Box<BinaryOp>),

    /// A function call, e.g., `COUNT(*)` or `LOWER(name)`.
    FunctionCall(FunctionCall),

    /// `expr [NOT] LIKE pattern`
    Like {
        expr: Box<Expr>,
        pattern: Box<Expr>,
        negated: bool,
    },

    /// `expr IS [NOT] NULL`
    IsNull { expr: Box<Expr>, negated: bool },

    /// Membership of a scalar in a collection column. The syntax is
    /// dialect specific.
    MemberOf {
        value: Box<Expr>,
        collection: Box<Expr>,
    },

    /// The `*` column list.
    Wildcard,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ident {
    pub qualifier: Option<String>, // e.g., the 'users' in 'users.id'
    pub name: String,              // e.g., the 'id' in 'users.id'
}

impl Ident {
    /// Splits `table.column` at the last dot.
    pub fn parse(name: &str) -> Self {
        match name.rsplit_once('.') {
            Some((qualifier, name)) if !qualifier.is_empty() && !name.is_empty() => Ident {
                qualifier: Some(qualifier.to_string()),
                name: name.to_string(),
            },
            _ => Ident {
                qualifier: None,
                name: name.to_string(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BinaryOp {
    pub left: Expr,
    pub op: BinaryOperator,
    pub right: Expr,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionCall {
    pub name: String,
    pub args: Vec<Expr>,
    pub wildcard: bool, // represents the '*' in 'COUNT(*)'
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    // Comparison
    Eq,    // =
    NotEq, // <>
    Lt,    // <
    LtEq,  // <=
    Gt,    // >
    GtEq,  // >=

    // Logical
    And,
    Or,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ident_parse() {
        assert_eq!(
            Ident::parse("u.id"),
            Ident {
                qualifier: Some("u".to_string()),
                name: "id".to_string()
            }
        );
        assert_eq!(Ident::parse("s.u.id").qualifier.as_deref(), Some("s.u"));
        assert_eq!(Ident::parse("id").qualifier, None);
        assert_eq!(Ident::parse(".id").name, ".id");
    }
}
