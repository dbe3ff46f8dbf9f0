//! Backend-agnostic predicate produced by the evaluator.
//!
//! A [`Predicate`] has no meaning on its own; a backend gives it one by
//! implementing [`PredicateBuilder`] and folding the predicate with
//! [`Predicate::lower`].

use bigdecimal::BigDecimal;
use chrono::NaiveDateTime;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Literal {
    Number(BigDecimal),
    Text(String),
    DateTime(NaiveDateTime),
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Number(n) => write!(f, "{}", n),
            Literal::Text(s) => write!(f, "{}", s),
            Literal::DateTime(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M:%S%.f")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ComparisonOp {
    Eq,
    Neq,
    Lt,
    Lte,
    Gt,
    Gte,
}

impl fmt::Display for ComparisonOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComparisonOp::Eq => write!(f, "="),
            ComparisonOp::Neq => write!(f, "<>"),
            ComparisonOp::Lt => write!(f, "<"),
            ComparisonOp::Lte => write!(f, "<="),
            ComparisonOp::Gt => write!(f, ">"),
            ComparisonOp::Gte => write!(f, ">="),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Predicate {
    Comparison {
        column: String,
        op: ComparisonOp,
        value: Literal,
    },
    /// Case-insensitive match of `LOWER(column)` against a `%...%` pattern.
    Like {
        column: String,
        pattern: String,
        negated: bool,
    },
    IsNull {
        column: String,
    },
    IsNotNull {
        column: String,
    },
    MemberOf {
        column: String,
        value: Literal,
    },
    And(Box<Predicate>, Box<Predicate>),
    Or(Box<Predicate>, Box<Predicate>),
}

impl Predicate {
    pub fn and(left: Predicate, right: Predicate) -> Self {
        Predicate::And(Box::new(left), Box::new(right))
    }

    pub fn or(left: Predicate, right: Predicate) -> Self {
        Predicate::Or(Box::new(left), Box::new(right))
    }

    /// Folds the predicate into the node type of a backend.
    pub fn lower<B: PredicateBuilder>(&self, builder: &mut B) -> B::Node {
        match self {
            Predicate::Comparison { column, op, value } => {
                let literal = builder.literal(value);
                builder.comparison(column, *op, literal)
            }
            Predicate::Like {
                column,
                pattern,
                negated,
            } => {
                let literal = builder.literal(&Literal::Text(pattern.clone()));
                builder.pattern_match(column, literal, *negated)
            }
            Predicate::IsNull { column } => builder.is_null(column),
            Predicate::IsNotNull { column } => builder.is_not_null(column),
            Predicate::MemberOf { column, value } => {
                let literal = builder.literal(value);
                builder.is_member_of(column, literal)
            }
            Predicate::And(left, right) => {
                let left = left.lower(builder);
                let right = right.lower(builder);
                builder.and(left, right)
            }
            Predicate::Or(left, right) => {
                let left = left.lower(builder);
                let right = right.lower(builder);
                builder.or(left, right)
            }
        }
    }

    /// Backend columns referenced anywhere in the predicate, in visiting order.
    pub fn columns(&self) -> Vec<&str> {
        let mut columns = Vec::new();
        self.collect_columns(&mut columns);
        columns
    }

    fn collect_columns<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            Predicate::Comparison { column, .. }
            | Predicate::Like { column, .. }
            | Predicate::IsNull { column }
            | Predicate::IsNotNull { column }
            | Predicate::MemberOf { column, .. } => out.push(column),
            Predicate::And(left, right) | Predicate::Or(left, right) => {
                left.collect_columns(out);
                right.collect_columns(out);
            }
        }
    }
}

/// SQL-like rendering with literals inlined, for display only.
impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Predicate::Comparison { column, op, value } => match value {
                Literal::Number(n) => write!(f, "{} {} {}", column, op, n),
                other => write!(f, "{} {} '{}'", column, op, other),
            },
            Predicate::Like {
                column,
                pattern,
                negated,
            } => {
                let not = if *negated { "NOT " } else { "" };
                write!(f, "LOWER({}) {}LIKE '{}'", column, not, pattern)
            }
            Predicate::IsNull { column } => write!(f, "{} IS NULL", column),
            Predicate::IsNotNull { column } => write!(f, "{} IS NOT NULL", column),
            Predicate::MemberOf { column, value } => write!(f, "'{}' MEMBER OF {}", value, column),
            Predicate::And(left, right) => write!(f, "({} AND {})", left, right),
            Predicate::Or(left, right) => write!(f, "({} OR {})", left, right),
        }
    }
}

/// Node constructors a query backend must offer to receive a predicate.
pub trait PredicateBuilder {
    type Literal;
    type Node;

    fn literal(&mut self, value: &Literal) -> Self::Literal;

    fn comparison(&mut self, column: &str, op: ComparisonOp, literal: Self::Literal)
    -> Self::Node;

    fn pattern_match(&mut self, column: &str, pattern: Self::Literal, negated: bool)
    -> Self::Node;

    fn is_null(&mut self, column: &str) -> Self::Node;

    fn is_not_null(&mut self, column: &str) -> Self::Node;

    fn is_member_of(&mut self, column: &str, literal: Self::Literal) -> Self::Node;

    fn and(&mut self, left: Self::Node, right: Self::Node) -> Self::Node;

    fn or(&mut self, left: Self::Node, right: Self::Node) -> Self::Node;
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Renders predicates as compact text, enough to check the fold order.
    struct TextBuilder;

    impl PredicateBuilder for TextBuilder {
        type Literal = String;
        type Node = String;

        fn literal(&mut self, value: &Literal) -> String {
            format!("'{}'", value)
        }

        fn comparison(&mut self, column: &str, op: ComparisonOp, literal: String) -> String {
            format!("{} {} {}", column, op, literal)
        }

        fn pattern_match(&mut self, column: &str, pattern: String, negated: bool) -> String {
            let not = if negated { "NOT " } else { "" };
            format!("lower({}) {}LIKE {}", column, not, pattern)
        }

        fn is_null(&mut self, column: &str) -> String {
            format!("{} IS NULL", column)
        }

        fn is_not_null(&mut self, column: &str) -> String {
            format!("{} IS NOT NULL", column)
        }

        fn is_member_of(&mut self, column: &str, literal: String) -> String {
            format!("{} MEMBER OF {}", literal, column)
        }

        fn and(&mut self, left: String, right: String) -> String {
            format!("({} AND {})", left, right)
        }

        fn or(&mut self, left: String, right: String) -> String {
            format!("({} OR {})", left, right)
        }
    }

    #[test]
    fn test_lower_folds_whole_tree() {
        let predicate = Predicate::or(
            Predicate::and(
                Predicate::Comparison {
                    column: "u.id".into(),
                    op: ComparisonOp::Eq,
                    value: Literal::Number(BigDecimal::from(1)),
                },
                Predicate::Like {
                    column: "u.name".into(),
                    pattern: "%test%".into(),
                    negated: false,
                },
            ),
            Predicate::IsNull {
                column: "u.deleted_at".into(),
            },
        );

        assert_eq!(
            predicate.lower(&mut TextBuilder),
            "((u.id = '1' AND lower(u.name) LIKE '%test%') OR u.deleted_at IS NULL)"
        );
        assert_eq!(predicate.columns(), vec!["u.id", "u.name", "u.deleted_at"]);
    }

    #[test]
    fn test_predicate_display() {
        let predicate = Predicate::and(
            Predicate::Comparison {
                column: "u.id".into(),
                op: ComparisonOp::Gte,
                value: Literal::Number(BigDecimal::from(3)),
            },
            Predicate::Like {
                column: "u.name".into(),
                pattern: "%jo%".into(),
                negated: true,
            },
        );

        assert_eq!(
            predicate.to_string(),
            "(u.id >= 3 AND LOWER(u.name) NOT LIKE '%jo%')"
        );
    }

    #[test]
    fn test_literal_display() {
        let dt = chrono::NaiveDate::from_ymd_opt(2020, 1, 1)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap();
        assert_eq!(Literal::DateTime(dt).to_string(), "2020-01-01 10:00:00");
        assert_eq!(Literal::Text("abc".into()).to_string(), "abc");
    }
}
