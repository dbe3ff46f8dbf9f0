//! Lowers backend-agnostic predicates into SQL expression trees.

use crate::{
    ast::expr::{BinaryOp, BinaryOperator, Expr},
    call, ident,
};
use filter_engine::{ComparisonOp, Literal, PredicateBuilder};

/// Text patterns are matched against `LOWER(column)`; the pattern itself
/// is already lower-cased.
#[derive(Debug, Default, Clone, Copy)]
pub struct SqlPredicateBuilder;

impl SqlPredicateBuilder {
    fn binary(left: Expr, op: BinaryOperator, right: Expr) -> Expr {
        Expr::BinaryOp(Box::new(BinaryOp { left, op, right }))
    }
}

impl From<ComparisonOp> for BinaryOperator {
    fn from(op: ComparisonOp) -> Self {
        match op {
            ComparisonOp::Eq => BinaryOperator::Eq,
            ComparisonOp::Neq => BinaryOperator::NotEq,
            ComparisonOp::Lt => BinaryOperator::Lt,
            ComparisonOp::Lte => BinaryOperator::LtEq,
            ComparisonOp::Gt => BinaryOperator::Gt,
            ComparisonOp::Gte => BinaryOperator::GtEq,
        }
    }
}

impl PredicateBuilder for SqlPredicateBuilder {
    type Literal = Expr;
    type Node = Expr;

    fn literal(&mut self, value: &Literal) -> Expr {
        Expr::Value(value.clone())
    }

    fn comparison(&mut self, column: &str, op: ComparisonOp, literal: Expr) -> Expr {
        Self::binary(ident(column), op.into(), literal)
    }

    fn pattern_match(&mut self, column: &str, pattern: Expr, negated: bool) -> Expr {
        Expr::Like {
            expr: Box::new(call!("LOWER", ident(column))),
            pattern: Box::new(pattern),
            negated,
        }
    }

    fn is_null(&mut self, column: &str) -> Expr {
        Expr::IsNull {
            expr: Box::new(ident(column)),
            negated: false,
        }
    }

    fn is_not_null(&mut self, column: &str) -> Expr {
        Expr::IsNull {
            expr: Box::new(ident(column)),
            negated: true,
        }
    }

    fn is_member_of(&mut self, column: &str, literal: Expr) -> Expr {
        Expr::MemberOf {
            value: Box::new(literal),
            collection: Box::new(ident(column)),
        }
    }

    fn and(&mut self, left: Expr, right: Expr) -> Expr {
        Self::binary(left, BinaryOperator::And, right)
    }

    fn or(&mut self, left: Expr, right: Expr) -> Expr {
        Self::binary(left, BinaryOperator::Or, right)
    }
}
