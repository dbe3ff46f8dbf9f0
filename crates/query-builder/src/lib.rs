use crate::ast::expr::{Expr, Ident};
use filter_engine::Literal;

pub mod ast;
pub mod build;
pub mod dialect;
pub mod error;
pub mod lower;
pub mod macros;
pub mod query;
pub mod render;

pub use dialect::{Dialect, DialectKind, MySql, Postgres};
pub use error::QueryBuilderError;
pub use lower::SqlPredicateBuilder;
pub use query::{SelectQuery, SqlStatement};

/// Identifier expression for a possibly qualified column such as `u.id`.
pub fn ident(name: &str) -> Expr {
    Expr::Identifier(Ident::parse(name))
}

pub fn value(val: Literal) -> Expr {
    Expr::Value(val)
}
