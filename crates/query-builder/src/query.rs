//! A SELECT statement that receives compiled filters and renders to SQL.

use crate::{
    ast::{
        common::{OrderDir, TableRef},
        expr::Expr,
        select::Select,
    },
    build::select::{FromState, SelectBuilder},
    call,
    dialect::Dialect,
    ident,
    lower::SqlPredicateBuilder,
    render::{Render, Renderer},
    value,
};
use bigdecimal::BigDecimal;
use filter_engine::{Literal, Predicate, QueryTarget, SortDirection};
use serde::Serialize;
use tracing::debug;

/// Rendered SQL with its bound parameters in placeholder order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SqlStatement {
    pub sql: String,
    pub params: Vec<Literal>,
}

#[derive(Debug, Clone)]
pub struct SelectQuery {
    table: TableRef,
    alias: Option<String>,
    columns: Vec<Expr>,
    conditions: Vec<Expr>,
    order_by: Vec<(Expr, OrderDir)>,
    offset: Option<u64>,
    limit: Option<u64>,
}

impl SelectQuery {
    /// Selects every column of `table`.
    pub fn new(table: TableRef) -> Self {
        Self {
            table,
            alias: None,
            columns: vec![Expr::Wildcard],
            conditions: Vec::new(),
            order_by: Vec::new(),
            offset: None,
            limit: None,
        }
    }

    pub fn alias(mut self, alias: &str) -> Self {
        self.alias = Some(alias.to_string());
        self
    }

    pub fn columns(mut self, columns: &[&str]) -> Self {
        self.columns = columns.iter().map(|c| ident(c)).collect();
        self
    }

    fn base(&self, columns: Vec<Expr>) -> SelectBuilder<FromState> {
        self.conditions.iter().cloned().fold(
            SelectBuilder::new()
                .select(columns)
                .from(self.table.clone(), self.alias.as_deref()),
            |builder, condition| builder.and_where(condition),
        )
    }

    /// The row query, with ordering and paging.
    pub fn select(&self) -> Select {
        let mut builder = self
            .order_by
            .iter()
            .cloned()
            .fold(self.base(self.columns.clone()), |builder, (expr, dir)| {
                builder.order_by(expr, Some(dir))
            });

        if let Some(limit) = self.limit {
            builder = builder.limit(value(Literal::Number(BigDecimal::from(limit))));
        }
        if let Some(offset) = self.offset {
            builder = builder.offset(value(Literal::Number(BigDecimal::from(offset))));
        }
        builder.build()
    }

    /// `SELECT COUNT(*)` over the same conditions, without ordering or paging.
    pub fn count(&self) -> Select {
        self.base(vec![call!("COUNT", *)]).build()
    }

    pub fn render(&self, dialect: &dyn Dialect) -> SqlStatement {
        render_statement(&self.select(), dialect)
    }

    pub fn render_count(&self, dialect: &dyn Dialect) -> SqlStatement {
        render_statement(&self.count(), dialect)
    }
}

fn render_statement(select: &Select, dialect: &dyn Dialect) -> SqlStatement {
    let mut renderer = Renderer::new(dialect);
    select.render(&mut renderer);
    let (sql, params) = renderer.finish();

    debug!(dialect = %dialect.name(), params = params.len(), "rendered select");
    SqlStatement { sql, params }
}

impl QueryTarget for SelectQuery {
    fn apply_predicate(&mut self, predicate: Predicate) {
        self.conditions
            .push(predicate.lower(&mut SqlPredicateBuilder));
    }

    fn add_order_by(&mut self, column: &str, direction: SortDirection) {
        self.order_by.push((ident(column), direction.into()));
    }

    fn set_offset(&mut self, offset: u64) {
        self.offset = Some(offset);
    }

    fn set_limit(&mut self, limit: u64) {
        self.limit = Some(limit);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{dialect::Postgres, table_ref};

    #[test]
    fn test_empty_query_selects_everything() {
        let query = SelectQuery::new(table_ref!("users"));
        let statement = query.render(&Postgres);

        assert_eq!(statement.sql, r#"SELECT * FROM "users""#);
        assert!(statement.params.is_empty());
    }

    #[test]
    fn test_count_ignores_order_and_paging() {
        let mut query = SelectQuery::new(table_ref!("users")).alias("u");
        query.apply_predicate(Predicate::IsNotNull {
            column: "u.email".into(),
        });
        query.add_order_by("u.id", SortDirection::Desc);
        query.set_limit(10);

        assert_eq!(
            query.render_count(&Postgres).sql,
            r#"SELECT COUNT(*) FROM "users" AS "u" WHERE ("u"."email" IS NOT NULL)"#
        );
    }

    #[test]
    fn test_columns_are_selected_in_order() {
        let query = SelectQuery::new(table_ref!("users")).columns(&["id", "name"]);
        assert_eq!(
            query.render(&Postgres).sql,
            r#"SELECT "id", "name" FROM "users""#
        );
    }
}
