use crate::{
    ast::{
        common::{OrderDir, TableRef},
        select::{FromClause, OrderByExpr, Select},
    },
    render::{Render, Renderer},
};

/// Clause order is fixed: projection, source, filter, ordering, then paging.
impl Render for Select {
    fn render(&self, r: &mut Renderer) {
        r.sql.push_str("SELECT ");
        r.comma_separated(&self.columns);

        r.optional_clause("FROM", self.from.as_ref());
        r.optional_clause("WHERE", self.where_clause.as_ref());

        if !self.order_by.is_empty() {
            r.sql.push_str(" ORDER BY ");
            r.comma_separated(&self.order_by);
        }

        r.optional_clause("LIMIT", self.limit.as_ref());
        r.optional_clause("OFFSET", self.offset.as_ref());
    }
}

impl Render for TableRef {
    fn render(&self, r: &mut Renderer) {
        if let Some(schema) = &self.schema {
            r.push_identifier(schema);
            r.sql.push('.');
        }
        r.push_identifier(&self.name);
    }
}

impl Render for FromClause {
    fn render(&self, r: &mut Renderer) {
        self.table.render(r);
        if let Some(alias) = &self.alias {
            r.sql.push_str(" AS ");
            r.push_identifier(alias);
        }
    }
}

impl Render for OrderDir {
    fn render(&self, r: &mut Renderer) {
        r.sql.push_str(match self {
            OrderDir::Asc => "ASC",
            OrderDir::Desc => "DESC",
        });
    }
}

impl Render for OrderByExpr {
    fn render(&self, r: &mut Renderer) {
        self.expr.render(r);
        if let Some(direction) = &self.direction {
            r.sql.push(' ');
            direction.render(r);
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        ast::{
            common::{OrderDir, TableRef},
            expr::{BinaryOp, BinaryOperator, Expr},
            select::{FromClause, OrderByExpr, Select},
        },
        dialect::{MySql, Postgres},
        ident,
        render::{Render, Renderer},
        value,
    };
    use bigdecimal::BigDecimal;
    use filter_engine::Literal;

    fn users() -> Option<FromClause> {
        Some(FromClause {
            table: TableRef {
                schema: None,
                name: "users".to_string(),
            },
            alias: None,
        })
    }

    #[test]
    fn test_simple_select_postgres() {
        let ast = Select {
            columns: vec![ident("id"), ident("name")],
            from: users(),
            where_clause: Some(Expr::BinaryOp(Box::new(BinaryOp {
                left: ident("id"),
                op: BinaryOperator::Eq,
                right: value(Literal::Number(BigDecimal::from(123))),
            }))),
            ..Default::default()
        };

        let dialect = Postgres;
        let mut renderer = Renderer::new(&dialect);
        ast.render(&mut renderer);
        let (sql, params) = renderer.finish();

        assert_eq!(sql, r#"SELECT "id", "name" FROM "users" WHERE ("id" = $1)"#);
        assert_eq!(params, vec![Literal::Number(BigDecimal::from(123))]);
    }

    #[test]
    fn test_simple_select_mysql() {
        let ast = Select {
            columns: vec![ident("id"), ident("name")],
            from: users(),
            where_clause: Some(Expr::BinaryOp(Box::new(BinaryOp {
                left: ident("id"),
                op: BinaryOperator::Eq,
                right: value(Literal::Text("abc".to_string())),
            }))),
            ..Default::default()
        };

        let dialect = MySql;
        let mut renderer = Renderer::new(&dialect);
        ast.render(&mut renderer);
        let (sql, params) = renderer.finish();

        assert_eq!(sql, "SELECT `id`, `name` FROM `users` WHERE (`id` = ?)");
        assert_eq!(params, vec![Literal::Text("abc".to_string())]);
    }

    #[test]
    fn test_schema_alias_order_and_paging() {
        let ast = Select {
            columns: vec![Expr::Wildcard],
            from: Some(FromClause {
                table: TableRef {
                    schema: Some("app".to_string()),
                    name: "users".to_string(),
                },
                alias: Some("u".to_string()),
            }),
            where_clause: None,
            order_by: vec![
                OrderByExpr {
                    expr: ident("u.created_at"),
                    direction: Some(OrderDir::Desc),
                },
                OrderByExpr {
                    expr: ident("u.id"),
                    direction: None,
                },
            ],
            limit: Some(value(Literal::Number(BigDecimal::from(10)))),
            offset: Some(value(Literal::Number(BigDecimal::from(20)))),
        };

        let dialect = Postgres;
        let mut renderer = Renderer::new(&dialect);
        ast.render(&mut renderer);
        let (sql, params) = renderer.finish();

        let expected_sql = r#"SELECT * FROM "app"."users" AS "u" ORDER BY "u"."created_at" DESC, "u"."id" LIMIT $1 OFFSET $2"#;
        assert_eq!(sql, expected_sql);
        assert_eq!(params.len(), 2);
    }
}
