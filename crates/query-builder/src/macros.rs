#[macro_export]
macro_rules! table_ref {
    ($name:expr) => {
        $crate::ast::common::TableRef {
            schema: None,
            name: $name.to_string(),
        }
    };
    ($schema:expr, $name:expr) => {
        $crate::ast::common::TableRef {
            schema: Some($schema.to_string()),
            name: $name.to_string(),
        }
    };
}

/// Builds a `FUNC(args...)` call expression.
#[macro_export]
macro_rules! call {
    ($name:expr, *) => {
        $crate::ast::expr::Expr::FunctionCall($crate::ast::expr::FunctionCall {
            name: $name.to_string(),
            args: Vec::new(),
            wildcard: true,
        })
    };
    ($name:expr, $($arg:expr),+ $(,)?) => {
        $crate::ast::expr::Expr::FunctionCall($crate::ast::expr::FunctionCall {
            name: $name.to_string(),
            args: vec![$($arg),+],
            wildcard: false,
        })
    };
}
