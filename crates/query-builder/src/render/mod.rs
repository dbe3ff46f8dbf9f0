//! Defines the core rendering trait and context for converting AST to SQL.

use crate::dialect::Dialect;
use filter_engine::Literal;

pub mod expr;
pub mod select;

/// A trait for any AST node that can be rendered into a SQL string.
pub trait Render {
    fn render(&self, renderer: &mut Renderer);
}

/// A context that holds the state during the rendering process.
///
/// It accumulates the SQL string and the parameters, and provides
/// access to the dialect for syntax-specific details.
pub struct Renderer<'a> {
    pub sql: String,
    pub params: Vec<Literal>,
    pub dialect: &'a dyn Dialect,
}

impl<'a> Renderer<'a> {
    pub fn new(dialect: &'a dyn Dialect) -> Self {
        Self {
            sql: String::new(),
            params: Vec::new(),
            dialect,
        }
    }

    /// Consumes the renderer and returns the final SQL string and parameters.
    pub fn finish(self) -> (String, Vec<Literal>) {
        (self.sql, self.params)
    }

    /// Renders `items` separated by `, `.
    pub fn comma_separated<T: Render>(&mut self, items: &[T]) {
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                self.sql.push_str(", ");
            }
            item.render(self);
        }
    }

    /// Renders ` KEYWORD node` when the optional clause is present.
    pub fn optional_clause<T: Render>(&mut self, keyword: &str, node: Option<&T>) {
        if let Some(node) = node {
            self.sql.push(' ');
            self.sql.push_str(keyword);
            self.sql.push(' ');
            node.render(self);
        }
    }

    pub fn push_identifier(&mut self, name: &str) {
        let quoted = self.dialect.quote_identifier(name);
        self.sql.push_str(&quoted);
    }

    pub fn add_param(&mut self, value: Literal) {
        self.params.push(value);
        let placeholder = self.dialect.get_placeholder(self.params.len() - 1);
        self.sql.push_str(&placeholder);
    }
}
