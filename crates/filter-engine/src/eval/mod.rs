use crate::{
    error::Result,
    field::Operation,
    predicate::Predicate,
    registry::FieldRegistry,
};
use filter_syntax::Node;
use leaf::LeafExpression;
use tracing::trace;

pub mod leaf;

/// Walks an evaluation tree and produces the composed predicate.
///
/// Fails on the first leaf that does not resolve; no partial predicate is
/// returned.
pub struct TreeEvaluator<'r> {
    registry: &'r FieldRegistry,
}

impl<'r> TreeEvaluator<'r> {
    pub fn new(registry: &'r FieldRegistry) -> Self {
        Self { registry }
    }

    pub fn evaluate(&self, node: Node) -> Result<Predicate> {
        match node {
            Node::And(left, right) => Ok(Predicate::and(
                self.evaluate(*left)?,
                self.evaluate(*right)?,
            )),
            Node::Or(left, right) => Ok(Predicate::or(
                self.evaluate(*left)?,
                self.evaluate(*right)?,
            )),
            Node::Expression { text, .. } => self.evaluate_leaf(&text),
        }
    }

    /// Resolves a single `operator:key:value` expression. The key is
    /// checked before the operator.
    pub fn evaluate_leaf(&self, text: &str) -> Result<Predicate> {
        let leaf = LeafExpression::parse(text)?;
        let field = self.registry.lookup(leaf.key)?;
        let operation: Operation = leaf.operator.parse()?;

        trace!(
            key = leaf.key,
            operation = %operation,
            field_type = %field.field_type(),
            "evaluating leaf expression"
        );
        field.apply(operation, leaf.value)
    }
}
