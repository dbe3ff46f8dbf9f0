use crate::{
    config::CompilerSettings,
    error::Result,
    eval::TreeEvaluator,
    predicate::Predicate,
    registry::FieldRegistry,
    sort::{self, OrderBy},
    target::QueryTarget,
};
use filter_syntax::{Lexer, TreeBuilder};
use serde::Serialize;
use tracing::{debug, warn};

/// Output of a compilation: an optional predicate plus the ordering.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct CompiledQuery {
    pub predicate: Option<Predicate>,
    pub order_by: Vec<OrderBy>,
}

impl CompiledQuery {
    /// Hands predicate and ordering over to a query backend.
    pub fn apply_to<T: QueryTarget>(self, target: &mut T) {
        if let Some(predicate) = self.predicate {
            target.apply_predicate(predicate);
        }
        for order in &self.order_by {
            target.add_order_by(&order.column, order.direction);
        }
    }
}

/// Compiles filter and sort parameters against a field registry.
#[derive(Debug, Clone)]
pub struct QueryCompiler<'r> {
    registry: &'r FieldRegistry,
    settings: CompilerSettings,
}

impl<'r> QueryCompiler<'r> {
    pub fn new(registry: &'r FieldRegistry) -> Self {
        Self {
            registry,
            settings: CompilerSettings::default(),
        }
    }

    pub fn with_settings(mut self, settings: CompilerSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn registry(&self) -> &FieldRegistry {
        self.registry
    }

    /// Compiles a filter string. An empty filter yields `None`.
    pub fn filter(&self, filter: &str) -> Result<Option<Predicate>> {
        let tokens = Lexer::new().tokenize(filter);
        let tree = TreeBuilder::with_max_depth(self.settings.max_depth)
            .build(tokens)
            .inspect_err(|err| warn!(%err, filter, "rejected filter string"))?;

        let Some(tree) = tree else {
            debug!("empty filter, no predicate");
            return Ok(None);
        };

        let predicate = TreeEvaluator::new(self.registry)
            .evaluate(tree)
            .inspect_err(|err| warn!(%err, filter, "rejected filter string"))?;

        debug!(filter, "compiled filter");
        Ok(Some(predicate))
    }

    /// Resolves the sort parameter, falling back to the registry defaults.
    pub fn sort(&self, sort: Option<&str>) -> Result<Vec<OrderBy>> {
        sort::parse_sort(self.registry, sort)
            .inspect_err(|err| warn!(%err, ?sort, "rejected sort string"))
    }

    pub fn compile(&self, filter: Option<&str>, sort: Option<&str>) -> Result<CompiledQuery> {
        let predicate = match filter {
            Some(filter) => self.filter(filter)?,
            None => None,
        };

        Ok(CompiledQuery {
            predicate,
            order_by: self.sort(sort)?,
        })
    }
}
