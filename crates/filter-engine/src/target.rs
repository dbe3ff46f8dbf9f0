use crate::{predicate::Predicate, sort::SortDirection};

/// A query under construction that accepts compiled filter and sort output.
pub trait QueryTarget {
    /// Adds a condition. Repeated calls combine with AND.
    fn apply_predicate(&mut self, predicate: Predicate);

    fn add_order_by(&mut self, column: &str, direction: SortDirection);

    fn set_offset(&mut self, offset: u64);

    fn set_limit(&mut self, limit: u64);
}

/// A query target that can also run the query.
pub trait QueryExecutor: QueryTarget {
    type Record;
    type Error;

    /// Number of records matching the applied predicates, ignoring
    /// offset and limit.
    fn count(&self) -> Result<u64, Self::Error>;

    fn execute(&self) -> Result<Vec<Self::Record>, Self::Error>;
}
