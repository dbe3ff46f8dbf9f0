//! In-memory query backend over a vector of records.

use crate::{
    predicate::Predicate,
    sort::SortDirection,
    target::{QueryExecutor, QueryTarget},
};
use std::convert::Infallible;

mod matcher;
mod value;

pub use value::{Record, Value};

#[derive(Debug, Clone, Default)]
pub struct MemoryQuery {
    records: Vec<Record>,
    predicates: Vec<Predicate>,
    order_by: Vec<(String, SortDirection)>,
    offset: Option<u64>,
    limit: Option<u64>,
}

impl MemoryQuery {
    pub fn new(records: Vec<Record>) -> Self {
        Self {
            records,
            ..Default::default()
        }
    }

    pub fn predicates(&self) -> &[Predicate] {
        &self.predicates
    }

    fn is_match(&self, record: &Record) -> bool {
        self.predicates.iter().all(|p| p.matches(record))
    }
}

impl QueryTarget for MemoryQuery {
    fn apply_predicate(&mut self, predicate: Predicate) {
        self.predicates.push(predicate);
    }

    fn add_order_by(&mut self, column: &str, direction: SortDirection) {
        self.order_by.push((column.to_string(), direction));
    }

    fn set_offset(&mut self, offset: u64) {
        self.offset = Some(offset);
    }

    fn set_limit(&mut self, limit: u64) {
        self.limit = Some(limit);
    }
}

impl QueryExecutor for MemoryQuery {
    type Record = Record;
    type Error = Infallible;

    fn count(&self) -> Result<u64, Self::Error> {
        Ok(self.records.iter().filter(|r| self.is_match(r)).count() as u64)
    }

    fn execute(&self) -> Result<Vec<Record>, Self::Error> {
        let mut rows: Vec<&Record> = self.records.iter().filter(|r| self.is_match(r)).collect();

        // Stable, so ties keep insertion order.
        rows.sort_by(|a, b| {
            self.order_by
                .iter()
                .map(|(column, direction)| {
                    let ordering = a.get(column).sort_cmp(b.get(column));
                    match direction {
                        SortDirection::Asc => ordering,
                        SortDirection::Desc => ordering.reverse(),
                    }
                })
                .find(|ordering| ordering.is_ne())
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        let offset = usize::try_from(self.offset.unwrap_or(0)).unwrap_or(usize::MAX);
        let limit = self
            .limit
            .map_or(usize::MAX, |l| usize::try_from(l).unwrap_or(usize::MAX));

        Ok(rows.into_iter().skip(offset).take(limit).cloned().collect())
    }
}
