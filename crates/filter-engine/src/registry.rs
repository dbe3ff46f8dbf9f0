use crate::{
    error::{Clause, QueryFilterError, Result},
    field::{FieldDescriptor, FieldType},
    sort::{SortDirection, SortField},
};
use std::collections::HashMap;
use tracing::debug;

/// Configures the fields a query accepts. Consumed by [`build`], after
/// which the registry can no longer change.
///
/// [`build`]: FieldRegistryBuilder::build
#[derive(Debug, Clone, Default)]
pub struct FieldRegistryBuilder {
    fields: Vec<FieldDescriptor>,
    index: HashMap<String, usize>,
    default_sort: Vec<SortField>,
}

impl FieldRegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a field. A later registration for the same key replaces
    /// the earlier one in place.
    pub fn field(
        mut self,
        key: impl Into<String>,
        column: impl Into<String>,
        field_type: FieldType,
    ) -> Self {
        let descriptor = FieldDescriptor::new(key, column, field_type);

        match self.index.get(descriptor.key()) {
            Some(&position) => {
                debug!(key = descriptor.key(), "replacing registered field");
                self.fields[position] = descriptor;
            }
            None => {
                self.index
                    .insert(descriptor.key().to_string(), self.fields.len());
                self.fields.push(descriptor);
            }
        }
        self
    }

    pub fn number(self, key: impl Into<String>, column: impl Into<String>) -> Self {
        self.field(key, column, FieldType::Number)
    }

    pub fn text(self, key: impl Into<String>, column: impl Into<String>) -> Self {
        self.field(key, column, FieldType::Text)
    }

    pub fn boolean(self, key: impl Into<String>, column: impl Into<String>) -> Self {
        self.field(key, column, FieldType::Boolean)
    }

    pub fn datetime(self, key: impl Into<String>, column: impl Into<String>) -> Self {
        self.field(key, column, FieldType::Datetime)
    }

    /// Adds an ordering used when a request carries no sort parameter.
    /// Defaults apply in the order they were first added; adding one for a
    /// key again only changes its direction.
    pub fn default_sort(mut self, key: &str, direction: &str) -> Result<Self> {
        if !self.index.contains_key(key) {
            return Err(QueryFilterError::unknown_field(key, Clause::Sort));
        }
        let direction: SortDirection = direction.parse()?;

        match self.default_sort.iter_mut().find(|sort| sort.key == key) {
            Some(existing) => existing.direction = direction,
            None => self.default_sort.push(SortField::new(key, direction)),
        }
        Ok(self)
    }

    pub fn build(self) -> FieldRegistry {
        debug!(
            fields = self.fields.len(),
            default_sort = self.default_sort.len(),
            "field registry built"
        );

        FieldRegistry {
            fields: self.fields,
            index: self.index,
            default_sort: self.default_sort,
        }
    }
}

/// Immutable mapping from external field keys to typed backend columns.
///
/// Safe to share between threads and to use for any number of concurrent
/// compilations.
#[derive(Debug, Clone)]
pub struct FieldRegistry {
    fields: Vec<FieldDescriptor>,
    index: HashMap<String, usize>,
    default_sort: Vec<SortField>,
}

impl FieldRegistry {
    pub fn builder() -> FieldRegistryBuilder {
        FieldRegistryBuilder::new()
    }

    pub fn get(&self, key: &str) -> Option<&FieldDescriptor> {
        self.index.get(key).map(|&position| &self.fields[position])
    }

    /// Looks up a field referenced by a filter expression.
    pub fn lookup(&self, key: &str) -> Result<&FieldDescriptor> {
        self.get(key)
            .ok_or_else(|| QueryFilterError::unknown_field(key, Clause::Filter))
    }

    /// Registered fields in registration order.
    pub fn fields(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.fields.iter()
    }

    pub fn default_sort(&self) -> &[SortField] {
        &self.default_sort
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
