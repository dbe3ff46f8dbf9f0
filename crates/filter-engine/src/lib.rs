pub mod compiler;
pub mod config;
pub mod error;
pub mod eval;
pub mod field;
pub mod memory;
pub mod pagination;
pub mod predicate;
pub mod registry;
pub mod sort;
pub mod target;

pub use compiler::{CompiledQuery, QueryCompiler};
pub use config::{CompilerSettings, FieldConfig, RegistryConfig, SortConfig};
pub use error::{Clause, QueryFilterError, Result};
pub use eval::TreeEvaluator;
pub use field::{FieldDescriptor, FieldType, Operation};
pub use memory::{MemoryQuery, Record, Value};
pub use pagination::{DEFAULT_PER_PAGE, Page, PageInfo, PageRequest, paginate};
pub use predicate::{ComparisonOp, Literal, Predicate, PredicateBuilder};
pub use registry::{FieldRegistry, FieldRegistryBuilder};
pub use sort::{OrderBy, SortDirection, SortField};
pub use target::{QueryExecutor, QueryTarget};
