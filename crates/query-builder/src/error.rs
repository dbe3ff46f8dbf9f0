use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QueryBuilderError {
    #[error("Unknown SQL dialect: {0} (expected 'postgres' or 'mysql')")]
    UnknownDialect(String),
}
