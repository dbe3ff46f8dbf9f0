use crate::field::{FieldType, Operation};
use filter_syntax::SyntaxError;
use std::fmt;
use thiserror::Error;

/// The query parameter an error originated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Clause {
    Filter,
    Sort,
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Clause::Filter => write!(f, "filter"),
            Clause::Sort => write!(f, "sort"),
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum QueryFilterError {
    #[error("query filter: expression '{0}' doesn't have the 3 required operator:key:value parts")]
    MalformedExpression(String),

    #[error("query filter: {0}")]
    Syntax(#[from] SyntaxError),

    #[error("query {clause}: field '{key}' does not exist")]
    UnknownField { key: String, clause: Clause },

    #[error("query filter: unsupported filter operation '{0}'")]
    UnknownOperator(String),

    #[error("query filter: operation '{operation}' isn't supported for {field_type} field '{key}'")]
    UnsupportedOperation {
        operation: Operation,
        field_type: FieldType,
        key: String,
    },

    #[error("query filter: value '{value}' of field '{key}' is not {expected}")]
    ValueFormat {
        key: String,
        value: String,
        expected: &'static str,
    },

    #[error("query sort: expression '{0}' doesn't have the 2 required key:direction parts")]
    MalformedSort(String),

    #[error("query sort: direction '{0}' isn't supported, expected 'asc' or 'desc'")]
    InvalidSortDirection(String),
}

impl QueryFilterError {
    pub fn unknown_field(key: impl Into<String>, clause: Clause) -> Self {
        QueryFilterError::UnknownField {
            key: key.into(),
            clause,
        }
    }

    /// Which query parameter the caller should blame.
    pub fn clause(&self) -> Clause {
        match self {
            QueryFilterError::UnknownField { clause, .. } => *clause,
            QueryFilterError::MalformedSort(_) | QueryFilterError::InvalidSortDirection(_) => {
                Clause::Sort
            }
            _ => Clause::Filter,
        }
    }

    /// Structural problems with the filter string itself, as opposed to
    /// problems with the fields or values it references.
    pub fn is_malformed(&self) -> bool {
        matches!(
            self,
            QueryFilterError::MalformedExpression(_) | QueryFilterError::Syntax(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, QueryFilterError>;
