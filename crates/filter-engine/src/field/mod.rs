//! Typed field descriptors and the per-type operation rules.
//!
//! | Type     | eq/neq           | like/not-like | lt/lte/gt/gte    |
//! |----------|------------------|---------------|------------------|
//! | number   | numeric          | unsupported   | numeric          |
//! | text     | quotes stripped  | substring     | unsupported      |
//! | boolean  | quotes stripped  | unsupported   | unsupported      |
//! | datetime | parsed date-time | unsupported   | parsed date-time |
//!
//! `is-null`, `is-not-null` and `is-member-of` are legal for every type.

use crate::{
    error::{QueryFilterError, Result},
    predicate::{ComparisonOp, Literal, Predicate},
};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

pub mod value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Number,
    Text,
    Boolean,
    Datetime,
}

impl FieldType {
    pub fn name(&self) -> &'static str {
        match self {
            FieldType::Number => "number",
            FieldType::Text => "text",
            FieldType::Boolean => "boolean",
            FieldType::Datetime => "datetime",
        }
    }

    pub fn supports(&self, operation: Operation) -> bool {
        use Operation::*;

        match operation {
            Eq | Neq | IsNull | IsNotNull | IsMemberOf => true,
            Like | NotLike => matches!(self, FieldType::Text),
            Lt | Lte | Gt | Gte => matches!(self, FieldType::Number | FieldType::Datetime),
        }
    }

    /// Validates a comparison operand and converts it to a typed literal.
    fn literal(&self, key: &str, raw: &str) -> Result<Literal> {
        match self {
            FieldType::Number => value::parse_number(raw)
                .map(Literal::Number)
                .ok_or_else(|| value_format(key, raw, "a number")),
            FieldType::Text | FieldType::Boolean => {
                Ok(Literal::Text(value::strip_quotes(raw).to_string()))
            }
            FieldType::Datetime => {
                let text = value::strip_quotes(raw);
                value::parse_datetime(text)
                    .map(Literal::DateTime)
                    .ok_or_else(|| value_format(key, text, "a datetime"))
            }
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

fn value_format(key: &str, value: &str, expected: &'static str) -> QueryFilterError {
    QueryFilterError::ValueFormat {
        key: key.to_string(),
        value: value.to_string(),
        expected,
    }
}

/// Operator mnemonics accepted in a leaf expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Operation {
    Eq,
    Neq,
    Like,
    NotLike,
    Lt,
    Lte,
    Gt,
    Gte,
    IsNull,
    IsNotNull,
    IsMemberOf,
}

impl Operation {
    pub const ALL: [Operation; 11] = [
        Operation::Eq,
        Operation::Neq,
        Operation::Like,
        Operation::NotLike,
        Operation::Lt,
        Operation::Lte,
        Operation::Gt,
        Operation::Gte,
        Operation::IsNull,
        Operation::IsNotNull,
        Operation::IsMemberOf,
    ];

    pub fn mnemonic(&self) -> &'static str {
        match self {
            Operation::Eq => "eq",
            Operation::Neq => "neq",
            Operation::Like => "like",
            Operation::NotLike => "not-like",
            Operation::Lt => "lt",
            Operation::Lte => "lte",
            Operation::Gt => "gt",
            Operation::Gte => "gte",
            Operation::IsNull => "is-null",
            Operation::IsNotNull => "is-not-null",
            Operation::IsMemberOf => "is-member-of",
        }
    }

    pub fn comparison(&self) -> Option<ComparisonOp> {
        match self {
            Operation::Eq => Some(ComparisonOp::Eq),
            Operation::Neq => Some(ComparisonOp::Neq),
            Operation::Lt => Some(ComparisonOp::Lt),
            Operation::Lte => Some(ComparisonOp::Lte),
            Operation::Gt => Some(ComparisonOp::Gt),
            Operation::Gte => Some(ComparisonOp::Gte),
            _ => None,
        }
    }
}

impl FromStr for Operation {
    type Err = QueryFilterError;

    fn from_str(s: &str) -> Result<Self> {
        Operation::ALL
            .into_iter()
            .find(|op| op.mnemonic() == s)
            .ok_or_else(|| QueryFilterError::UnknownOperator(s.to_string()))
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.mnemonic())
    }
}

/// Binding of an external field key to a backend column and a type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldDescriptor {
    key: String,
    column: String,
    field_type: FieldType,
}

impl FieldDescriptor {
    pub fn new(key: impl Into<String>, column: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            key: key.into(),
            column: column.into(),
            field_type,
        }
    }

    /// The key used in filter and sort strings.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The backend identifier the key translates to.
    pub fn column(&self) -> &str {
        &self.column
    }

    pub fn field_type(&self) -> FieldType {
        self.field_type
    }

    /// Builds the predicate for `operation` applied to the raw operand.
    pub fn apply(&self, operation: Operation, raw: &str) -> Result<Predicate> {
        if !self.field_type.supports(operation) {
            return Err(QueryFilterError::UnsupportedOperation {
                operation,
                field_type: self.field_type,
                key: self.key.clone(),
            });
        }

        let column = self.column.clone();
        let predicate = match operation {
            Operation::IsNull => Predicate::IsNull { column },
            Operation::IsNotNull => Predicate::IsNotNull { column },
            Operation::IsMemberOf => Predicate::MemberOf {
                column,
                value: Literal::Text(raw.to_string()),
            },
            Operation::Like | Operation::NotLike => Predicate::Like {
                column,
                pattern: value::like_pattern(value::strip_quotes(raw)),
                negated: operation == Operation::NotLike,
            },
            Operation::Eq
            | Operation::Neq
            | Operation::Lt
            | Operation::Lte
            | Operation::Gt
            | Operation::Gte => {
                let value = self.field_type.literal(&self.key, raw)?;
                let op = operation
                    .comparison()
                    .ok_or_else(|| QueryFilterError::UnknownOperator(operation.to_string()))?;
                Predicate::Comparison { column, op, value }
            }
        };

        Ok(predicate)
    }

    pub fn eq(&self, raw: &str) -> Result<Predicate> {
        self.apply(Operation::Eq, raw)
    }

    pub fn neq(&self, raw: &str) -> Result<Predicate> {
        self.apply(Operation::Neq, raw)
    }

    pub fn like(&self, raw: &str) -> Result<Predicate> {
        self.apply(Operation::Like, raw)
    }

    pub fn not_like(&self, raw: &str) -> Result<Predicate> {
        self.apply(Operation::NotLike, raw)
    }

    pub fn lt(&self, raw: &str) -> Result<Predicate> {
        self.apply(Operation::Lt, raw)
    }

    pub fn lte(&self, raw: &str) -> Result<Predicate> {
        self.apply(Operation::Lte, raw)
    }

    pub fn gt(&self, raw: &str) -> Result<Predicate> {
        self.apply(Operation::Gt, raw)
    }

    pub fn gte(&self, raw: &str) -> Result<Predicate> {
        self.apply(Operation::Gte, raw)
    }

    pub fn is_null(&self) -> Result<Predicate> {
        self.apply(Operation::IsNull, "")
    }

    pub fn is_not_null(&self) -> Result<Predicate> {
        self.apply(Operation::IsNotNull, "")
    }

    pub fn is_member_of(&self, raw: &str) -> Result<Predicate> {
        self.apply(Operation::IsMemberOf, raw)
    }
}
