//! Evaluation of a [`Predicate`] against a single [`Record`].
//!
//! Comparisons follow SQL three-valued logic: a comparison involving null
//! or an unconvertible value is unknown, and a record only matches when
//! the whole predicate is known to be true.

use super::value::{Record, Value, parse_bool};
use crate::{
    field::value::parse_datetime,
    predicate::{ComparisonOp, Literal, Predicate},
};
use bigdecimal::BigDecimal;
use std::cmp::Ordering;
use tracing::trace;

impl Predicate {
    pub fn matches(&self, record: &Record) -> bool {
        self.truth(record) == Some(true)
    }

    /// `None` stands for SQL unknown.
    pub fn truth(&self, record: &Record) -> Option<bool> {
        match self {
            Predicate::Comparison { column, op, value } => {
                ComparisonEvaluator::new(record.get(column), value, *op).evaluate()
            }
            Predicate::Like {
                column,
                pattern,
                negated,
            } => {
                let text = record.get(column).as_string()?.to_lowercase();
                Some(like_matches(pattern, &text) != *negated)
            }
            Predicate::IsNull { column } => Some(record.get(column).is_null()),
            Predicate::IsNotNull { column } => Some(!record.get(column).is_null()),
            Predicate::MemberOf { column, value } => member_of(record.get(column), value),
            Predicate::And(left, right) => match (left.truth(record), right.truth(record)) {
                (Some(false), _) | (_, Some(false)) => Some(false),
                (Some(true), Some(true)) => Some(true),
                _ => None,
            },
            Predicate::Or(left, right) => match (left.truth(record), right.truth(record)) {
                (Some(true), _) | (_, Some(true)) => Some(true),
                (Some(false), Some(false)) => Some(false),
                _ => None,
            },
        }
    }
}

/// Compares a record value with a typed literal.
struct ComparisonEvaluator<'a> {
    value: &'a Value,
    literal: &'a Literal,
    op: ComparisonOp,
}

impl<'a> ComparisonEvaluator<'a> {
    fn new(value: &'a Value, literal: &'a Literal, op: ComparisonOp) -> Self {
        Self { value, literal, op }
    }

    fn evaluate(&self) -> Option<bool> {
        let ordering = match (self.value, self.literal) {
            (Value::Null, _) => return None,
            (value, Literal::Number(n)) => value.as_decimal()?.cmp(n),
            (Value::Timestamp(v), Literal::DateTime(dt)) => v.cmp(dt),
            (Value::Text(v), Literal::DateTime(dt)) => parse_datetime(v)?.cmp(dt),
            (Value::Boolean(v), Literal::Text(t)) => v.cmp(&parse_bool(t)?),
            (Value::Text(v), Literal::Text(t)) => v.as_str().cmp(t.as_str()),
            (Value::Timestamp(v), Literal::Text(t)) => v.cmp(&parse_datetime(t)?),
            (value @ (Value::Int(_) | Value::Float(_) | Value::Decimal(_)), Literal::Text(t)) => {
                value.as_decimal()?.cmp(&t.trim().parse::<BigDecimal>().ok()?)
            }
            (value, literal) => {
                trace!(?value, %literal, "incomparable value and literal");
                return None;
            }
        };

        Some(self.holds(ordering))
    }

    fn holds(&self, ordering: Ordering) -> bool {
        match self.op {
            ComparisonOp::Eq => ordering == Ordering::Equal,
            ComparisonOp::Neq => ordering != Ordering::Equal,
            ComparisonOp::Lt => ordering == Ordering::Less,
            ComparisonOp::Lte => ordering != Ordering::Greater,
            ComparisonOp::Gt => ordering == Ordering::Greater,
            ComparisonOp::Gte => ordering != Ordering::Less,
        }
    }
}

fn member_of(value: &Value, literal: &Literal) -> Option<bool> {
    let needle = literal.to_string();
    match value {
        Value::Null => None,
        Value::List(items) => Some(
            items
                .iter()
                .filter_map(Value::as_string)
                .any(|item| item == needle),
        ),
        scalar => Some(scalar.as_string()? == needle),
    }
}

/// SQL `LIKE` with `%`, `_` and backslash escapes.
pub(crate) fn like_matches(pattern: &str, text: &str) -> bool {
    let pattern: Vec<char> = pattern.chars().collect();
    let text: Vec<char> = text.chars().collect();
    like_from(&pattern, &text)
}

fn like_from(pattern: &[char], text: &[char]) -> bool {
    match pattern.split_first() {
        None => text.is_empty(),
        Some(('%', rest)) => (0..=text.len()).any(|skip| like_from(rest, &text[skip..])),
        Some(('_', rest)) => !text.is_empty() && like_from(rest, &text[1..]),
        Some(('\\', rest)) if !rest.is_empty() => {
            text.first() == rest.first() && like_from(&rest[1..], &text[1..])
        }
        Some((ch, rest)) => text.first() == Some(ch) && like_from(rest, &text[1..]),
    }
}
