use crate::error::{QueryFilterError, Result};

/// A leaf expression split into its `operator:key:value` parts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LeafExpression<'a> {
    pub operator: &'a str,
    pub key: &'a str,
    /// Everything after the second colon, colons included.
    pub value: &'a str,
}

impl<'a> LeafExpression<'a> {
    pub fn parse(text: &'a str) -> Result<Self> {
        let mut parts = text.splitn(3, ':');

        match (parts.next(), parts.next(), parts.next()) {
            (Some(operator), Some(key), Some(value)) => Ok(LeafExpression {
                operator,
                key,
                value,
            }),
            _ => Err(QueryFilterError::MalformedExpression(text.to_string())),
        }
    }
}
