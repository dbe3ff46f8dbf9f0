use crate::{
    error::{Clause, QueryFilterError, Result},
    registry::FieldRegistry,
};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use tracing::debug;

const SORT_PARTS: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_sql(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

impl FromStr for SortDirection {
    type Err = QueryFilterError;

    fn from_str(s: &str) -> Result<Self> {
        if s.eq_ignore_ascii_case("asc") {
            Ok(SortDirection::Asc)
        } else if s.eq_ignore_ascii_case("desc") {
            Ok(SortDirection::Desc)
        } else {
            Err(QueryFilterError::InvalidSortDirection(s.to_string()))
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortDirection::Asc => write!(f, "asc"),
            SortDirection::Desc => write!(f, "desc"),
        }
    }
}

/// A sort request in terms of external field keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SortField {
    pub key: String,
    pub direction: SortDirection,
}

impl SortField {
    pub fn new(key: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            key: key.into(),
            direction,
        }
    }

    /// Parses `key:direction`, checking the key against the registry.
    pub fn parse(raw: &str, registry: &FieldRegistry) -> Result<Self> {
        let parts: Vec<&str> = raw.split(':').collect();
        if parts.len() != SORT_PARTS {
            return Err(QueryFilterError::MalformedSort(raw.to_string()));
        }
        if registry.get(parts[0]).is_none() {
            return Err(QueryFilterError::unknown_field(parts[0], Clause::Sort));
        }

        Ok(SortField::new(parts[0], parts[1].parse()?))
    }

    /// Translates the key to its backend column.
    pub fn resolve(&self, registry: &FieldRegistry) -> Result<OrderBy> {
        let field = registry
            .get(&self.key)
            .ok_or_else(|| QueryFilterError::unknown_field(&self.key, Clause::Sort))?;

        Ok(OrderBy {
            column: field.column().to_string(),
            direction: self.direction,
        })
    }
}

/// A resolved ordering entry, ready for the query backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderBy {
    pub column: String,
    pub direction: SortDirection,
}

/// Resolves the sort parameter into ordering entries.
///
/// An explicit sort string replaces the registry defaults entirely; an
/// absent or empty one falls back to them, which may mean no ordering.
pub fn parse_sort(registry: &FieldRegistry, sort: Option<&str>) -> Result<Vec<OrderBy>> {
    match sort.filter(|s| !s.is_empty()) {
        Some(raw) => {
            let field = SortField::parse(raw, registry)?;
            debug!(key = %field.key, direction = %field.direction, "parsed sort parameter");
            Ok(vec![field.resolve(registry)?])
        }
        None => {
            debug!(
                count = registry.default_sort().len(),
                "applying default sort"
            );
            registry
                .default_sort()
                .iter()
                .map(|field| field.resolve(registry))
                .collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> FieldRegistry {
        FieldRegistry::builder()
            .number("id", "u.id")
            .text("name", "u.name")
            .default_sort("id", "asc")
            .unwrap()
            .build()
    }

    #[test]
    fn test_direction_is_case_insensitive() {
        assert_eq!("ASC".parse::<SortDirection>().unwrap(), SortDirection::Asc);
        assert_eq!("Desc".parse::<SortDirection>().unwrap(), SortDirection::Desc);
        assert_eq!(
            "up".parse::<SortDirection>(),
            Err(QueryFilterError::InvalidSortDirection("up".to_string()))
        );
    }

    #[test]
    fn test_default_sort_applies_without_parameter() {
        let expected = vec![OrderBy {
            column: "u.id".to_string(),
            direction: SortDirection::Asc,
        }];
        assert_eq!(parse_sort(&registry(), None).unwrap(), expected);
        assert_eq!(parse_sort(&registry(), Some("")).unwrap(), expected);
    }

    #[test]
    fn test_explicit_sort_replaces_defaults() {
        assert_eq!(
            parse_sort(&registry(), Some("name:DESC")).unwrap(),
            vec![OrderBy {
                column: "u.name".to_string(),
                direction: SortDirection::Desc,
            }]
        );
    }

    #[test]
    fn test_sort_errors() {
        let registry = registry();

        assert_eq!(
            parse_sort(&registry, Some("name")),
            Err(QueryFilterError::MalformedSort("name".to_string()))
        );
        assert_eq!(
            parse_sort(&registry, Some("name:asc:extra")),
            Err(QueryFilterError::MalformedSort("name:asc:extra".to_string()))
        );
        assert_eq!(
            parse_sort(&registry, Some("age:asc")),
            Err(QueryFilterError::unknown_field("age", Clause::Sort))
        );
        assert_eq!(
            parse_sort(&registry, Some("name:sideways")),
            Err(QueryFilterError::InvalidSortDirection("sideways".to_string()))
        );
    }

    #[test]
    fn test_no_defaults_means_no_ordering() {
        let registry = FieldRegistry::builder().number("id", "id").build();
        assert!(parse_sort(&registry, None).unwrap().is_empty());
    }
}
