use crate::{
    error::Result,
    field::FieldType,
    registry::FieldRegistry,
    sort::SortDirection,
};
use filter_syntax::DEFAULT_MAX_DEPTH;
use serde::{Deserialize, Serialize};

/// Declarative registry definition, e.g. loaded from a JSON file:
///
/// ```json
/// {
///   "fields": [
///     { "key": "id", "column": "u.id", "type": "number" },
///     { "key": "name", "column": "u.name", "type": "text" }
///   ],
///   "default_sort": [{ "key": "id", "direction": "desc" }]
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RegistryConfig {
    #[serde(default)]
    pub fields: Vec<FieldConfig>,
    #[serde(default)]
    pub default_sort: Vec<SortConfig>,
    #[serde(default)]
    pub settings: CompilerSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldConfig {
    pub key: String,
    pub column: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SortConfig {
    pub key: String,
    #[serde(default = "default_direction")]
    pub direction: String,
}

fn default_direction() -> String {
    SortDirection::default().to_string()
}

impl RegistryConfig {
    pub fn from_json(input: &str) -> serde_json::Result<Self> {
        serde_json::from_str(input)
    }

    /// Runs the definition through the registry builder, so the same
    /// validation applies as for programmatic registration.
    pub fn build(&self) -> Result<FieldRegistry> {
        let builder = self
            .fields
            .iter()
            .fold(FieldRegistry::builder(), |builder, field| {
                builder.field(&field.key, &field.column, field.field_type)
            });

        self.default_sort
            .iter()
            .try_fold(builder, |builder, sort| {
                builder.default_sort(&sort.key, &sort.direction)
            })
            .map(|builder| builder.build())
    }
}

/// Limits applied while compiling filter strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompilerSettings {
    /// Maximum depth of the evaluation tree. Deeper filters are rejected.
    ///
    /// A leaf counts as depth 1 and every `&`/`|` adds one level, so the
    /// limit caps long flat chains as well as bracket nesting: with the
    /// default, `a | b | ...` accepts at most 128 clauses.
    pub max_depth: usize,
}

impl Default for CompilerSettings {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}
