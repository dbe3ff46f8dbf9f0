use filter_engine::QueryFilterError;
use filter_syntax::SyntaxError;
use query_builder::QueryBuilderError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Failed to read the registry file: {0}")]
    ConfigFileRead(#[from] std::io::Error),

    #[error("Failed to deserialize the registry file as JSON: {0}")]
    ConfigDeserialize(#[from] serde_json::Error),

    #[error("Failed to serialize data to JSON: {0}")]
    JsonSerialize(serde_json::Error),

    #[error("{0}")]
    Syntax(#[from] SyntaxError),

    #[error("{0}")]
    Query(#[from] QueryFilterError),

    #[error("{0}")]
    Dialect(#[from] QueryBuilderError),
}
