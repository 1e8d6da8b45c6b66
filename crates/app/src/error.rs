//! Errors raised before a configuration tree exists.

use tion_domain::error::{CompileError, ConfigError, SchemaError};

/// Failure to turn configuration source text into something compilable.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("configuration is not valid YAML")]
    Yaml(#[from] serde_yaml::Error),
    #[error(transparent)]
    Schema(#[from] SchemaError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl From<CompileError> for SourceError {
    fn from(err: CompileError) -> Self {
        match err {
            CompileError::Schema(err) => Self::Schema(err),
            CompileError::Config(err) => Self::Config(err),
        }
    }
}
