//! Schema compilation error types

use thiserror::Error;

use crate::config::ConfigError;

/// Schema compilation errors
#[derive(Debug, Error)]
pub enum SchemaError {
    /// Spatial column with an unsupported storage type or SRID
    #[error("Unsupported geomtype: {0}")]
    UnsupportedGeomtype(String),

    /// Column type the grammar has no SQL type for
    #[error("Unsupported column type: {0}")]
    UnsupportedColumnType(String),

    /// Configuration could not be loaded
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Result type for schema operations
pub type Result<T> = std::result::Result<T, SchemaError>;
