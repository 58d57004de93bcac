//! Error types for the geometry codecs.

use thiserror::Error;

use crate::geometry::GeometryType;

/// Geometry construction and codec errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// WKT text did not match the expected grammar.
    #[error("WKT parse error at position {position}: {message}")]
    Parse { position: usize, message: String },

    /// Members of one geometry mix 2D and 3D coordinates.
    #[error("Mixed dimensions: {0}")]
    MixedDimensions(String),

    /// A decoded geometry has a different type than the one requested.
    #[error("Expected {expected} geometry, found {found}")]
    TypeMismatch {
        expected: GeometryType,
        found: GeometryType,
    },

    /// A coordinate component is NaN or infinite.
    #[error("Non-finite coordinate: {0}")]
    NonFinite(String),

    /// GeoJSON input could not be mapped to a geometry.
    #[error("GeoJSON error: {0}")]
    GeoJson(String),

    /// (E)WKB input could not be decoded.
    #[error("WKB error: {0}")]
    Wkb(String),
}

/// Result type for geometry operations.
pub type Result<T> = std::result::Result<T, GeometryError>;

impl GeometryError {
    /// Create a WKT parse error
    pub fn parse(position: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            position,
            message: message.into(),
        }
    }
}
