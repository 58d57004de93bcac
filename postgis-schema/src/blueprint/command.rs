//! Blueprint commands
//!
//! Each command compiles to exactly one SQL statement.

use serde::{Deserialize, Serialize};

/// Index access method / constraint kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IndexKind {
    Primary,
    Unique,
    Index,
    Gin,
    Gist,
}

impl IndexKind {
    /// Lowercase name, used as the suffix of derived index names.
    pub fn as_str(&self) -> &'static str {
        match self {
            IndexKind::Primary => "primary",
            IndexKind::Unique => "unique",
            IndexKind::Index => "index",
            IndexKind::Gin => "gin",
            IndexKind::Gist => "gist",
        }
    }
}

impl std::fmt::Display for IndexKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Index or key over one or more columns
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexCommand {
    pub kind: IndexKind,
    pub columns: Vec<String>,
    /// Explicit index name; `None` lets the grammar derive one
    pub name: Option<String>,
}

impl IndexCommand {
    pub fn new(kind: IndexKind, columns: Vec<String>, name: Option<String>) -> Self {
        Self {
            kind,
            columns,
            name,
        }
    }
}

/// A schema command recorded on a blueprint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    /// Create the table with all blueprint columns
    Create,
    /// Add the blueprint columns to an existing table
    Add,
    Drop,
    DropIfExists,
    Index(IndexCommand),
    /// `AddGeometryColumn` call for a geometry collection column
    GeometryCollection {
        column: String,
        srid: Option<i32>,
        dimensions: u32,
        typmod: bool,
    },
    EnablePostgis,
    EnablePostgisIfNotExists,
    DisablePostgis,
    DisablePostgisIfExists,
}

impl Command {
    /// Short name used in log output.
    pub fn name(&self) -> &'static str {
        match self {
            Command::Create => "create",
            Command::Add => "add",
            Command::Drop => "drop",
            Command::DropIfExists => "dropIfExists",
            Command::Index(index) => index.kind.as_str(),
            Command::GeometryCollection { .. } => "geometrycollection",
            Command::EnablePostgis => "enablePostgis",
            Command::EnablePostgisIfNotExists => "enablePostgisIfNotExists",
            Command::DisablePostgis => "disablePostgis",
            Command::DisablePostgisIfExists => "disablePostgisIfExists",
        }
    }
}
