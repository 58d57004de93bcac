//! PostGIS grammar configuration.
//!
//! The only setting is the database schema the PostGIS extension is installed
//! in. It qualifies spatial column types (`public.GEOGRAPHY(POINT, 4326)`)
//! and the `AddGeometryColumn` function call.
//!
//! Configuration can come from a TOML or JSON file with a `postgis` table:
//!
//! ```toml
//! [postgis]
//! schema = "gis"
//! ```
//!
//! and `POSTGIS_SCHEMA` in the environment overrides the file value.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Schema PostGIS lives in when nothing else is configured.
pub const DEFAULT_SCHEMA: &str = "public";

/// Environment variable that overrides the configured schema.
pub const SCHEMA_ENV_VAR: &str = "POSTGIS_SCHEMA";

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("Failed to read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config text is not valid TOML/JSON or has the wrong shape
    #[error("Failed to parse config: {0}")]
    Parse(String),
}

/// PostGIS settings consumed by [`PostgisGrammar`](crate::PostgisGrammar).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PostgisConfig {
    /// Schema qualifying PostGIS types and functions.
    pub schema: String,
}

impl Default for PostgisConfig {
    fn default() -> Self {
        Self {
            schema: DEFAULT_SCHEMA.to_string(),
        }
    }
}

/// On-disk layout: settings live under a `postgis` table.
#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    postgis: PostgisConfig,
}

impl PostgisConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the PostGIS schema.
    pub fn with_schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = schema.into();
        self
    }

    pub fn schema(&self) -> &str {
        &self.schema
    }

    /// Parse the `[postgis]` table of a TOML document.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let file: ConfigFile = toml::from_str(text)
            .map_err(|e: toml::de::Error| ConfigError::Parse(e.to_string()))?;
        Ok(file.postgis)
    }

    /// Parse the `postgis` object of a JSON document.
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let file: ConfigFile =
            serde_json::from_str(text).map_err(|e| ConfigError::Parse(e.to_string()))?;
        Ok(file.postgis)
    }

    /// Load from a file; `.json` files are parsed as JSON, anything else as TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        let config = if is_json {
            Self::from_json_str(&text)?
        } else {
            Self::from_toml_str(&text)?
        };

        tracing::debug!(
            path = %path.display(),
            schema = %config.schema,
            "loaded PostGIS config"
        );
        Ok(config)
    }

    /// Apply `POSTGIS_SCHEMA` from the environment, if set and non-empty.
    pub fn with_env_overrides(self) -> Self {
        self.override_schema(std::env::var(SCHEMA_ENV_VAR).ok())
    }

    fn override_schema(mut self, value: Option<String>) -> Self {
        if let Some(schema) = value.filter(|s| !s.trim().is_empty()) {
            tracing::debug!(schema = %schema, "PostGIS schema overridden from environment");
            self.schema = schema;
        }
        self
    }
}
