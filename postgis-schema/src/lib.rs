//! PostGIS schema support for PostgreSQL
//!
//! This crate turns declarative table definitions into PostgreSQL DDL, with
//! support for PostGIS spatial columns and the extended PostgreSQL column
//! types (hstore, ranges, network addresses, geometric primitives).
//!
//! # Key Features
//!
//! - **Blueprints**: Record columns, indexes and table commands for one table
//!   with a fluent builder ([`Blueprint`])
//! - **Late validation**: Spatial columns are checked when compiled, not when
//!   declared; `GEOGRAPHY` columns must use SRID 4326
//! - **Composable grammar**: [`PostgisGrammar`] wraps a [`BaseGrammar`] for
//!   identifier quoting and the standard statements
//! - **Configurable schema**: The PostGIS schema comes from a [`PostgisConfig`]
//!   loaded from TOML, JSON or the environment
//!
//! # Usage
//!
//! ```
//! use postgis_schema::{Blueprint, PostgisConfig, PostgisGrammar};
//!
//! let mut table = Blueprint::new("places");
//! table.create();
//! table.increments("id");
//! table.point("location").gist();
//!
//! let grammar = PostgisGrammar::new(PostgisConfig::default());
//! let statements = grammar.compile(&table).unwrap();
//! assert_eq!(
//!     statements[0],
//!     "create table \"places\" (\"id\" serial primary key not null, \
//!      \"location\" public.GEOGRAPHY(POINT, 4326) not null)"
//! );
//! assert_eq!(
//!     statements[1],
//!     "CREATE INDEX places_location_gist ON \"places\" USING GIST(\"location\")"
//! );
//! ```

pub mod blueprint;
pub mod config;
pub mod error;
pub mod grammar;

pub use blueprint::{
    Blueprint, ColumnDefinition, ColumnType, Command, DefaultValue, IndexCommand, IndexFlag,
    IndexKind, SpatialColumn,
};
pub use config::{ConfigError, PostgisConfig};
pub use error::{Result, SchemaError};
pub use grammar::{BaseGrammar, PostgisGrammar, PostgresGrammar};
