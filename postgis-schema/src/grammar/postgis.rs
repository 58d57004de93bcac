//! PostGIS grammar
//!
//! Compiles a [`Blueprint`] into SQL statements. Extended PostgreSQL types,
//! PostGIS spatial types, GIN/GiST indexes, geometry collection columns and
//! extension lifecycle commands are handled here; everything else goes to the
//! wrapped [`BaseGrammar`].
//!
//! Spatial columns are validated when compiled:
//!
//! - `geomtype` must be `GEOGRAPHY` or `GEOMETRY` (any case)
//! - `srid` must be an integer
//! - `GEOGRAPHY` columns must use SRID 4326

use tracing::{debug, trace, warn};

use crate::blueprint::{
    Blueprint, ColumnDefinition, ColumnType, Command, DefaultValue, IndexCommand, IndexKind,
    SpatialColumn,
};
use crate::config::PostgisConfig;
use crate::error::{Result, SchemaError};

use super::base::{BaseGrammar, PostgresGrammar};

/// Storage types a spatial column may use.
pub const ALLOWED_GEOMTYPES: [&str; 2] = ["GEOGRAPHY", "GEOMETRY"];

/// The only SRID `GEOGRAPHY` columns accept (WGS84).
pub const GEOGRAPHY_SRID: i32 = 4326;

/// SRID used for geometry collection columns without one.
const DEFAULT_COLLECTION_SRID: i32 = 4326;

/// Coordinate dimensions used for geometry collection columns without one.
const DEFAULT_COLLECTION_DIMENSIONS: u32 = 2;

/// Default values starting with this prefix are `uuid-ossp` function calls.
const UUID_FUNCTION_PREFIX: &str = "uuid_generate_v";

/// Blueprint compiler for PostgreSQL with the PostGIS extension.
///
/// Composes a [`BaseGrammar`] for identifier quoting and standard statements.
/// The PostGIS schema comes from the [`PostgisConfig`] given at construction,
/// so two grammars with different configs compile the same blueprint to
/// different SQL.
#[derive(Debug, Clone, Default)]
pub struct PostgisGrammar<B: BaseGrammar = PostgresGrammar> {
    base: B,
    config: PostgisConfig,
}

impl PostgisGrammar<PostgresGrammar> {
    /// Grammar over the stock PostgreSQL base grammar.
    pub fn new(config: PostgisConfig) -> Self {
        Self::with_base(PostgresGrammar::new(), config)
    }
}

impl<B: BaseGrammar> PostgisGrammar<B> {
    pub fn with_base(base: B, config: PostgisConfig) -> Self {
        Self { base, config }
    }

    pub fn base(&self) -> &B {
        &self.base
    }

    pub fn config(&self) -> &PostgisConfig {
        &self.config
    }

    /// Schema qualifying PostGIS types and functions.
    pub fn schema(&self) -> &str {
        self.config.schema()
    }

    /// Compile a blueprint into SQL statements, one per implied command.
    pub fn compile(&self, blueprint: &Blueprint) -> Result<Vec<String>> {
        let commands = blueprint.implied_commands();
        let mut statements = Vec::with_capacity(commands.len());
        for command in &commands {
            let sql = self.compile_command(blueprint, command)?;
            trace!(
                table = blueprint.table(),
                command = command.name(),
                sql = %sql,
                "compiled statement"
            );
            statements.push(sql);
        }
        debug!(
            table = blueprint.table(),
            schema = self.schema(),
            statements = statements.len(),
            "compiled blueprint"
        );
        Ok(statements)
    }

    /// Compile a single command against `blueprint`.
    pub fn compile_command(&self, blueprint: &Blueprint, command: &Command) -> Result<String> {
        let sql = match command {
            Command::Create => {
                let columns = self.column_definitions(blueprint)?;
                self.base.compile_create(blueprint, &columns)
            }
            Command::Add => {
                let columns = self.column_definitions(blueprint)?;
                self.base.compile_add(blueprint, &columns)
            }
            Command::Drop => self.base.compile_drop(blueprint),
            Command::DropIfExists => self.base.compile_drop_if_exists(blueprint),
            Command::Index(index) => self.compile_index_command(blueprint, index),
            Command::GeometryCollection {
                column,
                srid,
                dimensions,
                typmod,
            } => self.compile_geometry_collection(blueprint, column, *srid, *dimensions, *typmod),
            Command::EnablePostgis => "CREATE EXTENSION postgis".to_string(),
            Command::EnablePostgisIfNotExists => {
                "CREATE EXTENSION IF NOT EXISTS postgis".to_string()
            }
            Command::DisablePostgis => "DROP EXTENSION postgis".to_string(),
            Command::DisablePostgisIfExists => "DROP EXTENSION IF EXISTS postgis".to_string(),
        };
        Ok(sql)
    }

    /// Column clauses for every column on the blueprint.
    pub fn column_definitions(&self, blueprint: &Blueprint) -> Result<Vec<String>> {
        blueprint
            .columns()
            .iter()
            .map(|column| {
                let sql_type = self.column_type(column)?;
                let default = column.default.as_ref().map(|v| self.default_value(v));
                Ok(self
                    .base
                    .column_clause(column, &sql_type, default.as_deref()))
            })
            .collect()
    }

    /// SQL type for a column.
    pub fn column_type(&self, column: &ColumnDefinition) -> Result<String> {
        let sql = match &column.column_type {
            ColumnType::Character { length } => format!("character({})", length),
            ColumnType::Hstore => "hstore".to_string(),
            ColumnType::Uuid => "uuid".to_string(),
            ColumnType::Jsonb => "jsonb".to_string(),
            ColumnType::IpAddress => "inet".to_string(),
            ColumnType::Netmask => "cidr".to_string(),
            ColumnType::MacAddress => "macaddr".to_string(),
            ColumnType::Line => "line".to_string(),
            ColumnType::LineSegment => "lseg".to_string(),
            ColumnType::Path => "path".to_string(),
            ColumnType::Box => "box".to_string(),
            ColumnType::Circle => "circle".to_string(),
            ColumnType::Money => "money".to_string(),
            ColumnType::Int4Range => "int4range".to_string(),
            ColumnType::Int8Range => "int8range".to_string(),
            ColumnType::NumRange => "numrange".to_string(),
            ColumnType::TsRange => "tsrange".to_string(),
            ColumnType::TsTzRange => "tstzrange".to_string(),
            ColumnType::DateRange => "daterange".to_string(),
            ColumnType::TsVector => "tsvector".to_string(),
            ColumnType::Spatial(spatial) => self.spatial_type(&column.name, spatial)?,
            ColumnType::Geography => "GEOGRAPHY".to_string(),
            ColumnType::Geometry => "GEOMETRY".to_string(),
            _ => self.base.type_fallback(column)?,
        };
        Ok(sql)
    }

    /// Validate a spatial column and render `<schema>.<GEOMTYPE>(<SUBTYPE>, <srid>)`.
    fn spatial_type(&self, column: &str, spatial: &SpatialColumn) -> Result<String> {
        let geomtype = spatial.geomtype.to_ascii_uppercase();
        if !ALLOWED_GEOMTYPES.contains(&geomtype.as_str()) {
            warn!(column, geomtype = %spatial.geomtype, "unsupported spatial storage type");
            return Err(SchemaError::UnsupportedGeomtype(format!(
                "column '{}': geomtype '{}' must be GEOGRAPHY or GEOMETRY",
                column, spatial.geomtype
            )));
        }

        let srid: i32 = spatial.srid.trim().parse().map_err(|_| {
            warn!(column, srid = %spatial.srid, "non-integer SRID");
            SchemaError::UnsupportedGeomtype(format!(
                "column '{}': SRID '{}' is not an integer",
                column, spatial.srid
            ))
        })?;

        if geomtype == "GEOGRAPHY" && srid != GEOGRAPHY_SRID {
            warn!(column, srid, "GEOGRAPHY column with non-WGS84 SRID");
            return Err(SchemaError::UnsupportedGeomtype(format!(
                "column '{}': SRID of GEOGRAPHY must be {}, found {}",
                column, GEOGRAPHY_SRID, srid
            )));
        }

        Ok(format!(
            "{}.{}({}, {})",
            self.schema(),
            geomtype,
            spatial.subtype_name(),
            srid
        ))
    }

    /// Default value SQL; `uuid_generate_v*` calls are passed through unquoted.
    fn default_value(&self, value: &DefaultValue) -> String {
        match value {
            DefaultValue::String(s) if s.starts_with(UUID_FUNCTION_PREFIX) => s.clone(),
            other => self.base.default_value(other),
        }
    }

    fn compile_index_command(&self, blueprint: &Blueprint, command: &IndexCommand) -> String {
        let name = command.name.clone().unwrap_or_else(|| {
            self.base
                .index_name(blueprint.table(), command.kind, &command.columns)
        });
        match command.kind {
            IndexKind::Primary => self.base.compile_primary(blueprint, command),
            IndexKind::Unique => self.base.compile_unique(blueprint, command, &name),
            IndexKind::Index => self.base.compile_index(blueprint, command, &name),
            IndexKind::Gin => self.compile_access_method(blueprint, command, &name, "GIN"),
            IndexKind::Gist => self.compile_access_method(blueprint, command, &name, "GIST"),
        }
    }

    /// `CREATE INDEX <name> ON <table> USING <METHOD>(<columns>)`
    fn compile_access_method(
        &self,
        blueprint: &Blueprint,
        command: &IndexCommand,
        name: &str,
        method: &str,
    ) -> String {
        format!(
            "CREATE INDEX {} ON {} USING {}({})",
            name,
            self.base.wrap_table(blueprint.table()),
            method,
            self.base.columnize(&command.columns)
        )
    }

    fn compile_geometry_collection(
        &self,
        blueprint: &Blueprint,
        column: &str,
        srid: Option<i32>,
        dimensions: u32,
        typmod: bool,
    ) -> String {
        let srid = srid
            .filter(|s| *s != 0)
            .unwrap_or(DEFAULT_COLLECTION_SRID);
        let dimensions = if dimensions == 0 {
            DEFAULT_COLLECTION_DIMENSIONS
        } else {
            dimensions
        };
        format!(
            "SELECT {schema}.AddGeometryColumn('{}', '{}', {}, '{schema}.GEOMETRYCOLLECTION', {}, {})",
            blueprint.table(),
            column,
            srid,
            dimensions,
            typmod,
            schema = self.schema()
        )
    }
}
