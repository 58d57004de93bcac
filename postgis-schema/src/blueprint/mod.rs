//! Table blueprints
//!
//! A [`Blueprint`] records what should happen to one table: the columns to
//! create or add, explicit commands (indexes, extension lifecycle, geometry
//! collection columns) and table options. It is a passive accumulator; the
//! grammar turns it into SQL without modifying it.
//!
//! ```
//! use postgis_schema::Blueprint;
//!
//! let mut table = Blueprint::new("places");
//! table.create();
//! table.increments("id");
//! table.string("name", 255).unique();
//! table.point("location").gist();
//! ```

mod column;
mod command;

use postgis_geometry::GeometryType;

pub use column::{
    ColumnDefinition, ColumnType, DefaultValue, IndexFlag, SpatialColumn, DEFAULT_GEOMTYPE,
    DEFAULT_SRID,
};
pub use command::{Command, IndexCommand, IndexKind};

/// Default length of `character` columns.
pub const DEFAULT_CHARACTER_LENGTH: u32 = 255;

/// Default length of `string` (varchar) columns.
pub const DEFAULT_STRING_LENGTH: u32 = 255;

type FlagAccessor = fn(&ColumnDefinition) -> Option<&IndexFlag>;

fn primary_flag(column: &ColumnDefinition) -> Option<&IndexFlag> {
    column.primary.as_ref()
}

fn unique_flag(column: &ColumnDefinition) -> Option<&IndexFlag> {
    column.unique.as_ref()
}

fn index_flag(column: &ColumnDefinition) -> Option<&IndexFlag> {
    column.index.as_ref()
}

fn gin_flag(column: &ColumnDefinition) -> Option<&IndexFlag> {
    column.gin.as_ref()
}

fn gist_flag(column: &ColumnDefinition) -> Option<&IndexFlag> {
    column.gist.as_ref()
}

/// Inline index flags in resolution order. Only the first flag set on a
/// column becomes an index command.
const FLUENT_INDEXES: [(IndexKind, FlagAccessor); 5] = [
    (IndexKind::Primary, primary_flag),
    (IndexKind::Unique, unique_flag),
    (IndexKind::Index, index_flag),
    (IndexKind::Gin, gin_flag),
    (IndexKind::Gist, gist_flag),
];

/// Schema changes for a single table
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Blueprint {
    table: String,
    columns: Vec<ColumnDefinition>,
    commands: Vec<Command>,
    inherits: Option<String>,
    temporary: bool,
}

impl Blueprint {
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            ..Default::default()
        }
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn columns(&self) -> &[ColumnDefinition] {
        &self.columns
    }

    /// Explicitly recorded commands, in insertion order.
    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    /// Parent table, if this table inherits from one.
    pub fn parent(&self) -> Option<&str> {
        self.inherits.as_deref()
    }

    pub fn is_temporary(&self) -> bool {
        self.temporary
    }

    /// Check if the blueprint creates its table.
    pub fn creating(&self) -> bool {
        self.commands.iter().any(|c| matches!(c, Command::Create))
    }

    // ------------------------------------------------------------------
    // Table commands
    // ------------------------------------------------------------------

    pub fn create(&mut self) -> &mut Self {
        self.commands.push(Command::Create);
        self
    }

    pub fn drop(&mut self) -> &mut Self {
        self.commands.push(Command::Drop);
        self
    }

    pub fn drop_if_exists(&mut self) -> &mut Self {
        self.commands.push(Command::DropIfExists);
        self
    }

    /// Create the table as a temporary table.
    pub fn temporary(&mut self) -> &mut Self {
        self.temporary = true;
        self
    }

    /// Inherit columns from `parent` (PostgreSQL table inheritance).
    pub fn inherits(&mut self, parent: impl Into<String>) -> &mut Self {
        self.inherits = Some(parent.into());
        self
    }

    // ------------------------------------------------------------------
    // Index commands
    // ------------------------------------------------------------------

    fn index_command<I, S>(&mut self, kind: IndexKind, columns: I, name: Option<&str>) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.commands.push(Command::Index(IndexCommand::new(
            kind,
            columns.into_iter().map(Into::into).collect(),
            name.map(str::to_string),
        )));
        self
    }

    pub fn primary<I, S>(&mut self, columns: I, name: Option<&str>) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.index_command(IndexKind::Primary, columns, name)
    }

    pub fn unique<I, S>(&mut self, columns: I, name: Option<&str>) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.index_command(IndexKind::Unique, columns, name)
    }

    pub fn index<I, S>(&mut self, columns: I, name: Option<&str>) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.index_command(IndexKind::Index, columns, name)
    }

    /// GIN index over `columns`.
    pub fn gin<I, S>(&mut self, columns: I, name: Option<&str>) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.index_command(IndexKind::Gin, columns, name)
    }

    /// GiST index over `columns`.
    pub fn gist<I, S>(&mut self, columns: I, name: Option<&str>) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.index_command(IndexKind::Gist, columns, name)
    }

    // ------------------------------------------------------------------
    // Extension lifecycle
    // ------------------------------------------------------------------

    pub fn enable_postgis(&mut self) -> &mut Self {
        self.commands.push(Command::EnablePostgis);
        self
    }

    pub fn enable_postgis_if_not_exists(&mut self) -> &mut Self {
        self.commands.push(Command::EnablePostgisIfNotExists);
        self
    }

    pub fn disable_postgis(&mut self) -> &mut Self {
        self.commands.push(Command::DisablePostgis);
        self
    }

    pub fn disable_postgis_if_exists(&mut self) -> &mut Self {
        self.commands.push(Command::DisablePostgisIfExists);
        self
    }

    // ------------------------------------------------------------------
    // Columns
    // ------------------------------------------------------------------

    /// Append a column and return it for modifiers.
    pub fn add_column(
        &mut self,
        name: impl Into<String>,
        column_type: ColumnType,
    ) -> &mut ColumnDefinition {
        let index = self.columns.len();
        self.columns.push(ColumnDefinition::new(name, column_type));
        &mut self.columns[index]
    }

    pub fn character(&mut self, column: &str, length: u32) -> &mut ColumnDefinition {
        self.add_column(column, ColumnType::Character { length })
    }

    /// `character` column of the default length.
    pub fn character_default(&mut self, column: &str) -> &mut ColumnDefinition {
        self.character(column, DEFAULT_CHARACTER_LENGTH)
    }

    pub fn hstore(&mut self, column: &str) -> &mut ColumnDefinition {
        self.add_column(column, ColumnType::Hstore)
    }

    pub fn uuid(&mut self, column: &str) -> &mut ColumnDefinition {
        self.add_column(column, ColumnType::Uuid)
    }

    pub fn jsonb(&mut self, column: &str) -> &mut ColumnDefinition {
        self.add_column(column, ColumnType::Jsonb)
    }

    pub fn ip_address(&mut self, column: &str) -> &mut ColumnDefinition {
        self.add_column(column, ColumnType::IpAddress)
    }

    pub fn netmask(&mut self, column: &str) -> &mut ColumnDefinition {
        self.add_column(column, ColumnType::Netmask)
    }

    pub fn mac_address(&mut self, column: &str) -> &mut ColumnDefinition {
        self.add_column(column, ColumnType::MacAddress)
    }

    pub fn line(&mut self, column: &str) -> &mut ColumnDefinition {
        self.add_column(column, ColumnType::Line)
    }

    pub fn line_segment(&mut self, column: &str) -> &mut ColumnDefinition {
        self.add_column(column, ColumnType::LineSegment)
    }

    pub fn path(&mut self, column: &str) -> &mut ColumnDefinition {
        self.add_column(column, ColumnType::Path)
    }

    pub fn box_(&mut self, column: &str) -> &mut ColumnDefinition {
        self.add_column(column, ColumnType::Box)
    }

    pub fn circle(&mut self, column: &str) -> &mut ColumnDefinition {
        self.add_column(column, ColumnType::Circle)
    }

    pub fn money(&mut self, column: &str) -> &mut ColumnDefinition {
        self.add_column(column, ColumnType::Money)
    }

    pub fn int4range(&mut self, column: &str) -> &mut ColumnDefinition {
        self.add_column(column, ColumnType::Int4Range)
    }

    pub fn int8range(&mut self, column: &str) -> &mut ColumnDefinition {
        self.add_column(column, ColumnType::Int8Range)
    }

    pub fn numrange(&mut self, column: &str) -> &mut ColumnDefinition {
        self.add_column(column, ColumnType::NumRange)
    }

    pub fn tsrange(&mut self, column: &str) -> &mut ColumnDefinition {
        self.add_column(column, ColumnType::TsRange)
    }

    pub fn tstzrange(&mut self, column: &str) -> &mut ColumnDefinition {
        self.add_column(column, ColumnType::TsTzRange)
    }

    pub fn daterange(&mut self, column: &str) -> &mut ColumnDefinition {
        self.add_column(column, ColumnType::DateRange)
    }

    pub fn tsvector(&mut self, column: &str) -> &mut ColumnDefinition {
        self.add_column(column, ColumnType::TsVector)
    }

    // ------------------------------------------------------------------
    // Spatial columns
    // ------------------------------------------------------------------

    fn spatial(
        &mut self,
        column: &str,
        spatial: SpatialColumn,
    ) -> &mut ColumnDefinition {
        self.add_column(column, ColumnType::Spatial(spatial))
    }

    pub fn point(&mut self, column: &str) -> &mut ColumnDefinition {
        self.point_with(column, DEFAULT_GEOMTYPE, DEFAULT_SRID)
    }

    pub fn point_with(
        &mut self,
        column: &str,
        geomtype: impl Into<String>,
        srid: impl ToString,
    ) -> &mut ColumnDefinition {
        let spatial = SpatialColumn::new(GeometryType::Point, geomtype, srid.to_string());
        self.spatial(column, spatial)
    }

    pub fn multipoint(&mut self, column: &str) -> &mut ColumnDefinition {
        self.multipoint_with(column, DEFAULT_GEOMTYPE, DEFAULT_SRID)
    }

    pub fn multipoint_with(
        &mut self,
        column: &str,
        geomtype: impl Into<String>,
        srid: impl ToString,
    ) -> &mut ColumnDefinition {
        let spatial = SpatialColumn::new(GeometryType::MultiPoint, geomtype, srid.to_string());
        self.spatial(column, spatial)
    }

    pub fn polygon(&mut self, column: &str) -> &mut ColumnDefinition {
        self.polygon_with(column, DEFAULT_GEOMTYPE, DEFAULT_SRID)
    }

    pub fn polygon_with(
        &mut self,
        column: &str,
        geomtype: impl Into<String>,
        srid: impl ToString,
    ) -> &mut ColumnDefinition {
        let spatial = SpatialColumn::new(GeometryType::Polygon, geomtype, srid.to_string());
        self.spatial(column, spatial)
    }

    pub fn multipolygon(&mut self, column: &str) -> &mut ColumnDefinition {
        self.multipolygon_with(column, DEFAULT_GEOMTYPE, DEFAULT_SRID)
    }

    pub fn multipolygon_with(
        &mut self,
        column: &str,
        geomtype: impl Into<String>,
        srid: impl ToString,
    ) -> &mut ColumnDefinition {
        let spatial = SpatialColumn::new(GeometryType::MultiPolygon, geomtype, srid.to_string());
        self.spatial(column, spatial)
    }

    pub fn multipolygonz(&mut self, column: &str) -> &mut ColumnDefinition {
        self.multipolygonz_with(column, DEFAULT_GEOMTYPE, DEFAULT_SRID)
    }

    pub fn multipolygonz_with(
        &mut self,
        column: &str,
        geomtype: impl Into<String>,
        srid: impl ToString,
    ) -> &mut ColumnDefinition {
        let spatial =
            SpatialColumn::new(GeometryType::MultiPolygon, geomtype, srid.to_string()).with_z();
        self.spatial(column, spatial)
    }

    pub fn linestring(&mut self, column: &str) -> &mut ColumnDefinition {
        self.linestring_with(column, DEFAULT_GEOMTYPE, DEFAULT_SRID)
    }

    pub fn linestring_with(
        &mut self,
        column: &str,
        geomtype: impl Into<String>,
        srid: impl ToString,
    ) -> &mut ColumnDefinition {
        let spatial = SpatialColumn::new(GeometryType::LineString, geomtype, srid.to_string());
        self.spatial(column, spatial)
    }

    pub fn multilinestring(&mut self, column: &str) -> &mut ColumnDefinition {
        self.multilinestring_with(column, DEFAULT_GEOMTYPE, DEFAULT_SRID)
    }

    pub fn multilinestring_with(
        &mut self,
        column: &str,
        geomtype: impl Into<String>,
        srid: impl ToString,
    ) -> &mut ColumnDefinition {
        let spatial =
            SpatialColumn::new(GeometryType::MultiLineString, geomtype, srid.to_string());
        self.spatial(column, spatial)
    }

    /// Unconstrained `GEOGRAPHY` column.
    pub fn geography(&mut self, column: &str) -> &mut ColumnDefinition {
        self.add_column(column, ColumnType::Geography)
    }

    /// Unconstrained `GEOMETRY` column.
    pub fn geometry(&mut self, column: &str) -> &mut ColumnDefinition {
        self.add_column(column, ColumnType::Geometry)
    }

    /// Geometry collection column, added through `AddGeometryColumn`.
    ///
    /// Records a command rather than a column. `srid` defaults to 4326 and
    /// `dimensions` of 0 is treated as 2 when compiled.
    pub fn geometrycollection(
        &mut self,
        column: &str,
        srid: Option<i32>,
        dimensions: u32,
        typmod: bool,
    ) -> &mut Self {
        self.commands.push(Command::GeometryCollection {
            column: column.to_string(),
            srid,
            dimensions,
            typmod,
        });
        self
    }

    // ------------------------------------------------------------------
    // Base columns
    // ------------------------------------------------------------------

    /// Auto-incrementing integer primary key.
    pub fn increments(&mut self, column: &str) -> &mut ColumnDefinition {
        self.add_column(column, ColumnType::Increments)
    }

    /// Auto-incrementing bigint primary key.
    pub fn big_increments(&mut self, column: &str) -> &mut ColumnDefinition {
        self.add_column(column, ColumnType::BigIncrements)
    }

    pub fn string(&mut self, column: &str, length: u32) -> &mut ColumnDefinition {
        self.add_column(column, ColumnType::String { length })
    }

    pub fn text(&mut self, column: &str) -> &mut ColumnDefinition {
        self.add_column(column, ColumnType::Text)
    }

    pub fn integer(&mut self, column: &str) -> &mut ColumnDefinition {
        self.add_column(column, ColumnType::Integer)
    }

    pub fn big_integer(&mut self, column: &str) -> &mut ColumnDefinition {
        self.add_column(column, ColumnType::BigInteger)
    }

    pub fn small_integer(&mut self, column: &str) -> &mut ColumnDefinition {
        self.add_column(column, ColumnType::SmallInteger)
    }

    pub fn boolean(&mut self, column: &str) -> &mut ColumnDefinition {
        self.add_column(column, ColumnType::Boolean)
    }

    pub fn float(&mut self, column: &str) -> &mut ColumnDefinition {
        self.add_column(column, ColumnType::Float)
    }

    pub fn double(&mut self, column: &str) -> &mut ColumnDefinition {
        self.add_column(column, ColumnType::Double)
    }

    pub fn decimal(&mut self, column: &str, precision: u32, scale: u32) -> &mut ColumnDefinition {
        self.add_column(column, ColumnType::Decimal { precision, scale })
    }

    pub fn date(&mut self, column: &str) -> &mut ColumnDefinition {
        self.add_column(column, ColumnType::Date)
    }

    pub fn timestamp(&mut self, column: &str) -> &mut ColumnDefinition {
        self.add_column(column, ColumnType::Timestamp)
    }

    pub fn timestamp_tz(&mut self, column: &str) -> &mut ColumnDefinition {
        self.add_column(column, ColumnType::TimestampTz)
    }

    pub fn json(&mut self, column: &str) -> &mut ColumnDefinition {
        self.add_column(column, ColumnType::Json)
    }

    pub fn binary(&mut self, column: &str) -> &mut ColumnDefinition {
        self.add_column(column, ColumnType::Binary)
    }

    // ------------------------------------------------------------------
    // Command resolution
    // ------------------------------------------------------------------

    /// Index commands requested inline on columns.
    ///
    /// For each column the flags are checked in the order primary, unique,
    /// index, gin, gist; the first one set yields a single-column index
    /// command and the rest are ignored.
    pub fn fluent_index_commands(&self) -> Vec<Command> {
        self.columns
            .iter()
            .filter_map(|column| {
                FLUENT_INDEXES.iter().find_map(|(kind, flag)| {
                    flag(column).map(|flag| {
                        Command::Index(IndexCommand::new(
                            *kind,
                            vec![column.name.clone()],
                            flag.name().map(str::to_string),
                        ))
                    })
                })
            })
            .collect()
    }

    /// Commands to compile, in order: an implicit `Add` when altering a
    /// table with new columns, the explicit commands, then fluent indexes.
    pub fn implied_commands(&self) -> Vec<Command> {
        let mut commands = Vec::with_capacity(self.commands.len() + self.columns.len() + 1);
        if !self.creating() && !self.columns.is_empty() {
            commands.push(Command::Add);
        }
        commands.extend(self.commands.iter().cloned());
        commands.extend(self.fluent_index_commands());
        commands
    }
}
