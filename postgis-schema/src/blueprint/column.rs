//! Column definitions
//!
//! A column is a name, a [`ColumnType`] and the modifiers set on it through
//! the fluent `&mut ColumnDefinition` returned by the blueprint.

use postgis_geometry::GeometryType;
use serde::{Deserialize, Serialize};

/// Storage type used when a spatial column does not name one.
pub const DEFAULT_GEOMTYPE: &str = "GEOGRAPHY";

/// SRID used when a spatial column does not name one (WGS84).
pub const DEFAULT_SRID: &str = "4326";

/// Inline index request on a column
///
/// `Unnamed` lets the grammar derive the index name from the table and
/// column; `Named` carries an explicit index name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IndexFlag {
    Unnamed,
    Named(String),
}

impl IndexFlag {
    /// The explicit name, if one was given.
    pub fn name(&self) -> Option<&str> {
        match self {
            IndexFlag::Unnamed => None,
            IndexFlag::Named(name) => Some(name),
        }
    }
}

/// Spatial column parameters
///
/// `geomtype` and `srid` are kept as the caller wrote them and validated only
/// when the column is compiled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpatialColumn {
    /// Geometry subtype (`POINT`, `MULTIPOLYGON`, ...)
    pub subtype: GeometryType,
    /// Subtype carries a Z coordinate (`MULTIPOLYGONZ`)
    pub z: bool,
    /// Storage type text, expected to be `GEOGRAPHY` or `GEOMETRY`
    pub geomtype: String,
    /// SRID text, expected to be an integer
    pub srid: String,
}

impl SpatialColumn {
    pub fn new(subtype: GeometryType, geomtype: impl Into<String>, srid: impl Into<String>) -> Self {
        Self {
            subtype,
            z: false,
            geomtype: geomtype.into(),
            srid: srid.into(),
        }
    }

    /// Mark the subtype as carrying a Z coordinate.
    pub fn with_z(mut self) -> Self {
        self.z = true;
        self
    }

    /// Subtype name as it appears in the type modifier: `POINT`, `MULTIPOLYGONZ`.
    pub fn subtype_name(&self) -> String {
        let keyword = self.subtype.wkt_keyword();
        if self.z {
            format!("{}Z", keyword)
        } else {
            keyword.to_string()
        }
    }
}

/// Column type tag
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnType {
    // Extended PostgreSQL types
    Character { length: u32 },
    Hstore,
    Uuid,
    Jsonb,
    IpAddress,
    Netmask,
    MacAddress,
    Line,
    LineSegment,
    Path,
    Box,
    Circle,
    Money,
    Int4Range,
    Int8Range,
    NumRange,
    TsRange,
    TsTzRange,
    DateRange,
    TsVector,

    // PostGIS
    Spatial(SpatialColumn),
    Geography,
    Geometry,

    // Base types
    Increments,
    BigIncrements,
    String { length: u32 },
    Text,
    Integer,
    BigInteger,
    SmallInteger,
    Boolean,
    Float,
    Double,
    Decimal { precision: u32, scale: u32 },
    Date,
    Timestamp,
    TimestampTz,
    Json,
    Binary,
}

impl ColumnType {
    /// Short name used in log output and error messages.
    pub fn name(&self) -> &'static str {
        match self {
            ColumnType::Character { .. } => "character",
            ColumnType::Hstore => "hstore",
            ColumnType::Uuid => "uuid",
            ColumnType::Jsonb => "jsonb",
            ColumnType::IpAddress => "ipAddress",
            ColumnType::Netmask => "netmask",
            ColumnType::MacAddress => "macAddress",
            ColumnType::Line => "line",
            ColumnType::LineSegment => "lineSegment",
            ColumnType::Path => "path",
            ColumnType::Box => "box",
            ColumnType::Circle => "circle",
            ColumnType::Money => "money",
            ColumnType::Int4Range => "int4range",
            ColumnType::Int8Range => "int8range",
            ColumnType::NumRange => "numrange",
            ColumnType::TsRange => "tsrange",
            ColumnType::TsTzRange => "tstzrange",
            ColumnType::DateRange => "daterange",
            ColumnType::TsVector => "tsvector",
            ColumnType::Spatial(_) => "spatial",
            ColumnType::Geography => "geography",
            ColumnType::Geometry => "geometry",
            ColumnType::Increments => "increments",
            ColumnType::BigIncrements => "bigIncrements",
            ColumnType::String { .. } => "string",
            ColumnType::Text => "text",
            ColumnType::Integer => "integer",
            ColumnType::BigInteger => "bigInteger",
            ColumnType::SmallInteger => "smallInteger",
            ColumnType::Boolean => "boolean",
            ColumnType::Float => "float",
            ColumnType::Double => "double",
            ColumnType::Decimal { .. } => "decimal",
            ColumnType::Date => "date",
            ColumnType::Timestamp => "timestamp",
            ColumnType::TimestampTz => "timestampTz",
            ColumnType::Json => "json",
            ColumnType::Binary => "binary",
        }
    }

    /// Check if this is a serial (auto-incrementing) type.
    pub fn is_serial(&self) -> bool {
        matches!(self, ColumnType::Increments | ColumnType::BigIncrements)
    }
}

/// Column default value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DefaultValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    /// Literal string, quoted on output
    String(String),
    /// SQL expression, emitted verbatim (`now()`, `gen_random_uuid()`)
    Raw(String),
}

impl From<bool> for DefaultValue {
    fn from(value: bool) -> Self {
        DefaultValue::Bool(value)
    }
}

impl From<i32> for DefaultValue {
    fn from(value: i32) -> Self {
        DefaultValue::Int(value.into())
    }
}

impl From<i64> for DefaultValue {
    fn from(value: i64) -> Self {
        DefaultValue::Int(value)
    }
}

impl From<f64> for DefaultValue {
    fn from(value: f64) -> Self {
        DefaultValue::Float(value)
    }
}

impl From<&str> for DefaultValue {
    fn from(value: &str) -> Self {
        DefaultValue::String(value.to_string())
    }
}

impl From<String> for DefaultValue {
    fn from(value: String) -> Self {
        DefaultValue::String(value)
    }
}

/// A column on a [`Blueprint`](super::Blueprint)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnDefinition {
    pub name: String,
    pub column_type: ColumnType,
    pub nullable: bool,
    pub default: Option<DefaultValue>,
    pub auto_increment: bool,
    pub primary: Option<IndexFlag>,
    pub unique: Option<IndexFlag>,
    pub index: Option<IndexFlag>,
    pub gin: Option<IndexFlag>,
    pub gist: Option<IndexFlag>,
}

impl ColumnDefinition {
    pub fn new(name: impl Into<String>, column_type: ColumnType) -> Self {
        let auto_increment = column_type.is_serial();
        Self {
            name: name.into(),
            column_type,
            nullable: false,
            default: None,
            auto_increment,
            primary: None,
            unique: None,
            index: None,
            gin: None,
            gist: None,
        }
    }

    /// Allow NULL values.
    pub fn nullable(&mut self) -> &mut Self {
        self.nullable = true;
        self
    }

    /// Set a literal default value.
    pub fn default(&mut self, value: impl Into<DefaultValue>) -> &mut Self {
        self.default = Some(value.into());
        self
    }

    /// Set a default SQL expression, emitted unquoted.
    pub fn default_raw(&mut self, expression: impl Into<String>) -> &mut Self {
        self.default = Some(DefaultValue::Raw(expression.into()));
        self
    }

    /// Make an integer column auto-incrementing (`serial`).
    pub fn auto_increment(&mut self) -> &mut Self {
        self.auto_increment = true;
        self
    }

    pub fn primary(&mut self) -> &mut Self {
        self.primary = Some(IndexFlag::Unnamed);
        self
    }

    pub fn primary_named(&mut self, name: impl Into<String>) -> &mut Self {
        self.primary = Some(IndexFlag::Named(name.into()));
        self
    }

    pub fn unique(&mut self) -> &mut Self {
        self.unique = Some(IndexFlag::Unnamed);
        self
    }

    pub fn unique_named(&mut self, name: impl Into<String>) -> &mut Self {
        self.unique = Some(IndexFlag::Named(name.into()));
        self
    }

    pub fn index(&mut self) -> &mut Self {
        self.index = Some(IndexFlag::Unnamed);
        self
    }

    pub fn index_named(&mut self, name: impl Into<String>) -> &mut Self {
        self.index = Some(IndexFlag::Named(name.into()));
        self
    }

    pub fn gin(&mut self) -> &mut Self {
        self.gin = Some(IndexFlag::Unnamed);
        self
    }

    pub fn gin_named(&mut self, name: impl Into<String>) -> &mut Self {
        self.gin = Some(IndexFlag::Named(name.into()));
        self
    }

    pub fn gist(&mut self) -> &mut Self {
        self.gist = Some(IndexFlag::Unnamed);
        self
    }

    pub fn gist_named(&mut self, name: impl Into<String>) -> &mut Self {
        self.gist = Some(IndexFlag::Named(name.into()));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subtype_name() {
        let column = SpatialColumn::new(GeometryType::MultiPolygon, "GEOGRAPHY", "4326");
        assert_eq!(column.subtype_name(), "MULTIPOLYGON");
        assert_eq!(column.with_z().subtype_name(), "MULTIPOLYGONZ");
    }

    #[test]
    fn test_serial_columns_auto_increment() {
        assert!(ColumnDefinition::new("id", ColumnType::Increments).auto_increment);
        assert!(!ColumnDefinition::new("n", ColumnType::Integer).auto_increment);
    }

    #[test]
    fn test_fluent_modifiers() {
        let mut column = ColumnDefinition::new("tags", ColumnType::Jsonb);
        column.nullable().default("[]").gin_named("tags_gin");
        assert!(column.nullable);
        assert_eq!(column.default, Some(DefaultValue::String("[]".into())));
        assert_eq!(column.gin, Some(IndexFlag::Named("tags_gin".into())));
        assert_eq!(column.gin.as_ref().and_then(IndexFlag::name), Some("tags_gin"));
    }
}
