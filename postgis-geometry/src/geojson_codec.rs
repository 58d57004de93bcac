//! GeoJSON codec.
//!
//! Decoding goes through the `geojson` crate's object model. Encoding has two
//! forms: [`encode_ref`] builds a `geojson::Geometry`, and [`serialize_ref`]
//! writes JSON directly so that integral coordinates are emitted as integers
//! (`[1,2]` rather than `[1.0,2.0]`).

use geojson::{GeoJson, Value};
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};

use crate::collection::GeometryCollection;
use crate::error::{GeometryError, Result};
use crate::geometry::{Geometry, GeometryRef};
use crate::line_string::LineString;
use crate::multi::{MultiLineString, MultiPoint, MultiPolygon};
use crate::point::Point;
use crate::polygon::Polygon;

/// Largest magnitude at which every integer is exactly representable in f64.
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

// ============================================================================
// Decoding
// ============================================================================

/// Decode a GeoJSON geometry object.
pub(crate) fn decode(geometry: &geojson::Geometry) -> Result<Geometry> {
    decode_value(&geometry.value)
}

/// Decode GeoJSON text holding a geometry, or a feature with a geometry.
pub(crate) fn decode_str(text: &str) -> Result<Geometry> {
    let parsed: GeoJson = text
        .parse()
        .map_err(|e: geojson::Error| GeometryError::GeoJson(e.to_string()))?;

    let geometry = match parsed {
        GeoJson::Geometry(geometry) => geometry,
        GeoJson::Feature(feature) => feature
            .geometry
            .ok_or_else(|| GeometryError::GeoJson("feature has no geometry".to_string()))?,
        GeoJson::FeatureCollection(_) => {
            return Err(GeometryError::GeoJson(
                "expected a geometry or feature, found FeatureCollection".to_string(),
            ))
        }
    };

    let decoded = decode(&geometry)?;
    tracing::trace!(
        geometry_type = %decoded.geometry_type(),
        is_3d = decoded.is_3d(),
        "decoded GeoJSON geometry"
    );
    Ok(decoded)
}

fn decode_value(value: &Value) -> Result<Geometry> {
    Ok(match value {
        Value::Point(position) => Geometry::Point(Point::from_position(position)?),
        Value::MultiPoint(positions) => Geometry::MultiPoint(MultiPoint::new(points(positions)?)?),
        Value::LineString(positions) => Geometry::LineString(line_string(positions)?),
        Value::MultiLineString(lines) => {
            Geometry::MultiLineString(MultiLineString::new(line_strings(lines)?)?)
        }
        Value::Polygon(rings) => Geometry::Polygon(polygon(rings)?),
        Value::MultiPolygon(polygons) => Geometry::MultiPolygon(MultiPolygon::new(
            polygons
                .iter()
                .map(|rings| polygon(rings))
                .collect::<Result<_>>()?,
        )?),
        Value::GeometryCollection(members) => {
            Geometry::GeometryCollection(GeometryCollection::new(
                members.iter().map(decode).collect::<Result<_>>()?,
            )?)
        }
    })
}

fn points(positions: &[Vec<f64>]) -> Result<Vec<Point>> {
    positions
        .iter()
        .map(|position| Point::from_position(position))
        .collect()
}

fn line_string(positions: &[Vec<f64>]) -> Result<LineString> {
    LineString::new(points(positions)?)
}

fn line_strings(lines: &[Vec<Vec<f64>>]) -> Result<Vec<LineString>> {
    lines.iter().map(|line| line_string(line)).collect()
}

fn polygon(rings: &[Vec<Vec<f64>>]) -> Result<Polygon> {
    Polygon::new(line_strings(rings)?)
}

// ============================================================================
// Encoding to the geojson object model
// ============================================================================

/// Encode a geometry as a `geojson::Geometry`.
pub(crate) fn encode_ref(geometry: GeometryRef<'_>) -> geojson::Geometry {
    geojson::Geometry::new(encode_value(geometry))
}

fn encode_value(geometry: GeometryRef<'_>) -> Value {
    match geometry {
        GeometryRef::Point(p) => Value::Point(p.components()),
        GeometryRef::LineString(g) => Value::LineString(positions(g)),
        GeometryRef::Polygon(g) => Value::Polygon(rings(g)),
        GeometryRef::MultiPoint(g) => {
            Value::MultiPoint(g.points().iter().map(Point::components).collect())
        }
        GeometryRef::MultiLineString(g) => {
            Value::MultiLineString(g.line_strings().iter().map(positions).collect())
        }
        GeometryRef::MultiPolygon(g) => {
            Value::MultiPolygon(g.polygons().iter().map(rings).collect())
        }
        GeometryRef::GeometryCollection(g) => Value::GeometryCollection(
            g.geometries()
                .iter()
                .map(|member| encode_ref(member.into()))
                .collect(),
        ),
    }
}

fn positions(line: &LineString) -> Vec<Vec<f64>> {
    line.points().iter().map(Point::components).collect()
}

fn rings(polygon: &Polygon) -> Vec<Vec<Vec<f64>>> {
    polygon.rings().iter().map(positions).collect()
}

// ============================================================================
// Direct JSON serialization
// ============================================================================

/// Serialize a geometry as a GeoJSON object.
pub(crate) fn serialize_ref<S: Serializer>(
    geometry: GeometryRef<'_>,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    let mut map = serializer.serialize_map(Some(2))?;
    map.serialize_entry("type", geometry.geometry_type().geojson_name())?;
    match geometry {
        GeometryRef::Point(p) => map.serialize_entry("coordinates", &Position(p))?,
        GeometryRef::LineString(g) => map.serialize_entry("coordinates", &Positions(g.points()))?,
        GeometryRef::Polygon(g) => map.serialize_entry("coordinates", &Rings(g.rings()))?,
        GeometryRef::MultiPoint(g) => map.serialize_entry("coordinates", &Positions(g.points()))?,
        GeometryRef::MultiLineString(g) => {
            map.serialize_entry("coordinates", &Rings(g.line_strings()))?
        }
        GeometryRef::MultiPolygon(g) => {
            map.serialize_entry("coordinates", &Polygons(g.polygons()))?
        }
        GeometryRef::GeometryCollection(g) => map.serialize_entry("geometries", g.geometries())?,
    }
    map.end()
}

/// One coordinate component; integral values are written without a fraction.
struct Number(f64);

impl Serialize for Number {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let v = self.0;
        if v.is_finite() && v.fract() == 0.0 && v.abs() < MAX_EXACT_INTEGER {
            serializer.serialize_i64(v as i64)
        } else {
            serializer.serialize_f64(v)
        }
    }
}

struct Position<'a>(&'a Point);

impl Serialize for Position<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let components = self.0.components();
        let mut seq = serializer.serialize_seq(Some(components.len()))?;
        for value in components {
            seq.serialize_element(&Number(value))?;
        }
        seq.end()
    }
}

struct Positions<'a>(&'a [Point]);

impl Serialize for Positions<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_seq(self.0.iter().map(Position))
    }
}

struct Rings<'a>(&'a [LineString]);

impl Serialize for Rings<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_seq(self.0.iter().map(|line| Positions(line.points())))
    }
}

struct Polygons<'a>(&'a [Polygon]);

impl Serialize for Polygons<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_seq(self.0.iter().map(|polygon| Rings(polygon.rings())))
    }
}
