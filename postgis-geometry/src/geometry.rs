//! The `Geometry` sum type and shared geometry vocabulary.
//!
//! Every concrete geometry (point, linestring, polygon and their multi
//! variants) is a variant of [`Geometry`]. Codecs dispatch on the variant
//! with an exhaustive `match`, so adding a geometry kind is a compile error
//! everywhere a codec forgot to handle it.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::collection::GeometryCollection;
use crate::error::{GeometryError, Result};
use crate::line_string::LineString;
use crate::multi::{MultiLineString, MultiPoint, MultiPolygon};
use crate::point::Point;
use crate::polygon::Polygon;

/// Geometry type discriminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum GeometryType {
    Point = 0,
    LineString = 1,
    Polygon = 2,
    MultiPoint = 3,
    MultiLineString = 4,
    MultiPolygon = 5,
    GeometryCollection = 6,
}

impl GeometryType {
    /// All geometry types, in discriminant order.
    pub const ALL: [GeometryType; 7] = [
        GeometryType::Point,
        GeometryType::LineString,
        GeometryType::Polygon,
        GeometryType::MultiPoint,
        GeometryType::MultiLineString,
        GeometryType::MultiPolygon,
        GeometryType::GeometryCollection,
    ];

    /// Canonical uppercase WKT keyword (also the PostGIS subtype name).
    pub fn wkt_keyword(&self) -> &'static str {
        match self {
            GeometryType::Point => "POINT",
            GeometryType::LineString => "LINESTRING",
            GeometryType::Polygon => "POLYGON",
            GeometryType::MultiPoint => "MULTIPOINT",
            GeometryType::MultiLineString => "MULTILINESTRING",
            GeometryType::MultiPolygon => "MULTIPOLYGON",
            GeometryType::GeometryCollection => "GEOMETRYCOLLECTION",
        }
    }

    /// GeoJSON `type` member value.
    pub fn geojson_name(&self) -> &'static str {
        match self {
            GeometryType::Point => "Point",
            GeometryType::LineString => "LineString",
            GeometryType::Polygon => "Polygon",
            GeometryType::MultiPoint => "MultiPoint",
            GeometryType::MultiLineString => "MultiLineString",
            GeometryType::MultiPolygon => "MultiPolygon",
            GeometryType::GeometryCollection => "GeometryCollection",
        }
    }

    /// Look up a type by WKT keyword, ignoring ASCII case.
    pub fn from_wkt_keyword(keyword: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|t| t.wkt_keyword().eq_ignore_ascii_case(keyword))
    }

    /// Check if this is a point type.
    pub fn is_point(&self) -> bool {
        matches!(self, GeometryType::Point | GeometryType::MultiPoint)
    }
}

impl fmt::Display for GeometryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wkt_keyword())
    }
}

/// Coordinate dimensionality of a geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dimension {
    /// Two components: x (longitude) and y (latitude).
    Xy,
    /// Three components: x, y and z (altitude).
    Xyz,
}

impl Dimension {
    /// Number of components in a coordinate tuple.
    pub fn size(&self) -> usize {
        match self {
            Dimension::Xy => 2,
            Dimension::Xyz => 3,
        }
    }

    /// Check if this is the 3D dimension.
    pub fn is_3d(&self) -> bool {
        matches!(self, Dimension::Xyz)
    }
}

/// Deepest geometry collection nesting the decoders accept.
pub const MAX_NESTING: usize = 128;

/// Resolve the shared dimension of a sequence of members.
///
/// Members without a dimension (empty ones) are skipped. The first member
/// with a dimension decides; any later member that disagrees is an error.
pub(crate) fn uniform_dimension<I>(members: I, what: &str) -> Result<Option<Dimension>>
where
    I: IntoIterator<Item = Option<Dimension>>,
{
    let mut resolved: Option<Dimension> = None;
    for (i, dim) in members.into_iter().enumerate() {
        match (resolved, dim) {
            (None, Some(d)) => resolved = Some(d),
            (Some(expected), Some(d)) if expected != d => {
                return Err(GeometryError::MixedDimensions(format!(
                    "{} member {} is {}D but earlier members are {}D",
                    what,
                    i,
                    d.size(),
                    expected.size()
                )));
            }
            _ => {}
        }
    }
    Ok(resolved)
}

/// Any supported geometry value.
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    Point(Point),
    LineString(LineString),
    Polygon(Polygon),
    MultiPoint(MultiPoint),
    MultiLineString(MultiLineString),
    MultiPolygon(MultiPolygon),
    GeometryCollection(GeometryCollection),
}

impl Geometry {
    /// The type discriminator of this geometry.
    pub fn geometry_type(&self) -> GeometryType {
        match self {
            Geometry::Point(_) => GeometryType::Point,
            Geometry::LineString(_) => GeometryType::LineString,
            Geometry::Polygon(_) => GeometryType::Polygon,
            Geometry::MultiPoint(_) => GeometryType::MultiPoint,
            Geometry::MultiLineString(_) => GeometryType::MultiLineString,
            Geometry::MultiPolygon(_) => GeometryType::MultiPolygon,
            Geometry::GeometryCollection(_) => GeometryType::GeometryCollection,
        }
    }

    /// Coordinate dimension, or `None` for an empty geometry.
    pub fn dimension(&self) -> Option<Dimension> {
        match self {
            Geometry::Point(g) => g.dimension(),
            Geometry::LineString(g) => g.dimension(),
            Geometry::Polygon(g) => g.dimension(),
            Geometry::MultiPoint(g) => g.dimension(),
            Geometry::MultiLineString(g) => g.dimension(),
            Geometry::MultiPolygon(g) => g.dimension(),
            Geometry::GeometryCollection(g) => g.dimension(),
        }
    }

    /// Check if the geometry carries altitude values.
    pub fn is_3d(&self) -> bool {
        self.dimension().is_some_and(|d| d.is_3d())
    }

    /// Check if the geometry has no coordinates.
    pub fn is_empty(&self) -> bool {
        match self {
            Geometry::Point(_) => false,
            Geometry::LineString(g) => g.is_empty(),
            Geometry::Polygon(g) => g.is_empty(),
            Geometry::MultiPoint(g) => g.is_empty(),
            Geometry::MultiLineString(g) => g.is_empty(),
            Geometry::MultiPolygon(g) => g.is_empty(),
            Geometry::GeometryCollection(g) => g.is_empty(),
        }
    }

    /// Parse any geometry from WKT.
    pub fn from_wkt(wkt: &str) -> Result<Self> {
        crate::wkt::parse(wkt)
    }

    /// Render as canonical WKT.
    pub fn to_wkt(&self) -> String {
        crate::wkt::write_ref(self.into())
    }

    /// Decode from a GeoJSON geometry object.
    pub fn from_geojson(geometry: &geojson::Geometry) -> Result<Self> {
        crate::geojson_codec::decode(geometry)
    }

    /// Decode from GeoJSON text (a geometry or a feature).
    pub fn from_geojson_str(text: &str) -> Result<Self> {
        crate::geojson_codec::decode_str(text)
    }

    /// Encode as a GeoJSON geometry object.
    pub fn to_geojson(&self) -> geojson::Geometry {
        crate::geojson_codec::encode_ref(self.into())
    }

    /// Serialize as GeoJSON text; integral coordinates stay integers.
    pub fn to_geojson_string(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| GeometryError::GeoJson(e.to_string()))
    }
}

impl Serialize for Geometry {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        crate::geojson_codec::serialize_ref(self.into(), serializer)
    }
}

/// Borrowed view of a geometry, used by the codecs so that typed values
/// can be encoded without being moved into a [`Geometry`].
#[derive(Debug, Clone, Copy)]
pub(crate) enum GeometryRef<'a> {
    Point(&'a Point),
    LineString(&'a LineString),
    Polygon(&'a Polygon),
    MultiPoint(&'a MultiPoint),
    MultiLineString(&'a MultiLineString),
    MultiPolygon(&'a MultiPolygon),
    GeometryCollection(&'a GeometryCollection),
}

impl<'a> GeometryRef<'a> {
    pub(crate) fn geometry_type(&self) -> GeometryType {
        match self {
            GeometryRef::Point(_) => GeometryType::Point,
            GeometryRef::LineString(_) => GeometryType::LineString,
            GeometryRef::Polygon(_) => GeometryType::Polygon,
            GeometryRef::MultiPoint(_) => GeometryType::MultiPoint,
            GeometryRef::MultiLineString(_) => GeometryType::MultiLineString,
            GeometryRef::MultiPolygon(_) => GeometryType::MultiPolygon,
            GeometryRef::GeometryCollection(_) => GeometryType::GeometryCollection,
        }
    }
}

impl<'a> From<&'a Geometry> for GeometryRef<'a> {
    fn from(geometry: &'a Geometry) -> Self {
        match geometry {
            Geometry::Point(g) => GeometryRef::Point(g),
            Geometry::LineString(g) => GeometryRef::LineString(g),
            Geometry::Polygon(g) => GeometryRef::Polygon(g),
            Geometry::MultiPoint(g) => GeometryRef::MultiPoint(g),
            Geometry::MultiLineString(g) => GeometryRef::MultiLineString(g),
            Geometry::MultiPolygon(g) => GeometryRef::MultiPolygon(g),
            Geometry::GeometryCollection(g) => GeometryRef::GeometryCollection(g),
        }
    }
}

impl fmt::Display for Geometry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_wkt())
    }
}

impl FromStr for Geometry {
    type Err = GeometryError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_wkt(s)
    }
}

/// Wire a concrete geometry type into the [`Geometry`] enum and the codecs.
///
/// Generates `From`/`TryFrom` conversions plus the typed `from_wkt`,
/// `to_wkt`, `from_geojson`, `to_geojson`, `Display` and `FromStr` surface.
macro_rules! geometry_variant {
    ($ty:ident) => {
        impl From<$ty> for Geometry {
            fn from(value: $ty) -> Self {
                Geometry::$ty(value)
            }
        }

        impl TryFrom<Geometry> for $ty {
            type Error = GeometryError;

            fn try_from(value: Geometry) -> Result<Self> {
                match value {
                    Geometry::$ty(inner) => Ok(inner),
                    other => Err(GeometryError::TypeMismatch {
                        expected: GeometryType::$ty,
                        found: other.geometry_type(),
                    }),
                }
            }
        }

        impl $ty {
            /// Parse from WKT; fails if the text describes another geometry type.
            pub fn from_wkt(wkt: &str) -> Result<Self> {
                Geometry::from_wkt(wkt)?.try_into()
            }

            /// Render as canonical WKT.
            pub fn to_wkt(&self) -> String {
                crate::wkt::write_ref(crate::geometry::GeometryRef::$ty(self))
            }

            /// Decode from a GeoJSON geometry object of the matching type.
            pub fn from_geojson(geometry: &geojson::Geometry) -> Result<Self> {
                crate::geojson_codec::decode(geometry)?.try_into()
            }

            /// Decode from GeoJSON text (a geometry or a feature).
            pub fn from_geojson_str(text: &str) -> Result<Self> {
                crate::geojson_codec::decode_str(text)?.try_into()
            }

            /// Encode as a GeoJSON geometry object.
            pub fn to_geojson(&self) -> geojson::Geometry {
                crate::geojson_codec::encode_ref(crate::geometry::GeometryRef::$ty(self))
            }

            /// Serialize as GeoJSON text; integral coordinates stay integers.
            pub fn to_geojson_string(&self) -> Result<String> {
                serde_json::to_string(self).map_err(|e| GeometryError::GeoJson(e.to_string()))
            }
        }

        impl std::fmt::Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.to_wkt())
            }
        }

        impl std::str::FromStr for $ty {
            type Err = GeometryError;

            fn from_str(s: &str) -> Result<Self> {
                Self::from_wkt(s)
            }
        }

        impl serde::Serialize for $ty {
            fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                crate::geojson_codec::serialize_ref(crate::geometry::GeometryRef::$ty(self), serializer)
            }
        }
    };
}

geometry_variant!(Point);
geometry_variant!(LineString);
geometry_variant!(Polygon);
geometry_variant!(MultiPoint);
geometry_variant!(MultiLineString);
geometry_variant!(MultiPolygon);
geometry_variant!(GeometryCollection);
