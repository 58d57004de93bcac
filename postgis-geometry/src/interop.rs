//! Conversion into `geo_types` for use with the `geo` algorithm crates.
//!
//! `geo_types` is 2D only: x is longitude, y is latitude and any altitude
//! is dropped.

use geo_types::coord;

use crate::geometry::Geometry;
use crate::line_string::LineString;
use crate::point::Point;
use crate::polygon::Polygon;

impl Geometry {
    /// Convert into a `geo_types::Geometry`, dropping altitude.
    pub fn to_geo_types(&self) -> geo_types::Geometry<f64> {
        match self {
            Geometry::Point(p) => geo_types::Geometry::Point(point(p)),
            Geometry::LineString(g) => geo_types::Geometry::LineString(line_string(g)),
            Geometry::Polygon(g) => geo_types::Geometry::Polygon(polygon(g)),
            Geometry::MultiPoint(g) => geo_types::Geometry::MultiPoint(geo_types::MultiPoint(
                g.points().iter().map(point).collect(),
            )),
            Geometry::MultiLineString(g) => {
                geo_types::Geometry::MultiLineString(geo_types::MultiLineString(
                    g.line_strings().iter().map(line_string).collect(),
                ))
            }
            Geometry::MultiPolygon(g) => geo_types::Geometry::MultiPolygon(
                geo_types::MultiPolygon(g.polygons().iter().map(polygon).collect()),
            ),
            Geometry::GeometryCollection(g) => {
                geo_types::Geometry::GeometryCollection(geo_types::GeometryCollection(
                    g.geometries().iter().map(Geometry::to_geo_types).collect(),
                ))
            }
        }
    }
}

fn point(p: &Point) -> geo_types::Point<f64> {
    geo_types::Point::new(p.lng(), p.lat())
}

fn line_string(line: &LineString) -> geo_types::LineString<f64> {
    geo_types::LineString::new(
        line.points()
            .iter()
            .map(|p| coord! { x: p.lng(), y: p.lat() })
            .collect(),
    )
}

fn polygon(polygon: &Polygon) -> geo_types::Polygon<f64> {
    let exterior = polygon
        .exterior()
        .map(line_string)
        .unwrap_or_else(|| geo_types::LineString::new(Vec::new()));
    let interiors = polygon.interiors().iter().map(line_string).collect();
    geo_types::Polygon::new(exterior, interiors)
}
