//! WKT decoding.
//!
//! Text is read by the `wkt` crate into `wkt::Wkt<f64>` and then mapped onto
//! this crate's value types. A structural pass runs first and bounds the
//! parenthesis nesting, so neither step can recurse without limit. It also
//! rejects unbalanced parentheses and trailing input with byte positions.
//! Errors found by the `wkt` reader itself carry position 0.

use std::str::FromStr;

use ::wkt::types::{
    Coord, LineString as WktLineString, Point as WktPoint, Polygon as WktPolygon,
};
use ::wkt::Wkt;

use crate::collection::GeometryCollection;
use crate::error::{GeometryError, Result};
use crate::geometry::{Geometry, MAX_NESTING};
use crate::line_string::LineString;
use crate::multi::{MultiLineString, MultiPoint, MultiPolygon};
use crate::point::Point;
use crate::polygon::Polygon;

/// Parentheses a geometry opens below its innermost collection:
/// `MULTIPOLYGON(((x y)))`.
const COORDINATE_NESTING: usize = 3;

/// Parse a WKT string into a geometry.
pub fn parse(input: &str) -> Result<Geometry> {
    check_structure(input)?;

    let wkt = Wkt::<f64>::from_str(input).map_err(|e| GeometryError::parse(0, e.to_string()))?;
    let geometry = geometry(&wkt).map_err(|e| match e {
        GeometryError::MixedDimensions(message) => GeometryError::parse(0, message),
        other => other,
    })?;

    tracing::trace!(
        geometry_type = %geometry.geometry_type(),
        is_3d = geometry.is_3d(),
        "parsed WKT geometry"
    );
    Ok(geometry)
}

/// Check parenthesis balance, nesting depth and trailing input.
fn check_structure(input: &str) -> Result<()> {
    let limit = MAX_NESTING + COORDINATE_NESTING;
    let mut depth = 0usize;
    let mut closed = false;

    for (pos, ch) in input.char_indices() {
        if closed {
            if !ch.is_whitespace() {
                return Err(GeometryError::parse(
                    pos,
                    format!("unexpected '{}' after geometry", ch),
                ));
            }
            continue;
        }
        match ch {
            '(' => {
                depth += 1;
                if depth > limit {
                    return Err(GeometryError::parse(pos, "geometry nesting too deep"));
                }
            }
            ')' => {
                if depth == 0 {
                    return Err(GeometryError::parse(pos, "unbalanced ')'"));
                }
                depth -= 1;
                closed = depth == 0;
            }
            _ => {}
        }
    }

    if depth > 0 {
        return Err(GeometryError::parse(input.len(), "unclosed '('"));
    }
    if !closed {
        // No body: the text must be `<KEYWORD> [Z] EMPTY`.
        let ends_empty = input
            .split_whitespace()
            .last()
            .is_some_and(|word| word.eq_ignore_ascii_case("EMPTY"));
        if !ends_empty {
            return Err(GeometryError::parse(input.len(), "expected '(' or EMPTY"));
        }
    }
    Ok(())
}

fn geometry(wkt: &Wkt<f64>) -> Result<Geometry> {
    Ok(match wkt {
        Wkt::Point(p) => Geometry::Point(point(p)?),
        Wkt::LineString(l) => Geometry::LineString(line_string(l)?),
        Wkt::Polygon(p) => Geometry::Polygon(polygon(p)?),
        Wkt::MultiPoint(mp) => Geometry::MultiPoint(MultiPoint::new(
            mp.0.iter().map(point).collect::<Result<_>>()?,
        )?),
        Wkt::MultiLineString(ml) => Geometry::MultiLineString(MultiLineString::new(
            ml.0.iter().map(line_string).collect::<Result<_>>()?,
        )?),
        Wkt::MultiPolygon(mp) => Geometry::MultiPolygon(MultiPolygon::new(
            mp.0.iter().map(polygon).collect::<Result<_>>()?,
        )?),
        Wkt::GeometryCollection(gc) => Geometry::GeometryCollection(GeometryCollection::new(
            gc.0.iter().map(geometry).collect::<Result<_>>()?,
        )?),
    })
}

fn point(point: &WktPoint<f64>) -> Result<Point> {
    match &point.0 {
        Some(c) => coord(c),
        None => Err(GeometryError::parse(0, "empty points are not supported")),
    }
}

fn coord(c: &Coord<f64>) -> Result<Point> {
    if c.m.is_some() {
        return Err(GeometryError::parse(0, "M coordinates are not supported"));
    }
    match c.z {
        Some(z) => Point::try_from_xyz(c.x, c.y, z),
        None => Point::try_from_xy(c.x, c.y),
    }
}

fn line_string(line: &WktLineString<f64>) -> Result<LineString> {
    LineString::new(line.0.iter().map(coord).collect::<Result<_>>()?)
}

fn polygon(polygon: &WktPolygon<f64>) -> Result<Polygon> {
    Polygon::new(polygon.0.iter().map(line_string).collect::<Result<_>>()?)
}
