//! Canonical WKT output.
//!
//! The text is compared literally by SQL consumers, so the layout is fixed:
//! uppercase keyword, ` Z` only for 3D, no space after commas, single spaces
//! between coordinate components.

use std::fmt::Write;

use crate::geometry::GeometryRef;
use crate::line_string::LineString;
use crate::point::Point;
use crate::polygon::Polygon;

/// Render a geometry as WKT.
pub(crate) fn write_ref(geometry: GeometryRef<'_>) -> String {
    let mut out = String::new();
    write_geometry(&mut out, geometry);
    out
}

fn write_geometry(out: &mut String, geometry: GeometryRef<'_>) {
    out.push_str(geometry.geometry_type().wkt_keyword());

    let (is_3d, is_empty) = match geometry {
        GeometryRef::Point(p) => (p.is_3d(), false),
        GeometryRef::LineString(g) => (g.is_3d(), g.is_empty()),
        GeometryRef::Polygon(g) => (g.is_3d(), g.is_empty()),
        GeometryRef::MultiPoint(g) => (g.is_3d(), g.is_empty()),
        GeometryRef::MultiLineString(g) => (g.is_3d(), g.is_empty()),
        GeometryRef::MultiPolygon(g) => (g.is_3d(), g.is_empty()),
        GeometryRef::GeometryCollection(g) => (g.is_3d(), g.is_empty()),
    };
    if is_3d {
        out.push_str(" Z");
    }
    if is_empty {
        out.push_str(" EMPTY");
        return;
    }

    match geometry {
        GeometryRef::Point(p) => {
            out.push('(');
            write_components(out, p);
            out.push(')');
        }
        GeometryRef::LineString(g) => write_line_string(out, g),
        GeometryRef::Polygon(g) => write_polygon(out, g),
        GeometryRef::MultiPoint(g) => write_list(out, g.points(), |out, p| {
            out.push('(');
            write_components(out, p);
            out.push(')');
        }),
        GeometryRef::MultiLineString(g) => {
            write_list(out, g.line_strings(), |out, ls| write_nested_line_string(out, ls))
        }
        GeometryRef::MultiPolygon(g) => write_list(out, g.polygons(), |out, polygon| {
            if polygon.is_empty() {
                out.push_str("EMPTY");
            } else {
                write_polygon(out, polygon);
            }
        }),
        GeometryRef::GeometryCollection(g) => write_list(out, g.geometries(), |out, member| {
            write_geometry(out, member.into())
        }),
    }
}

/// `"(" item ("," item)* ")"`
fn write_list<T>(out: &mut String, items: &[T], mut write_item: impl FnMut(&mut String, &T)) {
    out.push('(');
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        write_item(out, item);
    }
    out.push(')');
}

fn write_line_string(out: &mut String, line: &LineString) {
    write_list(out, line.points(), write_components);
}

fn write_nested_line_string(out: &mut String, line: &LineString) {
    if line.is_empty() {
        out.push_str("EMPTY");
    } else {
        write_line_string(out, line);
    }
}

fn write_polygon(out: &mut String, polygon: &Polygon) {
    write_list(out, polygon.rings(), |out, ring| {
        write_nested_line_string(out, ring)
    });
}

/// Write `x y` or `x y z` for one point.
pub(crate) fn write_components(out: &mut String, point: &Point) {
    for (i, value) in point.components().into_iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        write_number(out, value);
    }
}

/// Shortest round-trip decimal form: `1`, `1.5`, `-0.25`.
fn write_number(out: &mut String, value: f64) {
    // Writing into a String cannot fail.
    let _ = write!(out, "{}", value);
}
