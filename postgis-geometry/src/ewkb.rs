//! (E)WKB decoding.
//!
//! PostgreSQL returns `geometry` and `geography` column values as hex-encoded
//! extended WKB. This module decodes that form, including the PostGIS flag
//! bits for Z and SRID and the ISO `1000 + code` convention for Z.

use crate::collection::GeometryCollection;
use crate::error::{GeometryError, Result};
use crate::geometry::{Dimension, Geometry, GeometryType, MAX_NESTING};
use crate::line_string::LineString;
use crate::multi::{MultiLineString, MultiPoint, MultiPolygon};
use crate::point::Point;
use crate::polygon::Polygon;

const EWKB_Z: u32 = 0x8000_0000;
const EWKB_M: u32 = 0x4000_0000;
const EWKB_SRID: u32 = 0x2000_0000;
const EWKB_FLAGS: u32 = EWKB_Z | EWKB_M | EWKB_SRID;

/// A decoded EWKB value: the geometry plus its embedded SRID, if any.
#[derive(Debug, Clone, PartialEq)]
pub struct Ewkb {
    pub srid: Option<i32>,
    pub geometry: Geometry,
}

impl Ewkb {
    /// Decode EWKB bytes.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let mut reader = Reader::new(bytes);
        let (geometry, srid) = reader.read_geometry(0)?;
        if reader.pos != bytes.len() {
            return Err(GeometryError::Wkb(format!(
                "{} trailing bytes after geometry",
                bytes.len() - reader.pos
            )));
        }
        tracing::trace!(
            geometry_type = %geometry.geometry_type(),
            srid = ?srid,
            "decoded EWKB geometry"
        );
        Ok(Self { srid, geometry })
    }

    /// Decode hex-encoded EWKB, as returned by PostgreSQL.
    pub fn decode_hex(text: &str) -> Result<Self> {
        let bytes = hex::decode(text.trim())
            .map_err(|e| GeometryError::Wkb(format!("invalid hex: {}", e)))?;
        Self::decode(&bytes)
    }
}

impl Geometry {
    /// Decode (E)WKB bytes.
    pub fn from_ewkb(bytes: &[u8]) -> Result<Ewkb> {
        Ewkb::decode(bytes)
    }

    /// Decode hex-encoded (E)WKB.
    pub fn from_ewkb_hex(text: &str) -> Result<Ewkb> {
        Ewkb::decode_hex(text)
    }
}

struct Header {
    geometry_type: GeometryType,
    dimension: Dimension,
    srid: Option<i32>,
}

struct Reader<'a> {
    data: &'a [u8],
    pos: usize,
    little_endian: bool,
}

impl<'a> Reader<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            pos: 0,
            little_endian: true,
        }
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8]> {
        if self.pos + n > self.data.len() {
            return Err(GeometryError::Wkb(format!(
                "truncated input (need {} bytes at offset {}, have {})",
                n,
                self.pos,
                self.data.len()
            )));
        }
        let bytes = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(bytes)
    }

    fn read_u8(&mut self) -> Result<u8> {
        Ok(self.take(1)?[0])
    }

    fn read_u32(&mut self) -> Result<u32> {
        let mut buf = [0u8; 4];
        buf.copy_from_slice(self.take(4)?);
        Ok(if self.little_endian {
            u32::from_le_bytes(buf)
        } else {
            u32::from_be_bytes(buf)
        })
    }

    fn read_f64(&mut self) -> Result<f64> {
        let mut buf = [0u8; 8];
        buf.copy_from_slice(self.take(8)?);
        Ok(if self.little_endian {
            f64::from_le_bytes(buf)
        } else {
            f64::from_be_bytes(buf)
        })
    }

    fn read_count(&mut self) -> Result<usize> {
        let count = self.read_u32()? as usize;
        // Every element takes at least one byte; reject counts the input cannot hold.
        if count > self.data.len() - self.pos {
            return Err(GeometryError::Wkb(format!(
                "element count {} exceeds remaining input",
                count
            )));
        }
        Ok(count)
    }

    fn read_header(&mut self) -> Result<Header> {
        self.little_endian = match self.read_u8()? {
            0 => false,
            1 => true,
            other => {
                return Err(GeometryError::Wkb(format!(
                    "invalid byte order marker {}",
                    other
                )))
            }
        };

        let code = self.read_u32()?;
        if code & EWKB_M != 0 {
            return Err(GeometryError::Wkb("M coordinates are not supported".to_string()));
        }
        let mut is_3d = code & EWKB_Z != 0;
        let mut base = code & !EWKB_FLAGS;
        match base / 1000 {
            0 => {}
            1 => is_3d = true,
            _ => {
                return Err(GeometryError::Wkb(format!(
                    "unsupported geometry type code {}",
                    base
                )))
            }
        }
        base %= 1000;

        let srid = if code & EWKB_SRID != 0 {
            Some(self.read_u32()? as i32)
        } else {
            None
        };

        let geometry_type = match base {
            1 => GeometryType::Point,
            2 => GeometryType::LineString,
            3 => GeometryType::Polygon,
            4 => GeometryType::MultiPoint,
            5 => GeometryType::MultiLineString,
            6 => GeometryType::MultiPolygon,
            7 => GeometryType::GeometryCollection,
            other => {
                return Err(GeometryError::Wkb(format!(
                    "unsupported geometry type code {}",
                    other
                )))
            }
        };

        Ok(Header {
            geometry_type,
            dimension: if is_3d { Dimension::Xyz } else { Dimension::Xy },
            srid,
        })
    }

    fn read_geometry(&mut self, depth: usize) -> Result<(Geometry, Option<i32>)> {
        if depth > MAX_NESTING {
            return Err(GeometryError::Wkb("geometry nesting too deep".to_string()));
        }
        let header = self.read_header()?;
        let dim = header.dimension;
        let depth = depth + 1;
        let geometry = match header.geometry_type {
            GeometryType::Point => Geometry::Point(self.read_point(dim)?),
            GeometryType::LineString => Geometry::LineString(self.read_line_string(dim)?),
            GeometryType::Polygon => Geometry::Polygon(self.read_polygon(dim)?),
            GeometryType::MultiPoint => {
                let points = self.read_members(|r| match r.read_geometry(depth)?.0 {
                    Geometry::Point(p) => Ok(p),
                    other => Err(unexpected_member(GeometryType::Point, &other)),
                })?;
                Geometry::MultiPoint(MultiPoint::new(points)?)
            }
            GeometryType::MultiLineString => {
                let lines = self.read_members(|r| match r.read_geometry(depth)?.0 {
                    Geometry::LineString(l) => Ok(l),
                    other => Err(unexpected_member(GeometryType::LineString, &other)),
                })?;
                Geometry::MultiLineString(MultiLineString::new(lines)?)
            }
            GeometryType::MultiPolygon => {
                let polygons = self.read_members(|r| match r.read_geometry(depth)?.0 {
                    Geometry::Polygon(p) => Ok(p),
                    other => Err(unexpected_member(GeometryType::Polygon, &other)),
                })?;
                Geometry::MultiPolygon(MultiPolygon::new(polygons)?)
            }
            GeometryType::GeometryCollection => {
                let members = self.read_members(|r| Ok(r.read_geometry(depth)?.0))?;
                Geometry::GeometryCollection(GeometryCollection::new(members)?)
            }
        };
        Ok((geometry, header.srid))
    }

    fn read_members<T, F>(&mut self, mut member: F) -> Result<Vec<T>>
    where
        F: FnMut(&mut Self) -> Result<T>,
    {
        let count = self.read_count()?;
        let mut members = Vec::with_capacity(count);
        for _ in 0..count {
            members.push(member(self)?);
        }
        Ok(members)
    }

    fn read_point(&mut self, dim: Dimension) -> Result<Point> {
        let x = self.read_f64()?;
        let y = self.read_f64()?;
        let z = match dim {
            Dimension::Xy => None,
            Dimension::Xyz => Some(self.read_f64()?),
        };
        // PostGIS writes POINT EMPTY as NaN coordinates.
        if x.is_nan() && y.is_nan() {
            return Err(GeometryError::Wkb(
                "empty points are not supported".to_string(),
            ));
        }
        let point = match z {
            Some(z) => Point::try_from_xyz(x, y, z),
            None => Point::try_from_xy(x, y),
        };
        point.map_err(|e| GeometryError::Wkb(e.to_string()))
    }

    fn read_line_string(&mut self, dim: Dimension) -> Result<LineString> {
        let points = self.read_members(|r| r.read_point(dim))?;
        LineString::new(points)
    }

    fn read_polygon(&mut self, dim: Dimension) -> Result<Polygon> {
        let rings = self.read_members(|r| r.read_line_string(dim))?;
        Polygon::new(rings)
    }
}

fn unexpected_member(expected: GeometryType, found: &Geometry) -> GeometryError {
    GeometryError::Wkb(format!(
        "expected {} member, found {}",
        expected,
        found.geometry_type()
    ))
}
