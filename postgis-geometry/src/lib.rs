//! PostGIS geometry value types and codecs.
//!
//! This crate models the seven OGC simple-feature geometries stored in PostGIS
//! columns and converts them between their text and binary encodings:
//!
//! - **WKT** in the canonical form PostGIS functions accept
//!   (`MULTILINESTRING((1 1,2 1,2 2))`, `POINT Z(1 2 3)`)
//! - **GeoJSON** geometry objects, via the `geojson` crate
//! - **EWKB** hex as returned by PostgreSQL for geometry columns
//!
//! ```text
//!   WKT text ──wkt crate──► wkt::Wkt ────┐
//!                                        ▼
//!   GeoJSON ──geojson crate──────────► Geometry ──► WKT / GeoJSON / geo_types
//!                                        ▲
//!   EWKB hex ──hex──► bytes ──reader─────┘
//! ```
//!
//! Points are constructed latitude first (`Point::new(lat, lng)`) but every
//! encoding is longitude first (x = lng, y = lat, z = altitude).
//!
//! # Modules
//!
//! - [`geometry`]: The `Geometry` sum type, `GeometryType` and `Dimension`
//! - [`point`], [`line_string`], [`polygon`], [`multi`], [`collection`]: Value types
//! - [`wkt`]: WKT reader (on top of the `wkt` crate) and canonical writer
//! - [`ewkb`]: EWKB decoding
//! - [`error`]: Error types

pub mod collection;
pub mod error;
pub mod ewkb;
pub mod geometry;
mod geojson_codec;
mod interop;
pub mod line_string;
pub mod multi;
pub mod point;
pub mod polygon;
pub mod wkt;

// Re-export key types
pub use collection::GeometryCollection;
pub use error::{GeometryError, Result};
pub use ewkb::Ewkb;
pub use geometry::{Dimension, Geometry, GeometryType, MAX_NESTING};
pub use line_string::LineString;
pub use multi::{MultiLineString, MultiPoint, MultiPolygon};
pub use point::Point;
pub use polygon::Polygon;
