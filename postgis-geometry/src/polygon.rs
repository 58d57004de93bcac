//! Polygon geometry.

use crate::error::Result;
use crate::geometry::{uniform_dimension, Dimension};
use crate::line_string::LineString;

/// A polygon: the first ring is the exterior, the remaining rings are holes.
///
/// Ring closure is conventional but not enforced.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Polygon {
    rings: Vec<LineString>,
}

impl Polygon {
    /// Create a polygon; fails if rings mix 2D and 3D coordinates.
    pub fn new(rings: Vec<LineString>) -> Result<Self> {
        uniform_dimension(rings.iter().map(LineString::dimension), "Polygon")?;
        Ok(Self { rings })
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn rings(&self) -> &[LineString] {
        &self.rings
    }

    pub fn exterior(&self) -> Option<&LineString> {
        self.rings.first()
    }

    pub fn interiors(&self) -> &[LineString] {
        self.rings.get(1..).unwrap_or(&[])
    }

    /// Number of rings.
    pub fn count(&self) -> usize {
        self.rings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rings.is_empty()
    }

    pub fn dimension(&self) -> Option<Dimension> {
        self.rings.iter().find_map(LineString::dimension)
    }

    pub fn is_3d(&self) -> bool {
        self.dimension().is_some_and(|d| d.is_3d())
    }

    pub fn into_rings(self) -> Vec<LineString> {
        self.rings
    }
}
