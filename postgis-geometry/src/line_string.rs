//! LineString geometry.

use crate::error::Result;
use crate::geometry::{uniform_dimension, Dimension};
use crate::point::Point;

/// An ordered sequence of points sharing one dimension.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LineString {
    points: Vec<Point>,
}

impl LineString {
    /// Create a linestring; fails if 2D and 3D points are mixed.
    pub fn new(points: Vec<Point>) -> Result<Self> {
        uniform_dimension(points.iter().map(Point::dimension), "LineString")?;
        Ok(Self { points })
    }

    /// Create an empty linestring.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Point> {
        self.points.iter()
    }

    /// Number of points.
    pub fn count(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Dimension of the first point, or `None` when empty.
    pub fn dimension(&self) -> Option<Dimension> {
        self.points.first().and_then(Point::dimension)
    }

    pub fn is_3d(&self) -> bool {
        self.dimension().is_some_and(|d| d.is_3d())
    }

    /// Check if the first and last points coincide (rings are expected to).
    pub fn is_closed(&self) -> bool {
        match (self.points.first(), self.points.last()) {
            (Some(first), Some(last)) => first == last,
            _ => false,
        }
    }

    pub fn into_points(self) -> Vec<Point> {
        self.points
    }
}

impl<'a> IntoIterator for &'a LineString {
    type Item = &'a Point;
    type IntoIter = std::slice::Iter<'a, Point>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}
