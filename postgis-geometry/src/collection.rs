//! Heterogeneous geometry collection.

use crate::error::Result;
use crate::geometry::{uniform_dimension, Dimension, Geometry};

/// An ordered collection of arbitrary geometries sharing one dimension.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeometryCollection {
    geometries: Vec<Geometry>,
}

impl GeometryCollection {
    /// Create a collection; fails if members mix 2D and 3D coordinates.
    pub fn new(geometries: Vec<Geometry>) -> Result<Self> {
        uniform_dimension(
            geometries.iter().map(Geometry::dimension),
            "GeometryCollection",
        )?;
        Ok(Self { geometries })
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn geometries(&self) -> &[Geometry] {
        &self.geometries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Geometry> {
        self.geometries.iter()
    }

    /// Number of member geometries.
    pub fn count(&self) -> usize {
        self.geometries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.geometries.is_empty()
    }

    pub fn dimension(&self) -> Option<Dimension> {
        self.geometries.iter().find_map(Geometry::dimension)
    }

    pub fn is_3d(&self) -> bool {
        self.dimension().is_some_and(|d| d.is_3d())
    }

    pub fn into_inner(self) -> Vec<Geometry> {
        self.geometries
    }
}

impl<'a> IntoIterator for &'a GeometryCollection {
    type Item = &'a Geometry;
    type IntoIter = std::slice::Iter<'a, Geometry>;

    fn into_iter(self) -> Self::IntoIter {
        self.geometries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::line_string::LineString;
    use crate::point::Point;

    #[test]
    fn test_mixed_member_types() {
        let line = LineString::new(vec![Point::new(0.0, 0.0), Point::new(1.0, 1.0)]).unwrap();
        let gc = GeometryCollection::new(vec![Point::new(1.0, 2.0).into(), line.into()]).unwrap();
        assert_eq!(gc.count(), 2);
        assert_eq!(gc.dimension(), Some(Dimension::Xy));
    }

    #[test]
    fn test_mixed_dimensions_rejected() {
        let result = GeometryCollection::new(vec![
            Point::new(1.0, 2.0).into(),
            Point::new_3d(1.0, 2.0, 3.0).into(),
        ]);
        assert!(result.is_err());
    }
}
