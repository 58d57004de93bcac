//! Point geometry.

use crate::error::{GeometryError, Result};
use crate::geometry::Dimension;

/// A position on the globe, with optional altitude.
///
/// Points are constructed latitude-first (`Point::new(lat, lng)`), while WKT
/// and GeoJSON write coordinates longitude-first (`x = lng`, `y = lat`,
/// `z = alt`). Every component is finite, so each point has an exact WKT
/// and GeoJSON form.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    lat: f64,
    lng: f64,
    alt: Option<f64>,
}

impl Point {
    /// Create a 2D point.
    ///
    /// # Panics
    ///
    /// Panics if a component is NaN or infinite; use [`Point::try_new`] for
    /// untrusted values.
    pub fn new(lat: f64, lng: f64) -> Self {
        Self::checked(lat, lng, None)
    }

    /// Create a 3D point.
    ///
    /// # Panics
    ///
    /// Panics if a component is NaN or infinite; use [`Point::try_new_3d`]
    /// for untrusted values.
    pub fn new_3d(lat: f64, lng: f64, alt: f64) -> Self {
        Self::checked(lat, lng, Some(alt))
    }

    /// Create a point from coordinate-order components (`x = lng`, `y = lat`).
    ///
    /// # Panics
    ///
    /// Panics if a component is NaN or infinite.
    pub fn from_xy(x: f64, y: f64) -> Self {
        Self::new(y, x)
    }

    /// Create a 3D point from coordinate-order components.
    ///
    /// # Panics
    ///
    /// Panics if a component is NaN or infinite.
    pub fn from_xyz(x: f64, y: f64, z: f64) -> Self {
        Self::new_3d(y, x, z)
    }

    /// Create a 2D point, rejecting NaN and infinite components.
    pub fn try_new(lat: f64, lng: f64) -> Result<Self> {
        Self::validated(lat, lng, None)
    }

    /// Create a 3D point, rejecting NaN and infinite components.
    pub fn try_new_3d(lat: f64, lng: f64, alt: f64) -> Result<Self> {
        Self::validated(lat, lng, Some(alt))
    }

    /// Fallible [`Point::from_xy`].
    pub fn try_from_xy(x: f64, y: f64) -> Result<Self> {
        Self::try_new(y, x)
    }

    /// Fallible [`Point::from_xyz`].
    pub fn try_from_xyz(x: f64, y: f64, z: f64) -> Result<Self> {
        Self::try_new_3d(y, x, z)
    }

    fn validated(lat: f64, lng: f64, alt: Option<f64>) -> Result<Self> {
        let finite = lat.is_finite() && lng.is_finite() && alt.map_or(true, f64::is_finite);
        if !finite {
            return Err(GeometryError::NonFinite(match alt {
                Some(alt) => format!("lat {}, lng {}, alt {}", lat, lng, alt),
                None => format!("lat {}, lng {}", lat, lng),
            }));
        }
        Ok(Self { lat, lng, alt })
    }

    fn checked(lat: f64, lng: f64, alt: Option<f64>) -> Self {
        match Self::validated(lat, lng, alt) {
            Ok(point) => point,
            Err(err) => panic!("{}", err),
        }
    }

    /// Build a point from a GeoJSON position of length 2 or 3.
    pub(crate) fn from_position(position: &[f64]) -> Result<Self> {
        match *position {
            [x, y] => Self::try_from_xy(x, y),
            [x, y, z] => Self::try_from_xyz(x, y, z),
            _ => Err(GeometryError::GeoJson(format!(
                "position must have 2 or 3 elements, found {}",
                position.len()
            ))),
        }
    }

    /// Coordinate tuple in WKT/GeoJSON order.
    pub fn components(&self) -> Vec<f64> {
        match self.alt {
            Some(alt) => vec![self.lng, self.lat, alt],
            None => vec![self.lng, self.lat],
        }
    }

    pub fn lat(&self) -> f64 {
        self.lat
    }

    pub fn lng(&self) -> f64 {
        self.lng
    }

    pub fn alt(&self) -> Option<f64> {
        self.alt
    }

    pub fn x(&self) -> f64 {
        self.lng
    }

    pub fn y(&self) -> f64 {
        self.lat
    }

    pub fn z(&self) -> Option<f64> {
        self.alt
    }

    /// Points always have a dimension; the `Option` matches the other types.
    pub fn dimension(&self) -> Option<Dimension> {
        Some(if self.alt.is_some() {
            Dimension::Xyz
        } else {
            Dimension::Xy
        })
    }

    pub fn is_3d(&self) -> bool {
        self.alt.is_some()
    }

    /// Space-separated coordinate tuple as used inside WKT, e.g. `"2 1 3"`.
    pub fn to_pair(&self) -> String {
        let mut out = String::new();
        crate::wkt::write_components(&mut out, self);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lat_lng_order() {
        let p = Point::new(1.0, 2.0);
        assert_eq!(p.x(), 2.0);
        assert_eq!(p.y(), 1.0);
        assert_eq!(p.components(), vec![2.0, 1.0]);
        assert_eq!(p.to_pair(), "2 1");
    }

    #[test]
    fn test_3d_point() {
        let p = Point::new_3d(1.0, 2.0, 3.5);
        assert!(p.is_3d());
        assert_eq!(p.dimension(), Some(Dimension::Xyz));
        assert_eq!(p.to_pair(), "2 1 3.5");
    }

    #[test]
    fn test_from_position_rejects_bad_length() {
        assert!(Point::from_position(&[1.0]).is_err());
        assert!(Point::from_position(&[1.0, 2.0, 3.0, 4.0]).is_err());
        assert_eq!(
            Point::from_position(&[1.0, 2.0]).unwrap(),
            Point::from_xy(1.0, 2.0)
        );
    }

    #[test]
    fn test_non_finite_components_rejected() {
        assert!(matches!(
            Point::try_new(f64::NAN, 1.0),
            Err(GeometryError::NonFinite(_))
        ));
        assert!(Point::try_new_3d(1.0, 2.0, f64::INFINITY).is_err());
        assert!(Point::try_from_xy(f64::NEG_INFINITY, 0.0).is_err());
        assert_eq!(Point::try_new(1.0, 2.0).unwrap(), Point::new(1.0, 2.0));
    }

    #[test]
    #[should_panic(expected = "Non-finite coordinate")]
    fn test_new_panics_on_nan() {
        let _ = Point::new(f64::NAN, 1.0);
    }

    #[test]
    fn test_position_with_nan_is_rejected() {
        assert!(matches!(
            Point::from_position(&[1.0, f64::NAN]),
            Err(GeometryError::NonFinite(_))
        ));
    }
}
