//! Multi-geometries: homogeneous collections of points, linestrings or polygons.

use crate::error::Result;
use crate::geometry::{uniform_dimension, Dimension};
use crate::line_string::LineString;
use crate::point::Point;
use crate::polygon::Polygon;

macro_rules! multi_geometry {
    ($name:ident, $member:ident, $field:ident, $label:literal) => {
        #[doc = concat!("An ordered collection of [`", stringify!($member), "`] members.")]
        #[derive(Debug, Clone, Default, PartialEq)]
        pub struct $name {
            $field: Vec<$member>,
        }

        impl $name {
            /// Create the collection; fails if members mix 2D and 3D coordinates.
            pub fn new($field: Vec<$member>) -> Result<Self> {
                uniform_dimension($field.iter().map($member::dimension), $label)?;
                Ok(Self { $field })
            }

            pub fn empty() -> Self {
                Self::default()
            }

            pub fn $field(&self) -> &[$member] {
                &self.$field
            }

            pub fn iter(&self) -> std::slice::Iter<'_, $member> {
                self.$field.iter()
            }

            /// Number of member geometries.
            pub fn count(&self) -> usize {
                self.$field.len()
            }

            pub fn is_empty(&self) -> bool {
                self.$field.is_empty()
            }

            /// Dimension as reported by the first non-empty member.
            pub fn dimension(&self) -> Option<Dimension> {
                self.$field.iter().find_map($member::dimension)
            }

            pub fn is_3d(&self) -> bool {
                self.dimension().is_some_and(|d| d.is_3d())
            }

            pub fn into_inner(self) -> Vec<$member> {
                self.$field
            }
        }

        impl<'a> IntoIterator for &'a $name {
            type Item = &'a $member;
            type IntoIter = std::slice::Iter<'a, $member>;

            fn into_iter(self) -> Self::IntoIter {
                self.$field.iter()
            }
        }
    };
}

multi_geometry!(MultiPoint, Point, points, "MultiPoint");
multi_geometry!(MultiLineString, LineString, line_strings, "MultiLineString");
multi_geometry!(MultiPolygon, Polygon, polygons, "MultiPolygon");
