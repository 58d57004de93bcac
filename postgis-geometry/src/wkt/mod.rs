//! Well-Known Text codec.
//!
//! Reading goes through the `wkt` crate; writing produces the canonical form
//! expected by PostGIS consumers (` Z` marker, no space after commas).

mod reader;
mod writer;

pub use reader::parse;

pub(crate) use writer::{write_components, write_ref};
