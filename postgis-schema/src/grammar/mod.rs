//! SQL grammars
//!
//! [`PostgisGrammar`] compiles blueprints and delegates standard PostgreSQL
//! syntax to a [`BaseGrammar`], by default [`PostgresGrammar`].

mod base;
mod postgis;

pub use base::{BaseGrammar, PostgresGrammar};
pub use postgis::{PostgisGrammar, ALLOWED_GEOMTYPES, GEOGRAPHY_SRID};
