//! Shared test harness for postgis-schema integration tests.

// Not every integration test crate uses every helper.
#![allow(dead_code)]

pub mod event_capture;

use postgis_schema::{Blueprint, PostgisConfig, PostgisGrammar};

/// Grammar with the default `public` schema.
pub fn grammar() -> PostgisGrammar {
    PostgisGrammar::new(PostgisConfig::default())
}

/// Compile a blueprint built by `build` for table `table`.
pub fn compile(table: &str, build: impl FnOnce(&mut Blueprint)) -> Vec<String> {
    let mut blueprint = Blueprint::new(table);
    build(&mut blueprint);
    grammar().compile(&blueprint).unwrap()
}
