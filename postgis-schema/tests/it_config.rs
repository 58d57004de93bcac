//! Config loading integration tests.

use std::fs;

use postgis_schema::{Blueprint, ConfigError, PostgisConfig, PostgisGrammar};

#[test]
fn load_toml_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("postgis.toml");
    fs::write(&path, "[postgis]\nschema = \"extensions\"\n").unwrap();

    let config = PostgisConfig::load(&path).unwrap();
    assert_eq!(config.schema(), "extensions");
}

#[test]
fn load_json_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("postgis.json");
    fs::write(&path, r#"{"postgis": {"schema": "gis"}}"#).unwrap();

    let config = PostgisConfig::load(&path).unwrap();
    assert_eq!(config.schema(), "gis");
}

#[test]
fn missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = PostgisConfig::load(dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
    assert!(err.to_string().contains("absent.toml"));
}

#[test]
fn malformed_file_is_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("postgis.json");
    fs::write(&path, "{\"postgis\": ").unwrap();

    let err = PostgisConfig::load(&path).unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn loaded_schema_reaches_compiled_sql() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("postgis.toml");
    fs::write(&path, "[postgis]\nschema = \"topology\"\n").unwrap();

    let grammar = PostgisGrammar::new(PostgisConfig::load(&path).unwrap());
    let mut bp = Blueprint::new("roads");
    bp.linestring("path");
    assert_eq!(
        grammar.compile(&bp).unwrap(),
        vec!["alter table \"roads\" add column \"path\" topology.GEOGRAPHY(LINESTRING, 4326) not null"]
    );
}

#[test]
fn config_error_converts_to_schema_error() {
    let err: postgis_schema::SchemaError = ConfigError::Parse("bad".to_string()).into();
    assert!(matches!(err, postgis_schema::SchemaError::Config(_)));
}
