//! Grammar integration tests: full blueprints compiled to SQL.

mod support;

use postgis_schema::{
    Blueprint, PostgisConfig, PostgisGrammar, PostgresGrammar, SchemaError,
};
use support::{compile, event_capture, grammar};

#[test]
fn create_table_with_spatial_columns() {
    let sql = compile("places", |bp| {
        bp.create();
        bp.increments("id");
        bp.string("name", 100);
        bp.point("location");
        bp.polygon_with("boundary", "geometry", 3857).nullable();
    });
    assert_eq!(
        sql,
        vec![
            "create table \"places\" (\"id\" serial primary key not null, \
             \"name\" varchar(100) not null, \
             \"location\" public.GEOGRAPHY(POINT, 4326) not null, \
             \"boundary\" public.GEOMETRY(POLYGON, 3857) null)"
        ]
    );
}

#[test]
fn alter_table_adds_columns() {
    let sql = compile("places", |bp| {
        bp.hstore("tags");
        bp.daterange("open");
    });
    assert_eq!(
        sql,
        vec!["alter table \"places\" add column \"tags\" hstore not null, add column \"open\" daterange not null"]
    );
}

#[test]
fn extended_types() {
    let sql = compile("t", |bp| {
        bp.create();
        bp.character_default("code");
        bp.uuid("uid");
        bp.mac_address("mac");
        bp.path("route");
        bp.circle("area");
        bp.money("price");
        bp.int8range("span");
    });
    assert_eq!(
        sql[0],
        "create table \"t\" (\"code\" character(255) not null, \"uid\" uuid not null, \
         \"mac\" macaddr not null, \"route\" path not null, \"area\" circle not null, \
         \"price\" money not null, \"span\" int8range not null)"
    );
}

#[test]
fn geography_point_default() {
    let sql = compile("t", |bp| {
        bp.point("location");
    });
    assert_eq!(
        sql,
        vec!["alter table \"t\" add column \"location\" public.GEOGRAPHY(POINT, 4326) not null"]
    );
}

#[test]
fn geography_with_other_srid_fails() {
    let mut bp = Blueprint::new("t");
    bp.point_with("location", "GEOGRAPHY", 3857);
    let err = grammar().compile(&bp).unwrap_err();
    assert!(matches!(err, SchemaError::UnsupportedGeomtype(_)));
}

#[test]
fn invalid_geomtype_fails() {
    let mut bp = Blueprint::new("t");
    bp.point_with("location", "LINESTRING", 4326);
    let err = grammar().compile(&bp).unwrap_err();
    assert!(matches!(err, SchemaError::UnsupportedGeomtype(_)));
    assert!(err.to_string().contains("GEOGRAPHY or GEOMETRY"));
}

#[test]
fn geomtype_is_case_insensitive() {
    let sql = compile("t", |bp| {
        bp.linestring_with("route", "Geography", "4326");
    });
    assert!(sql[0].ends_with("\"route\" public.GEOGRAPHY(LINESTRING, 4326) not null"));
}

#[test]
fn gin_and_gist_indexes() {
    let sql = compile("docs", |bp| {
        bp.tsvector("body").gin();
        bp.gist(["shape", "extent"], Some("docs_shape_idx"));
    });
    assert_eq!(
        sql,
        vec![
            "alter table \"docs\" add column \"body\" tsvector not null",
            "CREATE INDEX docs_shape_idx ON \"docs\" USING GIST(\"shape\", \"extent\")",
            "CREATE INDEX docs_body_gin ON \"docs\" USING GIN(\"body\")",
        ]
    );
}

#[test]
fn derived_index_names_use_table_prefix() {
    let grammar = PostgisGrammar::with_base(
        PostgresGrammar::new().with_table_prefix("app_"),
        PostgisConfig::default(),
    );
    let mut bp = Blueprint::new("Road-Segments");
    bp.multilinestring("geo.path").gist();
    let sql = grammar.compile(&bp).unwrap();
    assert_eq!(
        sql[1],
        "CREATE INDEX app_road_segments_geo_path_gist ON \"app_Road-Segments\" USING GIST(\"geo\".\"path\")"
    );
}

#[test]
fn base_index_statements() {
    let sql = compile("users", |bp| {
        bp.primary(["id"], None);
        bp.unique(["email"], None);
        bp.index(["name"], Some("users_by_name"));
    });
    assert_eq!(
        sql,
        vec![
            "alter table \"users\" add primary key (\"id\")",
            "alter table \"users\" add constraint \"users_email_unique\" unique (\"email\")",
            "create index \"users_by_name\" on \"users\" (\"name\")",
        ]
    );
}

#[test]
fn inline_named_unique() {
    let sql = compile("users", |bp| {
        bp.string("email", 255).unique_named("custom_idx");
    });
    assert_eq!(
        sql[1],
        "alter table \"users\" add constraint \"custom_idx\" unique (\"email\")"
    );
}

#[test]
fn geometry_collection_column() {
    let sql = compile("shapes", |bp| {
        bp.geometrycollection("geom", Some(3857), 3, false);
        bp.geometrycollection("other", None, 2, true);
    });
    assert_eq!(
        sql,
        vec![
            "SELECT public.AddGeometryColumn('shapes', 'geom', 3857, 'public.GEOMETRYCOLLECTION', 3, false)",
            "SELECT public.AddGeometryColumn('shapes', 'other', 4326, 'public.GEOMETRYCOLLECTION', 2, true)",
        ]
    );
}

#[test]
fn extension_lifecycle() {
    let sql = compile("t", |bp| {
        bp.enable_postgis();
        bp.enable_postgis_if_not_exists();
        bp.disable_postgis();
        bp.disable_postgis_if_exists();
    });
    assert_eq!(
        sql,
        vec![
            "CREATE EXTENSION postgis",
            "CREATE EXTENSION IF NOT EXISTS postgis",
            "DROP EXTENSION postgis",
            "DROP EXTENSION IF EXISTS postgis",
        ]
    );
}

#[test]
fn drop_statements() {
    assert_eq!(
        compile("t", |bp| {
            bp.drop();
        }),
        vec!["drop table \"t\""]
    );
    assert_eq!(
        compile("t", |bp| {
            bp.drop_if_exists();
        }),
        vec!["drop table if exists \"t\""]
    );
}

#[test]
fn temporary_inherited_table() {
    let sql = compile("cities", |bp| {
        bp.create().temporary().inherits("places");
        bp.integer("population").default(0);
    });
    assert_eq!(
        sql,
        vec!["create temporary table \"cities\" (\"population\" integer not null default 0) inherits (\"places\")"]
    );
}

#[test]
fn default_values() {
    let sql = compile("t", |bp| {
        bp.uuid("id").default("uuid_generate_v4()");
        bp.boolean("active").default(true);
        bp.text("label").default("O'Hare");
        bp.timestamp_tz("created_at").default_raw("now()");
    });
    assert_eq!(
        sql[0],
        "alter table \"t\" add column \"id\" uuid not null default uuid_generate_v4(), \
         add column \"active\" boolean not null default '1', \
         add column \"label\" text not null default 'O''Hare', \
         add column \"created_at\" timestamp(0) with time zone not null default now()"
    );
}

#[test]
fn schema_is_bound_at_compile_time() {
    let mut bp = Blueprint::new("places");
    bp.point("location");
    bp.geometrycollection("shapes", None, 2, true);

    let public = grammar().compile(&bp).unwrap();
    let gis = PostgisGrammar::new(PostgisConfig::default().with_schema("gis"))
        .compile(&bp)
        .unwrap();

    assert_eq!(
        public[0],
        "alter table \"places\" add column \"location\" public.GEOGRAPHY(POINT, 4326) not null"
    );
    assert_eq!(
        gis[0],
        "alter table \"places\" add column \"location\" gis.GEOGRAPHY(POINT, 4326) not null"
    );
    assert_eq!(
        gis[1],
        "SELECT gis.AddGeometryColumn('places', 'shapes', 4326, 'gis.GEOMETRYCOLLECTION', 2, true)"
    );
}

#[test]
fn compile_does_not_mutate_blueprint() {
    let mut bp = Blueprint::new("t");
    bp.create();
    bp.jsonb("doc").gin();
    let before = bp.clone();
    let first = grammar().compile(&bp).unwrap();
    let second = grammar().compile(&bp).unwrap();
    assert_eq!(first, second);
    assert_eq!(bp, before);
}

#[test]
fn compile_emits_tracing_events() {
    let (store, _guard) = event_capture::init_test_tracing();

    let mut bp = Blueprint::new("places");
    bp.create();
    bp.point("location");
    grammar().compile(&bp).unwrap();

    let compiled = store.find("compiled blueprint").expect("debug event");
    assert_eq!(compiled.level, tracing::Level::DEBUG);
    assert_eq!(compiled.fields.get("table").map(String::as_str), Some("places"));
    assert_eq!(compiled.fields.get("statements").map(String::as_str), Some("1"));
    assert_eq!(store.at_level(tracing::Level::TRACE).len(), 1);
}

#[test]
fn validation_failure_warns() {
    let (store, _guard) = event_capture::init_test_tracing();

    let mut bp = Blueprint::new("places");
    bp.point_with("location", "GEOGRAPHY", 3857);
    assert!(grammar().compile(&bp).is_err());

    let warnings = store.at_level(tracing::Level::WARN);
    assert_eq!(warnings.len(), 1);
    assert_eq!(
        warnings[0].fields.get("column").map(String::as_str),
        Some("location")
    );
}
