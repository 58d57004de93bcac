//! WKT codec integration tests.

use postgis_geometry::{
    Dimension, Geometry, GeometryCollection, GeometryError, GeometryType, LineString,
    MultiLineString, MultiPoint, MultiPolygon, Point, Polygon, MAX_NESTING,
};

fn square(offset: f64) -> LineString {
    LineString::new(vec![
        Point::new(offset + 1.0, offset + 1.0),
        Point::new(offset + 1.0, offset + 2.0),
        Point::new(offset + 2.0, offset + 2.0),
        Point::new(offset + 2.0, offset + 1.0),
        Point::new(offset + 1.0, offset + 1.0),
    ])
    .unwrap()
}

fn line_3d() -> MultiLineString {
    MultiLineString::new(vec![
        LineString::new(vec![
            Point::new_3d(1.0, 1.0, 1.0),
            Point::new_3d(2.0, 2.0, 2.0),
            Point::new_3d(3.0, 2.0, 4.0),
        ])
        .unwrap(),
        LineString::new(vec![
            Point::new_3d(4.0, 3.0, 5.0),
            Point::new_3d(3.0, 4.0, 2.0),
            Point::new_3d(5.0, 6.0, 4.0),
        ])
        .unwrap(),
    ])
    .unwrap()
}

#[test]
fn multilinestring_from_wkt() {
    let mls = MultiLineString::from_wkt("MULTILINESTRING((0 0,1 1,1 2),(2 3,3 2,5 4))").unwrap();
    assert_eq!(mls.count(), 2);
    assert_eq!(mls.line_strings()[0].count(), 3);
    assert_eq!(mls.line_strings()[1].points()[2], Point::new(4.0, 5.0));
    assert!(!mls.is_3d());
}

#[test]
fn multilinestring_literal_count() {
    let mls = MultiLineString::from_wkt("MULTILINESTRING((1 1,2 2,2 3),(3 4,4 3,6 5))").unwrap();
    assert_eq!(mls.count(), 2);
    assert_eq!(mls.to_wkt(), "MULTILINESTRING((1 1,2 2,2 3),(3 4,4 3,6 5))");
}

#[test]
fn multilinestring_z_literal_round_trip() {
    let text = "MULTILINESTRING Z((1 1 1,2 2 2,2 3 4),(3 4 5,4 3 2,6 5 4))";
    let mls = MultiLineString::from_wkt(text).unwrap();
    assert_eq!(mls.count(), 2);
    assert!(mls.is_3d());
    assert_eq!(mls, line_3d());
    assert_eq!(mls.to_wkt(), text);
}

#[test]
fn multilinestring_3d_from_wkt() {
    let mls = MultiLineString::from_wkt("MULTILINESTRING Z((0 0 0,1 1 1),(2 3 4,3 2 1))").unwrap();
    assert!(mls.is_3d());
    assert_eq!(mls.dimension(), Some(Dimension::Xyz));
    assert_eq!(mls.line_strings()[1].points()[0].alt(), Some(4.0));
}

#[test]
fn multilinestring_to_wkt() {
    let mls = MultiLineString::new(vec![square(0.0)]).unwrap();
    assert_eq!(mls.to_wkt(), "MULTILINESTRING((1 1,2 1,2 2,1 2,1 1))");
    assert_eq!(mls.to_string(), mls.to_wkt());
}

#[test]
fn multilinestring_3d_to_wkt() {
    assert_eq!(
        line_3d().to_wkt(),
        "MULTILINESTRING Z((1 1 1,2 2 2,2 3 4),(3 4 5,4 3 2,6 5 4))"
    );
}

#[test]
fn canonical_wkt_is_stable() {
    let inputs = [
        "POINT(1 2)",
        "POINT Z(1 2 3)",
        "LINESTRING(0 0,1.5 -2.25)",
        "POLYGON((0 0,4 0,4 4,0 0),(1 1,2 1,2 2,1 1))",
        "MULTIPOINT((1 2),(3 4))",
        "MULTIPOLYGON(((0 0,1 0,1 1,0 0)),((5 5,6 5,6 6,5 5)))",
        "GEOMETRYCOLLECTION(POINT(1 2),LINESTRING(0 0,1 1))",
        "GEOMETRYCOLLECTION EMPTY",
    ];
    for input in inputs {
        let geometry = Geometry::from_wkt(input).unwrap();
        assert_eq!(geometry.to_wkt(), input);
    }
}

#[test]
fn whitespace_and_case_are_normalized() {
    let geometry: Geometry = "  multipoint z ( 1 2 3 , 4 5 6 )  ".parse().unwrap();
    assert_eq!(geometry.to_wkt(), "MULTIPOINT Z((1 2 3),(4 5 6))");
}

#[test]
fn typed_parse_rejects_other_types() {
    let err = Polygon::from_wkt("LINESTRING(0 0,1 1)").unwrap_err();
    assert_eq!(
        err,
        GeometryError::TypeMismatch {
            expected: GeometryType::Polygon,
            found: GeometryType::LineString,
        }
    );
}

#[test]
fn mixed_dimensions_rejected_at_construction() {
    let err = MultiLineString::new(vec![square(0.0), line_3d().into_inner().remove(0)]).unwrap_err();
    assert!(matches!(err, GeometryError::MixedDimensions(_)));

    let err = LineString::new(vec![Point::new(1.0, 2.0), Point::new_3d(1.0, 2.0, 3.0)]).unwrap_err();
    assert!(matches!(err, GeometryError::MixedDimensions(_)));
}

#[test]
fn empty_members_do_not_fix_dimension() {
    let mpoly = MultiPolygon::new(vec![
        Polygon::empty(),
        Polygon::new(vec![square(0.0)]).unwrap(),
    ])
    .unwrap();
    assert_eq!(mpoly.dimension(), Some(Dimension::Xy));
    assert_eq!(
        mpoly.to_wkt(),
        "MULTIPOLYGON(EMPTY,((1 1,2 1,2 2,1 2,1 1)))"
    );
}

#[test]
fn parse_errors_carry_position() {
    match Geometry::from_wkt("LINESTRING(1 2,3 4").unwrap_err() {
        GeometryError::Parse { position, message } => {
            assert_eq!(position, 18);
            assert_eq!(message, "unclosed '('");
        }
        other => panic!("expected parse error, got {:?}", other),
    }
    assert!(matches!(
        Geometry::from_wkt("LINESTRING(1 2,3)"),
        Err(GeometryError::Parse { .. })
    ));
}

#[test]
fn deeply_nested_collections_are_rejected() {
    let depth = MAX_NESTING * 2;
    let text = format!(
        "{}POINT(1 2){}",
        "GEOMETRYCOLLECTION(".repeat(depth),
        ")".repeat(depth)
    );
    match Geometry::from_wkt(&text).unwrap_err() {
        GeometryError::Parse { message, .. } => assert_eq!(message, "geometry nesting too deep"),
        other => panic!("expected parse error, got {:?}", other),
    }
}

#[test]
fn empty_and_typed_round_trip() {
    assert_eq!(MultiPoint::empty().to_wkt(), "MULTIPOINT EMPTY");
    assert_eq!(
        MultiPoint::from_wkt("MULTIPOINT EMPTY").unwrap(),
        MultiPoint::empty()
    );
    assert_eq!(GeometryCollection::empty().to_wkt(), "GEOMETRYCOLLECTION EMPTY");
}

#[test]
fn point_pair_is_longitude_first() {
    let point = Point::new(51.5, -0.12);
    assert_eq!(point.to_pair(), "-0.12 51.5");
    assert_eq!(point.to_wkt(), "POINT(-0.12 51.5)");
}
