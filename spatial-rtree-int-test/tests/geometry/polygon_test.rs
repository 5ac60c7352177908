use spatial_rtree::{geometries, Bounded, Geometry, RTree, SpatialError};
use spatial_rtree_int_test::test_util::{line, point, rectangle, regular_polygon, PRECISION};

fn unit_square() -> Geometry {
    geometries::polygon(&[-1.0, -1.0, -1.0, 1.0, 1.0, 1.0, 1.0, -1.0])
        .unwrap()
        .into()
}

#[test]
fn test_square_crossed_by_line() {
    assert!(unit_square().intersects(&line(-2.0, 0.0, 2.0, 0.0)));
}

#[test]
fn test_square_missed_by_segment_on_crossing_line() {
    assert!(!unit_square().intersects(&line(0.5, 5.0, 0.5, 10.1)));
    assert!((unit_square().distance(&line(0.5, 5.0, 0.5, 10.1)) - 4.0).abs() < PRECISION);
}

#[test]
fn test_square_distance_to_rectangle() {
    let d = unit_square().distance(&rectangle(1.5, 1.5, 2.0, 2.0));
    assert!((d - 0.70710678).abs() < PRECISION);
}

#[test]
fn test_duplicate_vertices_collapse_into_mbr() {
    let polygon = geometries::polygon(&[
        -3.0, 0.0, -3.0, 0.0, -3.0, 0.0, 1.0, 4.0, 2.0, -5.0, -2.0, -10.0, -2.0, -10.0,
    ])
    .unwrap();
    let mbr = polygon.mbr();
    assert_eq!(mbr.x1(), -3.0);
    assert_eq!(mbr.y1(), -10.0);
    assert_eq!(mbr.x2(), 2.0);
    assert_eq!(mbr.y2(), 4.0);
    assert_eq!(polygon.len(), 4);
}

#[test]
fn test_non_simple_rings_rejected() {
    let rings: [&[f64]; 3] = [
        // dented square
        &[0.0, 0.0, 0.0, 1.0, 0.5, 0.5, 1.0, 1.0, 1.0, 0.0],
        // bowtie
        &[0.0, 0.0, 1.0, 1.0, 1.0, 0.0, 0.0, 1.0],
        // closed bowtie with repeated start
        &[0.0, 0.0, 2.0, 2.0, 2.0, 0.0, 0.0, 2.0, 0.0, 0.0],
    ];
    for ring in rings {
        let err = geometries::polygon(ring).unwrap_err();
        assert!(matches!(err, SpatialError::UnsupportedGeometry(_)), "{:?}", ring);
    }
}

#[test]
fn test_degenerate_rings_rejected() {
    let rings: [&[f64]; 4] = [
        &[],
        &[0.0, 0.0, 1.0, 1.0],
        &[0.0, 0.0, 1.0, 1.0, 2.0, 2.0],
        &[0.0, 0.0, 1.0, 0.0, 1.0],
    ];
    for ring in rings {
        let err = geometries::polygon(ring).unwrap_err();
        assert!(matches!(err, SpatialError::InvalidGeometry(_)), "{:?}", ring);
    }
    assert!(matches!(
        geometries::polygon(&[0.0, 0.0, f64::NAN, 1.0, 1.0, 0.0]),
        Err(SpatialError::InvalidGeometry(_))
    ));
}

#[test]
fn test_polygon_containment_without_edge_crossings() {
    let outer = regular_polygon(0.0, 0.0, 10.0, 6);
    let inner = regular_polygon(0.0, 0.0, 1.0, 5);
    assert!(outer.intersects(&inner));
    assert!(inner.intersects(&outer));
    assert_eq!(outer.distance(&inner), 0.0);

    let far = regular_polygon(30.0, 0.0, 1.0, 4);
    assert!(!outer.intersects(&far));
    assert!(outer.distance(&far) > 18.0);
}

#[test]
fn test_polygons_found_through_index() {
    let tree = RTree::new()
        .insert(unit_square(), "square")
        .insert(regular_polygon(10.0, 10.0, 2.0, 6), "hexagon")
        .insert(point(0.0, 5.0), "point");

    // inside the hexagon's MBR but outside the ring
    assert_eq!(tree.search(&point(11.9, 11.6)).count(), 0);
    assert_eq!(tree.search(&point(11.0, 10.0)).count(), 1);

    let hits: Vec<&str> = tree
        .search(&line(-5.0, -5.0, 10.0, 10.0))
        .map(|e| *e.value())
        .collect();
    assert_eq!(hits.len(), 2);
    assert!(hits.contains(&"square"));
    assert!(hits.contains(&"hexagon"));
}
