use rand::rngs::StdRng;
use rand::SeedableRng;
use spatial_rtree::Geometry;
use spatial_rtree_int_test::test_util::{
    line, point, random_geometry, rectangle, regular_polygon, PRECISION,
};

/// Random geometries packed into a small area so that many pairs touch.
fn crowded(rng: &mut StdRng, count: usize) -> Vec<Geometry> {
    (0..count)
        .map(|_| {
            let g = random_geometry(rng);
            let mbr = g.mbr();
            // fold the coordinates into [0, 40) while keeping the shape
            let (dx, dy) = (mbr.x1() - mbr.x1() % 40.0, mbr.y1() - mbr.y1() % 40.0);
            translate(&g, -dx, -dy)
        })
        .collect()
}

fn translate(g: &Geometry, dx: f64, dy: f64) -> Geometry {
    match g {
        Geometry::Point(p) => point(p.x() + dx, p.y() + dy),
        Geometry::Line(l) => line(
            l.p1().x() + dx,
            l.p1().y() + dy,
            l.p2().x() + dx,
            l.p2().y() + dy,
        ),
        Geometry::Rectangle(r) => rectangle(r.x1() + dx, r.y1() + dy, r.x2() + dx, r.y2() + dy),
        Geometry::Polygon(p) => {
            let coordinates: Vec<f64> = p
                .points()
                .iter()
                .flat_map(|q| [q.x() + dx, q.y() + dy])
                .collect();
            spatial_rtree::Polygon::from_coordinates(&coordinates)
                .unwrap()
                .into()
        }
    }
}

#[test]
fn test_predicates_symmetric_and_consistent() {
    let mut rng = StdRng::seed_from_u64(101);
    let geometries = crowded(&mut rng, 120);
    let mut touching = 0;

    for a in &geometries {
        for b in &geometries {
            let hit = a.intersects(b);
            assert_eq!(hit, b.intersects(a), "{} / {}", a, b);

            let d = a.distance(b);
            assert!((d - b.distance(a)).abs() < PRECISION, "{} / {}", a, b);
            assert_eq!(d == 0.0, hit, "{} / {}", a, b);
            if hit {
                touching += 1;
            }
        }
    }
    // the diagonal alone contributes 120
    assert!(touching > 120);
}

#[test]
fn test_mbr_distance_is_lower_bound() {
    let mut rng = StdRng::seed_from_u64(202);
    let geometries = crowded(&mut rng, 80);
    for a in &geometries {
        for b in &geometries {
            assert!(a.distance_to_rectangle(&b.mbr()) <= a.distance(b) + PRECISION);
            if a.intersects(b) {
                assert!(a.intersects_rectangle(&b.mbr()));
            }
        }
    }
}

#[test]
fn test_every_kind_pair() {
    let kinds = [
        point(1.0, 1.0),
        line(0.0, 2.0, 2.0, 0.0),
        rectangle(0.5, 0.5, 1.5, 1.5),
        regular_polygon(1.0, 1.0, 1.0, 5),
    ];
    // all four share the point (1, 1)
    for a in &kinds {
        for b in &kinds {
            assert!(a.intersects(b), "{} / {}", a, b);
            assert_eq!(a.distance(b), 0.0);
        }
    }

    let far = [
        point(10.0, 10.0),
        line(10.0, 10.0, 12.0, 10.0),
        rectangle(10.0, 10.0, 11.0, 11.0),
        regular_polygon(11.0, 11.0, 1.0, 4),
    ];
    for a in &kinds {
        for b in &far {
            assert!(!a.intersects(b), "{} / {}", a, b);
            assert!(a.distance(b) > 0.0);
        }
    }
}
