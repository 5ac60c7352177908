use spatial_rtree::RTree;
use spatial_rtree_int_test::test_util::{point, run_test};

#[test]
fn test_nearest_matches_brute_force() {
    run_test(20, |mut ctx| {
        let (tree, geometries) = ctx.populated_tree(400);
        for k in [1, 5, 25, 400, 1000] {
            let query = ctx.random_geometry();
            let found: Vec<f64> = tree.nearest(&query, k).map(|(_, d)| d).collect();

            let mut expected: Vec<f64> = geometries.iter().map(|g| query.distance(g)).collect();
            expected.sort_by(f64::total_cmp);
            expected.truncate(k);
            assert_eq!(found, expected, "k = {}", k);
        }
        Ok(())
    });
}

#[test]
fn test_reported_distance_is_exact() {
    run_test(21, |mut ctx| {
        let (tree, _) = ctx.populated_tree(200);
        let query = ctx.random_point();
        for (entry, distance) in tree.nearest(&query, 50) {
            assert_eq!(distance, query.distance(entry.geometry()));
        }
        Ok(())
    });
}

#[test]
fn test_nearest_within() {
    run_test(22, |mut ctx| {
        let (tree, geometries) = ctx.populated_tree(300);
        let query = ctx.random_point();
        let found: Vec<usize> = tree
            .nearest_within(&query, 80.0, 1000)
            .map(|(e, _)| *e.value())
            .collect();
        let within = geometries
            .iter()
            .filter(|g| query.distance(g) <= 80.0)
            .count();
        assert_eq!(found.len(), within);

        let limited = tree.nearest_within(&query, 80.0, 3).count();
        assert_eq!(limited, within.min(3));
        Ok(())
    });
}

#[test]
fn test_nearest_is_deterministic_with_ties() {
    let mut tree = RTree::new();
    // ring of points, all at distance 5 from the origin
    for (i, (x, y)) in [(5.0, 0.0), (0.0, 5.0), (-5.0, 0.0), (0.0, -5.0), (3.0, 4.0), (-4.0, 3.0)]
        .into_iter()
        .enumerate()
    {
        tree = tree.insert(point(x, y), i);
    }
    let origin = point(0.0, 0.0);
    let first: Vec<usize> = tree.nearest(&origin, 6).map(|(e, _)| *e.value()).collect();
    let second: Vec<usize> = tree.nearest(&origin, 6).map(|(e, _)| *e.value()).collect();
    assert_eq!(first, second);
    assert_eq!(first.len(), 6);
    assert!(tree.nearest(&origin, 6).all(|(_, d)| d == 5.0));
}

#[test]
fn test_nearest_empty_and_zero() {
    let tree: RTree<u8> = RTree::new();
    assert_eq!(tree.nearest(&point(0.0, 0.0), 10).count(), 0);

    let tree = tree.insert(point(0.0, 0.0), 1);
    assert_eq!(tree.nearest(&point(0.0, 0.0), 0).count(), 0);
    assert_eq!(tree.nearest(&point(9.0, 9.0), 10).count(), 1);
}
