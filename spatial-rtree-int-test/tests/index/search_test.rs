use spatial_rtree::RTree;
use spatial_rtree_int_test::test_util::{point, rectangle, run_test};

#[test]
fn test_no_false_negatives() {
    run_test(10, |mut ctx| {
        let (tree, geometries) = ctx.populated_tree(500);
        for (i, g) in geometries.iter().enumerate() {
            assert!(tree.search(g).any(|e| *e.value() == i), "entry {} ({}) not found", i, g);
        }
        Ok(())
    });
}

#[test]
fn test_search_equals_linear_scan() {
    run_test(11, |mut ctx| {
        let (tree, geometries) = ctx.populated_tree(400);
        for _ in 0..40 {
            let query = ctx.random_geometry();
            let mut found: Vec<usize> = tree.search(&query).map(|e| *e.value()).collect();
            found.sort();
            let expected: Vec<usize> = geometries
                .iter()
                .enumerate()
                .filter(|(_, g)| g.intersects(&query))
                .map(|(i, _)| i)
                .collect();
            assert_eq!(found, expected, "query {}", query);
        }
        Ok(())
    });
}

#[test]
fn test_search_within_equals_linear_scan() {
    run_test(12, |mut ctx| {
        let (tree, geometries) = ctx.populated_tree(400);
        for max_distance in [0.0, 5.0, 25.0, 100.0] {
            let query = ctx.random_geometry();
            let mut found: Vec<usize> = tree
                .search_within(&query, max_distance)
                .map(|e| *e.value())
                .collect();
            found.sort();
            let expected: Vec<usize> = geometries
                .iter()
                .enumerate()
                .filter(|(_, g)| query.distance(g) <= max_distance)
                .map(|(i, _)| i)
                .collect();
            assert_eq!(found, expected);
        }
        Ok(())
    });
}

#[test]
fn test_search_order_is_stable() {
    run_test(13, |mut ctx| {
        let (tree, _) = ctx.populated_tree(300);
        let query = rectangle(200.0, 200.0, 700.0, 700.0);
        let first: Vec<usize> = tree.search(&query).map(|e| *e.value()).collect();
        let again: Vec<usize> = tree.search(&query).map(|e| *e.value()).collect();
        let copy = tree.clone();
        let from_copy: Vec<usize> = copy.search(&query).map(|e| *e.value()).collect();
        assert_eq!(first, again);
        assert_eq!(first, from_copy);
        Ok(())
    });
}

#[test]
fn test_search_can_stop_early() {
    run_test(14, |mut ctx| {
        let (tree, _) = ctx.populated_tree(300);
        let everything = rectangle(-100.0, -100.0, 1100.0, 1100.0);
        let first_three: Vec<usize> = tree
            .search(&everything)
            .take(3)
            .map(|e| *e.value())
            .collect();
        let all: Vec<usize> = tree.search(&everything).map(|e| *e.value()).collect();
        assert_eq!(all.len(), 300);
        assert_eq!(first_three, all[..3].to_vec());

        let entries: Vec<usize> = tree.entries().map(|e| *e.value()).collect();
        assert_eq!(entries, all);
        Ok(())
    });
}

#[test]
fn test_empty_results_are_not_errors() {
    let tree: RTree<u8> = RTree::new();
    assert_eq!(tree.search(&point(0.0, 0.0)).count(), 0);
    assert_eq!(tree.search_within(&point(0.0, 0.0), 1e9).count(), 0);

    let tree = tree.insert(point(1.0, 1.0), 1);
    assert_eq!(tree.search(&point(2.0, 2.0)).count(), 0);
    assert_eq!(tree.search(&rectangle(2.0, 2.0, 3.0, 3.0)).count(), 0);
}
