use rand::seq::SliceRandom;
use rand::Rng;
use spatial_rtree::{Context, Entry, RTree, SpatialError};
use spatial_rtree_int_test::test_util::{check_invariants, point, run_test};
use std::sync::Arc;

#[test]
fn test_insert_then_delete_all_but_one() {
    run_test(1, |mut ctx| {
        let (mut tree, geometries) = ctx.populated_tree(100);
        assert_eq!(check_invariants(&tree), Ok(100));

        let mut order: Vec<usize> = (0..100).collect();
        order.shuffle(ctx.rng());
        let survivor = order.pop().unwrap();

        for i in order {
            tree = tree.delete(&geometries[i], &i);
        }
        assert_eq!(tree.size(), 1);
        assert_eq!(check_invariants(&tree), Ok(1));

        let found: Vec<usize> = tree.search(&geometries[survivor]).map(|e| *e.value()).collect();
        assert_eq!(found, vec![survivor]);
        Ok(())
    });
}

#[test]
fn test_interleaved_inserts_and_deletes() {
    run_test(2, |mut ctx| {
        let mut tree = ctx.empty_tree();
        let mut live = Vec::new();
        let mut next_value = 0usize;

        for round in 0..1500 {
            if live.is_empty() || ctx.rng().gen_bool(0.6) {
                let g = ctx.random_geometry();
                tree = tree.insert(g.clone(), next_value);
                live.push((g, next_value));
                next_value += 1;
            } else {
                let index = ctx.rng().gen_range(0..live.len());
                let (g, value) = live.swap_remove(index);
                tree = tree.delete(&g, &value);
                assert!(tree.search(&g).all(|e| *e.value() != value));
            }

            if round % 50 == 0 {
                assert_eq!(check_invariants(&tree), Ok(live.len()));
            }
        }

        assert_eq!(check_invariants(&tree), Ok(live.len()));
        for (g, value) in &live {
            assert!(tree.search(g).any(|e| e.value() == value), "lost entry {}", value);
        }
        Ok(())
    });
}

#[test]
fn test_old_versions_survive_updates() {
    run_test(3, |mut ctx| {
        let (full, geometries) = ctx.populated_tree(60);
        let mut versions = vec![full.clone()];
        let mut tree = full.clone();
        for (i, g) in geometries.iter().enumerate().take(40) {
            tree = tree.delete(g, &i);
            versions.push(tree.clone());
        }

        for (deleted, version) in versions.iter().enumerate() {
            assert_eq!(version.size(), 60 - deleted);
            assert_eq!(check_invariants(version), Ok(60 - deleted));
        }
        for (i, g) in geometries.iter().enumerate() {
            assert!(full.search(g).any(|e| *e.value() == i));
        }
        Ok(())
    });
}

#[test]
fn test_delete_absent_shares_root() {
    run_test(4, |mut ctx| {
        let (tree, geometries) = ctx.populated_tree(30);
        let unchanged = tree.delete(&geometries[0], &999);
        assert!(Arc::ptr_eq(tree.root().unwrap(), unchanged.root().unwrap()));

        let unchanged = tree.delete(&point(-50.0, -50.0), &0);
        assert!(Arc::ptr_eq(tree.root().unwrap(), unchanged.root().unwrap()));
        assert_eq!(unchanged.size(), 30);
        Ok(())
    });
}

#[test]
fn test_duplicates() {
    run_test(5, |ctx| {
        let g = point(7.0, 7.0);
        let mut tree = ctx.empty_tree();
        for _ in 0..9 {
            tree = tree.insert(g.clone(), "dup");
        }
        tree = tree.insert(g.clone(), "other");
        assert_eq!(check_invariants(&tree), Ok(10));

        let fewer = tree.delete(&g, &"dup");
        assert_eq!(fewer.size(), 9);
        assert_eq!(check_invariants(&fewer), Ok(9));

        let only_other = tree.delete_all(&g, &"dup");
        let values: Vec<&str> = only_other.search(&g).map(|e| *e.value()).collect();
        assert_eq!(values, vec!["other"]);
        assert_eq!(check_invariants(&only_other), Ok(1));
        Ok(())
    });
}

#[test]
fn test_bulk_insert_and_delete() {
    run_test(6, |mut ctx| {
        let entries: Vec<Arc<Entry<usize>>> = (0..200)
            .map(|i| Arc::new(Entry::new(ctx.random_geometry(), i)))
            .collect();
        let tree = ctx.empty_tree().insert_all(entries.iter().cloned());
        assert_eq!(check_invariants(&tree), Ok(200));

        let tree = tree.delete_entries(entries.iter().step_by(2).map(|e| &**e));
        assert_eq!(check_invariants(&tree), Ok(100));

        let mut values: Vec<usize> = tree.entries().map(|e| *e.value()).collect();
        values.sort();
        assert_eq!(values, (0..200).filter(|i| i % 2 == 1).collect::<Vec<_>>());
        Ok(())
    });
}

#[test]
fn test_wide_nodes() -> Result<(), SpatialError> {
    let context = Context::builder().max_children(32).star().build()?;
    let tree = (0..2000).fold(RTree::create(context), |tree, i| {
        tree.insert(point((i % 50) as f64, (i / 50) as f64), i)
    });
    assert_eq!(check_invariants(&tree), Ok(2000));
    assert!(tree.depth() <= 4);

    let stats = tree.stats();
    assert_eq!(stats.total_entries, 2000);
    assert!(stats.leaf_count >= 2000 / 32);
    Ok(())
}
