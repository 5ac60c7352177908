use spatial_rtree::{SpatialResult, SplitStrategy};
use spatial_rtree_int_test::test_util::{check_invariants, create_test_context, point};

fn main() -> SpatialResult<()> {
    colog::init();
    println!("Starting stress test...");

    let count = 200_000;
    for strategy in [SplitStrategy::Quadratic, SplitStrategy::Linear, SplitStrategy::RStar] {
        let mut ctx = create_test_context(strategy, 2024)?;

        let start = std::time::Instant::now();
        let (tree, geometries) = ctx.populated_tree(count);
        println!("{:?}: inserted {} entries in {:?}", strategy, count, start.elapsed());
        println!("{:?}: {}", strategy, tree.stats());

        let start = std::time::Instant::now();
        let hits: usize = geometries
            .iter()
            .take(10_000)
            .map(|g| tree.search(g).count())
            .sum();
        println!(
            "{:?}: 10000 searches matched {} entries in {:?}",
            strategy,
            hits,
            start.elapsed()
        );

        let start = std::time::Instant::now();
        let query = point(500.0, 500.0);
        let nearest = tree.nearest(&query, 1000).count();
        println!("{:?}: found {} nearest in {:?}", strategy, nearest, start.elapsed());

        let start = std::time::Instant::now();
        let half = geometries
            .iter()
            .enumerate()
            .take(count / 2)
            .fold(tree, |tree, (i, g)| tree.delete(g, &i));
        println!("{:?}: deleted {} entries in {:?}", strategy, count / 2, start.elapsed());

        if let Err(e) = check_invariants(&half) {
            println!("{:?}: invariant violated: {}", strategy, e);
        }
    }
    Ok(())
}
