use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use spatial_rtree::{
    Context, Geometry, Node, Point, Polygon, RTree, Rectangle, SpatialResult, SplitStrategy,
};
use std::time::Instant;

pub const PRECISION: f64 = 0.00001;

pub const STRATEGIES: [SplitStrategy; 3] = [
    SplitStrategy::Quadratic,
    SplitStrategy::Linear,
    SplitStrategy::RStar,
];

/// Everything a test needs: a tree configuration and a seeded generator.
pub struct TestContext {
    context: Context,
    rng: StdRng,
}

impl TestContext {
    pub fn context(&self) -> Context {
        self.context
    }

    pub fn empty_tree<T>(&self) -> RTree<T> {
        RTree::create(self.context)
    }

    pub fn rng(&mut self) -> &mut StdRng {
        &mut self.rng
    }

    pub fn random_point(&mut self) -> Geometry {
        random_point(&mut self.rng)
    }

    pub fn random_rectangle(&mut self) -> Geometry {
        random_rectangle(&mut self.rng)
    }

    pub fn random_geometry(&mut self) -> Geometry {
        random_geometry(&mut self.rng)
    }

    /// A tree with `count` random geometries, the i-th holding value `i`,
    /// along with the inserted geometries.
    pub fn populated_tree(&mut self, count: usize) -> (RTree<usize>, Vec<Geometry>) {
        let mut tree = self.empty_tree();
        let mut geometries = Vec::with_capacity(count);
        for i in 0..count {
            let geometry = self.random_geometry();
            tree = tree.insert(geometry.clone(), i);
            geometries.push(geometry);
        }
        (tree, geometries)
    }
}

pub fn create_test_context(strategy: SplitStrategy, seed: u64) -> SpatialResult<TestContext> {
    let context = Context::builder()
        .max_children(4)
        .split_strategy(strategy)
        .build()?;
    Ok(TestContext {
        context,
        rng: StdRng::seed_from_u64(seed),
    })
}

/// Runs `test` once per split strategy with the same seed.
pub fn run_test<T>(seed: u64, test: T)
where
    T: Fn(TestContext) -> SpatialResult<()>,
{
    for strategy in STRATEGIES {
        let start = Instant::now();
        let result = create_test_context(strategy, seed).and_then(&test);
        if let Err(e) = result {
            panic!("Test failed with {:?} split: {}", strategy, e);
        }
        log::debug!("{:?} run finished in {:?}", strategy, start.elapsed());
    }
}

pub fn random_point(rng: &mut StdRng) -> Geometry {
    point(rng.gen_range(0.0..1000.0), rng.gen_range(0.0..1000.0))
}

pub fn random_rectangle(rng: &mut StdRng) -> Geometry {
    let x = rng.gen_range(0.0..1000.0);
    let y = rng.gen_range(0.0..1000.0);
    rectangle(x, y, x + rng.gen_range(0.0..20.0), y + rng.gen_range(0.0..20.0))
}

/// A random point, segment, rectangle or convex polygon.
pub fn random_geometry(rng: &mut StdRng) -> Geometry {
    let x = rng.gen_range(0.0..1000.0);
    let y = rng.gen_range(0.0..1000.0);
    let size = rng.gen_range(0.5..20.0);
    match rng.gen_range(0..4) {
        0 => point(x, y),
        1 => line(x, y, x + rng.gen_range(-size..size), y + rng.gen_range(-size..size)),
        2 => rectangle(x, y, x + size, y + rng.gen_range(0.0..size)),
        _ => regular_polygon(x, y, size, rng.gen_range(3..8)),
    }
}

pub fn point(x: f64, y: f64) -> Geometry {
    Point::new(x, y).unwrap().into()
}

pub fn line(x1: f64, y1: f64, x2: f64, y2: f64) -> Geometry {
    spatial_rtree::Line::new(x1, y1, x2, y2).unwrap().into()
}

pub fn rectangle(x1: f64, y1: f64, x2: f64, y2: f64) -> Geometry {
    Rectangle::new(x1, y1, x2, y2).unwrap().into()
}

/// A convex polygon with `sides` vertices on a circle.
pub fn regular_polygon(cx: f64, cy: f64, radius: f64, sides: usize) -> Geometry {
    let coordinates: Vec<f64> = (0..sides)
        .flat_map(|i| {
            let angle = std::f64::consts::TAU * i as f64 / sides as f64;
            [cx + radius * angle.cos(), cy + radius * angle.sin()]
        })
        .collect();
    Polygon::from_coordinates(&coordinates).unwrap().into()
}

/// Checks the structural invariants of a tree and returns its entry count.
///
/// Verified: every stored MBR is the exact bound of its children, every
/// non-root node holds between `min_children` and `max_children` children,
/// all leaves are at the same depth, a root branch has at least two
/// children, and the entry count matches `size()`.
pub fn check_invariants<T>(tree: &RTree<T>) -> Result<usize, String> {
    let Some(root) = tree.root() else {
        return if tree.size() == 0 {
            Ok(0)
        } else {
            Err(format!("empty root but size {}", tree.size()))
        };
    };
    if !root.is_leaf() && root.len() < 2 {
        return Err("root branch with a single child".to_string());
    }

    let context = tree.context();
    let mut leaf_depth = None;
    let mut stack: Vec<(&Node<T>, usize)> = vec![(root.as_ref(), 1)];
    let mut count = 0;

    while let Some((node, depth)) = stack.pop() {
        let is_root = depth == 1;
        if node.len() > context.max_children() {
            return Err(format!("overfull node with {} children", node.len()));
        }
        if !is_root && node.len() < context.min_children() {
            return Err(format!("underfull node with {} children", node.len()));
        }

        let bound = match node {
            Node::Leaf { entries, .. } => {
                match leaf_depth {
                    None => leaf_depth = Some(depth),
                    Some(d) if d != depth => {
                        return Err(format!("leaves at depth {} and {}", d, depth))
                    }
                    Some(_) => {}
                }
                count += entries.len();
                spatial_rtree::util::mbr(entries)
            }
            Node::Branch { children, .. } => {
                stack.extend(children.iter().map(|child| (child.as_ref(), depth + 1)));
                spatial_rtree::util::mbr(children)
            }
        };
        if bound != Some(node.mbr()) {
            return Err(format!("stale MBR {} (children bound {:?})", node.mbr(), bound));
        }
    }

    if leaf_depth != Some(tree.depth()) {
        return Err(format!("depth() {} but leaves at {:?}", tree.depth(), leaf_depth));
    }
    if count != tree.size() {
        return Err(format!("size() {} but {} entries stored", tree.size(), count));
    }
    Ok(count)
}
