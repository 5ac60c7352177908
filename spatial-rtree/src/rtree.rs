//! The persistent R-tree.

use std::fmt::{self, Display};
use std::sync::Arc;

use crate::context::Context;
use crate::entry::Entry;
use crate::geometry::{Bounded, Geometry, Rectangle};
use crate::node::Node;
use crate::search::{Nearest, Search};
use crate::util;

/// An immutable, height-balanced R-tree.
///
/// Every update returns a new tree and leaves `self` untouched. The new
/// version shares all unmodified subtrees with the old one, so keeping old
/// versions around is cheap and readers of an old version are never affected
/// by later updates.
///
/// # Examples
///
/// ```rust
/// use spatial_rtree::{geometries, RTree};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let empty = RTree::new();
/// let tree = empty
///     .insert(geometries::point(1.0, 1.0)?, "a")
///     .insert(geometries::rectangle(5.0, 5.0, 6.0, 6.0)?, "b");
///
/// assert_eq!(empty.size(), 0);
/// assert_eq!(tree.size(), 2);
///
/// let query = geometries::rectangle(0.0, 0.0, 2.0, 2.0)?.into();
/// let hits: Vec<_> = tree.search(&query).map(|e| *e.value()).collect();
/// assert_eq!(hits, vec!["a"]);
///
/// let origin = geometries::point(10.0, 10.0)?.into();
/// let (nearest, _) = tree.nearest(&origin, 1).next().unwrap();
/// assert_eq!(*nearest.value(), "b");
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct RTree<T> {
    root: Option<Arc<Node<T>>>,
    context: Context,
    size: usize,
}

/// Structural statistics of a tree version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RTreeStats {
    pub total_entries: usize,
    pub height: usize,
    pub node_count: usize,
    pub leaf_count: usize,
}

impl Display for RTreeStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "entries={} height={} nodes={} leaves={}",
            self.total_entries, self.height, self.node_count, self.leaf_count
        )
    }
}

struct Removal<T> {
    replacement: Option<Arc<Node<T>>>,
    orphans: Vec<Arc<Entry<T>>>,
    removed: usize,
}

impl<T> Clone for RTree<T> {
    fn clone(&self) -> Self {
        RTree {
            root: self.root.clone(),
            context: self.context,
            size: self.size,
        }
    }
}

impl<T> Default for RTree<T> {
    fn default() -> Self {
        RTree::create(Context::default())
    }
}

impl<T> RTree<T> {
    /// Creates an empty tree with the given context.
    pub fn create(context: Context) -> Self {
        RTree {
            root: None,
            context,
            size: 0,
        }
    }

    /// Creates an empty tree with the default context.
    pub fn new() -> Self {
        RTree::default()
    }

    pub fn root(&self) -> Option<&Arc<Node<T>>> {
        self.root.as_ref()
    }

    pub fn context(&self) -> &Context {
        &self.context
    }

    /// Number of entries.
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Number of levels, 0 for an empty tree and 1 for a single leaf.
    pub fn depth(&self) -> usize {
        self.root.as_ref().map_or(0, |root| root.height())
    }

    /// Bounding rectangle of all entries, `None` for an empty tree.
    pub fn mbr(&self) -> Option<Rectangle> {
        self.root.as_ref().map(|root| root.mbr())
    }

    /// Walks the whole tree and counts its nodes.
    pub fn stats(&self) -> RTreeStats {
        let mut stats = RTreeStats {
            total_entries: self.size,
            height: self.depth(),
            ..RTreeStats::default()
        };
        let mut stack: Vec<&Node<T>> = self.root.iter().map(|root| root.as_ref()).collect();
        while let Some(node) = stack.pop() {
            stats.node_count += 1;
            match node {
                Node::Leaf { .. } => stats.leaf_count += 1,
                Node::Branch { children, .. } => {
                    stack.extend(children.iter().map(|child| child.as_ref()))
                }
            }
        }
        stats
    }

    /// Returns a new tree with an entry for `geometry` and `value` added.
    pub fn insert(&self, geometry: impl Into<Geometry>, value: T) -> RTree<T> {
        self.insert_entry(Arc::new(Entry::new(geometry, value)))
    }

    /// Returns a new tree with `entry` added. The entry is shared, not copied.
    pub fn insert_entry(&self, entry: Arc<Entry<T>>) -> RTree<T> {
        let root = match &self.root {
            None => Arc::new(Node::leaf(vec![entry])),
            Some(root) => {
                let mut nodes = insert_into(root, entry, &self.context);
                if nodes.len() == 1 {
                    nodes.remove(0)
                } else {
                    let root = Arc::new(Node::branch(nodes));
                    log::debug!("Root split, tree height is now {}", root.height());
                    root
                }
            }
        };

        RTree {
            root: Some(root),
            context: self.context,
            size: self.size + 1,
        }
    }

    /// Returns a new tree with every entry of `entries` added in order.
    pub fn insert_all<I>(&self, entries: I) -> RTree<T>
    where
        I: IntoIterator<Item = Arc<Entry<T>>>,
    {
        entries
            .into_iter()
            .fold(self.clone(), |tree, entry| tree.insert_entry(entry))
    }

    /// Returns a new tree without one entry equal to `geometry` and `value`.
    ///
    /// If there is no such entry, the returned tree shares the same root as
    /// `self`.
    pub fn delete(&self, geometry: &Geometry, value: &T) -> RTree<T>
    where
        T: PartialEq,
    {
        self.delete_matching(geometry, value, false)
    }

    /// Returns a new tree without any entry equal to `geometry` and `value`.
    pub fn delete_all(&self, geometry: &Geometry, value: &T) -> RTree<T>
    where
        T: PartialEq,
    {
        self.delete_matching(geometry, value, true)
    }

    /// Deletes one match for each of `entries`, in order.
    pub fn delete_entries<'e, I>(&self, entries: I) -> RTree<T>
    where
        T: PartialEq + 'e,
        I: IntoIterator<Item = &'e Entry<T>>,
    {
        entries.into_iter().fold(self.clone(), |tree, entry| {
            tree.delete(entry.geometry(), entry.value())
        })
    }

    fn delete_matching(&self, geometry: &Geometry, value: &T, all: bool) -> RTree<T>
    where
        T: PartialEq,
    {
        let Some(root) = &self.root else {
            return self.clone();
        };
        let target = geometry.mbr();
        let Some(removal) = delete_from(root, geometry, value, &target, all, &self.context, true)
        else {
            return self.clone();
        };

        let mut new_root = removal.replacement;
        while let Some(node) = &new_root {
            match node.as_ref() {
                Node::Branch { children, .. } if children.len() == 1 => {
                    log::debug!("Collapsing single-child root");
                    new_root = Some(children[0].clone());
                }
                _ => break,
            }
        }

        let tree = RTree {
            root: new_root,
            context: self.context,
            size: self.size - removal.removed - removal.orphans.len(),
        };
        if removal.orphans.is_empty() {
            return tree;
        }

        log::debug!(
            "Condensed tree, re-inserting {} entries from underfull nodes",
            removal.orphans.len()
        );
        tree.insert_all(removal.orphans)
    }

    /// Lazily finds every entry whose geometry intersects `query`.
    pub fn search(&self, query: &Geometry) -> Search<'_, T> {
        Search::intersecting(self.root.as_ref(), query.clone())
    }

    /// Lazily finds every entry within `max_distance` of `query`.
    pub fn search_within(&self, query: &Geometry, max_distance: f64) -> Search<'_, T> {
        Search::within(self.root.as_ref(), query.clone(), max_distance)
    }

    /// Lazily yields the `k` entries nearest to `query`, closest first.
    pub fn nearest(&self, query: &Geometry, k: usize) -> Nearest<'_, T> {
        Nearest::new(self.root.as_ref(), query.clone(), f64::INFINITY, k)
    }

    /// Like [`nearest`](RTree::nearest), skipping entries further than
    /// `max_distance`.
    pub fn nearest_within(&self, query: &Geometry, max_distance: f64, k: usize) -> Nearest<'_, T> {
        Nearest::new(self.root.as_ref(), query.clone(), max_distance, k)
    }

    /// Every entry of the tree, in pre-order.
    pub fn entries(&self) -> Search<'_, T> {
        Search::all(self.root.as_ref())
    }
}

/// Index of the child needing the least enlargement to cover `mbr`, then
/// the one with the smallest resulting area, then the first.
fn choose_subtree<T>(children: &[Arc<Node<T>>], mbr: &Rectangle) -> usize {
    let mut best = 0;
    let mut best_enlargement = f64::INFINITY;
    let mut best_area = f64::INFINITY;

    for (i, child) in children.iter().enumerate() {
        let enlargement = child.mbr().enlargement(mbr);
        let area = child.mbr().union(mbr).area();

        if enlargement < best_enlargement || (enlargement == best_enlargement && area < best_area) {
            best_enlargement = enlargement;
            best_area = area;
            best = i;
        }
    }
    best
}

/// Inserts below `node`, returning its replacement: one node, or two when
/// it overflowed and was split.
fn insert_into<T>(
    node: &Arc<Node<T>>,
    entry: Arc<Entry<T>>,
    context: &Context,
) -> Vec<Arc<Node<T>>> {
    match node.as_ref() {
        Node::Leaf { entries, .. } => {
            let entries = util::add(entries, entry);
            if entries.len() <= context.max_children() {
                return vec![Arc::new(Node::leaf(entries))];
            }
            let (first, second) = context
                .split_strategy()
                .split(entries, context.min_children());
            vec![Arc::new(Node::leaf(first)), Arc::new(Node::leaf(second))]
        }
        Node::Branch { children, .. } => {
            let index = choose_subtree(children, &entry.mbr());
            let replacements = insert_into(&children[index], entry, context);
            let children = util::replace(children, index, replacements);
            if children.len() <= context.max_children() {
                return vec![Arc::new(Node::branch(children))];
            }
            let (first, second) = context
                .split_strategy()
                .split(children, context.min_children());
            vec![Arc::new(Node::branch(first)), Arc::new(Node::branch(second))]
        }
    }
}

/// Removes matching entries below `node`.
///
/// Returns `None` when nothing matched, so callers can keep sharing the
/// original node. A non-root node left with fewer than `min_children`
/// children is dissolved: it has no replacement and its remaining entries
/// come back as orphans.
fn delete_from<T: PartialEq>(
    node: &Arc<Node<T>>,
    geometry: &Geometry,
    value: &T,
    target: &Rectangle,
    all: bool,
    context: &Context,
    is_root: bool,
) -> Option<Removal<T>> {
    let mut orphans = Vec::new();
    let mut removed = 0;

    let survivors = match node.as_ref() {
        Node::Leaf { entries, .. } => {
            let mut kept = Vec::with_capacity(entries.len());
            for entry in entries {
                if (all || removed == 0) && entry.matches(geometry, value) {
                    removed += 1;
                } else {
                    kept.push(entry.clone());
                }
            }
            if removed == 0 {
                return None;
            }
            Survivors::Entries(kept)
        }
        Node::Branch { children, .. } => {
            let mut kept = Vec::with_capacity(children.len());
            for child in children {
                if (all || removed == 0) && child.mbr().contains(target) {
                    if let Some(removal) =
                        delete_from(child, geometry, value, target, all, context, false)
                    {
                        removed += removal.removed;
                        orphans.extend(removal.orphans);
                        kept.extend(removal.replacement);
                        continue;
                    }
                }
                kept.push(child.clone());
            }
            if removed == 0 {
                return None;
            }
            Survivors::Children(kept)
        }
    };

    let len = survivors.len();
    let replacement = if len == 0 {
        None
    } else if !is_root && len < context.min_children() {
        survivors.collect_into(&mut orphans);
        None
    } else {
        Some(Arc::new(survivors.into_node()))
    };

    Some(Removal {
        replacement,
        orphans,
        removed,
    })
}

enum Survivors<T> {
    Entries(Vec<Arc<Entry<T>>>),
    Children(Vec<Arc<Node<T>>>),
}

impl<T> Survivors<T> {
    fn len(&self) -> usize {
        match self {
            Survivors::Entries(entries) => entries.len(),
            Survivors::Children(children) => children.len(),
        }
    }

    fn collect_into(self, out: &mut Vec<Arc<Entry<T>>>) {
        match self {
            Survivors::Entries(entries) => out.extend(entries),
            Survivors::Children(children) => {
                for child in children {
                    child.collect_entries(out);
                }
            }
        }
    }

    fn into_node(self) -> Node<T> {
        match self {
            Survivors::Entries(entries) => Node::leaf(entries),
            Survivors::Children(children) => Node::branch(children),
        }
    }
}
