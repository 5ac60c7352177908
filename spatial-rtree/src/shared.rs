use parking_lot::{RwLock, RwLockUpgradableReadGuard};

use crate::context::Context;
use crate::geometry::Geometry;
use crate::rtree::RTree;

/// A "current index" cell shared between threads.
///
/// Readers take a [`snapshot`](SharedRTree::snapshot) and query it without
/// holding any lock. Writers build the next version while other readers keep
/// reading, then publish it by replacing the current tree. Writers are
/// serialized, so no update is lost.
///
/// ```rust
/// use std::sync::Arc;
/// use std::thread;
/// use spatial_rtree::{geometries, SharedRTree};
///
/// let shared = Arc::new(SharedRTree::default());
/// let handles: Vec<_> = (0..4)
///     .map(|i| {
///         let shared = shared.clone();
///         thread::spawn(move || {
///             shared.insert(geometries::point(i as f64, 0.0).unwrap(), i);
///         })
///     })
///     .collect();
/// for handle in handles {
///     handle.join().unwrap();
/// }
/// assert_eq!(shared.snapshot().size(), 4);
/// ```
pub struct SharedRTree<T> {
    current: RwLock<RTree<T>>,
}

impl<T> SharedRTree<T> {
    pub fn new(tree: RTree<T>) -> Self {
        SharedRTree {
            current: RwLock::new(tree),
        }
    }

    /// Creates an empty shared tree with the given context.
    pub fn create(context: Context) -> Self {
        SharedRTree::new(RTree::create(context))
    }

    /// The current version. Later writes never affect it.
    pub fn snapshot(&self) -> RTree<T> {
        self.current.read().clone()
    }

    /// Computes the next version from the current one and publishes it,
    /// returning the published version.
    pub fn update<F>(&self, f: F) -> RTree<T>
    where
        F: FnOnce(&RTree<T>) -> RTree<T>,
    {
        let current = self.current.upgradable_read();
        let next = f(&*current);
        let mut current = RwLockUpgradableReadGuard::upgrade(current);
        *current = next.clone();
        next
    }

    pub fn insert(&self, geometry: impl Into<Geometry>, value: T) -> RTree<T> {
        let geometry = geometry.into();
        self.update(|tree| tree.insert(geometry, value))
    }

    pub fn delete(&self, geometry: &Geometry, value: &T) -> RTree<T>
    where
        T: PartialEq,
    {
        self.update(|tree| tree.delete(geometry, value))
    }

    /// Publishes `tree` as the current version, returning the previous one.
    pub fn replace(&self, tree: RTree<T>) -> RTree<T> {
        std::mem::replace(&mut *self.current.write(), tree)
    }
}

impl<T> Default for SharedRTree<T> {
    fn default() -> Self {
        SharedRTree::new(RTree::default())
    }
}

impl<T> std::fmt::Debug for SharedRTree<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let tree = self.current.read();
        f.debug_struct("SharedRTree")
            .field("size", &tree.size())
            .field("depth", &tree.depth())
            .finish()
    }
}
