//! Lazy query iterators over a tree snapshot.
//!
//! Both iterators borrow the tree they were created from. Nodes are only
//! visited when the caller pulls the next item, so dropping an iterator is
//! enough to stop a query.

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::sync::Arc;

use crate::entry::Entry;
use crate::geometry::{Geometry, Rectangle};
use crate::node::Node;

#[derive(Debug, Clone)]
enum Filter {
    All,
    Intersects(Geometry),
    WithinDistance(Geometry, f64),
}

impl Filter {
    fn accepts_node(&self, mbr: &Rectangle) -> bool {
        match self {
            Filter::All => true,
            Filter::Intersects(query) => query.intersects_rectangle(mbr),
            Filter::WithinDistance(query, max_distance) => {
                query.distance_to_rectangle(mbr) <= *max_distance
            }
        }
    }

    fn accepts_entry<T>(&self, entry: &Entry<T>) -> bool {
        match self {
            Filter::All => true,
            Filter::Intersects(query) => query.intersects(entry.geometry()),
            Filter::WithinDistance(query, max_distance) => {
                query.distance(entry.geometry()) <= *max_distance
            }
        }
    }
}

/// Depth-first range search, yielding entries in stored pre-order.
///
/// Created by [`RTree::search`](crate::RTree::search),
/// [`RTree::search_within`](crate::RTree::search_within) and
/// [`RTree::entries`](crate::RTree::entries).
pub struct Search<'a, T> {
    filter: Filter,
    stack: Vec<&'a Node<T>>,
    leaf: std::slice::Iter<'a, Arc<Entry<T>>>,
}

impl<'a, T> Search<'a, T> {
    fn new(root: Option<&'a Arc<Node<T>>>, filter: Filter) -> Self {
        let stack = root
            .map(|node| node.as_ref())
            .filter(|node| filter.accepts_node(&node.mbr()))
            .into_iter()
            .collect();
        Search {
            filter,
            stack,
            leaf: <&[Arc<Entry<T>>]>::default().iter(),
        }
    }

    pub(crate) fn all(root: Option<&'a Arc<Node<T>>>) -> Self {
        Search::new(root, Filter::All)
    }

    pub(crate) fn intersecting(root: Option<&'a Arc<Node<T>>>, query: Geometry) -> Self {
        Search::new(root, Filter::Intersects(query))
    }

    pub(crate) fn within(
        root: Option<&'a Arc<Node<T>>>,
        query: Geometry,
        max_distance: f64,
    ) -> Self {
        Search::new(root, Filter::WithinDistance(query, max_distance))
    }
}

impl<'a, T> Iterator for Search<'a, T> {
    type Item = &'a Arc<Entry<T>>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            for entry in self.leaf.by_ref() {
                if self.filter.accepts_entry(entry) {
                    return Some(entry);
                }
            }

            match self.stack.pop()? {
                Node::Leaf { entries, .. } => self.leaf = entries.iter(),
                Node::Branch { children, .. } => {
                    // reversed so the first child is visited first
                    for child in children.iter().rev() {
                        if self.filter.accepts_node(&child.mbr()) {
                            self.stack.push(child.as_ref());
                        }
                    }
                }
            }
        }
    }
}

enum Candidate<'a, T> {
    Node(&'a Node<T>),
    Entry(&'a Arc<Entry<T>>),
}

struct Queued<'a, T> {
    distance: f64,
    sequence: u64,
    candidate: Candidate<'a, T>,
}

impl<T> PartialEq for Queued<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<T> Eq for Queued<'_, T> {}

impl<T> PartialOrd for Queued<'_, T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Queued<'_, T> {
    // reversed: BinaryHeap pops the smallest distance, then the oldest
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .distance
            .total_cmp(&self.distance)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

/// Incremental nearest-neighbour search.
///
/// Yields `(entry, distance)` pairs in ascending distance, at most `k` of
/// them. Nodes are queued by the distance to their MBR, which never exceeds
/// the distance to anything inside, so an entry popped from the queue is
/// closer than anything still unexplored. Equal distances come out in the
/// order they were discovered.
///
/// Created by [`RTree::nearest`](crate::RTree::nearest) and
/// [`RTree::nearest_within`](crate::RTree::nearest_within).
pub struct Nearest<'a, T> {
    query: Geometry,
    max_distance: f64,
    remaining: usize,
    queue: BinaryHeap<Queued<'a, T>>,
    sequence: u64,
}

impl<'a, T> Nearest<'a, T> {
    pub(crate) fn new(
        root: Option<&'a Arc<Node<T>>>,
        query: Geometry,
        max_distance: f64,
        k: usize,
    ) -> Self {
        let mut nearest = Nearest {
            query,
            max_distance,
            remaining: k,
            queue: BinaryHeap::new(),
            sequence: 0,
        };
        if let Some(root) = root {
            if k > 0 {
                let distance = nearest.query.distance_to_rectangle(&root.mbr());
                nearest.enqueue(distance, Candidate::Node(root.as_ref()));
            }
        }
        nearest
    }

    fn enqueue(&mut self, distance: f64, candidate: Candidate<'a, T>) {
        if distance <= self.max_distance {
            self.queue.push(Queued {
                distance,
                sequence: self.sequence,
                candidate,
            });
            self.sequence += 1;
        }
    }
}

impl<'a, T> Iterator for Nearest<'a, T> {
    type Item = (&'a Arc<Entry<T>>, f64);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        while let Some(Queued {
            distance,
            candidate,
            ..
        }) = self.queue.pop()
        {
            match candidate {
                Candidate::Entry(entry) => {
                    self.remaining -= 1;
                    if self.remaining == 0 {
                        self.queue.clear();
                    }
                    return Some((entry, distance));
                }
                Candidate::Node(Node::Leaf { entries, .. }) => {
                    for entry in entries {
                        let distance = self.query.distance(entry.geometry());
                        self.enqueue(distance, Candidate::Entry(entry));
                    }
                }
                Candidate::Node(Node::Branch { children, .. }) => {
                    for child in children {
                        let distance = self.query.distance_to_rectangle(&child.mbr());
                        self.enqueue(distance, Candidate::Node(child.as_ref()));
                    }
                }
            }
        }
        None
    }
}
