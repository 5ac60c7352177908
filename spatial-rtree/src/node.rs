use std::sync::Arc;

use crate::entry::Entry;
use crate::geometry::{Bounded, Rectangle};
use crate::util;

/// A node of an [`RTree`](crate::RTree).
///
/// Nodes are immutable once built. A tree update creates new nodes along the
/// modified path and shares every other subtree with the previous version.
/// The stored `mbr` is always the exact bound of the node's children.
#[derive(Debug)]
pub enum Node<T> {
    /// Holds entries directly.
    Leaf {
        entries: Vec<Arc<Entry<T>>>,
        mbr: Rectangle,
    },
    /// Holds child nodes, all of the same height.
    Branch {
        children: Vec<Arc<Node<T>>>,
        mbr: Rectangle,
    },
}

impl<T> Node<T> {
    pub(crate) fn leaf(entries: Vec<Arc<Entry<T>>>) -> Self {
        debug_assert!(!entries.is_empty());
        let mbr = util::mbr(&entries).unwrap_or_else(empty_bounds);
        Node::Leaf { entries, mbr }
    }

    pub(crate) fn branch(children: Vec<Arc<Node<T>>>) -> Self {
        debug_assert!(!children.is_empty());
        let mbr = util::mbr(&children).unwrap_or_else(empty_bounds);
        Node::Branch { children, mbr }
    }

    /// Bounding rectangle of everything below this node.
    pub fn mbr(&self) -> Rectangle {
        match self {
            Node::Leaf { mbr, .. } | Node::Branch { mbr, .. } => *mbr,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf { .. })
    }

    /// Number of direct children (entries for a leaf).
    pub fn len(&self) -> usize {
        match self {
            Node::Leaf { entries, .. } => entries.len(),
            Node::Branch { children, .. } => children.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Entries of a leaf, empty for a branch.
    pub fn entries(&self) -> &[Arc<Entry<T>>] {
        match self {
            Node::Leaf { entries, .. } => entries,
            Node::Branch { .. } => &[],
        }
    }

    /// Children of a branch, empty for a leaf.
    pub fn children(&self) -> &[Arc<Node<T>>] {
        match self {
            Node::Leaf { .. } => &[],
            Node::Branch { children, .. } => children,
        }
    }

    /// Number of levels from this node down to its leaves, 1 for a leaf.
    pub fn height(&self) -> usize {
        let mut height = 1;
        let mut node = self;
        while let Node::Branch { children, .. } = node {
            match children.first() {
                Some(child) => node = child.as_ref(),
                None => break,
            }
            height += 1;
        }
        height
    }

    /// Appends every entry below this node to `out`, in pre-order.
    pub(crate) fn collect_entries(&self, out: &mut Vec<Arc<Entry<T>>>) {
        match self {
            Node::Leaf { entries, .. } => out.extend(entries.iter().cloned()),
            Node::Branch { children, .. } => {
                for child in children {
                    child.collect_entries(out);
                }
            }
        }
    }
}

impl<T> Bounded for Node<T> {
    fn mbr(&self) -> Rectangle {
        Node::mbr(self)
    }
}

fn empty_bounds() -> Rectangle {
    Rectangle::from_bounds(0.0, 0.0, 0.0, 0.0)
}
