//! Copy-on-write helpers over immutable sequences.
//!
//! Node child lists are never modified once a node is reachable from a tree,
//! so every change produces a fresh vector.

use crate::geometry::{Bounded, Rectangle};

/// Returns a copy of `list` with `element` appended.
pub fn add<I: Clone>(list: &[I], element: I) -> Vec<I> {
    let mut result = Vec::with_capacity(list.len() + 1);
    result.extend_from_slice(list);
    result.push(element);
    result
}

/// Returns a copy of `list` where the element at `index` is replaced by
/// `replacements` (which may be empty or hold several elements).
pub fn replace<I: Clone>(list: &[I], index: usize, replacements: Vec<I>) -> Vec<I> {
    let mut result = Vec::with_capacity(list.len() + replacements.len());
    result.extend_from_slice(&list[..index]);
    result.extend(replacements);
    result.extend_from_slice(&list[index + 1..]);
    result
}

/// Minimum bounding rectangle of all items, `None` for an empty slice.
pub fn mbr<B: Bounded>(items: &[B]) -> Option<Rectangle> {
    items
        .iter()
        .map(Bounded::mbr)
        .reduce(|acc, r| acc.union(&r))
}
