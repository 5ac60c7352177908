use crate::geometry::{Bounded, Geometry, Rectangle};

/// A geometry paired with a caller-supplied value.
///
/// The index never inspects the value except for equality when deleting.
/// Trees hold entries behind an `Arc`, so an entry is shared by every tree
/// version it is part of and is never copied by the index.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry<T> {
    geometry: Geometry,
    value: T,
}

impl<T> Entry<T> {
    /// Creates a new entry.
    pub fn new(geometry: impl Into<Geometry>, value: T) -> Self {
        Entry {
            geometry: geometry.into(),
            value,
        }
    }

    /// The geometry of this entry.
    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    /// The value of this entry.
    pub fn value(&self) -> &T {
        &self.value
    }

    /// Consumes the entry, returning its parts.
    pub fn into_parts(self) -> (Geometry, T) {
        (self.geometry, self.value)
    }

    pub(crate) fn matches(&self, geometry: &Geometry, value: &T) -> bool
    where
        T: PartialEq,
    {
        self.geometry == *geometry && self.value == *value
    }
}

impl<T> Bounded for Entry<T> {
    fn mbr(&self) -> Rectangle {
        self.geometry.mbr()
    }
}
