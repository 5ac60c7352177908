use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};

use super::{ensure_finite, Bounded, Geometry, Point, Rectangle};
use crate::errors::SpatialResult;

/// A finite line segment between two points.
///
/// A `Line` is never treated as an infinite line: two segments whose
/// supporting lines cross outside either segment do not intersect.
/// A zero-length segment behaves like a point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Line {
    p1: Point,
    p2: Point,
}

impl Line {
    /// Creates a segment from `(x1, y1)` to `(x2, y2)`.
    ///
    /// # Errors
    /// Returns `InvalidGeometry` if any coordinate is NaN or infinite.
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> SpatialResult<Self> {
        ensure_finite("line", &[x1, y1, x2, y2])?;
        Ok(Self::from_points(
            Point::from_finite(x1, y1),
            Point::from_finite(x2, y2),
        ))
    }

    /// Creates a segment between two existing points.
    pub fn from_points(p1: Point, p2: Point) -> Self {
        Self { p1, p2 }
    }

    /// First endpoint.
    pub fn p1(&self) -> &Point {
        &self.p1
    }

    /// Second endpoint.
    pub fn p2(&self) -> &Point {
        &self.p2
    }

    /// Length of the segment.
    pub fn length(&self) -> f64 {
        self.p1.distance_to(&self.p2)
    }

    /// Checks whether this segment intersects any geometry.
    pub fn intersects(&self, other: &Geometry) -> bool {
        Geometry::Line(*self).intersects(other)
    }

    /// Minimum distance from this segment to any geometry.
    pub fn distance(&self, other: &Geometry) -> f64 {
        Geometry::Line(*self).distance(other)
    }
}

impl Bounded for Line {
    fn mbr(&self) -> Rectangle {
        Rectangle::from_bounds(self.p1.x(), self.p1.y(), self.p2.x(), self.p2.y())
    }
}

impl Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "LINESTRING({} {}, {} {})",
            self.p1.x(),
            self.p1.y(),
            self.p2.x(),
            self.p2.y()
        )
    }
}
