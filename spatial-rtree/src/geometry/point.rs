use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};

use super::{ensure_finite, Bounded, Geometry, Rectangle};
use crate::errors::SpatialResult;

/// A 2D point geometry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    x: f64,
    y: f64,
}

impl Point {
    /// Creates a new point at the given coordinates.
    ///
    /// # Errors
    /// Returns `InvalidGeometry` if either coordinate is NaN or infinite.
    pub fn new(x: f64, y: f64) -> SpatialResult<Self> {
        ensure_finite("point", &[x, y])?;
        Ok(Self { x, y })
    }

    pub(crate) fn from_finite(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Gets the x coordinate.
    pub fn x(&self) -> f64 {
        self.x
    }

    /// Gets the y coordinate.
    pub fn y(&self) -> f64 {
        self.y
    }

    /// Euclidean distance to another point.
    pub fn distance_to(&self, other: &Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Checks whether this point intersects any geometry.
    pub fn intersects(&self, other: &Geometry) -> bool {
        Geometry::Point(*self).intersects(other)
    }

    /// Minimum distance from this point to any geometry.
    pub fn distance(&self, other: &Geometry) -> f64 {
        Geometry::Point(*self).distance(other)
    }
}

impl Bounded for Point {
    fn mbr(&self) -> Rectangle {
        Rectangle::from_point(self)
    }
}

impl Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "POINT({} {})", self.x, self.y)
    }
}
