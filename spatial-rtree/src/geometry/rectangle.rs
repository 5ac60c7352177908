use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};

use super::{ensure_finite, Bounded, Point};
use crate::errors::SpatialResult;

/// An axis-aligned rectangle represented by its minimum and maximum corners.
///
/// `Rectangle` is both a geometry in its own right and the minimum bounding
/// rectangle (MBR) type used by every node of the tree. The corners are
/// always normalized so that `x1 <= x2` and `y1 <= y2`. Zero width or zero
/// height rectangles are allowed and behave as segments or points.
///
/// # Examples
///
/// ```rust
/// use spatial_rtree::Rectangle;
///
/// // Reversed corners are swapped on construction
/// let rect = Rectangle::new(10.0, 10.0, 0.0, 0.0).unwrap();
/// assert_eq!(rect.x1(), 0.0);
/// assert_eq!(rect.y2(), 10.0);
/// assert!(rect.contains_point(5.0, 5.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RectangleRepr")]
pub struct Rectangle {
    x1: f64,
    y1: f64,
    x2: f64,
    y2: f64,
}

/// Unvalidated wire form of a rectangle.
#[derive(Deserialize)]
struct RectangleRepr {
    x1: f64,
    y1: f64,
    x2: f64,
    y2: f64,
}

impl TryFrom<RectangleRepr> for Rectangle {
    type Error = crate::errors::SpatialError;

    fn try_from(repr: RectangleRepr) -> Result<Self, Self::Error> {
        Rectangle::new(repr.x1, repr.y1, repr.x2, repr.y2)
    }
}

impl Display for Rectangle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Rectangle({}, {}, {}, {})", self.x1, self.y1, self.x2, self.y2)
    }
}

impl Rectangle {
    /// Creates a new rectangle from two opposite corners.
    ///
    /// The corners may be given in any order; they are normalized so that
    /// `(x1, y1)` is the lower-left and `(x2, y2)` the upper-right corner.
    ///
    /// # Errors
    ///
    /// Returns `InvalidGeometry` if any coordinate is NaN or infinite.
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> SpatialResult<Rectangle> {
        ensure_finite("rectangle", &[x1, y1, x2, y2])?;
        Ok(Rectangle::from_bounds(x1, y1, x2, y2))
    }

    /// Builds a rectangle from coordinates already known to be finite.
    pub(crate) fn from_bounds(x1: f64, y1: f64, x2: f64, y2: f64) -> Rectangle {
        Rectangle {
            x1: x1.min(x2),
            y1: y1.min(y2),
            x2: x1.max(x2),
            y2: y1.max(y2),
        }
    }

    /// The degenerate rectangle covering a single point.
    pub fn from_point(point: &Point) -> Rectangle {
        Rectangle::from_bounds(point.x(), point.y(), point.x(), point.y())
    }

    /// Minimum X coordinate
    pub fn x1(&self) -> f64 {
        self.x1
    }

    /// Minimum Y coordinate
    pub fn y1(&self) -> f64 {
        self.y1
    }

    /// Maximum X coordinate
    pub fn x2(&self) -> f64 {
        self.x2
    }

    /// Maximum Y coordinate
    pub fn y2(&self) -> f64 {
        self.y2
    }

    /// Returns the width of the rectangle.
    pub fn width(&self) -> f64 {
        self.x2 - self.x1
    }

    /// Returns the height of the rectangle.
    pub fn height(&self) -> f64 {
        self.y2 - self.y1
    }

    /// Returns the area of the rectangle.
    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    /// Returns the perimeter of the rectangle.
    pub fn perimeter(&self) -> f64 {
        2.0 * (self.width() + self.height())
    }

    /// Returns the center point of the rectangle.
    pub fn center(&self) -> (f64, f64) {
        ((self.x1 + self.x2) / 2.0, (self.y1 + self.y2) / 2.0)
    }

    /// The four corners in ring order, starting at the lower-left corner.
    pub fn corners(&self) -> [Point; 4] {
        [
            Point::from_finite(self.x1, self.y1),
            Point::from_finite(self.x1, self.y2),
            Point::from_finite(self.x2, self.y2),
            Point::from_finite(self.x2, self.y1),
        ]
    }

    /// Checks if this rectangle contains a point. The boundary is included.
    pub fn contains_point(&self, x: f64, y: f64) -> bool {
        x >= self.x1 && x <= self.x2 && y >= self.y1 && y <= self.y2
    }

    /// Checks if this rectangle fully contains another rectangle.
    pub fn contains(&self, other: &Rectangle) -> bool {
        other.x1 >= self.x1 && other.x2 <= self.x2 && other.y1 >= self.y1 && other.y2 <= self.y2
    }

    /// Checks if this rectangle intersects another rectangle.
    /// Touching edges or corners count as an intersection.
    pub fn intersects(&self, other: &Rectangle) -> bool {
        self.x1 <= other.x2 && self.x2 >= other.x1 && self.y1 <= other.y2 && self.y2 >= other.y1
    }

    /// Euclidean gap between two rectangles, zero when they intersect.
    pub fn distance(&self, other: &Rectangle) -> f64 {
        let dx = (self.x1 - other.x2).max(other.x1 - self.x2).max(0.0);
        let dy = (self.y1 - other.y2).max(other.y1 - self.y2).max(0.0);
        dx.hypot(dy)
    }

    /// Returns the smallest rectangle covering both rectangles.
    pub fn union(&self, other: &Rectangle) -> Rectangle {
        Rectangle {
            x1: self.x1.min(other.x1),
            y1: self.y1.min(other.y1),
            x2: self.x2.max(other.x2),
            y2: self.y2.max(other.y2),
        }
    }

    /// Returns the intersection of this rectangle with another, if they intersect.
    pub fn intersection(&self, other: &Rectangle) -> Option<Rectangle> {
        if !self.intersects(other) {
            return None;
        }
        Some(Rectangle {
            x1: self.x1.max(other.x1),
            y1: self.y1.max(other.y1),
            x2: self.x2.min(other.x2),
            y2: self.y2.min(other.y2),
        })
    }

    /// Area shared by both rectangles, zero when they are disjoint.
    pub fn intersection_area(&self, other: &Rectangle) -> f64 {
        self.intersection(other).map_or(0.0, |r| r.area())
    }

    /// Area that must be added to this rectangle to also cover `other`.
    pub fn enlargement(&self, other: &Rectangle) -> f64 {
        self.union(other).area() - self.area()
    }

    /// Checks if this rectangle is a point (zero width and height).
    pub fn is_point(&self) -> bool {
        self.x1 == self.x2 && self.y1 == self.y2
    }
}

impl Bounded for Rectangle {
    fn mbr(&self) -> Rectangle {
        *self
    }
}
