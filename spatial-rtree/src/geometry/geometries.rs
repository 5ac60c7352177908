//! Shorthand constructors for the geometry primitives.
//!
//! ```rust
//! use spatial_rtree::geometries::{point, polygon, rectangle};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let p = point(0.5, 0.5)?;
//! let r = rectangle(0.0, 0.0, 1.0, 1.0)?;
//! let square = polygon(&[-1.0, -1.0, -1.0, 1.0, 1.0, 1.0, 1.0, -1.0])?;
//! assert!(square.intersects(&p.into()));
//! assert!(square.intersects(&r.into()));
//! # Ok(())
//! # }
//! ```

use super::{Line, Point, Polygon, Rectangle};
use crate::errors::SpatialResult;

/// See [`Point::new`].
pub fn point(x: f64, y: f64) -> SpatialResult<Point> {
    Point::new(x, y)
}

/// See [`Line::new`].
pub fn line(x1: f64, y1: f64, x2: f64, y2: f64) -> SpatialResult<Line> {
    Line::new(x1, y1, x2, y2)
}

/// See [`Rectangle::new`].
pub fn rectangle(x1: f64, y1: f64, x2: f64, y2: f64) -> SpatialResult<Rectangle> {
    Rectangle::new(x1, y1, x2, y2)
}

/// See [`Polygon::from_coordinates`].
pub fn polygon(coordinates: &[f64]) -> SpatialResult<Polygon> {
    Polygon::from_coordinates(coordinates)
}
