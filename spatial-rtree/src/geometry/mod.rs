//! Geometry types and the predicate engine behind the index.
//!
//! The index stores four kinds of primitives:
//! - [`Point`]: a 2D coordinate
//! - [`Line`]: a finite segment between two points
//! - [`Rectangle`]: an axis-aligned box, also used for every MBR
//! - [`Polygon`]: a validated convex ring
//!
//! [`Geometry`] is the closed set of those kinds. Its `intersects` and
//! `distance` dispatch on the pair of kinds to the free functions in
//! `algorithms`, which gives these guarantees for every pair `(a, b)`:
//! - `a.intersects(b) == b.intersects(a)`
//! - `a.distance(b) == b.distance(a)`
//! - `a.distance(b) == 0.0` exactly when `a.intersects(b)`

pub(crate) mod algorithms;
pub mod geometries;
mod line;
mod point;
mod polygon;
mod rectangle;

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};
use std::sync::Arc;

pub use line::Line;
pub use point::Point;
pub use polygon::Polygon;
pub use rectangle::Rectangle;

use crate::errors::{SpatialError, SpatialResult};

/// Anything with a minimum bounding rectangle.
pub trait Bounded {
    /// The smallest axis-aligned rectangle containing `self`.
    fn mbr(&self) -> Rectangle;
}

impl<B: Bounded + ?Sized> Bounded for Arc<B> {
    fn mbr(&self) -> Rectangle {
        (**self).mbr()
    }
}

/// Any of the supported geometry kinds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Geometry {
    Point(Point),
    Line(Line),
    Rectangle(Rectangle),
    Polygon(Polygon),
}

impl Geometry {
    /// Checks if two geometries share at least one point.
    /// Boundaries are closed: touching counts as intersecting.
    pub fn intersects(&self, other: &Geometry) -> bool {
        use algorithms::*;
        use Geometry as G;

        match (self, other) {
            (G::Point(a), G::Point(b)) => point_point_intersects(a, b),
            (G::Point(p), G::Line(l)) | (G::Line(l), G::Point(p)) => point_line_intersects(p, l),
            (G::Point(p), G::Rectangle(r)) | (G::Rectangle(r), G::Point(p)) => {
                point_rectangle_intersects(p, r)
            }
            (G::Line(a), G::Line(b)) => line_line_intersects(a, b),
            (G::Line(l), G::Rectangle(r)) | (G::Rectangle(r), G::Line(l)) => {
                line_rectangle_intersects(l, r)
            }
            (G::Rectangle(a), G::Rectangle(b)) => rectangle_rectangle_intersects(a, b),
            (G::Polygon(poly), other) | (other, G::Polygon(poly)) => poly.intersects(other),
        }
    }

    /// Minimum Euclidean distance between two geometries, zero when they
    /// intersect.
    pub fn distance(&self, other: &Geometry) -> f64 {
        use algorithms::*;
        use Geometry as G;

        match (self, other) {
            (G::Point(a), G::Point(b)) => point_point_distance(a, b),
            (G::Point(p), G::Line(l)) | (G::Line(l), G::Point(p)) => point_line_distance(p, l),
            (G::Point(p), G::Rectangle(r)) | (G::Rectangle(r), G::Point(p)) => {
                point_rectangle_distance(p, r)
            }
            (G::Line(a), G::Line(b)) => line_line_distance(a, b),
            (G::Line(l), G::Rectangle(r)) | (G::Rectangle(r), G::Line(l)) => {
                line_rectangle_distance(l, r)
            }
            (G::Rectangle(a), G::Rectangle(b)) => rectangle_rectangle_distance(a, b),
            (G::Polygon(poly), other) | (other, G::Polygon(poly)) => poly.distance(other),
        }
    }

    /// Checks if this geometry intersects a rectangle, used for MBR pruning.
    pub fn intersects_rectangle(&self, rect: &Rectangle) -> bool {
        self.intersects(&Geometry::Rectangle(*rect))
    }

    /// Distance from this geometry to a rectangle. Because every geometry
    /// is inside its MBR, this is a lower bound on the distance to anything
    /// bounded by `rect`.
    pub fn distance_to_rectangle(&self, rect: &Rectangle) -> f64 {
        self.distance(&Geometry::Rectangle(*rect))
    }

    /// The minimum bounding rectangle of this geometry.
    pub fn mbr(&self) -> Rectangle {
        match self {
            Geometry::Point(p) => p.mbr(),
            Geometry::Line(l) => l.mbr(),
            Geometry::Rectangle(r) => *r,
            Geometry::Polygon(p) => p.mbr(),
        }
    }
}

impl Bounded for Geometry {
    fn mbr(&self) -> Rectangle {
        Geometry::mbr(self)
    }
}

impl From<Point> for Geometry {
    fn from(point: Point) -> Self {
        Geometry::Point(point)
    }
}

impl From<Line> for Geometry {
    fn from(line: Line) -> Self {
        Geometry::Line(line)
    }
}

impl From<Rectangle> for Geometry {
    fn from(rect: Rectangle) -> Self {
        Geometry::Rectangle(rect)
    }
}

impl From<Polygon> for Geometry {
    fn from(polygon: Polygon) -> Self {
        Geometry::Polygon(polygon)
    }
}

impl Display for Geometry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Geometry::Point(p) => write!(f, "{}", p),
            Geometry::Line(l) => write!(f, "{}", l),
            Geometry::Rectangle(r) => write!(f, "{}", r),
            Geometry::Polygon(p) => write!(f, "{}", p),
        }
    }
}

/// Rejects NaN and infinite coordinates.
pub(crate) fn ensure_finite(kind: &str, values: &[f64]) -> SpatialResult<()> {
    if let Some(bad) = values.iter().find(|v| !v.is_finite()) {
        log::error!("Non-finite coordinate {} in {}", bad, kind);
        return Err(SpatialError::InvalidGeometry(format!(
            "{} coordinates must be finite, got {}",
            kind, bad
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    const PRECISION: f64 = 0.00001;

    fn random_geometry(rng: &mut StdRng) -> Geometry {
        let coord = |rng: &mut StdRng| (rng.gen_range(-10..=10) as f64) / 2.0;
        match rng.gen_range(0..4) {
            0 => Point::new(coord(rng), coord(rng)).unwrap().into(),
            1 => Line::new(coord(rng), coord(rng), coord(rng), coord(rng)).unwrap().into(),
            2 => Rectangle::new(coord(rng), coord(rng), coord(rng), coord(rng)).unwrap().into(),
            _ => {
                // axis-aligned diamond, always convex
                let (cx, cy) = (coord(rng), coord(rng));
                let r = rng.gen_range(1..=6) as f64 / 2.0;
                Polygon::from_coordinates(&[cx - r, cy, cx, cy + r, cx + r, cy, cx, cy - r])
                    .unwrap()
                    .into()
            }
        }
    }

    #[test]
    fn test_intersects_is_symmetric() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..2000 {
            let a = random_geometry(&mut rng);
            let b = random_geometry(&mut rng);
            assert_eq!(a.intersects(&b), b.intersects(&a), "{} vs {}", a, b);
        }
    }

    #[test]
    fn test_distance_is_symmetric_and_consistent() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..2000 {
            let a = random_geometry(&mut rng);
            let b = random_geometry(&mut rng);
            let d_ab = a.distance(&b);
            let d_ba = b.distance(&a);
            assert!((d_ab - d_ba).abs() < PRECISION, "{} vs {}", a, b);
            assert!(d_ab >= 0.0);
            assert_eq!(d_ab == 0.0, a.intersects(&b), "{} vs {}", a, b);
        }
    }

    #[test]
    fn test_distance_to_self_is_zero() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..200 {
            let a = random_geometry(&mut rng);
            assert!(a.intersects(&a));
            assert_eq!(a.distance(&a), 0.0);
        }
    }

    #[test]
    fn test_geometry_inside_its_mbr() {
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..500 {
            let a = random_geometry(&mut rng);
            assert!(a.intersects_rectangle(&a.mbr()));
            assert_eq!(a.distance_to_rectangle(&a.mbr()), 0.0);
        }
    }

    #[test]
    fn test_mbr_lower_bounds_distance() {
        let mut rng = StdRng::seed_from_u64(13);
        for _ in 0..1000 {
            let a = random_geometry(&mut rng);
            let b = random_geometry(&mut rng);
            assert!(a.distance_to_rectangle(&b.mbr()) <= a.distance(&b) + PRECISION);
        }
    }

    #[test]
    fn test_point_line_pair() {
        let p: Geometry = Point::new(1.0, 1.0).unwrap().into();
        let l: Geometry = Line::new(0.0, 0.0, 2.0, 2.0).unwrap().into();
        assert!(p.intersects(&l));
        assert!(l.intersects(&p));
    }

    #[test]
    fn test_display() {
        let r: Geometry = Rectangle::new(0.0, 0.0, 1.0, 1.0).unwrap().into();
        assert_eq!(format!("{}", r), "Rectangle(0, 0, 1, 1)");
    }

    #[test]
    fn test_serde_tagged_round_trip() {
        let g: Geometry = Line::new(0.0, 1.0, 2.0, 3.0).unwrap().into();
        let json = serde_json::to_string(&g).unwrap();
        let back: Geometry = serde_json::from_str(&json).unwrap();
        assert_eq!(g, back);
    }
}
