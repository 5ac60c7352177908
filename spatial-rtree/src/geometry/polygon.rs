use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};

use super::algorithms::{self, Turn};
use super::{ensure_finite, Bounded, Geometry, Line, Point, Rectangle};
use crate::errors::{SpatialError, SpatialResult};

/// A polygon bounded by a single ring of vertices.
///
/// Construction normalizes the ring:
/// - consecutive duplicate vertices are collapsed;
/// - a trailing copy of the first vertex is dropped, the ring is always
///   closed implicitly by an edge from the last vertex back to the first.
///
/// and validates it eagerly, so an existing `Polygon` is always usable by the
/// predicate engine:
/// - at least 3 distinct vertices spanning a non-zero area are required
///   (`InvalidGeometry` otherwise);
/// - the ring must be simple: no two non-adjacent edges may touch and no
///   edge may fold back over its neighbour (`UnsupportedGeometry`);
/// - the ring must be convex (`UnsupportedGeometry`).
///
/// # Example
///
/// ```rust
/// use spatial_rtree::{Geometry, Line, Polygon};
///
/// let square = Polygon::from_coordinates(&[-1.0, -1.0, -1.0, 1.0, 1.0, 1.0, 1.0, -1.0]).unwrap();
/// let line = Line::new(-2.0, 0.0, 2.0, 0.0).unwrap();
/// assert!(square.intersects(&Geometry::from(line)));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Point>", into = "Vec<Point>")]
pub struct Polygon {
    points: Vec<Point>,
    mbr: Rectangle,
}

impl Polygon {
    /// Creates a polygon from its vertices.
    ///
    /// # Errors
    /// Returns `InvalidGeometry` for degenerate rings and
    /// `UnsupportedGeometry` for self-intersecting or non-convex rings.
    pub fn new(points: Vec<Point>) -> SpatialResult<Self> {
        let points = normalize_ring(points);
        validate_ring(&points)?;

        let mbr = points
            .iter()
            .map(Bounded::mbr)
            .reduce(|acc, r| acc.union(&r))
            .ok_or_else(|| SpatialError::InvalidGeometry("polygon has no vertices".to_string()))?;

        Ok(Self { points, mbr })
    }

    /// Creates a polygon from flat coordinates `x0, y0, x1, y1, ...`.
    ///
    /// # Errors
    /// Returns `InvalidGeometry` if the number of values is odd or any value
    /// is not finite, plus every error of [`Polygon::new`].
    pub fn from_coordinates(coordinates: &[f64]) -> SpatialResult<Self> {
        if coordinates.len() % 2 != 0 {
            log::error!("Polygon coordinates must come in x, y pairs");
            return Err(SpatialError::InvalidGeometry(format!(
                "polygon needs an even number of coordinates, got {}",
                coordinates.len()
            )));
        }
        ensure_finite("polygon", coordinates)?;

        let points = coordinates
            .chunks_exact(2)
            .map(|pair| Point::from_finite(pair[0], pair[1]))
            .collect();
        Self::new(points)
    }

    /// The normalized vertices, without a closing duplicate.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Number of distinct vertices (and edges) of the ring.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always false: a valid polygon has at least 3 vertices.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Iterates the edges of the ring including the closing edge.
    pub fn edges(&self) -> impl Iterator<Item = Line> + '_ {
        algorithms::ring_edges(&self.points)
    }

    /// Checks whether this polygon intersects any geometry.
    pub fn intersects(&self, other: &Geometry) -> bool {
        match other {
            Geometry::Point(p) => algorithms::point_ring_intersects(p, &self.points),
            Geometry::Line(l) => algorithms::line_ring_intersects(l, &self.points),
            Geometry::Rectangle(r) => algorithms::rectangle_ring_intersects(r, &self.points),
            Geometry::Polygon(p) => algorithms::ring_ring_intersects(&self.points, &p.points),
        }
    }

    /// Minimum distance from this polygon to any geometry.
    pub fn distance(&self, other: &Geometry) -> f64 {
        match other {
            Geometry::Point(p) => algorithms::point_ring_distance(p, &self.points),
            Geometry::Line(l) => algorithms::line_ring_distance(l, &self.points),
            Geometry::Rectangle(r) => algorithms::rectangle_ring_distance(r, &self.points),
            Geometry::Polygon(p) => algorithms::ring_ring_distance(&self.points, &p.points),
        }
    }
}

impl Bounded for Polygon {
    fn mbr(&self) -> Rectangle {
        self.mbr
    }
}

impl TryFrom<Vec<Point>> for Polygon {
    type Error = SpatialError;

    fn try_from(points: Vec<Point>) -> Result<Self, Self::Error> {
        Polygon::new(points)
    }
}

impl From<Polygon> for Vec<Point> {
    fn from(polygon: Polygon) -> Self {
        polygon.points
    }
}

impl Display for Polygon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "POLYGON((")?;
        for (i, coord) in self.points.iter().chain(self.points.first()).enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{} {}", coord.x(), coord.y())?;
        }
        write!(f, "))")
    }
}

fn normalize_ring(points: Vec<Point>) -> Vec<Point> {
    let mut ring: Vec<Point> = points.into_iter().dedup().collect();
    while ring.len() > 1 && ring.first() == ring.last() {
        ring.pop();
    }
    ring
}

fn validate_ring(ring: &[Point]) -> SpatialResult<()> {
    let n = ring.len();
    if n < 3 {
        log::error!("Polygon ring has only {} distinct vertices", n);
        return Err(SpatialError::InvalidGeometry(format!(
            "polygon requires at least 3 distinct vertices, got {}",
            n
        )));
    }

    let turns: Vec<Turn> = (0..n)
        .map(|i| algorithms::orientation(&ring[(i + n - 1) % n], &ring[i], &ring[(i + 1) % n]))
        .collect();

    if turns.iter().all(|t| *t == Turn::Collinear) {
        log::error!("Polygon ring has zero area");
        return Err(SpatialError::InvalidGeometry(
            "polygon vertices are all collinear".to_string(),
        ));
    }

    // an edge folding back over the previous one
    let folds_back = (0..n).any(|i| {
        let (prev, cur, next) = (&ring[(i + n - 1) % n], &ring[i], &ring[(i + 1) % n]);
        let dot = (cur.x() - prev.x()) * (next.x() - cur.x())
            + (cur.y() - prev.y()) * (next.y() - cur.y());
        turns[i] == Turn::Collinear && dot < 0.0
    });

    let edges: Vec<Line> = algorithms::ring_edges(ring).collect();
    let crossing = (0..n)
        .tuple_combinations()
        .filter(|&(i, j)| j != i + 1 && !(i == 0 && j == n - 1))
        .any(|(i, j)| algorithms::line_line_intersects(&edges[i], &edges[j]));

    if folds_back || crossing {
        log::error!("Polygon ring is self-intersecting");
        return Err(SpatialError::UnsupportedGeometry(
            "polygon ring is self-intersecting".to_string(),
        ));
    }

    let mut directions = turns.iter().filter(|t| **t != Turn::Collinear).dedup();
    directions.next();
    if directions.next().is_some() {
        log::error!("Polygon ring is not convex");
        return Err(SpatialError::UnsupportedGeometry(
            "only convex polygon rings are supported".to_string(),
        ));
    }

    Ok(())
}
