//! Pairwise intersection and distance algorithms.
//!
//! Every combination of primitives is implemented once here, with the
//! arguments in a fixed order (point < line < rectangle < polygon).
//! [`Geometry`](super::Geometry) swaps arguments as needed, so the symmetric
//! pairs are symmetric by construction.
//!
//! Rings are slices of distinct vertices without the closing duplicate; the
//! edge from the last vertex back to the first is implied.
//!
//! Distances are only computed for pairs that do not intersect, and always
//! return exactly `0.0` for pairs that do, which keeps `distance == 0` and
//! `intersects` in agreement.

use super::{Line, Point, Rectangle};

/// Direction of the turn made by going `p -> q -> r`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Turn {
    Collinear,
    Clockwise,
    CounterClockwise,
}

/// Finds the orientation of an ordered triplet of points.
///
/// The sign test is exact: only a cross product of exactly zero is collinear.
pub(crate) fn orientation(p: &Point, q: &Point, r: &Point) -> Turn {
    let val = cross(p, q, r);
    if val == 0.0 {
        Turn::Collinear
    } else if val < 0.0 {
        Turn::Clockwise
    } else {
        Turn::CounterClockwise
    }
}

/// Cross product of `q - p` and `r - p`.
pub(crate) fn cross(p: &Point, q: &Point, r: &Point) -> f64 {
    (q.x() - p.x()) * (r.y() - p.y()) - (q.y() - p.y()) * (r.x() - p.x())
}

/// Checks if point q lies within the box spanned by p and r
/// (assuming p, q, r are collinear).
fn on_segment(p: &Point, q: &Point, r: &Point) -> bool {
    q.x() <= p.x().max(r.x())
        && q.x() >= p.x().min(r.x())
        && q.y() <= p.y().max(r.y())
        && q.y() >= p.y().min(r.y())
}

/// Iterates the edges of a ring, including the closing edge.
pub(crate) fn ring_edges(ring: &[Point]) -> impl Iterator<Item = Line> + '_ {
    let n = ring.len();
    (0..n).map(move |i| Line::from_points(ring[i], ring[(i + 1) % n]))
}

// ============================================================================
// Point
// ============================================================================

pub(crate) fn point_point_intersects(a: &Point, b: &Point) -> bool {
    a == b
}

pub(crate) fn point_point_distance(a: &Point, b: &Point) -> f64 {
    a.distance_to(b)
}

pub(crate) fn point_line_intersects(p: &Point, line: &Line) -> bool {
    orientation(line.p1(), line.p2(), p) == Turn::Collinear && on_segment(line.p1(), p, line.p2())
}

pub(crate) fn point_line_distance(p: &Point, line: &Line) -> f64 {
    if point_line_intersects(p, line) {
        return 0.0;
    }
    let (a, b) = (line.p1(), line.p2());
    let dx = b.x() - a.x();
    let dy = b.y() - a.y();
    let len_sq = dx * dx + dy * dy;
    if len_sq == 0.0 {
        return p.distance_to(a);
    }
    let t = ((p.x() - a.x()) * dx + (p.y() - a.y()) * dy) / len_sq;
    if t <= 0.0 {
        p.distance_to(a)
    } else if t >= 1.0 {
        p.distance_to(b)
    } else {
        // perpendicular foot lies inside the segment
        cross(a, b, p).abs() / len_sq.sqrt()
    }
}

pub(crate) fn point_rectangle_intersects(p: &Point, rect: &Rectangle) -> bool {
    rect.contains_point(p.x(), p.y())
}

pub(crate) fn point_rectangle_distance(p: &Point, rect: &Rectangle) -> f64 {
    let closest_x = p.x().clamp(rect.x1(), rect.x2());
    let closest_y = p.y().clamp(rect.y1(), rect.y2());
    (p.x() - closest_x).hypot(p.y() - closest_y)
}

/// Point in ring with closed boundary semantics.
///
/// Points on an edge are inside; interior points are found with the
/// crossing-number (ray casting) test.
pub(crate) fn point_ring_intersects(p: &Point, ring: &[Point]) -> bool {
    if ring_edges(ring).any(|edge| point_line_intersects(p, &edge)) {
        return true;
    }

    let mut inside = false;
    let n = ring.len();
    let mut j = n - 1;
    for i in 0..n {
        let (pi, pj) = (&ring[i], &ring[j]);
        if (pi.y() > p.y()) != (pj.y() > p.y())
            && p.x() < (pj.x() - pi.x()) * (p.y() - pi.y()) / (pj.y() - pi.y()) + pi.x()
        {
            inside = !inside;
        }
        j = i;
    }
    inside
}

pub(crate) fn point_ring_distance(p: &Point, ring: &[Point]) -> f64 {
    if point_ring_intersects(p, ring) {
        return 0.0;
    }
    ring_edges(ring)
        .map(|edge| point_line_distance(p, &edge))
        .fold(f64::INFINITY, f64::min)
}

// ============================================================================
// Line
// ============================================================================

/// Checks if two segments intersect, including touching endpoints and
/// collinear overlap.
pub(crate) fn line_line_intersects(a: &Line, b: &Line) -> bool {
    let (p1, p2, p3, p4) = (a.p1(), a.p2(), b.p1(), b.p2());
    let o1 = orientation(p1, p2, p3);
    let o2 = orientation(p1, p2, p4);
    let o3 = orientation(p3, p4, p1);
    let o4 = orientation(p3, p4, p2);

    // Proper crossing
    if o1 != o2
        && o3 != o4
        && o1 != Turn::Collinear
        && o2 != Turn::Collinear
        && o3 != Turn::Collinear
        && o4 != Turn::Collinear
    {
        return true;
    }

    // Touching or collinear overlap
    (o1 == Turn::Collinear && on_segment(p1, p3, p2))
        || (o2 == Turn::Collinear && on_segment(p1, p4, p2))
        || (o3 == Turn::Collinear && on_segment(p3, p1, p4))
        || (o4 == Turn::Collinear && on_segment(p3, p2, p4))
}

pub(crate) fn line_line_distance(a: &Line, b: &Line) -> f64 {
    if line_line_intersects(a, b) {
        return 0.0;
    }
    point_line_distance(a.p1(), b)
        .min(point_line_distance(a.p2(), b))
        .min(point_line_distance(b.p1(), a))
        .min(point_line_distance(b.p2(), a))
}

pub(crate) fn line_rectangle_intersects(line: &Line, rect: &Rectangle) -> bool {
    if !line_mbr(line).intersects(rect) {
        return false;
    }
    point_rectangle_intersects(line.p1(), rect)
        || point_rectangle_intersects(line.p2(), rect)
        || ring_edges(&rect.corners()).any(|edge| line_line_intersects(line, &edge))
}

pub(crate) fn line_rectangle_distance(line: &Line, rect: &Rectangle) -> f64 {
    if line_rectangle_intersects(line, rect) {
        return 0.0;
    }
    ring_edges(&rect.corners())
        .map(|edge| line_line_distance(line, &edge))
        .fold(f64::INFINITY, f64::min)
}

/// A segment meets a ring if it crosses an edge or either endpoint is inside.
pub(crate) fn line_ring_intersects(line: &Line, ring: &[Point]) -> bool {
    ring_edges(ring).any(|edge| line_line_intersects(line, &edge))
        || point_ring_intersects(line.p1(), ring)
        || point_ring_intersects(line.p2(), ring)
}

pub(crate) fn line_ring_distance(line: &Line, ring: &[Point]) -> f64 {
    if line_ring_intersects(line, ring) {
        return 0.0;
    }
    ring_edges(ring)
        .map(|edge| line_line_distance(line, &edge))
        .fold(f64::INFINITY, f64::min)
}

fn line_mbr(line: &Line) -> Rectangle {
    Rectangle::from_bounds(line.p1().x(), line.p1().y(), line.p2().x(), line.p2().y())
}

// ============================================================================
// Rings (polygons, and rectangles treated as 4-edge rings)
// ============================================================================

pub(crate) fn rectangle_rectangle_intersects(a: &Rectangle, b: &Rectangle) -> bool {
    a.intersects(b)
}

pub(crate) fn rectangle_rectangle_distance(a: &Rectangle, b: &Rectangle) -> f64 {
    a.distance(b)
}

/// Two rings meet if any pair of edges intersects, or if one ring lies
/// entirely inside the other (checked with a single vertex of each).
pub(crate) fn ring_ring_intersects(a: &[Point], b: &[Point]) -> bool {
    ring_edges(a).any(|ea| ring_edges(b).any(|eb| line_line_intersects(&ea, &eb)))
        || point_ring_intersects(&a[0], b)
        || point_ring_intersects(&b[0], a)
}

pub(crate) fn ring_ring_distance(a: &[Point], b: &[Point]) -> f64 {
    if ring_ring_intersects(a, b) {
        return 0.0;
    }
    ring_edges(a)
        .flat_map(|ea| ring_edges(b).map(move |eb| line_line_distance(&ea, &eb)))
        .fold(f64::INFINITY, f64::min)
}

pub(crate) fn rectangle_ring_intersects(rect: &Rectangle, ring: &[Point]) -> bool {
    ring_ring_intersects(&rect.corners(), ring)
}

pub(crate) fn rectangle_ring_distance(rect: &Rectangle, ring: &[Point]) -> f64 {
    ring_ring_distance(&rect.corners(), ring)
}
