//! 2-D geometry primitives and exact intersection math.
//!
//! This module contains:
//! - [`Point`] and [`Line`] value types with orientation tests
//! - [`Rectangle`], a four-corner rectangle supporting rotated text
//! - [`CubicBezierCurve`] with exact bounding boxes and line intersection
//! - [`PdfPath`] / [`Subpath`] path building and derived orientation
//! - Convex hull, minimum-area rectangle and oriented bounding box
//! - Integer-scaled polygon clipping
//!
//! All types are immutable values copied freely; a numeric tolerance
//! ([`crate::utils::EPSILON`]) treats near-equal floating values as equal.

pub mod bezier;
pub mod clipping;
pub mod hull;
pub mod path;
pub mod rectangle;

pub use bezier::{CubicBezierCurve, solve_cubic, solve_quadratic};
pub use clipping::{clip, point_in_polygon};
pub use hull::{graham_scan, minimum_area_rectangle, oriented_bounding_box};
pub use path::{PathCommand, PdfPath, Subpath};
pub use rectangle::Rectangle;

use crate::utils::{EPSILON, approx_eq};

/// A 2D point (x, y). Immutable, copied by value everywhere.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Creates a new point.
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Translates the point by (dx, dy).
    #[inline]
    pub fn translate(&self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// Rotates the point by `radians` around the origin.
    pub fn rotate(&self, radians: f64) -> Self {
        let (sin, cos) = radians.sin_cos();
        Self::new(
            self.x * cos - self.y * sin,
            self.x * sin + self.y * cos,
        )
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.3}, {:.3})", self.x, self.y)
    }
}

/// Signed cross product of (b - a) x (c - a).
///
/// Positive for a counter-clockwise turn, negative for clockwise,
/// approximately zero for collinear points.
#[inline]
pub fn cross(a: Point, b: Point, c: Point) -> f64 {
    (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x)
}

/// Counter-clockwise orientation test over three points.
#[inline]
pub fn ccw(a: Point, b: Point, c: Point) -> bool {
    cross(a, b, c) > 0.0
}

/// A line segment between two endpoints.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line {
    pub p1: Point,
    pub p2: Point,
}

impl Line {
    /// Creates a new line segment.
    #[inline]
    pub const fn new(p1: Point, p2: Point) -> Self {
        Self { p1, p2 }
    }

    /// Euclidean length of the segment.
    pub fn length(&self) -> f64 {
        let dx = self.p2.x - self.p1.x;
        let dy = self.p2.y - self.p1.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Axis-aligned bounding rectangle of the segment.
    pub fn bounding_rectangle(&self) -> Rectangle {
        Rectangle::from_corners(self.p1, self.p2)
    }

    /// True when the segment is vertical (undefined slope).
    #[inline]
    pub fn is_vertical(&self) -> bool {
        approx_eq(self.p1.x, self.p2.x)
    }

    /// Slope of the carrying line. Meaningless for vertical segments.
    #[inline]
    fn slope(&self) -> f64 {
        (self.p2.y - self.p1.y) / (self.p2.x - self.p1.x)
    }

    /// True when `point` lies on the segment (within tolerance).
    pub fn contains(&self, point: Point) -> bool {
        if cross(self.p1, self.p2, point).abs() > EPSILON {
            return false;
        }
        point.x >= self.p1.x.min(self.p2.x) - EPSILON
            && point.x <= self.p1.x.max(self.p2.x) + EPSILON
            && point.y >= self.p1.y.min(self.p2.y) - EPSILON
            && point.y <= self.p1.y.max(self.p2.y) + EPSILON
    }

    /// Whether the two segments intersect, via ccw orientation tests.
    ///
    /// Collinear overlapping segments report false: there is no single
    /// intersection point for them, so callers treat this as degenerate.
    pub fn intersects_with(&self, other: &Line) -> bool {
        let (a, b) = (self.p1, self.p2);
        let (c, d) = (other.p1, other.p2);
        ccw(a, c, d) != ccw(b, c, d) && ccw(a, b, c) != ccw(a, b, d)
    }

    /// Intersection point of the two segments, or `None` when they do not
    /// cross. Vertical segments are branched around explicitly since their
    /// slope is undefined.
    pub fn intersect(&self, other: &Line) -> Option<Point> {
        if !self.intersects_with(other) {
            return None;
        }

        match (self.is_vertical(), other.is_vertical()) {
            // intersects_with already rejected parallel pairs
            (true, true) => None,
            (true, false) => {
                let x = self.p1.x;
                let m = other.slope();
                let b = other.p1.y - m * other.p1.x;
                Some(Point::new(x, m * x + b))
            }
            (false, true) => {
                let x = other.p1.x;
                let m = self.slope();
                let b = self.p1.y - m * self.p1.x;
                Some(Point::new(x, m * x + b))
            }
            (false, false) => {
                let m1 = self.slope();
                let m2 = other.slope();
                if approx_eq(m1, m2) {
                    return None;
                }
                let b1 = self.p1.y - m1 * self.p1.x;
                let b2 = other.p1.y - m2 * other.p1.x;
                let x = (b2 - b1) / (m1 - m2);
                Some(Point::new(x, m1 * x + b1))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ccw() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(1.0, 0.0);
        assert!(ccw(a, b, Point::new(1.0, 1.0)));
        assert!(!ccw(a, b, Point::new(1.0, -1.0)));
    }

    #[test]
    fn test_line_intersection_diagonals() {
        let l1 = Line::new(Point::new(0.0, 0.0), Point::new(10.0, 10.0));
        let l2 = Line::new(Point::new(0.0, 10.0), Point::new(10.0, 0.0));
        let p = l1.intersect(&l2).unwrap();
        assert!(approx_eq(p.x, 5.0));
        assert!(approx_eq(p.y, 5.0));
    }

    #[test]
    fn test_line_intersection_vertical() {
        let v = Line::new(Point::new(2.0, -5.0), Point::new(2.0, 5.0));
        let d = Line::new(Point::new(0.0, 0.0), Point::new(4.0, 4.0));
        let p = v.intersect(&d).unwrap();
        assert!(approx_eq(p.x, 2.0));
        assert!(approx_eq(p.y, 2.0));
    }

    #[test]
    fn test_parallel_lines_do_not_intersect() {
        let l1 = Line::new(Point::new(0.0, 0.0), Point::new(10.0, 0.0));
        let l2 = Line::new(Point::new(0.0, 1.0), Point::new(10.0, 1.0));
        assert!(!l1.intersects_with(&l2));
        assert_eq!(l1.intersect(&l2), None);
    }

    #[test]
    fn test_line_contains() {
        let l = Line::new(Point::new(0.0, 0.0), Point::new(10.0, 10.0));
        assert!(l.contains(Point::new(5.0, 5.0)));
        assert!(!l.contains(Point::new(5.0, 6.0)));
        assert!(!l.contains(Point::new(11.0, 11.0)));
    }
}
