//! Four-corner rectangle supporting rotated text.
//!
//! Rotated rectangles come out of rotated page content, so the type stores
//! all four corners instead of two. Corner order follows the positive
//! shoelace convention: bottom-left, bottom-right, top-right, top-left is
//! counter-clockwise for an unrotated rectangle.

use crate::geometry::{Line, Point, cross};
use crate::utils::{EPSILON, approx_eq};

/// An immutable rectangle derived from two opposite corners, or from four
/// explicit corners when rotated. Width and height are never negative.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rectangle {
    bottom_left: Point,
    bottom_right: Point,
    top_right: Point,
    top_left: Point,
}

impl Rectangle {
    /// Creates an axis-aligned rectangle from two opposite corners, in any
    /// order.
    pub fn from_corners(p1: Point, p2: Point) -> Self {
        let x0 = p1.x.min(p2.x);
        let y0 = p1.y.min(p2.y);
        let x1 = p1.x.max(p2.x);
        let y1 = p1.y.max(p2.y);
        Self {
            bottom_left: Point::new(x0, y0),
            bottom_right: Point::new(x1, y0),
            top_right: Point::new(x1, y1),
            top_left: Point::new(x0, y1),
        }
    }

    /// Creates a rectangle from four explicit corners. The caller is
    /// responsible for keeping the corners consistent with the shoelace
    /// sign convention (counter-clockwise for positive rotation).
    pub const fn with_corners(
        bottom_left: Point,
        bottom_right: Point,
        top_right: Point,
        top_left: Point,
    ) -> Self {
        Self {
            bottom_left,
            bottom_right,
            top_right,
            top_left,
        }
    }

    #[inline]
    pub const fn bottom_left(&self) -> Point {
        self.bottom_left
    }

    #[inline]
    pub const fn bottom_right(&self) -> Point {
        self.bottom_right
    }

    #[inline]
    pub const fn top_right(&self) -> Point {
        self.top_right
    }

    #[inline]
    pub const fn top_left(&self) -> Point {
        self.top_left
    }

    /// The four corners in shoelace order.
    pub const fn corners(&self) -> [Point; 4] {
        [
            self.bottom_left,
            self.bottom_right,
            self.top_right,
            self.top_left,
        ]
    }

    /// Leftmost x over the four corners.
    pub fn left(&self) -> f64 {
        self.corners().iter().map(|p| p.x).fold(f64::MAX, f64::min)
    }

    /// Rightmost x over the four corners.
    pub fn right(&self) -> f64 {
        self.corners().iter().map(|p| p.x).fold(f64::MIN, f64::max)
    }

    /// Lowest y over the four corners.
    pub fn bottom(&self) -> f64 {
        self.corners().iter().map(|p| p.y).fold(f64::MAX, f64::min)
    }

    /// Highest y over the four corners.
    pub fn top(&self) -> f64 {
        self.corners().iter().map(|p| p.y).fold(f64::MIN, f64::max)
    }

    /// Edge length bottom-left to bottom-right (exact under rotation).
    pub fn width(&self) -> f64 {
        Line::new(self.bottom_left, self.bottom_right).length()
    }

    /// Edge length bottom-left to top-left (exact under rotation).
    pub fn height(&self) -> f64 {
        Line::new(self.bottom_left, self.top_left).length()
    }

    /// Exact area, valid for any rotation.
    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    /// Rotation of the bottom edge in degrees, counter-clockwise positive.
    pub fn rotation_degrees(&self) -> f64 {
        (self.bottom_right.y - self.bottom_left.y)
            .atan2(self.bottom_right.x - self.bottom_left.x)
            .to_degrees()
    }

    /// True when the bottom edge is horizontal and the left edge vertical.
    pub fn is_axis_aligned(&self) -> bool {
        approx_eq(self.bottom_left.y, self.bottom_right.y)
            && approx_eq(self.bottom_left.x, self.top_left.x)
    }

    /// Center of the rectangle.
    pub fn centroid(&self) -> Point {
        Point::new(
            (self.bottom_left.x + self.top_right.x) / 2.0,
            (self.bottom_left.y + self.top_right.y) / 2.0,
        )
    }

    /// Axis-aligned rectangle tightly covering this one.
    pub fn normalise(&self) -> Rectangle {
        Rectangle::from_corners(
            Point::new(self.left(), self.bottom()),
            Point::new(self.right(), self.top()),
        )
    }

    /// Rectangle translated by (dx, dy).
    pub fn translate(&self, dx: f64, dy: f64) -> Rectangle {
        Rectangle::with_corners(
            self.bottom_left.translate(dx, dy),
            self.bottom_right.translate(dx, dy),
            self.top_right.translate(dx, dy),
            self.top_left.translate(dx, dy),
        )
    }

    /// Smallest axis-aligned rectangle covering both rectangles.
    pub fn union(&self, other: &Rectangle) -> Rectangle {
        Rectangle::from_corners(
            Point::new(self.left().min(other.left()), self.bottom().min(other.bottom())),
            Point::new(self.right().max(other.right()), self.top().max(other.top())),
        )
    }

    /// Whether `point` lies inside the rectangle.
    ///
    /// Axis-aligned rectangles use direct coordinate comparisons. Rotated
    /// rectangles fall back to the sum-of-four-triangle-areas method: the
    /// point is inside when the triangles it forms with each edge add up to
    /// the rectangle area. A near-zero sub-triangle means the point sits
    /// exactly on an edge, which only counts when `include_border` is set.
    pub fn contains(&self, point: Point, include_border: bool) -> bool {
        if self.is_axis_aligned() {
            return if include_border {
                point.x >= self.left() - EPSILON
                    && point.x <= self.right() + EPSILON
                    && point.y >= self.bottom() - EPSILON
                    && point.y <= self.top() + EPSILON
            } else {
                point.x > self.left() + EPSILON
                    && point.x < self.right() - EPSILON
                    && point.y > self.bottom() + EPSILON
                    && point.y < self.top() - EPSILON
            };
        }

        let corners = self.corners();
        let mut sum = 0.0;
        for i in 0..4 {
            let a = corners[i];
            let b = corners[(i + 1) % 4];
            let tri = cross(a, b, point).abs() / 2.0;
            if tri < EPSILON && !include_border {
                return false;
            }
            sum += tri;
        }
        approx_eq_area(sum, self.area())
    }

    /// Whether every corner of `other` lies inside this rectangle.
    pub fn contains_rectangle(&self, other: &Rectangle, include_border: bool) -> bool {
        other
            .corners()
            .iter()
            .all(|&c| self.contains(c, include_border))
    }

    /// Whether the two rectangles overlap (touching borders count).
    ///
    /// Axis-aligned pairs use interval comparisons. Otherwise the
    /// normalised boxes give a fast reject, then corner containment and the
    /// 16 edge-pair crossing tests decide.
    pub fn intersects_with(&self, other: &Rectangle) -> bool {
        if self.is_axis_aligned() && other.is_axis_aligned() {
            return !(self.right() < other.left() - EPSILON
                || other.right() < self.left() - EPSILON
                || self.top() < other.bottom() - EPSILON
                || other.top() < self.bottom() - EPSILON);
        }

        if !self.normalise().intersects_with(&other.normalise()) {
            return false;
        }

        if other.corners().iter().any(|&c| self.contains(c, true))
            || self.corners().iter().any(|&c| other.contains(c, true))
        {
            return true;
        }

        let own_edges = self.edges();
        let other_edges = other.edges();
        own_edges
            .iter()
            .any(|e| other_edges.iter().any(|o| e.intersects_with(o)))
    }

    /// Axis-aligned intersection of the two rectangles, or `None` when they
    /// do not overlap. Rotated inputs are normalised first, so the result
    /// is the intersection of their tight axis-aligned covers.
    pub fn intersect(&self, other: &Rectangle) -> Option<Rectangle> {
        if !(self.is_axis_aligned() && other.is_axis_aligned()) {
            return self.normalise().intersect(&other.normalise());
        }
        if !self.intersects_with(other) {
            return None;
        }
        Some(Rectangle::from_corners(
            Point::new(self.left().max(other.left()), self.bottom().max(other.bottom())),
            Point::new(self.right().min(other.right()), self.top().min(other.top())),
        ))
    }

    /// The four edges in shoelace order.
    pub fn edges(&self) -> [Line; 4] {
        let c = self.corners();
        [
            Line::new(c[0], c[1]),
            Line::new(c[1], c[2]),
            Line::new(c[2], c[3]),
            Line::new(c[3], c[0]),
        ]
    }
}

// Area sums accumulate rounding over four triangles, so the tolerance is
// scaled by the magnitude involved.
fn approx_eq_area(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON * (1.0 + a.abs().max(b.abs()))
}

impl std::fmt::Display for Rectangle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{:.3},{:.3},{:.3},{:.3}]",
            self.left(),
            self.bottom(),
            self.right(),
            self.top()
        )
    }
}
