//! Cubic Bézier curves and the polynomial solvers backing them.
//!
//! The curve supports polyline flattening (for clipping), an exact bounding
//! rectangle via the roots of its derivative, and line intersection via the
//! cubic obtained by substituting the parametric curve into the implicit
//! line equation. The cubic solver branches on the discriminant sign:
//! Cardano's formula when it is non-negative, Viète's trigonometric method
//! for three real roots otherwise, avoiding complex arithmetic entirely.

use smallvec::SmallVec;

use crate::geometry::{Line, Point, Rectangle};
use crate::utils::EPSILON;

/// An immutable cubic Bézier curve: start point, two control points, end point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicBezierCurve {
    pub start: Point,
    pub first_control: Point,
    pub second_control: Point,
    pub end: Point,
}

impl CubicBezierCurve {
    /// Creates a new curve.
    pub const fn new(start: Point, first_control: Point, second_control: Point, end: Point) -> Self {
        Self {
            start,
            first_control,
            second_control,
            end,
        }
    }

    /// Evaluates the curve at parameter `t` in [0, 1].
    pub fn point_at(&self, t: f64) -> Point {
        let u = 1.0 - t;
        let b0 = u * u * u;
        let b1 = 3.0 * u * u * t;
        let b2 = 3.0 * u * t * t;
        let b3 = t * t * t;
        Point::new(
            b0 * self.start.x + b1 * self.first_control.x + b2 * self.second_control.x + b3 * self.end.x,
            b0 * self.start.y + b1 * self.first_control.y + b2 * self.second_control.y + b3 * self.end.y,
        )
    }

    /// Flattens the curve into a polyline of `segments` straight pieces
    /// (`segments` + 1 points). At least one segment is always produced.
    pub fn to_polyline(&self, segments: usize) -> Vec<Point> {
        let n = segments.max(1);
        (0..=n).map(|i| self.point_at(i as f64 / n as f64)).collect()
    }

    /// Exact axis-aligned bounding rectangle.
    ///
    /// Extrema of each coordinate lie at the endpoints or at roots of the
    /// derivative, a quadratic in t.
    pub fn bounding_rectangle(&self) -> Rectangle {
        let mut xs: SmallVec<[f64; 6]> = SmallVec::new();
        let mut ys: SmallVec<[f64; 6]> = SmallVec::new();
        xs.push(self.start.x);
        xs.push(self.end.x);
        ys.push(self.start.y);
        ys.push(self.end.y);

        let (ax, bx, cx) = self.derivative_coefficients(|p| p.x);
        for t in solve_quadratic(ax, bx, cx) {
            if t > 0.0 && t < 1.0 {
                xs.push(self.point_at(t).x);
            }
        }
        let (ay, by, cy) = self.derivative_coefficients(|p| p.y);
        for t in solve_quadratic(ay, by, cy) {
            if t > 0.0 && t < 1.0 {
                ys.push(self.point_at(t).y);
            }
        }

        let x0 = xs.iter().copied().fold(f64::MAX, f64::min);
        let x1 = xs.iter().copied().fold(f64::MIN, f64::max);
        let y0 = ys.iter().copied().fold(f64::MAX, f64::min);
        let y1 = ys.iter().copied().fold(f64::MIN, f64::max);
        Rectangle::from_corners(Point::new(x0, y0), Point::new(x1, y1))
    }

    /// Whether the curve crosses the line segment.
    pub fn intersects_line(&self, line: &Line) -> bool {
        !self.intersect_line(line).is_empty()
    }

    /// Intersection points with a line segment, at most three.
    ///
    /// The bounding boxes give a cheap reject; otherwise the parametric
    /// curve is substituted into the implicit line equation
    /// `Ax + By + C = 0` and the resulting cubic solved for t in [0, 1]
    /// (with tolerance at the boundary).
    pub fn intersect_line(&self, line: &Line) -> SmallVec<[Point; 3]> {
        let mut out: SmallVec<[Point; 3]> = SmallVec::new();
        let segment_box = line.bounding_rectangle();
        if !self.bounding_rectangle().intersects_with(&segment_box) {
            return out;
        }

        let a = line.p2.y - line.p1.y;
        let b = line.p1.x - line.p2.x;
        let c = line.p2.x * line.p1.y - line.p1.x * line.p2.y;

        let (x3, x2, x1, x0) = self.parametric_coefficients(|p| p.x);
        let (y3, y2, y1, y0) = self.parametric_coefficients(|p| p.y);

        let roots = solve_cubic(
            a * x3 + b * y3,
            a * x2 + b * y2,
            a * x1 + b * y1,
            a * x0 + b * y0 + c,
        );

        for t in roots {
            if t < -EPSILON || t > 1.0 + EPSILON {
                continue;
            }
            let point = self.point_at(t.clamp(0.0, 1.0));
            // The root lies on the carrying line; restrict to the segment.
            if !segment_box.contains(point, true) {
                continue;
            }
            if !out.iter().any(|q| {
                crate::utils::approx_eq(q.x, point.x) && crate::utils::approx_eq(q.y, point.y)
            }) {
                out.push(point);
            }
        }
        out
    }

    /// Coefficients (a, b, c) of the derivative quadratic for one coordinate.
    fn derivative_coefficients(&self, coord: impl Fn(Point) -> f64) -> (f64, f64, f64) {
        let p0 = coord(self.start);
        let p1 = coord(self.first_control);
        let p2 = coord(self.second_control);
        let p3 = coord(self.end);
        (
            3.0 * (-p0 + 3.0 * p1 - 3.0 * p2 + p3),
            6.0 * (p0 - 2.0 * p1 + p2),
            3.0 * (p1 - p0),
        )
    }

    /// Coefficients (a3, a2, a1, a0) of one coordinate as a cubic in t.
    fn parametric_coefficients(&self, coord: impl Fn(Point) -> f64) -> (f64, f64, f64, f64) {
        let p0 = coord(self.start);
        let p1 = coord(self.first_control);
        let p2 = coord(self.second_control);
        let p3 = coord(self.end);
        (
            -p0 + 3.0 * p1 - 3.0 * p2 + p3,
            3.0 * p0 - 6.0 * p1 + 3.0 * p2,
            -3.0 * p0 + 3.0 * p1,
            p0,
        )
    }
}

/// Real roots of `a·x² + b·x + c = 0`.
///
/// Degenerates to the linear case when `a` is near zero; a negative
/// discriminant yields no real roots.
pub fn solve_quadratic(a: f64, b: f64, c: f64) -> SmallVec<[f64; 2]> {
    let mut out: SmallVec<[f64; 2]> = SmallVec::new();
    if a.abs() < EPSILON {
        if b.abs() >= EPSILON {
            out.push(-c / b);
        }
        return out;
    }
    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 {
        return out;
    }
    let sq = discriminant.sqrt();
    out.push((-b + sq) / (2.0 * a));
    if sq > 0.0 {
        out.push((-b - sq) / (2.0 * a));
    }
    out
}

/// Real roots of `a·x³ + b·x² + c·x + d = 0`.
///
/// `a` near zero falls back to the quadratic solver. Otherwise the cubic is
/// depressed and solved with Cardano's formula when the discriminant is
/// non-negative, or Viète's trigonometric method for the three-real-root
/// case (casus irreducibilis).
pub fn solve_cubic(a: f64, b: f64, c: f64, d: f64) -> SmallVec<[f64; 3]> {
    if a.abs() < EPSILON {
        return solve_quadratic(b, c, d).into_iter().collect();
    }

    let p = b / a;
    let q = c / a;
    let r = d / a;

    // Depressed cubic u^3 + alpha*u + beta = 0 with x = u - p/3.
    let alpha = q - p * p / 3.0;
    let beta = 2.0 * p * p * p / 27.0 - p * q / 3.0 + r;
    let shift = -p / 3.0;

    let discriminant = beta * beta / 4.0 + alpha * alpha * alpha / 27.0;

    let mut out: SmallVec<[f64; 3]> = SmallVec::new();
    if discriminant.abs() < EPSILON {
        // Repeated roots.
        let u = (-beta / 2.0).cbrt();
        out.push(2.0 * u + shift);
        out.push(-u + shift);
    } else if discriminant > 0.0 {
        let sq = discriminant.sqrt();
        let u = (-beta / 2.0 + sq).cbrt() + (-beta / 2.0 - sq).cbrt();
        out.push(u + shift);
    } else {
        // Three distinct real roots; alpha is necessarily negative here.
        let m = 2.0 * (-alpha / 3.0).sqrt();
        let arg = (3.0 * beta / (alpha * m)).clamp(-1.0, 1.0);
        let theta = arg.acos() / 3.0;
        for k in 0..3 {
            let angle = theta - 2.0 * std::f64::consts::PI * k as f64 / 3.0;
            out.push(m * angle.cos() + shift);
        }
    }
    out
}
