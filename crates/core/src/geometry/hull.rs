//! Convex hull and oriented rectangle cover algorithms.
//!
//! - Graham scan over a polar-angle ordering, keeping only the farthest
//!   point among angle ties
//! - Minimum-area rectangle by parametric perpendicular projection over
//!   every hull edge (rotating-calipers family, O(n²) over hull size)
//! - Oriented bounding box from a least-squares dominant orientation

use crate::error::{LayoutError, Result};
use crate::geometry::{Point, Rectangle, cross};
use crate::utils::{EPSILON, bound_of};

/// Computes the convex hull of a point set in counter-clockwise order.
///
/// Two or fewer distinct points are returned unchanged. An empty input is
/// a collaborator contract violation.
pub fn graham_scan(points: &[Point]) -> Result<Vec<Point>> {
    if points.is_empty() {
        return Err(LayoutError::EmptyInput {
            what: "convex hull",
        });
    }

    let mut distinct: Vec<Point> = Vec::with_capacity(points.len());
    for &p in points {
        if !distinct
            .iter()
            .any(|q| (q.x - p.x).abs() < EPSILON && (q.y - p.y).abs() < EPSILON)
        {
            distinct.push(p);
        }
    }
    if distinct.len() <= 2 {
        return Ok(distinct);
    }

    // Anchor at the lowest point, leftmost on ties.
    let mut anchor_idx = 0;
    for (i, p) in distinct.iter().enumerate() {
        let a = distinct[anchor_idx];
        if p.y < a.y || (p.y == a.y && p.x < a.x) {
            anchor_idx = i;
        }
    }
    let anchor = distinct.swap_remove(anchor_idx);

    let angle_of = |p: &Point| (p.y - anchor.y).atan2(p.x - anchor.x);
    let dist2_of = |p: &Point| (p.x - anchor.x).powi(2) + (p.y - anchor.y).powi(2);

    distinct.sort_by(|a, b| {
        angle_of(a)
            .total_cmp(&angle_of(b))
            .then(dist2_of(a).total_cmp(&dist2_of(b)))
    });

    // Collapse each polar-angle group to its farthest member.
    let mut candidates: Vec<Point> = Vec::with_capacity(distinct.len());
    for p in distinct {
        match candidates.last() {
            Some(last) if (angle_of(last) - angle_of(&p)).abs() < EPSILON => {
                // Sorted by distance within the group, so p is farther.
                *candidates.last_mut().unwrap() = p;
            }
            _ => candidates.push(p),
        }
    }

    if candidates.len() < 2 {
        let mut hull = vec![anchor];
        hull.extend(candidates);
        return Ok(hull);
    }

    let mut hull: Vec<Point> = vec![anchor, candidates[0]];
    for &p in &candidates[1..] {
        while hull.len() >= 2 && cross(hull[hull.len() - 2], hull[hull.len() - 1], p) <= 0.0 {
            hull.pop();
        }
        hull.push(p);
    }
    Ok(hull)
}

/// Computes the minimum-area rectangle covering the point set.
///
/// For every hull edge taken as candidate orientation, projects all hull
/// points onto the edge direction and its perpendicular and keeps the
/// smallest-area candidate. Degenerate hulls (collinear points) produce
/// the axis-aligned bound, which may have zero width or height.
pub fn minimum_area_rectangle(points: &[Point]) -> Result<Rectangle> {
    let hull = graham_scan(points)?;
    if hull.len() < 3 {
        return Ok(axis_aligned_bound(points));
    }

    let mut best: Option<(f64, Rectangle)> = None;
    let n = hull.len();
    for i in 0..n {
        let origin = hull[i];
        let next = hull[(i + 1) % n];
        let ex = next.x - origin.x;
        let ey = next.y - origin.y;
        let len = (ex * ex + ey * ey).sqrt();
        if len < EPSILON {
            continue;
        }
        let dir = Point::new(ex / len, ey / len);
        let perp = Point::new(-dir.y, dir.x);

        let mut min_d = f64::MAX;
        let mut max_d = f64::MIN;
        let mut min_p = f64::MAX;
        let mut max_p = f64::MIN;
        for q in &hull {
            let vx = q.x - origin.x;
            let vy = q.y - origin.y;
            let along = vx * dir.x + vy * dir.y;
            let across = vx * perp.x + vy * perp.y;
            min_d = min_d.min(along);
            max_d = max_d.max(along);
            min_p = min_p.min(across);
            max_p = max_p.max(across);
        }

        let area = (max_d - min_d) * (max_p - min_p);
        if best.as_ref().is_none_or(|(a, _)| area < *a) {
            let corner = |d: f64, p: f64| {
                Point::new(
                    origin.x + d * dir.x + p * perp.x,
                    origin.y + d * dir.y + p * perp.y,
                )
            };
            let rect = Rectangle::with_corners(
                corner(min_d, min_p),
                corner(max_d, min_p),
                corner(max_d, max_p),
                corner(min_d, max_p),
            );
            best = Some((area, rect));
        }
    }

    match best {
        Some((_, rect)) => Ok(rect),
        None => Ok(axis_aligned_bound(points)),
    }
}

/// Computes an oriented bounding box from a least-squares line fit.
///
/// The dominant orientation comes from fitting a line to the points; the
/// points are rotated into that frame, covered with an axis-aligned box,
/// and the box rotated back. Cheaper than the exact minimum-area search
/// and usually close for text-shaped clouds.
pub fn oriented_bounding_box(points: &[Point]) -> Result<Rectangle> {
    if points.is_empty() {
        return Err(LayoutError::EmptyInput {
            what: "oriented bounding box",
        });
    }
    if points.len() < 3 {
        return Ok(axis_aligned_bound(points));
    }

    let n = points.len() as f64;
    let sum_x: f64 = points.iter().map(|p| p.x).sum();
    let sum_y: f64 = points.iter().map(|p| p.y).sum();
    let sum_xy: f64 = points.iter().map(|p| p.x * p.y).sum();
    let sum_xx: f64 = points.iter().map(|p| p.x * p.x).sum();

    let denominator = n * sum_xx - sum_x * sum_x;
    let angle = if denominator.abs() < EPSILON {
        // All points on a vertical line.
        std::f64::consts::FRAC_PI_2
    } else {
        ((n * sum_xy - sum_x * sum_y) / denominator).atan()
    };

    let rotated: Vec<Point> = points.iter().map(|p| p.rotate(-angle)).collect();
    let (x0, y0, x1, y1) = bound_of(rotated).expect("non-empty by the check above");

    let bl = Point::new(x0, y0).rotate(angle);
    let br = Point::new(x1, y0).rotate(angle);
    let tr = Point::new(x1, y1).rotate(angle);
    let tl = Point::new(x0, y1).rotate(angle);
    Ok(Rectangle::with_corners(bl, br, tr, tl))
}

fn axis_aligned_bound(points: &[Point]) -> Rectangle {
    let (x0, y0, x1, y1) = bound_of(points.iter().copied()).unwrap_or((0.0, 0.0, 0.0, 0.0));
    Rectangle::from_corners(Point::new(x0, y0), Point::new(x1, y1))
}
