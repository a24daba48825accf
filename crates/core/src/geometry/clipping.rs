//! Integer-scaled polygon clipping.
//!
//! Paths are scaled by a factor of 10 000 and snapped to integer
//! coordinates before clipping, so results are stable against tiny
//! floating-point wobble in the inputs. Bézier segments are flattened to
//! 10 line segments first since the clipper only operates on polygons.
//!
//! Closed (filled) subject subpaths are clipped with a
//! Sutherland-Hodgman-style sweep over the clip polygon's edges. Open
//! subject subpaths are clipped segment-by-segment against the clip
//! region, preserving separate open contours. Clip paths and closed
//! subjects are force-closed before clipping.

use itertools::Itertools;

use crate::error::{LayoutError, Result};
use crate::geometry::{PathCommand, PdfPath, Point, Subpath, cross};
use crate::utils::EPSILON;

/// Scaling factor applied before snapping coordinates to integers.
const SCALE: f64 = 10_000.0;

/// Segment count used when flattening Bézier commands for the clipper.
const BEZIER_SEGMENTS: usize = 10;

/// Nonzero-winding point-in-polygon test.
pub fn point_in_polygon(polygon: &[Point], point: Point) -> bool {
    if polygon.len() < 3 {
        return false;
    }
    let mut winding = 0i32;
    for i in 0..polygon.len() {
        let a = polygon[i];
        let b = polygon[(i + 1) % polygon.len()];
        if a.y <= point.y {
            if b.y > point.y && cross(a, b, point) > 0.0 {
                winding += 1;
            }
        } else if b.y <= point.y && cross(a, b, point) < 0.0 {
            winding -= 1;
        }
    }
    winding != 0
}

/// Computes the boolean intersection of `subject` with the region bounded
/// by `clip`.
///
/// Returns `Ok(None)` when the clipper finds no solution (the paths do not
/// overlap). A subpath whose first command is not a Move is a malformed
/// path and fails with [`LayoutError::InvalidPath`].
pub fn clip(subject: &PdfPath, clip: &PdfPath) -> Result<Option<PdfPath>> {
    validate(subject)?;
    validate(clip)?;

    let clip_polygons: Vec<Vec<Point>> = clip
        .subpaths()
        .iter()
        .filter(|s| !s.is_empty())
        .map(|s| scaled_polygon(s))
        .filter(|p| p.len() >= 3)
        .collect();
    if clip_polygons.is_empty() {
        return Ok(None);
    }

    let mut out_subpaths: Vec<Subpath> = Vec::new();
    for subpath in subject.subpaths().iter().filter(|s| !s.is_empty()) {
        if subpath.is_closed() {
            let polygon = scaled_polygon(subpath);
            if polygon.len() < 3 {
                continue;
            }
            for clip_polygon in &clip_polygons {
                let solution = clip_closed_polygon(&polygon, clip_polygon);
                if solution.len() >= 3 {
                    out_subpaths.push(closed_subpath(&solution));
                }
            }
        } else {
            let polyline = scaled_polygon(subpath);
            if polyline.len() < 2 {
                continue;
            }
            for clip_polygon in &clip_polygons {
                for contour in clip_open_polyline(&polyline, clip_polygon)? {
                    if contour.len() >= 2 {
                        out_subpaths.push(open_subpath(&contour));
                    }
                }
            }
        }
    }

    if out_subpaths.is_empty() {
        Ok(None)
    } else {
        Ok(Some(PdfPath::from_subpaths(out_subpaths)))
    }
}

fn validate(path: &PdfPath) -> Result<()> {
    for subpath in path.subpaths() {
        match subpath.commands().first() {
            None | Some(PathCommand::Move(_)) => {}
            Some(other) => {
                return Err(LayoutError::InvalidPath(format!(
                    "subpath must start with a Move command, found {other:?}"
                )));
            }
        }
    }
    Ok(())
}

/// Flattens a subpath and snaps it onto the scaled integer grid. The
/// trailing duplicate of the first point (from Close) is dropped so the
/// polygon is cyclic without repetition.
fn scaled_polygon(subpath: &Subpath) -> Vec<Point> {
    let mut polygon: Vec<Point> = subpath
        .to_polygon(BEZIER_SEGMENTS)
        .into_iter()
        .map(|p| Point::new((p.x * SCALE).round(), (p.y * SCALE).round()))
        .dedup()
        .collect();
    while polygon.len() > 1 && polygon.first() == polygon.last() {
        polygon.pop();
    }
    polygon
}

fn descale(p: Point) -> Point {
    Point::new(p.x / SCALE, p.y / SCALE)
}

fn closed_subpath(polygon: &[Point]) -> Subpath {
    let mut commands = Vec::with_capacity(polygon.len() + 1);
    commands.push(PathCommand::Move(descale(polygon[0])));
    let mut previous = descale(polygon[0]);
    for &p in &polygon[1..] {
        let q = descale(p);
        commands.push(PathCommand::Line(crate::geometry::Line::new(previous, q)));
        previous = q;
    }
    commands.push(PathCommand::Close);
    Subpath::from_commands(commands)
}

fn open_subpath(polyline: &[Point]) -> Subpath {
    let mut commands = Vec::with_capacity(polyline.len());
    commands.push(PathCommand::Move(descale(polyline[0])));
    let mut previous = descale(polyline[0]);
    for &p in &polyline[1..] {
        let q = descale(p);
        commands.push(PathCommand::Line(crate::geometry::Line::new(previous, q)));
        previous = q;
    }
    Subpath::from_commands(commands)
}

/// Signed doubled area of a cyclic polygon.
fn shoelace(polygon: &[Point]) -> f64 {
    let mut sum = 0.0;
    for i in 0..polygon.len() {
        let a = polygon[i];
        let b = polygon[(i + 1) % polygon.len()];
        sum += a.x * b.y - b.x * a.y;
    }
    sum
}

/// Sutherland-Hodgman sweep: clips the subject polygon against every edge
/// of the clip polygon in turn. The clip polygon is normalised to
/// counter-clockwise winding so "inside" is always the left half-plane.
fn clip_closed_polygon(subject: &[Point], clip_polygon: &[Point]) -> Vec<Point> {
    let mut clip_ccw: Vec<Point> = clip_polygon.to_vec();
    if shoelace(&clip_ccw) < 0.0 {
        clip_ccw.reverse();
    }

    let mut output = subject.to_vec();
    for i in 0..clip_ccw.len() {
        let a = clip_ccw[i];
        let b = clip_ccw[(i + 1) % clip_ccw.len()];

        let input = std::mem::take(&mut output);
        if input.is_empty() {
            return Vec::new();
        }
        for j in 0..input.len() {
            let s = input[j];
            let e = input[(j + 1) % input.len()];
            let s_inside = cross(a, b, s) >= 0.0;
            let e_inside = cross(a, b, e) >= 0.0;
            if e_inside {
                if !s_inside {
                    if let Some(p) = edge_intersection(s, e, a, b) {
                        push_snapped(&mut output, p);
                    }
                }
                push_snapped(&mut output, e);
            } else if s_inside {
                if let Some(p) = edge_intersection(s, e, a, b) {
                    push_snapped(&mut output, p);
                }
            }
        }
        if output.len() < 3 {
            return Vec::new();
        }
    }

    while output.len() > 1 && output.first() == output.last() {
        output.pop();
    }
    output
}

/// Intersection of segment s-e with the infinite line through a-b, snapped
/// to the integer grid. Parallel segments have no single crossing point.
fn edge_intersection(s: Point, e: Point, a: Point, b: Point) -> Option<Point> {
    let num = cross(a, b, s);
    let den = num - cross(a, b, e);
    if den.abs() < EPSILON {
        return None;
    }
    let t = num / den;
    Some(Point::new(
        (s.x + t * (e.x - s.x)).round(),
        (s.y + t * (e.y - s.y)).round(),
    ))
}

fn push_snapped(output: &mut Vec<Point>, p: Point) {
    if output.last().is_some_and(|q| *q == p) {
        return;
    }
    output.push(p);
}

/// Clips an open polyline against the clip region, returning the pieces
/// that lie inside as separate open contours.
fn clip_open_polyline(polyline: &[Point], clip_polygon: &[Point]) -> Result<Vec<Vec<Point>>> {
    let mut contours: Vec<Vec<Point>> = Vec::new();
    let mut current: Vec<Point> = Vec::new();

    for (&s, &e) in polyline.iter().tuple_windows() {
        // Parameters where the segment crosses any clip edge.
        let mut ts: Vec<f64> = vec![0.0, 1.0];
        for i in 0..clip_polygon.len() {
            let a = clip_polygon[i];
            let b = clip_polygon[(i + 1) % clip_polygon.len()];
            if let Some(t) = segment_crossing_parameter(s, e, a, b) {
                ts.push(t);
            }
        }
        ts.sort_by(f64::total_cmp);
        ts.dedup_by(|x, y| (*x - *y).abs() < 1e-9);
        if ts.len() < 2 || ts[0] > ts[ts.len() - 1] {
            return Err(LayoutError::ClippingFailed(
                "open-path crossing parameters out of order".to_string(),
            ));
        }

        for pair in ts.windows(2) {
            let (t0, t1) = (pair[0], pair[1]);
            let mid = Point::new(
                s.x + (t0 + t1) / 2.0 * (e.x - s.x),
                s.y + (t0 + t1) / 2.0 * (e.y - s.y),
            );
            let p0 = lerp_snapped(s, e, t0);
            let p1 = lerp_snapped(s, e, t1);
            if p0 == p1 {
                continue;
            }
            if point_in_polygon(clip_polygon, mid) {
                if current.last() != Some(&p0) {
                    if current.len() >= 2 {
                        contours.push(std::mem::take(&mut current));
                    } else {
                        current.clear();
                    }
                    current.push(p0);
                }
                current.push(p1);
            } else if current.len() >= 2 {
                contours.push(std::mem::take(&mut current));
            } else {
                current.clear();
            }
        }
    }
    if current.len() >= 2 {
        contours.push(current);
    }
    Ok(contours)
}

fn lerp_snapped(s: Point, e: Point, t: f64) -> Point {
    Point::new(
        (s.x + t * (e.x - s.x)).round(),
        (s.y + t * (e.y - s.y)).round(),
    )
}

/// Parameter t on s-e where it properly crosses segment a-b, if any.
fn segment_crossing_parameter(s: Point, e: Point, a: Point, b: Point) -> Option<f64> {
    let d1 = Point::new(e.x - s.x, e.y - s.y);
    let d2 = Point::new(b.x - a.x, b.y - a.y);
    let den = d1.x * d2.y - d1.y * d2.x;
    if den.abs() < EPSILON {
        return None;
    }
    let sx = a.x - s.x;
    let sy = a.y - s.y;
    let t = (sx * d2.y - sy * d2.x) / den;
    let u = (sx * d1.y - sy * d1.x) / den;
    if (-1e-9..=1.0 + 1e-9).contains(&t) && (-1e-9..=1.0 + 1e-9).contains(&u) {
        Some(t.clamp(0.0, 1.0))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Rectangle;
    use crate::utils::approx_eq;

    fn rect_path(x0: f64, y0: f64, x1: f64, y1: f64) -> PdfPath {
        PdfPath::rectangle(Rectangle::from_corners(
            Point::new(x0, y0),
            Point::new(x1, y1),
        ))
    }

    fn polygon_area(path: &PdfPath) -> f64 {
        path.subpaths()
            .iter()
            .map(|s| s.shoelace_sum().abs() / 2.0)
            .sum()
    }

    #[test]
    fn test_rectangle_overlap() {
        let subject = rect_path(0.0, 0.0, 10.0, 10.0);
        let clip_shape = rect_path(5.0, 5.0, 15.0, 15.0);
        let result = clip(&subject, &clip_shape).unwrap().unwrap();
        assert!(approx_eq(polygon_area(&result), 25.0));
    }

    #[test]
    fn test_clip_self_preserves_area() {
        let subject = rect_path(1.0, 2.0, 11.0, 7.0);
        let result = clip(&subject, &subject).unwrap().unwrap();
        assert!(approx_eq(polygon_area(&result), polygon_area(&subject)));
    }

    #[test]
    fn test_disjoint_paths_yield_none() {
        let subject = rect_path(0.0, 0.0, 1.0, 1.0);
        let clip_shape = rect_path(5.0, 5.0, 6.0, 6.0);
        assert!(clip(&subject, &clip_shape).unwrap().is_none());
    }

    #[test]
    fn test_open_polyline_is_split_into_contours() {
        // A horizontal zig crossing the clip square twice.
        let mut subject = PdfPath::new();
        subject.move_to(Point::new(-5.0, 2.0));
        subject.line_to(Point::new(15.0, 2.0));
        let clip_shape = rect_path(0.0, 0.0, 10.0, 10.0);
        let result = clip(&subject, &clip_shape).unwrap().unwrap();
        assert_eq!(result.subpaths().len(), 1);
        let sub = &result.subpaths()[0];
        assert!(!sub.is_closed());
        let poly = sub.to_polygon(1);
        assert!(approx_eq(poly.first().unwrap().x, 0.0));
        assert!(approx_eq(poly.last().unwrap().x, 10.0));
    }

    #[test]
    fn test_malformed_subpath_is_rejected() {
        let bad = PdfPath::from_subpaths(vec![Subpath::from_commands(vec![PathCommand::Line(
            crate::geometry::Line::new(Point::new(0.0, 0.0), Point::new(1.0, 1.0)),
        )])]);
        let clip_shape = rect_path(0.0, 0.0, 10.0, 10.0);
        assert!(matches!(
            clip(&bad, &clip_shape),
            Err(LayoutError::InvalidPath(_))
        ));
    }

    #[test]
    fn test_point_in_polygon_winding() {
        let square = [
            Point::new(0.0, 0.0),
            Point::new(4.0, 0.0),
            Point::new(4.0, 4.0),
            Point::new(0.0, 4.0),
        ];
        assert!(point_in_polygon(&square, Point::new(2.0, 2.0)));
        assert!(!point_in_polygon(&square, Point::new(5.0, 2.0)));
        // Winding is orientation independent.
        let reversed: Vec<Point> = square.iter().rev().copied().collect();
        assert!(point_in_polygon(&reversed, Point::new(2.0, 2.0)));
    }
}
