//! Distance measures and linear nearest-neighbour searches.
//!
//! Every layout algorithm in this library does nearest-neighbour searches
//! over per-page arrays (tens to low thousands of elements), so the
//! searches are plain linear scans; the measure is a pluggable strategy.

use crate::geometry::{Line, Point};

/// A pluggable point-to-point distance metric.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DistanceMeasure {
    /// Straight-line distance.
    Euclidean,
    /// Sum of axis displacements.
    Manhattan,
    /// Euclidean with per-axis weights, e.g. to penalise vertical
    /// displacement more than horizontal when chaining words into lines.
    WeightedEuclidean { x_weight: f64, y_weight: f64 },
}

impl DistanceMeasure {
    /// Distance between two points under this measure.
    pub fn measure(&self, a: Point, b: Point) -> f64 {
        let dx = a.x - b.x;
        let dy = a.y - b.y;
        match self {
            DistanceMeasure::Euclidean => (dx * dx + dy * dy).sqrt(),
            DistanceMeasure::Manhattan => dx.abs() + dy.abs(),
            DistanceMeasure::WeightedEuclidean { x_weight, y_weight } => {
                (x_weight * dx * dx + y_weight * dy * dy).sqrt()
            }
        }
    }
}

/// Finds the index of the candidate point nearest to `pivot`, with its
/// distance. Returns `None` for an empty candidate list.
pub fn find_index_nearest_point(
    pivot: Point,
    candidates: &[Point],
    measure: DistanceMeasure,
) -> Option<(usize, f64)> {
    let mut best: Option<(usize, f64)> = None;
    for (i, &candidate) in candidates.iter().enumerate() {
        let d = measure.measure(pivot, candidate);
        if best.is_none_or(|(_, bd)| d < bd) {
            best = Some((i, d));
        }
    }
    best
}

/// Finds the index of the line whose nearest point is closest to `pivot`.
pub fn find_index_nearest_line(
    pivot: Point,
    candidates: &[Line],
    measure: DistanceMeasure,
) -> Option<(usize, f64)> {
    let mut best: Option<(usize, f64)> = None;
    for (i, line) in candidates.iter().enumerate() {
        let d = measure.measure(pivot, project_on_segment(pivot, line));
        if best.is_none_or(|(_, bd)| d < bd) {
            best = Some((i, d));
        }
    }
    best
}

/// Closest point to `p` on the segment.
fn project_on_segment(p: Point, line: &Line) -> Point {
    let dx = line.p2.x - line.p1.x;
    let dy = line.p2.y - line.p1.y;
    let len2 = dx * dx + dy * dy;
    if len2 == 0.0 {
        return line.p1;
    }
    let t = (((p.x - line.p1.x) * dx + (p.y - line.p1.y) * dy) / len2).clamp(0.0, 1.0);
    Point::new(line.p1.x + t * dx, line.p1.y + t * dy)
}
