//! Nearest-neighbour transitive-closure clustering.
//!
//! Every layout algorithm in this library (word extraction, Docstrum line
//! and block building) groups elements the same way: each element picks at
//! most one nearest neighbour, and the groups are the connected components
//! of that directed graph. Neighbour relationships are intentionally
//! asymmetric — nearest-neighbour is not mutual — so the component walk
//! chases forward and reverse edges. Following only forward pointers would
//! split legitimate clusters.

use rayon::prelude::*;

use crate::distance::DistanceMeasure;
use crate::geometry::Point;
use crate::utils::run_parallel;

/// Groups elements by nearest-neighbour transitive closure using point
/// projections and a distance measure.
///
/// For each pivot passing `pivot_filter`, the nearest candidate under
/// `measure` between `pivot_point(pivot)` and `candidate_point(candidate)`
/// is selected among candidates passing `pair_filter`; the pairing is kept
/// only when its distance is strictly below `max_distance(pivot,
/// candidate)`. The returned groups partition `0..elements.len()`:
/// every index appears in exactly one group, isolated elements as
/// singletons.
#[allow(clippy::too_many_arguments)]
pub fn find_groups_by_points<T: Sync>(
    elements: &[T],
    pivot_point: impl Fn(&T) -> Point + Sync,
    candidate_point: impl Fn(&T) -> Point + Sync,
    measure: DistanceMeasure,
    max_distance: impl Fn(&T, &T) -> f64 + Sync,
    pivot_filter: impl Fn(&T) -> bool + Sync,
    pair_filter: impl Fn(&T, &T) -> bool + Sync,
    parallelism: usize,
) -> Vec<Vec<usize>> {
    find_groups(
        elements,
        |pivot, candidate| measure.measure(pivot_point(pivot), candidate_point(candidate)),
        max_distance,
        pivot_filter,
        pair_filter,
        parallelism,
    )
}

/// Groups elements by nearest-neighbour transitive closure under an
/// arbitrary element-to-element distance function.
///
/// The pivot itself is never a candidate for its own neighbour, so a
/// generous `max_distance` cannot pair an element with itself.
pub fn find_groups<T: Sync>(
    elements: &[T],
    distance: impl Fn(&T, &T) -> f64 + Sync,
    max_distance: impl Fn(&T, &T) -> f64 + Sync,
    pivot_filter: impl Fn(&T) -> bool + Sync,
    pair_filter: impl Fn(&T, &T) -> bool + Sync,
    parallelism: usize,
) -> Vec<Vec<usize>> {
    let n = elements.len();
    if n == 0 {
        return Vec::new();
    }

    // Phase 1: each element independently picks its nearest neighbour.
    let neighbours: Vec<Option<usize>> = run_parallel(parallelism, || {
        (0..n)
            .into_par_iter()
            .map(|i| {
                let pivot = &elements[i];
                if !pivot_filter(pivot) {
                    return None;
                }
                let mut best: Option<(usize, f64)> = None;
                for (j, candidate) in elements.iter().enumerate() {
                    if j == i || !pair_filter(pivot, candidate) {
                        continue;
                    }
                    let d = distance(pivot, candidate);
                    if best.is_none_or(|(_, bd)| d < bd) {
                        best = Some((j, d));
                    }
                }
                match best {
                    Some((j, d)) if d < max_distance(pivot, &elements[j]) => Some(j),
                    _ => None,
                }
            })
            .collect()
    });

    // Phase 2: reverse edges, so components can be chased both ways.
    let mut reverse: Vec<Vec<usize>> = vec![Vec::new(); n];
    for (i, neighbour) in neighbours.iter().enumerate() {
        if let Some(j) = neighbour {
            reverse[*j].push(i);
        }
    }

    // Phase 3: worklist walk over forward ∪ reverse edges.
    let mut visited = vec![false; n];
    let mut groups: Vec<Vec<usize>> = Vec::new();
    let mut worklist: Vec<usize> = Vec::new();
    for start in 0..n {
        if visited[start] {
            continue;
        }
        let mut group = Vec::new();
        visited[start] = true;
        worklist.push(start);
        while let Some(current) = worklist.pop() {
            group.push(current);
            if let Some(j) = neighbours[current] {
                if !visited[j] {
                    visited[j] = true;
                    worklist.push(j);
                }
            }
            for &j in &reverse[current] {
                if !visited[j] {
                    visited[j] = true;
                    worklist.push(j);
                }
            }
        }
        group.sort_unstable();
        groups.push(group);
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group_points(points: &[Point], max_distance: f64) -> Vec<Vec<usize>> {
        find_groups_by_points(
            points,
            |p| *p,
            |p| *p,
            DistanceMeasure::Euclidean,
            |_, _| max_distance,
            |_| true,
            |_, _| true,
            1,
        )
    }

    #[test]
    fn test_groups_partition_indices() {
        let points: Vec<Point> = (0..17)
            .map(|i| Point::new((i * 7 % 13) as f64, (i * 3 % 5) as f64))
            .collect();
        let groups = group_points(&points, 2.5);
        let mut seen: Vec<usize> = groups.iter().flatten().copied().collect();
        seen.sort_unstable();
        assert_eq!(seen, (0..17).collect::<Vec<_>>());
    }

    #[test]
    fn test_asymmetric_neighbours_still_merge() {
        // c's nearest is b, b's nearest is a: all three must end up in one
        // component even though a never points at c.
        let points = [
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(2.5, 0.0),
        ];
        let groups = group_points(&points, 2.0);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0], vec![0, 1, 2]);
    }

    #[test]
    fn test_isolated_elements_form_singletons() {
        let points = [
            Point::new(0.0, 0.0),
            Point::new(100.0, 0.0),
            Point::new(200.0, 0.0),
        ];
        let groups = group_points(&points, 5.0);
        assert_eq!(groups.len(), 3);
        assert!(groups.iter().all(|g| g.len() == 1));
    }

    #[test]
    fn test_max_distance_is_strict() {
        let points = [Point::new(0.0, 0.0), Point::new(2.0, 0.0)];
        // Distance equal to the bound must not pair.
        assert_eq!(group_points(&points, 2.0).len(), 2);
        assert_eq!(group_points(&points, 2.0 + 1e-9).len(), 1);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let points: Vec<Point> = (0..40)
            .map(|i| Point::new((i % 8) as f64 * 3.0, (i / 8) as f64 * 3.0))
            .collect();
        let sequential = group_points(&points, 3.5);
        let parallel = find_groups_by_points(
            &points,
            |p| *p,
            |p| *p,
            DistanceMeasure::Euclidean,
            |_, _| 3.5,
            |_| true,
            |_, _| true,
            4,
        );
        assert_eq!(sequential, parallel);
    }
}
