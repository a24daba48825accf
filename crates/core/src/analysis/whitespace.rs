//! Whitespace cover: maximal empty rectangles over a page background,
//! after Breuel's branch-and-bound algorithm.
//!
//! Candidate bounds live in a bounded priority queue scored to favour
//! tall rectangles. The best candidate is either accepted (empty enough,
//! touching the page border or an already accepted rectangle) or split
//! into up to four sub-bounds around its most central obstacle.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use ordered_float::OrderedFloat;
use smallvec::SmallVec;

use crate::elements::{ImageBounds, Word};
use crate::geometry::{Point, Rectangle};
use crate::utils::EPSILON;

/// Options for [`WhitespaceCoverExtractor`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WhitespaceCoverOptions {
    /// Rectangles narrower than this are never produced or explored.
    pub min_width: f64,
    /// Rectangles shorter than this are never produced or explored.
    pub min_height: f64,
    /// Stop after this many rectangles have been accepted.
    pub max_rectangle_count: usize,
    /// Fraction of a bound's area that obstacles may still cover for the
    /// bound to count as empty.
    pub whitespace_fuzziness: f64,
    /// Queue capacity; pushing beyond it evicts the lowest-scored
    /// candidate. Bounds memory on pathological pages at the cost of
    /// possibly dropping good candidates.
    pub max_bound_queue_size: usize,
}

impl Default for WhitespaceCoverOptions {
    fn default() -> Self {
        Self {
            min_width: 1.0,
            min_height: 1.0,
            max_rectangle_count: 40,
            whitespace_fuzziness: 0.15,
            max_bound_queue_size: 10_000,
        }
    }
}

/// A candidate bound together with the obstacles overlapping it.
#[derive(Debug, Clone)]
struct QueueEntry {
    bound: Rectangle,
    obstacles: Vec<Rectangle>,
    score: f64,
}

impl QueueEntry {
    fn new(bound: Rectangle, obstacles: Vec<Rectangle>) -> Self {
        // Tall rectangles (column gutters) are worth more than wide ones
        // of equal area.
        let score = bound.area() * (bound.height() / 4.0);
        Self {
            bound,
            obstacles,
            score,
        }
    }
}

impl PartialEq for QueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.score == other.score
    }
}

impl Eq for QueueEntry {}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        OrderedFloat(self.score).cmp(&OrderedFloat(other.score))
    }
}

/// A max-priority queue with a hard capacity: pushing past capacity
/// evicts the lowest-scored entry (which may be the pushed one).
#[derive(Debug)]
struct BoundedPriorityQueue {
    heap: BinaryHeap<QueueEntry>,
    capacity: usize,
}

impl BoundedPriorityQueue {
    fn new(capacity: usize) -> Self {
        Self {
            heap: BinaryHeap::new(),
            capacity: capacity.max(1),
        }
    }

    fn push(&mut self, entry: QueueEntry) {
        self.heap.push(entry);
        if self.heap.len() > self.capacity {
            let mut entries = std::mem::take(&mut self.heap).into_vec();
            if let Some(min) = entries
                .iter()
                .enumerate()
                .min_by_key(|(_, e)| OrderedFloat(e.score))
                .map(|(i, _)| i)
            {
                entries.swap_remove(min);
            }
            self.heap = BinaryHeap::from(entries);
        }
    }

    fn pop(&mut self) -> Option<QueueEntry> {
        self.heap.pop()
    }

    fn add_obstacle(&mut self, obstacle: Rectangle) {
        let mut entries = std::mem::take(&mut self.heap).into_vec();
        for entry in &mut entries {
            if overlaps_materially(&obstacle, &entry.bound) {
                entry.obstacles.push(obstacle);
            }
        }
        self.heap = BinaryHeap::from(entries);
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.heap.len()
    }
}

/// Finds up to `max_rectangle_count` maximal empty rectangles around the
/// given obstacles.
#[derive(Debug, Default)]
pub struct WhitespaceCoverExtractor {
    options: WhitespaceCoverOptions,
}

impl WhitespaceCoverExtractor {
    pub fn new(options: WhitespaceCoverOptions) -> Self {
        Self { options }
    }

    /// Covers the union of the words' and images' bounds. Returns an
    /// empty list when there are no obstacles at all, since there is no
    /// page bound to cover.
    pub fn get_whitespaces<I: ImageBounds>(
        &self,
        words: &[Word],
        images: &[I],
    ) -> Vec<Rectangle> {
        let mut obstacles: Vec<Rectangle> = words
            .iter()
            .filter(|w| !w.is_whitespace())
            .map(|w| w.bounding_box())
            .collect();
        obstacles.extend(images.iter().map(ImageBounds::bounding_box));

        let Some(bound) = obstacles
            .iter()
            .copied()
            .reduce(|a, b| a.union(&b))
        else {
            return Vec::new();
        };
        self.get_whitespaces_in_bound(&obstacles, bound)
    }

    /// Covers an explicit page bound. A degenerate bound (smaller than
    /// the minimum rectangle size) yields no rectangles; a bound with no
    /// obstacles yields the bound itself.
    pub fn get_whitespaces_in_bound(
        &self,
        obstacles: &[Rectangle],
        bound: Rectangle,
    ) -> Vec<Rectangle> {
        if bound.width() < self.options.min_width || bound.height() < self.options.min_height {
            return Vec::new();
        }

        let mut queue = BoundedPriorityQueue::new(self.options.max_bound_queue_size);
        // Obstacles are clipped to the bound, and only those left with
        // positive area matter: an obstacle sharing a mere edge covers
        // nothing, and keeping it would make the entry split around it
        // into a copy of itself.
        let initial: Vec<Rectangle> = obstacles
            .iter()
            .filter_map(|o| o.intersect(&bound))
            .filter(|o| o.area() > EPSILON)
            .collect();
        queue.push(QueueEntry::new(bound, initial));

        let mut selected: Vec<Rectangle> = Vec::new();
        let mut held: Vec<QueueEntry> = Vec::new();

        while let Some(entry) = queue.pop() {
            if self.is_empty_enough(&entry) {
                if selected
                    .iter()
                    .any(|s| s.contains_rectangle(&entry.bound, true))
                {
                    continue;
                }
                // Accept only rectangles anchored to the page border or to
                // an accepted neighbour; hold isolated ones until a
                // neighbour shows up.
                let anchored = touches_border(&entry.bound, &bound)
                    || selected.iter().any(|s| is_adjacent(&entry.bound, s));
                if !anchored {
                    held.push(entry);
                    continue;
                }
                let accepted = entry.bound;
                queue.add_obstacle(accepted);
                selected.push(accepted);
                if selected.len() >= self.options.max_rectangle_count {
                    break;
                }
                // Re-queue held entries: the new rectangle may anchor
                // them, and counts as an obstacle where it overlaps.
                for mut h in held.drain(..) {
                    if overlaps_materially(&accepted, &h.bound) {
                        h.obstacles.push(accepted);
                    }
                    queue.push(h);
                }
                continue;
            }

            for sub in self.split(&entry) {
                queue.push(sub);
            }
        }
        selected
    }

    fn is_empty_enough(&self, entry: &QueueEntry) -> bool {
        let fuzziness = self.options.whitespace_fuzziness;
        let bound_area = entry.bound.area();
        let mut covered = 0.0;
        for obstacle in &entry.obstacles {
            let Some(overlap) = obstacle.intersect(&entry.bound) else {
                continue;
            };
            let area = overlap.area();
            if area > obstacle.area().min(bound_area) * fuzziness {
                return false;
            }
            covered += area;
            if covered > bound_area * fuzziness {
                return false;
            }
        }
        true
    }

    /// Splits the bound around the obstacle nearest its centroid into the
    /// regions right of, left of, above and below that obstacle, keeping
    /// only those meeting the minimum size.
    fn split(&self, entry: &QueueEntry) -> SmallVec<[QueueEntry; 4]> {
        let bound = entry.bound;
        let centre = bound.centroid();
        let Some(pivot) = entry
            .obstacles
            .iter()
            .min_by_key(|o| OrderedFloat(squared_distance(o.centroid(), centre)))
            .copied()
        else {
            return SmallVec::new();
        };

        let candidates = [
            Rectangle::from_corners(
                Point::new(pivot.right(), bound.bottom()),
                Point::new(bound.right(), bound.top()),
            ),
            Rectangle::from_corners(
                Point::new(bound.left(), bound.bottom()),
                Point::new(pivot.left(), bound.top()),
            ),
            Rectangle::from_corners(
                Point::new(bound.left(), pivot.top()),
                Point::new(bound.right(), bound.top()),
            ),
            Rectangle::from_corners(
                Point::new(bound.left(), bound.bottom()),
                Point::new(bound.right(), pivot.bottom()),
            ),
        ];

        candidates
            .into_iter()
            .filter(|c| {
                c.width() >= self.options.min_width && c.height() >= self.options.min_height
            })
            .map(|c| {
                // The pivot itself only ever touches a candidate's edge, so
                // this filter drops it and every branch loses an obstacle;
                // that bounds the recursion depth.
                let obstacles: Vec<Rectangle> = entry
                    .obstacles
                    .iter()
                    .filter(|o| overlaps_materially(o, &c))
                    .copied()
                    .collect();
                QueueEntry::new(c, obstacles)
            })
            .collect()
    }
}

fn squared_distance(a: Point, b: Point) -> f64 {
    let (dx, dy) = (a.x - b.x, a.y - b.y);
    dx * dx + dy * dy
}

/// Whether the rectangles' intersection has positive area. Sharing an edge
/// or a corner does not count.
fn overlaps_materially(a: &Rectangle, b: &Rectangle) -> bool {
    a.intersect(b).is_some_and(|overlap| overlap.area() > EPSILON)
}

/// Whether `inner` has an edge lying on one of `bound`'s edges, within
/// tolerance. Containment alone never qualifies.
fn touches_border(inner: &Rectangle, bound: &Rectangle) -> bool {
    (inner.left() - bound.left()).abs() < EPSILON
        || (inner.right() - bound.right()).abs() < EPSILON
        || (inner.bottom() - bound.bottom()).abs() < EPSILON
        || (inner.top() - bound.top()).abs() < EPSILON
}

/// Whether two axis-aligned rectangles overlap or share an edge, within
/// tolerance.
fn is_adjacent(a: &Rectangle, b: &Rectangle) -> bool {
    a.left() <= b.right() + EPSILON
        && b.left() <= a.right() + EPSILON
        && a.bottom() <= b.top() + EPSILON
        && b.bottom() <= a.top() + EPSILON
}
