//! Docstrum page segmentation.
//!
//! A state-free pipeline in the style of O'Gorman's Docstrum:
//!
//! - estimate the typical within-line and between-line spacing from
//!   angle-filtered nearest-neighbour distances,
//! - cluster words into lines using the within-line estimate,
//! - cluster lines into blocks using the between-line estimate,
//! - merge blocks whose bounding rectangles overlap.

use rayon::prelude::*;
use rustc_hash::FxHashMap;

use crate::analysis::clustering::find_groups;
use crate::analysis::PageSegmenter;
use crate::distance::DistanceMeasure;
use crate::elements::{TextBlock, TextDirection, TextLine, Word};
use crate::geometry::Point;
use crate::utils::run_parallel;

/// An inclusive angle window in degrees, used to restrict which direction a
/// nearest neighbour may lie in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AngleBounds {
    pub lower: f64,
    pub upper: f64,
}

impl AngleBounds {
    pub fn new(lower: f64, upper: f64) -> Self {
        Self { lower, upper }
    }

    pub fn contains(&self, angle_degrees: f64) -> bool {
        angle_degrees >= self.lower && angle_degrees <= self.upper
    }
}

/// The angle of the vector `from -> to`, in degrees in (-180, 180].
fn angle_degrees(from: Point, to: Point) -> f64 {
    (to.y - from.y).atan2(to.x - from.x).to_degrees()
}

/// Options for [`DocstrumBoundingBoxes`].
#[derive(Debug, Clone, PartialEq)]
pub struct DocstrumBoundingBoxesOptions {
    /// Angle window for a word's within-line neighbour (roughly to its
    /// right).
    pub within_line_bounds: AngleBounds,
    /// Angle window for a word's between-line neighbour (roughly below
    /// it).
    pub between_line_bounds: AngleBounds,
    /// Scales the estimated between-line distance when clustering lines
    /// into blocks.
    pub between_line_multiplier: f64,
    /// Degree of parallelism: 0 uses the ambient pool, 1 is sequential.
    pub parallelism: usize,
}

impl Default for DocstrumBoundingBoxesOptions {
    fn default() -> Self {
        Self {
            within_line_bounds: AngleBounds::new(-30.0, 30.0),
            between_line_bounds: AngleBounds::new(-135.0, -45.0),
            between_line_multiplier: 1.3,
            parallelism: 0,
        }
    }
}

/// Docstrum page segmenter: statistical peak-distance estimation followed
/// by two transitive-closure clustering passes and an overlap fixup.
#[derive(Debug, Default)]
pub struct DocstrumBoundingBoxes {
    options: DocstrumBoundingBoxesOptions,
}

impl DocstrumBoundingBoxes {
    pub fn new(options: DocstrumBoundingBoxesOptions) -> Self {
        Self { options }
    }

    /// Estimates the modal within-line spacing of the words: the peak of
    /// the angle-filtered nearest-neighbour distance histogram. Returns
    /// `None` when no word has a neighbour in the window.
    pub fn within_line_distance(&self, words: &[Word]) -> Option<f64> {
        let bounds = self.options.within_line_bounds;
        let distances = nearest_distances(
            words,
            |w| bottom_right(w),
            |w| bottom_left(w),
            |w| bottom_right(w),
            |w| bottom_left(w),
            bounds,
            self.options.parallelism,
        );
        peak_average_distance(&distances)
    }

    /// Estimates the modal between-line spacing: the angle is taken from
    /// a word's bottom-left corner to a candidate's top-left corner, but
    /// the distance itself is measured centroid to centroid so it tracks
    /// line pitch rather than the raw vertical gap.
    pub fn between_line_distance(&self, words: &[Word]) -> Option<f64> {
        let bounds = self.options.between_line_bounds;
        let distances = nearest_distances(
            words,
            |w| bottom_left(w),
            |w| top_left(w),
            |w| w.bounding_box().centroid(),
            |w| w.bounding_box().centroid(),
            bounds,
            self.options.parallelism,
        );
        peak_average_distance(&distances)
    }

    fn build_lines(&self, words: &[Word], max_distance: f64) -> Vec<TextLine> {
        let bounds = self.options.within_line_bounds;
        let groups = find_groups(
            words,
            |pivot, candidate| {
                DistanceMeasure::Euclidean.measure(bottom_right(pivot), bottom_left(candidate))
            },
            |_, _| max_distance,
            |_| true,
            |pivot, candidate| {
                bounds.contains(angle_degrees(bottom_right(pivot), bottom_left(candidate)))
            },
            self.options.parallelism,
        );
        groups
            .into_iter()
            .map(|group| {
                let mut members: Vec<Word> =
                    group.into_iter().map(|i| words[i].clone()).collect();
                order_line(&mut members);
                TextLine::new(members).expect("groups are never empty")
            })
            .collect()
    }

    fn build_blocks(&self, lines: Vec<TextLine>, max_distance: f64) -> Vec<TextBlock> {
        let groups = find_groups(
            &lines,
            |a, b| overlapping_midpoint_distance(a, b),
            |_, _| max_distance,
            |_| true,
            |_, _| true,
            self.options.parallelism,
        );
        groups
            .into_iter()
            .map(|group| {
                let mut members: Vec<TextLine> =
                    group.into_iter().map(|i| lines[i].clone()).collect();
                members.sort_by(|a, b| {
                    b.bounding_box().top().total_cmp(&a.bounding_box().top())
                });
                TextBlock::new(members).expect("groups are never empty")
            })
            .collect()
    }

    /// Merges any two blocks whose bounding rectangles overlap. The pass
    /// runs once over all pairs rather than iterating to a fixpoint; the
    /// merged block's lines are rebuilt with an unbounded line distance so
    /// words that only became neighbours through the merge join up.
    fn merge_overlapping(&self, mut blocks: Vec<TextBlock>) -> Vec<TextBlock> {
        let mut i = 0;
        while i < blocks.len() {
            let mut j = i + 1;
            while j < blocks.len() {
                if blocks[i]
                    .bounding_box()
                    .intersects_with(&blocks[j].bounding_box())
                {
                    let absorbed = blocks.remove(j);
                    let mut words: Vec<Word> =
                        blocks[i].words().cloned().collect();
                    words.extend(absorbed.words().cloned());
                    let mut lines = self.build_lines(&words, f64::MAX);
                    lines.sort_by(|a, b| {
                        b.bounding_box().top().total_cmp(&a.bounding_box().top())
                    });
                    blocks[i] = TextBlock::new(lines).expect("merged block has words");
                } else {
                    j += 1;
                }
            }
            i += 1;
        }
        blocks
    }
}

impl PageSegmenter for DocstrumBoundingBoxes {
    fn get_blocks(&self, words: &[Word]) -> Vec<TextBlock> {
        let words: Vec<Word> = words.iter().filter(|w| !w.is_whitespace()).cloned().collect();
        if words.is_empty() {
            return Vec::new();
        }

        let within = self.within_line_distance(&words);
        let between = self.between_line_distance(&words);

        let line_distance = match (within, between) {
            (Some(w), Some(b)) => (3.0 * w).min(std::f64::consts::SQRT_2 * b),
            (Some(w), None) => 3.0 * w,
            (None, Some(b)) => std::f64::consts::SQRT_2 * b,
            // No neighbour anywhere: each word is its own line.
            (None, None) => 0.0,
        };
        let lines = self.build_lines(&words, line_distance);

        let block_distance = between
            .map(|b| self.options.between_line_multiplier * b)
            .unwrap_or(0.0);
        let blocks = self.build_blocks(lines, block_distance);

        self.merge_overlapping(blocks)
    }
}

fn bottom_left(word: &Word) -> Point {
    let b = word.bounding_box();
    Point::new(b.left(), b.bottom())
}

fn bottom_right(word: &Word) -> Point {
    let b = word.bounding_box();
    Point::new(b.right(), b.bottom())
}

fn top_left(word: &Word) -> Point {
    let b = word.bounding_box();
    Point::new(b.left(), b.top())
}

/// Orders a line's words by the line's dominant text direction:
/// left-to-right for horizontal text, the reverse for upside-down text,
/// top-to-bottom or bottom-to-top for the vertical rotations. An unknown
/// direction keeps the incoming order.
fn order_line(words: &mut [Word]) {
    let mut counts: FxHashMap<TextDirection, usize> = FxHashMap::default();
    for word in words.iter() {
        *counts.entry(word.text_direction()).or_insert(0) += 1;
    }
    let direction = words
        .iter()
        .map(Word::text_direction)
        .max_by_key(|d| counts[d])
        .unwrap_or_default();

    match direction {
        TextDirection::Horizontal => words.sort_by(|a, b| {
            a.bounding_box().left().total_cmp(&b.bounding_box().left())
        }),
        TextDirection::Rotate180 => words.sort_by(|a, b| {
            b.bounding_box().left().total_cmp(&a.bounding_box().left())
        }),
        TextDirection::Rotate90 => words.sort_by(|a, b| {
            b.bounding_box()
                .bottom()
                .total_cmp(&a.bounding_box().bottom())
        }),
        TextDirection::Rotate270 => words.sort_by(|a, b| {
            a.bounding_box()
                .bottom()
                .total_cmp(&b.bounding_box().bottom())
        }),
        TextDirection::Unknown => {}
    }
}

/// For every word in parallel, the distance to its nearest neighbour whose
/// direction (measured between the angle projections) falls inside
/// `bounds`. Distances are measured between the distance projections,
/// which may differ from the angle ones.
fn nearest_distances(
    words: &[Word],
    pivot_angle_point: impl Fn(&Word) -> Point + Sync,
    candidate_angle_point: impl Fn(&Word) -> Point + Sync,
    pivot_distance_point: impl Fn(&Word) -> Point + Sync,
    candidate_distance_point: impl Fn(&Word) -> Point + Sync,
    bounds: AngleBounds,
    parallelism: usize,
) -> Vec<f64> {
    run_parallel(parallelism, || {
        (0..words.len())
            .into_par_iter()
            .filter_map(|i| {
                let pivot = &words[i];
                let mut best: Option<f64> = None;
                for (j, candidate) in words.iter().enumerate() {
                    if j == i {
                        continue;
                    }
                    let angle = angle_degrees(
                        pivot_angle_point(pivot),
                        candidate_angle_point(candidate),
                    );
                    if !bounds.contains(angle) {
                        continue;
                    }
                    let d = DistanceMeasure::Euclidean.measure(
                        pivot_distance_point(pivot),
                        candidate_distance_point(candidate),
                    );
                    if best.is_none_or(|bd| d < bd) {
                        best = Some(d);
                    }
                }
                best
            })
            .collect()
    })
}

/// The average distance around the modal histogram bucket (bucket width of
/// one unit, peak bucket plus its two neighbours).
fn peak_average_distance(distances: &[f64]) -> Option<f64> {
    if distances.is_empty() {
        return None;
    }
    let mut counts: FxHashMap<i64, usize> = FxHashMap::default();
    for d in distances {
        *counts.entry(d.round() as i64).or_insert(0) += 1;
    }
    // Ties break towards the smaller bucket for determinism.
    let peak = counts
        .iter()
        .max_by(|(ka, ca), (kb, cb)| ca.cmp(cb).then(kb.cmp(ka)))
        .map(|(k, _)| *k)?;
    let near: Vec<f64> = distances
        .iter()
        .copied()
        .filter(|d| (d.round() as i64 - peak).abs() <= 1)
        .collect();
    Some(near.iter().sum::<f64>() / near.len() as f64)
}

/// Distance between two lines for block clustering: the lines must
/// horizontally overlap, and the distance is measured vertically between
/// their centroids at the overlap midpoint. Non-overlapping lines are
/// infinitely far apart.
fn overlapping_midpoint_distance(a: &TextLine, b: &TextLine) -> f64 {
    let (ba, bb) = (a.bounding_box(), b.bounding_box());
    let left = ba.left().max(bb.left());
    let right = ba.right().min(bb.right());
    if right < left {
        return f64::MAX;
    }
    let mid = 0.5 * (left + right);
    DistanceMeasure::Euclidean.measure(
        Point::new(mid, ba.centroid().y),
        Point::new(mid, bb.centroid().y),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::{Letter, TextDirection};
    use crate::geometry::Rectangle;

    fn word_facing(text: &str, x0: f64, y0: f64, direction: TextDirection) -> Word {
        let letters: Vec<Letter> = text
            .chars()
            .enumerate()
            .map(|(i, c)| {
                let lx = x0 + i as f64 * 5.0;
                Letter::new(
                    c.to_string(),
                    Rectangle::from_corners(
                        Point::new(lx, y0),
                        Point::new(lx + 5.0, y0 + 10.0),
                    ),
                    Point::new(lx, y0),
                    Point::new(lx + 5.0, y0),
                    10.0,
                    "F1",
                    direction,
                )
            })
            .collect();
        Word::new(letters).unwrap()
    }

    fn word_at(text: &str, x0: f64, y0: f64) -> Word {
        word_facing(text, x0, y0, TextDirection::Horizontal)
    }

    /// Three rows of three words each, regular spacing.
    fn grid() -> Vec<Word> {
        let mut words = Vec::new();
        for row in 0..3 {
            let y = 100.0 - row as f64 * 15.0;
            for col in 0..3 {
                words.push(word_at("abc", col as f64 * 25.0, y));
            }
        }
        words
    }

    #[test]
    fn test_peak_distances_on_regular_grid() {
        let segmenter = DocstrumBoundingBoxes::new(DocstrumBoundingBoxesOptions {
            parallelism: 1,
            ..Default::default()
        });
        let words = grid();
        // Word boxes are 15 wide at x = 0, 25, 50: the bottom-right to
        // bottom-left gap is 10.
        let within = segmenter.within_line_distance(&words).unwrap();
        assert!((within - 10.0).abs() < 0.5, "within = {within}");
        // Rows are 15 apart; centroid-to-centroid distance equals the
        // pitch.
        let between = segmenter.between_line_distance(&words).unwrap();
        assert!((between - 15.0).abs() < 0.5, "between = {between}");
    }

    #[test]
    fn test_grid_segments_into_one_block_of_three_lines() {
        let segmenter = DocstrumBoundingBoxes::new(DocstrumBoundingBoxesOptions {
            parallelism: 1,
            ..Default::default()
        });
        let blocks = segmenter.get_blocks(&grid());
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].lines().len(), 3);
        assert!(blocks[0].lines().iter().all(|l| l.words().len() == 3));
        // Lines come out top-down.
        let tops: Vec<f64> = blocks[0]
            .lines()
            .iter()
            .map(|l| l.bounding_box().top())
            .collect();
        assert!(tops.windows(2).all(|w| w[0] > w[1]));
    }

    #[test]
    fn test_distant_columns_form_separate_blocks() {
        let mut words = grid();
        for row in 0..3 {
            let y = 100.0 - row as f64 * 15.0;
            words.push(word_at("xyz", 500.0, y));
        }
        let segmenter = DocstrumBoundingBoxes::new(DocstrumBoundingBoxesOptions {
            parallelism: 1,
            ..Default::default()
        });
        let blocks = segmenter.get_blocks(&words);
        assert_eq!(blocks.len(), 2);
    }

    #[test]
    fn test_empty_input_yields_no_blocks() {
        let segmenter = DocstrumBoundingBoxes::default();
        assert!(segmenter.get_blocks(&[]).is_empty());
    }

    #[test]
    fn test_upside_down_line_reads_right_to_left() {
        // Upside-down text starts at the rightmost word.
        let words = vec![
            word_facing("dlrow", 0.0, 50.0, TextDirection::Rotate180),
            word_facing("olleh", 35.0, 50.0, TextDirection::Rotate180),
        ];
        let segmenter = DocstrumBoundingBoxes::new(DocstrumBoundingBoxesOptions {
            parallelism: 1,
            ..Default::default()
        });
        let blocks = segmenter.get_blocks(&words);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].lines().len(), 1);
        assert_eq!(blocks[0].lines()[0].text(), "olleh dlrow");
    }

    #[test]
    fn test_peak_average_ignores_outliers() {
        let mut distances = vec![10.0, 10.2, 9.8, 10.1, 9.9];
        distances.push(300.0);
        let peak = peak_average_distance(&distances).unwrap();
        assert!((peak - 10.0).abs() < 0.5);
    }
}
