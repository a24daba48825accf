//! Word extraction: grouping adjacent same-font letters into words.

use crate::analysis::clustering::find_groups_by_points;
use crate::distance::DistanceMeasure;
use crate::elements::{Letter, TextDirection, Word};

/// Turns positioned letters into words.
pub trait WordExtractor {
    fn get_words(&self, letters: &[Letter]) -> Vec<Word>;
}

/// Options for [`NearestNeighbourWordExtractor`].
#[derive(Debug, Clone, PartialEq)]
pub struct NearestNeighbourWordExtractorOptions {
    /// The accepted gap between a letter's baseline end and the next
    /// letter's baseline start, relative to the larger glyph metric of the
    /// pair (width for horizontal text, height for rotated text).
    pub maximum_distance_multiplier: f64,
    /// Distance measure between baseline points.
    pub measure: DistanceMeasure,
    /// Degree of parallelism: 0 uses the ambient pool, 1 is sequential.
    pub parallelism: usize,
}

impl Default for NearestNeighbourWordExtractorOptions {
    fn default() -> Self {
        Self {
            maximum_distance_multiplier: 0.60,
            measure: DistanceMeasure::Euclidean,
            parallelism: 0,
        }
    }
}

/// Groups letters into words by directional nearest-neighbour chaining:
/// each letter's baseline end looks for the closest baseline start of a
/// letter in the same font, and the transitive closure of those pairings
/// forms the words.
///
/// Letters are bucketed by text direction first and the buckets processed
/// independently; there is no cross-direction merging.
#[derive(Debug, Default)]
pub struct NearestNeighbourWordExtractor {
    options: NearestNeighbourWordExtractorOptions,
}

impl NearestNeighbourWordExtractor {
    pub fn new(options: NearestNeighbourWordExtractorOptions) -> Self {
        Self { options }
    }

    fn extract_in_direction(&self, letters: Vec<&Letter>, direction: TextDirection) -> Vec<Word> {
        if letters.is_empty() {
            return Vec::new();
        }
        let multiplier = self.options.maximum_distance_multiplier;
        let groups = find_groups_by_points(
            &letters,
            |l| l.end_base_line(),
            |l| l.start_base_line(),
            self.options.measure,
            |pivot, candidate| {
                multiplier * glyph_metric(pivot, direction).max(glyph_metric(candidate, direction))
            },
            |pivot| !pivot.is_whitespace(),
            |pivot, candidate| {
                !candidate.is_whitespace()
                    && pivot.font_name().eq_ignore_ascii_case(candidate.font_name())
            },
            self.options.parallelism,
        );

        groups
            .into_iter()
            .map(|group| {
                let mut members: Vec<Letter> =
                    group.into_iter().map(|i| letters[i].clone()).collect();
                order_letters(&mut members, direction);
                Word::new(members).expect("groups are never empty")
            })
            .collect()
    }
}

/// The glyph extent relevant for the direction's advance axis.
fn glyph_metric(letter: &Letter, direction: TextDirection) -> f64 {
    let rect = letter.glyph_rectangle();
    match direction {
        TextDirection::Horizontal | TextDirection::Rotate180 => rect.width().abs(),
        TextDirection::Rotate90 | TextDirection::Rotate270 => rect.height().abs(),
        TextDirection::Unknown => rect.width().abs().max(rect.height().abs()),
    }
}

/// Orders a word's letters into reading order for the direction.
fn order_letters(letters: &mut [Letter], direction: TextDirection) {
    match direction {
        TextDirection::Horizontal => {
            letters.sort_by(|a, b| a.start_base_line().x.total_cmp(&b.start_base_line().x));
        }
        TextDirection::Rotate180 => {
            letters.sort_by(|a, b| b.start_base_line().x.total_cmp(&a.start_base_line().x));
        }
        TextDirection::Rotate90 => {
            letters.sort_by(|a, b| b.start_base_line().y.total_cmp(&a.start_base_line().y));
        }
        TextDirection::Rotate270 => {
            letters.sort_by(|a, b| a.start_base_line().y.total_cmp(&b.start_base_line().y));
        }
        // No reliable axis; keep the grouping order.
        TextDirection::Unknown => {}
    }
}

impl WordExtractor for NearestNeighbourWordExtractor {
    /// Extracts words from the letters. The five direction buckets are
    /// processed independently and concatenated: Horizontal, Rotate180,
    /// Rotate90, Rotate270, then Unknown.
    fn get_words(&self, letters: &[Letter]) -> Vec<Word> {
        const BUCKETS: [TextDirection; 5] = [
            TextDirection::Horizontal,
            TextDirection::Rotate180,
            TextDirection::Rotate90,
            TextDirection::Rotate270,
            TextDirection::Unknown,
        ];

        let mut words = Vec::new();
        for direction in BUCKETS {
            let bucket: Vec<&Letter> = letters
                .iter()
                .filter(|l| l.text_direction() == direction)
                .collect();
            words.extend(self.extract_in_direction(bucket, direction));
        }
        words
    }
}
