//! Decoration classification: headers, footers and other blocks repeated
//! across pages.
//!
//! A block is a decoration when a same-ranked block on a neighbouring
//! page looks like it, both in content (edit distance after collapsing
//! page numbers) and in placement (overlap of the bounding boxes). For
//! documents longer than three pages neighbours are taken two pages away,
//! so two-sided layouts with alternating margins compare like with like.

use once_cell::sync::Lazy;
use rayon::prelude::*;
use regex::Regex;

use crate::elements::TextBlock;
use crate::error::{LayoutError, Result};
use crate::utils::run_parallel;

/// Digits and roman numerals collapse to a placeholder before comparing
/// content, so "Page 3 of 12" matches "Page 4 of 12".
static NUMBERING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(\d+|[IVXLCDMivxlcdm]+)\b").unwrap());

/// Options for [`DecorationTextBlockClassifier`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecorationTextBlockClassifierOptions {
    /// Minimum combined similarity for a block to count as decoration.
    pub similarity_threshold: f64,
    /// How many blocks from each edge of the page are candidates.
    pub n: usize,
    /// Degree of parallelism: 0 uses the ambient pool, 1 is sequential.
    pub parallelism: usize,
}

impl Default for DecorationTextBlockClassifierOptions {
    fn default() -> Self {
        Self {
            similarity_threshold: 0.25,
            n: 5,
            parallelism: 0,
        }
    }
}

/// Flags repeated header/footer/margin blocks across the pages of a
/// document.
#[derive(Debug, Default)]
pub struct DecorationTextBlockClassifier {
    options: DecorationTextBlockClassifierOptions,
}

impl DecorationTextBlockClassifier {
    pub fn new(options: DecorationTextBlockClassifierOptions) -> Self {
        Self { options }
    }

    /// Returns, per page, the blocks classified as decorations, in the
    /// page's original block order. Needs at least two pages to have
    /// anything to compare against.
    pub fn get(&self, pages: &[Vec<TextBlock>]) -> Result<Vec<Vec<TextBlock>>> {
        if pages.len() < 2 {
            return Err(LayoutError::NotEnoughPages {
                required: 2,
                got: pages.len(),
            });
        }
        let count = pages.len();
        let flags: Vec<Vec<bool>> = run_parallel(self.options.parallelism, || {
            (0..count)
                .into_par_iter()
                .map(|page_index| {
                    let page_number = page_index + 1;
                    let previous = &pages[previous_page_number(page_number, count) - 1];
                    let next = &pages[next_page_number(page_number, count) - 1];
                    self.classify_page(&pages[page_index], previous, next)
                })
                .collect()
        });

        Ok(pages
            .iter()
            .zip(flags)
            .map(|(page, page_flags)| {
                page.iter()
                    .zip(page_flags)
                    .filter(|(_, flagged)| *flagged)
                    .map(|(block, _)| block.clone())
                    .collect()
            })
            .collect())
    }

    fn classify_page(
        &self,
        page: &[TextBlock],
        previous: &[TextBlock],
        next: &[TextBlock],
    ) -> Vec<bool> {
        let mut flagged = vec![false; page.len()];
        for ordering in ORDERINGS {
            let current = ranked(page, ordering, self.options.n);
            let prev_ranked = ranked(previous, ordering, self.options.n);
            let next_ranked = ranked(next, ordering, self.options.n);
            for (rank, &block_index) in current.iter().enumerate() {
                let block = &page[block_index];
                let mut total = 0.0;
                let mut compared = 0;
                if let Some(&p) = prev_ranked.get(rank) {
                    total += similarity(block, &previous[p]);
                    compared += 1;
                }
                if let Some(&n) = next_ranked.get(rank) {
                    total += similarity(block, &next[n]);
                    compared += 1;
                }
                // Average over the neighbours that actually had a block at
                // this rank; a short neighbour page must not dilute the
                // score.
                if compared > 0 && total / compared as f64 >= self.options.similarity_threshold {
                    flagged[block_index] = true;
                }
            }
        }
        flagged
    }
}

#[derive(Debug, Clone, Copy)]
enum Ordering {
    TopDown,
    BottomUp,
    LeftRight,
    RightLeft,
}

const ORDERINGS: [Ordering; 4] = [
    Ordering::TopDown,
    Ordering::BottomUp,
    Ordering::LeftRight,
    Ordering::RightLeft,
];

/// Indices of the first `n` blocks under the ordering.
fn ranked(page: &[TextBlock], ordering: Ordering, n: usize) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..page.len()).collect();
    match ordering {
        Ordering::TopDown => indices.sort_by(|&a, &b| {
            page[b]
                .bounding_box()
                .top()
                .total_cmp(&page[a].bounding_box().top())
        }),
        Ordering::BottomUp => indices.sort_by(|&a, &b| {
            page[a]
                .bounding_box()
                .bottom()
                .total_cmp(&page[b].bounding_box().bottom())
        }),
        Ordering::LeftRight => indices.sort_by(|&a, &b| {
            page[a]
                .bounding_box()
                .left()
                .total_cmp(&page[b].bounding_box().left())
        }),
        Ordering::RightLeft => indices.sort_by(|&a, &b| {
            page[b]
                .bounding_box()
                .right()
                .total_cmp(&page[a].bounding_box().right())
        }),
    }
    indices.truncate(n);
    indices
}

/// Combined similarity: content agreement scaled by placement agreement.
fn similarity(a: &TextBlock, b: &TextBlock) -> f64 {
    content_similarity(a.text(), b.text()) * geometric_similarity(a, b)
}

/// One minus the normalised edit distance of the numbering-collapsed
/// texts. Two empty texts are identical.
fn content_similarity(a: &str, b: &str) -> f64 {
    let a = NUMBERING.replace_all(a, "@");
    let b = NUMBERING.replace_all(b, "@");
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let longest = a.len().max(b.len());
    if longest == 0 {
        return 1.0;
    }
    1.0 - levenshtein(&a, &b) as f64 / longest as f64
}

/// Overlap area over the larger of the two areas; disjoint boxes score
/// zero.
fn geometric_similarity(a: &TextBlock, b: &TextBlock) -> f64 {
    let (ba, bb) = (a.bounding_box(), b.bounding_box());
    let max_area = ba.area().max(bb.area());
    if max_area <= 0.0 {
        return 0.0;
    }
    match ba.intersect(&bb) {
        Some(overlap) => overlap.area() / max_area,
        None => 0.0,
    }
}

fn levenshtein(a: &[char], b: &[char]) -> usize {
    if a.is_empty() {
        return b.len();
    }
    let mut row: Vec<usize> = (0..=b.len()).collect();
    for (i, ca) in a.iter().enumerate() {
        let mut previous_diagonal = row[0];
        row[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let cost = if ca == cb { 0 } else { 1 };
            let value = (previous_diagonal + cost).min(row[j] + 1).min(row[j + 1] + 1);
            previous_diagonal = row[j + 1];
            row[j + 1] = value;
        }
    }
    row[b.len()]
}

/// The page compared against as "previous": two back for documents longer
/// than three pages, otherwise one back, falling forward when the
/// document starts too close. One-based page numbers.
fn previous_page_number(page: usize, count: usize) -> usize {
    let offset = if count > 3 { 2 } else { 1 };
    if page > offset {
        page - offset
    } else if page > 1 {
        page - 1
    } else {
        page + 1
    }
}

/// Mirror of [`previous_page_number`] looking forward.
fn next_page_number(page: usize, count: usize) -> usize {
    let offset = if count > 3 { 2 } else { 1 };
    if page + offset <= count {
        page + offset
    } else if page < count {
        page + 1
    } else {
        page - 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::{Letter, TextDirection, TextLine, Word};
    use crate::geometry::{Point, Rectangle};

    fn block(text: &str, x0: f64, y0: f64) -> TextBlock {
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
                    TextDirection::Horizontal,
                )
            })
            .collect();
        let word = Word::new(letters).unwrap();
        TextBlock::new(vec![TextLine::new(vec![word]).unwrap()]).unwrap()
    }

    #[test]
    fn test_single_page_is_rejected() {
        let classifier = DecorationTextBlockClassifier::default();
        let pages = vec![vec![block("alone", 0.0, 0.0)]];
        assert!(matches!(
            classifier.get(&pages),
            Err(LayoutError::NotEnoughPages { required: 2, got: 1 })
        ));
    }

    #[test]
    fn test_repeated_footer_is_flagged_on_long_document() {
        let classifier = DecorationTextBlockClassifier::new(DecorationTextBlockClassifierOptions {
            parallelism: 1,
            ..Default::default()
        });
        // Four pages: neighbours are two pages apart, so the alternating
        // footers on pages 1/3 and 2/4 compare against each other.
        let bodies = ["alpha beta gamma", "delta epsilon", "zeta eta theta", "iota kappa"];
        let pages: Vec<Vec<TextBlock>> = (1..=4)
            .map(|p| {
                vec![
                    // Bodies differ in text and never overlap across pages.
                    block(bodies[p - 1], 50.0, 300.0 + 100.0 * p as f64),
                    block(&format!("Page {p} of 4"), 50.0, 20.0),
                ]
            })
            .collect();
        let decorations = classifier.get(&pages).unwrap();
        for (p, page) in decorations.iter().enumerate() {
            assert_eq!(page.len(), 1, "page {}", p + 1);
            assert!(page[0].text().starts_with("Page"));
        }
    }

    #[test]
    fn test_three_page_document_compares_adjacent_pages_only() {
        let classifier = DecorationTextBlockClassifier::new(DecorationTextBlockClassifierOptions {
            parallelism: 1,
            ..Default::default()
        });
        // Pages 1 and 3 share a footer, but with only three pages each is
        // compared against page 2, whose footer differs completely.
        let pages = vec![
            vec![block("Page 1 of 3", 50.0, 20.0)],
            vec![block("entirely unrelated words here", 50.0, 400.0)],
            vec![block("Page 3 of 3", 50.0, 20.0)],
        ];
        let decorations = classifier.get(&pages).unwrap();
        assert!(decorations[0].is_empty());
        assert!(decorations[2].is_empty());
    }

    #[test]
    fn test_content_similarity_collapses_numbering() {
        assert!((content_similarity("Page 3 of 12", "Page 4 of 12") - 1.0).abs() < 1e-9);
        assert!((content_similarity("Chapter IV", "Chapter XII") - 1.0).abs() < 1e-9);
        assert!(content_similarity("header", "footer") < 0.7);
    }

    #[test]
    fn test_levenshtein_basics() {
        let chars = |s: &str| s.chars().collect::<Vec<_>>();
        assert_eq!(levenshtein(&chars("kitten"), &chars("sitting")), 3);
        assert_eq!(levenshtein(&chars(""), &chars("abc")), 3);
        assert_eq!(levenshtein(&chars("same"), &chars("same")), 0);
    }
}
