//! Recursive X-Y cut page segmentation.
//!
//! Alternating vertical and horizontal projection-profile cuts: project
//! the word boxes onto an axis, merge near-overlapping intervals, and cut
//! at gaps wider than the dominant glyph extent. Recursion alternates axes
//! until a region no longer splits.

use ordered_float::OrderedFloat;
use rustc_hash::FxHashMap;

use crate::analysis::PageSegmenter;
use crate::elements::{TextBlock, TextLine, Word};
use crate::geometry::Rectangle;

/// A node of the cut tree. Bounding boxes are computed bottom-up at
/// construction; changing the tree means rebuilding it.
#[derive(Debug, Clone)]
pub enum XYNode {
    Leaf {
        words: Vec<Word>,
        bounding_box: Rectangle,
    },
    Internal {
        children: Vec<XYNode>,
        bounding_box: Rectangle,
    },
}

impl XYNode {
    fn leaf(words: Vec<Word>) -> Self {
        let bounding_box = union_of(&words);
        XYNode::Leaf {
            words,
            bounding_box,
        }
    }

    fn internal(children: Vec<XYNode>) -> Self {
        let bounding_box = children
            .iter()
            .map(XYNode::bounding_box)
            .reduce(|a, b| a.union(&b))
            .unwrap_or_else(|| Rectangle::from_corners(Default::default(), Default::default()));
        XYNode::Internal {
            children,
            bounding_box,
        }
    }

    pub fn bounding_box(&self) -> Rectangle {
        match self {
            XYNode::Leaf { bounding_box, .. } | XYNode::Internal { bounding_box, .. } => {
                *bounding_box
            }
        }
    }

    /// Collects the leaves in reading order. Children are stored ordered
    /// along the axis their cut was made on (left to right for vertical
    /// cuts, top to bottom for horizontal ones), so a plain depth-first
    /// walk yields natural reading order.
    pub fn leaves(&self) -> Vec<&XYNode> {
        let mut out = Vec::new();
        self.collect_leaves(&mut out);
        out
    }

    fn collect_leaves<'a>(&'a self, out: &mut Vec<&'a XYNode>) {
        match self {
            XYNode::Leaf { .. } => out.push(self),
            XYNode::Internal { children, .. } => {
                for child in children {
                    child.collect_leaves(out);
                }
            }
        }
    }
}

fn union_of(words: &[Word]) -> Rectangle {
    words
        .iter()
        .map(|w| w.bounding_box())
        .reduce(|a, b| a.union(&b))
        .unwrap_or_else(|| Rectangle::from_corners(Default::default(), Default::default()))
}

/// Options for [`RecursiveXYCut`].
#[derive(Debug, Clone, Copy)]
pub struct RecursiveXYCutOptions {
    /// Regions narrower than this are never cut vertically, and a
    /// horizontal gap must also exceed it to trigger a cut.
    pub minimum_width: f64,
    /// Central-tendency measure over the glyph widths of a region, used
    /// as the interval-merge threshold on the X axis.
    pub dominant_font_width: fn(&[f64]) -> f64,
    /// Same for glyph heights on the Y axis.
    pub dominant_font_height: fn(&[f64]) -> f64,
}

impl Default for RecursiveXYCutOptions {
    fn default() -> Self {
        Self {
            minimum_width: 0.0,
            dominant_font_width: mode,
            dominant_font_height: mode,
        }
    }
}

/// The modal value, ties broken towards the smaller one; empty input
/// yields zero.
pub fn mode(values: &[f64]) -> f64 {
    let mut counts: FxHashMap<OrderedFloat<f64>, usize> = FxHashMap::default();
    for v in values {
        *counts.entry(OrderedFloat(*v)).or_insert(0) += 1;
    }
    counts
        .into_iter()
        .max_by(|(va, ca), (vb, cb)| ca.cmp(cb).then(vb.cmp(va)))
        .map(|(v, _)| v.0)
        .unwrap_or(0.0)
}

/// Recursive X-Y cut segmenter.
#[derive(Debug, Default)]
pub struct RecursiveXYCut {
    options: RecursiveXYCutOptions,
}

impl RecursiveXYCut {
    pub fn new(options: RecursiveXYCutOptions) -> Self {
        Self { options }
    }

    /// Builds the cut tree for the words. Whitespace-only words are not
    /// part of any projection profile; each becomes its own leaf.
    pub fn get_tree(&self, words: &[Word]) -> Option<XYNode> {
        if words.is_empty() {
            return None;
        }
        Some(self.vertical_cut(words.to_vec(), 0))
    }

    fn vertical_cut(&self, words: Vec<Word>, level: usize) -> XYNode {
        if words.len() <= 1 || union_of(&words).width() <= self.options.minimum_width {
            return XYNode::leaf(words);
        }
        let (mut text, stray): (Vec<Word>, Vec<Word>) =
            words.into_iter().partition(|w| !w.is_whitespace());
        if text.is_empty() {
            return XYNode::leaf(stray);
        }
        text.sort_by(|a, b| a.bounding_box().left().total_cmp(&b.bounding_box().left()));

        let threshold = glyph_threshold(&text, self.options.dominant_font_width, |r| r.width())
            .max(self.options.minimum_width);
        let intervals = split_at_gaps(
            &text,
            |w| (w.bounding_box().left(), w.bounding_box().right()),
            threshold,
        );

        if intervals.len() == 1 && stray.is_empty() {
            return self.horizontal_cut(text, level);
        }
        let mut children: Vec<XYNode> = intervals
            .into_iter()
            .map(|subset| self.horizontal_cut(subset, level + 1))
            .collect();
        children.extend(stray.into_iter().map(|w| XYNode::leaf(vec![w])));
        XYNode::internal(children)
    }

    fn horizontal_cut(&self, words: Vec<Word>, level: usize) -> XYNode {
        if words.len() <= 1 {
            return XYNode::leaf(words);
        }
        let (mut text, stray): (Vec<Word>, Vec<Word>) =
            words.into_iter().partition(|w| !w.is_whitespace());
        if text.is_empty() {
            return XYNode::leaf(stray);
        }
        text.sort_by(|a, b| a.bounding_box().bottom().total_cmp(&b.bounding_box().bottom()));

        let threshold =
            glyph_threshold(&text, self.options.dominant_font_height, |r| r.height());
        let intervals = split_at_gaps(
            &text,
            |w| (w.bounding_box().bottom(), w.bounding_box().top()),
            threshold,
        );

        if intervals.len() == 1 && stray.is_empty() {
            // A region that refuses to split on either axis is terminal;
            // one extra vertical attempt is allowed from the root.
            if level >= 1 {
                return XYNode::leaf(text);
            }
            return self.vertical_cut(text, level + 1);
        }
        // Intervals come out bottom-up; reading order wants top-down.
        let mut children: Vec<XYNode> = intervals
            .into_iter()
            .rev()
            .map(|subset| self.vertical_cut(subset, level + 1))
            .collect();
        children.extend(stray.into_iter().map(|w| XYNode::leaf(vec![w])));
        XYNode::internal(children)
    }

    fn leaf_to_block(&self, words: &[Word]) -> Option<TextBlock> {
        if words.is_empty() {
            return None;
        }
        let heights: Vec<f64> = words
            .iter()
            .flat_map(|w| w.letters())
            .map(|l| l.glyph_rectangle().height().abs())
            .collect();
        let tolerance = 0.5 * (self.options.dominant_font_height)(&heights);

        let mut ordered = words.to_vec();
        ordered.sort_by(|a, b| {
            b.bounding_box()
                .bottom()
                .total_cmp(&a.bounding_box().bottom())
                .then(a.bounding_box().left().total_cmp(&b.bounding_box().left()))
        });

        let mut lines: Vec<TextLine> = Vec::new();
        let mut current: Vec<Word> = Vec::new();
        let mut current_bottom = f64::NAN;
        for word in ordered {
            let bottom = word.bounding_box().bottom();
            if current.is_empty() || (bottom - current_bottom).abs() <= tolerance {
                if current.is_empty() {
                    current_bottom = bottom;
                }
                current.push(word);
            } else {
                lines.push(TextLine::new(std::mem::take(&mut current)).ok()?);
                current_bottom = bottom;
                current.push(word);
            }
        }
        if !current.is_empty() {
            lines.push(TextLine::new(current).ok()?);
        }
        TextBlock::new(lines).ok()
    }
}

/// Merged-interval projection: words already sorted by their interval
/// start. A gap strictly larger than `threshold` starts a new subset.
fn split_at_gaps(
    words: &[Word],
    interval: impl Fn(&Word) -> (f64, f64),
    threshold: f64,
) -> Vec<Vec<Word>> {
    let mut subsets: Vec<Vec<Word>> = Vec::new();
    let mut current: Vec<Word> = Vec::new();
    let mut current_end = f64::NEG_INFINITY;
    for word in words {
        let (start, end) = interval(word);
        if !current.is_empty() && start - current_end > threshold {
            subsets.push(std::mem::take(&mut current));
            current_end = f64::NEG_INFINITY;
        }
        current.push(word.clone());
        current_end = current_end.max(end);
    }
    if !current.is_empty() {
        subsets.push(current);
    }
    subsets
}

fn glyph_threshold(
    words: &[Word],
    measure: fn(&[f64]) -> f64,
    extent: impl Fn(&Rectangle) -> f64,
) -> f64 {
    let values: Vec<f64> = words
        .iter()
        .flat_map(|w| w.letters())
        .map(|l| extent(&l.glyph_rectangle()).abs())
        .collect();
    measure(&values)
}

impl PageSegmenter for RecursiveXYCut {
    fn get_blocks(&self, words: &[Word]) -> Vec<TextBlock> {
        let Some(tree) = self.get_tree(words) else {
            return Vec::new();
        };
        tree.leaves()
            .into_iter()
            .filter_map(|leaf| match leaf {
                XYNode::Leaf { words, .. } => self.leaf_to_block(words),
                XYNode::Internal { .. } => None,
            })
            .collect()
    }
}
