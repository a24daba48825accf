//! A text line: ordered words sharing an approximate baseline.

use crate::elements::word::union_boxes;
use crate::elements::{TextDirection, Word};
use crate::error::{LayoutError, Result};
use crate::geometry::Rectangle;

/// An ordered sequence of words on one baseline. The bounding box is the
/// union of the word boxes.
#[derive(Debug, Clone, PartialEq)]
pub struct TextLine {
    words: Vec<Word>,
    text: String,
    bounding_box: Rectangle,
    text_direction: TextDirection,
}

impl TextLine {
    /// Builds a line from words already in reading order.
    pub fn new(words: Vec<Word>) -> Result<Self> {
        if words.is_empty() {
            return Err(LayoutError::EmptyInput { what: "text line" });
        }
        let text = words
            .iter()
            .map(Word::text)
            .collect::<Vec<_>>()
            .join(" ");
        let bounding_box =
            union_boxes(words.iter().map(|w| w.bounding_box())).expect("words is non-empty");
        let text_direction = dominant(&words);
        Ok(Self {
            words,
            text,
            bounding_box,
            text_direction,
        })
    }

    pub fn words(&self) -> &[Word] {
        &self.words
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn bounding_box(&self) -> Rectangle {
        self.bounding_box
    }

    pub fn text_direction(&self) -> TextDirection {
        self.text_direction
    }
}

fn dominant(words: &[Word]) -> TextDirection {
    let mut counts = rustc_hash::FxHashMap::default();
    for w in words {
        *counts.entry(w.text_direction()).or_insert(0usize) += 1;
    }
    words
        .iter()
        .map(Word::text_direction)
        .max_by_key(|d| counts[d])
        .unwrap_or_default()
}
