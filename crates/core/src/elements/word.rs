//! A word: ordered letters with a unifying bounding box.

use rustc_hash::FxHashMap;

use crate::elements::{Letter, TextDirection};
use crate::error::{LayoutError, Result};
use crate::geometry::Rectangle;

/// An ordered sequence of letters sharing a font and direction, produced
/// by the word extractor. Immutable once built; the letters are kept for
/// inspection by downstream consumers.
#[derive(Debug, Clone, PartialEq)]
pub struct Word {
    letters: Vec<Letter>,
    text: String,
    bounding_box: Rectangle,
    text_direction: TextDirection,
}

impl Word {
    /// Builds a word from letters already in reading order.
    pub fn new(letters: Vec<Letter>) -> Result<Self> {
        if letters.is_empty() {
            return Err(LayoutError::EmptyInput { what: "word" });
        }
        let text = letters.iter().map(Letter::value).collect();
        let bounding_box = union_boxes(letters.iter().map(|l| l.glyph_rectangle()))
            .expect("letters is non-empty");
        let text_direction = dominant_direction(&letters);
        Ok(Self {
            letters,
            text,
            bounding_box,
            text_direction,
        })
    }

    pub fn letters(&self) -> &[Letter] {
        &self.letters
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

    /// Whether every letter is whitespace.
    pub fn is_whitespace(&self) -> bool {
        self.letters.iter().all(Letter::is_whitespace)
    }
}

pub(crate) fn union_boxes(boxes: impl IntoIterator<Item = Rectangle>) -> Option<Rectangle> {
    let mut iter = boxes.into_iter();
    let first = iter.next()?.normalise();
    Some(iter.fold(first, |acc, b| acc.union(&b)))
}

pub(crate) fn dominant_direction(letters: &[Letter]) -> TextDirection {
    let mut counts: FxHashMap<TextDirection, usize> = FxHashMap::default();
    for letter in letters {
        *counts.entry(letter.text_direction()).or_insert(0) += 1;
    }
    letters
        .iter()
        .map(Letter::text_direction)
        .max_by_key(|d| counts[d])
        .unwrap_or_default()
}
