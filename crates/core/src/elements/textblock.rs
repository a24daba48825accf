//! A text block: ordered lines forming one layout unit.

use crate::elements::word::union_boxes;
use crate::elements::{TextLine, Word};
use crate::error::{LayoutError, Result};
use crate::geometry::Rectangle;

/// An ordered sequence of text lines forming a paragraph or column. The
/// bounding box is the union of the line boxes.
#[derive(Debug, Clone, PartialEq)]
pub struct TextBlock {
    lines: Vec<TextLine>,
    text: String,
    bounding_box: Rectangle,
}

impl TextBlock {
    /// Builds a block from lines already in reading order.
    pub fn new(lines: Vec<TextLine>) -> Result<Self> {
        if lines.is_empty() {
            return Err(LayoutError::EmptyInput { what: "text block" });
        }
        let text = lines
            .iter()
            .map(TextLine::text)
            .collect::<Vec<_>>()
            .join("\n");
        let bounding_box =
            union_boxes(lines.iter().map(|l| l.bounding_box())).expect("lines is non-empty");
        Ok(Self {
            lines,
            text,
            bounding_box,
        })
    }

    pub fn lines(&self) -> &[TextLine] {
        &self.lines
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn bounding_box(&self) -> Rectangle {
        self.bounding_box
    }

    /// All words of the block in reading order.
    pub fn words(&self) -> impl Iterator<Item = &Word> {
        self.lines.iter().flat_map(|l| l.words().iter())
    }
}
