//! Layout analysis: words, lines, blocks and page structure.
//!
//! - [`clustering`]: the nearest-neighbour transitive-closure engine
//!   shared by every grouping algorithm here.
//! - [`words`]: letters into words.
//! - [`docstrum`] and [`xycut`]: words into text blocks.
//! - [`whitespace`]: maximal empty rectangles over a page.
//! - [`decoration`]: repeated header/footer detection across pages.

pub mod clustering;
pub mod decoration;
pub mod docstrum;
pub mod whitespace;
pub mod words;
pub mod xycut;

pub use decoration::{DecorationTextBlockClassifier, DecorationTextBlockClassifierOptions};
pub use docstrum::{AngleBounds, DocstrumBoundingBoxes, DocstrumBoundingBoxesOptions};
pub use whitespace::{WhitespaceCoverExtractor, WhitespaceCoverOptions};
pub use words::{NearestNeighbourWordExtractor, NearestNeighbourWordExtractorOptions, WordExtractor};
pub use xycut::{RecursiveXYCut, RecursiveXYCutOptions, XYNode};

use crate::elements::{TextBlock, Word};

/// Splits a page's words into text blocks.
pub trait PageSegmenter {
    fn get_blocks(&self, words: &[Word]) -> Vec<TextBlock>;
}
