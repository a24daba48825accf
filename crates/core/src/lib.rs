//! folio - document layout analysis for PDF pages.
//!
//! The crate takes positioned glyphs ([`Letter`]) produced by a content
//! stream interpreter and turns them into document structure: words,
//! lines, text blocks and page regions. Underneath the analysis sits a
//! small exact-arithmetic 2-D geometry kit (rotatable rectangles, cubic
//! Bézier curves, convex hulls, polygon clipping) that is usable on its
//! own.

pub mod analysis;
pub mod distance;
pub mod elements;
pub mod error;
pub mod geometry;
pub mod utils;

pub use analysis::{
    DecorationTextBlockClassifier, DecorationTextBlockClassifierOptions, DocstrumBoundingBoxes,
    DocstrumBoundingBoxesOptions, NearestNeighbourWordExtractor,
    NearestNeighbourWordExtractorOptions, PageSegmenter, RecursiveXYCut, RecursiveXYCutOptions,
    WhitespaceCoverExtractor, WhitespaceCoverOptions, WordExtractor, XYNode,
};
pub use distance::DistanceMeasure;
pub use elements::{ImageBounds, Letter, TextBlock, TextDirection, TextLine, Word};
pub use error::{LayoutError, Result};
pub use geometry::{CubicBezierCurve, Line, PdfPath, Point, Rectangle, Subpath};
