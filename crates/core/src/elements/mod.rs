//! Content model consumed and produced by layout analysis.
//!
//! [`Letter`] is created by the font/content-stream layer and is read-only
//! here; [`Word`], [`TextLine`] and [`TextBlock`] are built by the
//! extraction and segmentation algorithms and are immutable once built.

pub mod image;
pub mod letter;
pub mod textblock;
pub mod textline;
pub mod word;

pub use image::ImageBounds;
pub use letter::{Letter, TextDirection};
pub use textblock::TextBlock;
pub use textline::TextLine;
pub use word::Word;
