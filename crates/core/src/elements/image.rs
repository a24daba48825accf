//! Obstacle input from page images.

use crate::geometry::Rectangle;

/// The one thing the whitespace-cover extractor needs from an image: its
/// placed bounding rectangle. Implemented directly by [`Rectangle`] so
/// plain rectangles can stand in for images in tests and simple callers.
pub trait ImageBounds {
    fn bounding_box(&self) -> Rectangle;
}

impl ImageBounds for Rectangle {
    fn bounding_box(&self) -> Rectangle {
        *self
    }
}
