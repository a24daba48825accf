//! Shared builders for layout analysis tests.

use folio_core::elements::{Letter, TextDirection, Word};
use folio_core::geometry::{Point, Rectangle};

/// A glyph-box letter of the given width and height 10 sitting on the
/// baseline `y0`.
pub fn letter(value: &str, x0: f64, y0: f64, width: f64, font: &str) -> Letter {
    Letter::new(
        value,
        Rectangle::from_corners(Point::new(x0, y0), Point::new(x0 + width, y0 + 10.0)),
        Point::new(x0, y0),
        Point::new(x0 + width, y0),
        10.0,
        font,
        TextDirection::Horizontal,
    )
}

/// A horizontal word of 5-unit glyphs starting at (x0, y0).
pub fn word(text: &str, x0: f64, y0: f64) -> Word {
    let letters: Vec<Letter> = text
        .chars()
        .enumerate()
        .map(|(i, c)| letter(&c.to_string(), x0 + i as f64 * 5.0, y0, 5.0, "F1"))
        .collect();
    Word::new(letters).unwrap()
}

/// Rows of words on a regular grid: `columns` words per row, rows
/// `pitch` apart vertically, words `gap` apart horizontally.
pub fn word_grid(rows: usize, columns: usize, pitch: f64, gap: f64) -> Vec<Word> {
    let mut words = Vec::new();
    for row in 0..rows {
        let y = 500.0 - row as f64 * pitch;
        let mut x = 0.0;
        for _ in 0..columns {
            let w = word("abc", x, y);
            x = w.bounding_box().right() + gap;
            words.push(w);
        }
    }
    words
}
