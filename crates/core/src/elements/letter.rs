//! Glyph-level unit: a letter with its bounding box and baseline.

use crate::geometry::{Point, Rectangle};
use crate::utils::approx_eq_eps;

/// Direction the text is laid out in, from the glyph's baseline rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TextDirection {
    /// Baseline pointing right (angle ≈ 0°).
    #[default]
    Horizontal,
    /// Baseline pointing down (angle ≈ -90°).
    Rotate90,
    /// Baseline pointing left (angle ≈ ±180°).
    Rotate180,
    /// Baseline pointing up (angle ≈ 90°).
    Rotate270,
    /// Any other angle (skewed or curved text).
    Unknown,
}

impl TextDirection {
    /// Classifies a baseline vector into one of the four axis directions,
    /// or [`TextDirection::Unknown`] for anything in between.
    pub fn from_baseline(start: Point, end: Point) -> Self {
        let degrees = (end.y - start.y).atan2(end.x - start.x).to_degrees();
        const TOL: f64 = 0.5;
        if approx_eq_eps(degrees, 0.0, TOL) {
            TextDirection::Horizontal
        } else if approx_eq_eps(degrees, -90.0, TOL) {
            TextDirection::Rotate90
        } else if approx_eq_eps(degrees.abs(), 180.0, TOL) {
            TextDirection::Rotate180
        } else if approx_eq_eps(degrees, 90.0, TOL) {
            TextDirection::Rotate270
        } else {
            TextDirection::Unknown
        }
    }
}

/// A positioned glyph. Created by the upstream content-stream layer;
/// read-only to the layout core.
#[derive(Debug, Clone, PartialEq)]
pub struct Letter {
    value: String,
    glyph_rectangle: Rectangle,
    start_base_line: Point,
    end_base_line: Point,
    font_size: f64,
    font_name: String,
    text_direction: TextDirection,
}

impl Letter {
    pub fn new(
        value: impl Into<String>,
        glyph_rectangle: Rectangle,
        start_base_line: Point,
        end_base_line: Point,
        font_size: f64,
        font_name: impl Into<String>,
        text_direction: TextDirection,
    ) -> Self {
        Self {
            value: value.into(),
            glyph_rectangle,
            start_base_line,
            end_base_line,
            font_size,
            font_name: font_name.into(),
            text_direction,
        }
    }

    /// Convenience constructor deriving the direction from the baseline.
    pub fn with_derived_direction(
        value: impl Into<String>,
        glyph_rectangle: Rectangle,
        start_base_line: Point,
        end_base_line: Point,
        font_size: f64,
        font_name: impl Into<String>,
    ) -> Self {
        let direction = TextDirection::from_baseline(start_base_line, end_base_line);
        Self::new(
            value,
            glyph_rectangle,
            start_base_line,
            end_base_line,
            font_size,
            font_name,
            direction,
        )
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn glyph_rectangle(&self) -> Rectangle {
        self.glyph_rectangle
    }

    pub fn start_base_line(&self) -> Point {
        self.start_base_line
    }

    pub fn end_base_line(&self) -> Point {
        self.end_base_line
    }

    pub fn font_size(&self) -> f64 {
        self.font_size
    }

    pub fn font_name(&self) -> &str {
        &self.font_name
    }

    pub fn text_direction(&self) -> TextDirection {
        self.text_direction
    }

    /// Whether the displayed value is empty or whitespace only.
    pub fn is_whitespace(&self) -> bool {
        self.value.chars().all(char::is_whitespace)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_from_baseline() {
        let o = Point::new(0.0, 0.0);
        assert_eq!(
            TextDirection::from_baseline(o, Point::new(1.0, 0.0)),
            TextDirection::Horizontal
        );
        assert_eq!(
            TextDirection::from_baseline(o, Point::new(0.0, -1.0)),
            TextDirection::Rotate90
        );
        assert_eq!(
            TextDirection::from_baseline(o, Point::new(-1.0, 0.0)),
            TextDirection::Rotate180
        );
        assert_eq!(
            TextDirection::from_baseline(o, Point::new(0.0, 1.0)),
            TextDirection::Rotate270
        );
        assert_eq!(
            TextDirection::from_baseline(o, Point::new(1.0, 1.0)),
            TextDirection::Unknown
        );
    }
}
