//! Error types for the folio layout-analysis library.

use thiserror::Error;

/// Primary error type for geometry and layout-analysis operations.
///
/// Only collaborator contract violations and internal invariant breaks are
/// errors. Degenerate geometry (parallel lines, empty intersections, zero
/// areas) is expressed through ordinary return values (`None`, `false`,
/// empty collections) because those cases are frequent in real documents.
#[derive(Error, Debug)]
pub enum LayoutError {
    #[error("empty input: {what} requires at least one element")]
    EmptyInput { what: &'static str },

    #[error("document must contain at least {required} pages, got {got}")]
    NotEnoughPages { required: usize, got: usize },

    #[error("invalid path: {0}")]
    InvalidPath(String),

    #[error("clipping solver invariant broken: {0}")]
    ClippingFailed(String),
}

/// Convenience Result type alias for LayoutError.
pub type Result<T> = std::result::Result<T, LayoutError>;
