//! Miscellaneous routines shared across geometry and layout analysis.
//!
//! Provides:
//! - Floating-point comparison helpers with the library-wide tolerance
//! - Bounding helpers over point collections
//! - The parallel fan-out helper used by every parallel algorithm

use crate::geometry::Point;

/// Library-wide tolerance for treating near-equal floating values as equal.
pub const EPSILON: f64 = 1e-5;

/// Compares two floats for approximate equality under [`EPSILON`].
#[inline]
pub fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

/// Compares two floats for approximate equality under a caller tolerance.
#[inline]
pub fn approx_eq_eps(a: f64, b: f64, epsilon: f64) -> bool {
    (a - b).abs() < epsilon
}

/// Computes the minimal axis-aligned bound (x0, y0, x1, y1) covering all points.
///
/// Returns `None` for an empty iterator.
pub fn bound_of<I: IntoIterator<Item = Point>>(pts: I) -> Option<(f64, f64, f64, f64)> {
    let mut iter = pts.into_iter();
    let first = iter.next()?;
    let mut x0 = first.x;
    let mut y0 = first.y;
    let mut x1 = first.x;
    let mut y1 = first.y;

    for p in iter {
        x0 = x0.min(p.x);
        y0 = y0.min(p.y);
        x1 = x1.max(p.x);
        y1 = y1.max(p.y);
    }

    Some((x0, y0, x1, y1))
}

/// Runs `f` under a rayon pool with the requested degree of parallelism.
///
/// A degree of 0 uses the ambient rayon pool ("unbounded"); 1 gives fully
/// sequential execution for deterministic debugging; any other value builds
/// a local pool of that size. Pool construction failure falls back to the
/// ambient pool since the computed result is unaffected.
pub fn run_parallel<R: Send>(parallelism: usize, f: impl FnOnce() -> R + Send) -> R {
    if parallelism == 0 {
        return f();
    }
    match rayon::ThreadPoolBuilder::new()
        .num_threads(parallelism)
        .build()
    {
        Ok(pool) => pool.install(f),
        Err(_) => f(),
    }
}
