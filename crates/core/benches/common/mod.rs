//! Shared synthetic-page generation for benchmarks.

use folio_core::elements::{Letter, TextDirection, Word};
use folio_core::geometry::{Point, Rectangle};

/// Small deterministic PRNG so benchmark inputs are reproducible without
/// pulling a rand dependency into the bench profile.
pub struct XorShift64 {
    state: u64,
}

impl XorShift64 {
    pub fn new(seed: u64) -> Self {
        Self {
            state: seed.max(1),
        }
    }

    pub fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }

    pub fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    pub fn range(&mut self, low: f64, high: f64) -> f64 {
        low + self.next_f64() * (high - low)
    }
}

/// A page of words laid out in rows with jittered gaps, resembling a
/// single-column text page.
pub fn synthetic_page(rng: &mut XorShift64, rows: usize, words_per_row: usize) -> Vec<Word> {
    let mut words = Vec::with_capacity(rows * words_per_row);
    for row in 0..rows {
        let y = 760.0 - row as f64 * 14.0;
        let mut x = 40.0;
        for _ in 0..words_per_row {
            let length = 2 + (rng.next_u64() % 8) as usize;
            let letters: Vec<Letter> = (0..length)
                .map(|i| {
                    let lx = x + i as f64 * 5.0;
                    Letter::new(
                        "a",
                        Rectangle::from_corners(
                            Point::new(lx, y),
                            Point::new(lx + 5.0, y + 10.0),
                        ),
                        Point::new(lx, y),
                        Point::new(lx + 5.0, y),
                        10.0,
                        "F1",
                        TextDirection::Horizontal,
                    )
                })
                .collect();
            x += length as f64 * 5.0 + rng.range(3.0, 6.0);
            words.push(Word::new(letters).expect("letters is non-empty"));
        }
    }
    words
}

/// The letters of the page flattened back out, for word extraction
/// benchmarks.
pub fn letters_of(words: &[Word]) -> Vec<Letter> {
    words.iter().flat_map(|w| w.letters().iter().cloned()).collect()
}
