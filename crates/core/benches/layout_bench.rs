#[path = "common/mod.rs"]
mod common;

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};

use folio_core::analysis::{
    DocstrumBoundingBoxes, DocstrumBoundingBoxesOptions, NearestNeighbourWordExtractor,
    NearestNeighbourWordExtractorOptions, PageSegmenter, RecursiveXYCut,
    WhitespaceCoverExtractor, WhitespaceCoverOptions, WordExtractor,
};
use folio_core::geometry::{Point, graham_scan, minimum_area_rectangle};

use common::{XorShift64, letters_of, synthetic_page};

const SEED: u64 = 0x5eed_f011_0bad_cafe;

fn bench_word_extraction(c: &mut Criterion) {
    let mut group = c.benchmark_group("word_extraction");
    for &rows in &[10usize, 40] {
        let mut rng = XorShift64::new(SEED);
        let letters = letters_of(&synthetic_page(&mut rng, rows, 8));
        let extractor = NearestNeighbourWordExtractor::new(NearestNeighbourWordExtractorOptions {
            parallelism: 1,
            ..Default::default()
        });
        group.bench_with_input(
            BenchmarkId::from_parameter(letters.len()),
            &letters,
            |b, letters| b.iter(|| black_box(extractor.get_words(letters))),
        );
    }
    group.finish();
}

fn bench_page_segmentation(c: &mut Criterion) {
    let mut rng = XorShift64::new(SEED);
    let words = synthetic_page(&mut rng, 40, 8);

    let docstrum = DocstrumBoundingBoxes::new(DocstrumBoundingBoxesOptions {
        parallelism: 1,
        ..Default::default()
    });
    c.bench_function("docstrum_segmentation", |b| {
        b.iter(|| black_box(docstrum.get_blocks(&words)))
    });

    let xycut = RecursiveXYCut::default();
    c.bench_function("xycut_segmentation", |b| {
        b.iter(|| black_box(xycut.get_blocks(&words)))
    });
}

fn bench_whitespace_cover(c: &mut Criterion) {
    let mut rng = XorShift64::new(SEED);
    let words = synthetic_page(&mut rng, 30, 6);
    let extractor = WhitespaceCoverExtractor::new(WhitespaceCoverOptions {
        min_width: 4.0,
        min_height: 4.0,
        ..Default::default()
    });
    let images: Vec<folio_core::geometry::Rectangle> = Vec::new();
    c.bench_function("whitespace_cover", |b| {
        b.iter(|| black_box(extractor.get_whitespaces(&words, &images)))
    });
}

fn bench_convex_hull(c: &mut Criterion) {
    let mut rng = XorShift64::new(SEED);
    let points: Vec<Point> = (0..2000)
        .map(|_| Point::new(rng.range(0.0, 612.0), rng.range(0.0, 792.0)))
        .collect();
    c.bench_function("graham_scan_2000", |b| {
        b.iter(|| black_box(graham_scan(&points).ok()))
    });
    c.bench_function("minimum_area_rectangle_2000", |b| {
        b.iter(|| black_box(minimum_area_rectangle(&points).ok()))
    });
}

criterion_group!(
    benches,
    bench_word_extraction,
    bench_page_segmentation,
    bench_whitespace_cover,
    bench_convex_hull
);
criterion_main!(benches);
