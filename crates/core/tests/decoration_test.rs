//! Header/footer classification across pages.

mod fixtures;

use fixtures::word;
use folio_core::analysis::{DecorationTextBlockClassifier, DecorationTextBlockClassifierOptions};
use folio_core::elements::{TextBlock, TextLine};
use folio_core::error::LayoutError;

fn block(text: &str, x0: f64, y0: f64) -> TextBlock {
    TextBlock::new(vec![TextLine::new(vec![word(text, x0, y0)]).unwrap()]).unwrap()
}

fn classifier() -> DecorationTextBlockClassifier {
    DecorationTextBlockClassifier::new(DecorationTextBlockClassifierOptions {
        parallelism: 1,
        ..Default::default()
    })
}

#[test]
fn test_fewer_than_two_pages_is_an_error() {
    let classifier = classifier();
    assert!(matches!(
        classifier.get(&[]),
        Err(LayoutError::NotEnoughPages { required: 2, got: 0 })
    ));
    let one = vec![vec![block("only", 0.0, 0.0)]];
    assert!(classifier.get(&one).is_err());
}

#[test]
fn test_page_numbers_in_footers_are_recognised() {
    // Five pages, same footer position, only the number changes. With
    // more than three pages neighbours sit two pages apart.
    let bodies = [
        "wholly original opening",
        "methods and materials",
        "results were mixed",
        "discussion followed",
        "closing remarks made",
    ];
    let pages: Vec<Vec<TextBlock>> = (1..=5)
        .map(|p| {
            vec![
                block(bodies[p - 1], 40.0, 200.0 + 120.0 * p as f64),
                block(&format!("Page {p} of 5"), 40.0, 20.0),
            ]
        })
        .collect();
    let decorations = classifier().get(&pages).unwrap();
    assert_eq!(decorations.len(), 5);
    for (index, page) in decorations.iter().enumerate() {
        assert_eq!(page.len(), 1, "page {}", index + 1);
        assert!(page[0].text().starts_with("Page"));
    }
}

#[test]
fn test_three_page_wraparound_compares_adjacent_pages() {
    // Pages 1 and 3 share a footer, page 2 does not: in a three page
    // document each footer only meets page 2, so nothing is flagged.
    let pages = vec![
        vec![block("Page 1 of 3", 40.0, 20.0)],
        vec![block("different matter entirely", 40.0, 600.0)],
        vec![block("Page 3 of 3", 40.0, 20.0)],
    ];
    let decorations = classifier().get(&pages).unwrap();
    assert!(decorations[0].is_empty());
    assert!(decorations[1].is_empty());
    assert!(decorations[2].is_empty());
}

#[test]
fn test_moved_footer_is_not_decoration() {
    // Identical text but disjoint placement scores zero geometric
    // similarity.
    let pages = vec![
        vec![block("Confidential", 40.0, 20.0)],
        vec![block("Confidential", 400.0, 700.0)],
    ];
    let decorations = classifier().get(&pages).unwrap();
    assert!(decorations.iter().all(|p| p.is_empty()));
}

#[test]
fn test_short_neighbour_page_does_not_dilute_scores() {
    // The last page only carries a body block, so page 2's footer has no
    // next-page block at its rank. The score must average over the one
    // comparison actually made, not treat the missing page as similarity
    // zero.
    let pages = vec![
        vec![block("aaaaa", 40.0, 0.0), block("qqqq", 40.0, 200.0)],
        vec![block("aabbb", 40.0, 0.0), block("ssss", 40.0, 200.0)],
        vec![block("zzzz", 40.0, 200.0)],
    ];
    let decorations = classifier().get(&pages).unwrap();
    // "aaaaa" vs "aabbb" in the same spot scores 0.4 against the single
    // neighbour that has a block at that rank.
    assert_eq!(decorations[0].len(), 1);
    assert_eq!(decorations[0][0].text(), "aaaaa");
    assert_eq!(decorations[1].len(), 1);
    assert_eq!(decorations[1][0].text(), "aabbb");
    assert!(decorations[2].is_empty());
}

#[test]
fn test_result_preserves_page_block_order() {
    let pages: Vec<Vec<TextBlock>> = (1..=4)
        .map(|p| {
            vec![
                block("Journal of Tests", 40.0, 760.0),
                block(&format!("Page {p}"), 40.0, 20.0),
            ]
        })
        .collect();
    let decorations = classifier().get(&pages).unwrap();
    for page in &decorations {
        assert_eq!(page.len(), 2);
        assert_eq!(page[0].text(), "Journal of Tests");
        assert!(page[1].text().starts_with("Page"));
    }
}
