//! Integration tests for paginated layout.

use resumark::render::{layout, measure, Color, LayoutPlan, PageSize, RenderOptions, StyleRule};
use resumark::{parse_text, Document, DocumentType, StyleSheet};

/// 200x644 page, 72pt margins: 56pt wide, 500pt tall, 12.5pt plain lines.
fn narrow_options() -> RenderOptions {
    let mut style = StyleSheet::ats();
    style.line_height = 1.25;
    style.plain_text = StyleRule::body(10.0, Color::BLACK);
    RenderOptions::new()
        .with_page_size(PageSize::custom(200.0, 644.0).unwrap())
        .with_margin(72.0)
        .with_style(style)
}

fn words(n: usize) -> Document {
    parse_text(&vec!["mmmmm"; n].join(" ")).unwrap()
}

fn assert_within_margins(plan: &LayoutPlan, options: &RenderOptions) {
    let right = options.page_size.width - options.margin;
    for page in &plan.pages {
        for line in &page.lines {
            assert!(line.y <= options.bottom_limit() + 0.01, "{:?}", line);
            assert!(line.y > options.margin, "{:?}", line);
            assert!(line.x >= options.margin - 0.01, "{:?}", line);
            let width = measure(&line.text, line.font_size, line.bold);
            assert!(line.x + width <= right + 0.01, "{:?}", line);
        }
    }
}

#[test]
fn test_eighty_lines_fill_two_pages() {
    let options = narrow_options();
    let plan = layout(&words(80), &options).unwrap();

    assert_eq!(plan.page_count(), 2);
    assert_eq!(plan.pages[0].lines.len(), 40);
    assert_eq!(plan.pages[1].lines.len(), 40);
    assert_within_margins(&plan, &options);
}

#[test]
fn test_second_page_starts_at_top() {
    let options = narrow_options();
    let plan = layout(&words(41), &options).unwrap();

    assert_eq!(plan.page_count(), 2);
    let first = &plan.pages[0].lines[0];
    let carried = &plan.pages[1].lines[0];
    assert_eq!(first.y, carried.y);
}

#[test]
fn test_page_count_grows_monotonically() {
    let options = RenderOptions::new();
    let mut previous = 0;
    for n in [1, 10, 30, 60, 120, 240] {
        let mut text = String::from("JANE DOE\nEXPERIENCE\n");
        for i in 0..n {
            text.push_str(&format!(
                "• Delivered project {} on schedule while mentoring engineers across teams\n",
                i
            ));
        }
        let doc = parse_text(&text).unwrap();
        let plan = layout(&doc, &options).unwrap();
        assert!(plan.page_count() >= previous, "{} bullets", n);
        assert_within_margins(&plan, &options);
        previous = plan.page_count();
    }
    assert!(previous > 1);
}

#[test]
fn test_line_order_preserved_across_pages() {
    let mut text = String::from("Jane Doe\nEXPERIENCE\n");
    for i in 0..150 {
        text.push_str(&format!("• Item {}\n", i));
    }
    let doc = parse_text(&text).unwrap();
    let plan = layout(&doc, &RenderOptions::new()).unwrap();

    let ordinals: Vec<usize> = plan.lines().map(|l| l.ordinal).collect();
    assert!(ordinals.windows(2).all(|w| w[0] <= w[1]));
    assert_eq!(ordinals.last(), Some(&151));
}

#[test]
fn test_a4_and_letter_differ() {
    let mut text = String::from("Jane Doe\nEXPERIENCE\n");
    for i in 0..200 {
        text.push_str(&format!("• Item {}\n", i));
    }
    let doc = parse_text(&text).unwrap();

    let letter = layout(&doc, &RenderOptions::new()).unwrap();
    let a4 = layout(&doc, &RenderOptions::new().with_page_size(PageSize::a4())).unwrap();
    assert_eq!(letter.page_size, PageSize::letter());
    assert_eq!(a4.page_size, PageSize::a4());
    assert!(a4.line_count() >= letter.line_count());
}

#[test]
fn test_empty_document_has_one_page() {
    let plan = layout(&Document::empty(DocumentType::CoverLetter), &RenderOptions::new()).unwrap();
    assert_eq!(plan.page_count(), 1);
    assert!(plan.pages[0].lines.is_empty());
}

#[test]
fn test_invalid_geometry_rejected() {
    let doc = words(3);
    assert!(layout(&doc, &RenderOptions::new().with_margin(-1.0)).is_err());
    assert!(layout(&doc, &RenderOptions::new().with_margin(400.0)).is_err());
    assert!(PageSize::custom(0.0, 100.0).is_err());
}
