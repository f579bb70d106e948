use std::time::Instant;

use readsmore::{
    hit_test, layout_page, Dom, Node, Options, Overflow, Page, Size, TruncationController,
};

const FIVE_WORDS: &str = "alpha beta gamma delta epsilon";

fn controller(inline: bool) -> TruncationController<Page> {
    let mut page = Page::new(30);
    page.block("Heading");
    let el = page.block(FIVE_WORDS);
    let options = Options::new().words_count(3).inline(inline);
    let mut controller = TruncationController::new(page, vec![el], options);
    controller.initialize_now().unwrap();
    controller
}

fn row_text(rows: &[readsmore::Row], y: u16) -> Vec<&str> {
    rows.iter()
        .find(|r| r.y == y)
        .map(|r| r.segments.iter().map(|s| s.text.as_str()).collect())
        .unwrap_or_default()
}

// =============================================================================
// Layout
// =============================================================================

#[test]
fn test_sibling_toggle_on_own_row() {
    let controller = controller(false);
    let rows = layout_page(controller.dom());

    assert_eq!(rows.len(), 3);
    assert_eq!(row_text(&rows, 0), vec!["Heading"]);
    assert_eq!(row_text(&rows, 1), vec!["alpha beta gamma..."]);
    assert_eq!(row_text(&rows, 2), vec!["Read More"]);
}

#[test]
fn test_inline_toggle_continues_row() {
    let controller = controller(true);
    let rows = layout_page(controller.dom());

    assert_eq!(rows.len(), 2);
    assert_eq!(row_text(&rows, 1), vec!["alpha beta gamma...", "Read More"]);
    assert_eq!(rows[1].segments[1].x, 20);
}

#[test]
fn test_inline_toggle_wraps_when_full() {
    let mut page = Page::new(22);
    let el = page.block(FIVE_WORDS);
    let options = Options::new().words_count(3).inline(true);
    let mut controller = TruncationController::new(page, vec![el], options);
    controller.initialize_now().unwrap();

    let rows = layout_page(controller.dom());
    assert_eq!(rows.len(), 2);
    assert_eq!(row_text(&rows, 1), vec!["Read More"]);
    assert_eq!(controller.dom().outer_height(el), 2);
}

#[test]
fn test_fixed_height_clips_or_pads() {
    let mut page = Page::new(10);
    let el = page.block("one two three four five six");
    let natural = page.outer_height(el);
    assert_eq!(natural, 3);

    page.set_height(el, Size::Fixed(1));
    page.set_overflow(el, Overflow::Hidden);
    assert_eq!(layout_page(&page).len(), 1);
    assert_eq!(page.outer_height(el), 1);

    page.set_overflow(el, Overflow::Visible);
    assert_eq!(layout_page(&page).len(), 3);

    page.set_height(el, Size::Fixed(5));
    assert_eq!(layout_page(&page).len(), 5);
}

#[test]
fn test_resize_reflows() {
    let mut page = Page::new(10);
    let el = page.block("one two three four five six");
    assert_eq!(layout_page(&page).len(), 3);

    page.set_width(40);
    assert_eq!(page.outer_height(el), 1);
    assert_eq!(row_text(&layout_page(&page), 0), vec!["one two three four five six"]);

    // Zero is raised to one column, one word per row
    page.set_width(0);
    assert_eq!(page.width(), 1);
    assert_eq!(layout_page(&page).len(), 6);
}

#[test]
fn test_oversized_word_saturates() {
    let mut page = Page::new(10);
    let el = page.block("x".repeat(70_000));
    let wrap = page.create_node(Node::toggle_wrap("wrap"));
    let link = page.create_node(Node::toggle_link("t_0", "link", "Toggle"));
    page.append_child(wrap, link);
    page.append_child(el, wrap);

    let rows = layout_page(&page);
    assert_eq!(rows.len(), 2);
    assert!(rows[0].segments[0].contains(u16::MAX - 1));
    assert!(!rows[0].segments[0].contains(u16::MAX));
    assert_eq!(rows[1].segments[0].x, 0);
    assert_eq!(rows[1].segments[0].text, "Toggle");

    assert_eq!(hit_test(&page, &rows, 2, 1), Some("t_0".to_string()));
    assert_eq!(hit_test(&page, &rows, 40_000, 0), None);
    assert_eq!(page.outer_height(el), 2);
}

#[test]
fn test_markup_not_drawn() {
    let mut page = Page::new(40);
    page.block("<p>hello <em>there</em></p>");
    let rows = layout_page(&page);
    assert_eq!(row_text(&rows, 0), vec!["hello there"]);
}

// =============================================================================
// Hit Testing
// =============================================================================

#[test]
fn test_hit_test_toggle() {
    let controller = controller(false);
    let page = controller.dom();
    let rows = layout_page(page);

    assert_eq!(hit_test(page, &rows, 3, 2), Some("read-smore_0".to_string()));
    assert_eq!(hit_test(page, &rows, 12, 2), None);
    assert_eq!(hit_test(page, &rows, 3, 1), None);
    assert_eq!(hit_test(page, &rows, 0, 9), None);
}

#[test]
fn test_hit_test_inline_toggle_drives_controller() {
    let mut controller = controller(true);
    let rows = layout_page(controller.dom());

    let target = hit_test(controller.dom(), &rows, 22, 1).expect("toggle under point");
    assert!(controller.handle_click(&target, Instant::now()).unwrap());
    assert_eq!(controller.dom().html(controller.elements()[0]), FIVE_WORDS);

    let rows = layout_page(controller.dom());
    // The full text fills the row, so the label drops below it
    assert_eq!(row_text(&rows, 1), vec!["alpha beta gamma delta epsilon"]);
    assert_eq!(row_text(&rows, 2), vec!["Read Less"]);
}

#[test]
fn test_hidden_toggle_not_hit() {
    let mut page = Page::new(30);
    let wrap = page.add(Node::toggle_wrap("wrap"));
    let link = page.create_node(Node::toggle_link("t_0", "link", "Toggle"));
    page.append_child(wrap, link);
    page.set_hidden(wrap, true);

    let rows = layout_page(&page);
    assert_eq!(rows.len(), 1);
    assert!(rows[0].segments[0].hidden);
    assert_eq!(hit_test(&page, &rows, 1, 0), None);

    page.set_hidden(wrap, false);
    let rows = layout_page(&page);
    assert_eq!(hit_test(&page, &rows, 1, 0), Some("t_0".to_string()));
}

// =============================================================================
// Page
// =============================================================================

#[test]
fn test_select_class_and_text_of() {
    let mut page = Page::new(30);
    let a = page.add(Node::block("<b>first</b> block").class("content"));
    page.block("plain");
    let c = page.add(Node::block("third").class("content extra"));

    assert_eq!(page.select_class("content"), vec![a, c]);
    assert_eq!(page.select_class("extra"), vec![c]);
    assert_eq!(page.text_of(a), "first block");
}

#[test]
fn test_set_html_detaches_children() {
    let mut page = Page::new(30);
    let el = page.block("text");
    let child = page.create_node(Node::block("inner").id("inner"));
    page.append_child(el, child);
    assert_eq!(page.find_by_id("inner"), Some(child));

    page.set_html(el, "new text");
    assert!(page.children(el).is_empty());
    assert!(!page.is_attached(child));
    assert_eq!(page.find_by_id("inner"), None);
}
