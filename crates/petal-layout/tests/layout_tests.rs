//! Integration tests for the layout pass.
//!
//! All positions use `ApproximateFontProvider`, where a 16px regular glyph is
//! 8px wide (bold 10px), with a 12px ascent and 4px descent.

#![allow(clippy::float_cmp)]

use petal_html::parse;
use petal_layout::{
    ApproximateFontProvider, DisplayList, DocumentLayout, FontCache, FontKey, FontMetrics,
    LayoutConfig, Slant, StyleContext, Weight, layout,
};

/// Helper to lay out HTML at the default page size
fn lay_out(html: &str) -> DisplayList {
    lay_out_with(html, &LayoutConfig::default())
}

/// Helper to lay out HTML with a custom configuration
fn lay_out_with(html: &str, config: &LayoutConfig) -> DisplayList {
    let tree = parse(html);
    let fonts = FontCache::new(ApproximateFontProvider);
    layout(&tree, &fonts, config)
}

/// Helper to reduce a display list to (word, x, y)
fn placed(list: &DisplayList) -> Vec<(&str, f32, f32)> {
    list.iter()
        .map(|item| (item.text.as_str(), item.x, item.y))
        .collect()
}

#[test]
fn test_single_line() {
    let list = lay_out("Hello world");
    assert_eq!(placed(&list), vec![("Hello", 13.0, 21.0), ("world", 61.0, 21.0)]);
    assert!(list.iter().all(|item| item.font == FontKey::default()));
}

#[test]
fn test_words_split_on_any_whitespace() {
    let list = lay_out("<p>  a\n\tb  </p>");
    let words: Vec<&str> = list.iter().map(|item| item.text.as_str()).collect();
    assert_eq!(words, vec!["a", "b"]);
}

#[test]
fn test_flush_on_empty_line_is_noop() {
    let fonts = FontCache::new(ApproximateFontProvider);
    let config = LayoutConfig::default();
    let mut engine = DocumentLayout::new(&fonts, &config);

    engine.flush();
    assert_eq!(engine.cursor(), (13.0, 18.0));
    assert!(engine.display_list().is_empty());

    engine.add_text("hi");
    engine.flush();
    assert_eq!(engine.cursor(), (13.0, 38.0));
    assert_eq!(engine.display_list().len(), 1);

    engine.flush();
    assert_eq!(engine.cursor(), (13.0, 38.0));
    assert_eq!(engine.display_list().len(), 1);
}

#[test]
fn test_bold_restored_after_close() {
    let list = lay_out("<b>bold words</b> plain");
    let weights: Vec<(&str, Weight)> = list
        .iter()
        .map(|item| (item.text.as_str(), item.font.weight))
        .collect();
    assert_eq!(
        weights,
        vec![
            ("bold", Weight::Bold),
            ("words", Weight::Bold),
            ("plain", Weight::Normal)
        ]
    );
    // Bold advances are wider: 4 * 10 + 10, then 5 * 10 + 10.
    assert_eq!(
        placed(&list),
        vec![("bold", 13.0, 21.0), ("words", 63.0, 21.0), ("plain", 123.0, 21.0)]
    );
}

#[test]
fn test_italic_restored_after_close() {
    let list = lay_out("<i>x</i>y");
    let slants: Vec<Slant> = list.iter().map(|item| item.font.slant).collect();
    assert_eq!(slants, vec![Slant::Italic, Slant::Roman]);
}

#[test]
fn test_close_applies_inverse_not_saved_style() {
    let list = lay_out("<i><i>x</i>y</i>");
    let slants: Vec<Slant> = list.iter().map(|item| item.font.slant).collect();
    assert_eq!(slants, vec![Slant::Italic, Slant::Roman]);
}

#[test]
fn test_size_deltas() {
    let list = lay_out("<small>a</small>b<big>c</big><big><small>d</small></big>e");
    let sizes: Vec<(&str, i32)> = list
        .iter()
        .map(|item| (item.text.as_str(), item.font.size))
        .collect();
    assert_eq!(
        sizes,
        vec![("a", 14), ("b", 16), ("c", 20), ("d", 18), ("e", 16)]
    );
}

#[test]
fn test_mixed_sizes_share_baseline() {
    let list = lay_out("<big>A</big> b");
    // Big: 20px, ascent 15. Baseline = 18 + 1.25 * 15 = 36.75.
    assert_eq!(placed(&list), vec![("A", 13.0, 21.75), ("b", 33.0, 24.75)]);

    let fonts = FontCache::new(ApproximateFontProvider);
    for item in &list {
        let ascent = fonts.get(item.font).ascent();
        assert_eq!(item.y + ascent, 36.75);
    }
}

#[test]
fn test_paragraph_gap() {
    let list = lay_out("<p>a</p><p>b</p>");
    // Line 1 ends at 33 + 5 = 38, plus an 18px gap.
    assert_eq!(placed(&list), vec![("a", 13.0, 21.0), ("b", 13.0, 59.0)]);
}

#[test]
fn test_line_break() {
    let list = lay_out("a<br>b");
    assert_eq!(placed(&list), vec![("a", 13.0, 21.0), ("b", 13.0, 41.0)]);
}

#[test]
fn test_wrap_at_right_margin() {
    let config = LayoutConfig::with_size(100.0, 100.0);
    let list = lay_out_with("aaaa bbbb cccc", &config);
    // Margin is 87: bbbb ends at 85 and fits, cccc would end at 125.
    assert_eq!(
        placed(&list),
        vec![("aaaa", 13.0, 21.0), ("bbbb", 53.0, 21.0), ("cccc", 13.0, 41.0)]
    );
}

#[test]
fn test_overwide_word_placed_alone() {
    let config = LayoutConfig::with_size(100.0, 100.0);
    let long = "w".repeat(20);
    let list = lay_out_with(&format!("x {long} y"), &config);
    assert_eq!(
        placed(&list),
        vec![("x", 13.0, 21.0), (long.as_str(), 13.0, 41.0), ("y", 13.0, 61.0)]
    );
}

#[test]
fn test_overwide_first_word() {
    let config = LayoutConfig::with_size(100.0, 100.0);
    let long = "w".repeat(20);
    let list = lay_out_with(&long, &config);
    assert_eq!(placed(&list), vec![(long.as_str(), 13.0, 21.0)]);
}

#[test]
fn test_unknown_tags_still_walked() {
    let list = lay_out("<span>a</span><foo bar=1>b</foo>");
    assert_eq!(placed(&list), vec![("a", 13.0, 21.0), ("b", 29.0, 21.0)]);
    assert!(list.iter().all(|item| item.font == FontKey::default()));
}

#[test]
fn test_head_text_is_laid_out_first() {
    let list = lay_out("<title>T</title>Body");
    assert_eq!(placed(&list), vec![("T", 13.0, 21.0), ("Body", 29.0, 21.0)]);
}

#[test]
fn test_empty_document() {
    assert!(lay_out("").is_empty());
    assert!(lay_out("<p></p><br>").is_empty());
}

#[test]
fn test_document_order_is_top_to_bottom() {
    let config = LayoutConfig::with_size(120.0, 100.0);
    let list = lay_out_with(
        "<p>one two three four five</p><p><big>six</big> seven<br>eight</p>",
        &config,
    );
    assert_eq!(list.len(), 8);
    for pair in list.items().windows(2) {
        let (a, b) = (&pair[0], &pair[1]);
        assert!(b.y >= a.y || b.x > a.x, "{a:?} then {b:?}");
    }
}

#[test]
fn test_style_context_restored_after_walk() {
    let tree = parse("<b><i><big>x</big></i></b>");
    let fonts = FontCache::new(ApproximateFontProvider);
    let config = LayoutConfig::default();
    let mut engine = DocumentLayout::new(&fonts, &config);
    engine.layout_node(&tree, tree.root());
    assert_eq!(engine.style(), StyleContext::default());

    let list = engine.finish();
    assert_eq!(
        list.items()[0].font,
        FontKey::new(20, Weight::Bold, Slant::Italic)
    );
}

#[test]
fn test_font_cache_reused_across_words() {
    let tree = parse("a b c <b>d e</b> f");
    let fonts = FontCache::new(ApproximateFontProvider);
    let _ = layout(&tree, &fonts, &LayoutConfig::default());
    assert_eq!(fonts.len(), 2);
}

#[test]
fn test_content_height() {
    let list = lay_out("a");
    let fonts = FontCache::new(ApproximateFontProvider);
    assert_eq!(list.content_height(|key| fonts.get(key).linespace()), 37.0);
    assert_eq!(DisplayList::new().content_height(|_| 16.0), 0.0);
}

#[test]
fn test_display_list_serializes() {
    let list = lay_out("<b>x</b>");
    let json = serde_json::to_value(&list).unwrap();
    assert_eq!(
        json,
        serde_json::json!([{
            "x": 13.0,
            "y": 21.0,
            "text": "x",
            "font": { "size": 16, "weight": "bold", "slant": "roman" }
        }])
    );
}

#[test]
fn test_very_deep_tree_pairs_style_changes() {
    use petal_dom::{DomTree, ElementData, NodeId, NodeType};

    const DEPTH: usize = 100_000;

    fn element(tree: &mut DomTree, tag: &str, parent: Option<NodeId>) -> NodeId {
        let id = tree.alloc(
            NodeType::Element(ElementData::new(tag, Default::default())),
            parent,
        );
        if let Some(parent) = parent {
            tree.append_child(parent, id);
        }
        id
    }

    // html > i > b x DEPTH > "x", then "y" as the last child of html.
    let mut tree = DomTree::new();
    let html = element(&mut tree, "html", None);
    let mut parent = element(&mut tree, "i", Some(html));
    for _ in 0..DEPTH {
        parent = element(&mut tree, "b", Some(parent));
    }
    let x = tree.alloc(NodeType::Text("x".to_string()), Some(parent));
    tree.append_child(parent, x);
    let y = tree.alloc(NodeType::Text("y".to_string()), Some(html));
    tree.append_child(html, y);

    let fonts = FontCache::new(ApproximateFontProvider);
    let list = layout(&tree, &fonts, &LayoutConfig::default());

    // Bold glyph and bold space are both 10px.
    assert_eq!(placed(&list), vec![("x", 13.0, 21.0), ("y", 33.0, 21.0)]);
    assert_eq!(list.items()[0].font, FontKey::new(16, Weight::Bold, Slant::Italic));
    assert_eq!(list.items()[1].font, FontKey::default());
}
