//! Integration tests for viewport scrolling and culling.

#![allow(clippy::float_cmp)]

use petal_browser::Viewport;
use petal_layout::{ApproximateFontProvider, FontCache, LayoutConfig, layout};

fn config() -> LayoutConfig {
    LayoutConfig {
        height: 50.0,
        scroll_step: 20.0,
        ..LayoutConfig::default()
    }
}

#[test]
fn test_scrolling() {
    let mut viewport = Viewport::new(&config());
    assert_eq!(viewport.scroll(), 0.0);
    assert_eq!(viewport.height(), 50.0);

    viewport.scroll_down();
    viewport.scroll_down();
    assert_eq!(viewport.scroll(), 40.0);
    assert_eq!(viewport.to_screen(61.0), 21.0);

    viewport.scroll_up();
    viewport.scroll_up();
    viewport.scroll_up();
    assert_eq!(viewport.scroll(), 0.0);

    viewport.scroll_to(-5.0);
    assert_eq!(viewport.scroll(), 0.0);
}

#[test]
fn test_culling() {
    let config = config();
    let fonts = FontCache::new(ApproximateFontProvider);
    // Lines at y = 21, 41, 61, 81 (16px line spacing each).
    let tree = petal_html::parse("a<br>b<br>c<br>d");
    let list = layout(&tree, &fonts, &config);

    let mut viewport = Viewport::new(&config);
    let words = |viewport: &Viewport| -> Vec<String> {
        viewport
            .visible(&list, &fonts)
            .into_iter()
            .map(|item| item.text.clone())
            .collect()
    };

    // 0..50: d (81) and c (61) are below the bottom edge.
    assert_eq!(words(&viewport), vec!["a", "b"]);

    // 40..90: a ends at 37, above the top; b ends at 57.
    viewport.scroll_down();
    viewport.scroll_down();
    assert_eq!(words(&viewport), vec!["b", "c", "d"]);

    // 100..150: everything is above.
    viewport.scroll_to(100.0);
    assert!(words(&viewport).is_empty());
}
