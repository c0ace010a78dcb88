//! Integration tests for the document loading pipeline.

use std::io::Write;

use petal_browser::{LoadError, SystemFontProvider, load_document, parse_html_string};
use petal_html::IssueKind;
use petal_layout::{ApproximateFontProvider, FontCache, LayoutConfig, Weight};

#[test]
fn test_parse_html_string_runs_whole_pipeline() {
    let fonts = FontCache::new(ApproximateFontProvider);
    let doc = parse_html_string("<p>Hello <b>world", &fonts, &LayoutConfig::default());

    assert_eq!(doc.html_source, "<p>Hello <b>world");
    assert!(doc.dom.body().is_some());
    assert_eq!(doc.display_list.len(), 2);
    assert_eq!(doc.display_list.items()[1].font.weight, Weight::Bold);

    let kinds: Vec<IssueKind> = doc.parse_issues.iter().map(|i| i.kind).collect();
    assert_eq!(kinds, vec![IssueKind::UnclosedElement, IssueKind::UnclosedElement]);
}

#[test]
fn test_load_data_url() {
    let fonts = FontCache::new(ApproximateFontProvider);
    let doc = load_document("data:text/html,<i>hi</i>", &fonts, &LayoutConfig::default()).unwrap();

    assert_eq!(doc.source_path, "data:text/html,<i>hi</i>");
    assert_eq!(
        doc.headers.get("content-type").map(String::as_str),
        Some("text/html")
    );
    assert_eq!(doc.display_list.len(), 1);
}

#[test]
fn test_load_local_file() {
    let path = std::env::temp_dir().join(format!("petal-loader-test-{}.html", std::process::id()));
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(b"<title>T</title><p>one two</p>").unwrap();
    drop(file);

    let fonts = FontCache::new(ApproximateFontProvider);
    let path_str = path.to_str().unwrap();
    let doc = load_document(path_str, &fonts, &LayoutConfig::default()).unwrap();

    assert!(doc.headers.is_empty());
    assert!(doc.dom.head().is_some());
    let words: Vec<&str> = doc.display_list.iter().map(|i| i.text.as_str()).collect();
    assert_eq!(words, vec!["T", "one", "two"]);

    std::fs::remove_file(&path).unwrap();
}

#[test]
fn test_missing_file_is_file_error() {
    let fonts = FontCache::new(ApproximateFontProvider);
    let err = load_document("/no/such/page.html", &fonts, &LayoutConfig::default()).unwrap_err();
    assert!(matches!(err, LoadError::File { .. }));
}

#[test]
fn test_bad_scheme_is_network_error() {
    let fonts = FontCache::new(ApproximateFontProvider);
    let err = load_document("gopher://example.org/", &fonts, &LayoutConfig::default()).unwrap_err();
    assert!(matches!(err, LoadError::Network { .. }));
    assert_eq!(
        err.to_string(),
        "failed to fetch 'gopher://example.org/': unknown scheme gopher"
    );
}

#[test]
fn test_fontless_provider_matches_approximation() {
    let config = LayoutConfig::default();
    let approximate = FontCache::new(ApproximateFontProvider);
    let fontless = FontCache::new(SystemFontProvider::without_fonts());

    let html = "<big>Big</big> and <small><i>small</i></small> <b>bold</b>";
    let a = parse_html_string(html, &approximate, &config);
    let b = parse_html_string(html, &fontless, &config);
    assert_eq!(a.display_list, b.display_list);
}
